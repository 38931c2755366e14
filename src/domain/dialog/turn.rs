//! Turn input and output contracts.

use serde::{Deserialize, Serialize};

use crate::domain::candidates::{CandidateDirective, RecognizedInput};
use crate::domain::foundation::RequestId;

/// One inbound turn from the voice transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRequest {
    /// The platform identifier of this request; acknowledgments are
    /// addressed to it.
    pub request_id: RequestId,
    /// The recognized input for this turn.
    pub input: RecognizedInput,
}

impl TurnRequest {
    /// Creates a turn request.
    pub fn new(request_id: RequestId, input: RecognizedInput) -> Self {
        Self { request_id, input }
    }

    /// A turn whose utterance was not run through recognition.
    pub fn free_form(request_id: RequestId, raw: impl Into<String>) -> Self {
        Self::new(request_id, RecognizedInput::free_form(raw))
    }

    /// A turn the recognizer resolved to a canonical value.
    pub fn matched(
        request_id: RequestId,
        raw: impl Into<String>,
        canonical: impl Into<String>,
    ) -> Self {
        Self::new(request_id, RecognizedInput::matched(raw, canonical))
    }

    /// A turn the recognizer failed to resolve.
    pub fn no_match(request_id: RequestId, raw: impl Into<String>) -> Self {
        Self::new(request_id, RecognizedInput::no_match(raw))
    }
}

/// An out-of-band acknowledgment addressed to a specific request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AckDirective {
    /// The request the acknowledgment answers.
    pub request_id: RequestId,
    /// What to speak while the turn's real work completes.
    pub speech: String,
}

impl AckDirective {
    /// Creates an acknowledgment directive.
    pub fn new(request_id: RequestId, speech: impl Into<String>) -> Self {
        Self {
            request_id,
            speech: speech.into(),
        }
    }
}

/// One outbound turn to the voice transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnResponse {
    /// The prompt to speak.
    pub speech: String,
    /// A distinct reprompt, when the slot uses one; the transport falls
    /// back to `speech` otherwise.
    pub reprompt: Option<String>,
    /// Candidate list changes for the recognizer.
    pub directives: Vec<CandidateDirective>,
    /// The acknowledgment issued out-of-band during this turn, if any.
    pub acknowledgment: Option<AckDirective>,
    /// True when the session ends after this turn.
    pub end_session: bool,
}

impl TurnResponse {
    /// A continuing response that speaks the given prompt.
    pub fn prompt(speech: impl Into<String>) -> Self {
        Self {
            speech: speech.into(),
            reprompt: None,
            directives: Vec::new(),
            acknowledgment: None,
            end_session: false,
        }
    }

    /// A final response that speaks the given prompt and ends the session.
    pub fn farewell(speech: impl Into<String>) -> Self {
        Self {
            end_session: true,
            ..Self::prompt(speech)
        }
    }

    /// Sets a distinct reprompt.
    pub fn with_reprompt(mut self, reprompt: impl Into<String>) -> Self {
        self.reprompt = Some(reprompt.into());
        self
    }

    /// Attaches candidate list directives.
    pub fn with_directives(mut self, directives: Vec<CandidateDirective>) -> Self {
        self.directives = directives;
        self
    }

    /// Records the acknowledgment issued during this turn.
    pub fn with_acknowledgment(mut self, ack: AckDirective) -> Self {
        self.acknowledgment = Some(ack);
        self
    }

    /// The reprompt to use, falling back to the spoken prompt.
    pub fn effective_reprompt(&self) -> &str {
        self.reprompt.as_deref().unwrap_or(&self.speech)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::candidates::SlotNamespace;

    fn request_id() -> RequestId {
        RequestId::new("req-1").unwrap()
    }

    #[test]
    fn free_form_request_carries_raw_utterance() {
        let request = TurnRequest::free_form(request_id(), "course load");
        assert_eq!(request.input.raw, "course load");
    }

    #[test]
    fn prompt_response_continues_the_session() {
        let response = TurnResponse::prompt("What is your faculty?");
        assert!(!response.end_session);
        assert_eq!(response.effective_reprompt(), "What is your faculty?");
    }

    #[test]
    fn farewell_response_ends_the_session() {
        let response = TurnResponse::farewell("Goodbye!");
        assert!(response.end_session);
    }

    #[test]
    fn distinct_reprompt_overrides_speech() {
        let response = TurnResponse::prompt("Your faculty is Engineering. What is your program?")
            .with_reprompt("What is your program?");
        assert_eq!(response.effective_reprompt(), "What is your program?");
    }

    #[test]
    fn builder_attaches_directives_and_acknowledgment() {
        let response = TurnResponse::prompt("Please wait.")
            .with_directives(vec![CandidateDirective::Clear {
                namespace: SlotNamespace::Program,
            }])
            .with_acknowledgment(AckDirective::new(request_id(), "Working on it."));

        assert_eq!(response.directives.len(), 1);
        assert!(response.acknowledgment.is_some());
    }
}
