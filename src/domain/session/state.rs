//! The session state value type.
//!
//! One `SessionState` exists per conversation. Turns operate on an owned
//! copy and persist it only when the transition commits, so a failed or
//! re-prompted turn leaves the stored state untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::candidates::{builtin, Candidate, CandidateListbook};
use crate::domain::dialog::DialogStep;
use crate::domain::foundation::ValidationError;

/// Whether the student is asking a general or a program-specific question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionScope {
    General,
    Specific,
}

impl QuestionScope {
    /// Returns the canonical wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => builtin::SCOPE_GENERAL,
            Self::Specific => builtin::SCOPE_SPECIFIC,
        }
    }
}

impl fmt::Display for QuestionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for QuestionScope {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            builtin::SCOPE_GENERAL => Ok(Self::General),
            builtin::SCOPE_SPECIFIC => Ok(Self::Specific),
            other => Err(ValidationError::invalid_value(
                "question_scope",
                format!("expected general or specific, got '{}'", other),
            )),
        }
    }
}

/// The specialization slot.
///
/// `AwaitingChoice` holds the narrowed candidates from an ambiguous
/// resolution attempt until the follow-up turn picks one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SpecializationSlot {
    #[default]
    Unset,
    Loaded {
        value: String,
    },
    AwaitingChoice {
        candidates: Vec<Candidate>,
    },
}

impl SpecializationSlot {
    /// Returns true if no specialization has been recorded or narrowed.
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// Returns true if a narrowed choice is pending.
    pub fn is_awaiting_choice(&self) -> bool {
        matches!(self, Self::AwaitingChoice { .. })
    }

    /// Returns the stored specialization, if resolved.
    pub fn loaded(&self) -> Option<&str> {
        match self {
            Self::Loaded { value } => Some(value),
            _ => None,
        }
    }
}

/// The ask-another-question slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ContinuationSlot {
    #[default]
    Idle,
    AwaitingYesNo,
}

/// All state for one advising conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// The dialog machine's current position.
    pub step: DialogStep,
    pub scope: Option<QuestionScope>,
    pub faculty: Option<String>,
    pub program: Option<String>,
    pub specialization: SpecializationSlot,
    pub year_level: Option<String>,
    pub topic: Option<String>,
    pub question: Option<String>,
    /// The answer returned for the current question, once stored.
    pub answer: Option<String>,
    pub continuation: ContinuationSlot,
    /// Candidate lists currently installed for recognition.
    pub candidates: CandidateListbook,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SessionState {
    /// Creates a fresh session with every slot unset.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            step: DialogStep::CollectScope,
            scope: None,
            faculty: None,
            program: None,
            specialization: SpecializationSlot::Unset,
            year_level: None,
            topic: None,
            question: None,
            answer: None,
            continuation: ContinuationSlot::Idle,
            candidates: CandidateListbook::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns true if the scope of the current question is specific.
    pub fn is_specific(&self) -> bool {
        self.scope == Some(QuestionScope::Specific)
    }

    /// Returns true if no faculty or program has been collected yet.
    pub fn is_first_question(&self) -> bool {
        self.faculty.is_none() && self.program.is_none()
    }

    /// Clears the per-question slots for a follow-up question.
    ///
    /// Faculty, program, specialization, and year level persist for the
    /// rest of the session; scope, topic, question, answer, and the
    /// continuation flag start over.
    pub fn reset_for_next_question(&mut self) {
        self.scope = None;
        self.topic = None;
        self.question = None;
        self.answer = None;
        self.continuation = ContinuationSlot::Idle;
        self.step = DialogStep::CollectScope;
    }

    /// Stamps the state as modified now.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod question_scope {
        use super::*;

        #[test]
        fn parses_canonical_values() {
            assert_eq!("general".parse::<QuestionScope>(), Ok(QuestionScope::General));
            assert_eq!("specific".parse::<QuestionScope>(), Ok(QuestionScope::Specific));
        }

        #[test]
        fn rejects_unknown_value() {
            assert!("broad".parse::<QuestionScope>().is_err());
        }

        #[test]
        fn serializes_lowercase() {
            let json = serde_json::to_string(&QuestionScope::Specific).unwrap();
            assert_eq!(json, "\"specific\"");
        }
    }

    mod specialization_slot {
        use super::*;

        #[test]
        fn default_is_unset() {
            assert!(SpecializationSlot::default().is_unset());
        }

        #[test]
        fn loaded_exposes_value() {
            let slot = SpecializationSlot::Loaded {
                value: "Software Engineering".to_string(),
            };
            assert_eq!(slot.loaded(), Some("Software Engineering"));
            assert!(!slot.is_unset());
        }

        #[test]
        fn awaiting_choice_is_neither_unset_nor_loaded() {
            let slot = SpecializationSlot::AwaitingChoice {
                candidates: vec![Candidate::new("Software Engineering")],
            };
            assert!(slot.is_awaiting_choice());
            assert!(slot.loaded().is_none());
        }
    }

    mod session_lifecycle {
        use super::*;

        fn answered_session() -> SessionState {
            let mut state = SessionState::new();
            state.scope = Some(QuestionScope::Specific);
            state.faculty = Some("Engineering".to_string());
            state.program = Some("Computer Science".to_string());
            state.specialization = SpecializationSlot::Loaded {
                value: "Software Engineering".to_string(),
            };
            state.year_level = Some("Third Year".to_string());
            state.topic = Some("course load".to_string());
            state.question = Some("How many credits can I take?".to_string());
            state.answer = Some("Up to eighteen credits.".to_string());
            state.continuation = ContinuationSlot::AwaitingYesNo;
            state
        }

        #[test]
        fn new_session_has_every_slot_unset() {
            let state = SessionState::new();
            assert_eq!(state.step, DialogStep::CollectScope);
            assert!(state.scope.is_none());
            assert!(state.faculty.is_none());
            assert!(state.specialization.is_unset());
            assert!(state.is_first_question());
            assert!(state.candidates.is_empty());
        }

        #[test]
        fn reset_clears_per_question_slots_only() {
            let mut state = answered_session();
            state.reset_for_next_question();

            assert!(state.scope.is_none());
            assert!(state.topic.is_none());
            assert!(state.question.is_none());
            assert!(state.answer.is_none());
            assert_eq!(state.continuation, ContinuationSlot::Idle);
            assert_eq!(state.step, DialogStep::CollectScope);

            assert_eq!(state.faculty.as_deref(), Some("Engineering"));
            assert_eq!(state.program.as_deref(), Some("Computer Science"));
            assert_eq!(state.specialization.loaded(), Some("Software Engineering"));
            assert_eq!(state.year_level.as_deref(), Some("Third Year"));
        }

        #[test]
        fn state_round_trips_through_serde() {
            let state = answered_session();
            let json = serde_json::to_string(&state).unwrap();
            let restored: SessionState = serde_json::from_str(&json).unwrap();
            assert_eq!(state, restored);
        }
    }
}
