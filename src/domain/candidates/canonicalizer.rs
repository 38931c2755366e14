//! Turn-input canonicalization.
//!
//! Maps a turn's raw recognized phrase back to a canonical domain value.
//! When the recognizer already resolved the utterance, its verdict is
//! authoritative; when no resolution was attempted (free-form transports,
//! offline drivers), the raw phrase is matched locally against the active
//! candidate list.

use serde::{Deserialize, Serialize};

use super::Candidate;

/// What the recognizer made of the utterance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SlotResolution {
    /// The recognizer aligned the utterance to a candidate.
    Matched {
        /// The candidate's canonical value.
        canonical: String,
        /// The synonym that matched, when it was not the canonical value.
        synonym: Option<String>,
    },
    /// The recognizer could not align the utterance to any candidate.
    NoMatch,
    /// No resolution was attempted for this turn.
    NotAttempted,
}

/// One turn's recognized input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognizedInput {
    /// The raw utterance as transcribed.
    pub raw: String,
    /// The recognizer's resolution verdict.
    pub resolution: SlotResolution,
}

impl RecognizedInput {
    /// Input the recognizer resolved to a canonical value.
    pub fn matched(raw: impl Into<String>, canonical: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            resolution: SlotResolution::Matched {
                canonical: canonical.into(),
                synonym: None,
            },
        }
    }

    /// Input the recognizer resolved through a registered synonym.
    pub fn matched_via(
        raw: impl Into<String>,
        canonical: impl Into<String>,
        synonym: impl Into<String>,
    ) -> Self {
        Self {
            raw: raw.into(),
            resolution: SlotResolution::Matched {
                canonical: canonical.into(),
                synonym: Some(synonym.into()),
            },
        }
    }

    /// Input the recognizer failed to resolve.
    pub fn no_match(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            resolution: SlotResolution::NoMatch,
        }
    }

    /// Input with no resolution attempted (free-form slots, local drivers).
    pub fn free_form(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            resolution: SlotResolution::NotAttempted,
        }
    }
}

/// Resolves a turn's input to a canonical value against the active list.
///
/// Returns `None` when the utterance does not resolve; the dialog machine
/// must then re-prompt the same slot without touching session state. A
/// successful match always yields the canonical form, never the synonym
/// that happened to be spoken.
pub fn canonicalize(input: &RecognizedInput, candidates: &[Candidate]) -> Option<String> {
    match &input.resolution {
        SlotResolution::Matched { canonical, .. } => Some(canonical.clone()),
        SlotResolution::NoMatch => None,
        SlotResolution::NotAttempted => candidates
            .iter()
            .find(|candidate| candidate.matches(&input.raw))
            .map(|candidate| candidate.canonical.clone()),
    }
}
