//! Candidate values and the directives that install them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A canonical slot value plus the synonyms the recognizer accepts for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// The value stored in the session when this candidate is chosen.
    pub canonical: String,
    /// Alternative phrasings that resolve to the canonical value.
    pub synonyms: Vec<String>,
}

impl Candidate {
    /// Creates a candidate with no synonyms.
    pub fn new(canonical: impl Into<String>) -> Self {
        Self {
            canonical: canonical.into(),
            synonyms: Vec::new(),
        }
    }

    /// Adds a recognition synonym.
    pub fn with_synonym(mut self, synonym: impl Into<String>) -> Self {
        self.synonyms.push(synonym.into());
        self
    }

    /// Adds several recognition synonyms.
    pub fn with_synonyms<I, S>(mut self, synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.synonyms.extend(synonyms.into_iter().map(Into::into));
        self
    }

    /// Returns true if the phrase equals the canonical value or any synonym,
    /// ignoring case.
    pub fn matches(&self, phrase: &str) -> bool {
        let phrase = phrase.trim();
        self.canonical.eq_ignore_ascii_case(phrase)
            || self.synonyms.iter().any(|s| s.eq_ignore_ascii_case(phrase))
    }
}

/// The slot a candidate list belongs to.
///
/// At most one list is active per namespace at any time.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SlotNamespace {
    QuestionScope,
    Faculty,
    Program,
    Specialization,
    YearLevel,
    YesNo,
}

impl SlotNamespace {
    /// Returns the wire name of the namespace.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::QuestionScope => "question_scope",
            Self::Faculty => "faculty",
            Self::Program => "program",
            Self::Specialization => "specialization",
            Self::YearLevel => "year_level",
            Self::YesNo => "yes_no",
        }
    }
}

impl fmt::Display for SlotNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An instruction to the recognizer about a slot's candidate list.
///
/// Directives are emitted as part of the turn output; the transport forwards
/// them to the platform's entity-resolution layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum CandidateDirective {
    /// Install a new candidate generation for the namespace.
    Replace {
        namespace: SlotNamespace,
        candidates: Vec<Candidate>,
    },
    /// Remove the namespace's recognition hints.
    Clear { namespace: SlotNamespace },
}

impl CandidateDirective {
    /// Returns the namespace the directive applies to.
    pub fn namespace(&self) -> SlotNamespace {
        match self {
            Self::Replace { namespace, .. } | Self::Clear { namespace } => *namespace,
        }
    }

    /// Returns true if this directive installs candidates.
    pub fn is_replace(&self) -> bool {
        matches!(self, Self::Replace { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod matching {
        use super::*;

        #[test]
        fn matches_canonical_ignoring_case() {
            let candidate = Candidate::new("Engineering");
            assert!(candidate.matches("engineering"));
            assert!(candidate.matches("ENGINEERING"));
        }

        #[test]
        fn matches_any_synonym() {
            let candidate = Candidate::new("First Year")
                .with_synonym("freshman")
                .with_synonym("1st year");
            assert!(candidate.matches("Freshman"));
            assert!(candidate.matches("1st year"));
        }

        #[test]
        fn trims_surrounding_whitespace() {
            let candidate = Candidate::new("yes");
            assert!(candidate.matches("  yes "));
        }

        #[test]
        fn rejects_unrelated_phrase() {
            let candidate = Candidate::new("Engineering").with_synonym("eng");
            assert!(!candidate.matches("science"));
        }
    }

    mod directives {
        use super::*;

        #[test]
        fn directive_exposes_its_namespace() {
            let replace = CandidateDirective::Replace {
                namespace: SlotNamespace::Faculty,
                candidates: vec![Candidate::new("Engineering")],
            };
            let clear = CandidateDirective::Clear {
                namespace: SlotNamespace::Program,
            };

            assert_eq!(replace.namespace(), SlotNamespace::Faculty);
            assert!(replace.is_replace());
            assert_eq!(clear.namespace(), SlotNamespace::Program);
            assert!(!clear.is_replace());
        }

        #[test]
        fn directive_serializes_with_action_tag() {
            let clear = CandidateDirective::Clear {
                namespace: SlotNamespace::YesNo,
            };
            let json = serde_json::to_string(&clear).unwrap();
            assert_eq!(json, "{\"action\":\"clear\",\"namespace\":\"yes_no\"}");
        }
    }

    #[test]
    fn namespace_displays_wire_name() {
        assert_eq!(SlotNamespace::YearLevel.to_string(), "year_level");
        assert_eq!(SlotNamespace::QuestionScope.to_string(), "question_scope");
    }
}
