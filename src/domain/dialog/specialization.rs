//! Specialization narrowing.
//!
//! Catalog specialization names are free text ("Software Engineering
//! (Co-op)"); spoken input is matched by normalized substring containment
//! rather than exact resolution. Narrowing is recomputed on every attempt
//! and never persisted beyond the turn that produced it.

use crate::domain::candidates::Candidate;

/// Outcome of narrowing catalog specializations against an utterance.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    /// Nothing contained the utterance; ask the user to rephrase.
    None,
    /// Exactly one specialization matched; resolve immediately.
    Unique(Candidate),
    /// Several matched; the user must choose among them next turn.
    Ambiguous(Vec<Candidate>),
}

/// Lower-cases a specialization name, strips everything but letters and
/// spaces, and collapses runs of whitespace.
pub fn normalize_name(name: &str) -> String {
    let letters_only: String = name
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || *c == ' ')
        .collect();
    letters_only.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Filters catalog specializations to those whose normalized name contains
/// the lower-cased utterance as a substring.
///
/// Matching candidates keep the catalog name as their canonical value and
/// carry the normalized name as a recognition synonym.
pub fn narrow(catalog_names: &[String], utterance: &str) -> MatchOutcome {
    let needle = utterance.trim().to_lowercase();
    if needle.is_empty() {
        return MatchOutcome::None;
    }

    let mut matches: Vec<Candidate> = catalog_names
        .iter()
        .filter(|name| normalize_name(name).contains(&needle))
        .map(|name| Candidate::new(name).with_synonym(normalize_name(name)))
        .collect();

    match matches.len() {
        0 => MatchOutcome::None,
        1 => MatchOutcome::Unique(matches.remove(0)),
        _ => MatchOutcome::Ambiguous(matches),
    }
}
