//! Candidate lists offered to the speech recognizer.
//!
//! Each slot the dialog collects is backed by a named candidate list: the
//! canonical values the recognizer may resolve an utterance to, plus their
//! recognition synonyms. Lists are transient; the engine clears a slot's
//! prior generation before installing the next so stale phrases never
//! resolve against outdated semantics.

pub mod builtin;
mod candidate;
mod canonicalizer;
mod listbook;

pub use candidate::{Candidate, CandidateDirective, SlotNamespace};
pub use canonicalizer::{canonicalize, RecognizedInput, SlotResolution};
pub use listbook::CandidateListbook;
