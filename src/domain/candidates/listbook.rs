//! Active candidate lists for one session.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Candidate, CandidateDirective, SlotNamespace};

/// The candidate lists currently installed for a session.
///
/// Mirrors what the recognizer was last told: every mutation returns the
/// directives the transport must forward so recognizer and session stay in
/// step. Installation is clear-before-replace within a namespace, so only
/// one candidate generation is ever exposed for recognition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateListbook {
    active: BTreeMap<SlotNamespace, Vec<Candidate>>,
}

impl CandidateListbook {
    /// Creates an empty listbook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a new candidate generation for the namespace.
    ///
    /// Emits a `Clear` for the namespace's prior generation (if any)
    /// followed by the `Replace`, so the swap is atomic from the
    /// recognizer's point of view.
    pub fn replace(
        &mut self,
        namespace: SlotNamespace,
        candidates: Vec<Candidate>,
    ) -> Vec<CandidateDirective> {
        let mut directives = Vec::with_capacity(2);
        if self.active.contains_key(&namespace) {
            directives.push(CandidateDirective::Clear { namespace });
        }
        directives.push(CandidateDirective::Replace {
            namespace,
            candidates: candidates.clone(),
        });
        self.active.insert(namespace, candidates);
        directives
    }

    /// Removes the namespace's recognition hints.
    pub fn clear(&mut self, namespace: SlotNamespace) -> Option<CandidateDirective> {
        self.active
            .remove(&namespace)
            .map(|_| CandidateDirective::Clear { namespace })
    }

    /// Clears every active namespace.
    pub fn clear_all(&mut self) -> Vec<CandidateDirective> {
        let namespaces: Vec<SlotNamespace> = self.active.keys().copied().collect();
        namespaces
            .into_iter()
            .filter_map(|namespace| self.clear(namespace))
            .collect()
    }

    /// Clears all stale namespaces, then installs the next slot's list.
    ///
    /// This is the slot-transition operation: a phrase from the previous
    /// slot must never resolve once the dialog has moved on.
    pub fn swap(
        &mut self,
        namespace: SlotNamespace,
        candidates: Vec<Candidate>,
    ) -> Vec<CandidateDirective> {
        let mut directives = self.clear_all();
        directives.extend(self.replace(namespace, candidates));
        directives
    }

    /// Returns the active list for a namespace, if one is installed.
    pub fn active(&self, namespace: SlotNamespace) -> Option<&[Candidate]> {
        self.active.get(&namespace).map(Vec::as_slice)
    }

    /// Returns true if no list is installed.
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
