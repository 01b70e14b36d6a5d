use crate::model::Track;
use serde::Serialize;
use std::collections::BTreeSet;

/// Changes a renderer must make to bring its markers in line with the
/// visible track set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MarkerDiff {
    pub added: Vec<String>,
    pub updated: Vec<String>,
    pub removed: Vec<String>,
}

impl MarkerDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty() && self.removed.is_empty()
    }
}

/// Ids of the markers currently placed on the map.
#[derive(Debug, Clone, Default)]
pub struct MarkerLedger {
    placed: BTreeSet<String>,
}

impl MarkerLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn placed(&self) -> impl Iterator<Item = &str> {
        self.placed.iter().map(String::as_str)
    }

    /// Reconciles the ledger with the next visible set. Every visible track is
    /// either added or updated in place; anything no longer visible is removed.
    pub fn reconcile<'a, I>(&mut self, visible: I) -> MarkerDiff
    where
        I: IntoIterator<Item = &'a Track>,
    {
        let mut diff = MarkerDiff::default();
        let mut next = BTreeSet::new();

        for track in visible {
            if !next.insert(track.id.clone()) {
                continue;
            }
            if self.placed.contains(&track.id) {
                diff.updated.push(track.id.clone());
            } else {
                diff.added.push(track.id.clone());
            }
        }

        diff.removed = self.placed.difference(&next).cloned().collect();
        self.placed = next;
        diff
    }
}
