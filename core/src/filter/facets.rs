use crate::model::{TrackConfidence, TrackSource, TrackType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Allowed category, source, and confidence sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetFilter {
    pub types: BTreeSet<TrackType>,
    pub sources: BTreeSet<TrackSource>,
    pub confidences: BTreeSet<TrackConfidence>,
}

/// One toggleable facet value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "facet", content = "value", rename_all = "snake_case")]
pub enum FacetValue {
    Type(TrackType),
    Source(TrackSource),
    Confidence(TrackConfidence),
}

impl FacetFilter {
    /// Every facet value allowed.
    pub fn permissive() -> Self {
        Self {
            types: TrackType::ALL.into_iter().collect(),
            sources: TrackSource::ALL.into_iter().collect(),
            confidences: TrackConfidence::ALL.into_iter().collect(),
        }
    }

    pub fn allows(&self, value: FacetValue) -> bool {
        match value {
            FacetValue::Type(t) => self.types.contains(&t),
            FacetValue::Source(s) => self.sources.contains(&s),
            FacetValue::Confidence(c) => self.confidences.contains(&c),
        }
    }

    /// Removes the value if present, otherwise adds it.
    pub fn toggle(&mut self, value: FacetValue) {
        match value {
            FacetValue::Type(t) => toggle_member(&mut self.types, t),
            FacetValue::Source(s) => toggle_member(&mut self.sources, s),
            FacetValue::Confidence(c) => toggle_member(&mut self.confidences, c),
        }
    }
}

/// Opening facets: unknown categories and AIS reports are hidden.
impl Default for FacetFilter {
    fn default() -> Self {
        Self {
            types: [
                TrackType::Friendly,
                TrackType::Enemy,
                TrackType::Air,
                TrackType::Neutral,
            ]
            .into_iter()
            .collect(),
            sources: [TrackSource::Tak, TrackSource::Bft, TrackSource::Manual]
                .into_iter()
                .collect(),
            confidences: TrackConfidence::ALL.into_iter().collect(),
        }
    }
}

pub(crate) fn toggle_member<T: Ord>(set: &mut BTreeSet<T>, value: T) {
    if !set.remove(&value) {
        set.insert(value);
    }
}
