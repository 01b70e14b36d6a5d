use crate::model::layer::MapLayer;
use crate::prelude::{Millis, Position};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identity classification of a track.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrackType {
    Friendly,
    Enemy,
    Air,
    Neutral,
    Unknown,
}

impl TrackType {
    pub const ALL: [TrackType; 5] = [
        TrackType::Friendly,
        TrackType::Enemy,
        TrackType::Air,
        TrackType::Neutral,
        TrackType::Unknown,
    ];

    /// Layer toggle governing this category. Neutral and unknown tracks have none.
    pub fn layer(self) -> Option<MapLayer> {
        match self {
            TrackType::Friendly => Some(MapLayer::Friendly),
            TrackType::Enemy => Some(MapLayer::Enemy),
            TrackType::Air => Some(MapLayer::Air),
            TrackType::Neutral | TrackType::Unknown => None,
        }
    }
}

/// Feed a track report originated from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TrackSource {
    #[serde(rename = "TAK")]
    Tak,
    #[serde(rename = "BFT")]
    Bft,
    #[serde(rename = "S2_MANUAL")]
    Manual,
    #[serde(rename = "AIS")]
    Ais,
}

impl TrackSource {
    pub const ALL: [TrackSource; 4] = [
        TrackSource::Tak,
        TrackSource::Bft,
        TrackSource::Manual,
        TrackSource::Ais,
    ];
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrackConfidence {
    High,
    Medium,
    Low,
}

impl TrackConfidence {
    pub const ALL: [TrackConfidence; 3] = [
        TrackConfidence::High,
        TrackConfidence::Medium,
        TrackConfidence::Low,
    ];
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnitRole {
    Infantry,
    Armor,
    Artillery,
    Recon,
    Aviation,
    Hq,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnitEchelon {
    Section,
    Platoon,
    Company,
    Battalion,
    Brigade,
}

/// Free-form metadata value attached to a track.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MetadataValue {
    Number(f64),
    Text(String),
}

/// A tracked real-world entity as held by the track store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: String,
    pub callsign: String,
    pub label: String,
    #[serde(rename = "type")]
    pub track_type: TrackType,
    pub source: TrackSource,
    pub pos: Position,
    pub timestamp: Millis,
    pub last_seen: Millis,
    pub stale_after: Millis,
    pub expire_after: Millis,
    pub confidence: TrackConfidence,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UnitRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub echelon: Option<UnitEchelon>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_offline: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BTreeMap<String, MetadataValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composition: Option<Vec<String>>,
}

impl Track {
    /// Minimal track with the mandatory identity and timing fields; optional
    /// attributes start empty and are filled with the `with_*` builders.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        callsign: impl Into<String>,
        label: impl Into<String>,
        track_type: TrackType,
        source: TrackSource,
        confidence: TrackConfidence,
        pos: Position,
        last_seen: Millis,
        stale_after: Millis,
        expire_after: Millis,
    ) -> Self {
        Self {
            id: id.into(),
            callsign: callsign.into(),
            label: label.into(),
            track_type,
            source,
            pos,
            timestamp: last_seen,
            last_seen,
            stale_after,
            expire_after,
            confidence,
            role: None,
            echelon: None,
            heading: None,
            speed: None,
            health: None,
            altitude: None,
            is_offline: None,
            metadata: None,
            composition: None,
        }
    }

    pub fn with_role(mut self, role: UnitRole) -> Self {
        self.role = Some(role);
        self
    }

    pub fn with_echelon(mut self, echelon: UnitEchelon) -> Self {
        self.echelon = Some(echelon);
        self
    }

    pub fn with_heading(mut self, heading: f64) -> Self {
        self.heading = Some(heading);
        self
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn with_health(mut self, health: f64) -> Self {
        self.health = Some(health);
        self
    }

    pub fn with_composition<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.composition = Some(items.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: MetadataValue) -> Self {
        self.metadata
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_and_unknown_have_no_layer() {
        assert_eq!(TrackType::Friendly.layer(), Some(MapLayer::Friendly));
        assert_eq!(TrackType::Neutral.layer(), None);
        assert_eq!(TrackType::Unknown.layer(), None);
    }

    #[test]
    fn track_serializes_with_original_tags() {
        let track = Track::new(
            "e1",
            "T-72 PLT",
            "OPFOR ARMOR",
            TrackType::Enemy,
            TrackSource::Manual,
            TrackConfidence::Medium,
            Position::new(600.0, 450.0),
            1_000,
            600_000,
            1_200_000,
        );
        let value = serde_json::to_value(&track).unwrap();
        assert_eq!(value["type"], "ENEMY");
        assert_eq!(value["source"], "S2_MANUAL");
        assert_eq!(value["confidence"], "MEDIUM");
        assert_eq!(value["staleAfter"], 600_000);
        assert!(value.get("heading").is_none());
    }
}
