use serde::{Deserialize, Serialize};

/// Map overlay toggles offered to the operator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MapLayer {
    Friendly,
    Enemy,
    Air,
    Footprint,
    Fires,
    ControlMeasures,
}

impl MapLayer {
    pub const ALL: [MapLayer; 6] = [
        MapLayer::Friendly,
        MapLayer::Enemy,
        MapLayer::Air,
        MapLayer::Footprint,
        MapLayer::Fires,
        MapLayer::ControlMeasures,
    ];

    pub fn id(self) -> &'static str {
        match self {
            MapLayer::Friendly => "friendly",
            MapLayer::Enemy => "enemy",
            MapLayer::Air => "air",
            MapLayer::Footprint => "footprint",
            MapLayer::Fires => "fires",
            MapLayer::ControlMeasures => "control_measures",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MapLayer::Friendly => "Blue Force (BFT)",
            MapLayer::Enemy => "Red Force (Intel)",
            MapLayer::Air => "Airspace/UAS",
            MapLayer::Footprint => "Sensor Coverage",
            MapLayer::Fires => "Fire Support",
            MapLayer::ControlMeasures => "Tactical Graphics",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|layer| layer.id() == id)
    }
}
