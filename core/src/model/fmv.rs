use crate::prelude::Position;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeedStatus {
    Active,
    Offline,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SensorMetadata {
    pub heading: f64,
    pub fov: f64,
    pub aim_point: Position,
}

/// Full-motion-video feed shown in the picture-in-picture overlay.
///
/// A feed whose id matches a track id is flown by that track; the HUD reads
/// heading from it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FmvFeed {
    pub id: String,
    pub name: String,
    pub url: String,
    pub status: FeedStatus,
    pub bitrate: String,
    pub latency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensor_metadata: Option<SensorMetadata>,
}
