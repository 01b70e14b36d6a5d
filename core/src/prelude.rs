use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Milliseconds since the Unix epoch. Durations on tracks use the same unit.
pub type Millis = i64;

/// Wall-clock time in epoch milliseconds.
pub fn now_millis() -> Millis {
    Utc::now().timestamp_millis()
}

/// Map-space position. Screen coordinates are authoritative; lat/lng are optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            lat: None,
            lng: None,
        }
    }
}

/// Latitude/longitude pair used for location-grounded queries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

/// Common error type for the operational-picture core.
#[derive(thiserror::Error, Debug)]
pub enum CopError {
    #[error("simulation driver already running")]
    AlreadyRunning,
    #[error("configuration error: {0}")]
    Config(String),
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("service returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed service response: {0}")]
    MalformedResponse(String),
    #[error("serialization failure: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("shared state poisoned: {0}")]
    Poisoned(String),
}

pub type CopResult<T> = Result<T, CopError>;
