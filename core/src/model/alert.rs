use crate::prelude::{Millis, Position};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertType {
    Contact,
    BoundaryViolation,
    BftStale,
    FiresConflict,
    EwWarning,
}

/// Alert severity. Only `Critical` reaches the commander overlay.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

/// A notable event requiring operator attention.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub severity: Severity,
    pub message: String,
    pub timestamp: Millis,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acknowledged: Option<bool>,
}

impl Alert {
    pub fn new(
        id: impl Into<String>,
        alert_type: AlertType,
        severity: Severity,
        message: impl Into<String>,
        timestamp: Millis,
    ) -> Self {
        Self {
            id: id.into(),
            alert_type,
            severity,
            message: message.into(),
            timestamp,
            pos: None,
            track_id: None,
            acknowledged: None,
        }
    }

    pub fn at(mut self, pos: Position) -> Self {
        self.pos = Some(pos);
        self
    }

    pub fn linked_to(mut self, track_id: impl Into<String>) -> Self {
        self.track_id = Some(track_id.into());
        self
    }

    pub fn is_critical(&self) -> bool {
        self.severity == Severity::Critical
    }

    pub fn is_acknowledged(&self) -> bool {
        self.acknowledged.unwrap_or(false)
    }
}
