use crate::model::{Track, TrackType};
use crate::prelude::Millis;
use serde::{Deserialize, Serialize};

/// True when the track has gone strictly longer than `stale_after` without
/// an update. Exactly at the threshold it is still fresh.
pub fn is_stale(track: &Track, now: Millis) -> bool {
    now - track.last_seen > track.stale_after
}

/// Display freshness. `Expired` is informational only; expired tracks stay
/// in the store and in the filter output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Freshness {
    Fresh,
    Stale,
    Expired,
}

pub fn freshness(track: &Track, now: Millis) -> Freshness {
    let age = now - track.last_seen;
    if age > track.expire_after {
        Freshness::Expired
    } else if age > track.stale_after {
        Freshness::Stale
    } else {
        Freshness::Fresh
    }
}

/// Visual treatment a renderer applies to a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrackStyle {
    Stale,
    Friendly,
    Enemy,
    Air,
    Other,
}

pub fn track_style(track: &Track, now: Millis) -> TrackStyle {
    if is_stale(track, now) {
        return TrackStyle::Stale;
    }
    match track.track_type {
        TrackType::Friendly => TrackStyle::Friendly,
        TrackType::Enemy => TrackStyle::Enemy,
        TrackType::Air => TrackStyle::Air,
        TrackType::Neutral | TrackType::Unknown => TrackStyle::Other,
    }
}
