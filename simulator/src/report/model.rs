use copcore::filter::{freshness, track_style, Freshness, MarkerDiff, TrackStyle};
use copcore::model::{Alert, FmvFeed, Track};
use copcore::prelude::Millis;
use copcore::telemetry::MetricsSnapshot;
use copcore::view::UserRole;
use serde::Serialize;

/// A visible track with its display treatment.
#[derive(Debug, Clone, Serialize)]
pub struct TrackView {
    #[serde(flatten)]
    pub track: Track,
    pub freshness: Freshness,
    pub style: TrackStyle,
}

impl TrackView {
    pub fn new(track: &Track, now: Millis) -> Self {
        Self {
            track: track.clone(),
            freshness: freshness(track, now),
            style: track_style(track, now),
        }
    }
}

/// Picture-in-picture state: the active feed and the heading its HUD shows.
#[derive(Debug, Clone, Serialize)]
pub struct FmvView {
    pub feed: FmvFeed,
    pub hud_heading: f64,
}

/// Everything a renderer needs for one frame of the picture.
#[derive(Debug, Clone, Serialize)]
pub struct CopSnapshot {
    pub zulu: String,
    pub network: &'static str,
    pub role: UserRole,
    pub focus_mode: bool,
    pub visible: Vec<TrackView>,
    pub selected: Option<Track>,
    pub commander_alerts: Vec<Alert>,
    pub ticker: Vec<Alert>,
    pub fmv: Option<FmvView>,
    pub markers: MarkerDiff,
    pub metrics: MetricsSnapshot,
}

impl CopSnapshot {
    pub fn stale_count(&self) -> usize {
        self.visible
            .iter()
            .filter(|view| view.freshness != Freshness::Fresh)
            .count()
    }
}
