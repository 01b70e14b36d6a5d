use crate::model::{Alert, Severity, Track, TrackType};
use crate::summary::{Sitrep, SummaryStrategy};
use async_trait::async_trait;

/// Deterministic template sitrep built from track and alert counts.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSummary;

impl LocalSummary {
    pub fn new() -> Self {
        Self
    }

    pub fn compose(tracks: &[Track], alerts: &[Alert]) -> String {
        let friendly = count_type(tracks, TrackType::Friendly);
        let enemy = count_type(tracks, TrackType::Enemy);
        let critical = alerts
            .iter()
            .filter(|alert| alert.severity == Severity::Critical)
            .count();

        let status = if critical > 0 {
            format!("ACTION REQUIRED: {critical} critical boundary or contact alerts detected.")
        } else {
            "All sectors nominal.".to_string()
        };

        format!(
            "COMMANDER'S TACTICAL UPDATE: {friendly} friendly elements active. \
             {enemy} red-force tracks identified. \
             Recon orbits GRIFFIN 01/02 holding steady in AO ALPHA. {status}"
        )
    }
}

fn count_type(tracks: &[Track], track_type: TrackType) -> usize {
    tracks
        .iter()
        .filter(|track| track.track_type == track_type)
        .count()
}

#[async_trait]
impl SummaryStrategy for LocalSummary {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn summarize(&self, tracks: &[Track], alerts: &[Alert]) -> Sitrep {
        Sitrep::new(Self::compose(tracks, alerts))
    }
}
