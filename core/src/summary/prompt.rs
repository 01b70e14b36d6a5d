use crate::model::{Alert, AlertType, Severity, Track, TrackType};
use crate::prelude::{CopResult, Position};
use serde::Serialize;

/// Upper bounds on what is serialized into a single prompt.
pub const MAX_PROMPT_TRACKS: usize = 100;
pub const MAX_PROMPT_ALERTS: usize = 50;

#[derive(Serialize)]
struct TrackProjection<'a> {
    callsign: &'a str,
    #[serde(rename = "type")]
    track_type: TrackType,
    pos: Position,
}

#[derive(Serialize)]
struct AlertProjection<'a> {
    #[serde(rename = "type")]
    alert_type: AlertType,
    severity: Severity,
    message: &'a str,
}

pub fn summary_prompt(tracks: &[Track], alerts: &[Alert]) -> CopResult<String> {
    let tracks: Vec<_> = tracks
        .iter()
        .take(MAX_PROMPT_TRACKS)
        .map(|track| TrackProjection {
            callsign: &track.callsign,
            track_type: track.track_type,
            pos: track.pos,
        })
        .collect();
    let alerts: Vec<_> = alerts
        .iter()
        .take(MAX_PROMPT_ALERTS)
        .map(|alert| AlertProjection {
            alert_type: alert.alert_type,
            severity: alert.severity,
            message: &alert.message,
        })
        .collect();

    Ok(format!(
        "Act as a Brigade-level Tactical Operations Center (TOC) Intelligence Officer.\n\
         Analyze the current Common Operational Picture (COP) data below and provide a concise, \
         1-paragraph \"Commander's Executive Summary\".\n\
         Focus on high-threat items, potential fratricide risks, and significant activity.\n\n\
         TRACKS: {}\n\
         ALERTS: {}\n\n\
         Response must be professional, military-focused, and strictly under 100 words.",
        serde_json::to_string(&tracks)?,
        serde_json::to_string(&alerts)?
    ))
}

pub fn intel_prompt(query: &str) -> String {
    format!(
        "Tactical Request: {query}. Focus on terrain, infrastructure, and local facilities \
         relevant to a command post."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::seed::{initial_alerts, initial_tracks};

    #[test]
    fn prompt_embeds_projection_only() {
        let prompt = summary_prompt(&initial_tracks(0), &initial_alerts(0)).unwrap();
        assert!(prompt.contains(r#"{"callsign":"GRIFFIN 01","type":"AIR","pos":{"x":400.0,"y":300.0}}"#));
        assert!(prompt.contains(r#""type":"BFT_STALE","severity":"WARNING""#));
        assert!(!prompt.contains("MQ-9 REAPER"));
        assert!(!prompt.contains("Hellfire"));
    }

    #[test]
    fn prompt_track_list_is_bounded() {
        let seed = initial_tracks(0);
        let many: Vec<Track> = (0..MAX_PROMPT_TRACKS + 20)
            .map(|i| {
                let mut track = seed[2].clone();
                track.id = format!("f{i}");
                track
            })
            .collect();
        let prompt = summary_prompt(&many, &[]).unwrap();
        assert_eq!(prompt.matches("GHOST 1-1").count(), MAX_PROMPT_TRACKS);
    }
}
