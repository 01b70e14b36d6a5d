//! Built-in scenario: the brigade picture the dashboard opens with.
//!
//! Every timestamp is expressed relative to the `now` handed in so the same
//! catalogue can seed live runs and deterministic tests.

use crate::model::alert::{Alert, AlertType, Severity};
use crate::model::fmv::{FeedStatus, FmvFeed};
use crate::model::geo::{ControlMeasure, ControlMeasureType, NamedArea};
use crate::model::track::{
    MetadataValue, Track, TrackConfidence, TrackSource, TrackType, UnitEchelon, UnitRole,
};
use crate::prelude::{Millis, Position};

pub fn initial_tracks(now: Millis) -> Vec<Track> {
    vec![
        Track::new(
            "uas-1",
            "GRIFFIN 01",
            "MQ-9 REAPER",
            TrackType::Air,
            TrackSource::Tak,
            TrackConfidence::High,
            Position::new(400.0, 300.0),
            now,
            5_000,
            30_000,
        )
        .with_role(UnitRole::Aviation)
        .with_heading(0.0)
        .with_speed(120.0)
        .with_metadata("sensor", MetadataValue::Text("MX-20".into()))
        .with_metadata("endurance", MetadataValue::Text("14h".into()))
        .with_composition(["1x MQ-9 Block 5", "4x AGM-114 Hellfire", "2x GBU-12 Paveway II"]),
        Track::new(
            "uas-2",
            "GRIFFIN 02",
            "MQ-1C GRAY EAGLE",
            TrackType::Air,
            TrackSource::Tak,
            TrackConfidence::High,
            Position::new(200.0, 150.0),
            now,
            5_000,
            30_000,
        )
        .with_role(UnitRole::Aviation)
        .with_heading(180.0)
        .with_speed(110.0)
        .with_composition(["1x MQ-1C", "4x AGM-114 Hellfire", "STARLite Radar"]),
        Track::new(
            "f1",
            "GHOST 1-1",
            "INF PLT (STRYKER)",
            TrackType::Friendly,
            TrackSource::Bft,
            TrackConfidence::High,
            Position::new(450.0, 350.0),
            now,
            60_000,
            300_000,
        )
        .with_role(UnitRole::Infantry)
        .with_echelon(UnitEchelon::Platoon)
        .with_heading(45.0)
        .with_health(95.0)
        .with_composition([
            "4x M1126 Stryker ICV",
            "36x Personnel",
            "2x M240L Machine Guns",
            "4x Javelin CLU",
        ]),
        Track::new(
            "f2",
            "IRON 2-1",
            "ARMOR PLT (M1A2)",
            TrackType::Friendly,
            TrackSource::Bft,
            TrackConfidence::High,
            Position::new(420.0, 380.0),
            now,
            60_000,
            300_000,
        )
        .with_role(UnitRole::Armor)
        .with_echelon(UnitEchelon::Platoon)
        .with_heading(90.0)
        .with_composition([
            "4x M1A2 SEPv3 Abrams",
            "16x Personnel",
            "120mm Smoothbore Main Gun",
        ]),
        Track::new(
            "f3",
            "THUNDER 6",
            "FA BTRY (M109)",
            TrackType::Friendly,
            TrackSource::Bft,
            TrackConfidence::High,
            Position::new(300.0, 550.0),
            now,
            300_000,
            600_000,
        )
        .with_role(UnitRole::Artillery)
        .with_echelon(UnitEchelon::Company)
        .with_composition(["6x M109A7 Paladin", "6x M992A3 FAASV", "85x Personnel"]),
        Track::new(
            "e1",
            "T-72 PLT",
            "OPFOR ARMOR",
            TrackType::Enemy,
            TrackSource::Manual,
            TrackConfidence::Medium,
            Position::new(600.0, 450.0),
            now - 300_000,
            600_000,
            1_200_000,
        )
        .with_role(UnitRole::Armor)
        .with_echelon(UnitEchelon::Platoon)
        .with_composition(["3x T-72B3", "1x BMP-2", "12x Personnel"]),
        Track::new(
            "e2",
            "BMP SECT",
            "OPFOR MECH INF",
            TrackType::Enemy,
            TrackSource::Manual,
            TrackConfidence::Low,
            Position::new(650.0, 420.0),
            now - 100_000,
            300_000,
            600_000,
        )
        .with_role(UnitRole::Infantry)
        .with_echelon(UnitEchelon::Section)
        .with_composition(["2x BMP-3", "16x Personnel", "AT-10 Stabber"]),
    ]
}

pub fn initial_alerts(now: Millis) -> Vec<Alert> {
    vec![
        Alert::new(
            "a1",
            AlertType::Contact,
            Severity::Critical,
            "Enemy Armor platoon identified at OBJ COBRA vicinity.",
            now,
        )
        .at(Position::new(600.0, 450.0)),
        Alert::new(
            "a2",
            AlertType::BftStale,
            Severity::Warning,
            "THUNDER 6 telemetry aging. Check backhaul.",
            now - 600_000,
        ),
    ]
}

pub fn fmv_feeds() -> Vec<FmvFeed> {
    let feed = |id: &str, name: &str, url: &str, bitrate: &str, latency: &str| FmvFeed {
        id: id.into(),
        name: name.into(),
        url: url.into(),
        status: FeedStatus::Active,
        bitrate: bitrate.into(),
        latency: latency.into(),
        thumbnail: None,
        sensor_metadata: None,
    };
    vec![
        feed(
            "uas-1",
            "GRIFFIN 01 (MQ-9)",
            "https://images.unsplash.com/photo-1508614589041-895b88991e3e?auto=format&fit=crop&q=80&w=800",
            "4.2 Mbps",
            "180ms",
        ),
        feed(
            "uas-2",
            "GRIFFIN 02 (GRAY EAGLE)",
            "https://images.unsplash.com/photo-1464802686167-b939a6910659?auto=format&fit=crop&q=80&w=800",
            "3.1 Mbps",
            "240ms",
        ),
        feed(
            "watchman-01",
            "WATCHMAN 01 (EO/IR)",
            "https://images.unsplash.com/photo-1478760329108-5c3ed9d495a0?auto=format&fit=crop&q=80&w=800",
            "8.5 Mbps",
            "450ms",
        ),
    ]
}

pub fn control_measures() -> Vec<ControlMeasure> {
    vec![
        ControlMeasure {
            id: "nfa-1".into(),
            measure_type: ControlMeasureType::NoFireArea,
            name: "NFA HOSPITAL".into(),
            points: vec![
                Position::new(300.0, 300.0),
                Position::new(350.0, 300.0),
                Position::new(350.0, 350.0),
                Position::new(300.0, 350.0),
            ],
            stroke_color: "#ef4444".into(),
            fill_color: Some("#ef4444".into()),
            opacity: Some(0.2),
            effective_time_start: None,
            effective_time_end: None,
            owner: None,
        },
        ControlMeasure {
            id: "boundary-alpha".into(),
            measure_type: ControlMeasureType::Boundary,
            name: "BNDRY ALPHA/BRAVO".into(),
            points: vec![Position::new(0.0, 400.0), Position::new(1000.0, 400.0)],
            stroke_color: "#94a3b8".into(),
            fill_color: None,
            opacity: None,
            effective_time_start: None,
            effective_time_end: None,
            owner: None,
        },
    ]
}

pub fn named_areas() -> Vec<NamedArea> {
    let rect = |x0: f64, y0: f64, x1: f64, y1: f64| {
        vec![
            Position::new(x0, y0),
            Position::new(x1, y0),
            Position::new(x1, y1),
            Position::new(x0, y1),
        ]
    };
    vec![
        NamedArea {
            id: "ao_alpha".into(),
            name: "AO ALPHA".into(),
            points: rect(100.0, 100.0, 500.0, 500.0),
        },
        NamedArea {
            id: "obj_cobra".into(),
            name: "OBJ COBRA".into(),
            points: rect(550.0, 400.0, 750.0, 600.0),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn seed_track_ids_are_unique() {
        let tracks = initial_tracks(0);
        let ids: HashSet<_> = tracks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids.len(), tracks.len());
    }

    #[test]
    fn seed_thresholds_keep_stale_before_expire() {
        for track in initial_tracks(0) {
            assert!(track.stale_after < track.expire_after, "{}", track.id);
        }
    }

    #[test]
    fn enemy_contacts_start_aged() {
        let now = 1_000_000;
        let tracks = initial_tracks(now);
        let t72 = tracks.iter().find(|t| t.id == "e1").unwrap();
        assert_eq!(t72.last_seen, now - 300_000);
    }

    #[test]
    fn objective_cobra_holds_the_enemy_armor() {
        let areas = named_areas();
        let cobra = areas.iter().find(|a| a.id == "obj_cobra").unwrap();
        assert!(cobra.contains(&Position::new(600.0, 450.0)));
    }
}
