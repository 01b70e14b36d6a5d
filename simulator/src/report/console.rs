use crate::report::model::CopSnapshot;
use copcore::model::TrackType;
use copcore::summary::{Sitrep, SitrepOutcome};
use log::info;

/// Prints picture updates for an operator watching the terminal.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn publish(&self, snapshot: &CopSnapshot) {
        let orbiters = snapshot
            .visible
            .iter()
            .filter(|view| view.track.track_type == TrackType::Air)
            .map(|view| {
                let track = &view.track;
                format!(
                    "{} ({:.0},{:.0}) hdg {:03.0}",
                    track.callsign,
                    track.pos.x,
                    track.pos.y,
                    track.heading.unwrap_or_default().rem_euclid(360.0)
                )
            })
            .collect::<Vec<_>>()
            .join(" | ");

        println!(
            "[COP {}Z] net {} | visible {} (stale {}) | cdr overlay {} | {}",
            snapshot.zulu,
            snapshot.network,
            snapshot.visible.len(),
            snapshot.stale_count(),
            snapshot.commander_alerts.len(),
            orbiters
        );
        info!(
            "markers +{} ~{} -{}",
            snapshot.markers.added.len(),
            snapshot.markers.updated.len(),
            snapshot.markers.removed.len()
        );
    }

    pub fn publish_status(&self, message: &str) {
        println!("[COP] {}", message);
    }

    pub fn publish_sitrep(&self, outcome: &SitrepOutcome) {
        match outcome {
            SitrepOutcome::Ready(sitrep) => self.publish_report("SITREP", sitrep),
            SitrepOutcome::Busy => self.publish_status("Sitrep already in progress."),
        }
    }

    pub fn publish_report(&self, heading: &str, sitrep: &Sitrep) {
        println!("[{heading}] {}", sitrep.text);
        for link in &sitrep.links {
            println!("  - {} <{}>", link.title, link.uri);
        }
    }
}
