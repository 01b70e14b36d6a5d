use copcore::model::{Track, TrackConfidence, TrackSource, TrackType};
use copcore::prelude::{Millis, Position};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Synthetic unidentified contacts layered over the seed picture.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ContactConfig {
    pub count: usize,
    pub seed: u64,
    pub width: f64,
    pub height: f64,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            count: 0,
            seed: 0,
            width: 1000.0,
            height: 700.0,
        }
    }
}

const CONTACT_STALE_MS: Millis = 120_000;
const CONTACT_EXPIRE_MS: Millis = 600_000;

pub fn synthetic_contacts(config: &ContactConfig, now: Millis) -> Vec<Track> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let width = config.width.max(1.0);
    let height = config.height.max(1.0);

    (0..config.count)
        .map(|index| {
            let track_type = if rng.gen_bool(0.5) {
                TrackType::Neutral
            } else {
                TrackType::Unknown
            };
            let source = if rng.gen_bool(0.5) {
                TrackSource::Ais
            } else {
                TrackSource::Manual
            };
            let confidence = if rng.gen_bool(0.3) {
                TrackConfidence::Medium
            } else {
                TrackConfidence::Low
            };
            let pos = Position::new(rng.gen_range(0.0..width), rng.gen_range(0.0..height));
            let age = rng.gen_range(0..CONTACT_STALE_MS * 2);

            Track::new(
                format!("sc-{index}"),
                format!("CONTACT {:02}", index + 1),
                "UNCORRELATED CONTACT",
                track_type,
                source,
                confidence,
                pos,
                now - age,
                CONTACT_STALE_MS,
                CONTACT_EXPIRE_MS,
            )
            .with_heading(rng.gen_range(0.0..360.0))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_builds_requested_count_within_extent() {
        let config = ContactConfig {
            count: 12,
            seed: 7,
            ..Default::default()
        };
        let contacts = synthetic_contacts(&config, 1_000_000);
        assert_eq!(contacts.len(), 12);
        for contact in &contacts {
            assert!(matches!(
                contact.track_type,
                TrackType::Neutral | TrackType::Unknown
            ));
            assert!((0.0..1000.0).contains(&contact.pos.x));
            assert!((0.0..700.0).contains(&contact.pos.y));
            assert!(contact.last_seen <= 1_000_000);
        }
    }

    #[test]
    fn same_seed_replays_same_contacts() {
        let config = ContactConfig {
            count: 5,
            seed: 42,
            ..Default::default()
        };
        assert_eq!(synthetic_contacts(&config, 0), synthetic_contacts(&config, 0));
    }
}
