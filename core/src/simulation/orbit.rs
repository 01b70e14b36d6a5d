use crate::math::geometry::{radians_to_degrees, wrap_turn};
use crate::model::TrackType;
use crate::prelude::{Millis, Position};
use crate::store::TrackStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::f64::consts::PI;

/// Per-track circular orbit parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitProfile {
    pub radius: f64,
    pub speed: f64,
    pub phase: f64,
}

/// Orbit geometry shared by every airborne track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    pub anchor: Position,
    /// Accumulator increment per simulation tick, in radians.
    pub step: f64,
    /// Profiles keyed by track id.
    pub profiles: BTreeMap<String, OrbitProfile>,
    /// Profile for airborne tracks without an explicit entry.
    pub default_profile: OrbitProfile,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        let mut profiles = BTreeMap::new();
        profiles.insert(
            "uas-1".to_string(),
            OrbitProfile {
                radius: 120.0,
                speed: 1.0,
                phase: 0.0,
            },
        );
        Self {
            anchor: Position::new(400.0, 350.0),
            step: 0.005,
            profiles,
            default_profile: OrbitProfile {
                radius: 180.0,
                speed: 0.6,
                phase: PI,
            },
        }
    }
}

/// Angle accumulator, always in `[0, 2π)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OrbitState {
    pub angle: f64,
}

impl OrbitState {
    pub fn advance(self, delta: f64) -> Self {
        Self {
            angle: wrap_turn(self.angle + delta),
        }
    }
}

/// Position and heading of one orbiter at a given accumulator angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitFix {
    pub pos: Position,
    pub heading: f64,
}

#[derive(Debug, Clone)]
pub struct OrbitPlan {
    config: OrbitConfig,
}

impl OrbitPlan {
    pub fn new(config: OrbitConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OrbitConfig {
        &self.config
    }

    pub fn profile_for(&self, track_id: &str) -> OrbitProfile {
        self.config
            .profiles
            .get(track_id)
            .copied()
            .unwrap_or(self.config.default_profile)
    }

    pub fn fix(&self, track_id: &str, angle: f64) -> OrbitFix {
        let profile = self.profile_for(track_id);
        let theta = angle * profile.speed + profile.phase;
        let anchor = self.config.anchor;
        OrbitFix {
            pos: Position::new(
                anchor.x + theta.cos() * profile.radius,
                anchor.y + theta.sin() * profile.radius,
            ),
            heading: radians_to_degrees(theta) + 90.0,
        }
    }

    /// Moves every airborne track onto its orbit at `state`. Other categories
    /// are untouched. Returns the number of tracks moved.
    pub fn apply(&self, store: &mut TrackStore, state: &OrbitState, now: Millis) -> usize {
        let airborne: Vec<String> = store
            .get_all()
            .iter()
            .filter(|track| track.track_type == TrackType::Air)
            .map(|track| track.id.clone())
            .collect();

        for id in &airborne {
            let fix = self.fix(id, state.angle);
            store.apply_kinematic_update(id, fix.pos, fix.heading, now);
        }
        airborne.len()
    }

    /// Advances the accumulator by an arbitrary angle.
    pub fn advance(&self, state: OrbitState, delta: f64) -> OrbitState {
        state.advance(delta)
    }

    /// One simulation tick: place orbiters at the current angle, then step
    /// the accumulator.
    pub fn tick(&self, state: OrbitState, store: &mut TrackStore, now: Millis) -> OrbitState {
        self.apply(store, &state, now);
        self.advance(state, self.config.step)
    }
}

impl Default for OrbitPlan {
    fn default() -> Self {
        Self::new(OrbitConfig::default())
    }
}
