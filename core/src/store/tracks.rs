use crate::model::Track;
use crate::prelude::{CopError, CopResult, Millis, Position};
use std::sync::{Arc, RwLock};

/// Holds the tracked entities in insertion order.
///
/// Kinematics are only written through [`TrackStore::apply_kinematic_update`].
/// Nothing is ever evicted, even once a track passes its expiry threshold.
#[derive(Debug, Clone, Default)]
pub struct TrackStore {
    tracks: Vec<Track>,
}

/// Track store shared between the simulation task and readers.
pub type SharedTrackStore = Arc<RwLock<TrackStore>>;

impl TrackStore {
    pub fn new() -> Self {
        Self { tracks: Vec::new() }
    }

    /// Builds a store from seed data. Later duplicates of an id are dropped.
    pub fn from_tracks(tracks: Vec<Track>) -> Self {
        let mut store = Self::new();
        for track in tracks {
            store.insert(track);
        }
        store
    }

    pub fn into_shared(self) -> SharedTrackStore {
        Arc::new(RwLock::new(self))
    }

    /// Adds a track; returns false and leaves the store unchanged if the id
    /// is already present.
    pub fn insert(&mut self, track: Track) -> bool {
        if self.get(&track.id).is_some() {
            return false;
        }
        self.tracks.push(track);
        true
    }

    pub fn get_all(&self) -> &[Track] {
        &self.tracks
    }

    pub fn get(&self, id: &str) -> Option<&Track> {
        self.tracks.iter().find(|track| track.id == id)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Overwrites position, heading, and last-seen time. Unknown ids are ignored.
    pub fn apply_kinematic_update(&mut self, id: &str, pos: Position, heading: f64, time: Millis) {
        if let Some(track) = self.tracks.iter_mut().find(|track| track.id == id) {
            track.pos = pos;
            track.heading = Some(heading);
            track.last_seen = time;
        }
    }
}

/// Clones the current contents of a shared store.
pub fn snapshot(store: &SharedTrackStore) -> CopResult<Vec<Track>> {
    store
        .read()
        .map(|guard| guard.get_all().to_vec())
        .map_err(|err| CopError::Poisoned(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::seed::initial_tracks;

    #[test]
    fn kinematic_update_moves_known_track() {
        let mut store = TrackStore::from_tracks(initial_tracks(0));
        store.apply_kinematic_update("uas-1", Position::new(1.0, 2.0), 270.0, 42);
        let track = store.get("uas-1").unwrap();
        assert_eq!(track.pos, Position::new(1.0, 2.0));
        assert_eq!(track.heading, Some(270.0));
        assert_eq!(track.last_seen, 42);
    }

    #[test]
    fn kinematic_update_for_unknown_id_is_noop() {
        let mut store = TrackStore::from_tracks(initial_tracks(0));
        let before = store.get_all().to_vec();
        store.apply_kinematic_update("ghost", Position::new(1.0, 2.0), 0.0, 42);
        assert_eq!(store.get_all(), before.as_slice());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut tracks = initial_tracks(0);
        let mut duplicate = tracks[0].clone();
        duplicate.callsign = "IMPOSTER".into();
        tracks.push(duplicate);
        let store = TrackStore::from_tracks(tracks);
        assert_eq!(store.len(), 7);
        assert_eq!(store.get("uas-1").unwrap().callsign, "GRIFFIN 01");
    }

    #[test]
    fn shared_snapshot_preserves_order() {
        let shared = TrackStore::from_tracks(initial_tracks(0)).into_shared();
        let ids: Vec<_> = snapshot(&shared)
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec!["uas-1", "uas-2", "f1", "f2", "f3", "e1", "e2"]);
    }
}
