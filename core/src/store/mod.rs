pub mod alerts;
pub mod tracks;

pub use alerts::AlertStore;
pub use tracks::{snapshot, SharedTrackStore, TrackStore};
