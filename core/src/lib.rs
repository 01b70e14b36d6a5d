//! Core of the tactical common operational picture (COP).
//!
//! Tracks and alerts live in single-writer stores; the orbit simulation is
//! the only mutator of track kinematics. The filter engine and staleness
//! classifier are pure functions over store snapshots, and sitreps come from
//! an interchangeable summary strategy.

pub mod filter;
pub mod math;
pub mod model;
pub mod prelude;
pub mod simulation;
pub mod store;
pub mod summary;
pub mod telemetry;
pub mod view;

pub use filter::{is_stale, visible, FacetFilter};
pub use model::{Alert, Track};
pub use prelude::{CopError, CopResult, Millis, Position};
pub use store::{AlertStore, SharedTrackStore, TrackStore};
pub use summary::{Sitrep, SummaryStrategy};
pub use view::{ViewController, ViewState};
