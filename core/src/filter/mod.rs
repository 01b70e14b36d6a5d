pub mod engine;
pub mod facets;
pub mod markers;
pub mod staleness;

pub use engine::visible;
pub use facets::{FacetFilter, FacetValue};
pub use markers::{MarkerDiff, MarkerLedger};
pub use staleness::{freshness, is_stale, track_style, Freshness, TrackStyle};
