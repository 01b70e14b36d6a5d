pub mod alert;
pub mod fmv;
pub mod geo;
pub mod layer;
pub mod seed;
pub mod track;

pub use alert::{Alert, AlertType, Severity};
pub use fmv::{FeedStatus, FmvFeed, SensorMetadata};
pub use geo::{ControlMeasure, ControlMeasureType, GeospatialFilter, NamedArea};
pub use layer::MapLayer;
pub use track::{
    MetadataValue, Track, TrackConfidence, TrackSource, TrackType, UnitEchelon, UnitRole,
};
