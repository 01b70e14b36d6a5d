pub mod geometry;

pub use geometry::{point_in_polygon, radians_to_degrees, wrap_turn};
