use crate::prelude::Position;
use std::f64::consts::TAU;

/// Even-odd ray-cast containment test. Polygons with fewer than three
/// vertices contain nothing.
pub fn point_in_polygon(point: &Position, polygon: &[Position]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let (x, y) = (point.x, point.y);
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (xi, yi) = (polygon[i].x, polygon[i].y);
        let (xj, yj) = (polygon[j].x, polygon[j].y);
        let crosses = (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi;
        if crosses {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Wraps an angle into `[0, 2π)`.
pub fn wrap_turn(angle: f64) -> f64 {
    angle.rem_euclid(TAU)
}

pub fn radians_to_degrees(angle: f64) -> f64 {
    angle * (180.0 / std::f64::consts::PI)
}
