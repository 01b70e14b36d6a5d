use crate::math::geometry::point_in_polygon;
use crate::prelude::{Millis, Position};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ControlMeasureType {
    #[serde(rename = "BOUNDARY")]
    Boundary,
    #[serde(rename = "AREA_OF_OPERATIONS")]
    AreaOfOperations,
    #[serde(rename = "NO_FIRE_AREA")]
    NoFireArea,
    #[serde(rename = "RESTRICTIVE_FIRE_AREA")]
    RestrictiveFireArea,
    #[serde(rename = "FIRE_SUPPORT_CONTROL_MEASURE")]
    FireSupportControlMeasure,
    #[serde(rename = "RESTRICTED_OPERATING_ZONE")]
    RestrictedOperatingZone,
}

/// Tactical graphic drawn over the map.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ControlMeasure {
    pub id: String,
    #[serde(rename = "type")]
    pub measure_type: ControlMeasureType,
    pub name: String,
    pub points: Vec<Position>,
    pub stroke_color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_time_start: Option<Millis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_time_end: Option<Millis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NamedArea {
    pub id: String,
    pub name: String,
    pub points: Vec<Position>,
}

impl NamedArea {
    pub fn contains(&self, point: &Position) -> bool {
        point_in_polygon(point, &self.points)
    }
}

/// Geospatial narrowing descriptor carried in view state. Not applied by the
/// filter engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GeospatialFilter {
    #[default]
    None,
    Polygon {
        points: Vec<Position>,
    },
    Search {
        query: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_area_contains_interior_point() {
        let area = NamedArea {
            id: "ao_alpha".into(),
            name: "AO ALPHA".into(),
            points: vec![
                Position::new(100.0, 100.0),
                Position::new(500.0, 100.0),
                Position::new(500.0, 500.0),
                Position::new(100.0, 500.0),
            ],
        };
        assert!(area.contains(&Position::new(450.0, 350.0)));
        assert!(!area.contains(&Position::new(600.0, 450.0)));
    }

    #[test]
    fn geospatial_filter_is_tagged_by_type() {
        let json = serde_json::to_value(GeospatialFilter::Search {
            query: "bridge".into(),
        })
        .unwrap();
        assert_eq!(json["type"], "SEARCH");
        assert_eq!(json["query"], "bridge");
        assert_eq!(
            serde_json::to_value(GeospatialFilter::None).unwrap()["type"],
            "NONE"
        );
    }
}
