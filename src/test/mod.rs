//! Shared fixtures for unit tests.

use geo::{line_string, polygon, Geometry};
use serde_json::json;

use crate::table::{GeoTable, Record};

/// Spiky open path from the reference scenarios.
pub(crate) fn spiky_line() -> geo::LineString {
    line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 100.0), (x: 2.0, y: 0.0)]
}

/// Spiky ring from the reference scenarios.
pub(crate) fn spiky_polygon() -> geo::Polygon {
    polygon![
        (x: 0.0, y: 0.0),
        (x: 1.0, y: 1.0),
        (x: 2.0, y: 100.0),
        (x: 3.0, y: 1.0),
        (x: 4.0, y: 0.0),
        (x: 2.0, y: -2.0),
    ]
}

/// Two-row table: one spiky line, one spiky polygon, both with properties.
pub(crate) fn table() -> GeoTable {
    let mut line_row = Record::from_geometry(Some(Geometry::LineString(spiky_line())));
    line_row
        .properties
        .insert("name".to_string(), json!("line"));

    let mut polygon_row = Record::from_geometry(Some(Geometry::Polygon(spiky_polygon())));
    polygon_row
        .properties
        .insert("name".to_string(), json!("polygon"));

    GeoTable::try_new(vec![line_row, polygon_row], None).expect("valid fixture table")
}
