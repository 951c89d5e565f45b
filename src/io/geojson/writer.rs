use std::io::Write;

use geojson::{Feature, FeatureCollection, GeoJson};

use crate::error::Result;
use crate::table::GeoTable;

/// Write a [`GeoTable`] as a GeoJSON `FeatureCollection`.
///
/// Each record becomes a feature carrying the active geometry column and the
/// record's properties. Inactive geometry columns have no GeoJSON
/// representation and are dropped. A null geometry is written as `null`.
pub fn write_geojson<W: Write>(table: &GeoTable, writer: W) -> Result<()> {
    let features = table
        .rows()
        .iter()
        .map(|row| {
            let geometry = row
                .geometries
                .get(table.geometry_column())
                .and_then(|geometry| geometry.as_ref())
                .map(|geometry| geojson::Geometry::new(geojson::Value::from(geometry)));
            Feature {
                bbox: None,
                geometry,
                id: None,
                properties: if row.properties.is_empty() {
                    None
                } else {
                    Some(row.properties.clone())
                },
                foreign_members: None,
            }
        })
        .collect();

    let collection = FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    };
    serde_json::to_writer(writer, &GeoJson::FeatureCollection(collection))?;
    Ok(())
}
