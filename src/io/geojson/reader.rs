use std::io::Read;

use geojson::GeoJson;

use crate::error::Result;
use crate::table::{GeoTable, Record, DEFAULT_GEOMETRY_COLUMN};

/// Read GeoJSON into a [`GeoTable`].
///
/// A `FeatureCollection` becomes one record per feature; a bare `Feature` or
/// `Geometry` becomes a single-record table. The geometry lands in a column
/// named `geometry`. Feature ids and foreign members are dropped, and a third
/// coordinate element, if present, is dropped by the conversion to planar
/// geometries.
pub fn read_geojson<R: Read>(mut reader: R) -> Result<GeoTable> {
    let mut data = String::new();
    reader.read_to_string(&mut data)?;

    let features = match data.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(collection) => collection.features,
        GeoJson::Feature(feature) => vec![feature],
        GeoJson::Geometry(geometry) => vec![geojson::Feature {
            bbox: None,
            geometry: Some(geometry),
            id: None,
            properties: None,
            foreign_members: None,
        }],
    };

    let mut rows = Vec::with_capacity(features.len());
    for feature in features {
        let geometry = feature
            .geometry
            .map(|geometry| geo::Geometry::try_from(geometry.value))
            .transpose()?;
        let mut record = Record::from_geometry(geometry);
        record.properties = feature.properties.unwrap_or_default();
        rows.push(record);
    }
    GeoTable::try_new(rows, Some(DEFAULT_GEOMETRY_COLUMN))
}
