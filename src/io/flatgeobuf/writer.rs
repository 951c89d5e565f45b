use std::io::Write;

use flatgeobuf::{ColumnType, FgbWriter, GeometryType};
use geozero::{ColumnValue, PropertyProcessor};

use crate::error::Result;
use crate::table::GeoTable;

/// Write a [`GeoTable`] to a FlatGeobuf file.
///
/// `name` is what OGR observes as the layer name of the file. Property
/// columns are declared from the first record and carried as JSON so their
/// types survive the round trip. Records with a null active geometry are
/// skipped: FlatGeobuf features always carry a geometry.
pub fn write_flatgeobuf<W: Write>(table: &GeoTable, writer: W, name: &str) -> Result<()> {
    let mut fgb = FgbWriter::create(name, GeometryType::Unknown)?;

    let columns: Vec<String> = table
        .rows()
        .first()
        .map(|row| row.properties.keys().cloned().collect())
        .unwrap_or_default();
    for column in &columns {
        fgb.add_column(column, ColumnType::Json, |_fbb, _col| {});
    }

    for row in table.rows() {
        let Some(Some(geometry)) = row.geometries.get(table.geometry_column()) else {
            continue;
        };
        fgb.add_feature_geom(geometry.clone(), |feature| {
            for (idx, column) in columns.iter().enumerate() {
                if let Some(value) = row.properties.get(column) {
                    let json = value.to_string();
                    feature.property(idx, column, &ColumnValue::Json(&json)).ok();
                }
            }
        })?;
    }

    fgb.write(writer)?;
    Ok(())
}
