//! Reader and writer implementations of the supported geospatial file
//! formats, with driver dispatch on the file extension.

#[cfg(feature = "flatgeobuf")]
pub mod flatgeobuf;
pub mod geojson;

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use tracing::info;

use crate::error::{DespikeError, Result};
use crate::table::GeoTable;

enum Driver {
    Geojson,
    #[cfg(feature = "flatgeobuf")]
    FlatGeobuf,
}

fn driver(path: &Path) -> Result<Driver> {
    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    match extension.as_str() {
        "geojson" | "json" => Ok(Driver::Geojson),
        #[cfg(feature = "flatgeobuf")]
        "fgb" => Ok(Driver::FlatGeobuf),
        _ => Err(DespikeError::UnsupportedDriver(path.display().to_string())),
    }
}

/// Read a vector dataset, choosing the driver from the file extension.
///
/// `layer` selects a layer in multi-layer formats; GeoJSON has no layers and
/// rejects the option, FlatGeobuf checks it against its single layer name.
pub fn read_file<P: AsRef<Path>>(path: P, layer: Option<&str>) -> Result<GeoTable> {
    let path = path.as_ref();
    let table = match driver(path)? {
        Driver::Geojson => {
            if let Some(layer) = layer {
                return Err(DespikeError::Layer(format!(
                    "GeoJSON files have no layers (requested {layer:?})"
                )));
            }
            geojson::read_geojson(BufReader::new(File::open(path)?))?
        }
        #[cfg(feature = "flatgeobuf")]
        Driver::FlatGeobuf => {
            flatgeobuf::read_flatgeobuf(&mut BufReader::new(File::open(path)?), layer)?
        }
    };
    info!(path = %path.display(), rows = table.len(), "read dataset");
    Ok(table)
}

/// Write a table, choosing the driver from the file extension.
pub fn write_file<P: AsRef<Path>>(table: &GeoTable, path: P) -> Result<()> {
    let path = path.as_ref();
    match driver(path)? {
        Driver::Geojson => geojson::write_geojson(table, BufWriter::new(File::create(path)?))?,
        #[cfg(feature = "flatgeobuf")]
        Driver::FlatGeobuf => {
            let name = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or("layer");
            flatgeobuf::write_flatgeobuf(table, BufWriter::new(File::create(path)?), name)?;
        }
    }
    info!(path = %path.display(), rows = table.len(), "wrote dataset");
    Ok(())
}
