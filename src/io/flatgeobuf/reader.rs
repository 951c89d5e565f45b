use std::io::{Read, Seek};

use flatgeobuf::{FallibleStreamingIterator, FgbReader};
use geozero::{ColumnValue, FeatureProperties, PropertyProcessor, ToGeo};
use serde_json::{Map, Value};

use crate::error::{DespikeError, Result};
use crate::table::{GeoTable, Record, DEFAULT_GEOMETRY_COLUMN};

/// Read a FlatGeobuf file into a [`GeoTable`].
///
/// A FlatGeobuf file holds a single layer; `layer`, when given, must match
/// the dataset name stored in the header. The geometry lands in a column
/// named `geometry`.
pub fn read_flatgeobuf<R: Read + Seek>(reader: &mut R, layer: Option<&str>) -> Result<GeoTable> {
    let fgb = FgbReader::open(reader)?;

    if let Some(layer) = layer {
        let name = fgb.header().name().unwrap_or_default();
        if name != layer {
            return Err(DespikeError::Layer(format!(
                "layer {layer:?} not found; the file contains layer {name:?}"
            )));
        }
    }

    let mut selection = fgb.select_all()?;
    let mut rows = Vec::new();
    while let Some(feature) = selection.next()? {
        let geometry = feature.to_geo()?;
        let mut collector = PropertyCollector::default();
        feature.process_properties(&mut collector)?;

        let mut record = Record::from_geometry(Some(geometry));
        record.properties = collector.0;
        rows.push(record);
    }
    GeoTable::try_new(rows, Some(DEFAULT_GEOMETRY_COLUMN))
}

/// Collects typed feature properties into JSON values.
#[derive(Default)]
struct PropertyCollector(Map<String, Value>);

impl PropertyProcessor for PropertyCollector {
    fn property(
        &mut self,
        _idx: usize,
        name: &str,
        value: &ColumnValue,
    ) -> geozero::error::Result<bool> {
        self.0.insert(name.to_string(), column_value_to_json(value));
        Ok(false)
    }
}

fn column_value_to_json(value: &ColumnValue) -> Value {
    match value {
        ColumnValue::Byte(v) => Value::from(*v),
        ColumnValue::UByte(v) => Value::from(*v),
        ColumnValue::Bool(v) => Value::from(*v),
        ColumnValue::Short(v) => Value::from(*v),
        ColumnValue::UShort(v) => Value::from(*v),
        ColumnValue::Int(v) => Value::from(*v),
        ColumnValue::UInt(v) => Value::from(*v),
        ColumnValue::Long(v) => Value::from(*v),
        ColumnValue::ULong(v) => Value::from(*v),
        ColumnValue::Float(v) => Value::from(*v),
        ColumnValue::Double(v) => Value::from(*v),
        ColumnValue::String(v) => Value::from(*v),
        ColumnValue::Json(v) => serde_json::from_str(v).unwrap_or_else(|_| Value::from(*v)),
        ColumnValue::DateTime(v) => Value::from(*v),
        ColumnValue::Binary(_) => Value::Null,
    }
}
