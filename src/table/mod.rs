//! Row-oriented tables pairing feature attributes with named geometry
//! columns. Useful for dataset IO where data will have geometries and
//! attributes.

use geo::Geometry;
use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::error::{DespikeError, Result};

/// Name assumed for the active geometry column when none is supplied and the
/// rows offer nothing to detect it from.
pub const DEFAULT_GEOMETRY_COLUMN: &str = "geometry";

/// A single record: non-geometry attributes plus named geometry values.
///
/// Geometry columns keep their insertion order. A `None` geometry is a null
/// value and flows through filtering untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    /// Non-geometry attributes of the record.
    pub properties: Map<String, Value>,
    /// Named geometry attributes of the record.
    pub geometries: IndexMap<String, Option<Geometry>>,
}

impl Record {
    /// Record with a single geometry attribute named
    /// [`DEFAULT_GEOMETRY_COLUMN`] and no properties.
    pub fn from_geometry(geometry: Option<Geometry>) -> Self {
        let mut geometries = IndexMap::new();
        geometries.insert(DEFAULT_GEOMETRY_COLUMN.to_string(), geometry);
        Self {
            properties: Map::new(),
            geometries,
        }
    }
}

/// An ordered collection of [`Record`]s with one active geometry column.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoTable {
    rows: Vec<Record>,
    geometry_column: String,
}

impl GeoTable {
    /// Create a table, validating or detecting the active geometry column.
    ///
    /// With an explicit name, at least one row must carry that column (an
    /// empty table accepts any name). Without one, a column literally named
    /// `geometry` is preferred, a single geometry column is unambiguous, and
    /// anything else is an error.
    pub fn try_new(rows: Vec<Record>, geometry_column: Option<&str>) -> Result<Self> {
        let geometry_column = match geometry_column {
            Some(name) => {
                if !rows.is_empty() && !rows.iter().any(|row| row.geometries.contains_key(name)) {
                    return Err(DespikeError::MissingGeometryColumn(name.to_string()));
                }
                name.to_string()
            }
            None => detect_geometry_column(&rows)?,
        };
        Ok(Self {
            rows,
            geometry_column,
        })
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    /// Name of the active geometry column.
    pub fn geometry_column(&self) -> &str {
        &self.geometry_column
    }

    pub fn into_inner(self) -> (Vec<Record>, String) {
        (self.rows, self.geometry_column)
    }

    /// Re-target the active geometry column; `None` keeps the current one.
    pub fn with_geometry_column(self, geometry_column: Option<&str>) -> Result<Self> {
        match geometry_column {
            Some(name) => Self::try_new(self.rows, Some(name)),
            None => Ok(self),
        }
    }

    /// Same active column, new rows. For order-preserving row maps.
    pub(crate) fn with_rows(&self, rows: Vec<Record>) -> Self {
        Self {
            rows,
            geometry_column: self.geometry_column.clone(),
        }
    }
}

fn detect_geometry_column(rows: &[Record]) -> Result<String> {
    let Some(first) = rows.first() else {
        return Ok(DEFAULT_GEOMETRY_COLUMN.to_string());
    };
    if first.geometries.contains_key(DEFAULT_GEOMETRY_COLUMN) {
        return Ok(DEFAULT_GEOMETRY_COLUMN.to_string());
    }
    if first.geometries.len() == 1 {
        if let Some(name) = first.geometries.keys().next() {
            return Ok(name.clone());
        }
    }
    Err(DespikeError::MissingGeometryColumn(
        "no geometry column supplied and none could be detected".to_string(),
    ))
}
