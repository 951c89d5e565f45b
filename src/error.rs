//! Defines [`DespikeError`], representing all errors returned by this crate.

use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DespikeError {
    /// FlatGeobuf error
    #[cfg(feature = "flatgeobuf")]
    #[error("FlatGeobuf error: {0}")]
    FlatGeobuf(String),

    /// GeoJSON parse or conversion error
    #[error(transparent)]
    Geojson(#[from] geojson::Error),

    /// Geozero error
    #[cfg(feature = "flatgeobuf")]
    #[error("Geozero error: {0}")]
    Geozero(String),

    /// [std::io::Error]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// JSON serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// The requested layer does not exist in the data source.
    #[error("Layer error: {0}")]
    Layer(String),

    /// The requested geometry column is absent, or no active geometry column
    /// could be detected.
    #[error("Missing geometry column: {0}")]
    MissingGeometryColumn(String),

    /// No driver matches the file extension.
    #[error("Unsupported driver for path: {0}")]
    UnsupportedDriver(String),
}

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, DespikeError>;

#[cfg(feature = "flatgeobuf")]
impl From<flatgeobuf::Error> for DespikeError {
    fn from(err: flatgeobuf::Error) -> Self {
        DespikeError::FlatGeobuf(err.to_string())
    }
}

#[cfg(feature = "flatgeobuf")]
impl From<geozero::error::GeozeroError> for DespikeError {
    fn from(err: geozero::error::GeozeroError) -> Self {
        DespikeError::Geozero(err.to_string())
    }
}
