//! Removal of spike vertices from digitized vector geometries, plus the table
//! and file-format plumbing to apply it across whole datasets.
//!
//! A spike is a vertex making an unusually sharp turn (interior angle below a
//! threshold) between two edges long enough to be trusted as real segments
//! rather than sub-pixel noise. Spikes are a common artifact of automated
//! digitization and noisy sensors.
//!
//! The entry point is the [`RemoveSpikes`] trait, implemented for
//! [`geo::LineString`], [`geo::Polygon`], [`geo::Geometry`] and [`GeoTable`].
//!
//! ```
//! use despike::RemoveSpikes;
//! use geo::line_string;
//!
//! let line = line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 100.0), (x: 2.0, y: 0.0)];
//! let cleaned = line.remove_spikes(5.0, 0.0);
//!
//! assert_eq!(cleaned, line_string![(x: 0.0, y: 0.0), (x: 2.0, y: 0.0)]);
//! ```
//!
//! The scan is single-pass: every vertex is classified against its neighbors
//! in the *original* input, never against the partially filtered output, so
//! removals do not cascade and the result is not guaranteed spike-free.

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod algorithm;
pub mod error;
pub mod io;
pub mod table;
#[cfg(test)]
pub(crate) mod test;

pub use algorithm::{RemoveSpikes, DEFAULT_ANGLE_THRESHOLD, DEFAULT_MIN_DISTANCE};
pub use table::{GeoTable, Record};
