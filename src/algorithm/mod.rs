//! Spike detection and removal implemented on [`geo`] geometries.

mod angle;
mod remove_spikes;
mod spike;

pub use angle::{vertex_angle, DegenerateVertexError};
pub use remove_spikes::{RemoveSpikes, DEFAULT_ANGLE_THRESHOLD, DEFAULT_MIN_DISTANCE};
pub use spike::is_spike;
