use geo::Coord;

use super::angle::vertex_angle;

fn edge_length(a: Coord, b: Coord) -> f64 {
    let d = b - a;
    d.x.hypot(d.y)
}

/// Classifies `curr` as a spike: its interior angle is below `angle_threshold`
/// (degrees) and both adjacent edges are longer than `min_distance`.
///
/// `min_distance` is a noise floor: a vertex bounded by already-tiny edges has
/// a numerically unstable angle and is not a meaningful spike.
///
/// A vertex with a zero-length adjacent edge is never a spike; deduplicating
/// coincident points is left to caller-side preprocessing.
pub fn is_spike(
    prev: Coord,
    curr: Coord,
    next: Coord,
    angle_threshold: f64,
    min_distance: f64,
) -> bool {
    match vertex_angle(prev, curr, next) {
        Ok(angle) => {
            angle < angle_threshold
                && edge_length(prev, curr) > min_distance
                && edge_length(curr, next) > min_distance
        }
        Err(_) => false,
    }
}
