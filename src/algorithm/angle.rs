use geo::Coord;
use thiserror::Error;

/// Returned by [`vertex_angle`] when an adjacent edge has zero length, i.e.
/// `a == b` or `b == c`. The angle at such a vertex is undefined.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("degenerate vertex: adjacent edge has zero length")]
pub struct DegenerateVertexError;

/// Interior angle at `b` subtended by rays toward `a` and `c`, in degrees
/// within `[0, 180]`.
///
/// Pure and symmetric under swapping `a` and `c`. Collinear points with `b`
/// strictly between `a` and `c` yield exactly 180 degrees.
pub fn vertex_angle(a: Coord, b: Coord, c: Coord) -> Result<f64, DegenerateVertexError> {
    let ba = a - b;
    let bc = c - b;
    let norms = ba.x.hypot(ba.y) * bc.x.hypot(bc.y);
    if norms == 0.0 {
        return Err(DegenerateVertexError);
    }
    let dot = ba.x * bc.x + ba.y * bc.y;
    // The clamp guards floating-point overshoot outside the domain of acos.
    Ok((dot / norms).clamp(-1.0, 1.0).acos().to_degrees())
}
