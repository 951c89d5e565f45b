use geo::{Coord, Geometry, LineString, Polygon};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use super::spike::is_spike;
use crate::table::{GeoTable, Record};

/// Default angle threshold in degrees. Vertices with an interior angle below
/// this are considered spikes.
pub const DEFAULT_ANGLE_THRESHOLD: f64 = 1.0;

/// Default minimum length both adjacent edges must exceed for a vertex to be
/// considered a spike, in source coordinate units.
pub const DEFAULT_MIN_DISTANCE: f64 = 0.0;

/// Removes spike vertices from a geometry.
///
/// A vertex is a spike when its interior angle is below `angle_threshold`
/// degrees and both adjacent edges are longer than `min_distance`. LineString
/// endpoints are always retained; for polygons only the exterior ring is
/// filtered and interior rings (holes) pass through untouched.
///
/// The scan is single-pass over the original vertex sequence: every
/// classification reads the original neighbors at i-1, i, i+1, never the
/// partially built output. Removals therefore do not cascade, and the result
/// is not guaranteed to be spike-free after one call.
///
/// # Examples
///
/// ```
/// use despike::RemoveSpikes;
/// use geo::polygon;
///
/// let polygon = polygon![
///     (x: 0.0, y: 0.0),
///     (x: 1.0, y: 1.0),
///     (x: 2.0, y: 100.0),
///     (x: 3.0, y: 1.0),
///     (x: 4.0, y: 0.0),
///     (x: 2.0, y: -2.0),
/// ];
///
/// let cleaned = polygon.remove_spikes(5.0, 0.0);
///
/// let expected = polygon![
///     (x: 0.0, y: 0.0),
///     (x: 1.0, y: 1.0),
///     (x: 3.0, y: 1.0),
///     (x: 4.0, y: 0.0),
///     (x: 2.0, y: -2.0),
/// ];
/// assert_eq!(cleaned, expected);
/// ```
pub trait RemoveSpikes {
    type Output;

    /// Returns a new value with spike vertices removed.
    fn remove_spikes(&self, angle_threshold: f64, min_distance: f64) -> Self::Output;
}

/// Single pass over an open path. Endpoints are retained unconditionally;
/// interior vertices are tested against their original neighbors.
fn filter_open_path(coords: &[Coord], angle_threshold: f64, min_distance: f64) -> Vec<Coord> {
    if coords.len() < 3 {
        // No interior vertex to test.
        return coords.to_vec();
    }
    let mut retained = Vec::with_capacity(coords.len());
    retained.push(coords[0]);
    for i in 1..coords.len() - 1 {
        if !is_spike(coords[i - 1], coords[i], coords[i + 1], angle_threshold, min_distance) {
            retained.push(coords[i]);
        }
    }
    retained.push(coords[coords.len() - 1]);
    retained
}

/// Single pass over a closed ring whose first and last coordinates are equal.
///
/// The junction vertex is tested against its true cyclic neighbors; dropping
/// it drops both copies at once and the seam relocates to whichever vertex
/// survives next. The duplicated closing coordinate is never re-appended:
/// ring closure is implicit when the polygon is rebuilt.
fn filter_ring(coords: &[Coord], angle_threshold: f64, min_distance: f64) -> Vec<Coord> {
    let n = coords.len();
    if n < 2 {
        return coords.to_vec();
    }
    let mut retained = Vec::with_capacity(n - 1);
    if !is_spike(coords[n - 2], coords[0], coords[1], angle_threshold, min_distance) {
        retained.push(coords[0]);
    }
    for i in 1..n - 1 {
        if !is_spike(coords[i - 1], coords[i], coords[i + 1], angle_threshold, min_distance) {
            retained.push(coords[i]);
        }
    }
    retained
}

impl RemoveSpikes for LineString {
    type Output = LineString;

    fn remove_spikes(&self, angle_threshold: f64, min_distance: f64) -> LineString {
        LineString::new(filter_open_path(&self.0, angle_threshold, min_distance))
    }
}

impl RemoveSpikes for Polygon {
    type Output = Polygon;

    fn remove_spikes(&self, angle_threshold: f64, min_distance: f64) -> Polygon {
        let exterior = self.exterior();
        if exterior.0.is_empty() {
            return self.clone();
        }
        // Interior rings are out of scope and carried over as-is. A ring
        // collapsing below 3 distinct vertices is returned without guards.
        Polygon::new(
            LineString::new(filter_ring(&exterior.0, angle_threshold, min_distance)),
            self.interiors().to_vec(),
        )
    }
}

impl RemoveSpikes for Geometry {
    type Output = Geometry;

    fn remove_spikes(&self, angle_threshold: f64, min_distance: f64) -> Geometry {
        // Pass-through kinds are spelled out variant by variant so that a new
        // geometry kind fails here until it is handled.
        match self {
            Geometry::LineString(g) => {
                Geometry::LineString(g.remove_spikes(angle_threshold, min_distance))
            }
            Geometry::Polygon(g) => Geometry::Polygon(g.remove_spikes(angle_threshold, min_distance)),
            Geometry::Point(g) => Geometry::Point(*g),
            Geometry::Line(g) => Geometry::Line(*g),
            Geometry::MultiPoint(g) => Geometry::MultiPoint(g.clone()),
            Geometry::MultiLineString(g) => Geometry::MultiLineString(g.clone()),
            Geometry::MultiPolygon(g) => Geometry::MultiPolygon(g.clone()),
            Geometry::GeometryCollection(g) => Geometry::GeometryCollection(g.clone()),
            Geometry::Rect(g) => Geometry::Rect(*g),
            Geometry::Triangle(g) => Geometry::Triangle(*g),
        }
    }
}

impl RemoveSpikes for GeoTable {
    type Output = GeoTable;

    /// Maps the filter over the active geometry column of every record. Row
    /// order, properties and inactive geometry columns are preserved; null
    /// geometries stay null.
    fn remove_spikes(&self, angle_threshold: f64, min_distance: f64) -> GeoTable {
        let map_row = |row: &Record| {
            let mut row = row.clone();
            if let Some(slot) = row.geometries.get_mut(self.geometry_column()) {
                *slot = slot
                    .as_ref()
                    .map(|geom| geom.remove_spikes(angle_threshold, min_distance));
            }
            row
        };

        #[cfg(feature = "rayon")]
        let rows = self.rows().par_iter().map(map_row).collect();
        #[cfg(not(feature = "rayon"))]
        let rows = self.rows().iter().map(map_row).collect();

        self.with_rows(rows)
    }
}

#[cfg(test)]
mod tests {
    use geo::{coord, line_string, point, polygon};

    use super::*;

    #[test]
    fn line_string_spike_removed() {
        let line = line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 100.0), (x: 2.0, y: 0.0)];
        let expected = line_string![(x: 0.0, y: 0.0), (x: 2.0, y: 0.0)];
        assert_eq!(line.remove_spikes(5.0, 0.0), expected);
    }

    #[test]
    fn line_string_without_spikes_unchanged() {
        let line = line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0), (x: 2.0, y: 2.0)];
        assert_eq!(line.remove_spikes(DEFAULT_ANGLE_THRESHOLD, DEFAULT_MIN_DISTANCE), line);
    }

    #[test]
    fn straight_line_survives_maximum_threshold() {
        // 180 degrees is not strictly below a threshold of 180.
        let line = line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 2.0, y: 0.0)];
        assert_eq!(line.remove_spikes(180.0, 0.0), line);
    }

    #[test]
    fn endpoints_always_retained() {
        // Both endpoints sit on a hairpin but are never candidates.
        let line = line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 100.0), (x: 2.0, y: 0.0)];
        let cleaned = line.remove_spikes(180.0, 0.0);
        assert_eq!(cleaned.0.first(), line.0.first());
        assert_eq!(cleaned.0.last(), line.0.last());
    }

    #[test]
    fn duplicate_point_preserved() {
        // The degenerate vertex must survive; dedup is out of scope.
        let line = line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 0.0)];
        assert_eq!(line.remove_spikes(DEFAULT_ANGLE_THRESHOLD, DEFAULT_MIN_DISTANCE), line);
    }

    #[test]
    fn min_distance_zero_still_removes_spike() {
        let line = line_string![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 1.0, y: 0.1),
            (x: 1.001, y: 0.0),
            (x: 2.0, y: 0.0),
        ];
        let expected = line_string![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 1.001, y: 0.0),
            (x: 2.0, y: 0.0),
        ];
        assert_eq!(line.remove_spikes(5.0, 0.0), expected);
    }

    #[test]
    fn adjacent_spikes_both_removed() {
        // Each vertex qualifies against its original neighbors; neither
        // removal is visible to the other within the pass.
        let line = line_string![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 100.0),
            (x: 1.1, y: -100.0),
            (x: 2.0, y: 0.0),
        ];
        let expected = line_string![(x: 0.0, y: 0.0), (x: 2.0, y: 0.0)];
        assert_eq!(line.remove_spikes(5.0, 0.0), expected);
    }

    #[test]
    fn single_pass_is_not_idempotent() {
        // Removing (20, 0.1) turns (10, 0) into a hairpin, but (10, 0) was
        // classified against the original neighbors and survives the pass.
        let line = line_string![
            (x: 0.0, y: 0.0),
            (x: 10.0, y: 0.0),
            (x: 20.0, y: 0.1),
            (x: 0.1, y: -0.1),
        ];
        let first = line.remove_spikes(5.0, 0.0);
        assert_eq!(
            first,
            line_string![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0), (x: 0.1, y: -0.1)]
        );

        let second = first.remove_spikes(5.0, 0.0);
        assert_ne!(second, first);
        assert_eq!(second, line_string![(x: 0.0, y: 0.0), (x: 0.1, y: -0.1)]);
    }

    #[test]
    fn polygon_spike_removed() {
        let polygon = polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 1.0),
            (x: 2.0, y: 100.0),
            (x: 3.0, y: 1.0),
            (x: 4.0, y: 0.0),
            (x: 2.0, y: -2.0),
        ];
        let expected = polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 1.0),
            (x: 3.0, y: 1.0),
            (x: 4.0, y: 0.0),
            (x: 2.0, y: -2.0),
        ];
        assert_eq!(polygon.remove_spikes(5.0, 0.0), expected);
    }

    #[test]
    fn polygon_without_spikes_unchanged() {
        let polygon = polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 1.0),
            (x: 2.0, y: 0.0),
            (x: 1.0, y: -1.0),
        ];
        assert_eq!(
            polygon.remove_spikes(DEFAULT_ANGLE_THRESHOLD, DEFAULT_MIN_DISTANCE),
            polygon
        );
    }

    #[test]
    fn complex_polygon_spike_removed() {
        let polygon = polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 3.0),
            (x: 3.0, y: 4.0),
            (x: 5.0, y: 3.0),
            (x: 6.0, y: 1.0),
            (x: 4.0, y: 100.0),
            (x: 3.0, y: 0.0),
            (x: 1.0, y: 0.0),
        ];
        let expected = polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 3.0),
            (x: 3.0, y: 4.0),
            (x: 5.0, y: 3.0),
            (x: 6.0, y: 1.0),
            (x: 3.0, y: 0.0),
            (x: 1.0, y: 0.0),
        ];
        assert_eq!(polygon.remove_spikes(5.0, 0.0), expected);
    }

    #[test]
    fn polygon_min_distance_keeps_short_edged_vertices() {
        let polygon = polygon![
            (x: 0.0, y: 0.0),
            (x: 0.1, y: 0.9),
            (x: 0.1, y: 0.0),
            (x: 1.0, y: 3.0),
            (x: 3.0, y: 4.0),
            (x: 5.0, y: 3.0),
            (x: 6.0, y: 1.0),
            (x: 4.0, y: 100.0),
            (x: 3.0, y: 0.0),
            (x: 1.0, y: 0.0),
        ];
        let expected = polygon![
            (x: 0.0, y: 0.0),
            (x: 0.1, y: 0.9),
            (x: 0.1, y: 0.0),
            (x: 1.0, y: 3.0),
            (x: 3.0, y: 4.0),
            (x: 5.0, y: 3.0),
            (x: 6.0, y: 1.0),
            (x: 3.0, y: 0.0),
            (x: 1.0, y: 0.0),
        ];
        assert_eq!(polygon.remove_spikes(5.0, 1.0), expected);
    }

    #[test]
    fn junction_spike_dropped_from_both_ends() {
        // The shared first/last vertex is a spike against its cyclic
        // neighbors; neither copy may appear in the rebuilt ring.
        let polygon = polygon![
            (x: 0.0, y: 0.0),
            (x: 10.0, y: 1.0),
            (x: 10.0, y: -1.0),
        ];
        let cleaned = polygon.remove_spikes(15.0, 0.0);
        let junction = coord! { x: 0.0, y: 0.0 };
        assert!(cleaned.exterior().0.iter().all(|c| *c != junction));
        assert_eq!(
            cleaned.exterior().0[..2],
            [coord! { x: 10.0, y: 1.0 }, coord! { x: 10.0, y: -1.0 }]
        );
    }

    #[test]
    fn interior_rings_untouched() {
        let outer = line_string![
            (x: 0.0, y: 0.0),
            (x: 4.0, y: 0.0),
            (x: 5.0, y: 100.0),
            (x: 6.0, y: 0.0),
            (x: 10.0, y: 0.0),
            (x: 10.0, y: 20.0),
            (x: 0.0, y: 20.0),
        ];
        // A spiky hole that must come through byte-identical.
        let hole = line_string![
            (x: 4.0, y: 10.0),
            (x: 5.0, y: 19.0),
            (x: 6.0, y: 10.0),
            (x: 4.0, y: 10.0),
        ];
        let polygon = Polygon::new(outer, vec![hole.clone()]);
        let cleaned = polygon.remove_spikes(15.0, 0.0);
        assert_eq!(cleaned.interiors(), &[hole]);
        assert_ne!(cleaned.exterior(), polygon.exterior());
    }

    #[test]
    fn empty_geometries_unchanged() {
        let line = LineString::new(vec![]);
        assert_eq!(line.remove_spikes(5.0, 0.0), line);

        let polygon = Polygon::new(LineString::new(vec![]), vec![]);
        assert_eq!(polygon.remove_spikes(5.0, 0.0), polygon);
    }

    #[test]
    fn other_geometry_kinds_pass_through() {
        let geometries = [
            Geometry::Point(point! { x: 1.0, y: 2.0 }),
            Geometry::MultiPoint(vec![point! { x: 1.0, y: 2.0 }].into()),
            Geometry::MultiLineString(geo::MultiLineString::new(vec![
                line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 100.0), (x: 2.0, y: 0.0)],
            ])),
        ];
        for geometry in geometries {
            assert_eq!(geometry.remove_spikes(5.0, 0.0), geometry);
        }
    }

    #[test]
    fn geometry_dispatch_filters_lines_and_polygons() {
        let geometry =
            Geometry::LineString(line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 100.0), (x: 2.0, y: 0.0)]);
        let expected = Geometry::LineString(line_string![(x: 0.0, y: 0.0), (x: 2.0, y: 0.0)]);
        assert_eq!(geometry.remove_spikes(5.0, 0.0), expected);
    }
}
