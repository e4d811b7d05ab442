//! # Grid shapes
//!
//! Cell-snapped aura outlines, built by walking the boundary cells the host
//! grid reports and stitching their edges into one closed path. Radii are
//! snapped to whole grid-distance multiples; multi-cell tokens contribute a
//! 90° corner arc per footprint corner; gaps between non-adjacent boundary
//! cells are bridged diagonally-first so the outline never skips a cell.

use smallvec::SmallVec;

use crate::aura::Aura;
use crate::geometry::{relative_degrees, wrap_degrees, Point};
use crate::host::{GridContext, GridOracle, PathSink, TokenShape};

type Points = SmallVec<[Point; 32]>;

/// Bailout for the octant walk along a cone side. Any real cone converges
/// in far fewer steps; hitting this means degenerate inputs.
const MAX_SIDE_STEPS: usize = 256;

pub fn draw<S, G>(
    sink: &mut S,
    oracle: &G,
    aura: &Aura,
    token: &TokenShape,
    grid: &GridContext,
    close: bool,
) where
    S: PathSink + ?Sized,
    G: GridOracle + ?Sized,
{
    let radius = snap_radius(aura.radius, grid);
    if aura.is_full_circle() {
        circle(sink, oracle, token, grid, radius);
    } else {
        cone(sink, oracle, aura, token, grid, radius, close);
    }
}

/// Grid shapes only ever have cell-aligned radii.
fn snap_radius(radius: f32, grid: &GridContext) -> f32 {
    (radius / grid.distance).round() * grid.distance
}

fn circle<S, G>(sink: &mut S, oracle: &G, token: &TokenShape, grid: &GridContext, radius: f32)
where
    S: PathSink + ?Sized,
    G: GridOracle + ?Sized,
{
    let centre = token.centre();
    let boundary = boundary_circle(oracle, token, grid, radius);
    if boundary.is_empty() {
        return;
    }

    // Close the loop before bridging so the seam gets bridged too.
    let mut ring = boundary.clone();
    ring.push(boundary[0]);
    let bridged = bridge_gaps(&ring, grid.cell_size);

    let outline = snap_to_edges(&bridged, centre, grid.cell_size);
    let Some((first, rest)) = outline.split_first() else {
        return;
    };
    sink.move_to(first.x as f32, first.y as f32);
    for point in rest {
        sink.line_to(point.x as f32, point.y as f32);
    }
    sink.close_path();
}

fn cone<S, G>(
    sink: &mut S,
    oracle: &G,
    aura: &Aura,
    token: &TokenShape,
    grid: &GridContext,
    radius: f32,
    close: bool,
) where
    S: PathSink + ?Sized,
    G: GridOracle + ?Sized,
{
    let cell = grid.cell_size;
    let centre = token.centre();

    let mut boundary = boundary_circle(oracle, token, grid, radius);
    if boundary.is_empty() {
        return;
    }
    // Wrap and bridge the full ring first so the wedge keeps its density.
    boundary.push(boundary[0]);
    let boundary = bridge_gaps(&boundary, cell);

    // The same sweep the Euclidean arc uses: its screen-space start of
    // `-90 + direction + rotation - angle/2` is this bearing exactly
    // (screen -90° ⇔ bearing 0°).
    let start_bearing = wrap_degrees(aura.direction + token.rotation - aura.angle / 2.0);
    let end_bearing = start_bearing + aura.angle;

    // Boundary points inside the angular span, ordered clockwise from the
    // start edge. The first and last are automatically the winding-correct
    // nearest matches for the two edges.
    let mut wedge: SmallVec<[(f32, Point); 32]> = boundary
        .iter()
        .filter_map(|&point| {
            let rel = wrap_degrees(centre.bearing_to(point) - start_bearing);
            (rel <= aura.angle).then_some((rel, point))
        })
        .collect();
    wedge.sort_by(|a, b| a.0.total_cmp(&b.0));
    dedupe_consecutive_by(&mut wedge, |a, b| a.1 == b.1);

    let boundary_start = match wedge.first() {
        Some((_, point)) => *point,
        // A span with no boundary cell at all (e.g. an aura smaller than
        // one cell): fall back to the nearest point regardless of side.
        None => match nearest_by_bearing(&boundary, centre, start_bearing) {
            Some(point) => point,
            None => return,
        },
    };
    let boundary_end = match wedge.last() {
        Some((_, point)) => *point,
        None => match nearest_by_bearing(&boundary, centre, end_bearing) {
            Some(point) => point,
            None => return,
        },
    };

    // Token attachment points for the two radial sides.
    let corners = token.corners();
    let footprint: &[Point] = if token.is_single_cell() {
        &[][..]
    } else {
        &corners[..]
    };
    let anchor_start = anchor_point(footprint, centre, start_bearing, start_bearing, aura.angle);
    let anchor_end = anchor_point(footprint, centre, end_bearing, start_bearing, aura.angle);

    let side_start = connect(anchor_start, boundary_start, cell, true);
    let side_end = connect(anchor_end, boundary_end, cell, false);

    if close {
        let mut path = Points::new();
        path.push(anchor_start);
        path.extend(side_start);
        path.extend(wedge.iter().map(|(_, point)| *point));
        if wedge.is_empty() {
            path.push(boundary_start);
            if boundary_end != boundary_start {
                path.push(boundary_end);
            }
        }
        path.extend(side_end.into_iter().rev());
        path.push(anchor_end);
        let path = bridge_gaps(&path, cell);
        let outline = snap_to_edges(&path, centre, cell);

        sink.move_to(centre.x as f32, centre.y as f32);
        let mut pen = centre;
        for &point in &outline {
            if point != pen {
                sink.line_to(point.x as f32, point.y as f32);
                pen = point;
            }
        }
        if pen != centre {
            sink.line_to(centre.x as f32, centre.y as f32);
        }
        sink.close_path();
    } else {
        // Open stroke: just the arc portion, no radial sides.
        let arc: Points = wedge.iter().map(|(_, point)| *point).collect();
        let arc = bridge_gaps(&arc, cell);
        let outline = snap_to_edges(&arc, centre, cell);
        let Some((first, rest)) = outline.split_first() else {
            return;
        };
        sink.move_to(first.x as f32, first.y as f32);
        for point in rest {
            sink.line_to(point.x as f32, point.y as f32);
        }
    }
}

/// The ordered cell-centre boundary of the snapped circle around the whole
/// token footprint.
fn boundary_circle<G>(oracle: &G, token: &TokenShape, grid: &GridContext, radius: f32) -> Points
where
    G: GridOracle + ?Sized,
{
    let centre = token.centre();
    let mut points: Points = if token.is_single_cell() {
        oracle.circle(centre, radius).into_iter().collect()
    } else {
        // One 90° arc per footprint corner, clockwise from the top-right
        // quadrant, concatenated into a single boundary circle.
        let [top_left, top_right, bottom_right, bottom_left] = token.corners();
        let mut joined = Points::new();
        for (corner, direction) in [
            (top_right, -45.0),
            (bottom_right, 45.0),
            (bottom_left, 135.0),
            (top_left, 225.0),
        ] {
            joined.extend(oracle.cone(corner, radius, direction, 90.0));
        }
        joined
    };

    // Tolerance culling: anything the host reports off the half-cell
    // lattice cannot be stitched and is discarded.
    let half = grid.cell_size / 2;
    if half > 0 {
        points.retain(|point| {
            (point.x - centre.x) % half == 0 && (point.y - centre.y) % half == 0
        });
    }
    dedupe_consecutive_by(&mut points, |a, b| a == b);
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    points
}

/// Insert synthesized points between consecutive entries that are more than
/// one cell apart on both axes: diagonal steps while both gaps exceed a
/// cell, then straight steps along the remaining axis. Guarantees the
/// polyline never skips a cell boundary. Fewer than 2 points: nothing to
/// bridge.
fn bridge_gaps(points: &[Point], cell: i32) -> Points {
    let mut out = Points::new();
    if points.len() < 2 || cell <= 0 {
        out.extend_from_slice(points);
        return out;
    }
    out.push(points[0]);
    for &next in &points[1..] {
        loop {
            // Coincident or adjacent points need no bridging.
            let cur = *out.last().expect("seeded above");
            let dx = next.x - cur.x;
            let dy = next.y - cur.y;
            if dx.abs() <= cell && dy.abs() <= cell {
                break;
            }
            let step = if dx.abs() >= cell && dy.abs() >= cell {
                Point::at(cur.x + cell * dx.signum(), cur.y + cell * dy.signum())
            } else if dx.abs() > cell {
                Point::at(cur.x + cell * dx.signum(), cur.y)
            } else {
                Point::at(cur.x, cur.y + cell * dy.signum())
            };
            out.push(step);
        }
        if *out.last().expect("seeded above") != next {
            out.push(next);
        }
    }
    out
}

/// Walk one radial side: octant steps from the token anchor toward the
/// boundary point, stopping within one cell diagonal of it. The clockwise
/// walk hugs the start edge, the anticlockwise walk the end edge.
fn connect(from: Point, to: Point, cell: i32, clockwise: bool) -> Points {
    let mut out = Points::new();
    if cell <= 0 {
        return out;
    }
    let reach = cell as f32 * std::f32::consts::SQRT_2;
    let mut cur = from;
    let mut steps = 0;
    while cur.distance_to(to) > reach {
        if steps == MAX_SIDE_STEPS {
            log::warn!("grid cone side walk from {from} to {to} did not converge");
            break;
        }
        let bearing = cur.bearing_to(to);
        cur = if clockwise {
            cur.step_clockwise(bearing, cell)
        } else {
            cur.step_anticlockwise(bearing, cell)
        };
        out.push(cur);
        steps += 1;
    }
    out
}

/// Angularly nearest footprint point to a cone edge, preferring candidates
/// inside the wedge (winding-correct side); a single-cell footprint anchors
/// at the token centre.
fn anchor_point(
    footprint: &[Point],
    centre: Point,
    edge_bearing: f32,
    wedge_start: f32,
    wedge_angle: f32,
) -> Point {
    let inside = |point: &Point| {
        wrap_degrees(centre.bearing_to(*point) - wedge_start) <= wedge_angle
    };
    let candidates: SmallVec<[Point; 4]> = footprint.iter().copied().filter(inside).collect();
    let pool = if candidates.is_empty() {
        footprint
    } else {
        &candidates[..]
    };
    nearest_by_bearing(pool, centre, edge_bearing).unwrap_or(centre)
}

fn nearest_by_bearing(points: &[Point], centre: Point, bearing: f32) -> Option<Point> {
    points.iter().copied().min_by(|a, b| {
        let da = relative_degrees(centre.bearing_to(*a) - bearing).abs();
        let db = relative_degrees(centre.bearing_to(*b) - bearing).abs();
        da.total_cmp(&db)
    })
}

/// Convert the cell-centre polyline into a cell-edge outline: every
/// cell-centre point moves half a cell outward (away from the token centre)
/// on each axis, landing on the outer corner of its cell; points already on
/// the corner lattice stay put. Diagonal transitions get an intermediate
/// corner so the drawn line follows grid edges, preferring the corner
/// farther from the token.
fn snap_to_edges(points: &[Point], centre: Point, cell: i32) -> Points {
    let mut out = Points::new();
    for &point in points {
        let snapped = offset_outward(point, centre, cell);
        match out.last().copied() {
            Some(prev) if prev == snapped => continue,
            Some(prev) => {
                if prev.x != snapped.x && prev.y != snapped.y {
                    let corner_a = Point::at(prev.x, snapped.y);
                    let corner_b = Point::at(snapped.x, prev.y);
                    let corner = if centre.distance_to(corner_a) >= centre.distance_to(corner_b) {
                        corner_a
                    } else {
                        corner_b
                    };
                    if corner != prev && corner != snapped {
                        out.push(corner);
                    }
                }
                out.push(snapped);
            }
            None => out.push(snapped),
        }
    }
    out
}

fn offset_outward(point: Point, centre: Point, cell: i32) -> Point {
    let half = cell / 2;
    if half <= 0 || point == centre {
        // The token-centre anchor of a closed cone stays put.
        return point;
    }
    // Cell centres are classified against the absolute grid lattice (the
    // surface origin is grid-aligned), so even-footprint tokens whose
    // centre sits on a grid corner still offset correctly.
    let is_cell_centre =
        (point.x - half).rem_euclid(cell) == 0 && (point.y - half).rem_euclid(cell) == 0;
    if !is_cell_centre {
        // Corner-lattice points (footprint corners, stepped side points)
        // pass through unchanged.
        return point;
    }
    let outward = |value: i32, origin: i32| {
        if value - origin < 0 {
            value - half
        } else {
            value + half
        }
    };
    Point::at(outward(point.x, centre.x), outward(point.y, centre.y))
}

fn dedupe_consecutive_by<T, const N: usize>(
    points: &mut SmallVec<[T; N]>,
    same: impl Fn(&T, &T) -> bool,
) where
    T: Copy,
    [T; N]: smallvec::Array<Item = T>,
{
    let mut read = 1;
    let mut write = 1;
    while read < points.len() {
        if !same(&points[read], &points[write - 1]) {
            points[write] = points[read];
            write += 1;
        }
        read += 1;
    }
    points.truncate(write.min(points.len()));
}
