//! # Euclidean shapes
//!
//! Continuously-scaled aura outlines: a circle (or, for multi-cell tokens,
//! a rounded rectangle that stays equidistant from the token silhouette)
//! for full rings, and an arc or closed wedge for cones.

use crate::aura::Aura;
use crate::geometry::Point;
use crate::host::{GridContext, PathSink, TokenShape};

/// The single unit-conversion point: scene distance units to screen pixels,
/// anchored at the token's edge. A radius of `0` hugs the token boundary
/// rather than its centre.
#[must_use]
pub fn pixel_radius(radius: f32, origin_offset: f32, grid: &GridContext) -> f32 {
    radius * grid.pixels_per_unit() + origin_offset
}

/// Screen-space arc angles in radians. `-90°` establishes the forward
/// convention: direction 0 points up from the token, and the whole cone
/// rotates with it.
#[must_use]
pub fn arc_angles(direction: f32, angle: f32, rotation: f32) -> (f32, f32) {
    let start = ((-90.0 + direction + rotation) - angle / 2.0).to_radians();
    let end = start + angle.to_radians();
    (start, end)
}

/// Arc endpoints on the integer lattice, shared with the grid builder's
/// cone-edge matching.
#[must_use]
pub fn arc_endpoints(centre: Point, radius: f32, start: f32, end: f32) -> (Point, Point) {
    let at = |angle: f32| {
        Point::new(
            centre.x as f32 + radius * angle.cos(),
            centre.y as f32 + radius * angle.sin(),
        )
    };
    (at(start), at(end))
}

pub fn draw<S: PathSink + ?Sized>(
    sink: &mut S,
    aura: &Aura,
    token: &TokenShape,
    grid: &GridContext,
    close: bool,
) {
    if aura.is_full_circle() {
        ring(sink, aura, token, grid);
    } else {
        cone(sink, aura, token, grid, close);
    }
}

/// Full 360° ring, independent of `direction`.
fn ring<S: PathSink + ?Sized>(sink: &mut S, aura: &Aura, token: &TokenShape, grid: &GridContext) {
    if token.is_single_cell() {
        let centre = token.centre();
        let radius = pixel_radius(aura.radius, token.half_width, grid);
        sink.draw_circle(centre.x as f32, centre.y as f32, radius);
    } else {
        // Inflate the bounding box so the ring stays equidistant from the
        // token's silhouette rather than its centre.
        let inflate = pixel_radius(aura.radius, 0.0, grid);
        sink.draw_rounded_rect(
            -inflate,
            -inflate,
            token.half_width * 2.0 + inflate * 2.0,
            token.half_height * 2.0 + inflate * 2.0,
            inflate,
        );
    }
}

fn cone<S: PathSink + ?Sized>(
    sink: &mut S,
    aura: &Aura,
    token: &TokenShape,
    grid: &GridContext,
    close: bool,
) {
    let centre = token.centre();
    let radius = pixel_radius(aura.radius, token.half_width, grid);
    let (start, end) = arc_angles(aura.direction, aura.angle, token.rotation);
    let (arc_start, _) = arc_endpoints(centre, radius, start, end);

    if close {
        sink.move_to(centre.x as f32, centre.y as f32);
        sink.line_to(arc_start.x as f32, arc_start.y as f32);
    }

    sink.arc(centre.x as f32, centre.y as f32, radius, start, end);

    if close {
        sink.line_to(centre.x as f32, centre.y as f32);
        sink.close_path();
    }
}
