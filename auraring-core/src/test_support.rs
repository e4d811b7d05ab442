//! Test doubles shared across the builder and policy tests: a sink that
//! records every drawing call, and a square-grid oracle with Chebyshev
//! rings (the square-grid shape the host reports for circles).

use crate::colour::Colour;
use crate::geometry::{relative_degrees, Point};
use crate::host::{DrawSink, GridContext, GridOracle, PathSink};

#[derive(Clone, PartialEq, Debug)]
pub enum Call {
    MoveTo(f32, f32),
    LineTo(f32, f32),
    Arc(f32, f32, f32, f32, f32),
    ClosePath,
    DrawCircle(f32, f32, f32),
    DrawRoundedRect(f32, f32, f32, f32, f32),
    Clear,
    BeginFill(Colour, f32),
    EndFill,
    SetStrokeStyle(f32, Colour, f32),
}

#[derive(Default)]
pub struct RecordingSink {
    pub calls: Vec<Call>,
}

impl PathSink for RecordingSink {
    fn move_to(&mut self, x: f32, y: f32) {
        self.calls.push(Call::MoveTo(x, y));
    }
    fn line_to(&mut self, x: f32, y: f32) {
        self.calls.push(Call::LineTo(x, y));
    }
    fn arc(&mut self, cx: f32, cy: f32, radius: f32, start: f32, end: f32) {
        self.calls.push(Call::Arc(cx, cy, radius, start, end));
    }
    fn close_path(&mut self) {
        self.calls.push(Call::ClosePath);
    }
    fn draw_circle(&mut self, cx: f32, cy: f32, radius: f32) {
        self.calls.push(Call::DrawCircle(cx, cy, radius));
    }
    fn draw_rounded_rect(&mut self, x: f32, y: f32, width: f32, height: f32, corner: f32) {
        self.calls
            .push(Call::DrawRoundedRect(x, y, width, height, corner));
    }
}

impl DrawSink for RecordingSink {
    fn clear(&mut self) {
        self.calls.push(Call::Clear);
    }
    fn begin_fill(&mut self, colour: Colour, opacity: f32) {
        self.calls.push(Call::BeginFill(colour, opacity));
    }
    fn end_fill(&mut self) {
        self.calls.push(Call::EndFill);
    }
    fn set_stroke_style(&mut self, weight: f32, colour: Colour, opacity: f32) {
        self.calls.push(Call::SetStrokeStyle(weight, colour, opacity));
    }
}

/// A square grid: circles are Chebyshev rings of cell centres, listed
/// clockwise from north; cones are the angular slice of that ring.
pub struct SquareGridOracle {
    grid: GridContext,
}

impl SquareGridOracle {
    pub fn new(grid: GridContext) -> Self {
        Self { grid }
    }

    fn ring(&self, origin: Point, radius: f32) -> Vec<Point> {
        let cell = self.grid.cell_size;
        let reach = (radius / self.grid.distance).round() as i32;
        if reach <= 0 {
            return vec![origin];
        }

        let mut cells = Vec::new();
        // Top edge, west to east, then clockwise around.
        for x in -reach..=reach {
            cells.push((x, -reach));
        }
        for y in (-reach + 1)..=reach {
            cells.push((reach, y));
        }
        for x in (-reach..reach).rev() {
            cells.push((x, reach));
        }
        for y in ((-reach + 1)..reach).rev() {
            cells.push((-reach, y));
        }

        // Rotate so the listing starts at north, staying clockwise.
        let north = cells
            .iter()
            .position(|&(x, y)| x == 0 && y == -reach)
            .unwrap_or(0);
        cells.rotate_left(north);
        cells
            .into_iter()
            .map(|(x, y)| Point::at(origin.x + x * cell, origin.y + y * cell))
            .collect()
    }
}

impl GridOracle for SquareGridOracle {
    fn circle(&self, origin: Point, radius: f32) -> Vec<Point> {
        self.ring(origin, radius)
    }

    fn cone(&self, origin: Point, radius: f32, direction: f32, angle: f32) -> Vec<Point> {
        // Screen-space direction to a clockwise bearing.
        let centre_bearing = direction + 90.0;
        let mut slice: Vec<(f32, Point)> = self
            .ring(origin, radius)
            .into_iter()
            .filter_map(|point| {
                if point == origin {
                    return None;
                }
                let rel = relative_degrees(origin.bearing_to(point) - centre_bearing);
                (rel.abs() <= angle / 2.0 + f32::EPSILON).then_some((rel, point))
            })
            .collect();
        slice.sort_by(|a, b| a.0.total_cmp(&b.0));
        slice.into_iter().map(|(_, point)| point).collect()
    }
}
