//! # Host capabilities
//!
//! The narrow interfaces through which the core consumes its host platform:
//! grid queries, the drawing surface, token snapshots, and flag persistence.
//! Nothing in here is reimplemented by the core — the host supplies all of
//! it, and every builder call receives these explicitly rather than reading
//! ambient globals.

use crate::aura::Role;
use crate::collection::AuraCollection;
use crate::colour::Colour;
use crate::geometry::Point;

/// Grid cell enumeration, delegated to the host grid system.
///
/// Both queries return the ordered boundary cell-centre points of the region,
/// in angular order around `origin`. `direction` is a screen-space angle in
/// degrees (0° = screen east, clockwise), matching the arc math of the
/// Euclidean builder.
pub trait GridOracle {
    fn circle(&self, origin: Point, radius: f32) -> Vec<Point>;
    fn cone(&self, origin: Point, radius: f32, direction: f32, angle: f32) -> Vec<Point>;
}

/// Vector path construction on the token's drawing surface.
///
/// Angles passed to `arc` are screen-space radians. `arc` positions itself:
/// it starts a sub-path at the arc's start point if the pen is elsewhere.
pub trait PathSink {
    fn move_to(&mut self, x: f32, y: f32);
    fn line_to(&mut self, x: f32, y: f32);
    fn arc(&mut self, cx: f32, cy: f32, radius: f32, start: f32, end: f32);
    fn close_path(&mut self);
    fn draw_circle(&mut self, cx: f32, cy: f32, radius: f32);
    fn draw_rounded_rect(&mut self, x: f32, y: f32, width: f32, height: f32, corner: f32);
}

/// The full drawing surface: path construction plus fill/stroke state.
///
/// The surface belongs to exactly one token and is fully cleared and redrawn
/// on every refresh; there is no incremental diffing.
pub trait DrawSink: PathSink {
    fn clear(&mut self);
    fn begin_fill(&mut self, colour: Colour, opacity: f32);
    fn end_fill(&mut self);
    /// A zero weight or opacity disables stroking.
    fn set_stroke_style(&mut self, weight: f32, colour: Colour, opacity: f32);
}

/// Grid parameters of the current scene.
#[derive(Copy, Clone, Debug)]
pub struct GridContext {
    /// Pixel width of one grid square.
    pub cell_size: i32,
    /// In-game distance represented by one grid square.
    pub distance: f32,
    /// The scene-wide grid-snapping setting gating all grid shapes.
    pub snap_to_grid: bool,
}

impl GridContext {
    /// Screen pixels per scene distance unit — the single unit-conversion
    /// factor used by every builder.
    #[must_use]
    pub fn pixels_per_unit(&self) -> f32 {
        self.cell_size as f32 / self.distance
    }
}

/// Size and orientation of a token, derived per draw call.
#[derive(Copy, Clone, Debug)]
pub struct TokenShape {
    /// Half the pixel width of the token's bounding box.
    pub half_width: f32,
    /// Half the pixel height of the token's bounding box.
    pub half_height: f32,
    /// Token rotation in degrees.
    pub rotation: f32,
    /// Occupied grid cells along each axis.
    pub footprint_width: u32,
    pub footprint_height: u32,
}

impl TokenShape {
    /// Centre of the bounding box, in surface-local pixels (the surface
    /// origin sits at the token's top-left corner).
    #[must_use]
    pub fn centre(&self) -> Point {
        Point::new(self.half_width, self.half_height)
    }

    #[must_use]
    pub fn is_single_cell(&self) -> bool {
        self.footprint_width <= 1 && self.footprint_height <= 1
    }

    /// The four bounding-box corners in clockwise order from the top-left.
    #[must_use]
    pub fn corners(&self) -> [Point; 4] {
        let width = self.half_width * 2.0;
        let height = self.half_height * 2.0;
        [
            Point::new(0.0, 0.0),
            Point::new(width, 0.0),
            Point::new(width, height),
            Point::new(0.0, height),
        ]
    }
}

/// Per-draw visibility state of a token.
#[derive(Copy, Clone, Debug, Default)]
pub struct TokenState {
    /// The document's hidden flag.
    pub hidden: bool,
    pub hovered: bool,
    /// Whether the viewer owns or observes the token.
    pub observer: bool,
    /// Whether fog/vision currently reveals the token to the viewer.
    pub visible: bool,
    /// An active drag/edit preview suppresses all aura drawing.
    pub previewed: bool,
}

/// Everything the render policy needs to know about one token, captured
/// fresh per draw call. Never persisted.
#[derive(Copy, Clone, Debug)]
pub struct TokenSnapshot {
    pub shape: TokenShape,
    pub state: TokenState,
}

/// The viewing user.
#[derive(Copy, Clone, Debug)]
pub struct Viewer {
    pub role: Role,
}

impl Viewer {
    #[must_use]
    pub fn role_at_least(&self, required: Role) -> bool {
        self.role >= required
    }

    /// GM-equivalent viewers see hidden tokens (at reduced opacity).
    #[must_use]
    pub fn is_privileged(&self) -> bool {
        self.role >= Role::Gamemaster
    }
}

/// Flag persistence on the token document. Writes are fire-and-forget; the
/// only contract is that a later read observes them (last write wins).
pub trait AuraStore {
    /// Defaults to an empty collection when the token has never stored one.
    fn get_auras(&self) -> AuraCollection;
    fn set_auras(&mut self, auras: &AuraCollection);
}
