//! # Geometry
//!
//! Integer-snapped points and the bearing arithmetic shared by the shape
//! builders. Angles here are *bearings*: degrees clockwise, with 0° at scene
//! north (screen up). Screen-space arc angles (measured from positive X) are
//! a −90° rotation of this, which the builders convert at their boundaries.

/// One step direction on the 8-point compass, in screen coordinates
/// (+X right, +Y down).
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Octant {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Octant {
    fn offset(self, distance: i32) -> (i32, i32) {
        match self {
            Self::North => (0, -distance),
            Self::NorthEast => (distance, -distance),
            Self::East => (distance, 0),
            Self::SouthEast => (distance, distance),
            Self::South => (0, distance),
            Self::SouthWest => (-distance, distance),
            Self::West => (-distance, 0),
            Self::NorthWest => (-distance, -distance),
        }
    }
    /// Direction lying exactly on the boundary at `index * 45°`.
    fn at_boundary(index: i32) -> Self {
        match index.rem_euclid(8) {
            0 => Self::North,
            1 => Self::NorthEast,
            2 => Self::East,
            3 => Self::SouthEast,
            4 => Self::South,
            5 => Self::SouthWest,
            6 => Self::West,
            _ => Self::NorthWest,
        }
    }
}

/// Wrap an angle into `[0, 360)`.
#[must_use]
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle % 360.0;
    if wrapped < 0.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

/// Normalize an angle into `(-180, 180]`.
#[must_use]
pub fn relative_degrees(angle: f32) -> f32 {
    let mut wrapped = wrap_degrees(angle);
    if wrapped > 180.0 {
        wrapped -= 360.0;
    }
    wrapped
}

/// A pixel position. Coordinates are rounded to the nearest integer on
/// construction; sub-pixel values are never retained.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: x.round() as i32,
            y: y.round() as i32,
        }
    }

    #[must_use]
    pub const fn at(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Clockwise bearing from `self` to `target`, degrees in `[0, 360)`,
    /// 0° at north. Built per quadrant so that exact cardinals and diagonals
    /// of the integer lattice produce exact multiples of 45°.
    #[must_use]
    pub fn bearing_to(self, target: Self) -> f32 {
        let dx = target.x - self.x;
        let dy = target.y - self.y;

        if dx == 0 {
            return if dy > 0 { 180.0 } else { 0.0 };
        }
        if dy == 0 {
            return if dx > 0 { 90.0 } else { 270.0 };
        }
        if dx.abs() == dy.abs() {
            return match (dx > 0, dy > 0) {
                (true, false) => 45.0,
                (true, true) => 135.0,
                (false, true) => 225.0,
                (false, false) => 315.0,
            };
        }

        let run = dx.abs() as f32;
        let rise = dy.abs() as f32;
        // Quadrant base offsets keep the result continuous and clockwise.
        match (dx > 0, dy > 0) {
            (true, false) => (run / rise).atan().to_degrees(),
            (true, true) => 90.0 + (rise / run).atan().to_degrees(),
            (false, true) => 180.0 + (run / rise).atan().to_degrees(),
            (false, false) => 270.0 + (rise / run).atan().to_degrees(),
        }
    }

    /// Bearing to `target` minus `offset`; when `relative`, normalized into
    /// `(-180, 180]`.
    #[must_use]
    pub fn angle_between(self, target: Self, offset: f32, relative: bool) -> f32 {
        let angle = self.bearing_to(target) - offset;
        if relative {
            relative_degrees(angle)
        } else {
            angle
        }
    }

    #[must_use]
    pub fn distance_to(self, target: Self) -> f32 {
        let dx = (target.x - self.x) as f32;
        let dy = (target.y - self.y) as f32;
        (dx * dx + dy * dy).sqrt()
    }

    /// Whether both coordinates are exact multiples of `cell_size`.
    #[must_use]
    pub fn is_on_grid(self, cell_size: i32) -> bool {
        cell_size > 0 && self.x % cell_size == 0 && self.y % cell_size == 0
    }

    /// Step `distance` along the compass octant containing `angle`, biased
    /// clockwise: interior angles round up to the next 45° boundary, and an
    /// angle lying exactly on a cardinal boundary takes the diagonal
    /// clockwise of it. Exact diagonal boundaries keep their diagonal.
    #[must_use]
    pub fn step_clockwise(self, angle: f32, distance: i32) -> Self {
        let angle = wrap_degrees(angle);
        let octant = if angle % 45.0 == 0.0 {
            let index = (angle / 45.0) as i32;
            if index % 2 == 0 {
                // Cardinal tie: advance to the clockwise-adjacent diagonal.
                Octant::at_boundary(index + 1)
            } else {
                Octant::at_boundary(index)
            }
        } else {
            Octant::at_boundary((angle / 45.0).ceil() as i32)
        };
        self.offset_by(octant.offset(distance))
    }

    /// Mirror of [`Self::step_clockwise`]: interior angles round down, and
    /// cardinal ties take the anticlockwise-adjacent diagonal.
    #[must_use]
    pub fn step_anticlockwise(self, angle: f32, distance: i32) -> Self {
        let angle = wrap_degrees(angle);
        let octant = if angle % 45.0 == 0.0 {
            let index = (angle / 45.0) as i32;
            if index % 2 == 0 {
                Octant::at_boundary(index - 1)
            } else {
                Octant::at_boundary(index)
            }
        } else {
            Octant::at_boundary((angle / 45.0).floor() as i32)
        };
        self.offset_by(octant.offset(distance))
    }

    fn offset_by(self, (dx, dy): (i32, i32)) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod test {
    use super::{relative_degrees, wrap_degrees, Point};

    #[test]
    fn construction_rounds_to_integers() {
        let point = Point::new(10.4, -3.6);
        assert_eq!(point, Point::at(10, -4));
        // Sub-pixel values are never retained.
        assert_eq!(Point::new(0.5, 99.5), Point::at(1, 100));
    }

    #[test]
    fn cardinal_and_diagonal_bearings_are_exact() {
        let origin = Point::at(0, 0);
        assert_eq!(origin.bearing_to(Point::at(0, -10)), 0.0);
        assert_eq!(origin.bearing_to(Point::at(10, 0)), 90.0);
        assert_eq!(origin.bearing_to(Point::at(0, 10)), 180.0);
        assert_eq!(origin.bearing_to(Point::at(-10, 0)), 270.0);
        assert_eq!(origin.bearing_to(Point::at(7, -7)), 45.0);
        assert_eq!(origin.bearing_to(Point::at(7, 7)), 135.0);
        assert_eq!(origin.bearing_to(Point::at(-7, 7)), 225.0);
        assert_eq!(origin.bearing_to(Point::at(-7, -7)), 315.0);
    }

    #[test]
    fn bearings_are_continuous_per_quadrant() {
        let origin = Point::at(0, 0);
        let north_east = origin.bearing_to(Point::at(1, -2));
        assert!(north_east > 0.0 && north_east < 45.0);
        let south_east = origin.bearing_to(Point::at(2, 1));
        assert!(south_east > 90.0 && south_east < 135.0);
        let south_west = origin.bearing_to(Point::at(-1, 2));
        assert!(south_west > 180.0 && south_west < 225.0);
        let north_west = origin.bearing_to(Point::at(-2, -1));
        assert!(north_west > 270.0 && north_west < 315.0);
    }

    #[test]
    fn relative_angles_normalize() {
        let origin = Point::at(0, 0);
        let west = Point::at(-10, 0);
        assert_eq!(origin.angle_between(west, 0.0, false), 270.0);
        assert_eq!(origin.angle_between(west, 0.0, true), -90.0);
        assert_eq!(relative_degrees(180.0), 180.0);
        assert_eq!(relative_degrees(-180.0), 180.0);
        assert_eq!(wrap_degrees(-45.0), 315.0);
    }

    #[test]
    fn grid_alignment() {
        assert!(Point::at(200, -100).is_on_grid(100));
        assert!(!Point::at(250, 100).is_on_grid(100));
        assert!(Point::at(250, 100).is_on_grid(50));
        assert!(!Point::at(0, 0).is_on_grid(0));
    }

    #[test]
    fn octant_steps_resolve_ties_to_diagonals() {
        let origin = Point::at(0, 0);
        // Cardinal boundaries: each stepper takes its adjacent diagonal.
        assert_eq!(origin.step_clockwise(0.0, 10), Point::at(10, -10));
        assert_eq!(origin.step_anticlockwise(0.0, 10), Point::at(-10, -10));
        assert_eq!(origin.step_clockwise(90.0, 10), Point::at(10, 10));
        assert_eq!(origin.step_anticlockwise(90.0, 10), Point::at(10, -10));
        // Diagonal boundaries: both agree.
        assert_eq!(origin.step_clockwise(45.0, 10), Point::at(10, -10));
        assert_eq!(origin.step_anticlockwise(45.0, 10), Point::at(10, -10));
    }

    #[test]
    fn octant_steps_round_into_the_walk_direction() {
        let origin = Point::at(0, 0);
        // 60° rounds up to east for the clockwise walk, down to the
        // north-east diagonal for the anticlockwise one.
        assert_eq!(origin.step_clockwise(60.0, 5), Point::at(5, 0));
        assert_eq!(origin.step_anticlockwise(60.0, 5), Point::at(5, -5));
        assert_eq!(origin.step_clockwise(350.0, 5), Point::at(0, -5));
        assert_eq!(origin.step_anticlockwise(350.0, 5), Point::at(-5, -5));
    }
}
