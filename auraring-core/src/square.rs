//! Square aura outlines: the full ring is an axis-aligned rectangle
//! inflated outward from the token's bounding box. Angled square cones were
//! never defined, so cones delegate to the Euclidean wedge.

use crate::aura::Aura;
use crate::euclidean;
use crate::host::{GridContext, PathSink, TokenShape};

pub fn draw<S: PathSink + ?Sized>(
    sink: &mut S,
    aura: &Aura,
    token: &TokenShape,
    grid: &GridContext,
    close: bool,
) {
    if aura.is_full_circle() {
        let inflate = euclidean::pixel_radius(aura.radius, 0.0, grid);
        // A sharp-cornered rect: corner radius zero.
        sink.draw_rounded_rect(
            -inflate,
            -inflate,
            token.half_width * 2.0 + inflate * 2.0,
            token.half_height * 2.0 + inflate * 2.0,
            0.0,
        );
    } else {
        euclidean::draw(sink, aura, token, grid, close);
    }
}

#[cfg(test)]
mod test {
    use super::draw;
    use crate::aura::Aura;
    use crate::host::{GridContext, TokenShape};
    use crate::test_support::{Call, RecordingSink};

    #[test]
    fn square_ring_is_an_inflated_sharp_rect() {
        let mut aura = Aura::default();
        aura.radius = 10.0;
        aura.is_square = true;

        let token = TokenShape {
            half_width: 50.0,
            half_height: 50.0,
            rotation: 0.0,
            footprint_width: 1,
            footprint_height: 1,
        };
        let grid = GridContext {
            cell_size: 100,
            distance: 5.0,
            snap_to_grid: false,
        };

        let mut sink = RecordingSink::default();
        draw(&mut sink, &aura, &token, &grid, true);
        assert_eq!(
            sink.calls,
            [Call::DrawRoundedRect(-200.0, -200.0, 500.0, 500.0, 0.0)]
        );
    }

    #[test]
    fn square_cones_fall_back_to_the_euclidean_wedge() {
        let mut aura = Aura::default();
        aura.radius = 10.0;
        aura.angle = 60.0;
        aura.is_square = true;

        let token = TokenShape {
            half_width: 50.0,
            half_height: 50.0,
            rotation: 0.0,
            footprint_width: 1,
            footprint_height: 1,
        };
        let grid = GridContext {
            cell_size: 100,
            distance: 5.0,
            snap_to_grid: false,
        };

        let mut sink = RecordingSink::default();
        draw(&mut sink, &aura, &token, &grid, false);
        assert!(matches!(sink.calls[0], Call::Arc(..)));
    }
}
