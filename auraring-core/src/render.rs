//! # Render policy
//!
//! Decides, fresh on every refresh, which of a token's auras are drawn for
//! the current viewer and with what opacity, then drives the shape builders
//! over the token's drawing surface. Fill goes down before stroke, auras in
//! collection order, and the surface is always cleared first — there is no
//! incremental diffing and no persisted render state.

use crate::aura::{Aura, Role, ShapeMode};
use crate::host::{DrawSink, GridContext, GridOracle, TokenSnapshot, Viewer};
use crate::modifier::ModifierIndex;
use crate::{euclidean, square};

/// Redraw every aura of one token. `auras` is the stored collection order;
/// modifiers are applied to copies, never to the stored records.
pub fn render_token<S, G>(
    sink: &mut S,
    oracle: &G,
    auras: &[Aura],
    modifiers: &ModifierIndex,
    token: &TokenSnapshot,
    viewer: &Viewer,
    grid: &GridContext,
) where
    S: DrawSink + ?Sized,
    G: GridOracle + ?Sized,
{
    sink.clear();

    if !should_draw_token(token, viewer) {
        return;
    }

    for stored in auras {
        let aura = modifiers.apply(stored);
        if let Err(error) = aura.validate() {
            // Drop the offender, keep its siblings.
            log::warn!("dropping malformed aura {:?}: {error}", aura.name);
            continue;
        }
        if !should_render(&aura, token, viewer) {
            continue;
        }
        render_aura(sink, oracle, &aura, token, grid);
    }
}

/// Token-level gate, applied before any aura is considered.
#[must_use]
pub fn should_draw_token(token: &TokenSnapshot, viewer: &Viewer) -> bool {
    if token.state.previewed {
        return false;
    }
    if token.state.hidden && !viewer.is_privileged() {
        return false;
    }
    true
}

/// Per-aura eligibility: every clause gates independently and all must
/// hold.
#[must_use]
pub fn should_render(aura: &Aura, token: &TokenSnapshot, viewer: &Viewer) -> bool {
    if aura.radius <= 0.0 {
        return false;
    }
    if aura.hide {
        return false;
    }
    if aura.visibility == Role::None {
        return false;
    }
    if !viewer.role_at_least(aura.visibility) {
        return false;
    }
    if !aura.fill.is_visible() && !aura.stroke.is_visible() {
        return false;
    }
    if aura.hover_only && !token.state.hovered {
        return false;
    }
    if aura.owner_only && !token.state.observer {
        return false;
    }
    if aura.respect_fog && !token.state.visible {
        return false;
    }
    true
}

/// A hidden token still drawn for a privileged viewer renders at half
/// opacity.
#[must_use]
pub fn effective_opacity(opacity: f32, token_hidden: bool) -> f32 {
    if token_hidden {
        opacity / 2.0
    } else {
        opacity
    }
}

fn render_aura<S, G>(
    sink: &mut S,
    oracle: &G,
    aura: &Aura,
    token: &TokenSnapshot,
    grid: &GridContext,
) where
    S: DrawSink + ?Sized,
    G: GridOracle + ?Sized,
{
    let hidden = token.state.hidden;

    if aura.fill.is_visible() {
        sink.begin_fill(aura.fill.colour, effective_opacity(aura.fill.opacity, hidden));
        draw_shape(sink, oracle, aura, token, grid, true);
        sink.end_fill();
    }

    if aura.stroke.is_visible() {
        sink.set_stroke_style(
            aura.stroke.weight,
            aura.stroke.colour,
            effective_opacity(aura.stroke.opacity, hidden),
        );
        draw_shape(sink, oracle, aura, token, grid, aura.stroke.close);
        sink.set_stroke_style(0.0, crate::colour::Colour::BLACK, 0.0);
    }
}

fn draw_shape<S, G>(
    sink: &mut S,
    oracle: &G,
    aura: &Aura,
    token: &TokenSnapshot,
    grid: &GridContext,
    close: bool,
) where
    S: DrawSink + ?Sized,
    G: GridOracle + ?Sized,
{
    match ShapeMode::select(aura, grid) {
        ShapeMode::Euclidean => euclidean::draw(sink, aura, &token.shape, grid, close),
        ShapeMode::Grid => crate::grid::draw(sink, oracle, aura, &token.shape, grid, close),
        ShapeMode::Square => square::draw(sink, aura, &token.shape, grid, close),
    }
}
