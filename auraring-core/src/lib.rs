//! # auraring-core
//!
//! Geometry and render policy for token aura overlays on a 2-D grid scene:
//! converting an aura descriptor (radius, angle, direction, shape mode) plus
//! a token's size, rotation, and grid context into a renderable path, and
//! deciding per viewer whether and how translucently to draw it. The host
//! platform owns documents, persistence, settings UI, and the scene graph;
//! it reaches this crate through the narrow seams in [`host`].

pub mod aura;
pub mod collection;
pub mod colour;
pub mod directory;
pub mod euclidean;
pub mod geometry;
pub mod grid;
pub mod host;
pub mod modifier;
pub mod render;
pub mod square;

#[cfg(test)]
pub(crate) mod test_support;
