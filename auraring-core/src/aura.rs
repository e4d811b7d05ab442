//! # Auras
//!
//! The persisted descriptor of one ring/cone overlay, its style sub-records,
//! and the closed vocabularies (roles, shape modes) the render policy
//! dispatches on.

use crate::colour::Colour;
use crate::host::GridContext;

/// Stable identity of an aura within one token's collection. Small by
/// design: ids are allocated from `0..100` by the collection.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct AuraId(pub u8);

impl std::fmt::Display for AuraId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// User role tiers, lowest to highest. Doubles as an aura's visibility
/// requirement: a viewer sees the aura iff their role is at least the
/// aura's tier, and `None` hides it from everyone.
#[derive(
    Copy,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Debug,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
    serde::Serialize,
    serde::Deserialize,
)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    None,
    Player,
    Trusted,
    Assistant,
    Gamemaster,
}

impl Default for Role {
    fn default() -> Self {
        Self::Player
    }
}

/// Which geometry builder renders an aura. Selected once per aura per
/// render and dispatched as a plain function table.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, strum::Display, strum::EnumIter)]
pub enum ShapeMode {
    Euclidean,
    Grid,
    Square,
}

impl ShapeMode {
    /// Grid shapes need both the per-aura flag and the scene-wide snapping
    /// setting; the experimental square mode ranks below that.
    #[must_use]
    pub fn select(aura: &Aura, grid: &GridContext) -> Self {
        if aura.use_grid_shapes && grid.snap_to_grid {
            Self::Grid
        } else if aura.is_square {
            Self::Square
        } else {
            Self::Euclidean
        }
    }
}

#[derive(Clone, Copy, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
pub struct FillStyle {
    pub colour: Colour,
    /// `0` disables the fill entirely.
    pub opacity: f32,
}

impl FillStyle {
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }
}

impl Default for FillStyle {
    fn default() -> Self {
        Self {
            colour: Colour::BLACK,
            opacity: 0.0,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
pub struct StrokeStyle {
    pub colour: Colour,
    /// `0` disables the stroke, as does a zero weight.
    pub opacity: f32,
    /// Line width in pixels.
    pub weight: f32,
    /// Whether a cone's outline includes the two radial edges back to the
    /// token centre, or stays an open arc.
    pub close: bool,
}

impl StrokeStyle {
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0 && self.weight > 0.0
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            colour: Colour::RED,
            opacity: 0.75,
            weight: 4.0,
            close: false,
        }
    }
}

/// One configured overlay ring attached to a token.
///
/// `id` is `None` only for detached copies (directory templates, clipboard
/// blanks); the collection assigns an id when the aura is attached.
#[derive(Clone, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
pub struct Aura {
    pub id: Option<AuraId>,
    pub name: String,
    /// Distance in scene units from the token's edge. Zero or below never
    /// renders.
    pub radius: f32,
    /// Width of the arc in degrees, `5..=360`; `360` is a full ring.
    pub angle: f32,
    /// Offset in degrees from the token's forward facing, `-180..=180`;
    /// rotates with the token.
    pub direction: f32,
    pub fill: FillStyle,
    pub stroke: StrokeStyle,
    pub visibility: Role,
    pub hide: bool,
    pub hover_only: bool,
    pub owner_only: bool,
    pub respect_fog: bool,
    pub use_grid_shapes: bool,
    pub is_square: bool,
}

impl Default for Aura {
    fn default() -> Self {
        Self {
            id: None,
            name: "Aura".into(),
            radius: 20.0,
            angle: 360.0,
            direction: 0.0,
            fill: FillStyle::default(),
            stroke: StrokeStyle::default(),
            visibility: Role::Player,
            hide: false,
            hover_only: false,
            owner_only: false,
            respect_fog: true,
            use_grid_shapes: false,
            is_square: false,
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum AuraError {
    #[error("name is empty")]
    EmptyName,
    #[error("radius {0} is not finite")]
    Radius(f32),
    #[error("angle {0} outside 5..=360")]
    Angle(f32),
    #[error("direction {0} outside -180..=180")]
    Direction(f32),
    #[error("opacity {0} outside 0..=1")]
    Opacity(f32),
    #[error("stroke weight {0} is negative")]
    Weight(f32),
}

impl Aura {
    /// Whether the full 360° ring is requested rather than a cone.
    #[must_use]
    pub fn is_full_circle(&self) -> bool {
        self.angle >= 360.0
    }

    /// Schema check. Invalid records are dropped (and logged) by the render
    /// policy rather than aborting their siblings.
    pub fn validate(&self) -> Result<(), AuraError> {
        if self.name.is_empty() {
            return Err(AuraError::EmptyName);
        }
        if !self.radius.is_finite() {
            return Err(AuraError::Radius(self.radius));
        }
        if !(5.0..=360.0).contains(&self.angle) {
            return Err(AuraError::Angle(self.angle));
        }
        if !(-180.0..=180.0).contains(&self.direction) {
            return Err(AuraError::Direction(self.direction));
        }
        for opacity in [self.fill.opacity, self.stroke.opacity] {
            if !(0.0..=1.0).contains(&opacity) {
                return Err(AuraError::Opacity(opacity));
            }
        }
        if self.stroke.weight < 0.0 {
            return Err(AuraError::Weight(self.stroke.weight));
        }
        Ok(())
    }

    /// A detached copy suitable for templates: same settings, no identity.
    #[must_use]
    pub fn detached(&self) -> Self {
        Self {
            id: None,
            ..self.clone()
        }
    }
}
