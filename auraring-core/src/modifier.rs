//! # Modifiers
//!
//! The attribute-override pass: externally computed per-field changes,
//! indexed by aura name, applied as a pure function just before policy
//! evaluation. The core never walks the host's actor object graphs — it
//! consumes either a ready-made index or raw key/value/mode change triples
//! in the `TokenAuraRing.<name>.<field>` convention.

use std::str::FromStr;

use crate::aura::{Aura, Role};

/// Effect-change key prefix claimed by this module in the host's change
/// records.
pub const CHANGE_KEY_PREFIX: &str = "TokenAuraRing";

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, strum::Display, strum::EnumIter)]
pub enum ModifierMode {
    Add,
    Upgrade,
    Downgrade,
    Multiply,
    Override,
    Custom,
}

impl ModifierMode {
    /// Map the host's numeric active-effect mode constants.
    #[must_use]
    pub fn from_host(mode: u8) -> Option<Self> {
        match mode {
            0 => Some(Self::Custom),
            1 => Some(Self::Multiply),
            2 => Some(Self::Add),
            3 => Some(Self::Downgrade),
            4 => Some(Self::Upgrade),
            5 => Some(Self::Override),
            _ => None,
        }
    }
}

/// The modifiable fields of an [`Aura`], named exactly as persisted.
/// `id` and `name` are deliberately absent: identity is never modifiable.
#[derive(
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Debug,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum AuraField {
    Radius,
    Angle,
    Direction,
    FillColour,
    FillOpacity,
    StrokeColour,
    StrokeOpacity,
    StrokeWeight,
    StrokeClose,
    Hide,
    HoverOnly,
    OwnerOnly,
    RespectFog,
    UseGridShapes,
    IsSquare,
    Visibility,
}

/// A typed change value. Host change records arrive as strings; see
/// [`AuraField::cast`].
#[derive(Clone, PartialEq, Debug)]
pub enum FieldValue {
    Number(f32),
    Flag(bool),
    Text(String),
}

impl AuraField {
    fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::Radius
                | Self::Angle
                | Self::Direction
                | Self::FillOpacity
                | Self::StrokeOpacity
                | Self::StrokeWeight
        )
    }

    fn is_flag(self) -> bool {
        matches!(
            self,
            Self::StrokeClose
                | Self::Hide
                | Self::HoverOnly
                | Self::OwnerOnly
                | Self::RespectFog
                | Self::UseGridShapes
                | Self::IsSquare
        )
    }

    /// Coerce a raw host string to this field's proper type. Unparseable
    /// numbers become NaN, which schema validation rejects downstream.
    #[must_use]
    pub fn cast(self, raw: &str) -> FieldValue {
        if self.is_flag() {
            FieldValue::Flag(raw == "true")
        } else if self.is_numeric() {
            FieldValue::Number(raw.trim().parse().unwrap_or(f32::NAN))
        } else {
            FieldValue::Text(raw.to_owned())
        }
    }
}

/// Replace one field outright. Returns false when the value's type does not
/// fit the field (the change is then ignored by the caller).
pub fn set_field(aura: &mut Aura, field: AuraField, value: &FieldValue) -> bool {
    match (field, value) {
        (AuraField::Radius, FieldValue::Number(n)) => aura.radius = *n,
        (AuraField::Angle, FieldValue::Number(n)) => aura.angle = *n,
        (AuraField::Direction, FieldValue::Number(n)) => aura.direction = *n,
        (AuraField::FillOpacity, FieldValue::Number(n)) => aura.fill.opacity = *n,
        (AuraField::StrokeOpacity, FieldValue::Number(n)) => aura.stroke.opacity = *n,
        (AuraField::StrokeWeight, FieldValue::Number(n)) => aura.stroke.weight = *n,
        (AuraField::StrokeClose, FieldValue::Flag(flag)) => aura.stroke.close = *flag,
        (AuraField::Hide, FieldValue::Flag(flag)) => aura.hide = *flag,
        (AuraField::HoverOnly, FieldValue::Flag(flag)) => aura.hover_only = *flag,
        (AuraField::OwnerOnly, FieldValue::Flag(flag)) => aura.owner_only = *flag,
        (AuraField::RespectFog, FieldValue::Flag(flag)) => aura.respect_fog = *flag,
        (AuraField::UseGridShapes, FieldValue::Flag(flag)) => aura.use_grid_shapes = *flag,
        (AuraField::IsSquare, FieldValue::Flag(flag)) => aura.is_square = *flag,
        (AuraField::FillColour, FieldValue::Text(text)) => match text.parse() {
            Ok(colour) => aura.fill.colour = colour,
            Err(_) => return false,
        },
        (AuraField::StrokeColour, FieldValue::Text(text)) => match text.parse() {
            Ok(colour) => aura.stroke.colour = colour,
            Err(_) => return false,
        },
        (AuraField::Visibility, FieldValue::Text(text)) => match Role::from_str(text) {
            Ok(role) => aura.visibility = role,
            Err(_) => return false,
        },
        _ => return false,
    }
    true
}

fn numeric_field_mut(aura: &mut Aura, field: AuraField) -> Option<&mut f32> {
    match field {
        AuraField::Radius => Some(&mut aura.radius),
        AuraField::Angle => Some(&mut aura.angle),
        AuraField::Direction => Some(&mut aura.direction),
        AuraField::FillOpacity => Some(&mut aura.fill.opacity),
        AuraField::StrokeOpacity => Some(&mut aura.stroke.opacity),
        AuraField::StrokeWeight => Some(&mut aura.stroke.weight),
        _ => None,
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct Change {
    pub mode: ModifierMode,
    pub value: FieldValue,
}

pub type FieldChanges = hashbrown::HashMap<AuraField, Change>;

/// All pending changes for one render, keyed by aura name. Transient:
/// rebuilt by the host on every refresh, never stored.
#[derive(Clone, Debug, Default)]
pub struct ModifierIndex {
    by_name: hashbrown::HashMap<String, FieldChanges>,
}

impl ModifierIndex {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    #[must_use]
    pub fn changes_for(&self, aura_name: &str) -> Option<&FieldChanges> {
        self.by_name.get(aura_name)
    }

    pub fn insert(&mut self, aura_name: &str, field: AuraField, change: Change) {
        self.by_name
            .entry_ref(aura_name)
            .or_default()
            .insert(field, change);
    }

    /// Accept one raw host change record. Keys that do not match
    /// `TokenAuraRing.<name>.<field>`, or that target an unknown field
    /// (including `id` and `name`), are ignored.
    pub fn insert_change(&mut self, key: &str, raw_value: &str, mode: ModifierMode) {
        let mut parts = key.split('.');
        if parts.next() != Some(CHANGE_KEY_PREFIX) {
            return;
        }
        let (Some(aura_name), Some(field), None) = (parts.next(), parts.next(), parts.next())
        else {
            return;
        };
        let Ok(field) = AuraField::from_str(field) else {
            return;
        };
        self.insert(
            aura_name,
            field,
            Change {
                mode,
                value: field.cast(raw_value),
            },
        );
    }

    /// Produce a modified copy of `aura`. The stored aura is never mutated;
    /// unmodified fields pass through unchanged. Changes whose value type
    /// does not fit the field are skipped.
    #[must_use]
    pub fn apply(&self, aura: &Aura) -> Aura {
        let Some(changes) = self.changes_for(&aura.name) else {
            return aura.clone();
        };

        let mut modified = aura.clone();
        for (&field, change) in changes {
            match change.mode {
                ModifierMode::Override | ModifierMode::Custom => {
                    set_field(&mut modified, field, &change.value);
                }
                ModifierMode::Add | ModifierMode::Upgrade => {
                    if let (Some(slot), FieldValue::Number(n)) =
                        (numeric_field_mut(&mut modified, field), &change.value)
                    {
                        *slot += n;
                    }
                }
                ModifierMode::Downgrade => {
                    if let (Some(slot), FieldValue::Number(n)) =
                        (numeric_field_mut(&mut modified, field), &change.value)
                    {
                        *slot -= n;
                    }
                }
                ModifierMode::Multiply => {
                    if let (Some(slot), FieldValue::Number(n)) =
                        (numeric_field_mut(&mut modified, field), &change.value)
                    {
                        *slot *= n;
                    }
                }
            }
        }
        modified
    }
}
