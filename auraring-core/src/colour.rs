//! `#rrggbb` colour values, stored exactly as the host persists them.

/// An opaque RGB colour. Opacity is carried separately by the style records,
/// never packed in here.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const RED: Self = Self::rgb(0xff, 0, 0);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for Colour {
    fn default() -> Self {
        Self::BLACK
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColourParseError {
    #[error("expected \"#rrggbb\"")]
    BadFormat,
    #[error("invalid hex digit")]
    BadDigit,
}

impl std::str::FromStr for Colour {
    type Err = ColourParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').ok_or(ColourParseError::BadFormat)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(ColourParseError::BadFormat);
        }
        let channel = |range| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| ColourParseError::BadDigit)
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }
}

impl std::fmt::Display for Colour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

// Persisted as the hex string, matching the flag storage format.
impl serde::Serialize for Colour {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Colour {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = <std::borrow::Cow<'_, str>>::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
