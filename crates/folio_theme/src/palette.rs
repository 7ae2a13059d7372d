//! Accent palette catalog

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use folio_core::FolioError;
use serde::{Deserialize, Serialize};

/// Selectable accent colors.
///
/// One canonical palette serves every picker surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccentColor {
    #[default]
    Blue,
    Orange,
    Green,
    Purple,
    Pink,
    NeonBlue,
    NeonGreen,
}

impl AccentColor {
    /// Stable id for persistence, markup and `data-color-theme`.
    pub fn id(self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Orange => "orange",
            Self::Green => "green",
            Self::Purple => "purple",
            Self::Pink => "pink",
            Self::NeonBlue => "neon-blue",
            Self::NeonGreen => "neon-green",
        }
    }

    /// User-facing display name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Blue => "Blue",
            Self::Orange => "Orange",
            Self::Green => "Green",
            Self::Purple => "Purple",
            Self::Pink => "Pink",
            Self::NeonBlue => "Neon Blue",
            Self::NeonGreen => "Neon Green",
        }
    }

    /// Full palette, in picker order.
    pub fn all() -> &'static [AccentColor] {
        const PALETTE: [AccentColor; 7] = [
            AccentColor::Blue,
            AccentColor::Orange,
            AccentColor::Green,
            AccentColor::Purple,
            AccentColor::Pink,
            AccentColor::NeonBlue,
            AccentColor::NeonGreen,
        ];
        &PALETTE
    }
}

impl Display for AccentColor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for AccentColor {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|color| color.id() == s)
            .ok_or_else(|| FolioError::invalid("accent color", s))
    }
}
