//! Presentational tiers for display percentages.

use serde::{Deserialize, Serialize};

/// Visual tier a display percentage maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Badge {
    /// No certification (0 or any unrecognised value).
    None,
    /// 25%.
    Quarter,
    /// 50%.
    Half,
    /// 75%.
    ThreeQuarters,
    /// 90%.
    Ninety,
    /// 100%.
    Full,
}

impl Badge {
    /// Maps a display percentage to its tier.
    #[must_use]
    pub fn for_percentage(percentage: u32) -> Self {
        match percentage {
            25 => Badge::Quarter,
            50 => Badge::Half,
            75 => Badge::ThreeQuarters,
            90 => Badge::Ninety,
            100 => Badge::Full,
            _ => Badge::None,
        }
    }

    /// Returns the CSS class used by the matrix views.
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Badge::None => "cert-none",
            Badge::Quarter => "cert-25",
            Badge::Half => "cert-50",
            Badge::ThreeQuarters => "cert-75",
            Badge::Ninety => "cert-90",
            Badge::Full => "cert-100",
        }
    }

    /// Returns a short text marker for terminal output.
    #[must_use]
    pub fn glyph(self) -> &'static str {
        match self {
            Badge::None => "-",
            Badge::Quarter => "25",
            Badge::Half => "50",
            Badge::ThreeQuarters => "75",
            Badge::Ninety => "90",
            Badge::Full => "100",
        }
    }
}
