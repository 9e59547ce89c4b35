use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ColorError;

/// How colors are assigned to baked instances.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColoringMode {
    /// No override; the renderer colors by leaf label.
    #[default]
    Default,
    Random,
    Orientation,
    OrientationGradient,
    /// Proper coloring of the edge-adjacency graph, up to six colors.
    FourColor,
}

impl ColoringMode {
    pub const ALL: [ColoringMode; 5] = [
        ColoringMode::Default,
        ColoringMode::Random,
        ColoringMode::Orientation,
        ColoringMode::OrientationGradient,
        ColoringMode::FourColor,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ColoringMode::Default => "default",
            ColoringMode::Random => "random",
            ColoringMode::Orientation => "orientation",
            ColoringMode::OrientationGradient => "orientation-gradient",
            ColoringMode::FourColor => "four-color",
        }
    }
}

impl fmt::Display for ColoringMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColoringMode {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ColoringMode::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ColorError::UnknownMode(s.to_string()))
    }
}

/// A color pinned to an angle on the 360° gradient ring.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Degrees; any value, taken modulo 360.
    pub angle: f64,
    pub color: String,
}

/// Everything a coloring pass needs besides the instances.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColoringOptions {
    pub mode: ColoringMode,
    /// CSS colors; an empty list falls back to a single color.
    pub palette: Vec<String>,
    pub seed: u64,
    /// Gradient stops; evenly spaced palette entries when empty.
    pub stops: Vec<GradientStop>,
    /// Whole-degree rotation (as a string key, `"30"`) → color, checked before the cyclic
    /// palette in orientation mode.
    pub orientation_overrides: BTreeMap<String, String>,
}

impl Default for ColoringOptions {
    fn default() -> Self {
        Self {
            mode: ColoringMode::Default,
            palette: crate::color::DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            seed: 0,
            stops: Vec::new(),
            orientation_overrides: BTreeMap::new(),
        }
    }
}

impl ColoringOptions {
    pub fn with_mode(mut self, mode: ColoringMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_palette<S: Into<String>>(mut self, palette: impl IntoIterator<Item = S>) -> Self {
        self.palette = palette.into_iter().map(Into::into).collect();
        self
    }
}
