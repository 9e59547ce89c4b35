use std::collections::HashSet;

use palette::{FromColor, Hsl, Mix, Srgb};
use tracing::warn;

use crate::error::{ColorError, Result};

/// Used when a caller supplies an empty palette.
pub const FALLBACK_COLOR: &str = "#cccccc";

/// Built-in palette for callers without one.
pub const DEFAULT_PALETTE: [&str; 6] = ["#e9c46a", "#2a9d8f", "#e76f51", "#264653", "#f4a261", "#8ab17d"];

/// Hue step for colors synthesized past the end of a palette.
const GOLDEN_ANGLE_DEG: f32 = 137.507_77;
/// Saturation of synthesized slot colors.
const SYNTH_SATURATION: f32 = 0.65;
/// Lightness levels cycled through by synthesized slot colors.
const SYNTH_LIGHTNESS: [f32; 4] = [0.5, 0.35, 0.65, 0.8];

/// Parses any CSS color (`#rgb`, `#rrggbb`, `rgb(..)`, named) into sRGB floats.
pub fn parse_color(s: &str) -> Result<Srgb<f32>> {
    let c = csscolorparser::parse(s.trim()).map_err(|_| ColorError::InvalidColor(s.to_string()))?;
    Ok(Srgb::new(c.r as f32, c.g as f32, c.b as f32))
}

/// `#rrggbb`, lowercase.
pub fn to_hex(color: Srgb<f32>) -> String {
    let c: Srgb<u8> = color.into_format();
    format!("#{:02x}{:02x}{:02x}", c.red, c.green, c.blue)
}

/// Linear interpolation in sRGB space: `a` at t = 0, `b` at t = 1.
pub fn mix(a: Srgb<f32>, b: Srgb<f32>, t: f32) -> Srgb<f32> {
    a.mix(b, t.clamp(0.0, 1.0))
}

/// An ordered, never-empty list of parsed colors.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorPalette {
    colors: Vec<Srgb<f32>>,
}

impl ColorPalette {
    /// Parses `entries`; an empty list becomes the single fallback color.
    pub fn parse<S: AsRef<str>>(entries: &[S]) -> Result<Self> {
        if entries.is_empty() {
            warn!(fallback = FALLBACK_COLOR, "empty palette; using fallback color");
            return Ok(Self {
                colors: vec![parse_color(FALLBACK_COLOR)?],
            });
        }
        let colors = entries.iter().map(|e| parse_color(e.as_ref())).collect::<Result<Vec<_>>>()?;
        Ok(Self { colors })
    }

    pub fn default_palette() -> Self {
        Self {
            colors: DEFAULT_PALETTE.iter().filter_map(|c| parse_color(c).ok()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color at `index`, wrapping around the palette.
    pub fn cyclic(&self, index: usize) -> Srgb<f32> {
        self.colors[index % self.colors.len()]
    }

    /// Number of entries with distinct `#rrggbb` values.
    pub fn distinct_len(&self) -> usize {
        self.colors.iter().map(|c| to_hex(*c)).collect::<HashSet<_>>().len()
    }

    /// `count` colors for graph-coloring slots, pairwise distinct as `#rrggbb`.
    ///
    /// Distinct palette entries come first in palette order. Further slots are
    /// synthesized by stepping hue by the golden angle and cycling lightness; any
    /// candidate whose hex is already taken is skipped.
    pub fn slot_colors(&self, count: usize) -> Vec<Srgb<f32>> {
        let mut taken = HashSet::with_capacity(count);
        let mut out = Vec::with_capacity(count);
        for c in &self.colors {
            if out.len() == count {
                return out;
            }
            if taken.insert(to_hex(*c)) {
                out.push(*c);
            }
        }
        let mut step = 0usize;
        while out.len() < count {
            step += 1;
            let hue = (GOLDEN_ANGLE_DEG * step as f32).rem_euclid(360.0);
            let lightness = SYNTH_LIGHTNESS[step % SYNTH_LIGHTNESS.len()];
            let hsl: Hsl = Hsl::new(hue, SYNTH_SATURATION, lightness);
            let candidate: Srgb<f32> = Srgb::from_color(hsl);
            if taken.insert(to_hex(candidate)) {
                out.push(candidate);
            }
        }
        out
    }

    pub fn colors(&self) -> &[Srgb<f32>] {
        &self.colors
    }
}
