//! Color assignment over baked tile instances.
//!
//! [`compute_colors`] is the entry point: it returns `None` for the default mode
//! (the renderer colors by label) and a path → `#rrggbb` map otherwise.

mod adjacency;
mod color;
mod error;
mod four_color;
mod options;
mod order;
mod orientation;
mod random;

use std::collections::HashMap;

use spectre_core::BakedInstance;
use tracing::debug;

pub use adjacency::*;
pub use color::*;
pub use error::{ColorError, Result};
pub use four_color::*;
pub use options::*;
pub use order::*;
pub use orientation::*;
pub use random::*;

/// Path → color override map; `None` leaves coloring to the renderer.
pub type ColorAssignment = Option<HashMap<String, String>>;

/// Colors `instances` under `options.mode`. Deterministic for identical inputs.
pub fn compute_colors(instances: &[BakedInstance], options: &ColoringOptions) -> Result<ColorAssignment> {
    let palette = || ColorPalette::parse(&options.palette);
    let colors = match options.mode {
        ColoringMode::Default => return Ok(None),
        ColoringMode::Random => random_colors(instances, &palette()?, options.seed),
        ColoringMode::Orientation => orientation_colors(instances, &palette()?, &options.orientation_overrides)?,
        ColoringMode::OrientationGradient => gradient_colors(instances, &palette()?, &options.stops)?,
        ColoringMode::FourColor => four_colors(instances, &palette()?, options.seed),
    };
    debug!(mode = %options.mode, instances = instances.len(), colors = colors.len(), "colors computed");
    Ok(Some(colors))
}
