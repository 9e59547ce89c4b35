//! spectre-core: aperiodic monotile tilings by hierarchical substitution.
//!
//! Base shapes build a generation-0 [`TileSystem`]; [`substitute`] grows it one
//! generation at a time; [`bake`] flattens a role into absolute leaf instances that
//! renderers, hit testing and coloring consume.

mod bake;
mod error;
mod geometry;
mod hidden;
mod hit_test;
mod overlap;
mod shapes;
mod substitution;
mod tile;
mod tiling;

pub use bake::*;
pub use error::{Result, TilingError};
pub use geometry::*;
pub use hidden::*;
pub use hit_test::*;
pub use overlap::*;
pub use shapes::*;
pub use substitution::*;
pub use tile::*;
pub use tiling::*;
