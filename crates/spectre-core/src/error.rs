//! Error types for the tiling engine.

use thiserror::Error;

/// Result type for tiling operations.
pub type Result<T> = std::result::Result<T, TilingError>;

/// Errors that can occur while building, growing or querying a tiling.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TilingError {
    /// Matrix inversion of a transform with (near) zero determinant.
    #[error("transform is singular (determinant {det})")]
    SingularTransform { det: f64 },

    /// A boundary edge has zero length, so no curve can be derived from it.
    #[error("degenerate geometry: boundary edge {edge} has zero length")]
    DegenerateGeometry { edge: usize },

    /// A role the operation needs is absent from the tile system.
    #[error("tile system has no {0} role")]
    MissingRole(&'static str),

    /// Role label that is not one of the canonical roles.
    #[error("unknown role: {0}")]
    UnknownRole(String),

    /// Base shape name that is not recognized.
    #[error("unknown base shape: {0}")]
    UnknownShape(String),

    /// A generation index past the last grown generation.
    #[error("generation {requested} not available ({available} grown)")]
    GenerationOutOfRange { requested: usize, available: usize },

    /// Growing past the configured generation cap.
    #[error("generation limit of {limit} reached")]
    GenerationLimit { limit: usize },
}
