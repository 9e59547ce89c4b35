use thiserror::Error;

pub type Result<T> = std::result::Result<T, ColorError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ColorError {
    /// A palette entry, gradient stop or override that is not a CSS color.
    #[error("invalid color '{0}'")]
    InvalidColor(String),

    /// Orientation override key that is not a whole number of degrees.
    #[error("invalid orientation angle '{0}'")]
    InvalidAngle(String),

    /// Coloring mode name that is not recognized.
    #[error("unknown coloring mode: {0}")]
    UnknownMode(String),
}
