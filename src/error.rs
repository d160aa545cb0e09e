use thiserror::Error;

/// Failures that abort a render.
///
/// All of these are programmer or configuration errors; a valid configuration
/// never produces one, so nothing retries on them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("pixel ({x}, {y}) is outside of a {width}x{height} buffer")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[error("invalid dimension: {0}")]
    InvalidDimension(String),

    #[error("display surface error: {0}")]
    Surface(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("invalid config: {0}")]
    Invalid(#[from] RenderError),
}
