//! Errors raised by tree construction, geometry queries and output.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TreeError {
    #[error("complexity must be at least 1, got {0}")]
    InvalidComplexity(usize),

    #[error("branch length must be positive and finite, got {0}")]
    NonPositiveLength(f64),

    #[error("scale must be finite, got {0}")]
    InvalidScale(f64),

    #[error("sigma must be finite and non-negative, got (length: {length}, angle: {angle})")]
    InvalidSigma { length: f64, angle: f64 },

    #[error("domain error: {0}")]
    Domain(String),

    #[error("invalid tree config: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TreeError>;
