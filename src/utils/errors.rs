use std::io;
use thiserror::Error;

/// Errors raised by the configuration and persistence surface.
///
/// The per-tick pipeline never produces these: estimation and control fall
/// back to held values instead.
#[derive(Error, Debug)]
pub enum AugmentError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),

    #[error("Parameter '{name}' is not finite: {value}")]
    NonFinite { name: String, value: f64 },

    #[error("Parameter '{name}' = {value} outside [{min}, {max}]")]
    OutOfBounds {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },
}
