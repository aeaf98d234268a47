//! Adapters layer: Concrete implementations of ports.
//!
//! These modules load and wrap the serialized training artifacts:
//! - `linear`: logistic-regression classifier from `model.json`
//! - `minmax`: fitted min-max scaler from `scaler.json`
//! - `sanitize`: PII filtering for logs

pub mod linear;
pub mod minmax;
pub mod sanitize;

use std::path::PathBuf;

/// Error loading or validating a serialized training artifact.
///
/// Any of these at startup is fatal: the process cannot screen patients
/// without both artifacts.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("failed to read artifact {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid artifact format in {path:?}: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("artifact contract violation: {0}")]
    Contract(String),
}
