//! # Cardioscreen
//!
//! Heart-attack risk screening through a terminal form.
//!
//! This crate provides:
//! - A deterministic encoding pipeline from form labels to the fixed
//!   feature vector the trained classifier expects
//! - Plaintext inference against serialized model/scaler artifacts
//! - A terminal UI for single-operator, local-only use
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core business types (PatientRecord, encoding contract, RiskLabel)
//! - `ports`: Trait definitions for the two external artifacts
//! - `adapters`: Concrete implementations (model.json, scaler.json, log sanitizing)
//! - `application`: The screening use case orchestrating domain and ports
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{Assessment, PatientRecord, RiskLabel};

/// Result type for Cardioscreen operations
pub type Result<T> = std::result::Result<T, CardioscreenError>;

/// Main error type for Cardioscreen
#[derive(Debug, thiserror::Error)]
pub enum CardioscreenError {
    #[error("Artifact error: {0}")]
    Artifact(#[from] adapters::ArtifactError),

    #[error("Invalid patient data: {0}")]
    Validation(String),
}
