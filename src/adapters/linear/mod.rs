//! Linear adapter: the trained logistic-regression artifact.
//!
//! The artifact is a JSON export of the fitted sklearn estimator
//! (`model.json`). It is loaded once at startup, validated against the
//! encoding contract, and treated as read-only for the process lifetime.
//!
//! `predict` follows sklearn semantics: positive class iff the decision
//! value w·x + b is positive. The underlying probability stays internal;
//! callers only ever see the binary label.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::adapters::ArtifactError;
use crate::domain::{EncodedVector, RiskLabel, FEATURE_COUNT, FEATURE_NAMES};
use crate::ports::Classifier;

/// Model parameters exported by the Python training pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedLinearModel {
    pub model_type: String,
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

/// Logistic-regression classifier over the fixed 11-column contract.
#[derive(Debug)]
pub struct LinearModel {
    coefficients: [f64; FEATURE_COUNT],
    intercept: f64,
}

impl LinearModel {
    /// Load and validate the model artifact.
    ///
    /// # Errors
    /// Returns [`ArtifactError`] if the file cannot be read, parsed, or
    /// violates the encoding contract.
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let content = std::fs::read_to_string(path).map_err(|source| ArtifactError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let exported: ExportedLinearModel =
            serde_json::from_str(&content).map_err(|source| ArtifactError::Format {
                path: path.to_path_buf(),
                source,
            })?;

        let model = Self::from_exported(&exported)?;

        tracing::info!(
            "Loaded classifier from {:?} ({}, {} features)",
            path,
            exported.model_type,
            FEATURE_COUNT
        );

        Ok(model)
    }

    /// Validate an exported model against the encoding contract.
    ///
    /// # Errors
    /// Returns [`ArtifactError::Contract`] on any mismatch with the fixed
    /// column order or on non-finite parameters.
    pub fn from_exported(exported: &ExportedLinearModel) -> Result<Self, ArtifactError> {
        if exported.model_type != "logistic_regression" {
            return Err(ArtifactError::Contract(format!(
                "unsupported model_type {:?} (expected \"logistic_regression\")",
                exported.model_type
            )));
        }

        if exported.feature_names.len() != FEATURE_COUNT
            || exported.coefficients.len() != FEATURE_COUNT
        {
            return Err(ArtifactError::Contract(format!(
                "expected {} features, artifact has {} names / {} coefficients",
                FEATURE_COUNT,
                exported.feature_names.len(),
                exported.coefficients.len()
            )));
        }

        // The column order is fixed by training; a renamed or reordered
        // artifact must not load.
        for (i, expected) in FEATURE_NAMES.iter().enumerate() {
            if exported.feature_names[i] != *expected {
                return Err(ArtifactError::Contract(format!(
                    "feature {} is {:?}, contract expects {:?}",
                    i, exported.feature_names[i], expected
                )));
            }
        }

        if !exported.intercept.is_finite()
            || exported.coefficients.iter().any(|c| !c.is_finite())
        {
            return Err(ArtifactError::Contract(
                "model parameters must be finite".into(),
            ));
        }

        let mut coefficients = [0.0; FEATURE_COUNT];
        coefficients.copy_from_slice(&exported.coefficients);

        Ok(Self {
            coefficients,
            intercept: exported.intercept,
        })
    }

    /// Linear decision value: w·x + b.
    fn decision(&self, vector: &EncodedVector) -> f64 {
        self.coefficients
            .iter()
            .zip(vector.as_slice())
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept
    }

    fn sigmoid(x: f64) -> f64 {
        1.0 / (1.0 + (-x).exp())
    }
}

impl Classifier for LinearModel {
    fn predict(&self, vector: &EncodedVector) -> RiskLabel {
        let decision = self.decision(vector);
        let probability = Self::sigmoid(decision);

        tracing::debug!(
            "classifier decision={:.4}, probability={:.4}",
            decision,
            probability
        );

        RiskLabel::from_class(u8::from(decision > 0.0))
    }
}
