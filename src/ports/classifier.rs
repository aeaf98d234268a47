//! Classifier port: Trait for the trained binary-classifier artifact.
//!
//! This trait abstracts the model artifact from the application logic.

use crate::domain::{EncodedVector, RiskLabel};

/// Trait for the pre-trained binary classifier.
///
/// `predict` is a pure function of its input: implementations hold
/// read-only parameters loaded once at startup, and identical vectors
/// always produce identical labels. No probability or confidence score is
/// exposed through this port.
pub trait Classifier: Send + Sync {
    /// Classify a fully encoded, fully scaled feature vector.
    ///
    /// The vector must already be in the fixed training column order with
    /// the numeric subset rescaled; the classifier does not re-check or
    /// re-order fields.
    fn predict(&self, vector: &EncodedVector) -> RiskLabel;
}
