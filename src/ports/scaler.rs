//! Scaler port: Trait for the fitted numeric-feature transform.

use crate::domain::NUMERIC_COUNT;

/// Trait for the fitted min-max transform applied to the numeric subset
/// {Age, RestingBP, Cholesterol, MaxHR, Oldpeak} before inference.
///
/// Outputs are typically in [0,1], but only for inputs inside the range
/// observed at fit time. The form permits values outside that range
/// (e.g. Cholesterol 600); those scale to values outside [0,1], which the
/// classifier accepts as extrapolation.
pub trait FeatureScaler: Send + Sync {
    /// Rescale the numeric subvector, in fitted order
    /// [Age, RestingBP, Cholesterol, MaxHR, Oldpeak].
    fn transform(&self, numeric: [f64; NUMERIC_COUNT]) -> [f64; NUMERIC_COUNT];
}
