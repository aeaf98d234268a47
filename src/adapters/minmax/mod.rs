//! Min-max adapter: the fitted numeric scaler artifact.
//!
//! The artifact (`scaler.json`) is a JSON export of the sklearn
//! `MinMaxScaler` fitted on the five numeric columns at training time.
//! The transform maps each feature's observed training range onto
//! `feature_range` (normally [0,1]); inputs outside the observed range
//! extrapolate beyond it, which the classifier accepts.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::adapters::ArtifactError;
use crate::domain::{NUMERIC_COUNT, NUMERIC_FEATURE_NAMES};
use crate::ports::FeatureScaler;

/// Scaler parameters exported by the Python training pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedMinMaxScaler {
    pub feature_names: Vec<String>,
    pub data_min: Vec<f64>,
    pub data_max: Vec<f64>,
    pub feature_range: [f64; 2],
}

/// Fitted min-max transform over the numeric subvector.
#[derive(Debug)]
pub struct MinMaxScaler {
    // Precomputed sklearn form: x_scaled = x * scale + offset.
    scale: [f64; NUMERIC_COUNT],
    offset: [f64; NUMERIC_COUNT],
}

impl MinMaxScaler {
    /// Load and validate the scaler artifact.
    ///
    /// # Errors
    /// Returns [`ArtifactError`] if the file cannot be read, parsed, or
    /// violates the numeric contract.
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let content = std::fs::read_to_string(path).map_err(|source| ArtifactError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let exported: ExportedMinMaxScaler =
            serde_json::from_str(&content).map_err(|source| ArtifactError::Format {
                path: path.to_path_buf(),
                source,
            })?;

        let scaler = Self::from_exported(&exported)?;

        tracing::info!(
            "Loaded scaler from {:?} (range [{}, {}], {} features)",
            path,
            exported.feature_range[0],
            exported.feature_range[1],
            NUMERIC_COUNT
        );

        Ok(scaler)
    }

    /// Validate an exported scaler against the numeric contract.
    ///
    /// # Errors
    /// Returns [`ArtifactError::Contract`] on name/order mismatch, a
    /// degenerate fitted range, or non-finite parameters.
    pub fn from_exported(exported: &ExportedMinMaxScaler) -> Result<Self, ArtifactError> {
        if exported.feature_names.len() != NUMERIC_COUNT
            || exported.data_min.len() != NUMERIC_COUNT
            || exported.data_max.len() != NUMERIC_COUNT
        {
            return Err(ArtifactError::Contract(format!(
                "expected {} numeric features, artifact has {} names / {} min / {} max",
                NUMERIC_COUNT,
                exported.feature_names.len(),
                exported.data_min.len(),
                exported.data_max.len()
            )));
        }

        for (i, expected) in NUMERIC_FEATURE_NAMES.iter().enumerate() {
            if exported.feature_names[i] != *expected {
                return Err(ArtifactError::Contract(format!(
                    "numeric feature {} is {:?}, contract expects {:?}",
                    i, exported.feature_names[i], expected
                )));
            }
        }

        let [range_min, range_max] = exported.feature_range;
        if !range_min.is_finite() || !range_max.is_finite() || range_max <= range_min {
            return Err(ArtifactError::Contract(format!(
                "invalid feature_range [{range_min}, {range_max}]"
            )));
        }

        let mut scale = [0.0; NUMERIC_COUNT];
        let mut offset = [0.0; NUMERIC_COUNT];
        for i in 0..NUMERIC_COUNT {
            let (lo, hi) = (exported.data_min[i], exported.data_max[i]);
            if !lo.is_finite() || !hi.is_finite() {
                return Err(ArtifactError::Contract(format!(
                    "non-finite fitted range for {:?}",
                    NUMERIC_FEATURE_NAMES[i]
                )));
            }
            if hi <= lo {
                return Err(ArtifactError::Contract(format!(
                    "degenerate fitted range [{lo}, {hi}] for {:?}",
                    NUMERIC_FEATURE_NAMES[i]
                )));
            }
            scale[i] = (range_max - range_min) / (hi - lo);
            offset[i] = range_min - lo * scale[i];
        }

        Ok(Self { scale, offset })
    }
}

impl FeatureScaler for MinMaxScaler {
    fn transform(&self, numeric: [f64; NUMERIC_COUNT]) -> [f64; NUMERIC_COUNT] {
        let mut out = [0.0; NUMERIC_COUNT];
        for i in 0..NUMERIC_COUNT {
            out[i] = numeric[i] * self.scale[i] + self.offset[i];
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exported() -> ExportedMinMaxScaler {
        ExportedMinMaxScaler {
            feature_names: NUMERIC_FEATURE_NAMES.iter().map(|s| (*s).to_string()).collect(),
            // Age, RestingBP, Cholesterol, MaxHR, Oldpeak
            data_min: vec![28.0, 0.0, 0.0, 60.0, -2.6],
            data_max: vec![77.0, 200.0, 603.0, 202.0, 6.2],
            feature_range: [0.0, 1.0],
        }
    }

    #[test]
    fn test_transform_maps_fitted_range_to_unit_interval() {
        let scaler = MinMaxScaler::from_exported(&exported()).unwrap();

        let at_min = scaler.transform([28.0, 0.0, 0.0, 60.0, -2.6]);
        let at_max = scaler.transform([77.0, 200.0, 603.0, 202.0, 6.2]);
        for i in 0..NUMERIC_COUNT {
            assert!(at_min[i].abs() < 1e-12);
            assert!((at_max[i] - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_transform_midpoint() {
        let scaler = MinMaxScaler::from_exported(&exported()).unwrap();
        let scaled = scaler.transform([52.5, 100.0, 301.5, 131.0, 1.8]);
        for value in scaled {
            assert!((value - 0.5).abs() < 1e-12);
        }
    }

    #[test]
    fn test_out_of_range_inputs_extrapolate() {
        // The form allows values the scaler never saw at fit time
        // (e.g. RestingBP up to 250 against a fitted max of 200).
        let scaler = MinMaxScaler::from_exported(&exported()).unwrap();
        let scaled = scaler.transform([50.0, 250.0, 200.0, 150.0, 0.0]);
        assert!(scaled[1] > 1.0);
        // In-range values stay inside [0,1].
        assert!(scaled[0] > 0.0 && scaled[0] < 1.0);
    }

    #[test]
    fn test_rejects_reordered_names() {
        let mut bad = exported();
        bad.feature_names.swap(1, 2);
        assert!(MinMaxScaler::from_exported(&bad).is_err());
    }

    #[test]
    fn test_rejects_degenerate_fitted_range() {
        let mut bad = exported();
        bad.data_max[2] = bad.data_min[2];
        let err = MinMaxScaler::from_exported(&bad).unwrap_err();
        assert!(matches!(err, ArtifactError::Contract(_)));
    }

    #[test]
    fn test_rejects_inverted_feature_range() {
        let mut bad = exported();
        bad.feature_range = [1.0, 0.0];
        assert!(MinMaxScaler::from_exported(&bad).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("scaler.json");
        let json = serde_json::to_string(&exported()).expect("serialize scaler");
        std::fs::write(&path, json).expect("write scaler");

        let scaler = MinMaxScaler::load(&path).expect("load scaler");
        let scaled = scaler.transform([28.0, 0.0, 0.0, 60.0, -2.6]);
        assert!(scaled.iter().all(|v| v.abs() < 1e-12));
    }
}
