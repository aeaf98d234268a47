//! The feature-vector contract between the form and the trained artifacts.
//!
//! The trained model consumes exactly 11 columns in the order fixed at
//! training time. That order is an external contract: changing it here
//! without retraining silently corrupts every prediction.

use super::patient::PatientRecord;

/// Number of features in the model contract.
pub const FEATURE_COUNT: usize = 11;

/// Number of numeric features rescaled before inference.
pub const NUMERIC_COUNT: usize = 5;

/// Column names in the exact training order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "Age",
    "Sex",
    "ChestPainType",
    "RestingBP",
    "Cholesterol",
    "FastingBS",
    "RestingECG",
    "MaxHR",
    "ExerciseAngina",
    "Oldpeak",
    "ST_Slope",
];

/// Positions of the numeric subset within [`FEATURE_NAMES`]:
/// Age, RestingBP, Cholesterol, MaxHR, Oldpeak.
pub const NUMERIC_INDICES: [usize; NUMERIC_COUNT] = [0, 3, 4, 7, 9];

/// Names of the numeric subset, in the order the scaler was fitted on.
pub const NUMERIC_FEATURE_NAMES: [&str; NUMERIC_COUNT] =
    ["Age", "RestingBP", "Cholesterol", "MaxHR", "Oldpeak"];

/// An encoded patient: 11 numeric values in contract order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncodedVector {
    values: [f64; FEATURE_COUNT],
}

impl EncodedVector {
    /// Build the vector from raw values already in contract order.
    #[must_use]
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self { values }
    }

    /// All 11 values in contract order.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// The numeric subvector [Age, RestingBP, Cholesterol, MaxHR, Oldpeak],
    /// in the order the scaler was fitted on.
    #[must_use]
    pub fn numeric_subvector(&self) -> [f64; NUMERIC_COUNT] {
        let mut out = [0.0; NUMERIC_COUNT];
        for (slot, &idx) in out.iter_mut().zip(NUMERIC_INDICES.iter()) {
            *slot = self.values[idx];
        }
        out
    }

    /// The categorical subvector [Sex, ChestPainType, FastingBS, RestingECG,
    /// ExerciseAngina, ST_Slope], in field order.
    #[must_use]
    pub fn categorical_subvector(&self) -> [f64; FEATURE_COUNT - NUMERIC_COUNT] {
        let mut out = [0.0; FEATURE_COUNT - NUMERIC_COUNT];
        let mut n = 0;
        for (idx, &value) in self.values.iter().enumerate() {
            if !NUMERIC_INDICES.contains(&idx) {
                out[n] = value;
                n += 1;
            }
        }
        out
    }

    /// Copy of this vector with the numeric subvector replaced by `scaled`,
    /// leaving the categorical codes untouched.
    #[must_use]
    pub fn with_numeric_subvector(&self, scaled: [f64; NUMERIC_COUNT]) -> Self {
        let mut values = self.values;
        for (&idx, &value) in NUMERIC_INDICES.iter().zip(scaled.iter()) {
            values[idx] = value;
        }
        Self { values }
    }
}

impl PatientRecord {
    /// Encode this record into the fixed-order feature vector.
    ///
    /// Categorical fields become their fixed integer codes; numeric fields
    /// pass through unscaled (the fitted scaler is applied later, just
    /// before inference).
    #[must_use]
    pub fn encode(&self) -> EncodedVector {
        EncodedVector::from_values([
            f64::from(self.age),
            f64::from(self.sex.code()),
            f64::from(self.chest_pain.code()),
            f64::from(self.resting_bp),
            f64::from(self.cholesterol),
            f64::from(u8::from(self.fasting_bs)),
            f64::from(self.resting_ecg.code()),
            f64::from(self.max_hr),
            f64::from(u8::from(self.exercise_angina)),
            self.oldpeak,
            f64::from(self.st_slope.code()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::patient::{ChestPainType, RestingEcg, Sex, StSlope};

    fn canonical_record() -> PatientRecord {
        PatientRecord {
            age: 50,
            sex: Sex::Male,
            chest_pain: ChestPainType::Asymptomatic,
            resting_bp: 120,
            cholesterol: 200,
            fasting_bs: false,
            resting_ecg: RestingEcg::Normal,
            max_hr: 150,
            exercise_angina: false,
            oldpeak: 0.0,
            st_slope: StSlope::Up,
        }
    }

    #[test]
    fn test_contract_constants_agree() {
        for (n, &idx) in NUMERIC_INDICES.iter().enumerate() {
            assert_eq!(FEATURE_NAMES[idx], NUMERIC_FEATURE_NAMES[n]);
        }
    }

    #[test]
    fn test_encode_order_is_fixed() {
        let encoded = canonical_record().encode();
        assert_eq!(
            encoded.as_slice(),
            &[50.0, 0.0, 2.0, 120.0, 200.0, 0.0, 0.0, 150.0, 0.0, 0.0, 0.0]
        );
    }

    #[test]
    fn test_canonical_subvectors() {
        let encoded = canonical_record().encode();

        // [Sex, ChestPainType, FastingBS, RestingECG, ExerciseAngina, ST_Slope]
        assert_eq!(encoded.categorical_subvector(), [0.0, 2.0, 0.0, 0.0, 0.0, 0.0]);

        // [Age, RestingBP, Cholesterol, MaxHR, Oldpeak]
        assert_eq!(encoded.numeric_subvector(), [50.0, 120.0, 200.0, 150.0, 0.0]);
    }

    #[test]
    fn test_with_numeric_subvector_preserves_categoricals() {
        let mut record = canonical_record();
        record.sex = Sex::Female;
        record.st_slope = StSlope::Down;

        let encoded = record.encode();
        let rescaled = encoded.with_numeric_subvector([0.1, 0.2, 0.3, 0.4, 0.5]);

        assert_eq!(rescaled.numeric_subvector(), [0.1, 0.2, 0.3, 0.4, 0.5]);
        assert_eq!(
            rescaled.categorical_subvector(),
            encoded.categorical_subvector()
        );
        // Categorical positions keep their codes.
        assert_eq!(rescaled.as_slice()[1], 1.0); // Sex
        assert_eq!(rescaled.as_slice()[10], 2.0); // ST_Slope
    }

    #[test]
    fn test_encode_all_high_codes() {
        let record = PatientRecord {
            age: 77,
            sex: Sex::Female,
            chest_pain: ChestPainType::TypicalAngina,
            resting_bp: 145,
            cholesterol: 230,
            fasting_bs: true,
            resting_ecg: RestingEcg::LeftVentricularHypertrophy,
            max_hr: 105,
            exercise_angina: true,
            oldpeak: 2.5,
            st_slope: StSlope::Down,
        };
        let encoded = record.encode();
        assert_eq!(encoded.categorical_subvector(), [1.0, 3.0, 1.0, 2.0, 1.0, 2.0]);
    }
}
