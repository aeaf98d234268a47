//! Patient record types for heart-attack risk screening.
//!
//! Field names and ranges mirror the heart-failure clinical dataset the
//! model artifact was trained on. Categorical fields are tagged enums with
//! fixed integer codes; the codes are part of the trained-model contract
//! and must never change independently of retraining.

use serde::{Deserialize, Serialize};

/// Error returned when a user-facing label does not match any enumerated
/// option.
///
/// The reference pipeline silently encoded unknown labels as `-1`, a code
/// the trained model has never seen. Here an unknown label is rejected at
/// the parse boundary instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {field} label: {label:?}")]
pub struct UnknownLabel {
    /// Field the label was offered for.
    pub field: &'static str,
    /// The offending label text.
    pub label: String,
}

/// Form labels for the yes/no fields (FastingBS, ExerciseAngina).
pub const YES_NO_LABELS: [&str; 2] = ["No", "Sí"];

/// Parse a yes/no form label into a boolean.
///
/// # Errors
/// Returns [`UnknownLabel`] if the label is not one of [`YES_NO_LABELS`].
pub fn yes_no_from_label(field: &'static str, label: &str) -> Result<bool, UnknownLabel> {
    match label {
        "No" => Ok(false),
        "Sí" => Ok(true),
        other => Err(UnknownLabel {
            field,
            label: other.to_string(),
        }),
    }
}

/// Patient sex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Form labels, in the order the form presents them.
    pub const LABELS: [&'static str; 2] = ["Masculino", "Femenino"];

    /// Fixed integer code from the training pipeline.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Male => 0,
            Self::Female => 1,
        }
    }

    /// The user-facing form label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Male => "Masculino",
            Self::Female => "Femenino",
        }
    }

    /// Parse a form label.
    ///
    /// # Errors
    /// Returns [`UnknownLabel`] for anything outside [`Self::LABELS`].
    pub fn from_label(label: &str) -> Result<Self, UnknownLabel> {
        match label {
            "Masculino" => Ok(Self::Male),
            "Femenino" => Ok(Self::Female),
            other => Err(UnknownLabel {
                field: "Sex",
                label: other.to_string(),
            }),
        }
    }
}

/// Chest pain type.
///
/// The form presents TA first, but the trained encoding is
/// ATA→0, NAP→1, ASY→2, TA→3 (fit order, not form order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChestPainType {
    TypicalAngina,
    AtypicalAngina,
    NonAnginalPain,
    Asymptomatic,
}

impl ChestPainType {
    /// Form labels, in the order the form presents them.
    pub const LABELS: [&'static str; 4] = [
        "TA - Angina típica",
        "ATA - Angina atípica",
        "NAP - Dolor no anginoso",
        "ASY - Asintomático",
    ];

    /// Fixed integer code from the training pipeline.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::AtypicalAngina => 0,
            Self::NonAnginalPain => 1,
            Self::Asymptomatic => 2,
            Self::TypicalAngina => 3,
        }
    }

    /// The user-facing form label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::TypicalAngina => "TA - Angina típica",
            Self::AtypicalAngina => "ATA - Angina atípica",
            Self::NonAnginalPain => "NAP - Dolor no anginoso",
            Self::Asymptomatic => "ASY - Asintomático",
        }
    }

    /// Parse a form label.
    ///
    /// # Errors
    /// Returns [`UnknownLabel`] for anything outside [`Self::LABELS`].
    pub fn from_label(label: &str) -> Result<Self, UnknownLabel> {
        match label {
            "TA - Angina típica" => Ok(Self::TypicalAngina),
            "ATA - Angina atípica" => Ok(Self::AtypicalAngina),
            "NAP - Dolor no anginoso" => Ok(Self::NonAnginalPain),
            "ASY - Asintomático" => Ok(Self::Asymptomatic),
            other => Err(UnknownLabel {
                field: "ChestPainType",
                label: other.to_string(),
            }),
        }
    }
}

/// Resting electrocardiogram result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RestingEcg {
    Normal,
    StAbnormality,
    LeftVentricularHypertrophy,
}

impl RestingEcg {
    /// Form labels, in the order the form presents them.
    pub const LABELS: [&'static str; 3] = [
        "Normal",
        "ST - Anomalía ST-T",
        "LVH - Hipertrofia ventricular izquierda",
    ];

    /// Fixed integer code from the training pipeline.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Normal => 0,
            Self::StAbnormality => 1,
            Self::LeftVentricularHypertrophy => 2,
        }
    }

    /// The user-facing form label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::StAbnormality => "ST - Anomalía ST-T",
            Self::LeftVentricularHypertrophy => "LVH - Hipertrofia ventricular izquierda",
        }
    }

    /// Parse a form label.
    ///
    /// # Errors
    /// Returns [`UnknownLabel`] for anything outside [`Self::LABELS`].
    pub fn from_label(label: &str) -> Result<Self, UnknownLabel> {
        match label {
            "Normal" => Ok(Self::Normal),
            "ST - Anomalía ST-T" => Ok(Self::StAbnormality),
            "LVH - Hipertrofia ventricular izquierda" => Ok(Self::LeftVentricularHypertrophy),
            other => Err(UnknownLabel {
                field: "RestingECG",
                label: other.to_string(),
            }),
        }
    }
}

/// Slope of the ST segment during peak exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StSlope {
    Up,
    Flat,
    Down,
}

impl StSlope {
    /// Form labels, in the order the form presents them.
    pub const LABELS: [&'static str; 3] = ["Up - Ascendente", "Flat - Plano", "Down - Descendente"];

    /// Fixed integer code from the training pipeline.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Up => 0,
            Self::Flat => 1,
            Self::Down => 2,
        }
    }

    /// The user-facing form label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Up => "Up - Ascendente",
            Self::Flat => "Flat - Plano",
            Self::Down => "Down - Descendente",
        }
    }

    /// Parse a form label.
    ///
    /// # Errors
    /// Returns [`UnknownLabel`] for anything outside [`Self::LABELS`].
    pub fn from_label(label: &str) -> Result<Self, UnknownLabel> {
        match label {
            "Up - Ascendente" => Ok(Self::Up),
            "Flat - Plano" => Ok(Self::Flat),
            "Down - Descendente" => Ok(Self::Down),
            other => Err(UnknownLabel {
                field: "ST_Slope",
                label: other.to_string(),
            }),
        }
    }
}

/// One patient's clinical attributes, as collected by the form.
///
/// Ephemeral: constructed from one submission, encoded once, discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    /// Age in years (1-120)
    pub age: u32,

    /// Patient sex
    pub sex: Sex,

    /// Chest pain type
    pub chest_pain: ChestPainType,

    /// Resting blood pressure in mm Hg (0-250)
    pub resting_bp: u32,

    /// Serum cholesterol in mg/dl (0-600)
    pub cholesterol: u32,

    /// Fasting blood sugar > 120 mg/dl
    pub fasting_bs: bool,

    /// Resting electrocardiogram result
    pub resting_ecg: RestingEcg,

    /// Maximum heart rate achieved (60-220)
    pub max_hr: u32,

    /// Exercise-induced angina
    pub exercise_angina: bool,

    /// ST depression during exercise in mm (0.0-6.0)
    pub oldpeak: f64,

    /// ST segment slope during peak exercise
    pub st_slope: StSlope,
}

impl PatientRecord {
    /// Validate that all numeric fields are within the form widget ranges.
    ///
    /// The widgets already constrain input, so a violation here means the
    /// record was built outside the form.
    ///
    /// # Errors
    /// Returns all violations as a vector of strings.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !(1..=120).contains(&self.age) {
            errors.push(format!("Age {} out of range [1, 120]", self.age));
        }
        if self.resting_bp > 250 {
            errors.push(format!(
                "RestingBP {} out of range [0, 250]",
                self.resting_bp
            ));
        }
        if self.cholesterol > 600 {
            errors.push(format!(
                "Cholesterol {} out of range [0, 600]",
                self.cholesterol
            ));
        }
        if !(60..=220).contains(&self.max_hr) {
            errors.push(format!("MaxHR {} out of range [60, 220]", self.max_hr));
        }
        if !self.oldpeak.is_finite() || !(0.0..=6.0).contains(&self.oldpeak) {
            errors.push(format!("Oldpeak {} out of range [0.0, 6.0]", self.oldpeak));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> PatientRecord {
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
    fn test_sex_codes() {
        assert_eq!(Sex::from_label("Masculino").unwrap().code(), 0);
        assert_eq!(Sex::from_label("Femenino").unwrap().code(), 1);
    }

    #[test]
    fn test_chest_pain_codes() {
        assert_eq!(
            ChestPainType::from_label("ATA - Angina atípica").unwrap().code(),
            0
        );
        assert_eq!(
            ChestPainType::from_label("NAP - Dolor no anginoso").unwrap().code(),
            1
        );
        assert_eq!(
            ChestPainType::from_label("ASY - Asintomático").unwrap().code(),
            2
        );
        assert_eq!(
            ChestPainType::from_label("TA - Angina típica").unwrap().code(),
            3
        );
    }

    #[test]
    fn test_resting_ecg_codes() {
        assert_eq!(RestingEcg::from_label("Normal").unwrap().code(), 0);
        assert_eq!(RestingEcg::from_label("ST - Anomalía ST-T").unwrap().code(), 1);
        assert_eq!(
            RestingEcg::from_label("LVH - Hipertrofia ventricular izquierda")
                .unwrap()
                .code(),
            2
        );
    }

    #[test]
    fn test_st_slope_codes() {
        assert_eq!(StSlope::from_label("Up - Ascendente").unwrap().code(), 0);
        assert_eq!(StSlope::from_label("Flat - Plano").unwrap().code(), 1);
        assert_eq!(StSlope::from_label("Down - Descendente").unwrap().code(), 2);
    }

    #[test]
    fn test_yes_no_labels() {
        assert!(!yes_no_from_label("FastingBS", "No").unwrap());
        assert!(yes_no_from_label("FastingBS", "Sí").unwrap());
    }

    #[test]
    fn test_unknown_label_fails_loudly() {
        // The reference pipeline mapped unknown labels to -1 and carried on.
        // That path no longer exists: parsing rejects the label outright.
        let err = ChestPainType::from_label("MI - Infarto previo").unwrap_err();
        assert_eq!(err.field, "ChestPainType");
        assert_eq!(err.label, "MI - Infarto previo");

        assert!(Sex::from_label("masculino").is_err()); // exact match only
        assert!(RestingEcg::from_label("LVH").is_err());
        assert!(StSlope::from_label("").is_err());
        assert!(yes_no_from_label("ExerciseAngina", "Si").is_err());
    }

    #[test]
    fn test_round_trip_labels() {
        for label in ChestPainType::LABELS {
            assert_eq!(ChestPainType::from_label(label).unwrap().label(), label);
        }
        for label in RestingEcg::LABELS {
            assert_eq!(RestingEcg::from_label(label).unwrap().label(), label);
        }
    }

    #[test]
    fn test_validation_accepts_widget_ranges() {
        let mut record = sample_record();
        assert!(record.validate().is_ok());

        // Age boundaries are inclusive.
        record.age = 1;
        assert!(record.validate().is_ok());
        record.age = 120;
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_out_of_range() {
        let mut record = sample_record();
        record.age = 0;
        assert!(record.validate().is_err());
        record.age = 121;
        assert!(record.validate().is_err());

        let mut record = sample_record();
        record.oldpeak = 6.5;
        record.max_hr = 40;
        let errors = record.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
