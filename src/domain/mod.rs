//! Domain layer: Core business types and logic.
//!
//! This module contains the patient record, the fixed encoding contract,
//! and the screening outcome types. No external system dependencies.

mod assessment;
mod encoding;
mod patient;

pub use assessment::{Assessment, RiskLabel};
pub use encoding::{
    EncodedVector, FEATURE_COUNT, FEATURE_NAMES, NUMERIC_COUNT, NUMERIC_FEATURE_NAMES,
    NUMERIC_INDICES,
};
pub use patient::{
    yes_no_from_label, ChestPainType, PatientRecord, RestingEcg, Sex, StSlope, UnknownLabel,
    YES_NO_LABELS,
};
