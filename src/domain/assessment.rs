//! Screening outcome types.

use serde::{Deserialize, Serialize};

/// Binary risk label produced by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLabel {
    /// Low risk of heart attack (class 0)
    Low,
    /// High risk of heart attack (class 1)
    High,
}

impl RiskLabel {
    /// Build a label from the classifier's class index.
    #[must_use]
    pub fn from_class(class: u8) -> Self {
        if class == 0 {
            Self::Low
        } else {
            Self::High
        }
    }

    /// The classifier's class index for this label.
    #[must_use]
    pub fn class(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::High => 1,
        }
    }

    /// The literal user-facing outcome message shown after submission.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Low => "Bajo riesgo de infarto.",
            Self::High => "Alto riesgo de infarto. Le recomiendo que acuda a un médico.",
        }
    }

    /// Associated color for TUI display (RGB).
    #[must_use]
    pub fn color(self) -> (u8, u8, u8) {
        match self {
            Self::Low => (16, 185, 129),  // Emerald (#10B981)
            Self::High => (244, 63, 94),  // Rose (#F43F5E)
        }
    }
}

impl std::fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

/// One completed screening.
///
/// Ephemeral by design: shown once in the TUI, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    /// The predicted risk label
    pub label: RiskLabel,

    /// Timestamp of the screening
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Assessment {
    /// Create a new assessment for the given label.
    #[must_use]
    pub fn new(label: RiskLabel) -> Self {
        Self {
            label,
            created_at: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_from_class() {
        assert_eq!(RiskLabel::from_class(0), RiskLabel::Low);
        assert_eq!(RiskLabel::from_class(1), RiskLabel::High);
        assert_eq!(RiskLabel::from_class(0).class(), 0);
        assert_eq!(RiskLabel::from_class(1).class(), 1);
    }

    #[test]
    fn test_outcome_messages_are_distinct() {
        assert_ne!(RiskLabel::Low.message(), RiskLabel::High.message());
        assert!(RiskLabel::High.message().contains("Alto riesgo"));
        assert!(RiskLabel::Low.message().contains("Bajo riesgo"));
    }

    #[test]
    fn test_assessment_creation() {
        let assessment = Assessment::new(RiskLabel::High);
        assert_eq!(assessment.label, RiskLabel::High);
    }
}
