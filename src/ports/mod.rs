//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the application and its two external collaborators: the trained
//! classifier artifact and the fitted scaler artifact.

mod classifier;
mod scaler;

pub use classifier::Classifier;
pub use scaler::FeatureScaler;
