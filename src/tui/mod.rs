//! TUI module: Terminal User Interface using Ratatui.
//!
//! Provides a clinical-themed interface for:
//! - Patient data entry (11 fields, choice widgets for categoricals)
//! - The two-outcome screening result

mod app;
mod styles;
mod ui;

pub use app::App;
pub use styles::ClinicalTheme;
