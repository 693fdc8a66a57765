//! SurveyLab TUI: terminal viewer for per-country survey results.
//!
//! Two panels plus a status bar:
//! 1. List: themes, then questions, then answers of the current selection
//! 2. Chart: per-country horizontal bars, stacked for subanswer groups
//!
//! Help and error history live in overlays.

pub mod app;
pub mod input;
pub mod logging;
pub mod theme;
pub mod ui;

pub use app::AppState;
pub use input::handle_key;
pub use theme::Theme;

#[cfg(test)]
mod test_helpers;
