//! Shared fixtures for in-crate tests.

use crossterm::event::{KeyCode, KeyEvent};

use survey_core::sample::sample_dataset;
use survey_core::{Palette, SurveyViewer};

use crate::app::AppState;
use crate::input::handle_key;

/// App over the built-in sample dataset, nothing selected.
pub fn sample_app() -> AppState {
    let dataset = sample_dataset().expect("sample dataset loads");
    AppState::new(SurveyViewer::new(dataset, Palette::default()), 1)
}

pub fn press(app: &mut AppState, code: KeyCode) {
    handle_key(app, KeyEvent::from(code));
}
