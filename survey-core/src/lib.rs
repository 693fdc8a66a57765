//! SurveyLab Core: dataset model, selection state machine, chart series.
//!
//! This crate holds everything the viewers share:
//! - Dataset loading with eager structural validation
//! - Presentation modes derived from the two availability flags
//! - Selection state machine over theme → question → answer → subanswers
//! - Series builder producing single-row and stacked per-country series
//! - Palettes, TOML configuration and a built-in sample dataset

pub mod config;
pub mod dataset;
pub mod domain;
pub mod error;
pub mod palette;
pub mod sample;
pub mod selection;
pub mod series;
pub mod viewer;

pub use config::ViewerConfig;
pub use dataset::{Dataset, PresentationMode};
pub use domain::{Country, COUNTRIES};
pub use error::{ErrorKind, Result, SurveyError};
pub use palette::{Palette, PaletteName};
pub use selection::{chartable_paths, Navigator, SelectionPath, SubanswerGroup};
pub use series::{ChartSeries, SeriesBody, SeriesBuilder, StackedRow};
pub use viewer::SurveyViewer;

#[cfg(test)]
mod test_fixtures;
