//! Parrot/neon theme tokens for the SurveyLab viewer.
//!
//! # Color Palette
//! - **Accent**: Electric cyan (focus, selected items, titles)
//! - **Positive**: Neon green (chartable selections)
//! - **Negative**: Hot pink (errors)
//! - **Warning**: Neon orange (warnings, error categories)
//! - **Neutral**: Cool purple (list entries)
//! - **Muted**: Steel blue (hints, axis text)
//!
//! Chart segment colors come from the core [`Palette`]; single-answer bars use
//! [`BAR`].

use ratatui::style::{Color, Modifier, Style};

use survey_core::palette::{Palette, Rgb};

/// Electric cyan accent.
pub const ACCENT: Color = Color::Rgb(0, 255, 255);
/// Sky blue, the fill for single-answer bars.
pub const BAR: Color = Color::Rgb(135, 206, 235);

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub accent: Color,
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    pub neutral: Color,
    pub muted: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::parrot_neon()
    }
}

impl Theme {
    pub fn parrot_neon() -> Self {
        Self {
            background: Color::Rgb(18, 18, 20),
            accent: ACCENT,
            positive: Color::Rgb(0, 255, 128),
            negative: Color::Rgb(255, 20, 147),
            warning: Color::Rgb(255, 140, 0),
            neutral: Color::Rgb(147, 112, 219),
            muted: Color::Rgb(100, 149, 237),
            text_primary: Color::White,
            text_secondary: Color::Rgb(170, 170, 170),
        }
    }
}

fn fg(color: Color) -> Style {
    Style::default().fg(color)
}

pub fn accent() -> Style {
    fg(Theme::default().accent)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn positive() -> Style {
    fg(Theme::default().positive)
}

pub fn negative() -> Style {
    fg(Theme::default().negative)
}

pub fn warning() -> Style {
    fg(Theme::default().warning)
}

pub fn neutral() -> Style {
    fg(Theme::default().neutral)
}

pub fn muted() -> Style {
    fg(Theme::default().muted)
}

pub fn text() -> Style {
    fg(Theme::default().text_primary)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}

pub fn rgb(color: Rgb) -> Color {
    Color::Rgb(color.0, color.1, color.2)
}

/// Foreground color for a stacked segment's palette index.
pub fn segment_color(palette: &Palette, color_index: usize) -> Color {
    rgb(palette.color(color_index))
}
