//! Application state: single-owner, main-thread only.
//!
//! The selection itself lives in [`SurveyViewer`]; this struct adds what only
//! the terminal needs: the list cursor, the cached chart, the status line and
//! the error history.

use std::collections::VecDeque;

use chrono::NaiveDateTime;

use survey_core::{ChartSeries, ErrorKind, SelectionPath, SubanswerGroup, SurveyError, SurveyViewer};

const ERROR_HISTORY_CAP: usize = 50;

/// Which list the left panel shows for the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListLevel {
    Themes,
    Questions,
    Answers,
}

impl ListLevel {
    pub fn for_path(path: &SelectionPath) -> Self {
        match path {
            SelectionPath::Empty => ListLevel::Themes,
            SelectionPath::ThemeSelected { .. } => ListLevel::Questions,
            // Gradient-only questions have nothing below them to pick.
            SelectionPath::SubanswerGroupSelected {
                group: SubanswerGroup::Implicit,
                ..
            } => ListLevel::Questions,
            SelectionPath::QuestionSelected { .. }
            | SelectionPath::AnswerSelected { .. }
            | SelectionPath::SubanswerGroupSelected { .. } => ListLevel::Answers,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ListLevel::Themes => "Themes",
            ListLevel::Questions => "Questions",
            ListLevel::Answers => "Answers",
        }
    }
}

/// One selectable row of the list panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    /// Value handed to the matching `select_*` transition.
    pub key: String,
    pub label: String,
    /// Part of the current selection path.
    pub active: bool,
}

/// What the chart panel shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartView {
    Empty,
    Ready(ChartSeries),
    Failed { kind: ErrorKind, message: String },
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub kind: ErrorKind,
    pub message: String,
    pub context: String,
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
    ErrorHistory,
}

/// Top-level application state.
pub struct AppState {
    pub viewer: SurveyViewer,
    pub running: bool,

    pub cursor: usize,
    pub chart: ChartView,
    /// Terminal rows per country bar.
    pub bar_width: u16,

    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,
}

impl AppState {
    pub fn new(viewer: SurveyViewer, bar_width: u16) -> Self {
        let mut app = Self {
            viewer,
            running: true,
            cursor: 0,
            chart: ChartView::Empty,
            bar_width: bar_width.max(1),
            status_message: None,
            error_history: VecDeque::with_capacity(ERROR_HISTORY_CAP),
            error_scroll: 0,
            overlay: Overlay::None,
        };
        app.set_status(SelectionPath::Empty.description());
        app
    }

    pub fn path(&self) -> &SelectionPath {
        self.viewer.path()
    }

    pub fn list_level(&self) -> ListLevel {
        ListLevel::for_path(self.path())
    }

    /// Rows of the list panel for the current selection.
    pub fn list_entries(&self) -> Vec<ListEntry> {
        let path = self.path();
        match self.list_level() {
            ListLevel::Themes => self
                .viewer
                .available_themes()
                .into_iter()
                .map(|t| ListEntry {
                    key: t.to_string(),
                    label: t.to_string(),
                    active: false,
                })
                .collect(),
            ListLevel::Questions => {
                let Some(theme) = path.theme() else {
                    return Vec::new();
                };
                self.viewer
                    .available_questions(theme)
                    .unwrap_or(&[])
                    .iter()
                    .map(|q| ListEntry {
                        key: q.id.clone(),
                        label: format!("{}  {}", q.id, q.prompt),
                        active: path.question() == Some(q.id.as_str()),
                    })
                    .collect()
            }
            ListLevel::Answers => {
                let Some(question) = path.question() else {
                    return Vec::new();
                };
                let picked = path.answer();
                self.viewer
                    .available_answers(question)
                    .unwrap_or_default()
                    .into_iter()
                    .map(|a| ListEntry {
                        key: a.to_string(),
                        label: a.to_string(),
                        active: picked == Some(a),
                    })
                    .collect()
            }
        }
    }

    /// The prompt of the selected question, if any.
    pub fn question_prompt(&self) -> Option<&str> {
        let path = self.path();
        let theme = self.viewer.dataset().theme(path.theme()?).ok()?;
        theme.question(path.question()?).map(|q| q.prompt.as_str())
    }

    pub fn cursor_down(&mut self) {
        let len = self.list_entries().len();
        if self.cursor + 1 < len {
            self.cursor += 1;
        }
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_top(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_bottom(&mut self) {
        self.cursor = self.list_entries().len().saturating_sub(1);
    }

    /// Select the entry under the cursor.
    pub fn activate(&mut self) {
        let entries = self.list_entries();
        let Some(entry) = entries.get(self.cursor) else {
            return;
        };
        let key = entry.key.as_str();
        let result = match self.list_level() {
            ListLevel::Themes => self.viewer.select_theme(key),
            ListLevel::Questions => self.viewer.select_question(key),
            ListLevel::Answers => self.viewer.select_answer(key),
        };
        match result {
            Ok(()) => self.after_transition(),
            Err(err) => self.push_survey_error(&err),
        }
    }

    /// Step one level up the selection.
    pub fn back(&mut self) {
        if self.path().is_empty() {
            self.set_warning("Already at the theme list");
            return;
        }
        self.viewer.back();
        self.after_transition();
    }

    /// Clear the selection and return to the theme list.
    pub fn reset(&mut self) {
        self.viewer.reset();
        self.after_transition();
    }

    /// Rebuild the chart and park the cursor on the active entry.
    fn after_transition(&mut self) {
        self.refresh_chart();
        self.cursor = self
            .list_entries()
            .iter()
            .position(|e| e.active)
            .unwrap_or(0);
        if !matches!(self.chart, ChartView::Failed { .. }) {
            let path = self.path();
            let msg = if path.is_empty() {
                path.description().to_string()
            } else {
                format!("{}: {path}", path.description())
            };
            self.set_status(msg);
        }
    }

    pub fn refresh_chart(&mut self) {
        self.chart = match self.viewer.current_chart_series() {
            Ok(Some(series)) => ChartView::Ready(series),
            Ok(None) => ChartView::Empty,
            Err(err) => {
                self.push_survey_error(&err);
                ChartView::Failed {
                    kind: err.kind(),
                    message: err.to_string(),
                }
            }
        };
    }

    fn push_survey_error(&mut self, err: &SurveyError) {
        let context = self.path().to_string();
        self.push_error(err.kind(), err.to_string(), context);
    }

    /// Push an error to the history, capping at 50.
    pub fn push_error(&mut self, kind: ErrorKind, message: String, context: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            kind,
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > ERROR_HISTORY_CAP {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}
