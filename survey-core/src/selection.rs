//! Selection state machine.
//!
//! [`SelectionPath`] is the navigation state; [`Navigator`] owns one and is the
//! only thing that mutates it. Every transition validates against the dataset
//! first and only then replaces the path, so a rejected transition leaves the
//! previous selection untouched.

use std::fmt;

use crate::dataset::{Dataset, PresentationMode};
use crate::domain::QuestionId;
use crate::error::{NodeKind, Result, SurveyError};

/// Which subanswer group is being charted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SubanswerGroup {
    /// The record's own entries, for questions without top-level answers.
    Implicit,
    /// The subanswers nested under the named answer.
    Of(String),
}

impl SubanswerGroup {
    pub fn answer(&self) -> Option<&str> {
        match self {
            SubanswerGroup::Implicit => None,
            SubanswerGroup::Of(answer) => Some(answer),
        }
    }
}

/// Where the user currently is. Always consistent top-down.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum SelectionPath {
    #[default]
    Empty,

    ThemeSelected {
        theme: String,
    },

    QuestionSelected {
        theme: String,
        question: QuestionId,
    },

    /// Flat-answer questions only.
    AnswerSelected {
        theme: String,
        question: QuestionId,
        answer: String,
    },

    SubanswerGroupSelected {
        theme: String,
        question: QuestionId,
        group: SubanswerGroup,
    },
}

impl SelectionPath {
    pub fn theme(&self) -> Option<&str> {
        match self {
            SelectionPath::Empty => None,
            SelectionPath::ThemeSelected { theme }
            | SelectionPath::QuestionSelected { theme, .. }
            | SelectionPath::AnswerSelected { theme, .. }
            | SelectionPath::SubanswerGroupSelected { theme, .. } => Some(theme),
        }
    }

    pub fn question(&self) -> Option<&str> {
        match self {
            SelectionPath::QuestionSelected { question, .. }
            | SelectionPath::AnswerSelected { question, .. }
            | SelectionPath::SubanswerGroupSelected { question, .. } => Some(question),
            _ => None,
        }
    }

    /// The answer label in play, whether charted directly or drilled into.
    pub fn answer(&self) -> Option<&str> {
        match self {
            SelectionPath::AnswerSelected { answer, .. } => Some(answer),
            SelectionPath::SubanswerGroupSelected { group, .. } => group.answer(),
            _ => None,
        }
    }

    pub fn group(&self) -> Option<&SubanswerGroup> {
        match self {
            SelectionPath::SubanswerGroupSelected { group, .. } => Some(group),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, SelectionPath::Empty)
    }

    /// Leaf states route to a chart; the rest route to a list of choices.
    pub fn is_chartable(&self) -> bool {
        matches!(
            self,
            SelectionPath::AnswerSelected { .. } | SelectionPath::SubanswerGroupSelected { .. }
        )
    }

    pub fn description(&self) -> &'static str {
        match self {
            SelectionPath::Empty => "Select a theme",
            SelectionPath::ThemeSelected { .. } => "Select a question",
            SelectionPath::QuestionSelected { .. } => "Select an answer",
            SelectionPath::AnswerSelected { .. } => "Answer breakdown",
            SelectionPath::SubanswerGroupSelected { .. } => "Subanswer breakdown",
        }
    }
}

impl fmt::Display for SelectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(theme) = self.theme() else {
            return f.write_str("(none)");
        };
        write!(f, "{theme}")?;
        if let Some(question) = self.question() {
            write!(f, " › {question}")?;
        }
        if let Some(answer) = self.answer() {
            write!(f, " › {answer}")?;
        }
        if self.group().is_some() {
            f.write_str(" › subanswers")?;
        }
        Ok(())
    }
}

/// Every leaf selection of the dataset, in theme and question order.
pub fn chartable_paths(dataset: &Dataset) -> Vec<SelectionPath> {
    let mut paths = Vec::new();
    for theme in dataset.themes() {
        for question in &theme.questions {
            let Ok(record) = dataset.resolve_country_record(&question.id) else {
                continue;
            };
            let theme = theme.name.clone();
            let id = question.id.clone();
            match record.mode() {
                PresentationMode::FlatAnswers => {
                    paths.extend(record.answers().iter().map(|a| SelectionPath::AnswerSelected {
                        theme: theme.clone(),
                        question: id.clone(),
                        answer: a.label.clone(),
                    }));
                }
                PresentationMode::DrillDown => {
                    paths.extend(record.answers().iter().map(|a| {
                        SelectionPath::SubanswerGroupSelected {
                            theme: theme.clone(),
                            question: id.clone(),
                            group: SubanswerGroup::Of(a.label.clone()),
                        }
                    }));
                }
                PresentationMode::GradientOnly => paths.push(SelectionPath::SubanswerGroupSelected {
                    theme,
                    question: id,
                    group: SubanswerGroup::Implicit,
                }),
            }
        }
    }
    paths
}

/// Owns the current [`SelectionPath`] and applies transitions to it.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    path: SelectionPath,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(&self) -> &SelectionPath {
        &self.path
    }

    /// Any state → `ThemeSelected`. Clears deeper selections.
    pub fn select_theme(&mut self, dataset: &Dataset, theme: &str) -> Result<()> {
        let next = dataset.theme(theme).map(|t| SelectionPath::ThemeSelected {
            theme: t.name.clone(),
        });
        self.apply("select_theme", next)
    }

    /// Theme-level (or deeper) state → `QuestionSelected`.
    ///
    /// Gradient-only questions go straight to their implicit subanswer group.
    pub fn select_question(&mut self, dataset: &Dataset, question: &str) -> Result<()> {
        let next = self.question_transition(dataset, question);
        self.apply("select_question", next)
    }

    /// Question-level state → `AnswerSelected` for flat answers, or the
    /// answer's subanswer group for drill-down questions.
    pub fn select_answer(&mut self, dataset: &Dataset, answer: &str) -> Result<()> {
        let next = self.answer_transition(dataset, answer, false);
        self.apply("select_answer", next)
    }

    /// Question-level state → `SubanswerGroupSelected` for a drill-down answer.
    pub fn select_subanswer_group(&mut self, dataset: &Dataset, answer: &str) -> Result<()> {
        let next = self.answer_transition(dataset, answer, true);
        self.apply("select_subanswer_group", next)
    }

    /// Any state → `Empty`.
    pub fn reset(&mut self) {
        if !self.path.is_empty() {
            tracing::debug!(from = %self.path, "selection reset");
        }
        self.path = SelectionPath::Empty;
    }

    /// Step one level up. Gradient-only questions skip their question level,
    /// which would immediately re-enter the implicit group.
    pub fn back(&mut self) {
        self.path = match std::mem::take(&mut self.path) {
            SelectionPath::Empty | SelectionPath::ThemeSelected { .. } => SelectionPath::Empty,
            SelectionPath::QuestionSelected { theme, .. }
            | SelectionPath::SubanswerGroupSelected {
                theme,
                group: SubanswerGroup::Implicit,
                ..
            } => SelectionPath::ThemeSelected { theme },
            SelectionPath::AnswerSelected { theme, question, .. }
            | SelectionPath::SubanswerGroupSelected {
                theme, question, ..
            } => SelectionPath::QuestionSelected { theme, question },
        };
        tracing::debug!(to = %self.path, "selection back");
    }

    fn apply(&mut self, action: &'static str, next: Result<SelectionPath>) -> Result<()> {
        match next {
            Ok(path) => {
                tracing::debug!(action, from = %self.path, to = %path, "selection changed");
                self.path = path;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(action, at = %self.path, error = %err, "transition rejected");
                Err(err)
            }
        }
    }

    fn question_transition(&self, dataset: &Dataset, question: &str) -> Result<SelectionPath> {
        let theme_name = self.path.theme().ok_or_else(|| SurveyError::InvalidTransition {
            kind: NodeKind::Question,
            name: question.to_string(),
            reason: "no theme selected",
        })?;
        let theme = dataset.theme(theme_name)?;
        let question = theme
            .question(question)
            .ok_or_else(|| SurveyError::not_found(NodeKind::Question, question))?;
        let record = dataset.resolve_country_record(&question.id)?;

        let theme = theme.name.clone();
        let question = question.id.clone();
        Ok(match record.mode() {
            PresentationMode::GradientOnly => SelectionPath::SubanswerGroupSelected {
                theme,
                question,
                group: SubanswerGroup::Implicit,
            },
            PresentationMode::FlatAnswers | PresentationMode::DrillDown => {
                SelectionPath::QuestionSelected { theme, question }
            }
        })
    }

    fn answer_transition(
        &self,
        dataset: &Dataset,
        answer: &str,
        group_only: bool,
    ) -> Result<SelectionPath> {
        let kind = if group_only {
            NodeKind::SubanswerGroup
        } else {
            NodeKind::Answer
        };
        let (Some(theme), Some(question)) = (self.path.theme(), self.path.question()) else {
            return Err(SurveyError::InvalidTransition {
                kind,
                name: answer.to_string(),
                reason: "no question selected",
            });
        };

        let record = dataset.resolve_country_record(question)?;
        if group_only && !record.gradient_available() {
            return Err(SurveyError::InvalidTransition {
                kind,
                name: answer.to_string(),
                reason: "question has no subanswers",
            });
        }
        let found = record.answer(answer)?;

        let theme = theme.to_string();
        let question = question.to_string();
        let answer = found.label.clone();
        Ok(match record.mode() {
            PresentationMode::FlatAnswers => SelectionPath::AnswerSelected {
                theme,
                question,
                answer,
            },
            PresentationMode::DrillDown => SelectionPath::SubanswerGroupSelected {
                theme,
                question,
                group: SubanswerGroup::Of(answer),
            },
            // `record.answer` already failed: gradient-only records have no answers.
            PresentationMode::GradientOnly => {
                return Err(SurveyError::not_found(NodeKind::Answer, answer))
            }
        })
    }
}
