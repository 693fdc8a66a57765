//! The interface the presentation shells talk to.
//!
//! [`SurveyViewer`] pairs the immutable dataset with the navigator and the
//! series builder. Lists of choices and the current chart are pure functions
//! of the dataset and the current [`SelectionPath`].

use crate::dataset::{Dataset, Question, Subanswer};
use crate::error::Result;
use crate::palette::Palette;
use crate::selection::{Navigator, SelectionPath, SubanswerGroup};
use crate::series::{ChartSeries, SeriesBuilder};

#[derive(Debug, Clone)]
pub struct SurveyViewer {
    dataset: Dataset,
    navigator: Navigator,
    builder: SeriesBuilder,
}

impl SurveyViewer {
    pub fn new(dataset: Dataset, palette: Palette) -> Self {
        Self {
            dataset,
            navigator: Navigator::new(),
            builder: SeriesBuilder::new(palette),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn path(&self) -> &SelectionPath {
        self.navigator.path()
    }

    pub fn palette(&self) -> &Palette {
        self.builder.palette()
    }

    pub fn available_themes(&self) -> Vec<&str> {
        self.dataset.list_themes()
    }

    pub fn available_questions(&self, theme: &str) -> Result<&[Question]> {
        self.dataset.list_questions(theme)
    }

    /// Selectable answer labels; empty for gradient-only questions.
    pub fn available_answers(&self, question: &str) -> Result<Vec<&str>> {
        let record = self.dataset.resolve_country_record(question)?;
        Ok(record.answers().iter().map(|a| a.label.as_str()).collect())
    }

    /// Subanswer labels of a group, in stack order.
    pub fn available_subanswers(&self, question: &str, group: &SubanswerGroup) -> Result<Vec<&str>> {
        let record = self.dataset.resolve_country_record(question)?;
        let subs: &[Subanswer] = match group {
            SubanswerGroup::Implicit => record.implicit_group().unwrap_or(&[]),
            SubanswerGroup::Of(answer) => &record.answer(answer)?.subanswers,
        };
        Ok(subs.iter().map(|s| s.label.as_str()).collect())
    }

    pub fn select_theme(&mut self, theme: &str) -> Result<()> {
        self.navigator.select_theme(&self.dataset, theme)
    }

    pub fn select_question(&mut self, question: &str) -> Result<()> {
        self.navigator.select_question(&self.dataset, question)
    }

    pub fn select_answer(&mut self, answer: &str) -> Result<()> {
        self.navigator.select_answer(&self.dataset, answer)
    }

    pub fn select_subanswer_group(&mut self, answer: &str) -> Result<()> {
        self.navigator.select_subanswer_group(&self.dataset, answer)
    }

    pub fn reset(&mut self) {
        self.navigator.reset();
    }

    pub fn back(&mut self) {
        self.navigator.back();
    }

    /// Chart for the current selection; `None` until a leaf is selected.
    pub fn current_chart_series(&self) -> Result<Option<ChartSeries>> {
        self.builder.build(&self.dataset, self.navigator.path())
    }
}
