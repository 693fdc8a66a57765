//! Validated, read-only view of a loaded survey dataset.

use std::collections::HashMap;

use crate::domain::{CountryTable, QuestionId};
use crate::error::{NodeKind, Result, SurveyError};

/// Raw percentage strings, one per country. Parsed only when charted.
pub type RawShares = CountryTable<String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: QuestionId,
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: String,
    pub questions: Vec<Question>,
}

impl Theme {
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subanswer {
    pub label: String,
    pub shares: RawShares,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub label: String,
    pub shares: RawShares,
    /// Empty unless the owning record is in drill-down mode.
    pub subanswers: Vec<Subanswer>,
}

/// How a question is presented, decided by its two availability flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresentationMode {
    /// answersAvailable = Yes, gradientAvailable = No.
    FlatAnswers,
    /// answersAvailable = Yes, gradientAvailable = Yes.
    DrillDown,
    /// answersAvailable = No, gradientAvailable = Yes.
    GradientOnly,
}

impl PresentationMode {
    /// Returns `None` for the invalid No/No combination.
    pub fn from_flags(answers_available: bool, gradient_available: bool) -> Option<Self> {
        match (answers_available, gradient_available) {
            (true, false) => Some(PresentationMode::FlatAnswers),
            (true, true) => Some(PresentationMode::DrillDown),
            (false, true) => Some(PresentationMode::GradientOnly),
            (false, false) => None,
        }
    }

    pub fn has_answers(self) -> bool {
        !matches!(self, PresentationMode::GradientOnly)
    }

    pub fn has_gradient(self) -> bool {
        !matches!(self, PresentationMode::FlatAnswers)
    }

    pub fn label(self) -> &'static str {
        match self {
            PresentationMode::FlatAnswers => "answers",
            PresentationMode::DrillDown => "answers + subanswers",
            PresentationMode::GradientOnly => "subanswers only",
        }
    }
}

/// Entries of a country record, shaped by its presentation mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordBody {
    Flat(Vec<Answer>),
    DrillDown(Vec<Answer>),
    GradientOnly(Vec<Subanswer>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryRecord {
    pub id: QuestionId,
    pub body: RecordBody,
}

impl CountryRecord {
    pub fn mode(&self) -> PresentationMode {
        match self.body {
            RecordBody::Flat(_) => PresentationMode::FlatAnswers,
            RecordBody::DrillDown(_) => PresentationMode::DrillDown,
            RecordBody::GradientOnly(_) => PresentationMode::GradientOnly,
        }
    }

    pub fn answers_available(&self) -> bool {
        self.mode().has_answers()
    }

    pub fn gradient_available(&self) -> bool {
        self.mode().has_gradient()
    }

    /// Top-level answers; empty in gradient-only mode.
    pub fn answers(&self) -> &[Answer] {
        match &self.body {
            RecordBody::Flat(answers) | RecordBody::DrillDown(answers) => answers,
            RecordBody::GradientOnly(_) => &[],
        }
    }

    pub fn answer(&self, label: &str) -> Result<&Answer> {
        self.answers()
            .iter()
            .find(|a| a.label == label)
            .ok_or_else(|| SurveyError::not_found(NodeKind::Answer, label))
    }

    /// The implicit subanswer group of a gradient-only record.
    pub fn implicit_group(&self) -> Option<&[Subanswer]> {
        match &self.body {
            RecordBody::GradientOnly(subs) => Some(subs),
            _ => None,
        }
    }
}

/// Entity counts, for logging and the CLI summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DatasetStats {
    pub themes: usize,
    pub questions: usize,
    pub answers: usize,
    pub subanswers: usize,
}

/// The immutable dataset: themes in document order plus country records by id.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub(crate) themes: Vec<Theme>,
    pub(crate) records: HashMap<QuestionId, CountryRecord>,
}

impl Dataset {
    pub fn themes(&self) -> &[Theme] {
        &self.themes
    }

    /// Theme names in document order.
    pub fn list_themes(&self) -> Vec<&str> {
        self.themes.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn theme(&self, name: &str) -> Result<&Theme> {
        self.themes
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| SurveyError::not_found(NodeKind::Theme, name))
    }

    pub fn list_questions(&self, theme: &str) -> Result<&[Question]> {
        self.theme(theme).map(|t| t.questions.as_slice())
    }

    pub fn resolve_country_record(&self, question_id: &str) -> Result<&CountryRecord> {
        self.records
            .get(question_id)
            .ok_or_else(|| SurveyError::not_found(NodeKind::CountryRecord, question_id))
    }

    /// The theme that lists `question_id`, if any.
    pub fn theme_of(&self, question_id: &str) -> Option<&Theme> {
        self.themes
            .iter()
            .find(|t| t.question(question_id).is_some())
    }

    pub fn stats(&self) -> DatasetStats {
        let mut stats = DatasetStats {
            themes: self.themes.len(),
            questions: self.themes.iter().map(|t| t.questions.len()).sum(),
            ..DatasetStats::default()
        };
        for record in self.records.values() {
            match &record.body {
                RecordBody::Flat(answers) | RecordBody::DrillDown(answers) => {
                    stats.answers += answers.len();
                    stats.subanswers += answers.iter().map(|a| a.subanswers.len()).sum::<usize>();
                }
                RecordBody::GradientOnly(subs) => stats.subanswers += subs.len(),
            }
        }
        stats
    }
}
