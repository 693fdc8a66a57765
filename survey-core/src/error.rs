//! Error taxonomy for the survey model.
//!
//! Every failure maps onto one of four kinds ([`ErrorKind`]) plus a load
//! variant for I/O and JSON syntax problems in the input files.

use std::path::PathBuf;

use crate::domain::Country;

/// Broad error category, used by the shells for display and exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    DataIntegrity,
    Parse,
    Range,
    Load,
}

impl ErrorKind {
    pub fn label(self) -> &'static str {
        match self {
            ErrorKind::NotFound => "NOT FOUND",
            ErrorKind::DataIntegrity => "INTEGRITY",
            ErrorKind::Parse => "PARSE",
            ErrorKind::Range => "RANGE",
            ErrorKind::Load => "LOAD",
        }
    }
}

/// What kind of dataset node a lookup was aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Theme,
    Question,
    Answer,
    SubanswerGroup,
    CountryRecord,
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            NodeKind::Theme => "theme",
            NodeKind::Question => "question",
            NodeKind::Answer => "answer",
            NodeKind::SubanswerGroup => "subanswer group",
            NodeKind::CountryRecord => "country record",
        };
        f.write_str(s)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SurveyError {
    #[error("{kind} not found: {name}")]
    NotFound { kind: NodeKind, name: String },

    #[error("{kind} '{name}' is not reachable from the current selection: {reason}")]
    InvalidTransition {
        kind: NodeKind,
        name: String,
        reason: &'static str,
    },

    #[error("data integrity error for '{id}': {reason}")]
    DataIntegrity { id: String, reason: String },

    #[error("malformed percentage '{value}' for {country} in '{node}' (expected <integer>%)")]
    Parse {
        node: String,
        country: Country,
        value: String,
    },

    #[error("percentage {value} for {country} in '{node}' is outside 0..=100")]
    OutOfRange {
        node: String,
        country: Country,
        value: i64,
    },

    #[error("stacked total {total} for {country} in '{node}' exceeds 100")]
    StackOverflow {
        node: String,
        country: Country,
        total: u32,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {origin}: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl SurveyError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SurveyError::NotFound { .. } | SurveyError::InvalidTransition { .. } => {
                ErrorKind::NotFound
            }
            SurveyError::DataIntegrity { .. } => ErrorKind::DataIntegrity,
            SurveyError::Parse { .. } => ErrorKind::Parse,
            SurveyError::OutOfRange { .. } | SurveyError::StackOverflow { .. } => ErrorKind::Range,
            SurveyError::Io { .. } | SurveyError::Json { .. } | SurveyError::Config { .. } => {
                ErrorKind::Load
            }
        }
    }

    pub(crate) fn not_found(kind: NodeKind, name: impl Into<String>) -> Self {
        SurveyError::NotFound {
            kind,
            name: name.into(),
        }
    }

    pub(crate) fn integrity(id: impl Into<String>, reason: impl Into<String>) -> Self {
        SurveyError::DataIntegrity {
            id: id.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = SurveyError> = std::result::Result<T, E>;
