//! Building a [`Dataset`] from the theme and country documents.
//!
//! Structure is checked eagerly here: cross-references in both directions,
//! presentation modes, labels, country keys and subanswer lists. Percentage
//! values are left as strings and parsed by the series builder.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde_json::Value;

use crate::dataset::model::{
    Answer, CountryRecord, Dataset, PresentationMode, Question, RawShares, RecordBody, Subanswer,
    Theme,
};
use crate::dataset::raw::{CountryDocument, RawEntry, RawRecord, ThemeDocument};
use crate::domain::{CountryTable, QuestionId, COUNTRIES};
use crate::error::{Result, SurveyError};

impl Dataset {
    /// Read and validate both dataset files.
    pub fn load(themes_path: &Path, countries_path: &Path) -> Result<Self> {
        let themes = read_json::<ThemeDocument>(themes_path)?;
        let countries = read_json::<CountryDocument>(countries_path)?;
        let dataset = Self::from_documents(themes, countries)?;

        let stats = dataset.stats();
        tracing::info!(
            themes = stats.themes,
            questions = stats.questions,
            answers = stats.answers,
            subanswers = stats.subanswers,
            "loaded dataset from {} and {}",
            themes_path.display(),
            countries_path.display(),
        );
        Ok(dataset)
    }

    /// Parse and validate both documents from JSON text.
    pub fn from_json_strs(themes_json: &str, countries_json: &str) -> Result<Self> {
        let themes: ThemeDocument =
            serde_json::from_str(themes_json).map_err(|source| SurveyError::Json {
                origin: "theme document".into(),
                source,
            })?;
        let countries: CountryDocument =
            serde_json::from_str(countries_json).map_err(|source| SurveyError::Json {
                origin: "country document".into(),
                source,
            })?;
        Self::from_documents(themes, countries)
    }

    pub fn from_documents(themes: ThemeDocument, countries: CountryDocument) -> Result<Self> {
        let themes = build_themes(themes)?;

        let mut records = HashMap::with_capacity(countries.records.len());
        for (id, raw) in countries.records.0 {
            if records.contains_key(&id) {
                return Err(SurveyError::integrity(&id, "duplicate country record"));
            }
            let record = build_record(&id, raw)?;
            records.insert(id, record);
        }

        check_cross_references(&themes, &records)?;

        Ok(Dataset { themes, records })
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|source| SurveyError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| SurveyError::Json {
        origin: path.display().to_string(),
        source,
    })
}

fn build_themes(doc: ThemeDocument) -> Result<Vec<Theme>> {
    let mut seen_themes = HashSet::new();
    let mut seen_questions: HashSet<QuestionId> = HashSet::new();
    let mut themes = Vec::with_capacity(doc.questions.len());

    for (name, entries) in doc.questions.0 {
        if !seen_themes.insert(name.clone()) {
            return Err(SurveyError::integrity(&name, "duplicate theme"));
        }

        let mut questions = Vec::with_capacity(entries.len());
        for entry in entries {
            let mut pairs = entry.0.into_iter();
            let (id, prompt) = match (pairs.next(), pairs.next()) {
                (Some(pair), None) => pair,
                _ => {
                    return Err(SurveyError::integrity(
                        &name,
                        "each question entry must map exactly one id to its prompt",
                    ))
                }
            };
            if !seen_questions.insert(id.clone()) {
                return Err(SurveyError::integrity(&id, "question id listed more than once"));
            }
            questions.push(Question { id, prompt });
        }

        themes.push(Theme { name, questions });
    }

    Ok(themes)
}

fn build_record(id: &str, raw: RawRecord) -> Result<CountryRecord> {
    let mode = PresentationMode::from_flags(
        raw.answers_available.is_yes(),
        raw.gradient_available.is_yes(),
    )
    .ok_or_else(|| {
        SurveyError::integrity(id, "answersAvailable and gradientAvailable are both No")
    })?;

    if raw.data.is_empty() {
        return Err(SurveyError::integrity(id, "record has no data entries"));
    }

    let body = match mode {
        PresentationMode::FlatAnswers => RecordBody::Flat(build_answers(id, raw.data, false)?),
        PresentationMode::DrillDown => RecordBody::DrillDown(build_answers(id, raw.data, true)?),
        PresentationMode::GradientOnly => RecordBody::GradientOnly(build_subanswers(id, raw.data)?),
    };

    Ok(CountryRecord {
        id: id.to_string(),
        body,
    })
}

fn build_answers(id: &str, entries: Vec<RawEntry>, with_subanswers: bool) -> Result<Vec<Answer>> {
    let mut labels = HashSet::new();
    let mut answers = Vec::with_capacity(entries.len());

    for mut entry in entries {
        let label = entry
            .answer
            .take()
            .ok_or_else(|| SurveyError::integrity(id, "answer entry without an 'answer' label"))?;
        if !labels.insert(label.clone()) {
            return Err(SurveyError::integrity(
                id,
                format!("duplicate answer label '{label}'"),
            ));
        }

        let subanswers = if with_subanswers {
            // Keyed by the answer's own label. A label that is also a country
            // code keeps its percentage unless the value is the list itself.
            let nested = match entry.fields.get(&label) {
                Some(Value::Array(_)) => entry.fields.remove(&label),
                _ => None,
            };
            let nested = nested.ok_or_else(|| {
                SurveyError::integrity(id, format!("answer '{label}' has no subanswer list"))
            })?;
            let raw: Vec<RawEntry> = serde_json::from_value(nested).map_err(|e| {
                SurveyError::integrity(id, format!("subanswers of '{label}': {e}"))
            })?;
            if raw.is_empty() {
                return Err(SurveyError::integrity(
                    id,
                    format!("answer '{label}' has an empty subanswer list"),
                ));
            }
            build_subanswers(id, raw)?
        } else {
            Vec::new()
        };

        let shares = extract_shares(id, &label, &entry.fields)?;
        answers.push(Answer {
            label,
            shares,
            subanswers,
        });
    }

    Ok(answers)
}

fn build_subanswers(id: &str, entries: Vec<RawEntry>) -> Result<Vec<Subanswer>> {
    if entries.is_empty() {
        return Err(SurveyError::integrity(id, "empty subanswer group"));
    }
    entries
        .into_iter()
        .map(|entry| {
            let label = entry.sub_answer.ok_or_else(|| {
                SurveyError::integrity(id, "subanswer entry without a 'subAnswer' label")
            })?;
            let shares = extract_shares(id, &label, &entry.fields)?;
            Ok(Subanswer { label, shares })
        })
        .collect()
}

fn extract_shares(
    id: &str,
    label: &str,
    fields: &serde_json::Map<String, Value>,
) -> Result<RawShares> {
    let mut values: [String; 10] = Default::default();
    for country in COUNTRIES {
        let value = fields.get(country.code()).ok_or_else(|| {
            SurveyError::integrity(id, format!("'{label}' has no value for {country}"))
        })?;
        // Non-string values are kept verbatim and rejected when parsed.
        values[country.index()] = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
    }
    Ok(CountryTable::new(values))
}

fn check_cross_references(themes: &[Theme], records: &HashMap<QuestionId, CountryRecord>) -> Result<()> {
    let mut listed = HashSet::new();
    for theme in themes {
        for question in &theme.questions {
            if !records.contains_key(&question.id) {
                return Err(SurveyError::integrity(
                    &question.id,
                    format!(
                        "question in theme '{}' has no country record",
                        theme.name
                    ),
                ));
            }
            listed.insert(question.id.as_str());
        }
    }

    // Report orphans in a stable order.
    let mut orphans: Vec<&str> = records
        .keys()
        .map(String::as_str)
        .filter(|id| !listed.contains(id))
        .collect();
    orphans.sort_unstable();
    if let Some(id) = orphans.first() {
        return Err(SurveyError::integrity(
            *id,
            "country record is not listed under any theme",
        ));
    }

    Ok(())
}
