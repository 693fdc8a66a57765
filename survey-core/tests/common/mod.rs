//! JSON fixture builders shared by the integration tests.

#![allow(dead_code)]

use serde_json::{json, Map, Value};
use survey_core::{Dataset, COUNTRIES};

/// Percentages for every country: `first` at KSA, `rest` elsewhere.
pub fn shares(first: &str, rest: &str) -> Map<String, Value> {
    COUNTRIES
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let v = if i == 0 { first } else { rest };
            (c.code().to_string(), Value::String(v.to_string()))
        })
        .collect()
}

/// Percentages from explicit per-country values.
pub fn shares_of(values: &[u32]) -> Map<String, Value> {
    COUNTRIES
        .iter()
        .zip(values)
        .map(|(c, v)| (c.code().to_string(), Value::String(format!("{v}%"))))
        .collect()
}

pub fn labelled(key: &str, label: &str, mut shares: Map<String, Value>) -> Value {
    shares.insert(key.to_string(), Value::String(label.to_string()));
    Value::Object(shares)
}

pub fn answer(label: &str, shares: Map<String, Value>) -> Value {
    labelled("answer", label, shares)
}

pub fn subanswer(label: &str, shares: Map<String, Value>) -> Value {
    labelled("subAnswer", label, shares)
}

pub fn answer_with_subs(label: &str, shares: Map<String, Value>, subs: Vec<Value>) -> Value {
    let mut value = answer(label, shares);
    value[label] = Value::Array(subs);
    value
}

pub fn record(answers: &str, gradient: &str, data: Vec<Value>) -> Value {
    json!({
        "answersAvailable": answers,
        "gradientAvailable": gradient,
        "data": data,
    })
}

/// A one-theme, one-question dataset around `record`.
pub fn single_question(id: &str, record: Value) -> Dataset {
    let themes = json!({ "questions": { "Theme": [ { id: "Prompt?" } ] } });
    let countries = json!({ id: record });
    Dataset::from_json_strs(&themes.to_string(), &countries.to_string())
        .expect("fixture dataset is valid")
}
