//! Built-in sample dataset.
//!
//! Small but covers every presentation mode, so the viewer can run without
//! dataset files (`--demo`) and tests have something realistic to walk.

use serde_json::{json, Map, Value};

use crate::dataset::Dataset;
use crate::domain::COUNTRIES;
use crate::error::Result;

fn shares(values: [u8; 10]) -> Map<String, Value> {
    COUNTRIES
        .iter()
        .zip(values)
        .map(|(c, v)| (c.code().to_string(), Value::String(format!("{v}%"))))
        .collect()
}

fn entry(label_key: &str, label: &str, values: [u8; 10]) -> Value {
    let mut map = shares(values);
    map.insert(label_key.to_string(), Value::String(label.to_string()));
    Value::Object(map)
}

fn answer_with_subs(label: &str, values: [u8; 10], subs: Vec<Value>) -> Value {
    let mut value = entry("answer", label, values);
    if let Value::Object(map) = &mut value {
        map.insert(label.to_string(), Value::Array(subs));
    }
    value
}

pub fn sample_themes_json() -> String {
    json!({
        "questions": {
            "Habits": [
                { "Q1": "Do you shop online?" },
                { "Q2": "How often do you travel abroad?" }
            ],
            "Media": [
                { "Q3": "Which platform do you use for news?" }
            ]
        }
    })
    .to_string()
}

pub fn sample_countries_json() -> String {
    json!({
        "Q1": {
            "answersAvailable": "Yes",
            "gradientAvailable": "No",
            "data": [
                entry("answer", "Yes", [10, 55, 48, 62, 40, 51, 45, 58, 44, 50]),
                entry("answer", "No", [90, 45, 52, 38, 60, 49, 55, 42, 56, 50]),
            ]
        },
        "Q2": {
            "answersAvailable": "Yes",
            "gradientAvailable": "Yes",
            "data": [
                answer_with_subs("Often", [60, 58, 53, 65, 53, 53, 60, 60, 54, 53], vec![
                    entry("subAnswer", "Monthly", [25, 30, 20, 35, 28, 22, 31, 26, 24, 27]),
                    entry("subAnswer", "Weekly", [35, 28, 33, 30, 25, 31, 29, 34, 30, 26]),
                ]),
                answer_with_subs("Rarely", [40, 42, 47, 35, 47, 47, 40, 40, 46, 47], vec![
                    entry("subAnswer", "Yearly", [15, 22, 27, 20, 17, 25, 18, 21, 26, 30]),
                    entry("subAnswer", "Never", [25, 20, 20, 15, 30, 22, 22, 19, 20, 17]),
                ]),
            ]
        },
        "Q3": {
            "answersAvailable": "No",
            "gradientAvailable": "Yes",
            "data": [
                entry("subAnswer", "A", [30, 25, 20, 35, 40, 15, 22, 28, 33, 18]),
                entry("subAnswer", "B", [20, 30, 25, 15, 10, 35, 28, 22, 17, 32]),
                entry("subAnswer", "C", [10, 12, 30, 20, 25, 20, 18, 25, 20, 15]),
            ]
        }
    })
    .to_string()
}

pub fn sample_dataset() -> Result<Dataset> {
    Dataset::from_json_strs(&sample_themes_json(), &sample_countries_json())
}
