//! End-to-end navigation scenarios through the viewer interface.
//!
//! Tests:
//! 1. Mode dispatch for each availability-flag combination
//! 2. Invalid transitions leave the selection untouched
//! 3. Lazy validation of percentage strings
//! 4. Cross-file integrity is enforced at load

mod common;

use common::*;
use survey_core::series::SeriesBody;
use survey_core::{
    Country, Dataset, ErrorKind, Palette, SelectionPath, SubanswerGroup, SurveyViewer, COUNTRIES,
};

fn viewer(dataset: Dataset) -> SurveyViewer {
    SurveyViewer::new(dataset, Palette::default())
}

#[test]
fn flat_answer_yields_titled_single_row() {
    let ds = single_question(
        "Q1",
        record("Yes", "No", vec![answer("X", shares("10%", "0%"))]),
    );
    let mut v = viewer(ds);
    v.select_theme("Theme").unwrap();
    v.select_question("Q1").unwrap();
    v.select_answer("X").unwrap();

    let series = v.current_chart_series().unwrap().unwrap();
    assert_eq!(series.title.as_deref(), Some("Survey Data for X"));
    assert_eq!(series.countries, COUNTRIES.to_vec());
    let SeriesBody::Single { values } = &series.body else {
        panic!("expected a single-row series");
    };
    assert_eq!(values[Country::Ksa.index()], 10);
}

#[test]
fn gradient_only_question_charts_on_entry() {
    let ds = single_question(
        "Q1",
        record(
            "No",
            "Yes",
            vec![
                subanswer("A", shares("30%", "0%")),
                subanswer("B", shares("20%", "0%")),
            ],
        ),
    );
    let mut v = viewer(ds);
    v.select_theme("Theme").unwrap();
    v.select_question("Q1").unwrap();

    let series = v.current_chart_series().unwrap().unwrap();
    assert_eq!(series.title, None);
    let SeriesBody::Stacked { rows } = &series.body else {
        panic!("expected a stacked series");
    };
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].label, "B");
    assert_eq!(rows[1].offsets[Country::Ksa.index()], 30);
}

#[test]
fn drill_down_answer_exposes_group_before_charting() {
    let ds = single_question(
        "Q1",
        record(
            "Yes",
            "Yes",
            vec![answer_with_subs(
                "Often",
                shares("50%", "0%"),
                vec![
                    subanswer("Daily", shares("20%", "0%")),
                    subanswer("Weekly", shares("30%", "0%")),
                ],
            )],
        ),
    );
    let mut v = viewer(ds);
    v.select_theme("Theme").unwrap();
    v.select_question("Q1").unwrap();
    assert!(v.current_chart_series().unwrap().is_none());
    assert_eq!(v.available_answers("Q1").unwrap(), vec!["Often"]);

    v.select_subanswer_group("Often").unwrap();
    assert_eq!(
        v.available_subanswers("Q1", &SubanswerGroup::Of("Often".into()))
            .unwrap(),
        vec!["Daily", "Weekly"]
    );
    let series = v.current_chart_series().unwrap().unwrap();
    assert_eq!(series.row_count(), 2);
    assert_eq!(series.totals()[0], 50);
}

#[test]
fn neither_mode_fails_at_load() {
    let themes = r#"{"questions": {"Theme": [{"Q1": "Prompt?"}]}}"#;
    let countries = serde_json::json!({
        "Q1": record("No", "No", vec![answer("X", shares("1%", "1%"))])
    });
    let err = Dataset::from_json_strs(themes, &countries.to_string()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DataIntegrity);
}

#[test]
fn select_question_on_empty_state_fails() {
    let mut v = viewer(survey_core::sample::sample_dataset().unwrap());
    let err = v.select_question("Q1").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(v.path(), &SelectionPath::Empty);
}

#[test]
fn failed_answer_selection_keeps_current_chart() {
    let mut v = viewer(survey_core::sample::sample_dataset().unwrap());
    v.select_theme("Habits").unwrap();
    v.select_question("Q1").unwrap();
    v.select_answer("Yes").unwrap();
    let before = v.current_chart_series().unwrap();

    assert!(v.select_answer("Maybe").is_err());
    assert_eq!(v.current_chart_series().unwrap(), before);
}

#[test]
fn malformed_percentage_surfaces_at_build_time() {
    let ds = single_question(
        "Q1",
        record(
            "Yes",
            "No",
            vec![
                answer("Good", shares("10%", "10%")),
                answer("Bad", shares("abc%", "10%")),
            ],
        ),
    );
    let mut v = viewer(ds);
    v.select_theme("Theme").unwrap();
    v.select_question("Q1").unwrap();

    v.select_answer("Good").unwrap();
    assert!(v.current_chart_series().is_ok());

    v.select_answer("Bad").unwrap();
    let err = v.current_chart_series().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
}

#[test]
fn out_of_range_percentage_is_not_clamped() {
    let ds = single_question(
        "Q1",
        record("Yes", "No", vec![answer("Over", shares("120%", "0%"))]),
    );
    let mut v = viewer(ds);
    v.select_theme("Theme").unwrap();
    v.select_question("Q1").unwrap();
    v.select_answer("Over").unwrap();
    assert_eq!(v.current_chart_series().unwrap_err().kind(), ErrorKind::Range);
}

#[test]
fn overflowing_fixture_stack_is_flagged() {
    let ds = single_question(
        "Q1",
        record(
            "No",
            "Yes",
            vec![
                subanswer("A", shares("60%", "0%")),
                subanswer("B", shares("50%", "0%")),
            ],
        ),
    );
    let mut v = viewer(ds);
    v.select_theme("Theme").unwrap();
    // Navigation itself succeeds; only the chart is refused.
    v.select_question("Q1").unwrap();
    assert_eq!(v.current_chart_series().unwrap_err().kind(), ErrorKind::Range);
}

#[test]
fn reset_then_reselect_gives_same_questions() {
    let mut v = viewer(survey_core::sample::sample_dataset().unwrap());
    v.select_theme("Habits").unwrap();
    let first = v.available_questions("Habits").unwrap().to_vec();
    v.reset();
    v.reset();
    assert_eq!(v.path(), &SelectionPath::Empty);
    v.select_theme("Habits").unwrap();
    assert_eq!(v.available_questions("Habits").unwrap(), first.as_slice());
}

#[test]
fn orphan_country_record_aborts_load() {
    let themes = r#"{"questions": {"Theme": [{"Q1": "Prompt?"}]}}"#;
    let countries = serde_json::json!({
        "Q1": record("Yes", "No", vec![answer("X", shares("1%", "1%"))]),
        "Q2": record("Yes", "No", vec![answer("X", shares("1%", "1%"))]),
    });
    let err = Dataset::from_json_strs(themes, &countries.to_string()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DataIntegrity);
    assert!(err.to_string().contains("Q2"));
}
