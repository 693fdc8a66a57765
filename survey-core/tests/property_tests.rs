//! Property tests for navigation and series invariants.
//!
//! Uses proptest to verify:
//! 1. Stacking additivity: offsets are prefix sums, totals stay within 100
//! 2. Overflowing stacks are reported as range errors
//! 3. Country order is fixed for every chart reachable by random navigation
//! 4. Rejected transitions never change the selection
//! 5. Reset is idempotent and re-selection is repeatable
//! 6. Percentages survive parsing unchanged

mod common;

use common::*;
use proptest::prelude::*;
use survey_core::sample::sample_dataset;
use survey_core::series::SeriesBody;
use survey_core::{Country, ErrorKind, Palette, SelectionPath, SurveyError, SurveyViewer, COUNTRIES};

// ── Strategies (proptest) ────────────────────────────────────────────

/// 1..=8 rows of per-country values whose column sums never exceed 100.
fn arb_stack() -> impl Strategy<Value = Vec<Vec<u32>>> {
    (1usize..=8).prop_flat_map(|n| {
        let cap = 100 / n as u32;
        prop::collection::vec(prop::collection::vec(0..=cap, 10), n)
    })
}

#[derive(Debug, Clone)]
enum Action {
    Theme(usize),
    Question(usize),
    Answer(usize),
    Group(usize),
    Reset,
    Back,
}

const THEMES: [&str; 3] = ["Habits", "Media", "Nope"];
const QUESTIONS: [&str; 4] = ["Q1", "Q2", "Q3", "Q404"];
const ANSWERS: [&str; 5] = ["Yes", "No", "Often", "Rarely", "A"];

fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        (0..THEMES.len()).prop_map(Action::Theme),
        (0..QUESTIONS.len()).prop_map(Action::Question),
        (0..ANSWERS.len()).prop_map(Action::Answer),
        (0..ANSWERS.len()).prop_map(Action::Group),
        Just(Action::Reset),
        Just(Action::Back),
    ]
}

fn apply(v: &mut SurveyViewer, action: &Action) -> Result<(), SurveyError> {
    match action {
        Action::Theme(i) => v.select_theme(THEMES[*i]),
        Action::Question(i) => v.select_question(QUESTIONS[*i]),
        Action::Answer(i) => v.select_answer(ANSWERS[*i]),
        Action::Group(i) => v.select_subanswer_group(ANSWERS[*i]),
        Action::Reset => {
            v.reset();
            Ok(())
        }
        Action::Back => {
            v.back();
            Ok(())
        }
    }
}

/// The path only names nodes that exist and contain each other.
fn assert_consistent(v: &SurveyViewer) {
    let path = v.path();
    let ds = v.dataset();
    if let Some(question) = path.question() {
        let theme = ds.theme(path.theme().unwrap()).unwrap();
        assert!(theme.question(question).is_some());
        let record = ds.resolve_country_record(question).unwrap();
        if let Some(answer) = path.answer() {
            assert!(record.answer(answer).is_ok());
        }
        if path.group().is_some() {
            assert!(record.gradient_available());
        }
    }
}

// ── 1-2. Stacking ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn offsets_are_prefix_sums(stack in arb_stack()) {
        let subs = stack
            .iter()
            .enumerate()
            .map(|(i, values)| subanswer(&format!("s{i}"), shares_of(values)))
            .collect();
        let ds = single_question("Q1", record("No", "Yes", subs));
        let mut v = SurveyViewer::new(ds, Palette::default());
        v.select_theme("Theme").unwrap();
        v.select_question("Q1").unwrap();

        let series = v.current_chart_series().unwrap().unwrap();
        let SeriesBody::Stacked { rows } = &series.body else {
            panic!("expected stacked series");
        };
        prop_assert_eq!(rows.len(), stack.len());

        for i in 0..Country::COUNT {
            let mut running = 0;
            for (k, row) in rows.iter().enumerate() {
                prop_assert_eq!(row.offsets[i], running);
                prop_assert_eq!(row.values[i], stack[k][i]);
                running += row.values[i];
            }
            prop_assert_eq!(series.totals()[i], running);
            prop_assert!(running <= 100);
        }
    }

    #[test]
    fn overflowing_columns_are_range_errors(a in 51u32..=100, b in 51u32..=100, col in 0usize..10) {
        let mut first = vec![0; 10];
        let mut second = vec![0; 10];
        first[col] = a;
        second[col] = b;
        let ds = single_question(
            "Q1",
            record("No", "Yes", vec![
                subanswer("a", shares_of(&first)),
                subanswer("b", shares_of(&second)),
            ]),
        );
        let mut v = SurveyViewer::new(ds, Palette::default());
        v.select_theme("Theme").unwrap();
        v.select_question("Q1").unwrap();
        let err = v.current_chart_series().unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::Range);
    }
}

// ── 3-5. Navigation ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn random_walks_keep_invariants(actions in prop::collection::vec(arb_action(), 1..40)) {
        let mut v = SurveyViewer::new(sample_dataset().unwrap(), Palette::default());
        for action in &actions {
            let before = v.path().clone();
            if apply(&mut v, action).is_err() {
                prop_assert_eq!(v.path(), &before);
            }
            assert_consistent(&v);

            if let Some(series) = v.current_chart_series().unwrap() {
                prop_assert_eq!(&series.countries, &COUNTRIES.to_vec());
            } else {
                prop_assert!(!v.path().is_chartable());
            }
        }

        v.reset();
        prop_assert_eq!(v.path(), &SelectionPath::Empty);
        v.reset();
        prop_assert_eq!(v.path(), &SelectionPath::Empty);
    }

    #[test]
    fn reselecting_a_theme_is_repeatable(theme in 0usize..2, noise in prop::collection::vec(arb_action(), 0..10)) {
        let mut v = SurveyViewer::new(sample_dataset().unwrap(), Palette::default());
        v.select_theme(THEMES[theme]).unwrap();
        let first = v.available_questions(THEMES[theme]).unwrap().to_vec();

        for action in &noise {
            let _ = apply(&mut v, action);
        }
        v.reset();
        v.select_theme(THEMES[theme]).unwrap();
        prop_assert_eq!(v.available_questions(THEMES[theme]).unwrap(), first.as_slice());
    }
}

// ── 6. Parsing ───────────────────────────────────────────────────────

proptest! {
    #[test]
    fn single_row_values_match_source(values in prop::collection::vec(0u32..=100, 10)) {
        let ds = single_question("Q1", record("Yes", "No", vec![answer("X", shares_of(&values))]));
        let mut v = SurveyViewer::new(ds, Palette::default());
        v.select_theme("Theme").unwrap();
        v.select_question("Q1").unwrap();
        v.select_answer("X").unwrap();

        let series = v.current_chart_series().unwrap().unwrap();
        let SeriesBody::Single { values: got } = &series.body else {
            panic!("expected single-row series");
        };
        prop_assert_eq!(got, &values);
    }

    #[test]
    fn non_numeric_percentages_are_parse_errors(junk in "[a-z]{1,6}") {
        let raw = format!("{junk}%");
        let ds = single_question("Q1", record("Yes", "No", vec![answer("X", shares(&raw, "1%"))]));
        let mut v = SurveyViewer::new(ds, Palette::default());
        v.select_theme("Theme").unwrap();
        v.select_question("Q1").unwrap();
        v.select_answer("X").unwrap();
        prop_assert_eq!(v.current_chart_series().unwrap_err().kind(), ErrorKind::Parse);
    }
}
