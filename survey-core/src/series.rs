//! Series builder: turns the active selection into renderer-ready numbers.
//!
//! A [`ChartSeries`] is a pure value recomputed on every selection change.
//! Single-answer charts carry one row; subanswer groups carry one stacked row
//! per subanswer in declared order, with left-offsets equal to the running
//! total of the rows before it.

use serde::Serialize;

use crate::dataset::{Answer, Dataset, RawShares, Subanswer};
use crate::domain::{Country, CountryTable, Percent, COUNTRIES};
use crate::error::{NodeKind, Result, SurveyError};
use crate::palette::Palette;
use crate::selection::{chartable_paths, SelectionPath, SubanswerGroup};

/// Value-axis label for every chart.
pub const AXIS_LABEL: &str = "Percentage (%)";
/// Upper bound of the value axis; stacks must fit inside it.
pub const AXIS_MAX: u32 = 100;
/// Legend heading for stacked charts.
pub const LEGEND_TITLE: &str = "SubAnswers";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StackedRow {
    pub label: String,
    pub color_index: usize,
    pub values: Vec<u32>,
    /// Left edge of this segment at each country.
    pub offsets: Vec<u32>,
}

impl StackedRow {
    /// Right edge of this segment at country index `i`.
    pub fn end(&self, i: usize) -> u32 {
        self.offsets[i] + self.values[i]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SeriesBody {
    Single { values: Vec<u32> },
    Stacked { rows: Vec<StackedRow> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSeries {
    pub title: Option<String>,
    pub countries: Vec<Country>,
    #[serde(flatten)]
    pub body: SeriesBody,
}

impl ChartSeries {
    pub fn is_stacked(&self) -> bool {
        matches!(self.body, SeriesBody::Stacked { .. })
    }

    pub fn row_count(&self) -> usize {
        match &self.body {
            SeriesBody::Single { .. } => 1,
            SeriesBody::Stacked { rows } => rows.len(),
        }
    }

    /// Bar length per country: the value itself, or the stack's cumulative total.
    pub fn totals(&self) -> Vec<u32> {
        match &self.body {
            SeriesBody::Single { values } => values.clone(),
            SeriesBody::Stacked { rows } => (0..self.countries.len())
                .map(|i| rows.iter().map(|r| r.values[i]).sum())
                .collect(),
        }
    }
}

/// Builds chart series using a fixed palette for segment colors.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeriesBuilder {
    palette: Palette,
}

impl SeriesBuilder {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Series for the current selection, or `None` while the selection is
    /// still at a list-of-choices level.
    pub fn build(&self, dataset: &Dataset, path: &SelectionPath) -> Result<Option<ChartSeries>> {
        let series = match path {
            SelectionPath::Empty
            | SelectionPath::ThemeSelected { .. }
            | SelectionPath::QuestionSelected { .. } => return Ok(None),

            SelectionPath::AnswerSelected {
                question, answer, ..
            } => {
                let record = dataset.resolve_country_record(question)?;
                self.single(question, record.answer(answer)?)?
            }

            SelectionPath::SubanswerGroupSelected {
                question, group, ..
            } => {
                let record = dataset.resolve_country_record(question)?;
                match group {
                    SubanswerGroup::Implicit => {
                        let subs = record.implicit_group().ok_or_else(|| {
                            SurveyError::not_found(NodeKind::SubanswerGroup, question.as_str())
                        })?;
                        self.stacked(None, question, subs)?
                    }
                    SubanswerGroup::Of(label) => {
                        let answer = record.answer(label)?;
                        if answer.subanswers.is_empty() {
                            return Err(SurveyError::not_found(
                                NodeKind::SubanswerGroup,
                                label.as_str(),
                            ));
                        }
                        self.stacked(
                            Some(format!("Survey Data for All Subanswers of {}", answer.label)),
                            question,
                            &answer.subanswers,
                        )?
                    }
                }
            }
        };

        tracing::debug!(
            path = %path,
            rows = series.row_count(),
            stacked = series.is_stacked(),
            "built chart series"
        );
        Ok(Some(series))
    }

    /// Build the series of every leaf selection, keeping failures alongside
    /// successes so one bad node does not hide the rest.
    pub fn build_all(&self, dataset: &Dataset) -> Vec<(SelectionPath, Result<ChartSeries>)> {
        chartable_paths(dataset)
            .into_iter()
            .map(|path| {
                let built = self.build(dataset, &path).and_then(|series| {
                    series.ok_or_else(|| {
                        SurveyError::not_found(NodeKind::SubanswerGroup, path.to_string())
                    })
                });
                (path, built)
            })
            .collect()
    }

    /// Single-row series for one answer.
    pub fn single(&self, question: &str, answer: &Answer) -> Result<ChartSeries> {
        let node = format!("{question}: {}", answer.label);
        let values = parse_shares(&node, &answer.shares)?;
        Ok(ChartSeries {
            title: Some(format!("Survey Data for {}", answer.label)),
            countries: COUNTRIES.to_vec(),
            body: SeriesBody::Single {
                values: values.as_slice().to_vec(),
            },
        })
    }

    /// Stacked series, one row per subanswer in declared order.
    pub fn stacked(
        &self,
        title: Option<String>,
        question: &str,
        subanswers: &[Subanswer],
    ) -> Result<ChartSeries> {
        let mut running = [0u32; Country::COUNT];
        let mut rows = Vec::with_capacity(subanswers.len());

        for (i, sub) in subanswers.iter().enumerate() {
            let node = format!("{question}: {}", sub.label);
            let values = parse_shares(&node, &sub.shares)?;
            let offsets = running.to_vec();

            for (country, value) in values.iter() {
                let slot = &mut running[country.index()];
                *slot += value;
                if *slot > AXIS_MAX {
                    return Err(SurveyError::StackOverflow {
                        node: question.to_string(),
                        country,
                        total: *slot,
                    });
                }
            }

            rows.push(StackedRow {
                label: sub.label.clone(),
                color_index: self.palette.index_for(i),
                values: values.as_slice().to_vec(),
                offsets,
            });
        }

        Ok(ChartSeries {
            title,
            countries: COUNTRIES.to_vec(),
            body: SeriesBody::Stacked { rows },
        })
    }
}

fn parse_shares(node: &str, shares: &RawShares) -> Result<CountryTable<u32>> {
    shares.try_map(|country, raw| {
        Percent::parse(raw, node, country).map(|p| u32::from(p.value()))
    })
}
