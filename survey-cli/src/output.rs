//! Series output formats and export file naming.

use std::collections::HashSet;
use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;

use survey_core::{ChartSeries, SelectionPath, SeriesBody};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Csv,
}

impl Format {
    pub fn extension(self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Csv => "csv",
        }
    }
}

pub fn write_series<W: Write>(out: W, series: &ChartSeries, format: Format) -> Result<()> {
    match format {
        Format::Json => write_json(out, series),
        Format::Csv => write_csv(out, series),
    }
}

fn write_json<W: Write>(mut out: W, series: &ChartSeries) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, series)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

/// One row per country. Stacked series get a column per subanswer in stack
/// order, each followed by its left offset.
fn write_csv<W: Write>(out: W, series: &ChartSeries) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);

    match &series.body {
        SeriesBody::Single { values } => {
            wtr.write_record(["country", "value"])?;
            for (country, value) in series.countries.iter().zip(values) {
                wtr.write_record([country.code().to_string(), value.to_string()])?;
            }
        }
        SeriesBody::Stacked { rows } => {
            let mut header = vec!["country".to_string()];
            for row in rows {
                header.push(row.label.clone());
                header.push(format!("{} offset", row.label));
            }
            header.push("total".to_string());
            wtr.write_record(&header)?;

            let totals = series.totals();
            for (i, country) in series.countries.iter().enumerate() {
                let mut record = vec![country.code().to_string()];
                for row in rows {
                    record.push(row.values[i].to_string());
                    record.push(row.offsets[i].to_string());
                }
                record.push(totals[i].to_string());
                wtr.write_record(&record)?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}

/// File stem for an exported leaf: `<question>[__<answer>]`, filesystem-safe.
pub fn file_stem(path: &SelectionPath) -> String {
    let question = path.question().unwrap_or("selection");
    let stem = match path.answer() {
        Some(answer) => format!("{question}__{answer}"),
        None => question.to_string(),
    };
    sanitize(&stem)
}

/// Claim `stem` in `taken`, appending `_2`, `_3`, ... when sanitizing has
/// already mapped another label onto the same name.
pub fn claim_stem(stem: String, taken: &mut HashSet<String>) -> String {
    if taken.insert(stem.clone()) {
        return stem;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{stem}_{n}");
        if taken.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use survey_core::sample::sample_dataset;
    use survey_core::{Palette, SubanswerGroup, SurveyViewer};

    fn series_for(theme: &str, question: &str, answer: Option<&str>) -> ChartSeries {
        let mut v = SurveyViewer::new(sample_dataset().unwrap(), Palette::default());
        v.select_theme(theme).unwrap();
        v.select_question(question).unwrap();
        if let Some(a) = answer {
            v.select_answer(a).unwrap();
        }
        v.current_chart_series().unwrap().unwrap()
    }

    fn render(series: &ChartSeries, format: Format) -> String {
        let mut buf = Vec::new();
        write_series(&mut buf, series, format).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn single_csv_has_one_row_per_country() {
        let csv = render(&series_for("Habits", "Q1", Some("Yes")), Format::Csv);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "country,value");
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[1], "KSA,10");
        assert!(lines[10].starts_with("Other,"));
    }

    #[test]
    fn stacked_csv_keeps_stack_order() {
        let csv = render(&series_for("Media", "Q3", None), Format::Csv);
        let header = csv.lines().next().unwrap();
        assert_eq!(header, "country,A,A offset,B,B offset,C,C offset,total");
        let ksa: Vec<&str> = csv.lines().nth(1).unwrap().split(',').collect();
        assert_eq!(ksa[0], "KSA");
        assert_eq!(ksa[1], "30");
        assert_eq!(ksa[4], "30");
    }

    #[test]
    fn json_output_is_tagged() {
        let json = render(&series_for("Habits", "Q1", Some("No")), Format::Json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["kind"], "single");
        assert_eq!(value["title"], "Survey Data for No");
    }

    #[test]
    fn file_stems_are_safe() {
        let path = SelectionPath::AnswerSelected {
            theme: "T".into(),
            question: "Q1".into(),
            answer: "Yes / maybe".into(),
        };
        assert_eq!(file_stem(&path), "Q1__Yes___maybe");

        let implicit = SelectionPath::SubanswerGroupSelected {
            theme: "T".into(),
            question: "Q3".into(),
            group: SubanswerGroup::Implicit,
        };
        assert_eq!(file_stem(&implicit), "Q3");
    }

    #[test]
    fn colliding_stems_get_numeric_suffixes() {
        let stem_for = |answer: &str| {
            file_stem(&SelectionPath::AnswerSelected {
                theme: "T".into(),
                question: "Q1".into(),
                answer: answer.into(),
            })
        };
        let mut taken = HashSet::new();
        let first = claim_stem(stem_for("Yes / maybe"), &mut taken);
        let second = claim_stem(stem_for("Yes ? maybe"), &mut taken);
        let third = claim_stem(stem_for("Yes | maybe"), &mut taken);
        assert_eq!(first, "Q1__Yes___maybe");
        assert_eq!(second, "Q1__Yes___maybe_2");
        assert_eq!(third, "Q1__Yes___maybe_3");
        assert_eq!(claim_stem("Q1__Yes___maybe_2".into(), &mut taken), "Q1__Yes___maybe_2_2");
    }
}
