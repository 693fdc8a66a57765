//! SurveyLab CLI: dataset checks and chart series without a terminal UI.
//!
//! Commands:
//! - `validate`: load the dataset; `--deep` also builds every chart
//! - `themes`: list themes with question counts
//! - `questions`: list a theme's questions and their presentation modes
//! - `series`: print the chart series for one selection as JSON or CSV
//! - `export`: write one file per chartable selection

mod output;

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use survey_core::sample::sample_dataset;
use survey_core::{Dataset, Palette, SeriesBuilder, SurveyViewer, ViewerConfig};

use crate::output::{claim_stem, file_stem, write_series, Format};

#[derive(Parser)]
#[command(name = "survey", about = "SurveyLab CLI: per-country survey charts", version)]
struct Cli {
    #[command(flatten)]
    source: Source,

    #[command(subcommand)]
    command: Commands,
}

/// Where the dataset comes from. Flags override the config file.
#[derive(Args)]
struct Source {
    /// Config file (default: <config_dir>/surveylab/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Theme document.
    #[arg(long, global = true)]
    themes: Option<PathBuf>,

    /// Country document.
    #[arg(long, global = true)]
    countries: Option<PathBuf>,

    /// Use the built-in sample dataset.
    #[arg(long, global = true, default_value_t = false)]
    demo: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the dataset and report structural problems.
    Validate {
        /// Also build every chart to catch malformed or out-of-range percentages.
        #[arg(long, default_value_t = false)]
        deep: bool,
    },
    /// List themes in document order.
    Themes,
    /// List the questions of a theme.
    Questions {
        theme: String,
    },
    /// Print the chart series for a selection.
    Series {
        theme: String,
        question: String,
        /// Answer label; omit for gradient-only questions.
        answer: Option<String>,

        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
    /// Write the series of every chartable selection to a directory.
    Export {
        /// Output directory (created if missing).
        #[arg(long)]
        out: PathBuf,

        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = ViewerConfig::discover(cli.source.config.as_deref())?;
    init_logging(&config.log.filter);

    let dataset = load_dataset(&cli.source, &config)?;
    let palette = Palette::named(config.chart.palette);

    match cli.command {
        Commands::Validate { deep } => run_validate(&dataset, palette, deep),
        Commands::Themes => run_themes(&dataset),
        Commands::Questions { theme } => run_questions(&dataset, &theme),
        Commands::Series {
            theme,
            question,
            answer,
            format,
        } => run_series(dataset, palette, &theme, &question, answer.as_deref(), format),
        Commands::Export { out, format } => run_export(&dataset, palette, &out, format),
    }
}

/// Diagnostics go to stderr so stdout stays clean for series output.
fn init_logging(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(io::stderr)
        .init();
}

fn load_dataset(source: &Source, config: &ViewerConfig) -> Result<Dataset> {
    if source.demo {
        return sample_dataset().context("building the sample dataset");
    }
    let themes = source.themes.as_ref().unwrap_or(&config.dataset.themes);
    let countries = source.countries.as_ref().unwrap_or(&config.dataset.countries);
    Dataset::load(themes, countries).with_context(|| {
        format!(
            "loading dataset ({} + {})",
            themes.display(),
            countries.display()
        )
    })
}

fn run_validate(dataset: &Dataset, palette: Palette, deep: bool) -> Result<()> {
    let stats = dataset.stats();
    println!(
        "Structure OK: {} themes, {} questions, {} answers, {} subanswers",
        stats.themes, stats.questions, stats.answers, stats.subanswers
    );
    if !deep {
        return Ok(());
    }

    let results = SeriesBuilder::new(palette).build_all(dataset);
    let total = results.len();
    let mut failed = 0;
    for (path, result) in &results {
        if let Err(err) = result {
            failed += 1;
            println!("  [{}] {path}: {err}", err.kind().label());
        }
    }

    if failed > 0 {
        bail!("{failed} of {total} charts failed to build");
    }
    println!("Charts OK: {total} built");
    Ok(())
}

fn run_themes(dataset: &Dataset) -> Result<()> {
    for theme in dataset.themes() {
        println!("{:<30} {:>3} questions", theme.name, theme.questions.len());
    }
    Ok(())
}

fn run_questions(dataset: &Dataset, theme: &str) -> Result<()> {
    let questions = dataset.list_questions(theme)?;
    println!("{:<10} {:<14} {}", "Id", "Mode", "Prompt");
    println!("{}", "-".repeat(60));
    for q in questions {
        let mode = dataset.resolve_country_record(&q.id)?.mode();
        println!("{:<10} {:<14} {}", q.id, mode.label(), q.prompt);
    }
    Ok(())
}

fn run_series(
    dataset: Dataset,
    palette: Palette,
    theme: &str,
    question: &str,
    answer: Option<&str>,
    format: Format,
) -> Result<()> {
    let mut viewer = SurveyViewer::new(dataset, palette);
    viewer.select_theme(theme)?;
    viewer.select_question(question)?;
    if let Some(answer) = answer {
        viewer.select_answer(answer)?;
    }

    let Some(series) = viewer.current_chart_series()? else {
        let answers = viewer.available_answers(question)?;
        bail!(
            "'{question}' needs an answer to chart; choose one of: {}",
            answers.join(", ")
        );
    };

    write_series(io::stdout().lock(), &series, format)
}

fn run_export(dataset: &Dataset, palette: Palette, out: &Path, format: Format) -> Result<()> {
    std::fs::create_dir_all(out)
        .with_context(|| format!("creating output directory {}", out.display()))?;

    let mut taken = HashSet::new();
    let mut written = 0;
    let mut failed = 0;
    for (path, result) in SeriesBuilder::new(palette).build_all(dataset) {
        let series = match result {
            Ok(series) => series,
            Err(err) => {
                tracing::warn!(path = %path, error = %err, "skipping chart");
                failed += 1;
                continue;
            }
        };
        let wanted = file_stem(&path);
        let stem = claim_stem(wanted.clone(), &mut taken);
        if stem != wanted {
            tracing::warn!(path = %path, file = %stem, "export name collides, renamed");
        }
        let file = out.join(format!("{stem}.{}", format.extension()));
        let handle =
            File::create(&file).with_context(|| format!("creating {}", file.display()))?;
        write_series(BufWriter::new(handle), &series, format)
            .with_context(|| format!("writing {}", file.display()))?;
        written += 1;
    }

    println!("Exported {written} charts to {}", out.display());
    if failed > 0 {
        bail!("{failed} charts could not be built; see log output");
    }
    Ok(())
}
