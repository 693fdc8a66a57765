//! SurveyLab TUI entry point.
//!
//! Loads config and dataset first; any load error is reported on stderr and
//! the process exits before the terminal is touched.

use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use survey_core::sample::sample_dataset;
use survey_core::{Dataset, Palette, SurveyViewer, ViewerConfig};
use survey_tui::{AppState, input, logging, ui};

#[derive(Parser)]
#[command(name = "survey-tui", about = "Browse survey results by country", version)]
struct Cli {
    /// Config file (default: <config_dir>/surveylab/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Theme document; overrides the config file
    #[arg(long)]
    themes: Option<PathBuf>,

    /// Country document; overrides the config file
    #[arg(long)]
    countries: Option<PathBuf>,

    /// Browse the built-in sample dataset instead of files
    #[arg(long, conflicts_with_all = ["themes", "countries"])]
    demo: bool,

    /// Log file (default: <data_dir>/surveylab/survey-tui.log)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ViewerConfig::discover(cli.config.as_deref())?;
    let log_path = cli.log_file.clone().unwrap_or_else(logging::default_log_path);
    logging::init(&log_path, &config.log.filter)?;

    let dataset = load_dataset(&cli, &config)?;
    let palette = Palette::named(config.chart.palette);
    let mut app = AppState::new(SurveyViewer::new(dataset, palette), config.chart.bar_width);
    tracing::info!(palette = ?config.chart.palette, "starting viewer");

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!(errors = app.error_history.len(), "viewer closed");
    result
}

fn load_dataset(cli: &Cli, config: &ViewerConfig) -> Result<Dataset> {
    if cli.demo {
        return sample_dataset().context("building the sample dataset");
    }
    let themes = cli.themes.as_ref().unwrap_or(&config.dataset.themes);
    let countries = cli.countries.as_ref().unwrap_or(&config.dataset.countries);
    Dataset::load(themes, countries).with_context(|| {
        format!(
            "loading dataset ({} + {})",
            themes.display(),
            countries.display()
        )
    })
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 3. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}
