//! adlens - Marketing Analytics Dashboard
//!
//! A terminal dashboard that aggregates campaign records by channel and
//! region and shows them in a sortable, filterable, expandable table.
//!
//! ## Usage
//!
//! ```bash
//! # Start the dashboard on the bundled sample data
//! adlens
//!
//! # Load records from a JSON file
//! adlens --data campaigns.json
//!
//! # Print a plain-text report instead of starting the UI
//! adlens --print --sort clicks --asc --filter goo
//!
//! # With verbose logging
//! adlens -v
//! ```

use std::io::{self, Write};
use std::panic;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use adlens_config::DashboardConfig;
use adlens_core::{AdlensError, LogGuard, Record, SortDirection, SortKey, SortState, init_logging};
use adlens_data::{DataError, Row, aggregate, derive_view, flatten_rows, format_currency, format_number};
use adlens_tui::table::header_label;
use adlens_tui::{Action, App};
use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

/// adlens Marketing Analytics Dashboard
///
/// Aggregates advertising records into channel and region summaries and
/// presents them in an interactive terminal table.
#[derive(Parser, Debug)]
#[command(name = "adlens")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging (increases log level)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Directory for log files (defaults to ~/.adlens/logs/)
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Configuration file (defaults to ~/.adlens/config.yaml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON file with an array of records (defaults to bundled sample data)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Print the table as plain text and exit
    #[arg(short, long)]
    print: bool,

    /// Initial channel filter (case-insensitive substring)
    #[arg(short, long)]
    filter: Option<String>,

    /// Channel to expand initially
    #[arg(short, long)]
    expand: Option<String>,

    /// Sort column: channel, spend, impressions, conversions or clicks
    #[arg(short, long, value_parser = parse_sort_key)]
    sort: Option<SortKey>,

    /// Sort ascending
    #[arg(long, conflicts_with = "desc")]
    asc: bool,

    /// Sort descending
    #[arg(long)]
    desc: bool,
}

impl Cli {
    fn direction(&self) -> Option<SortDirection> {
        if self.asc {
            Some(SortDirection::Asc)
        } else if self.desc {
            Some(SortDirection::Desc)
        } else {
            None
        }
    }
}

fn parse_sort_key(s: &str) -> Result<SortKey, String> {
    SortKey::parse(s).ok_or_else(|| {
        format!("unknown sort column '{s}' (expected channel, spend, impressions, conversions or clicks)")
    })
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let _guard = match setup_logging(&cli) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            return ExitCode::from(1);
        }
    };

    let result = load_config(&cli).and_then(|config| {
        let records = load_records(&config)?;
        if cli.print {
            print_report(&config, &records, &cli)
        } else {
            // Install panic hook to ensure terminal cleanup
            install_panic_hook();
            info!("Starting adlens dashboard");
            run_app(&config, &records, &cli)
        }
    });

    match result {
        Ok(()) => {
            info!("adlens exited normally");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("adlens error: {:#}", e);
            eprintln!("Error: {:#}", e);
            if let Some(hint) = guidance(&e) {
                eprintln!("Hint: {}", hint);
            }
            ExitCode::from(1)
        }
    }
}

/// User-facing hint for a startup failure, if one applies.
fn guidance(err: &anyhow::Error) -> Option<String> {
    if let Some(e) = err.downcast_ref::<AdlensError>() {
        return e.guidance().map(str::to_string);
    }
    err.downcast_ref::<DataError>().map(DataError::friendly_message)
}

/// Install a panic hook that restores the terminal before printing the panic message.
fn install_panic_hook() {
    let original_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore terminal state
        let _ = restore_terminal();

        // Call the original panic hook to print the panic message
        original_hook(panic_info);
    }));
}

/// Restore terminal to its normal state.
fn restore_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();

    let _ = crossterm::terminal::disable_raw_mode();
    crossterm::execute!(
        stdout,
        crossterm::terminal::LeaveAlternateScreen,
        crossterm::event::DisableMouseCapture,
        crossterm::cursor::Show
    )?;
    stdout.flush()
}

/// Set up logging based on CLI arguments.
///
/// Report mode also logs to stderr; the full-screen UI logs to file only.
fn setup_logging(cli: &Cli) -> adlens_core::Result<LogGuard> {
    init_logging(cli.log_dir.clone(), cli.verbose > 0, cli.print)
}

/// Load configuration and apply command-line overrides.
fn load_config(cli: &Cli) -> anyhow::Result<DashboardConfig> {
    let mut config = DashboardConfig::load(cli.config.as_deref()).context("loading configuration")?;

    if let Some(path) = &cli.data {
        config.data_path = Some(path.clone());
    }
    if let Some(key) = cli.sort {
        config.default_sort = SortState::new(key, SortDirection::Desc);
    }
    if let Some(direction) = cli.direction() {
        config.default_sort.direction = direction;
    }
    Ok(config)
}

fn load_records(config: &DashboardConfig) -> anyhow::Result<Vec<Record>> {
    let records = adlens_data::load_records_or_bundled(config.data_path.as_deref())
        .context("loading records")?;
    info!(records = records.len(), "records ready");
    Ok(records)
}

/// Run the TUI application.
fn run_app(config: &DashboardConfig, records: &[Record], cli: &Cli) -> anyhow::Result<()> {
    let mut app = App::new(config, records);
    if let Some(filter) = &cli.filter {
        app.dispatch(Action::SetFilter(filter.clone()));
    }
    if let Some(channel) = &cli.expand {
        app.dispatch(Action::ToggleExpand(channel.clone()));
    }

    let outcome = app.run().map_err(|e| AdlensError::TerminalInit {
        message: e.to_string(),
    });
    if outcome.is_err() {
        // The UI may have failed halfway through setup
        if let Err(e) = restore_terminal() {
            error!("{}", AdlensError::TerminalRestore { message: e.to_string() });
        }
    }
    Ok(outcome?)
}

const NAME_WIDTH: usize = 28;
const VALUE_WIDTH: usize = 16;

fn report_line(name: &str, values: [String; 4]) -> String {
    let [spend, impressions, conversions, clicks] = values;
    format!(
        "{name:<NAME_WIDTH$}{spend:>VALUE_WIDTH$}{impressions:>VALUE_WIDTH$}{conversions:>VALUE_WIDTH$}{clicks:>VALUE_WIDTH$}"
    )
}

/// Write the derived table as plain text.
fn write_report(
    out: &mut impl Write,
    config: &DashboardConfig,
    records: &[Record],
    filter: &str,
    expanded: Option<&str>,
) -> io::Result<()> {
    let started = Instant::now();
    let summaries = aggregate(records);
    let elapsed_ms = (started.elapsed().as_secs_f64() * 1000.0).round() as u64;

    let sort = config.default_sort;
    let view = derive_view(&summaries, filter, sort);

    writeln!(out, "{}", config.title)?;
    writeln!(out)?;
    let [channel, rest @ ..] = SortKey::ALL.map(|key| header_label(sort, key));
    writeln!(out, "{}", report_line(&channel, rest))?;

    if view.is_empty() {
        writeln!(out, "{}", adlens_tui::table::NO_DATA)?;
    }
    for row in flatten_rows(&view, expanded) {
        let line = match row {
            Row::Channel { summary, is_expanded } => report_line(
                &format!("{} {}", if is_expanded { "▼" } else { "►" }, summary.channel),
                [
                    format_currency(summary.total_spend),
                    format_number(summary.total_impressions),
                    format_number(summary.total_conversions),
                    format_number(summary.total_clicks),
                ],
            ),
            Row::Region { summary, .. } => report_line(
                &format!("  — {}", summary.region),
                [
                    format_currency(summary.spend),
                    format_number(summary.impressions),
                    format_number(summary.conversions),
                    format_number(summary.clicks),
                ],
            ),
        };
        writeln!(out, "{}", line.trim_end())?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "Showing {} of {} channels · aggregated in {} ms",
        view.len(),
        summaries.len(),
        elapsed_ms
    )
}

fn print_report(config: &DashboardConfig, records: &[Record], cli: &Cli) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    write_report(
        &mut stdout,
        config,
        records,
        cli.filter.as_deref().unwrap_or(""),
        cli.expand.as_deref(),
    )
    .context("writing report")
}
