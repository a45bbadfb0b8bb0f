use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::{debug, info};

use tier_cli::config::AppConfig;
use tier_cli::{Repl, logging, render};
use tier_core::PricingSession;
use tier_data::{HistoryExporter, ScheduleLoader};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Tiered pricing calculator.
///
/// Resolves a headcount to its price tier, computes the total income and
/// keeps a rolling history of recent calculations.
#[derive(Debug, Parser)]
#[command(name = "tier-calc", version, about)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log filter (e.g. `debug` or `info,tier_core=trace`).
    /// Overrides the config file; `RUST_LOG` overrides both.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Append log output to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Read the schedule from a `breakpoint,price` CSV file.
    #[arg(short, long, global = true)]
    schedule_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Mode>,
}

#[derive(Debug, Subcommand)]
enum Mode {
    /// Interactive calculator reading commands from stdin (default).
    Repl,

    /// Evaluate one schedule against one or more headcounts and exit.
    Eval {
        /// Comma-separated breakpoints, e.g. `10,50,100`.
        #[arg(short, long, allow_hyphen_values = true)]
        breakpoints: Option<String>,

        /// Comma-separated unit prices, e.g. `100,80,60`.
        #[arg(short, long, allow_hyphen_values = true)]
        prices: Option<String>,

        /// Headcount to evaluate; repeat for several.
        #[arg(long = "people", required = true)]
        people: Vec<u32>,

        /// Write the recorded history to this CSV file.
        #[arg(short, long)]
        export: Option<PathBuf>,
    },
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;

    let level = cli.log_level.as_deref().unwrap_or(&config.logging.level);
    logging::init_logging(level);
    if let Some(path) = cli.log_file.as_ref().or(config.logging.file.as_ref()) {
        logging::enable_file_logging(path)?;
    }
    debug!(?config, "configuration loaded");

    match cli.command.unwrap_or(Mode::Repl) {
        Mode::Repl => run_repl(&config, cli.schedule_file),
        Mode::Eval {
            breakpoints,
            prices,
            people,
            export,
        } => run_eval(&config, cli.schedule_file, breakpoints, prices, &people, export),
    }
}

fn run_repl(
    config: &AppConfig,
    schedule_file: Option<PathBuf>,
) -> anyhow::Result<()> {
    info!("starting interactive session");
    let stdout = io::stdout();
    let mut repl = Repl::new(config, stdout.lock());

    repl.start(config, schedule_file.as_deref())?;
    repl.run(io::stdin().lock())?;

    Ok(())
}

fn run_eval(
    config: &AppConfig,
    schedule_file: Option<PathBuf>,
    breakpoints: Option<String>,
    prices: Option<String>,
    people: &[u32],
    export: Option<PathBuf>,
) -> anyhow::Result<()> {
    let max = config.limits.max_headcount;
    if let Some(bad) = people.iter().find(|p| **p > max) {
        bail!("headcount {bad} is outside 0..={max}");
    }

    let mut session = PricingSession::with_history_capacity(config.limits.history_capacity);

    match schedule_file {
        Some(path) => {
            let records = ScheduleLoader::parse_file(&path)?;
            session
                .apply_schedule(ScheduleLoader::load(&records))
                .with_context(|| format!("invalid schedule in {}", path.display()))?;
        }
        None => {
            let breakpoints = breakpoints.unwrap_or_else(|| config.defaults.breakpoints.clone());
            let prices = prices.unwrap_or_else(|| config.defaults.prices.clone());
            session
                .validate_schedule(&breakpoints, &prices)
                .context("invalid schedule")?;
        }
    }

    if !session.has_schedule() {
        bail!("{}", render::NO_SCHEDULE);
    }

    let mut out = io::stdout().lock();
    for headcount in people {
        session.set_headcount(Decimal::from(*headcount));
        writeln!(out, "{}", render::display(session.display_state().as_ref()))?;
    }

    if let Some(path) = export {
        let rows = HistoryExporter::write_file(&path, session.history())?;
        writeln!(out, "exported {rows} rows to {}", path.display())?;
    }

    Ok(())
}
