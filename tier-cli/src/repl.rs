//! Line-oriented front end driving one [`PricingSession`].
//!
//! Every command is executed to completion before the next line is read.
//! Input mistakes are reported on the output and never end the loop.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use rust_decimal::Decimal;
use thiserror::Error;
use tier_core::PricingSession;
use tier_data::{HistoryExporter, ScheduleLoader};
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::{logging, render};

pub const HELP: &str = "\
commands:
  schedule <breakpoints> <prices>   e.g. schedule 10,50,100 100,80,60
  schedule <breakpoints> ; <prices> lists may contain spaces when split by ';'
  load <file.csv>                   read a breakpoint,price CSV schedule
  people <n>                        set the headcount and compute income
  show                              current headcount, tier, price and income
  history                           recorded observations, oldest first
  chart                             text chart of recorded income
  export <file.csv>                 write the history as CSV
  log <level>                       change the log filter
  help                              this text
  quit                              leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Schedule { breakpoints: String, prices: String },
    Load(PathBuf),
    People(u32),
    Show,
    History,
    Chart,
    Export(PathBuf),
    Log(String),
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),

    #[error("'{command}' needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("headcount must be a whole number between 0 and {max}, got '{input}'")]
    InvalidHeadcount { input: String, max: u32 },
}

impl Command {
    /// Parses one input line. Blank lines and `#` comments yield `None`.
    pub fn parse(
        line: &str,
        max_headcount: u32,
    ) -> Result<Option<Command>, CommandError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "schedule" => {
                let (breakpoints, prices) =
                    split_schedule_args(rest).ok_or(CommandError::MissingArgument {
                        command: "schedule",
                        argument: "a breakpoint list and a price list",
                    })?;
                Command::Schedule {
                    breakpoints,
                    prices,
                }
            }
            "load" => Command::Load(required_path("load", rest)?),
            "people" => Command::People(parse_headcount(rest, max_headcount)?),
            "show" => Command::Show,
            "history" => Command::History,
            "chart" => Command::Chart,
            "export" => Command::Export(required_path("export", rest)?),
            "log" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument {
                        command: "log",
                        argument: "a level",
                    });
                }
                Command::Log(rest.to_string())
            }
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(Some(command))
    }
}

fn split_schedule_args(rest: &str) -> Option<(String, String)> {
    if let Some((breakpoints, prices)) = rest.split_once(';') {
        return Some((breakpoints.trim().to_string(), prices.trim().to_string()));
    }

    let mut parts = rest.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(breakpoints), Some(prices), None) => {
            Some((breakpoints.to_string(), prices.to_string()))
        }
        _ => None,
    }
}

fn required_path(
    command: &'static str,
    rest: &str,
) -> Result<PathBuf, CommandError> {
    if rest.is_empty() {
        return Err(CommandError::MissingArgument {
            command,
            argument: "a file path",
        });
    }
    Ok(PathBuf::from(rest))
}

/// Parses a whole-number headcount in `0..=max`.
pub fn parse_headcount(
    input: &str,
    max: u32,
) -> Result<u32, CommandError> {
    let invalid = || CommandError::InvalidHeadcount {
        input: input.to_string(),
        max,
    };

    let value: u32 = input.trim().parse().map_err(|_| invalid())?;
    if value > max {
        return Err(invalid());
    }
    Ok(value)
}

/// Whether the loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Repl<W: Write> {
    session: PricingSession,
    max_headcount: u32,
    out: W,
}

impl<W: Write> Repl<W> {
    pub fn new(
        config: &AppConfig,
        out: W,
    ) -> Self {
        Self {
            session: PricingSession::with_history_capacity(config.limits.history_capacity),
            max_headcount: config.limits.max_headcount,
            out,
        }
    }

    pub fn session(&self) -> &PricingSession {
        &self.session
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Installs the starting schedule and headcount, the way the calculator
    /// opens with pre-filled inputs. The schedule comes from
    /// `schedule_file` when given, otherwise from the configured defaults.
    ///
    /// The headcount is stored first; accepting the schedule then computes
    /// it once.
    pub fn start(
        &mut self,
        config: &AppConfig,
        schedule_file: Option<&Path>,
    ) -> Result<()> {
        let defaults = &config.defaults;
        self.session
            .set_headcount(Decimal::from(defaults.headcount));

        let command = match schedule_file {
            Some(path) => Command::Load(path.to_path_buf()),
            None => Command::Schedule {
                breakpoints: defaults.breakpoints.clone(),
                prices: defaults.prices.clone(),
            },
        };
        self.execute(command)?;
        Ok(())
    }

    /// Reads commands from `input` until it ends or `quit` is entered.
    pub fn run<R: BufRead>(
        &mut self,
        input: R,
    ) -> Result<()> {
        for line in input.lines() {
            let line = line?;
            match Command::parse(&line, self.max_headcount) {
                Ok(Some(command)) => {
                    if self.execute(command)? == Flow::Quit {
                        break;
                    }
                }
                Ok(None) => {}
                Err(err) => {
                    warn!(input = %line, error = %err, "rejected command");
                    writeln!(self.out, "error: {err}")?;
                }
            }
            self.out.flush()?;
        }
        Ok(())
    }

    /// Runs one command. Only failures writing to the output are returned.
    pub fn execute(
        &mut self,
        command: Command,
    ) -> Result<Flow> {
        debug!(?command, "executing");
        match command {
            Command::Schedule {
                breakpoints,
                prices,
            } => {
                let outcome = self.session.validate_schedule(&breakpoints, &prices);
                self.after_schedule_change(outcome)?;
            }
            Command::Load(path) => match ScheduleLoader::parse_file(&path) {
                Ok(records) => {
                    let outcome = self.session.apply_schedule(ScheduleLoader::load(&records));
                    self.after_schedule_change(outcome)?;
                }
                Err(err) => writeln!(self.out, "error: {err}")?,
            },
            Command::People(value) => {
                self.session.set_headcount(Decimal::from(value));
                self.show()?;
            }
            Command::Show => self.show()?,
            Command::History => write!(self.out, "{}", render::history(self.session.history()))?,
            Command::Chart => write!(self.out, "{}", render::chart(&self.session.chart_data()))?,
            Command::Export(path) => {
                match HistoryExporter::write_file(&path, self.session.history()) {
                    Ok(rows) => writeln!(self.out, "exported {rows} rows to {}", path.display())?,
                    Err(err) => writeln!(self.out, "error: {err}")?,
                }
            }
            Command::Log(level) => match logging::set_log_level(&level) {
                Ok(()) => writeln!(self.out, "log level set to {level}")?,
                Err(err) => writeln!(self.out, "error: {err}")?,
            },
            Command::Help => writeln!(self.out, "{HELP}")?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn after_schedule_change(
        &mut self,
        outcome: Result<(), tier_core::ScheduleError>,
    ) -> Result<()> {
        match outcome {
            Ok(()) if self.session.has_schedule() => {
                writeln!(
                    self.out,
                    "schedule accepted ({} tiers)",
                    self.session.schedule().len()
                )?;
                // Recompute right away so the new schedule is reflected.
                let headcount = self.session.headcount();
                self.session.set_headcount(headcount);
                self.show()
            }
            Ok(()) => {
                writeln!(self.out, "{}", render::NO_SCHEDULE)?;
                Ok(())
            }
            Err(err) => {
                writeln!(self.out, "error: {err}")?;
                Ok(())
            }
        }
    }

    fn show(&mut self) -> Result<()> {
        let state = self.session.display_state();
        writeln!(self.out, "{}", render::display(state.as_ref()))?;
        Ok(())
    }
}
