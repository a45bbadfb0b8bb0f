use std::fs::File;
use std::io::Read;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tier_core::calculations::parse_number;
use tier_core::{ScheduleError, TierSchedule};
use tracing::debug;

/// Errors that can occur when reading a schedule file.
#[derive(Debug, Error)]
pub enum ScheduleLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("cannot open schedule file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<csv::Error> for ScheduleLoaderError {
    fn from(err: csv::Error) -> Self {
        ScheduleLoaderError::CsvParse(err.to_string())
    }
}

/// A single row from a schedule CSV file.
///
/// - `breakpoint`: headcount at which the tier starts
/// - `price`: unit price for the tier
///
/// Cells are kept as trimmed text and only turned into numbers by
/// [`ScheduleLoader::load`], so a bad number is a [`ScheduleError::Parse`]
/// like bad text input. Either cell may be left empty. Empty cells are
/// skipped per column, so a row with a breakpoint but no price makes the
/// columns differ in length.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ScheduleRecord {
    #[serde(deserialize_with = "deserialize_optional_cell")]
    pub breakpoint: Option<String>,
    #[serde(deserialize_with = "deserialize_optional_cell")]
    pub price: Option<String>,
}

fn deserialize_optional_cell<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()))
}

fn parse_column<'a>(
    cells: impl Iterator<Item = Option<&'a String>>,
) -> Result<Vec<Decimal>, ScheduleError> {
    cells
        .flatten()
        .map(|cell| parse_number(cell).map_err(|e| ScheduleError::from((cell.clone(), e))))
        .collect()
}

/// Loader for tier schedules stored as CSV.
///
/// ```csv
/// breakpoint,price
/// 10,100
/// 50,80
/// 100,60
/// ```
pub struct ScheduleLoader;

impl ScheduleLoader {
    /// Parse schedule rows from a CSV reader, in file order.
    ///
    /// Headers are matched by name and surrounding whitespace is trimmed.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<ScheduleRecord>, ScheduleLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: ScheduleRecord = result?;
            records.push(record);
        }

        debug!(rows = records.len(), "parsed schedule rows");
        Ok(records)
    }

    /// Opens `path` and parses its rows.
    pub fn parse_file(path: &Path) -> Result<Vec<ScheduleRecord>, ScheduleLoaderError> {
        let file = File::open(path).map_err(|source| ScheduleLoaderError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::parse(file)
    }

    /// Splits the rows into breakpoint and price columns, dropping empty
    /// cells. The whole breakpoint column is parsed before the prices.
    pub fn columns(records: &[ScheduleRecord]) -> Result<(Vec<Decimal>, Vec<Decimal>), ScheduleError> {
        let breakpoints = parse_column(records.iter().map(|r| r.breakpoint.as_ref()))?;
        let prices = parse_column(records.iter().map(|r| r.price.as_ref()))?;
        Ok((breakpoints, prices))
    }

    /// Validates the rows as a [`TierSchedule`], with the same rules as
    /// comma-separated text input.
    pub fn load(records: &[ScheduleRecord]) -> Result<TierSchedule, ScheduleError> {
        let (breakpoints, prices) = Self::columns(records)?;
        TierSchedule::new(breakpoints, prices)
    }
}
