//! CSV export of recorded observations.
//!
//! The output has a `headcount,income` header followed by one row per
//! observation, in the order given.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use thiserror::Error;
use tier_core::Observation;
use tracing::info;

#[derive(Debug, Error)]
pub enum HistoryExportError {
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("cannot write '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub struct HistoryExporter;

impl HistoryExporter {
    /// Writes `observations` to `writer` and returns the number of rows.
    pub fn write<'a, W, I>(
        writer: W,
        observations: I,
    ) -> Result<usize, HistoryExportError>
    where
        W: Write,
        I: IntoIterator<Item = &'a Observation>,
    {
        let mut csv_writer = csv::Writer::from_writer(writer);
        let mut written = 0;

        for observation in observations {
            csv_writer.serialize(observation)?;
            written += 1;
        }

        if written == 0 {
            csv_writer.write_record(["headcount", "income"])?;
        }

        csv_writer.flush().map_err(csv::Error::from)?;
        Ok(written)
    }

    /// Creates (or truncates) `path` and writes the observations to it.
    pub fn write_file<'a, I>(
        path: &Path,
        observations: I,
    ) -> Result<usize, HistoryExportError>
    where
        I: IntoIterator<Item = &'a Observation>,
    {
        let file = File::create(path).map_err(|source| HistoryExportError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let written = Self::write(file, observations)?;
        info!(rows = written, path = %path.display(), "exported history");
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn writes_header_and_rows_in_order() {
        let observations = [
            Observation::new(dec!(75), dec!(6000)),
            Observation::new(dec!(5), dec!(500)),
        ];
        let mut out = Vec::new();

        let written = HistoryExporter::write(&mut out, &observations).unwrap();

        assert_eq!(written, 2);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "headcount,income\n75,6000\n5,500\n"
        );
    }

    #[test]
    fn empty_history_still_writes_header() {
        let mut out = Vec::new();

        let written = HistoryExporter::write(&mut out, std::iter::empty::<&Observation>()).unwrap();

        assert_eq!(written, 0);
        assert_eq!(String::from_utf8(out).unwrap(), "headcount,income\n");
    }

    #[test]
    fn fractional_values_keep_their_digits() {
        let observations = [Observation::new(dec!(12.5), dec!(1187.50))];
        let mut out = Vec::new();

        HistoryExporter::write(&mut out, &observations).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "headcount,income\n12.5,1187.50\n"
        );
    }
}
