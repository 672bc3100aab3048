use std::io::Read;
use std::path::Path;

use rust_decimal::Decimal;
use salary_core::{TaxBracket, TaxSchedule, TaxScheduleError};
use serde::Deserialize;
use thiserror::Error;

use crate::decimal_field::{deserialize_decimal, deserialize_optional_decimal};

/// Errors that can occur when loading a tax schedule.
#[derive(Debug, Error)]
pub enum TaxScheduleLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Invalid schedule: {0}")]
    InvalidSchedule(#[from] TaxScheduleError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<csv::Error> for TaxScheduleLoaderError {
    fn from(err: csv::Error) -> Self {
        TaxScheduleLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from the tax schedule CSV file.
///
/// - `upper_limit`: upper bound of the bracket (empty for unlimited)
/// - `rate`: the marginal tax rate as a decimal (e.g., 0.05 for 5%)
///
/// Rows must be listed in ascending order of `upper_limit`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TaxBracketRecord {
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub upper_limit: Option<Decimal>,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub rate: Decimal,
}

impl From<TaxBracketRecord> for TaxBracket {
    fn from(record: TaxBracketRecord) -> Self {
        TaxBracket {
            upper_limit: record.upper_limit,
            rate: record.rate,
        }
    }
}

/// Loader for progressive tax schedules stored as CSV.
///
/// ```csv
/// upper_limit,rate
/// 5000000,0.05
/// 10000000,0.10
/// ,0.15
/// ```
pub struct TaxScheduleLoader;

impl TaxScheduleLoader {
    /// Parse bracket records from a CSV reader without validating them as a
    /// schedule.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<TaxBracketRecord>, TaxScheduleLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: TaxBracketRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Parse and validate a complete schedule.
    pub fn load<R: Read>(reader: R) -> Result<TaxSchedule, TaxScheduleLoaderError> {
        let brackets = Self::parse(reader)?
            .into_iter()
            .map(TaxBracket::from)
            .collect();

        Ok(TaxSchedule::new(brackets)?)
    }

    pub fn load_from_file(path: &Path) -> Result<TaxSchedule, TaxScheduleLoaderError> {
        let file = std::fs::File::open(path)?;
        Self::load(file)
    }
}
