//! CSV exchange format for bulk payroll batches.
//!
//! ## Input format
//!
//! Headers are matched by name; column order does not matter and extra
//! columns are ignored. Header names are case-sensitive.
//!
//! | Column                 | Type    | Notes                  |
//! |------------------------|---------|------------------------|
//! | `ID`                   | integer | employee identifier    |
//! | `Employee Name`        | string  |                        |
//! | `Gross Salary`         | decimal | must be non-negative   |
//! | `Number of Dependents` | integer | must be non-negative   |
//!
//! ```csv
//! ID,Employee Name,Gross Salary,Number of Dependents
//! 1,John Doe,20000000,0
//! 2,Jane Smith,30000000,2
//! ```
//!
//! The header row is checked before any data row is read, so a sheet with a
//! missing column is rejected without processing a single row. Any invalid
//! row rejects the whole sheet as well.
//!
//! ## Output format
//!
//! [`write_results`] emits the four input columns followed by `Net Salary`.

use std::io::{Read, Write};
use std::path::Path;

use rust_decimal::Decimal;
use salary_core::EmployeeRecord;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decimal_field::deserialize_decimal;

/// Columns every employee sheet must carry, in reporting order.
pub const REQUIRED_COLUMNS: [&str; 4] = ["ID", "Employee Name", "Gross Salary", "Number of Dependents"];

/// Errors that can occur while reading or writing an employee sheet.
#[derive(Debug, Error)]
pub enum EmployeeSheetError {
    /// The sheet could not be read as CSV at all (bad header row, I/O).
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    /// The header row lacks one of [`REQUIRED_COLUMNS`].
    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),

    /// A data row could not be converted. `row` is 1-based (header excluded).
    #[error("invalid value on row {row}: {message}")]
    InvalidRow { row: usize, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<csv::Error> for EmployeeSheetError {
    fn from(err: csv::Error) -> Self {
        EmployeeSheetError::CsvParse(err.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct EmployeeRow {
    #[serde(rename = "ID")]
    id: i64,
    #[serde(rename = "Employee Name")]
    employee_name: String,
    #[serde(rename = "Gross Salary", deserialize_with = "deserialize_decimal")]
    gross_salary: Decimal,
    #[serde(rename = "Number of Dependents")]
    number_of_dependents: u32,
}

#[derive(Debug, Serialize)]
struct EmployeeResultRow<'a> {
    #[serde(rename = "ID")]
    id: i64,
    #[serde(rename = "Employee Name")]
    employee_name: &'a str,
    #[serde(rename = "Gross Salary")]
    gross_salary: Decimal,
    #[serde(rename = "Number of Dependents")]
    number_of_dependents: u32,
    #[serde(rename = "Net Salary")]
    net_salary: Option<Decimal>,
}

/// Reads employee sheets into [`EmployeeRecord`]s.
pub struct EmployeeSheetLoader;

impl EmployeeSheetLoader {
    /// Parse an employee sheet from any reader. Rows are returned in file
    /// order with `net_salary` unset.
    ///
    /// # Errors
    ///
    /// * [`EmployeeSheetError::MissingColumn`] – a required header is absent;
    ///   reported before any row is read.
    /// * [`EmployeeSheetError::InvalidRow`] – a row has a malformed or
    ///   negative value.
    /// * [`EmployeeSheetError::CsvParse`] – the header row is unreadable.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<EmployeeRecord>, EmployeeSheetError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?;
        if let Some(missing) = REQUIRED_COLUMNS
            .iter()
            .find(|column| !headers.iter().any(|header| header == **column))
        {
            return Err(EmployeeSheetError::MissingColumn(*missing));
        }

        csv_reader
            .deserialize::<EmployeeRow>()
            .enumerate()
            .map(|(idx, result)| {
                let row_number = idx + 1;
                let row = result.map_err(|err| EmployeeSheetError::InvalidRow {
                    row: row_number,
                    message: err.to_string(),
                })?;
                convert_row(row, row_number)
            })
            .collect()
    }

    /// Convenience wrapper: read a file from disk and delegate to [`Self::parse`].
    pub fn load_from_file(path: &Path) -> Result<Vec<EmployeeRecord>, EmployeeSheetError> {
        let file = std::fs::File::open(path)?;
        Self::parse(file)
    }
}

fn convert_row(
    row: EmployeeRow,
    row_number: usize,
) -> Result<EmployeeRecord, EmployeeSheetError> {
    let record = EmployeeRecord {
        id: row.id,
        employee_name: row.employee_name,
        gross_salary: row.gross_salary,
        number_of_dependents: row.number_of_dependents,
        net_salary: None,
    };

    record
        .validate()
        .map_err(|err| EmployeeSheetError::InvalidRow {
            row: row_number,
            message: err.to_string(),
        })?;

    Ok(record)
}

/// Write computed records as CSV, including the `Net Salary` column.
pub fn write_results<W: Write>(
    writer: W,
    records: &[EmployeeRecord],
) -> Result<(), EmployeeSheetError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for record in records {
        csv_writer.serialize(EmployeeResultRow {
            id: record.id,
            employee_name: &record.employee_name,
            gross_salary: record.gross_salary,
            number_of_dependents: record.number_of_dependents,
            net_salary: record.net_salary,
        })?;
    }

    csv_writer.flush()?;
    Ok(())
}
