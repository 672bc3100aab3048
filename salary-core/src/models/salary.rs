use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation failures for a [`SalaryRequest`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SalaryRequestError {
    #[error("gross salary must be non-negative, got {0}")]
    NegativeGrossSalary(Decimal),
}

/// Input for a single gross-to-net conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRequest {
    pub gross_salary: Decimal,
    pub number_of_dependents: u32,
}

impl SalaryRequest {
    pub fn new(
        gross_salary: Decimal,
        number_of_dependents: u32,
    ) -> Self {
        Self {
            gross_salary,
            number_of_dependents,
        }
    }

    /// Checks the caller-side preconditions of the calculator.
    pub fn validate(&self) -> Result<(), SalaryRequestError> {
        if self.gross_salary < Decimal::ZERO {
            return Err(SalaryRequestError::NegativeGrossSalary(self.gross_salary));
        }
        Ok(())
    }
}

/// Outcome of a gross-to-net conversion.
///
/// `net_salary == gross_salary - insurance_amount - personal_income_tax`
/// holds exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryResult {
    pub gross_salary: Decimal,
    pub net_salary: Decimal,
    pub insurance_amount: Decimal,
    pub personal_income_tax: Decimal,
}

/// A [`SalaryResult`] together with the intermediate amounts that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryBreakdown {
    pub result: SalaryResult,

    /// Personal plus dependent allowances.
    pub personal_deduction: Decimal,

    /// Income subject to the progressive schedule, never negative.
    pub taxable_income: Decimal,
}
