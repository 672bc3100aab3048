//! Response bodies. Money is rendered as JSON numbers rather than the
//! string form `Decimal` serializes to by default.

use rust_decimal::Decimal;
use salary_core::{EmployeeRecord, SalaryResult};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct SalaryResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub gross_salary: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub net_salary: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub insurance_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub personal_income_tax: Decimal,
}

impl From<SalaryResult> for SalaryResponse {
    fn from(result: SalaryResult) -> Self {
        Self {
            gross_salary: result.gross_salary,
            net_salary: result.net_salary,
            insurance_amount: result.insurance_amount,
            personal_income_tax: result.personal_income_tax,
        }
    }
}

/// One row of a bulk upload, echoed back with its net salary.
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeSalary {
    pub id: i64,
    pub employee_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub gross_salary: Decimal,
    pub number_of_dependents: u32,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub net_salary: Option<Decimal>,
}

impl From<EmployeeRecord> for EmployeeSalary {
    fn from(record: EmployeeRecord) -> Self {
        Self {
            id: record.id,
            employee_name: record.employee_name,
            gross_salary: record.gross_salary,
            number_of_dependents: record.number_of_dependents,
            net_salary: record.net_salary,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BulkSalaryResponse {
    pub result: Vec<EmployeeSalary>,
}

impl From<Vec<EmployeeRecord>> for BulkSalaryResponse {
    fn from(records: Vec<EmployeeRecord>) -> Self {
        Self {
            result: records.into_iter().map(EmployeeSalary::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
