use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{SalaryRequest, SalaryRequestError};

/// One row of a bulk payroll batch.
///
/// `net_salary` is `None` until the batch has been computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub id: i64,
    pub employee_name: String,
    pub gross_salary: Decimal,
    pub number_of_dependents: u32,
    #[serde(default)]
    pub net_salary: Option<Decimal>,
}

impl EmployeeRecord {
    /// The calculator input carried by this row.
    pub fn request(&self) -> SalaryRequest {
        SalaryRequest::new(self.gross_salary, self.number_of_dependents)
    }

    pub fn validate(&self) -> Result<(), SalaryRequestError> {
        self.request().validate()
    }

    pub fn with_net_salary(
        self,
        net_salary: Decimal,
    ) -> Self {
        Self {
            net_salary: Some(net_salary),
            ..self
        }
    }
}
