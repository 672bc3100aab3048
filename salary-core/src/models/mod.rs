mod employee;
mod payroll_config;
mod salary;
mod tax_bracket;
mod tax_schedule;

pub use employee::EmployeeRecord;
pub use payroll_config::{PayrollConfig, PayrollConfigError};
pub use salary::{SalaryBreakdown, SalaryRequest, SalaryRequestError, SalaryResult};
pub use tax_bracket::TaxBracket;
pub use tax_schedule::{TaxSchedule, TaxScheduleError};
