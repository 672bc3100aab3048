mod decimal_field;
pub mod employee_sheet;
pub mod schedule_loader;

pub use employee_sheet::{EmployeeSheetError, EmployeeSheetLoader, REQUIRED_COLUMNS, write_results};
pub use schedule_loader::{TaxBracketRecord, TaxScheduleLoader, TaxScheduleLoaderError};
