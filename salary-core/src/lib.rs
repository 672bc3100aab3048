pub mod calculations;
pub mod models;

pub use calculations::{SalaryCalculator, compute_batch};
pub use models::*;
