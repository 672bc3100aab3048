//! Gross-to-net salary calculations.
//!
//! [`SalaryCalculator`] converts one gross salary into net salary, insurance
//! and personal income tax. [`compute_batch`] applies it to every row of a
//! payroll batch.

pub mod batch;
pub mod common;
pub mod salary;

pub use batch::compute_batch;
pub use salary::SalaryCalculator;
