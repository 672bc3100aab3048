//! Progressive tax schedule.
//!
//! A [`TaxSchedule`] is an ordered, contiguous list of [`TaxBracket`]s that
//! starts at zero and ends with an unbounded bracket. The invariants are
//! checked once in [`TaxSchedule::new`], so calculators can walk the brackets
//! without re-validating them.
//!
//! # Default schedule
//!
//! | Taxable income (currency units) | Rate |
//! |---------------------------------|------|
//! | 0 – 5,000,000                   | 5%   |
//! | 5,000,000 – 10,000,000          | 10%  |
//! | 10,000,000 – 18,000,000         | 15%  |
//! | 18,000,000 – 32,000,000         | 20%  |
//! | 32,000,000 – 52,000,000         | 25%  |
//! | 52,000,000 – 80,000,000         | 30%  |
//! | above 80,000,000                | 35%  |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use salary_core::{TaxBracket, TaxSchedule};
//!
//! let schedule = TaxSchedule::new(vec![
//!     TaxBracket::bounded(dec!(1000), dec!(0.10)),
//!     TaxBracket::unbounded(dec!(0.20)),
//! ])
//! .unwrap();
//!
//! assert_eq!(schedule.len(), 2);
//! assert_eq!(schedule.brackets()[0].upper_limit, Some(dec!(1000)));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::TaxBracket;

/// Reasons a list of brackets cannot form a [`TaxSchedule`].
///
/// `index` is the 0-based position of the offending bracket.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxScheduleError {
    #[error("tax schedule must contain at least one bracket")]
    Empty,

    #[error("bracket {index}: upper limit must be positive, got {limit}")]
    NonPositiveLimit { index: usize, limit: Decimal },

    #[error("bracket {index}: upper limit {limit} must exceed previous limit {previous}")]
    NonIncreasingLimit {
        index: usize,
        limit: Decimal,
        previous: Decimal,
    },

    #[error("bracket {index}: only the last bracket may be unbounded")]
    UnboundedBeforeEnd { index: usize },

    #[error("last bracket must be unbounded")]
    BoundedTopBracket,

    #[error("bracket {index}: rate must be in [0, 1), got {rate}")]
    InvalidRate { index: usize, rate: Decimal },
}

/// Ordered sequence of brackets applied cumulatively to taxable income.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TaxBracket>", into = "Vec<TaxBracket>")]
pub struct TaxSchedule {
    brackets: Vec<TaxBracket>,
}

impl TaxSchedule {
    /// Builds a schedule after checking that the brackets are contiguous,
    /// strictly increasing and capped by a single unbounded bracket.
    ///
    /// # Errors
    ///
    /// Returns the first [`TaxScheduleError`] found, scanning in order.
    pub fn new(brackets: Vec<TaxBracket>) -> Result<Self, TaxScheduleError> {
        if brackets.is_empty() {
            return Err(TaxScheduleError::Empty);
        }

        let last = brackets.len() - 1;
        let mut previous = Decimal::ZERO;

        for (index, bracket) in brackets.iter().enumerate() {
            if bracket.rate < Decimal::ZERO || bracket.rate >= Decimal::ONE {
                return Err(TaxScheduleError::InvalidRate {
                    index,
                    rate: bracket.rate,
                });
            }

            match bracket.upper_limit {
                None if index != last => {
                    return Err(TaxScheduleError::UnboundedBeforeEnd { index });
                }
                None => {}
                Some(_) if index == last => return Err(TaxScheduleError::BoundedTopBracket),
                Some(limit) if limit <= Decimal::ZERO => {
                    return Err(TaxScheduleError::NonPositiveLimit { index, limit });
                }
                Some(limit) if limit <= previous => {
                    return Err(TaxScheduleError::NonIncreasingLimit {
                        index,
                        limit,
                        previous,
                    });
                }
                Some(limit) => previous = limit,
            }
        }

        Ok(Self { brackets })
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    pub fn len(&self) -> usize {
        self.brackets.len()
    }

    /// Always false for a constructed schedule; kept alongside `len`.
    pub fn is_empty(&self) -> bool {
        self.brackets.is_empty()
    }
}

impl Default for TaxSchedule {
    fn default() -> Self {
        let millions = |m: i64| Decimal::from(m * 1_000_000);
        let percent = |p: i64| Decimal::new(p, 2);

        Self {
            brackets: vec![
                TaxBracket::bounded(millions(5), percent(5)),
                TaxBracket::bounded(millions(10), percent(10)),
                TaxBracket::bounded(millions(18), percent(15)),
                TaxBracket::bounded(millions(32), percent(20)),
                TaxBracket::bounded(millions(52), percent(25)),
                TaxBracket::bounded(millions(80), percent(30)),
                TaxBracket::unbounded(percent(35)),
            ],
        }
    }
}

impl TryFrom<Vec<TaxBracket>> for TaxSchedule {
    type Error = TaxScheduleError;

    fn try_from(brackets: Vec<TaxBracket>) -> Result<Self, Self::Error> {
        Self::new(brackets)
    }
}

impl From<TaxSchedule> for Vec<TaxBracket> {
    fn from(schedule: TaxSchedule) -> Self {
        schedule.brackets
    }
}
