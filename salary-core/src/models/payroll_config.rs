use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced by [`PayrollConfig::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayrollConfigError {
    /// One of the insurance rates is outside `[0, 1]`.
    #[error("{name} must be between 0 and 1, got {rate}")]
    InvalidInsuranceRate { name: &'static str, rate: Decimal },

    /// The combined insurance rate would consume the whole gross salary.
    #[error("combined insurance rate must be below 1, got {0}")]
    CombinedInsuranceRateTooHigh(Decimal),

    /// The personal deduction must be non-negative.
    #[error("personal deduction must be non-negative, got {0}")]
    InvalidPersonalDeduction(Decimal),

    /// The per-dependent deduction must be non-negative.
    #[error("dependent deduction must be non-negative, got {0}")]
    InvalidDependentDeduction(Decimal),
}

/// Statutory payroll constants applied before the progressive tax.
///
/// Insurance is a flat share of gross salary with no contribution cap.
/// The defaults are the social (8%), health (1.5%) and unemployment (1%)
/// employee rates, an 11,000,000 personal allowance and 4,400,000 per
/// dependent.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use salary_core::PayrollConfig;
///
/// let config = PayrollConfig::default();
///
/// assert_eq!(config.total_insurance_rate(), dec!(0.105));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayrollConfig {
    /// Social insurance rate.
    pub social_insurance_rate: Decimal,

    /// Health insurance rate.
    pub health_insurance_rate: Decimal,

    /// Unemployment insurance rate.
    pub unemployment_insurance_rate: Decimal,

    /// Non-taxable allowance granted to every employee.
    pub personal_deduction: Decimal,

    /// Additional allowance per registered dependent.
    pub dependent_deduction: Decimal,
}

impl Default for PayrollConfig {
    fn default() -> Self {
        Self {
            social_insurance_rate: Decimal::new(8, 2),
            health_insurance_rate: Decimal::new(15, 3),
            unemployment_insurance_rate: Decimal::new(1, 2),
            personal_deduction: Decimal::from(11_000_000),
            dependent_deduction: Decimal::from(4_400_000),
        }
    }
}

impl PayrollConfig {
    /// Sum of the three insurance rates.
    pub fn total_insurance_rate(&self) -> Decimal {
        self.social_insurance_rate + self.health_insurance_rate + self.unemployment_insurance_rate
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollConfigError`] if:
    /// - any insurance rate is not in [0, 1]
    /// - the combined insurance rate is 1 or more
    /// - either deduction is negative
    pub fn validate(&self) -> Result<(), PayrollConfigError> {
        let rates = [
            ("social insurance rate", self.social_insurance_rate),
            ("health insurance rate", self.health_insurance_rate),
            ("unemployment insurance rate", self.unemployment_insurance_rate),
        ];
        for (name, rate) in rates {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(PayrollConfigError::InvalidInsuranceRate { name, rate });
            }
        }

        let total = self.total_insurance_rate();
        if total >= Decimal::ONE {
            return Err(PayrollConfigError::CombinedInsuranceRateTooHigh(total));
        }

        if self.personal_deduction < Decimal::ZERO {
            return Err(PayrollConfigError::InvalidPersonalDeduction(
                self.personal_deduction,
            ));
        }

        if self.dependent_deduction < Decimal::ZERO {
            return Err(PayrollConfigError::InvalidDependentDeduction(
                self.dependent_deduction,
            ));
        }

        Ok(())
    }
}
