use std::sync::Arc;

use salary_core::{PayrollConfig, SalaryCalculator, TaxSchedule};

use crate::config::{ApiConfig, ConfigError};

/// Shared, read-only state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    schedule: Arc<TaxSchedule>,
    payroll: Arc<PayrollConfig>,
}

impl AppState {
    pub fn new(
        schedule: TaxSchedule,
        payroll: PayrollConfig,
    ) -> Self {
        Self {
            schedule: Arc::new(schedule),
            payroll: Arc::new(payroll),
        }
    }

    /// Validates `config` and resolves its tax schedule.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let schedule = config.load_schedule()?;
        Ok(Self::new(schedule, config.payroll.clone()))
    }

    pub fn calculator(&self) -> SalaryCalculator<'_> {
        SalaryCalculator::new(&self.schedule, &self.payroll)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(TaxSchedule::default(), PayrollConfig::default())
    }
}
