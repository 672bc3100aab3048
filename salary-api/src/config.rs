//! Service configuration.
//!
//! Loaded from a TOML file; every section is optional and falls back to its
//! defaults. A minimal file:
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 8080
//!
//! [payroll]
//! dependent_deduction = 4400000
//!
//! [schedule]
//! file = "tax_schedule.csv"
//! ```

use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use salary_core::{PayrollConfig, PayrollConfigError, TaxSchedule};
use salary_data::{TaxScheduleLoader, TaxScheduleLoaderError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logging::DEFAULT_FILTER;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid server address '{0}'")]
    InvalidAddress(String),

    #[error("invalid limit: {0}")]
    InvalidLimit(String),

    #[error("invalid payroll config: {0}")]
    Payroll(#[from] PayrollConfigError),

    #[error("failed to load tax schedule: {0}")]
    Schedule(#[from] TaxScheduleLoaderError),

    #[error("schedule.file and schedule.brackets are mutually exclusive")]
    ConflictingSchedules,
}

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub limits: LimitsConfig,
    pub logging: LoggingConfig,
    pub payroll: PayrollConfig,
    pub schedule: ScheduleConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| ConfigError::InvalidAddress(self.host.clone()))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub enabled: bool,
    /// `"*"` allows any origin.
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed_origins: vec!["*".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum request body size, uploads included.
    pub max_upload_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level or full `EnvFilter` directive. `RUST_LOG` wins at start-up.
    pub level: String,
    /// Also append log records to this file.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_FILTER.to_string(),
            file: None,
        }
    }
}

/// Where the tax schedule comes from. With neither field set the built-in
/// schedule is used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// CSV file with `upper_limit,rate` rows.
    pub file: Option<PathBuf>,
    /// Inline brackets, as `[[schedule.brackets]]` tables.
    pub brackets: Option<TaxSchedule>,
}

impl ApiConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Checks everything that can be checked without touching the network.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.socket_addr()?;

        if self.limits.max_upload_bytes == 0 {
            return Err(ConfigError::InvalidLimit(
                "max_upload_bytes cannot be 0".into(),
            ));
        }

        if self.schedule.file.is_some() && self.schedule.brackets.is_some() {
            return Err(ConfigError::ConflictingSchedules);
        }

        self.payroll.validate()?;
        Ok(())
    }

    /// Resolves the configured tax schedule.
    pub fn load_schedule(&self) -> Result<TaxSchedule, ConfigError> {
        match (&self.schedule.file, &self.schedule.brackets) {
            (Some(_), Some(_)) => Err(ConfigError::ConflictingSchedules),
            (Some(path), None) => Ok(TaxScheduleLoader::load_from_file(path)?),
            (None, Some(schedule)) => Ok(schedule.clone()),
            (None, None) => Ok(TaxSchedule::default()),
        }
    }
}
