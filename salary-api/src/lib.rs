pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod router;
pub mod state;

pub use config::{ApiConfig, ConfigError};
pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
