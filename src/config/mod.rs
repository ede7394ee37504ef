//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `ORGDESK` prefix and
//! nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use orgdesk::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod database;
mod error;
mod firebase;
mod server;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use firebase::FirebaseConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    pub database: DatabaseConfig,

    pub firebase: FirebaseConfig,
}

impl AppConfig {
    /// Load configuration from the environment.
    ///
    /// Reads `.env` if present, then every `ORGDESK__*` variable:
    ///
    /// - `ORGDESK__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `ORGDESK__DATABASE__URL=...` -> `database.url = ...`
    /// - `ORGDESK__FIREBASE__PROJECT_ID=...` -> `firebase.project_id = ...`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("ORGDESK")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Semantic validation of every section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.firebase.validate(self.server.environment)?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
