//! # forge-config
//!
//! Layered configuration loading for semforge using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SEMFORGE_*` prefix, `__` as separator)
//! 2. Plain Snowflake variables (`SNOWFLAKE_ACCOUNT`, `SNOWFLAKE_TOKEN`, ...)
//! 3. An explicit config file passed by the caller (`--config`)
//! 4. Project-level `./semforge.toml`
//! 5. User-level `~/.config/semforge/config.toml`
//! 6. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `SEMFORGE_STAGE__DESTINATION` -> `stage.destination`,
//! `SEMFORGE_MODEL__BASE_TEMPLATE` -> `model.base_template`, etc.
//! `SNOWFLAKE_<KEY>` maps to `snowflake.<key>`, with `SNOWFLAKE_PAT` accepted
//! as an alias for `SNOWFLAKE_TOKEN`.
//!
//! # Usage
//!
//! ```no_run
//! use forge_config::ForgeConfig;
//!
//! let config = ForgeConfig::load_with_dotenv().expect("config");
//!
//! if config.snowflake.is_configured() {
//!     println!("Account URL: {}", config.snowflake.account_url());
//! }
//! ```

mod error;
mod model;
mod snowflake;
mod stage;

pub use error::ConfigError;
pub use model::ModelConfig;
pub use snowflake::SnowflakeConfig;
pub use stage::{StageBackend, StageConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project-local config file name.
pub const PROJECT_CONFIG_FILE: &str = "semforge.toml";

/// `SNOWFLAKE_*` variables read into the `snowflake` section.
const SNOWFLAKE_ENV_KEYS: &[&str] = &[
    "account",
    "host",
    "user",
    "token",
    "pat",
    "token_type",
    "warehouse",
    "database",
    "schema",
    "role",
    "timeout_secs",
];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ForgeConfig {
    #[serde(default)]
    pub snowflake: SnowflakeConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub stage: StageConfig,
}

impl ForgeConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be read or a value
    /// has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, layering `explicit` above the discovered TOML files.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if `explicit` does not exist, or
    /// [`ConfigError::Figment`] on extraction failure.
    pub fn load_from(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ConfigError::InvalidValue {
                    field: String::from("config"),
                    reason: format!("config file {} does not exist", path.display()),
                });
            }
        }
        Self::figment(explicit).extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Calls `dotenvy` to load `.env` from the current directory before
    /// building the figment. This is the typical entry point for the CLI.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment(explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(PROJECT_CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Explicit config file
        if let Some(path) = explicit {
            figment = figment.merge(Toml::file(path));
        }

        // Layer 4: Plain Snowflake variables shared with other tooling
        figment = figment.merge(Self::snowflake_env());

        // Layer 5: Environment variables (highest priority)
        figment.merge(Env::prefixed("SEMFORGE_").split("__"))
    }

    /// `SNOWFLAKE_<KEY>` → `snowflake.<key>`, `SNOWFLAKE_PAT` → `snowflake.token`.
    fn snowflake_env() -> Env {
        Env::prefixed("SNOWFLAKE_")
            .filter(|key| {
                SNOWFLAKE_ENV_KEYS
                    .iter()
                    .any(|known| key.as_str().eq_ignore_ascii_case(known))
            })
            .map(|key| {
                if key.as_str().eq_ignore_ascii_case("pat") {
                    "snowflake.token".into()
                } else {
                    format!("snowflake.{}", key.as_str()).into()
                }
            })
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("semforge").join("config.toml"))
    }
}
