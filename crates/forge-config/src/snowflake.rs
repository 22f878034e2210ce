//! Snowflake account, auth, and session configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default token type header value.
fn default_token_type() -> String {
    String::from("PROGRAMMATIC_ACCESS_TOKEN")
}

/// Default statement timeout in seconds.
const fn default_timeout_secs() -> u64 {
    60
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SnowflakeConfig {
    /// Account identifier (e.g., `abc12345.us-east-1`).
    #[serde(default)]
    pub account: String,

    /// Custom base URL. If empty, built from `account`.
    #[serde(default)]
    pub host: String,

    /// Login name. Informational for token auth.
    #[serde(default)]
    pub user: String,

    /// Bearer token: a programmatic access token, OAuth token, or key-pair JWT.
    #[serde(default)]
    pub token: String,

    /// Value for `X-Snowflake-Authorization-Token-Type`.
    #[serde(default = "default_token_type")]
    pub token_type: String,

    #[serde(default)]
    pub warehouse: String,

    #[serde(default)]
    pub database: String,

    #[serde(default)]
    pub schema: String,

    #[serde(default)]
    pub role: String,

    /// Statement timeout, also used as the HTTP request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SnowflakeConfig {
    fn default() -> Self {
        Self {
            account: String::new(),
            host: String::new(),
            user: String::new(),
            token: String::new(),
            token_type: default_token_type(),
            warehouse: String::new(),
            database: String::new(),
            schema: String::new(),
            role: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl SnowflakeConfig {
    /// Check if enough is set to reach the account's REST endpoints.
    #[must_use]
    pub fn can_authenticate(&self) -> bool {
        !self.account.is_empty() && !self.token.is_empty()
    }

    /// Check if the config has everything needed to run statements.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Environment variable names of required values that are unset.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("SNOWFLAKE_ACCOUNT", &self.account),
            ("SNOWFLAKE_TOKEN", &self.token),
            ("SNOWFLAKE_DATABASE", &self.database),
            ("SNOWFLAKE_SCHEMA", &self.schema),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// Fail with every missing required value listed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] naming the unset variables.
    pub fn require_connection(&self) -> Result<(), ConfigError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            return Ok(());
        }
        Err(ConfigError::NotConfigured {
            section: String::from("snowflake"),
            missing: missing.into_iter().map(String::from).collect(),
        })
    }

    /// Fail unless the account and token are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] naming the unset variables.
    pub fn require_auth(&self) -> Result<(), ConfigError> {
        if self.can_authenticate() {
            return Ok(());
        }
        let missing = [("SNOWFLAKE_ACCOUNT", &self.account), ("SNOWFLAKE_TOKEN", &self.token)]
            .into_iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(name, _)| String::from(name))
            .collect();
        Err(ConfigError::NotConfigured {
            section: String::from("snowflake"),
            missing,
        })
    }

    /// Base URL of the account's REST API.
    ///
    /// Returns the custom `host` if set, otherwise builds from `account`.
    #[must_use]
    pub fn account_url(&self) -> String {
        if self.host.is_empty() {
            format!("https://{}.snowflakecomputing.com", self.account)
        } else {
            self.host.trim_end_matches('/').to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connected() -> SnowflakeConfig {
        SnowflakeConfig {
            account: "abc12345.us-east-1".into(),
            token: "pat".into(),
            database: "DB".into(),
            schema: "PUBLIC".into(),
            ..Default::default()
        }
    }

    #[test]
    fn default_is_not_configured() {
        let config = SnowflakeConfig::default();
        assert!(!config.is_configured());
        assert!(!config.can_authenticate());
        assert_eq!(config.token_type, "PROGRAMMATIC_ACCESS_TOKEN");
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn configured_without_optional_fields() {
        let config = connected();
        assert!(config.is_configured());
        assert!(config.require_connection().is_ok());
    }

    #[test]
    fn missing_fields_are_listed_by_env_name() {
        let config = SnowflakeConfig {
            account: "acct".into(),
            ..Default::default()
        };
        assert_eq!(
            config.missing_fields(),
            vec!["SNOWFLAKE_TOKEN", "SNOWFLAKE_DATABASE", "SNOWFLAKE_SCHEMA"]
        );

        let err = config.require_connection().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("SNOWFLAKE_TOKEN, SNOWFLAKE_DATABASE, SNOWFLAKE_SCHEMA"));
    }

    #[test]
    fn auth_only_needs_account_and_token() {
        let config = SnowflakeConfig {
            account: "acct".into(),
            token: "pat".into(),
            ..Default::default()
        };
        assert!(config.require_auth().is_ok());
        assert!(config.require_connection().is_err());

        let err = SnowflakeConfig::default().require_auth().unwrap_err();
        assert!(err.to_string().contains("SNOWFLAKE_ACCOUNT, SNOWFLAKE_TOKEN"));
    }

    #[test]
    fn account_url_built_from_account() {
        assert_eq!(
            connected().account_url(),
            "https://abc12345.us-east-1.snowflakecomputing.com"
        );
    }

    #[test]
    fn custom_host_used_when_set() {
        let config = SnowflakeConfig {
            host: "http://localhost:8080/".into(),
            ..connected()
        };
        assert_eq!(config.account_url(), "http://localhost:8080");
    }
}
