//! Snowflake client error types.

use forge_config::ConfigError;
use thiserror::Error;

/// Errors that can occur when talking to Snowflake REST endpoints.
#[derive(Debug, Error)]
pub enum SnowflakeError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Snowflake returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message extracted from the response body.
        message: String,
    },

    /// The account is throttling requests (429).
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// A response body did not have the expected shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// Connection settings are incomplete.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An asynchronous statement was still running after the last poll.
    #[error("statement {handle} still running after {attempts} polls")]
    StatementTimeout {
        /// Statement handle that was being polled.
        handle: String,
        /// Number of status polls made.
        attempts: u32,
    },
}
