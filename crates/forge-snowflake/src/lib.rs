//! # forge-snowflake
//!
//! Snowflake REST clients for semforge:
//! - [`SnowflakeClient`]: SQL API statement execution with async polling and
//!   partition pagination, returning a [`forge_core::ResultSet`]
//! - [`AnalystClient`]: Cortex Analyst message API
//!
//! Both authenticate with a bearer token and the
//! `X-Snowflake-Authorization-Token-Type` header taken from
//! [`forge_config::SnowflakeConfig`].

pub mod analyst;
pub mod statements;

mod error;
mod http;

pub use analyst::{AnalystClient, AnalystContent, AnalystMessage, AnalystResponse, AnalystWarning};
pub use error::SnowflakeError;
pub use statements::{MAX_POLL_ATTEMPTS, SnowflakeClient};
