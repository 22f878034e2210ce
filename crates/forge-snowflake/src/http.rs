//! Shared HTTP plumbing for the Snowflake clients.
//!
//! Status-code checks (429 with `Retry-After`, non-success → [`SnowflakeError::Api`])
//! and the auth headers every request carries.

use forge_config::SnowflakeConfig;

use crate::error::SnowflakeError;

const USER_AGENT: &str = concat!("semforge/", env!("CARGO_PKG_VERSION"));

/// Header naming the kind of bearer token sent.
pub const TOKEN_TYPE_HEADER: &str = "X-Snowflake-Authorization-Token-Type";

/// Build the HTTP client used by both Snowflake clients.
///
/// # Panics
///
/// Panics if the underlying `reqwest::Client` fails to build.
pub fn build_client(config: &SnowflakeConfig) -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(std::time::Duration::from_secs(config.timeout_secs.max(1) + 30))
        .build()
        .expect("reqwest client should build")
}

/// Attach bearer auth, token type, and JSON accept headers.
pub fn authorize(
    request: reqwest::RequestBuilder,
    config: &SnowflakeConfig,
) -> reqwest::RequestBuilder {
    request
        .bearer_auth(&config.token)
        .header(TOKEN_TYPE_HEADER, &config.token_type)
        .header(reqwest::header::ACCEPT, "application/json")
}

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success (including 202). Handles:
/// - **429 Too Many Requests** → [`SnowflakeError::RateLimited`] with
///   `Retry-After` header parsing (falls back to 60 s if absent or
///   unparseable).
/// - **Non-success status** → [`SnowflakeError::Api`] with the status code
///   and the body's `message` field, or the raw body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, SnowflakeError> {
    if resp.status() == 429 {
        return Err(SnowflakeError::RateLimited {
            retry_after_secs: parse_retry_after(&resp),
        });
    }
    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        return Err(SnowflakeError::Api {
            status,
            message: error_message(&body),
        });
    }
    Ok(resp)
}

/// Parse the `Retry-After` header as seconds, falling back to 60 s.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60)
}

/// Snowflake error bodies are JSON with `code` and `message`; prefer those.
fn error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.trim().to_string();
    };
    let message = value.get("message").and_then(serde_json::Value::as_str);
    let code = value.get("code").and_then(serde_json::Value::as_str);
    match (code, message) {
        (Some(code), Some(message)) => format!("{message} (code {code})"),
        (None, Some(message)) => message.to_string(),
        _ => body.trim().to_string(),
    }
}
