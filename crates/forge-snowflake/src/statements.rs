//! SQL API statement execution.
//!
//! `POST /api/v2/statements` runs a statement; a `202` means it is still
//! executing and the handle is polled until the result is ready. Large
//! results are split into partitions, fetched with `?partition=N` and
//! concatenated in order.

use std::time::Duration;

use forge_config::SnowflakeConfig;
use forge_core::ResultSet;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::SnowflakeError;
use crate::http::{authorize, build_client, check_response};

/// Status polls made before an async statement is abandoned.
pub const MAX_POLL_ATTEMPTS: u32 = 60;

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

// ── Wire types ─────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct StatementRequest<'a> {
    statement: &'a str,
    timeout: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    database: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    schema: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warehouse: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
}

impl<'a> StatementRequest<'a> {
    fn new(statement: &'a str, config: &'a SnowflakeConfig) -> Self {
        Self {
            statement,
            timeout: config.timeout_secs,
            database: non_empty(&config.database),
            schema: non_empty(&config.schema),
            warehouse: non_empty(&config.warehouse),
            role: non_empty(&config.role),
        }
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatementResponse {
    #[serde(default)]
    statement_handle: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    result_set_meta_data: Option<ResultSetMetaData>,
    #[serde(default)]
    data: Vec<Vec<Option<String>>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResultSetMetaData {
    #[serde(default)]
    num_rows: u64,
    #[serde(default)]
    row_type: Vec<ColumnType>,
    #[serde(default)]
    partition_info: Vec<PartitionInfo>,
}

#[derive(Debug, Deserialize)]
struct ColumnType {
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PartitionInfo {
    #[serde(default)]
    row_count: u64,
}

/// First page of a finished statement, before remaining partitions are fetched.
#[derive(Debug)]
struct FirstPage {
    handle: String,
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
    partitions: usize,
    /// Row count announced for each partition, in partition order.
    partition_rows: Vec<u64>,
    expected_rows: u64,
}

impl StatementResponse {
    fn into_first_page(self) -> Result<FirstPage, SnowflakeError> {
        let handle = self
            .statement_handle
            .ok_or_else(|| SnowflakeError::Parse("response has no statementHandle".into()))?;
        let meta = self
            .result_set_meta_data
            .ok_or_else(|| SnowflakeError::Parse("response has no resultSetMetaData".into()))?;
        let partition_rows: Vec<u64> = meta
            .partition_info
            .into_iter()
            .map(|partition| partition.row_count)
            .collect();
        Ok(FirstPage {
            handle,
            columns: meta.row_type.into_iter().map(|column| column.name).collect(),
            rows: self.data,
            partitions: partition_rows.len().max(1),
            partition_rows,
            expected_rows: meta.num_rows,
        })
    }
}

/// Compare a partition's rows with the count its metadata announced.
///
/// Returns false (and warns) on a mismatch; a partition without an announced
/// count always matches.
fn check_partition_rows(
    handle: &str,
    partition: usize,
    expected: Option<u64>,
    received: usize,
) -> bool {
    match expected {
        Some(expected) if expected != received as u64 => {
            tracing::warn!(
                handle,
                partition,
                expected,
                received,
                "partition row count differs from metadata"
            );
            false
        }
        _ => true,
    }
}

// ── Client ─────────────────────────────────────────────────────────

/// Client for the Snowflake SQL API.
pub struct SnowflakeClient {
    http: reqwest::Client,
    config: SnowflakeConfig,
    base_url: String,
    poll_interval: Duration,
}

impl SnowflakeClient {
    /// Create a client for the configured account.
    ///
    /// # Errors
    ///
    /// Returns [`SnowflakeError::Config`] if the account, token, database, or
    /// schema is unset.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    pub fn new(config: &SnowflakeConfig) -> Result<Self, SnowflakeError> {
        config.require_connection()?;
        Ok(Self {
            http: build_client(config),
            base_url: config.account_url(),
            config: config.clone(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        })
    }

    /// Override the delay between status polls of an async statement.
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Run `sql` and return every row of its result.
    ///
    /// # Errors
    ///
    /// Returns [`SnowflakeError`] if a request fails, Snowflake rejects the
    /// statement, the statement is still running after [`MAX_POLL_ATTEMPTS`]
    /// polls, or a response cannot be parsed.
    pub async fn execute(&self, sql: &str) -> Result<ResultSet, SnowflakeError> {
        let url = format!("{}/api/v2/statements", self.base_url);
        let body = StatementRequest::new(sql, &self.config);
        tracing::debug!(url = %url, warehouse = ?body.warehouse, "submitting statement");

        let resp = authorize(self.http.post(&url), &self.config)
            .json(&body)
            .send()
            .await?;
        let response = self.await_completion(check_response(resp).await?).await?;
        let mut page = response.into_first_page()?;
        check_partition_rows(
            &page.handle,
            0,
            page.partition_rows.first().copied(),
            page.rows.len(),
        );

        for partition in 1..page.partitions {
            let next = self.fetch_partition(&page.handle, partition).await?;
            check_partition_rows(
                &page.handle,
                partition,
                page.partition_rows.get(partition).copied(),
                next.data.len(),
            );
            page.rows.extend(next.data);
        }

        if page.rows.len() as u64 != page.expected_rows {
            tracing::warn!(
                handle = %page.handle,
                expected = page.expected_rows,
                received = page.rows.len(),
                "row count differs from result metadata"
            );
        }
        tracing::info!(
            handle = %page.handle,
            rows = page.rows.len(),
            partitions = page.partitions,
            "statement complete"
        );
        Ok(ResultSet::new(page.columns, page.rows))
    }

    /// Poll a `202` statement until it finishes.
    async fn await_completion(
        &self,
        resp: reqwest::Response,
    ) -> Result<StatementResponse, SnowflakeError> {
        let mut status = resp.status();
        let mut body: StatementResponse = resp.json().await?;
        let mut attempts = 0;

        while status == StatusCode::ACCEPTED {
            let handle = body.statement_handle.clone().ok_or_else(|| {
                SnowflakeError::Parse("async response has no statementHandle".into())
            })?;
            if attempts >= MAX_POLL_ATTEMPTS {
                return Err(SnowflakeError::StatementTimeout { handle, attempts });
            }
            tracing::debug!(
                handle = %handle,
                attempt = attempts + 1,
                message = body.message.as_deref().unwrap_or_default(),
                "statement still running"
            );
            tokio::time::sleep(self.poll_interval).await;
            attempts += 1;

            let resp = authorize(self.http.get(self.statement_url(&handle)), &self.config)
                .send()
                .await?;
            let resp = check_response(resp).await?;
            status = resp.status();
            body = resp.json().await?;
            if body.statement_handle.is_none() {
                body.statement_handle = Some(handle);
            }
        }
        Ok(body)
    }

    async fn fetch_partition(
        &self,
        handle: &str,
        partition: usize,
    ) -> Result<StatementResponse, SnowflakeError> {
        tracing::debug!(handle, partition, "fetching partition");
        let url = format!("{}?partition={partition}", self.statement_url(handle));
        let resp = authorize(self.http.get(&url), &self.config).send().await?;
        Ok(check_response(resp).await?.json().await?)
    }

    fn statement_url(&self, handle: &str) -> String {
        format!("{}/api/v2/statements/{handle}", self.base_url)
    }
}
