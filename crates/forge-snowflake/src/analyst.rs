//! Cortex Analyst message API.
//!
//! Sends a natural-language question together with a semantic model, either
//! inline YAML or a staged model file, and decodes the analyst's reply.

use forge_config::SnowflakeConfig;
use serde::{Deserialize, Serialize};

use crate::error::SnowflakeError;
use crate::http::{authorize, build_client, check_response};

// ── Request ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct MessageRequest<'a> {
    messages: [RequestMessage<'a>; 1],
    #[serde(flatten)]
    model: ModelRef<'a>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct RequestMessage<'a> {
    role: &'static str,
    content: [RequestContent<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    text: &'a str,
}

#[derive(Debug, Serialize)]
enum ModelRef<'a> {
    /// Model YAML sent in the request body.
    #[serde(rename = "semantic_model")]
    Inline(&'a str),
    /// Stage path of an uploaded model, e.g. `@DB.SCHEMA.STAGE/model.yaml`.
    #[serde(rename = "semantic_model_file")]
    StageFile(&'a str),
}

impl<'a> MessageRequest<'a> {
    const fn new(question: &'a str, model: ModelRef<'a>) -> Self {
        Self {
            messages: [RequestMessage {
                role: "user",
                content: [RequestContent {
                    kind: "text",
                    text: question,
                }],
            }],
            model,
            stream: false,
        }
    }
}

// ── Response ───────────────────────────────────────────────────────

/// Decoded analyst reply.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnalystResponse {
    pub message: AnalystMessage,
    #[serde(default)]
    pub warnings: Vec<AnalystWarning>,
    #[serde(default)]
    pub request_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnalystMessage {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub content: Vec<AnalystContent>,
}

/// One block of analyst output.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AnalystContent {
    Text {
        text: String,
    },
    Sql {
        statement: String,
    },
    Suggestions {
        #[serde(default)]
        suggestions: Vec<String>,
    },
    /// Block types this client does not interpret.
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnalystWarning {
    #[serde(default)]
    pub message: String,
}

impl AnalystResponse {
    /// Interpretation text blocks, in order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.message.content.iter().filter_map(|block| match block {
            AnalystContent::Text { text } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Generated SQL, if the analyst produced any.
    #[must_use]
    pub fn sql(&self) -> Option<&str> {
        self.message.content.iter().find_map(|block| match block {
            AnalystContent::Sql { statement } => Some(statement.as_str()),
            _ => None,
        })
    }

    /// Follow-up questions suggested when the question was ambiguous.
    #[must_use]
    pub fn suggestions(&self) -> Vec<&str> {
        self.message
            .content
            .iter()
            .filter_map(|block| match block {
                AnalystContent::Suggestions { suggestions } => Some(suggestions),
                _ => None,
            })
            .flatten()
            .map(String::as_str)
            .collect()
    }
}

// ── Client ─────────────────────────────────────────────────────────

/// Client for the Cortex Analyst REST API.
pub struct AnalystClient {
    http: reqwest::Client,
    config: SnowflakeConfig,
    url: String,
}

impl AnalystClient {
    /// Create a client for the configured account.
    ///
    /// Only the account and token are required.
    ///
    /// # Errors
    ///
    /// Returns [`SnowflakeError::Config`] if the account or token is unset.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    pub fn new(config: &SnowflakeConfig) -> Result<Self, SnowflakeError> {
        config.require_auth()?;
        Ok(Self {
            http: build_client(config),
            url: format!("{}/api/v2/cortex/analyst/message", config.account_url()),
            config: config.clone(),
        })
    }

    /// Ask `question` against an inline semantic model.
    ///
    /// # Errors
    ///
    /// Returns [`SnowflakeError`] if the request fails, the API returns a
    /// non-success status, or the reply cannot be parsed.
    pub async fn send_message(
        &self,
        question: &str,
        semantic_model_yaml: &str,
    ) -> Result<AnalystResponse, SnowflakeError> {
        self.send(MessageRequest::new(
            question,
            ModelRef::Inline(semantic_model_yaml),
        ))
        .await
    }

    /// Ask `question` against a model file already uploaded to a stage.
    ///
    /// # Errors
    ///
    /// Same as [`Self::send_message`].
    pub async fn send_message_for_file(
        &self,
        question: &str,
        stage_path: &str,
    ) -> Result<AnalystResponse, SnowflakeError> {
        self.send(MessageRequest::new(question, ModelRef::StageFile(stage_path)))
            .await
    }

    async fn send(&self, body: MessageRequest<'_>) -> Result<AnalystResponse, SnowflakeError> {
        tracing::debug!(url = %self.url, "sending analyst message");
        let resp = authorize(self.http.post(&self.url), &self.config)
            .json(&body)
            .send()
            .await?;
        let reply: AnalystResponse = check_response(resp).await?.json().await?;
        tracing::info!(
            request_id = reply.request_id.as_deref().unwrap_or_default(),
            blocks = reply.message.content.len(),
            warnings = reply.warnings.len(),
            "analyst replied"
        );
        Ok(reply)
    }
}
