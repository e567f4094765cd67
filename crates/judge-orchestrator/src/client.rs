//! Thin boundary around the remote execution service's batch API.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EvaluationError, Result};
use crate::status::ExecutionStatus;

/// One code-run request inside a batch: the source, the service's language
/// id, the stdin to feed, and the stdout the service should compare against.
#[derive(Debug, Clone, Serialize)]
pub struct BatchItem {
    pub source_code: String,
    pub language_id: i32,
    pub stdin: String,
    pub expected_output: String,
}

/// Opaque handle the service returns for each submitted batch item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubmissionToken(pub String);

impl SubmissionToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Raw status payload as the service reports it.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusPayload {
    pub id: i32,
    #[serde(default)]
    pub description: String,
}

/// Result of executing one batch item, as fetched from the service.
///
/// Transient: the orchestrator folds these into grading records and drops
/// them; they are never persisted as-is.
#[derive(Debug, Clone, Deserialize)]
pub struct ExecutionResult {
    pub status: StatusPayload,
    #[serde(default)]
    pub stdout: Option<String>,
    #[serde(default)]
    pub stderr: Option<String>,
    #[serde(default)]
    pub compile_output: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub memory: Option<f64>,
}

impl ExecutionResult {
    pub fn execution_status(&self) -> ExecutionStatus {
        ExecutionStatus::from_id(self.status.id)
    }
}

#[async_trait]
pub trait ExecutionClient: Send + Sync {
    /// Submits a batch and returns one token per item, order-preserving.
    /// There are no partial-batch semantics: either every item yields a
    /// token or the whole call fails.
    async fn submit_batch(&self, items: &[BatchItem]) -> Result<Vec<SubmissionToken>>;

    /// Fetches the current result for every token, in token order.
    async fn fetch_batch_results(
        &self,
        tokens: &[SubmissionToken],
    ) -> Result<Vec<ExecutionResult>>;
}

/// HTTP implementation speaking the service's batch endpoints.
pub struct HttpExecutionClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct BatchRequest<'a> {
    submissions: &'a [BatchItem],
}

#[derive(Debug, Deserialize)]
struct TokenPayload {
    token: String,
}

#[derive(Debug, Deserialize)]
struct BatchResultsPayload {
    submissions: Vec<ExecutionResult>,
}

impl HttpExecutionClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ExecutionClient for HttpExecutionClient {
    async fn submit_batch(&self, items: &[BatchItem]) -> Result<Vec<SubmissionToken>> {
        let url = format!("{}/submissions/batch", self.base_url);
        debug!(count = items.len(), "submitting batch to execution service");

        let response = self
            .client
            .post(&url)
            .query(&[("base64_encoded", "false")])
            .json(&BatchRequest { submissions: items })
            .send()
            .await?
            .error_for_status()?;

        let created: Vec<TokenPayload> = response.json().await?;
        if created.len() != items.len() {
            return Err(EvaluationError::MalformedResponse(format!(
                "submitted {} items but received {} tokens",
                items.len(),
                created.len()
            )));
        }

        Ok(created
            .into_iter()
            .map(|payload| SubmissionToken(payload.token))
            .collect())
    }

    async fn fetch_batch_results(
        &self,
        tokens: &[SubmissionToken],
    ) -> Result<Vec<ExecutionResult>> {
        let url = format!("{}/submissions/batch", self.base_url);
        let joined = tokens
            .iter()
            .map(SubmissionToken::as_str)
            .collect::<Vec<_>>()
            .join(",");

        let response = self
            .client
            .get(&url)
            .query(&[("tokens", joined.as_str()), ("base64_encoded", "false")])
            .send()
            .await?
            .error_for_status()?;

        let payload: BatchResultsPayload = response.json().await?;
        if payload.submissions.len() != tokens.len() {
            return Err(EvaluationError::MalformedResponse(format!(
                "queried {} tokens but received {} results",
                tokens.len(),
                payload.submissions.len()
            )));
        }

        Ok(payload.submissions)
    }
}

#[cfg(test)]
mod tests {
    use super::ExecutionResult;
    use crate::status::ExecutionStatus;

    #[test]
    fn parses_service_result_payload() {
        let raw = r#"{
            "status": {"id": 3, "description": "Accepted"},
            "stdout": "42\n",
            "stderr": null,
            "compile_output": null,
            "time": "0.002",
            "memory": 376
        }"#;

        let result: ExecutionResult =
            serde_json::from_str(raw).expect("result payload should parse");

        assert_eq!(result.execution_status(), ExecutionStatus::Accepted);
        assert_eq!(result.status.description, "Accepted");
        assert_eq!(result.stdout.as_deref(), Some("42\n"));
        assert_eq!(result.time.as_deref(), Some("0.002"));
        assert_eq!(result.memory, Some(376.0));
    }

    #[test]
    fn parses_result_with_missing_optional_fields() {
        let raw = r#"{"status": {"id": 2}}"#;

        let result: ExecutionResult =
            serde_json::from_str(raw).expect("sparse payload should parse");

        assert_eq!(result.execution_status(), ExecutionStatus::Running);
        assert!(result.stdout.is_none());
        assert!(result.memory.is_none());
    }
}
