//! Shared request/response types used by API-facing crates.

use std::collections::BTreeMap;

use codeforge_core::domain::{Difficulty, Example, ProblemId, SubmissionId, TestCase};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    pub status: String,
}

impl HealthCheckResponse {
    #[must_use]
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// Failure envelope: every error crosses the API boundary as a structured
/// value, never as a crash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// Ephemeral evaluation against caller-supplied test cases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunCodeRequest {
    pub code: String,
    pub language: String,
    pub test_cases: Vec<TestCase>,
}

/// Authoritative grading against the problem's own test cases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitCodeRequest {
    pub code: String,
    pub language: String,
    pub problem_id: ProblemId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCaseOutcomeDto {
    pub test_case: usize,
    pub passed: bool,
    pub status: String,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
    pub compile_output: Option<String>,
    pub expected: String,
    pub time: Option<String>,
    pub memory: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunCodeResponse {
    pub success: bool,
    pub data: Vec<TestCaseOutcomeDto>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitCodeResponse {
    pub success: bool,
    pub data: Vec<TestCaseOutcomeDto>,
    pub submission_id: SubmissionId,
    pub is_accepted: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProblemRequest {
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub tags: Vec<String>,
    pub examples: Vec<Example>,
    pub constraints: String,
    /// Starter code per canonical uppercase language name.
    pub code_snippets: BTreeMap<String, String>,
    /// Known-correct solution per language, pre-validated before creation.
    pub reference_solutions: BTreeMap<String, String>,
    pub test_cases: Vec<TestCase>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemSummary {
    pub id: ProblemId,
    pub title: String,
    pub difficulty: Difficulty,
    pub tags: Vec<String>,
    /// Whether the requesting user has an accepted submission, when the
    /// request carries a user identity.
    pub solved: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDetail {
    pub id: ProblemId,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub tags: Vec<String>,
    pub examples: Vec<Example>,
    pub constraints: String,
    pub code_snippets: BTreeMap<String, String>,
    pub test_cases: Vec<TestCase>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionSummary {
    pub id: SubmissionId,
    pub language: String,
    pub status: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemListResponse {
    pub success: bool,
    pub data: Vec<ProblemSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDetailResponse {
    pub success: bool,
    pub data: ProblemDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProblemResponse {
    pub success: bool,
    pub data: ProblemDetail,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionListResponse {
    pub success: bool,
    pub data: Vec<SubmissionSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_check_ok_payload() {
        let response = HealthCheckResponse::ok();
        assert_eq!(response.status, "ok");
    }

    #[test]
    fn error_response_round_trip_json() {
        let response = ErrorResponse::new("problem not found");

        let json = serde_json::to_string(&response).expect("serialize error response");
        assert!(json.contains("\"success\":false"));

        let decoded: ErrorResponse =
            serde_json::from_str(&json).expect("deserialize error response");
        assert_eq!(decoded, response);
    }

    #[test]
    fn run_request_parses_from_client_json() {
        let raw = r#"{
            "code": "print(input())",
            "language": "PYTHON",
            "test_cases": [{"input": "1", "output": "1"}]
        }"#;

        let request: RunCodeRequest = serde_json::from_str(raw).expect("parse run request");

        assert_eq!(request.language, "PYTHON");
        assert_eq!(request.test_cases.len(), 1);
        assert_eq!(request.test_cases[0].expected_output, "1");
    }
}
