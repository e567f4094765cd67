//! Run and submit endpoints: the orchestrator boundary.

use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::post;
use axum::{Json, Router};
use codeforge_api_types::{
    RunCodeRequest, RunCodeResponse, SubmitCodeRequest, SubmitCodeResponse, TestCaseOutcomeDto,
};
use judge_orchestrator::{RunRequest, SubmitRequest, TestCaseOutcome};
use tokio_util::sync::CancellationToken;

use super::error::ApiError;
use super::state::AppState;

pub fn create_evaluation_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/run", post(run_code))
        .route("/api/submit", post(submit_code))
}

/// Evaluates code against the caller's own test cases; nothing is persisted.
async fn run_code(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RunCodeRequest>,
) -> Result<Json<RunCodeResponse>, ApiError> {
    let cancel = CancellationToken::new();
    let outcomes = state
        .orchestrator
        .run(
            RunRequest {
                code: request.code,
                language: request.language,
                test_cases: request.test_cases,
            },
            &cancel,
        )
        .await?;

    Ok(Json(RunCodeResponse {
        success: true,
        data: outcomes.into_iter().map(outcome_dto).collect(),
        message: "Code executed successfully".to_string(),
    }))
}

/// Grades code against the problem's canonical test cases and records the
/// submission.
async fn submit_code(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<SubmitCodeRequest>,
) -> Result<Json<SubmitCodeResponse>, ApiError> {
    let external_user = super::external_user_id(&headers);
    let cancel = CancellationToken::new();

    let outcome = state
        .orchestrator
        .submit(
            SubmitRequest {
                code: request.code,
                language: request.language,
                problem_id: request.problem_id,
            },
            external_user.as_deref(),
            &cancel,
        )
        .await?;

    Ok(Json(SubmitCodeResponse {
        success: true,
        data: outcome.outcomes.into_iter().map(outcome_dto).collect(),
        submission_id: outcome.submission_id,
        is_accepted: outcome.all_passed,
        message: outcome.message,
    }))
}

fn outcome_dto(outcome: TestCaseOutcome) -> TestCaseOutcomeDto {
    TestCaseOutcomeDto {
        test_case: outcome.test_case,
        passed: outcome.passed,
        status: outcome.status,
        stdout: outcome.stdout,
        stderr: outcome.stderr,
        compile_output: outcome.compile_output,
        expected: outcome.expected,
        time: outcome.time,
        memory: outcome.memory,
    }
}
