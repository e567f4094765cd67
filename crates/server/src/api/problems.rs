//! Problem CRUD endpoints: thin glue around the catalog and the pipeline.

use std::collections::HashSet;
use std::str::FromStr;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use codeforge_api_types::{
    CreateProblemRequest, CreateProblemResponse, MessageResponse, ProblemDetail,
    ProblemDetailResponse, ProblemListResponse, ProblemSummary, SubmissionListResponse,
    SubmissionSummary,
};
use codeforge_core::domain::{ProblemId, SubmissionStatus, UserId};
use judge_orchestrator::{GradingStore, UserDirectory, ViewCache};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::error::ApiError;
use super::state::AppState;
use crate::repository::{NewProblem, ProblemRecord, ProblemRepository};

pub fn create_problem_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/problems", get(list_problems).post(create_problem))
        .route("/api/problems/{id}", get(get_problem).delete(delete_problem))
        .route("/api/problems/{id}/submissions", get(list_submissions))
}

/// Creates a problem after pre-validating every reference solution against
/// the draft's test cases.
async fn create_problem(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<CreateProblemRequest>,
) -> Result<(StatusCode, Json<CreateProblemResponse>), ApiError> {
    let author = require_user(&state, &headers).await?;

    if request.title.trim().is_empty() || request.description.trim().is_empty() {
        return Err(ApiError::bad_request("title and description are required"));
    }
    if request.test_cases.is_empty() {
        return Err(ApiError::bad_request("at least one test case is required"));
    }
    if request.reference_solutions.is_empty() {
        return Err(ApiError::bad_request(
            "a reference solution must be provided for at least one language",
        ));
    }

    let cancel = CancellationToken::new();
    state
        .orchestrator
        .validate_reference_solutions(&request.reference_solutions, &request.test_cases, &cancel)
        .await?;

    let record = state
        .problems
        .create(NewProblem {
            user_id: author,
            title: request.title,
            description: request.description,
            difficulty: request.difficulty,
            tags: request.tags,
            examples: request.examples,
            constraints: request.constraints,
            code_snippets: request.code_snippets,
            reference_solutions: request.reference_solutions,
            test_cases: request.test_cases,
        })
        .await?;

    state.cache.invalidate_problem_list();
    info!(problem_id = %record.id, title = %record.title, "problem created");

    Ok((
        StatusCode::CREATED,
        Json(CreateProblemResponse {
            success: true,
            data: detail_view(record),
            message: "Problem created successfully".to_string(),
        }),
    ))
}

/// Lists problems newest first, flagging the ones the requesting user has
/// solved.
async fn list_problems(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let user = resolve_user(&state, &headers).await?;

    if user.is_none() {
        if let Some(cached) = state.cache.cached_list() {
            return Ok(Json(cached));
        }
    }

    let solved: HashSet<ProblemId> = match user {
        Some(user_id) => state
            .grading
            .solved_problems_for_user(user_id)
            .await?
            .into_iter()
            .collect(),
        None => HashSet::new(),
    };

    let problems = state.problems.list().await?;
    let response = ProblemListResponse {
        success: true,
        data: problems
            .into_iter()
            .map(|record| ProblemSummary {
                id: record.id,
                title: record.title,
                difficulty: record.difficulty,
                tags: record.tags,
                solved: solved.contains(&record.id),
                created_at: record.created_at.and_utc().to_rfc3339(),
            })
            .collect(),
    };

    let value = serde_json::to_value(&response).map_err(anyhow::Error::from)?;
    if user.is_none() {
        state.cache.store_list(value.clone());
    }

    Ok(Json(value))
}

async fn get_problem(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let problem_id = parse_problem_id(&id)?;

    if let Some(cached) = state.cache.cached_problem(problem_id) {
        return Ok(Json(cached));
    }

    let record = ProblemRepository::find_by_id(state.problems.as_ref(), problem_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("problem not found: {problem_id}")))?;

    let response = ProblemDetailResponse {
        success: true,
        data: detail_view(record),
    };
    let value = serde_json::to_value(&response).map_err(anyhow::Error::from)?;
    state.cache.store_problem(problem_id, value.clone());

    Ok(Json(value))
}

async fn delete_problem(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    require_user(&state, &headers).await?;
    let problem_id = parse_problem_id(&id)?;

    let deleted = state.problems.delete(problem_id).await?;
    if !deleted {
        return Err(ApiError::not_found(format!("problem not found: {problem_id}")));
    }

    state.cache.invalidate_problem_list();
    state.cache.invalidate_problem(problem_id);
    info!(problem_id = %problem_id, "problem deleted");

    Ok(Json(MessageResponse {
        success: true,
        message: "Problem deleted successfully".to_string(),
    }))
}

/// The requesting user's submissions against a problem, newest first.
async fn list_submissions(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<SubmissionListResponse>, ApiError> {
    let user = require_user(&state, &headers).await?;
    let problem_id = parse_problem_id(&id)?;

    let submissions = state
        .grading
        .submissions_for_user_and_problem(user, problem_id)
        .await?;

    Ok(Json(SubmissionListResponse {
        success: true,
        data: submissions
            .into_iter()
            .map(|record| SubmissionSummary {
                id: record.id,
                language: record.language.as_str().to_string(),
                status: match record.status {
                    SubmissionStatus::Accepted => "ACCEPTED".to_string(),
                    SubmissionStatus::WrongAnswer => "WRONG_ANSWER".to_string(),
                },
                created_at: record.created_at.and_utc().to_rfc3339(),
            })
            .collect(),
    }))
}

/// Reference solutions never leave the server; the detail view exposes
/// everything else.
fn detail_view(record: ProblemRecord) -> ProblemDetail {
    ProblemDetail {
        id: record.id,
        title: record.title,
        description: record.description,
        difficulty: record.difficulty,
        tags: record.tags,
        examples: record.examples,
        constraints: record.constraints,
        code_snippets: record.code_snippets,
        test_cases: record.test_cases,
        created_at: record.created_at.and_utc().to_rfc3339(),
    }
}

fn parse_problem_id(raw: &str) -> Result<ProblemId, ApiError> {
    ProblemId::from_str(raw)
        .map_err(|_| ApiError::bad_request(format!("invalid problem id: {raw}")))
}

async fn resolve_user(state: &AppState, headers: &HeaderMap) -> Result<Option<UserId>, ApiError> {
    let Some(external_id) = super::external_user_id(headers) else {
        return Ok(None);
    };

    let record = state.users.find_by_external_id(&external_id).await?;
    Ok(record.map(|record| record.id))
}

async fn require_user(state: &AppState, headers: &HeaderMap) -> Result<UserId, ApiError> {
    let external_id = super::external_user_id(headers).ok_or_else(ApiError::unauthenticated)?;

    state
        .users
        .find_by_external_id(&external_id)
        .await?
        .map(|record| record.id)
        .ok_or_else(|| ApiError::not_found(format!("user not found: {external_id}")))
}
