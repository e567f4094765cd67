//! Ports the orchestrator needs from the surrounding application.
//!
//! The pipeline never reaches into ambient global state: every collaborator
//! is injected through one of these traits, which keeps the orchestrator
//! testable against fakes.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use codeforge_core::domain::{
    Language, ProblemId, SubmissionId, SubmissionStatus, TestCase, UserId,
};

#[derive(Debug, Clone)]
pub struct SubmissionRecord {
    pub id: SubmissionId,
    pub user_id: UserId,
    pub problem_id: ProblemId,
    pub language: Language,
    pub status: SubmissionStatus,
    pub source_code: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub user_id: UserId,
    pub problem_id: ProblemId,
    pub language: Language,
    pub status: SubmissionStatus,
    pub source_code: String,
}

#[derive(Debug, Clone)]
pub struct NewTestCaseResult {
    /// 1-based ordinal of the test case within the problem.
    pub test_case: i32,
    pub passed: bool,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
    pub compile_output: Option<String>,
    pub expected: String,
    pub status: String,
}

/// Durable storage of grading records.
#[async_trait]
pub trait GradingStore: Send + Sync {
    /// Persists the submission and all of its per-test-case results in one
    /// transaction. Partial writes are a correctness bug.
    async fn create_submission_with_results(
        &self,
        submission: NewSubmission,
        results: Vec<NewTestCaseResult>,
    ) -> anyhow::Result<SubmissionRecord>;

    /// Records that the user has solved the problem. Idempotent: the store
    /// enforces the (user, problem) uniqueness via a conflict-safe upsert,
    /// so concurrent submissions cannot race a pre-check.
    async fn upsert_problem_solved(
        &self,
        user_id: UserId,
        problem_id: ProblemId,
    ) -> anyhow::Result<()>;

    /// All submissions the user made against the problem, newest first.
    async fn submissions_for_user_and_problem(
        &self,
        user_id: UserId,
        problem_id: ProblemId,
    ) -> anyhow::Result<Vec<SubmissionRecord>>;
}

#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: UserId,
    pub external_id: String,
    pub username: String,
}

/// Resolves the caller's external identity to an internal user record.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_external_id(&self, external_id: &str) -> anyhow::Result<Option<UserRecord>>;
}

/// The slice of a problem the grading path needs: its identity and its
/// canonical, ordered test cases.
#[derive(Debug, Clone)]
pub struct CatalogProblem {
    pub id: ProblemId,
    pub title: String,
    pub test_cases: Vec<TestCase>,
}

#[async_trait]
pub trait ProblemCatalog: Send + Sync {
    async fn find_by_id(&self, problem_id: ProblemId) -> anyhow::Result<Option<CatalogProblem>>;
}

/// Cached problem views the submit path must invalidate after grading.
pub trait ViewCache: Send + Sync {
    fn invalidate_problem_list(&self);
    fn invalidate_problem(&self, problem_id: ProblemId);
}
