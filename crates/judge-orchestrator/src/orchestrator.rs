//! The state machine driving run, submit, and reference-solution flows.

use std::collections::BTreeMap;
use std::sync::Arc;

use codeforge_core::domain::{ProblemId, SubmissionId, SubmissionStatus, TestCase};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::client::{BatchItem, ExecutionClient, ExecutionResult};
use crate::config::ExecutionServiceConfig;
use crate::error::{EvaluationError, Result};
use crate::poller::BatchPoller;
use crate::registry;
use crate::status::ExecutionStatus;
use crate::store::{
    GradingStore, NewSubmission, NewTestCaseResult, ProblemCatalog, UserDirectory, ViewCache,
};

/// Ephemeral evaluation request: the caller supplies its own test cases and
/// nothing is persisted.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub code: String,
    pub language: String,
    pub test_cases: Vec<TestCase>,
}

/// Authoritative grading request: graded against the problem's own test
/// cases, never the caller's.
#[derive(Debug, Clone)]
pub struct SubmitRequest {
    pub code: String,
    pub language: String,
    pub problem_id: ProblemId,
}

/// Outcome of one test case, in input order.
#[derive(Debug, Clone)]
pub struct TestCaseOutcome {
    /// 1-based ordinal within the evaluated sequence.
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

#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub submission_id: SubmissionId,
    pub status: SubmissionStatus,
    pub all_passed: bool,
    pub message: String,
    pub outcomes: Vec<TestCaseOutcome>,
}

pub struct EvaluationOrchestrator {
    client: Arc<dyn ExecutionClient>,
    store: Arc<dyn GradingStore>,
    users: Arc<dyn UserDirectory>,
    problems: Arc<dyn ProblemCatalog>,
    cache: Arc<dyn ViewCache>,
    poller: BatchPoller,
}

impl EvaluationOrchestrator {
    pub fn new(
        config: &ExecutionServiceConfig,
        client: Arc<dyn ExecutionClient>,
        store: Arc<dyn GradingStore>,
        users: Arc<dyn UserDirectory>,
        problems: Arc<dyn ProblemCatalog>,
        cache: Arc<dyn ViewCache>,
    ) -> Self {
        Self {
            client,
            store,
            users,
            problems,
            cache,
            poller: BatchPoller::from_config(config),
        }
    }

    /// Evaluates `code` against caller-supplied test cases. Returns one
    /// outcome per case, in input order. Persists nothing.
    pub async fn run(
        &self,
        request: RunRequest,
        cancel: &CancellationToken,
    ) -> Result<Vec<TestCaseOutcome>> {
        let (language, language_id) = registry::resolve_language_id(&request.language)
            .ok_or_else(|| EvaluationError::UnsupportedLanguage(request.language.clone()))?;
        if request.test_cases.is_empty() {
            return Err(EvaluationError::NoTestCases);
        }

        info!(
            language = %language,
            cases = request.test_cases.len(),
            "running ephemeral evaluation"
        );

        let results = self
            .evaluate_batch(&request.code, language_id, &request.test_cases, cancel)
            .await?;

        Ok(classify(&results, &request.test_cases))
    }

    /// Grades `code` against the problem's canonical test cases and persists
    /// the grading record atomically.
    pub async fn submit(
        &self,
        request: SubmitRequest,
        external_user_id: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<SubmitOutcome> {
        let external_user_id = external_user_id.ok_or(EvaluationError::Unauthenticated)?;

        let user = self
            .users
            .find_by_external_id(external_user_id)
            .await
            .map_err(EvaluationError::Persistence)?
            .ok_or_else(|| EvaluationError::UserNotFound(external_user_id.to_string()))?;

        let problem = self
            .problems
            .find_by_id(request.problem_id)
            .await
            .map_err(EvaluationError::Persistence)?
            .ok_or(EvaluationError::ProblemNotFound(request.problem_id))?;

        let (language, language_id) = registry::resolve_language_id(&request.language)
            .ok_or_else(|| EvaluationError::UnsupportedLanguage(request.language.clone()))?;
        if problem.test_cases.is_empty() {
            return Err(EvaluationError::NoTestCases);
        }

        info!(
            user_id = %user.id,
            problem_id = %problem.id,
            language = %language,
            cases = problem.test_cases.len(),
            "grading submission"
        );

        let results = self
            .evaluate_batch(&request.code, language_id, &problem.test_cases, cancel)
            .await?;
        let outcomes = classify(&results, &problem.test_cases);

        let passed_count = outcomes.iter().filter(|outcome| outcome.passed).count();
        let all_passed = passed_count == outcomes.len();
        let status = if all_passed {
            SubmissionStatus::Accepted
        } else {
            SubmissionStatus::WrongAnswer
        };

        let submission = NewSubmission {
            user_id: user.id,
            problem_id: problem.id,
            language,
            status,
            source_code: request.code,
        };
        let result_rows = outcomes
            .iter()
            .map(|outcome| NewTestCaseResult {
                test_case: outcome.test_case as i32,
                passed: outcome.passed,
                stdout: outcome.stdout.clone(),
                stderr: outcome.stderr.clone(),
                compile_output: outcome.compile_output.clone(),
                expected: outcome.expected.clone(),
                status: outcome.status.clone(),
            })
            .collect();

        let record = self
            .store
            .create_submission_with_results(submission, result_rows)
            .await
            .map_err(EvaluationError::Persistence)?;

        if all_passed {
            self.store
                .upsert_problem_solved(user.id, problem.id)
                .await
                .map_err(EvaluationError::Persistence)?;
        }

        self.cache.invalidate_problem_list();
        self.cache.invalidate_problem(problem.id);

        let message = if all_passed {
            "All test cases passed".to_string()
        } else {
            format!("{passed_count}/{} test cases passed", outcomes.len())
        };

        info!(
            submission_id = %record.id,
            status = ?status,
            passed = passed_count,
            total = outcomes.len(),
            "submission graded"
        );

        Ok(SubmitOutcome {
            submission_id: record.id,
            status,
            all_passed,
            message,
            outcomes,
        })
    }

    /// Pre-validates a problem draft's reference solutions before the
    /// problem is created.
    ///
    /// Every (language, solution) pair must pass every test case on two
    /// levels: the service must report the run as accepted, AND the trimmed
    /// stdout must equal the trimmed expected output. A clean exit with the
    /// wrong value is still a failure.
    pub async fn validate_reference_solutions(
        &self,
        reference_solutions: &BTreeMap<String, String>,
        test_cases: &[TestCase],
        cancel: &CancellationToken,
    ) -> Result<()> {
        if test_cases.is_empty() {
            return Err(EvaluationError::NoTestCases);
        }

        for (name, solution) in reference_solutions {
            let (language, language_id) = registry::resolve_language_id(name)
                .ok_or_else(|| EvaluationError::UnsupportedLanguage(name.clone()))?;

            info!(
                language = %language,
                cases = test_cases.len(),
                "validating reference solution"
            );

            let results = self
                .evaluate_batch(solution, language_id, test_cases, cancel)
                .await?;

            for (index, (result, case)) in results.iter().zip(test_cases).enumerate() {
                let case_number = index + 1;
                if result.execution_status() != ExecutionStatus::Accepted {
                    return Err(EvaluationError::ReferenceSolutionFailed {
                        language,
                        case: case_number,
                        status: result.status.description.clone(),
                    });
                }

                let expected = case.expected_output.trim();
                let actual = result.stdout.as_deref().unwrap_or("").trim();
                if expected != actual {
                    return Err(EvaluationError::ReferenceSolutionMismatch {
                        language,
                        case: case_number,
                        expected: expected.to_string(),
                        actual: actual.to_string(),
                    });
                }
            }
        }

        Ok(())
    }

    async fn evaluate_batch(
        &self,
        code: &str,
        language_id: i32,
        test_cases: &[TestCase],
        cancel: &CancellationToken,
    ) -> Result<Vec<ExecutionResult>> {
        let items = build_batch(code, language_id, test_cases);
        let tokens = self.client.submit_batch(&items).await?;
        self.poller
            .poll_until_done(self.client.as_ref(), &tokens, cancel)
            .await
    }
}

fn build_batch(code: &str, language_id: i32, test_cases: &[TestCase]) -> Vec<BatchItem> {
    test_cases
        .iter()
        .map(|case| BatchItem {
            source_code: code.to_string(),
            language_id,
            stdin: case.input.clone(),
            expected_output: case.expected_output.clone(),
        })
        .collect()
}

fn classify(results: &[ExecutionResult], test_cases: &[TestCase]) -> Vec<TestCaseOutcome> {
    results
        .iter()
        .zip(test_cases)
        .enumerate()
        .map(|(index, (result, case))| TestCaseOutcome {
            test_case: index + 1,
            passed: result.execution_status() == ExecutionStatus::Accepted,
            status: result.status.description.clone(),
            stdout: result.stdout.clone(),
            stderr: result.stderr.clone(),
            compile_output: result.compile_output.clone(),
            expected: case.expected_output.clone(),
            time: result.time.clone(),
            memory: result.memory,
        })
        .collect()
}
