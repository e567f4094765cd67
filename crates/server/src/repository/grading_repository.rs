use std::str::FromStr;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::Utc;
use codeforge_core::domain::{Language, ProblemId, SubmissionId, SubmissionStatus, UserId};
use judge_orchestrator::{GradingStore, NewSubmission, NewTestCaseResult, SubmissionRecord};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};

use crate::entity::{problem_solved, submission, test_case_result};

#[derive(Clone)]
pub struct SeaOrmGradingStore {
    db: DatabaseConnection,
}

impl SeaOrmGradingStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn map_language(code: i16) -> Result<Language> {
        match code {
            0 => Ok(Language::Cpp),
            1 => Ok(Language::Java),
            2 => Ok(Language::Python),
            3 => Ok(Language::JavaScript),
            _ => Err(anyhow!("invalid submission.language code from database: {code}")),
        }
    }

    fn map_language_code(language: Language) -> i16 {
        match language {
            Language::Cpp => 0,
            Language::Java => 1,
            Language::Python => 2,
            Language::JavaScript => 3,
        }
    }

    fn map_status(code: i16) -> Result<SubmissionStatus> {
        match code {
            0 => Ok(SubmissionStatus::Accepted),
            1 => Ok(SubmissionStatus::WrongAnswer),
            _ => Err(anyhow!("invalid submission.status code from database: {code}")),
        }
    }

    fn map_status_code(status: SubmissionStatus) -> i16 {
        match status {
            SubmissionStatus::Accepted => 0,
            SubmissionStatus::WrongAnswer => 1,
        }
    }

    fn map_model(model: submission::Model) -> Result<SubmissionRecord> {
        let id = SubmissionId::from_str(&model.id)
            .map_err(|e| anyhow!("invalid submission.id '{}' from database: {e}", model.id))?;
        let user_id = UserId::from_str(&model.user_id).map_err(|e| {
            anyhow!("invalid submission.user_id '{}' from database: {e}", model.user_id)
        })?;
        let problem_id = ProblemId::from_str(&model.problem_id).map_err(|e| {
            anyhow!("invalid submission.problem_id '{}' from database: {e}", model.problem_id)
        })?;

        Ok(SubmissionRecord {
            id,
            user_id,
            problem_id,
            language: Self::map_language(model.language)?,
            status: Self::map_status(model.status)?,
            source_code: model.source_code,
            created_at: model.created_at,
        })
    }

    /// Problems the user has at least one accepted submission for.
    pub async fn solved_problems_for_user(&self, user_id: UserId) -> Result<Vec<ProblemId>> {
        let rows = problem_solved::Entity::find()
            .filter(problem_solved::Column::UserId.eq(user_id.to_string()))
            .all(&self.db)
            .await?;

        rows.into_iter()
            .map(|row| {
                ProblemId::from_str(&row.problem_id).map_err(|e| {
                    anyhow!(
                        "invalid problem_solved.problem_id '{}' from database: {e}",
                        row.problem_id
                    )
                })
            })
            .collect()
    }
}

#[async_trait]
impl GradingStore for SeaOrmGradingStore {
    async fn create_submission_with_results(
        &self,
        new_submission: NewSubmission,
        results: Vec<NewTestCaseResult>,
    ) -> Result<SubmissionRecord> {
        let id = SubmissionId::new();
        let now = Utc::now().naive_utc();

        // Submission and its results land in one transaction; a partial
        // grading record must never become visible.
        let txn = self.db.begin().await?;

        let submission_model = submission::ActiveModel {
            id: Set(id.to_string()),
            user_id: Set(new_submission.user_id.to_string()),
            problem_id: Set(new_submission.problem_id.to_string()),
            source_code: Set(new_submission.source_code),
            language: Set(Self::map_language_code(new_submission.language)),
            status: Set(Self::map_status_code(new_submission.status)),
            created_at: Set(now),
        }
        .insert(&txn)
        .await?;

        for result in results {
            test_case_result::ActiveModel {
                id: Set(uuid::Uuid::new_v4().to_string()),
                submission_id: Set(id.to_string()),
                test_case: Set(result.test_case),
                passed: Set(result.passed),
                stdout: Set(result.stdout),
                stderr: Set(result.stderr),
                compile_output: Set(result.compile_output),
                expected: Set(result.expected),
                status: Set(result.status),
                created_at: Set(now),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;

        Self::map_model(submission_model)
    }

    async fn upsert_problem_solved(&self, user_id: UserId, problem_id: ProblemId) -> Result<()> {
        let active_model = problem_solved::ActiveModel {
            user_id: Set(user_id.to_string()),
            problem_id: Set(problem_id.to_string()),
            created_at: Set(Utc::now().naive_utc()),
        };

        // Conflict-safe: concurrent accepted submissions for the same pair
        // both succeed, leaving exactly one row.
        problem_solved::Entity::insert(active_model)
            .on_conflict(
                OnConflict::columns([
                    problem_solved::Column::UserId,
                    problem_solved::Column::ProblemId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .do_nothing()
            .exec(&self.db)
            .await?;

        Ok(())
    }

    async fn submissions_for_user_and_problem(
        &self,
        user_id: UserId,
        problem_id: ProblemId,
    ) -> Result<Vec<SubmissionRecord>> {
        let models = submission::Entity::find()
            .filter(submission::Column::UserId.eq(user_id.to_string()))
            .filter(submission::Column::ProblemId.eq(problem_id.to_string()))
            .order_by_desc(submission::Column::CreatedAt)
            .all(&self.db)
            .await?;

        models.into_iter().map(Self::map_model).collect()
    }
}
