use std::collections::BTreeMap;
use std::str::FromStr;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use codeforge_core::domain::{Difficulty, Example, ProblemId, TestCase, UserId};
use judge_orchestrator::{CatalogProblem, ProblemCatalog};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait, ModelTrait, QueryOrder,
};

use crate::entity::problem;

#[derive(Debug, Clone)]
pub struct ProblemRecord {
    pub id: ProblemId,
    pub user_id: UserId,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub tags: Vec<String>,
    pub examples: Vec<Example>,
    pub constraints: String,
    pub code_snippets: BTreeMap<String, String>,
    pub reference_solutions: BTreeMap<String, String>,
    pub test_cases: Vec<TestCase>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct NewProblem {
    pub user_id: UserId,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub tags: Vec<String>,
    pub examples: Vec<Example>,
    pub constraints: String,
    pub code_snippets: BTreeMap<String, String>,
    pub reference_solutions: BTreeMap<String, String>,
    pub test_cases: Vec<TestCase>,
}

#[async_trait]
pub trait ProblemRepository: Send + Sync {
    async fn create(&self, new_problem: NewProblem) -> Result<ProblemRecord>;
    async fn find_by_id(&self, problem_id: ProblemId) -> Result<Option<ProblemRecord>>;
    /// All problems, newest first.
    async fn list(&self) -> Result<Vec<ProblemRecord>>;
    /// Returns false when the problem did not exist.
    async fn delete(&self, problem_id: ProblemId) -> Result<bool>;
}

#[derive(Clone)]
pub struct SeaOrmProblemRepository {
    db: DatabaseConnection,
}

impl SeaOrmProblemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn map_difficulty(code: i16) -> Result<Difficulty> {
        match code {
            0 => Ok(Difficulty::Easy),
            1 => Ok(Difficulty::Medium),
            2 => Ok(Difficulty::Hard),
            _ => Err(anyhow!("invalid problem.difficulty code from database: {code}")),
        }
    }

    fn map_difficulty_code(difficulty: Difficulty) -> i16 {
        match difficulty {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
        }
    }

    fn map_model(model: problem::Model) -> Result<ProblemRecord> {
        let id = ProblemId::from_str(&model.id)
            .map_err(|e| anyhow!("invalid problem.id '{}' from database: {e}", model.id))?;
        let user_id = UserId::from_str(&model.user_id)
            .map_err(|e| anyhow!("invalid problem.user_id '{}' from database: {e}", model.user_id))?;

        Ok(ProblemRecord {
            id,
            user_id,
            title: model.title,
            description: model.description,
            difficulty: Self::map_difficulty(model.difficulty)?,
            tags: serde_json::from_value(model.tags)
                .map_err(|e| anyhow!("invalid problem.tags from database: {e}"))?,
            examples: serde_json::from_value(model.examples)
                .map_err(|e| anyhow!("invalid problem.examples from database: {e}"))?,
            constraints: model.constraints,
            code_snippets: serde_json::from_value(model.code_snippets)
                .map_err(|e| anyhow!("invalid problem.code_snippets from database: {e}"))?,
            reference_solutions: serde_json::from_value(model.reference_solutions)
                .map_err(|e| anyhow!("invalid problem.reference_solutions from database: {e}"))?,
            test_cases: serde_json::from_value(model.test_cases)
                .map_err(|e| anyhow!("invalid problem.test_cases from database: {e}"))?,
            created_at: model.created_at,
        })
    }
}

#[async_trait]
impl ProblemRepository for SeaOrmProblemRepository {
    async fn create(&self, new_problem: NewProblem) -> Result<ProblemRecord> {
        let id = ProblemId::new();
        let now = Utc::now().naive_utc();

        let active_model = problem::ActiveModel {
            id: Set(id.to_string()),
            user_id: Set(new_problem.user_id.to_string()),
            title: Set(new_problem.title),
            description: Set(new_problem.description),
            difficulty: Set(Self::map_difficulty_code(new_problem.difficulty)),
            tags: Set(serde_json::to_value(&new_problem.tags)?),
            examples: Set(serde_json::to_value(&new_problem.examples)?),
            constraints: Set(new_problem.constraints),
            code_snippets: Set(serde_json::to_value(&new_problem.code_snippets)?),
            reference_solutions: Set(serde_json::to_value(&new_problem.reference_solutions)?),
            test_cases: Set(serde_json::to_value(&new_problem.test_cases)?),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await?;
        Self::map_model(model)
    }

    async fn find_by_id(&self, problem_id: ProblemId) -> Result<Option<ProblemRecord>> {
        let model = problem::Entity::find_by_id(problem_id.to_string())
            .one(&self.db)
            .await?;

        model.map(Self::map_model).transpose()
    }

    async fn list(&self) -> Result<Vec<ProblemRecord>> {
        let models = problem::Entity::find()
            .order_by_desc(problem::Column::CreatedAt)
            .all(&self.db)
            .await?;

        models.into_iter().map(Self::map_model).collect()
    }

    async fn delete(&self, problem_id: ProblemId) -> Result<bool> {
        let Some(model) = problem::Entity::find_by_id(problem_id.to_string())
            .one(&self.db)
            .await?
        else {
            return Ok(false);
        };

        model.delete(&self.db).await?;
        Ok(true)
    }
}

#[async_trait]
impl ProblemCatalog for SeaOrmProblemRepository {
    async fn find_by_id(&self, problem_id: ProblemId) -> Result<Option<CatalogProblem>> {
        let record = ProblemRepository::find_by_id(self, problem_id).await?;

        Ok(record.map(|record| CatalogProblem {
            id: record.id,
            title: record.title,
            test_cases: record.test_cases,
        }))
    }
}
