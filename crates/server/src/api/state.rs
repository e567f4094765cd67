//! Unified application state shared across handlers.

use std::sync::Arc;

use judge_orchestrator::{
    EvaluationOrchestrator, ExecutionServiceConfig, GradingStore, HttpExecutionClient,
    ProblemCatalog, UserDirectory, ViewCache,
};
use sea_orm::DatabaseConnection;

use crate::cache::ProblemViewCache;
use crate::repository::{SeaOrmGradingStore, SeaOrmProblemRepository, SeaOrmUserRepository};

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<EvaluationOrchestrator>,
    pub users: Arc<SeaOrmUserRepository>,
    pub problems: Arc<SeaOrmProblemRepository>,
    pub grading: Arc<SeaOrmGradingStore>,
    pub cache: Arc<ProblemViewCache>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: &ExecutionServiceConfig) -> Self {
        let users = Arc::new(SeaOrmUserRepository::new(db.clone()));
        let problems = Arc::new(SeaOrmProblemRepository::new(db.clone()));
        let grading = Arc::new(SeaOrmGradingStore::new(db));
        let cache = Arc::new(ProblemViewCache::new());

        let client = Arc::new(HttpExecutionClient::new(config.base_url.clone()));
        let orchestrator = Arc::new(EvaluationOrchestrator::new(
            config,
            client,
            grading.clone() as Arc<dyn GradingStore>,
            users.clone() as Arc<dyn UserDirectory>,
            problems.clone() as Arc<dyn ProblemCatalog>,
            cache.clone() as Arc<dyn ViewCache>,
        ));

        Self {
            orchestrator,
            users,
            problems,
            grading,
            cache,
        }
    }
}
