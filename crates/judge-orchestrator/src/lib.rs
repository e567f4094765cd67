pub mod client;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod poller;
pub mod registry;
pub mod status;
pub mod store;

pub use client::{
    BatchItem, ExecutionClient, ExecutionResult, HttpExecutionClient, StatusPayload,
    SubmissionToken,
};
pub use config::{EvaluationConfig, ExecutionServiceConfig};
pub use error::{EvaluationError, Result};
pub use orchestrator::{
    EvaluationOrchestrator, RunRequest, SubmitOutcome, SubmitRequest, TestCaseOutcome,
};
pub use poller::BatchPoller;
pub use status::ExecutionStatus;
pub use store::{
    CatalogProblem, GradingStore, NewSubmission, NewTestCaseResult, ProblemCatalog,
    SubmissionRecord, UserDirectory, UserRecord, ViewCache,
};
