use codeforge_core::domain::{Language, ProblemId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("authentication required")]
    Unauthenticated,

    #[error("user not found: {0}")]
    UserNotFound(String),

    #[error("problem not found: {0}")]
    ProblemNotFound(ProblemId),

    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("at least one test case is required")]
    NoTestCases,

    #[error("execution service error: {0}")]
    RemoteService(String),

    #[error("execution service returned a malformed batch: {0}")]
    MalformedResponse(String),

    #[error("execution did not reach a terminal state within {rounds} polling rounds")]
    Timeout { rounds: u32 },

    #[error("evaluation was cancelled")]
    Cancelled,

    #[error(
        "reference solution failed for language {language} on test case {case}: {status}"
    )]
    ReferenceSolutionFailed {
        language: Language,
        case: usize,
        status: String,
    },

    #[error(
        "reference solution produced wrong output for language {language} on test case \
         {case}: expected \"{expected}\", got \"{actual}\""
    )]
    ReferenceSolutionMismatch {
        language: Language,
        case: usize,
        expected: String,
        actual: String,
    },

    #[error("persistence error: {0}")]
    Persistence(#[source] anyhow::Error),
}

impl From<reqwest::Error> for EvaluationError {
    fn from(err: reqwest::Error) -> Self {
        Self::RemoteService(err.to_string())
    }
}

impl EvaluationError {
    /// True for failures the caller can correct: bad input, an unknown
    /// user or problem, or a reference solution rejected by its own test
    /// cases. Service faults and persistence errors are excluded.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Unauthenticated
                | Self::UserNotFound(_)
                | Self::ProblemNotFound(_)
                | Self::UnsupportedLanguage(_)
                | Self::NoTestCases
                | Self::ReferenceSolutionFailed { .. }
                | Self::ReferenceSolutionMismatch { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, EvaluationError>;
