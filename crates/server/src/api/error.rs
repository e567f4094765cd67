use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use codeforge_api_types::ErrorResponse;
use judge_orchestrator::EvaluationError;

/// API error type; every failure leaves the boundary as a structured
/// `{success: false, error}` body with a matching HTTP status.
#[derive(Debug)]
pub struct ApiError {
    message: String,
    status: StatusCode,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: StatusCode::BAD_REQUEST,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: StatusCode::NOT_FOUND,
        }
    }

    pub fn unauthenticated() -> Self {
        Self {
            message: "authentication required".to_string(),
            status: StatusCode::UNAUTHORIZED,
        }
    }
}

impl From<EvaluationError> for ApiError {
    fn from(err: EvaluationError) -> Self {
        // Validation failures are the caller's to fix; everything else is
        // a pipeline fault.
        let status = if err.is_validation() {
            match &err {
                EvaluationError::Unauthenticated => StatusCode::UNAUTHORIZED,
                EvaluationError::UserNotFound(_) | EvaluationError::ProblemNotFound(_) => {
                    StatusCode::NOT_FOUND
                }
                _ => StatusCode::BAD_REQUEST,
            }
        } else {
            match &err {
                EvaluationError::RemoteService(_) | EvaluationError::MalformedResponse(_) => {
                    StatusCode::BAD_GATEWAY
                }
                EvaluationError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
                EvaluationError::Cancelled => StatusCode::REQUEST_TIMEOUT,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            }
        };

        Self {
            message: err.to_string(),
            status,
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self {
            message: err.to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse::new(self.message));
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use codeforge_core::domain::{Language, ProblemId};
    use judge_orchestrator::EvaluationError;

    use super::ApiError;

    #[test]
    fn validation_failures_map_to_client_statuses() {
        let cases = [
            (EvaluationError::Unauthenticated, StatusCode::UNAUTHORIZED),
            (
                EvaluationError::UserNotFound("ext-1".to_string()),
                StatusCode::NOT_FOUND,
            ),
            (
                EvaluationError::ProblemNotFound(ProblemId::new()),
                StatusCode::NOT_FOUND,
            ),
            (
                EvaluationError::UnsupportedLanguage("COBOL".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (EvaluationError::NoTestCases, StatusCode::BAD_REQUEST),
            (
                EvaluationError::ReferenceSolutionMismatch {
                    language: Language::Python,
                    case: 1,
                    expected: "5".to_string(),
                    actual: "6".to_string(),
                },
                StatusCode::BAD_REQUEST,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status, expected);
        }
    }

    #[test]
    fn pipeline_faults_map_to_server_statuses() {
        let cases = [
            (
                EvaluationError::RemoteService("connection refused".to_string()),
                StatusCode::BAD_GATEWAY,
            ),
            (
                EvaluationError::MalformedResponse("short batch".to_string()),
                StatusCode::BAD_GATEWAY,
            ),
            (
                EvaluationError::Timeout { rounds: 120 },
                StatusCode::GATEWAY_TIMEOUT,
            ),
            (EvaluationError::Cancelled, StatusCode::REQUEST_TIMEOUT),
            (
                EvaluationError::Persistence(anyhow::anyhow!("lost connection")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status, expected);
        }
    }
}
