//! API error types with structured JSON responses.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::db::DatabaseError;
use crate::diagnosis::DiagnosisError;
use crate::hospitals::HospitalSearchError;

/// Structured error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing or malformed client input.
    #[error("Invalid request: {0}")]
    Validation(String),
    #[error("Request body too large")]
    PayloadTooLarge,
    /// An external credential is missing; the operator must fix it.
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// The AI answered, but not with the JSON shape that was asked for.
    #[error("Upstream format error: {0}")]
    UpstreamFormat(String),
    /// An external service failed or returned an unexpected status.
    #[error("Upstream error: {0}")]
    Upstream(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::Validation(detail) => {
                (StatusCode::BAD_REQUEST, "VALIDATION", detail.clone())
            }
            ApiError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                self.to_string(),
            ),
            ApiError::Configuration(detail) => {
                tracing::error!(detail, "API configuration error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CONFIGURATION",
                    "A required external service is not configured".to_string(),
                )
            }
            ApiError::UpstreamFormat(detail) => {
                tracing::error!(detail, "API upstream format error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "UPSTREAM_FORMAT",
                    "Failed to process AI diagnosis properly".to_string(),
                )
            }
            ApiError::Upstream(detail) => {
                tracing::error!(detail, "API upstream error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "UPSTREAM",
                    "An external service request failed".to_string(),
                )
            }
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail { code, message },
        };
        (status, Json(body)).into_response()
    }
}

/// Body extraction failures (missing content type, bad JSON, wrong field
/// types) are client errors in the same envelope as everything else.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge
        } else {
            ApiError::Validation(rejection.body_text())
        }
    }
}

impl From<DiagnosisError> for ApiError {
    fn from(err: DiagnosisError) -> Self {
        match err {
            DiagnosisError::MissingSymptoms | DiagnosisError::InvalidAttachment(_) => {
                ApiError::Validation(err.to_string())
            }
            DiagnosisError::NotConfigured => ApiError::Configuration(err.to_string()),
            DiagnosisError::Upstream(_) => ApiError::Upstream(err.to_string()),
            DiagnosisError::MalformedResponse(_) | DiagnosisError::UnexpectedShape(_) => {
                ApiError::UpstreamFormat(err.to_string())
            }
        }
    }
}

impl From<HospitalSearchError> for ApiError {
    fn from(err: HospitalSearchError) -> Self {
        match err {
            HospitalSearchError::MissingCoordinates
            | HospitalSearchError::InvalidCoordinates(_) => ApiError::Validation(err.to_string()),
            HospitalSearchError::NotConfigured => ApiError::Configuration(err.to_string()),
            HospitalSearchError::UpstreamStatus { .. } | HospitalSearchError::Upstream(_) => {
                ApiError::Upstream(err.to_string())
            }
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let body = to_bytes(response.into_body(), 4096).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn validation_returns_400_with_detail() {
        let response = ApiError::Validation("Symptoms are required".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "VALIDATION");
        assert_eq!(json["error"]["message"], "Symptoms are required");
    }

    #[tokio::test]
    async fn payload_too_large_returns_413() {
        let response = ApiError::PayloadTooLarge.into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "PAYLOAD_TOO_LARGE");
    }

    #[tokio::test]
    async fn configuration_returns_500_without_detail() {
        let response = ApiError::Configuration("GEMINI_API_KEY missing".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "CONFIGURATION");
        assert!(!json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("GEMINI"));
    }

    #[tokio::test]
    async fn upstream_format_returns_500() {
        let response = ApiError::UpstreamFormat("not json".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "UPSTREAM_FORMAT");
    }

    #[tokio::test]
    async fn internal_hides_details() {
        let response = ApiError::Internal("disk I/O error".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["error"]["message"], "An internal error occurred");
    }

    #[test]
    fn diagnosis_errors_map_to_taxonomy() {
        assert!(matches!(
            ApiError::from(DiagnosisError::MissingSymptoms),
            ApiError::Validation(_)
        ));
        assert!(matches!(
            ApiError::from(DiagnosisError::NotConfigured),
            ApiError::Configuration(_)
        ));
        assert!(matches!(
            ApiError::from(DiagnosisError::MalformedResponse("x".into())),
            ApiError::UpstreamFormat(_)
        ));
        assert!(matches!(
            ApiError::from(DiagnosisError::UnexpectedShape("x".into())),
            ApiError::UpstreamFormat(_)
        ));
    }

    #[test]
    fn hospital_errors_map_to_taxonomy() {
        assert!(matches!(
            ApiError::from(HospitalSearchError::MissingCoordinates),
            ApiError::Validation(_)
        ));
        assert!(matches!(
            ApiError::from(HospitalSearchError::NotConfigured),
            ApiError::Configuration(_)
        ));
        assert!(matches!(
            ApiError::from(HospitalSearchError::UpstreamStatus {
                status: "OVER_QUERY_LIMIT".into(),
                message: String::new(),
            }),
            ApiError::Upstream(_)
        ));
    }
}
