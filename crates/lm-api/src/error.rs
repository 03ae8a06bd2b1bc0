//! Maps domain errors onto HTTP responses.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use lm_core::AppError;
use serde_json::json;

/// Error returned by every JSON handler. Body: `{ "ok": false, "error": CODE }`.
#[derive(Debug)]
pub enum ApiError {
    App(AppError),
    InvalidBody(JsonRejection),
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError::App(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection)
    }
}

/// Status and stable error code for a domain error.
pub fn status_and_code(err: &AppError) -> (StatusCode, &'static str) {
    match err {
        AppError::RequiredFieldsMissing => (StatusCode::BAD_REQUEST, "REQUIRED_FIELDS"),
        AppError::MissingCredential => (StatusCode::BAD_REQUEST, "DELETE_TOKEN_REQUIRED"),
        AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        AppError::InvalidCredential => (StatusCode::FORBIDDEN, "INVALID_DELETE_TOKEN"),
        AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL"),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::App(err) => {
                if let AppError::Internal(detail) = err {
                    tracing::error!(%detail, "request failed");
                }
                status_and_code(err)
            }
            ApiError::InvalidBody(rejection) => {
                tracing::debug!(%rejection, "unreadable request body");
                (StatusCode::BAD_REQUEST, "INVALID_BODY")
            }
        };
        (status, Json(json!({ "ok": false, "error": code }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_outcome_has_a_distinct_code() {
        let cases = [
            AppError::RequiredFieldsMissing,
            AppError::MissingCredential,
            AppError::NotFound("x".into()),
            AppError::InvalidCredential,
            AppError::Internal("boom".into()),
        ];
        let codes: std::collections::HashSet<_> = cases.iter().map(|e| status_and_code(e).1).collect();
        assert_eq!(codes.len(), cases.len());

        assert_eq!(status_and_code(&AppError::InvalidCredential).0, StatusCode::FORBIDDEN);
        assert_eq!(status_and_code(&AppError::NotFound("x".into())).0, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn internal_detail_is_not_returned() {
        let resp = ApiError::from(AppError::Internal("db password wrong".into())).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let text = std::str::from_utf8(&bytes).unwrap();
        assert!(!text.contains("db password wrong"));
        let body: serde_json::Value = serde_json::from_str(text).unwrap();
        assert_eq!(body, json!({ "ok": false, "error": "INTERNAL" }));
    }
}
