use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Upstream fetch did not succeed. `status` carries the upstream HTTP
    /// code for non-2xx responses and is `None` for transport failures.
    #[error("Fetch failed: {message}")]
    Fetch {
        status: Option<u16>,
        message: String,
    },

    #[error("Internal server error")]
    Internal,
}

impl AppError {
    /// Map a reqwest failure to `Fetch`, preserving the upstream status code
    /// when one was received.
    pub fn from_fetch(e: reqwest::Error) -> Self {
        AppError::Fetch {
            status: e.status().map(|s| s.as_u16()),
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::InvalidUrl(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
            }
            AppError::Fetch { status, message } => (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": message, "upstream_status": status })),
            )
                .into_response(),
            AppError::Internal => {
                tracing::error!("Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::response::IntoResponse;
    use http_body_util::BodyExt;

    async fn body_json(body: Body) -> serde_json::Value {
        let bytes = body.collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn invalid_url_returns_400() {
        let response = AppError::InvalidUrl("not a url".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn validation_error_returns_400() {
        let response = AppError::Validation("invalid input".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn fetch_error_returns_502() {
        let response = AppError::Fetch {
            status: Some(404),
            message: "upstream returned 404".into(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn fetch_error_body_carries_upstream_status() {
        let response = AppError::Fetch {
            status: Some(404),
            message: "upstream returned 404".into(),
        }
        .into_response();
        let json = body_json(response.into_body()).await;
        assert_eq!(json["upstream_status"], 404);
        assert_eq!(json["error"], "upstream returned 404");
    }

    #[tokio::test]
    async fn transport_failure_has_null_status() {
        let response = AppError::Fetch {
            status: None,
            message: "connection refused".into(),
        }
        .into_response();
        let json = body_json(response.into_body()).await;
        assert!(json["upstream_status"].is_null());
    }

    #[tokio::test]
    async fn internal_error_returns_500() {
        let response = AppError::Internal.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn validation_error_body_has_error_key() {
        let response = AppError::Validation("invalid input".into()).into_response();
        let json = body_json(response.into_body()).await;
        assert_eq!(json["error"], "invalid input");
    }
}
