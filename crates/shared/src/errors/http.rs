use crate::errors::{error::ErrorResponse, repository::RepositoryError, service::ServiceError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

#[derive(Debug)]
pub enum HttpError {
    BadRequest(String),
    InsufficientStock { product_id: i32, message: String },
    Unauthorized(String),
    NotFound(String),
    Conflict(String),
    ServiceUnavailable(String),
    Internal(String),
}

impl From<ServiceError> for HttpError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(errors) => {
                HttpError::BadRequest(format!("Validation failed: {}", errors.join("; ")))
            }

            ServiceError::InvalidDate(_)
            | ServiceError::InvalidRange { .. }
            | ServiceError::RangeTooLarge { .. } => HttpError::BadRequest(err.to_string()),

            ServiceError::InsufficientStock { product_id, .. } => HttpError::InsufficientStock {
                product_id,
                message: err.to_string(),
            },

            ServiceError::NotFound(msg) => HttpError::NotFound(msg),

            ServiceError::InvalidTransition(msg) => HttpError::Conflict(msg),

            ServiceError::Conflict(_) | ServiceError::Timeout(_) => {
                HttpError::ServiceUnavailable(err.to_string())
            }

            ServiceError::Repo(repo_err) => match repo_err {
                RepositoryError::NotFound => HttpError::NotFound("Not found".into()),
                RepositoryError::Conflict(msg) => HttpError::ServiceUnavailable(msg),
                RepositoryError::InsufficientStock { product_id, .. } => {
                    HttpError::InsufficientStock {
                        product_id,
                        message: repo_err.to_string(),
                    }
                }
                RepositoryError::InvalidTransition { .. } => {
                    HttpError::Conflict(repo_err.to_string())
                }
                other => {
                    error!("❌ Storage failure: {other}");
                    HttpError::Internal("Repository error".into())
                }
            },

            ServiceError::Kafka(msg) => {
                HttpError::ServiceUnavailable(format!("Kafka error: {msg}"))
            }

            ServiceError::Internal(msg) => HttpError::Internal(msg),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, msg, product_id) = match self {
            HttpError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            HttpError::InsufficientStock {
                product_id,
                message,
            } => (StatusCode::BAD_REQUEST, message, Some(product_id)),
            HttpError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, None),
            HttpError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            HttpError::Conflict(msg) => (StatusCode::CONFLICT, msg, None),
            HttpError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg, None),
            HttpError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg, None),
        };

        let body = Json(ErrorResponse {
            status: "error".into(),
            message: msg,
            product_id,
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn insufficient_stock_is_a_bad_request_naming_the_product() {
        let err = ServiceError::InsufficientStock {
            product_id: 7,
            requested: 80,
            available: 70,
        };

        let response = HttpError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["productId"], 7);
        assert_eq!(body["status"], "error");
    }

    #[test]
    fn storage_failures_surface_as_internal_errors() {
        let err = ServiceError::Repo(RepositoryError::Sqlx(sqlx::Error::PoolTimedOut));
        let response = HttpError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn conflicts_and_timeouts_are_transient() {
        let conflict = HttpError::from(ServiceError::Conflict("lost race".into())).into_response();
        assert_eq!(conflict.status(), StatusCode::SERVICE_UNAVAILABLE);

        let timeout = HttpError::from(ServiceError::Timeout(10)).into_response();
        assert_eq!(timeout.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn invalid_transition_is_a_conflict() {
        let err = ServiceError::Repo(RepositoryError::InvalidTransition {
            from: "cancelled".into(),
            to: "confirmed".into(),
        });
        assert_eq!(
            HttpError::from(err).into_response().status(),
            StatusCode::CONFLICT
        );
    }
}
