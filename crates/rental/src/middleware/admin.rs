use axum::{
    Extension, Json,
    body::Body,
    http::{Request, StatusCode},
    middleware::Next,
    response::IntoResponse,
};
use shared::errors::ErrorResponse;
use std::sync::Arc;
use tracing::warn;

pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Shared secret for the back-office routes. `None` disables the check.
#[derive(Clone, Debug, Default)]
pub struct AdminGuard {
    token: Option<Arc<str>>,
}

impl AdminGuard {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.map(Arc::from),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.token.is_some()
    }

    fn permits(&self, presented: Option<&str>) -> bool {
        match &self.token {
            None => true,
            Some(expected) => presented == Some(expected.as_ref()),
        }
    }
}

pub async fn admin_middleware(
    Extension(guard): Extension<AdminGuard>,
    req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let presented = req
        .headers()
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok());

    if !guard.permits(presented) {
        warn!("🔒 Rejected admin request to {}", req.uri().path());
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::fail("Admin token missing or invalid")),
        ));
    }

    Ok(next.run(req).await)
}
