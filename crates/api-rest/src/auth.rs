//! API token middleware.

use crate::error::ApiError;
use api_shared::auth::{token_from_header, validate_api_token};
use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

/// The token every protected request must present; `None` leaves the API open.
pub type ExpectedToken = Option<Arc<str>>;

pub async fn require_token(
    State(expected): State<ExpectedToken>,
    req: Request,
    next: Next,
) -> Response {
    let Some(expected) = expected else {
        return next.run(req).await;
    };

    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    let checked = token_from_header(header).and_then(|t| validate_api_token(t, &expected));

    match checked {
        Ok(()) => next.run(req).await,
        Err(err) => {
            tracing::warn!(path = %req.uri().path(), "rejected request: {err}");
            ApiError::Unauthorized.into_response()
        }
    }
}
