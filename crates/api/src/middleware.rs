use std::time::Instant;

use axum::{
    http::{HeaderMap, Request, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::info;

use lumina_core::UserId;

use crate::app::errors;
use crate::context::IdentityContext;

/// Header carrying the acting user's id. No authentication is performed on it.
pub const USER_ID_HEADER: &str = "x-user-id";

pub async fn identity_middleware(
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, Response> {
    let user_id = extract_user_id(req.headers()).map_err(|msg| {
        errors::json_error(StatusCode::BAD_REQUEST, "invalid_identity", msg)
    })?;

    req.extensions_mut().insert(IdentityContext::new(user_id));

    Ok(next.run(req).await)
}

/// One log line per request.
pub async fn request_logging(req: Request<axum::body::Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(req).await;

    info!(
        %method,
        %path,
        status = response.status().as_u16(),
        latency_ms = started.elapsed().as_millis() as u64,
        "request completed"
    );
    response
}

fn extract_user_id(headers: &HeaderMap) -> Result<Option<UserId>, String> {
    let Some(header) = headers.get(USER_ID_HEADER) else {
        return Ok(None);
    };

    let value = header
        .to_str()
        .map_err(|_| format!("{USER_ID_HEADER} is not valid ASCII"))?
        .trim();
    if value.is_empty() {
        return Ok(None);
    }

    value
        .parse::<UserId>()
        .map(Some)
        .map_err(|e| e.to_string())
}
