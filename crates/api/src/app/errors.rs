use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use lumina_infra::CatalogError;

pub fn catalog_error_to_response(err: CatalogError) -> axum::response::Response {
    match err {
        CatalogError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        CatalogError::InvalidReference(msg) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "invalid_reference", msg)
        }
        CatalogError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        CatalogError::MissingIdentity => json_error(
            StatusCode::UNAUTHORIZED,
            "missing_identity",
            "an acting identity is required",
        ),
        CatalogError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
        CatalogError::WriteFailed(msg) => {
            tracing::error!(error = %msg, "catalog write failed");
            json_error(StatusCode::SERVICE_UNAVAILABLE, "write_failed", msg)
        }
        CatalogError::ReadFailed(msg) => {
            tracing::error!(error = %msg, "catalog read failed");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "read_failed", msg)
        }
    }
}

/// Malformed request bodies are validation errors, whatever axum's default status.
pub fn json_rejection(rejection: JsonRejection) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "validation_error", rejection.body_text())
}

pub fn query_rejection(rejection: QueryRejection) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "validation_error", rejection.body_text())
}

pub fn invalid_id(what: &str) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "invalid_id", format!("invalid {what} id"))
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
