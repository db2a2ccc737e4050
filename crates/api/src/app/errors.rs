use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use catalogd_core::DomainError;

use crate::app::services::ServiceError;

pub fn service_error_to_response(err: ServiceError) -> axum::response::Response {
    match err {
        ServiceError::NotFound(id) => json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("product not found with id: {id}"),
        ),
        ServiceError::Store(e) => {
            // Full detail stays in the logs; callers get a generic message.
            tracing::error!("storage failure: {e:?}");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "storage_error",
                "storage failure",
            )
        }
    }
}

pub fn validation_error_to_response(err: DomainError) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "validation_error", err.to_string())
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
