use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::context::PrincipalContext;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn whoami(principal: Option<Extension<PrincipalContext>>) -> impl IntoResponse {
    match principal {
        Some(Extension(p)) => Json(serde_json::json!({
            "principal_id": p.principal_id().to_string(),
            "roles": p.roles().iter().map(|r| r.as_str()).collect::<Vec<_>>(),
        })),
        None => Json(serde_json::json!({
            "principal_id": null,
            "roles": [],
        })),
    }
}
