use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Extension, Path, Query,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use catalogd_auth::Permission;
use catalogd_products::{ProductDraft, ProductId};

use crate::app::errors;
use crate::app::services::ProductService;
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/available", get(available_products))
        .route("/search", get(search_products))
        .route("/price-less-than", get(price_less_than))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    name: String,
}

#[derive(Debug, Deserialize)]
struct PriceParams {
    price: f64,
}

/// Path ids must be positive numbers; anything else is a client error
/// before the service layer runs.
fn parse_id(id: Result<Path<i64>, PathRejection>) -> Result<ProductId, axum::response::Response> {
    let Path(raw) = id.map_err(|_| invalid_id_response())?;
    if raw <= 0 {
        return Err(invalid_id_response());
    }
    Ok(ProductId::new(raw))
}

fn invalid_id_response() -> axum::response::Response {
    errors::json_error(
        StatusCode::BAD_REQUEST,
        "invalid_id",
        "id must be a positive number",
    )
}

fn parse_draft(
    body: Result<Json<ProductDraft>, JsonRejection>,
) -> Result<ProductDraft, axum::response::Response> {
    let Json(draft) = body.map_err(|rej| {
        errors::json_error(StatusCode::BAD_REQUEST, "invalid_body", rej.body_text())
    })?;
    draft
        .validate()
        .map_err(errors::validation_error_to_response)?;
    Ok(draft)
}

/// Capability check for mutating endpoints, before anything else runs.
fn require_write(
    principal: &Option<Extension<PrincipalContext>>,
    permission: &'static str,
) -> Result<(), axum::response::Response> {
    let ctx = principal.as_ref().map(|Extension(p)| p);
    crate::authz::require_permission(ctx, &Permission::new(permission))
        .map_err(|e| errors::json_error(StatusCode::FORBIDDEN, "forbidden", e.to_string()))
}

pub async fn list_products(
    Extension(service): Extension<Arc<ProductService>>,
) -> axum::response::Response {
    match service.all_products().await {
        Ok(products) => (StatusCode::OK, Json(products)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_product(
    Extension(service): Extension<Arc<ProductService>>,
    id: Result<Path<i64>, PathRejection>,
) -> axum::response::Response {
    let id = match parse_id(id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match service.product_by_id(id).await {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn create_product(
    Extension(service): Extension<Arc<ProductService>>,
    principal: Option<Extension<PrincipalContext>>,
    body: Result<Json<ProductDraft>, JsonRejection>,
) -> axum::response::Response {
    if let Err(resp) = require_write(&principal, "products.create") {
        return resp;
    }
    let draft = match parse_draft(body) {
        Ok(d) => d,
        Err(resp) => return resp,
    };

    match service.create_product(draft).await {
        Ok(product) => (StatusCode::CREATED, Json(product)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn update_product(
    Extension(service): Extension<Arc<ProductService>>,
    principal: Option<Extension<PrincipalContext>>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<ProductDraft>, JsonRejection>,
) -> axum::response::Response {
    if let Err(resp) = require_write(&principal, "products.update") {
        return resp;
    }
    let id = match parse_id(id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let draft = match parse_draft(body) {
        Ok(d) => d,
        Err(resp) => return resp,
    };

    match service.update_product(id, draft).await {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn delete_product(
    Extension(service): Extension<Arc<ProductService>>,
    principal: Option<Extension<PrincipalContext>>,
    id: Result<Path<i64>, PathRejection>,
) -> axum::response::Response {
    if let Err(resp) = require_write(&principal, "products.delete") {
        return resp;
    }
    let id = match parse_id(id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match service.delete_product(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn available_products(
    Extension(service): Extension<Arc<ProductService>>,
) -> axum::response::Response {
    match service.available_products().await {
        Ok(products) => (StatusCode::OK, Json(products)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn search_products(
    Extension(service): Extension<Arc<ProductService>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> axum::response::Response {
    let Query(params) = match params {
        Ok(p) => p,
        Err(_) => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "invalid_query",
                "query parameter 'name' is required",
            )
        }
    };

    match service.search_products(&params.name).await {
        Ok(products) => (StatusCode::OK, Json(products)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn price_less_than(
    Extension(service): Extension<Arc<ProductService>>,
    params: Result<Query<PriceParams>, QueryRejection>,
) -> axum::response::Response {
    let Query(params) = match params {
        Ok(p) => p,
        Err(_) => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "invalid_query",
                "query parameter 'price' is required and must be a number",
            )
        }
    };

    // Positive means strictly greater than zero; NaN fails this check too.
    if !(params.price > 0.0) {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "invalid_query",
            "price must be a positive number",
        );
    }

    match service.products_cheaper_than(params.price).await {
        Ok(products) => (StatusCode::OK, Json(products)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
