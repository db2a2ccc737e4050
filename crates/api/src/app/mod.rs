//! Application wiring: backend selection, service construction, routing.

pub mod errors;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{extract::Extension, routing::get, Router};
use tower::ServiceBuilder;

use catalogd_auth::{Hs256JwtValidator, JwtValidator};
use catalogd_infra::{InMemoryProductStore, ProductStore};

use crate::middleware::AuthState;
use services::ProductService;

pub async fn build_app(jwt_secret: String) -> Router {
    let jwt: Arc<dyn JwtValidator> = Arc::new(Hs256JwtValidator::new(jwt_secret.into_bytes()));
    let auth_state = AuthState { jwt };

    let store = build_store().await;
    let service = Arc::new(ProductService::new(store));

    Router::new()
        .route("/health", get(routes::system::health))
        .route("/whoami", get(routes::system::whoami))
        .nest("/api/products", routes::products::router())
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn_with_state(
                    auth_state,
                    crate::middleware::auth_middleware,
                ))
                .layer(Extension(service)),
        )
}

async fn build_store() -> Arc<dyn ProductStore> {
    let use_persistent = std::env::var("USE_PERSISTENT_STORES")
        .unwrap_or_else(|_| "false".to_string())
        .parse::<bool>()
        .unwrap_or(false);

    if use_persistent {
        #[cfg(feature = "postgres")]
        {
            return build_postgres_store().await;
        }
        #[cfg(not(feature = "postgres"))]
        {
            tracing::warn!(
                "USE_PERSISTENT_STORES=true but postgres feature not enabled, falling back to in-memory"
            );
        }
    }

    Arc::new(InMemoryProductStore::new())
}

#[cfg(feature = "postgres")]
async fn build_postgres_store() -> Arc<dyn ProductStore> {
    let database_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set when USE_PERSISTENT_STORES=true");

    let store = catalogd_infra::PostgresProductStore::connect(&database_url)
        .await
        .expect("failed to connect to Postgres");

    store
        .ensure_schema()
        .await
        .expect("failed to ensure products schema");

    Arc::new(store)
}
