use super::state::AppState;
use crate::{
    middleware::rate_limit::rate_limit,
    service::execute_service,
};
use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};

use axum_extra::middleware::from_fn;

pub fn api_routes() -> Router {
    Router::new()
        .route(
            "/execute",
            post(execute_service::execute).route_layer(from_fn(rate_limit))
        )
        .route("/languages", get(execute_service::languages))
        .route("/complexity", post(execute_service::estimate_complexity))
        .route("/health", get(execute_service::health))
}

pub fn config_routes(state: AppState) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .layer(Extension(state))
}
