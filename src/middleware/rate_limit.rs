use axum::{
    http::{HeaderMap, Request},
    response::IntoResponse,
};
use crate::config::state::AppState;
use crate::constants;
use crate::types::error::GatewayError;
use crate::types::error_response::ErrorResponse;
use axum_extra::middleware::Next;
use tracing::{error, warn};

/// First hop of `X-Forwarded-For`, or `"unknown"`.
pub fn client_identity(headers: &HeaderMap) -> String {
    headers
        .get(constants::FORWARDED_FOR)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(constants::UNKNOWN_IDENTITY)
        .to_string()
}

pub async fn rate_limit<B>(req: Request<B>, next: Next<B>) -> impl IntoResponse {
    let state = match req.extensions().get::<AppState>() {
        Some(state) => state,
        None => {
            error!("rate limiter mounted without app state");
            return Err(ErrorResponse::server_error_default());
        }
    };
    let identity = client_identity(req.headers());
    if !state.limiter.admit(&identity) {
        warn!(%identity, "rate limit exceeded");
        return Err(ErrorResponse::from(GatewayError::AdmissionRejected));
    }
    Ok(next.run(req).await)
}
