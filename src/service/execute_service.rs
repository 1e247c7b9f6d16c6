use crate::config::state::AppState;
use crate::constants::MAX_BODY_BYTES;
use crate::json_map;
use crate::model::language::{DEFAULT_LANGUAGE, LANGUAGES};
use crate::model::submission::SubmissionPayload;
use crate::service::forms::ExecuteForm;
use crate::types::{
    error::GatewayError,
    links::ResponseResult,
    response::Response,
};
use crate::utils::{complexity, poller::PollLoop};
use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, ContentLengthLimitRejection},
        ContentLengthLimit, Extension,
    },
    response::IntoResponse,
};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value as Json;
use tracing::{debug, error, info};

pub type JsonBytes = Result<
    ContentLengthLimit<Bytes, MAX_BODY_BYTES>,
    ContentLengthLimitRejection<BytesRejection>,
>;

/// Parses the body as JSON whatever its `Content-Type`.
pub fn json_body<T: DeserializeOwned>(body: JsonBytes) -> Result<T, GatewayError> {
    let ContentLengthLimit(bytes) = body.map_err(|e| {
        debug!(error = %e, "rejected request body");
        match e {
            ContentLengthLimitRejection::PayloadTooLarge(_) => GatewayError::PayloadTooLarge,
            ContentLengthLimitRejection::LengthRequired(_) => {
                GatewayError::invalid_request("Content-Length header is required")
            }
            _ => GatewayError::invalid_request("Request body must be valid JSON"),
        }
    })?;
    serde_json::from_slice(&bytes).map_err(|e| {
        debug!(error = %e, "request body is not json");
        GatewayError::invalid_request("Request body must be valid JSON")
    })
}

pub async fn execute(
    Extension(state): Extension<AppState>,
    body: JsonBytes,
) -> ResponseResult {
    let body: Json = json_body(body)?;
    let req = ExecuteForm::from_json(&body)?.into_request()?;

    let judge = state.judge.as_ref().ok_or_else(|| {
        error!("JUDGE0_API_KEY not configured");
        GatewayError::ServiceUnavailable
    })?;

    info!(
        language = req.language.key,
        source_bytes = req.source_code.len(),
        stdin_bytes = req.stdin.len(),
        "executing submission"
    );
    let payload = SubmissionPayload::encode(&req);
    let verdict = PollLoop::new(judge.as_ref(), state.poll, payload, state.cancel.clone())
        .run()
        .await?;
    info!(
        accepted = verdict.accepted(),
        status = verdict.status_description(),
        "execution finished"
    );
    Ok(Response::from(verdict).into_response())
}

pub async fn languages() -> ResponseResult {
    Ok(Response::from(json_map!(
        "default" => DEFAULT_LANGUAGE,
        "languages" => LANGUAGES
    ))
    .into_response())
}

#[derive(Deserialize)]
pub struct ComplexityBody {
    #[serde(rename = "sourceCode")]
    pub source_code: String,
}

pub async fn estimate_complexity(body: JsonBytes) -> ResponseResult {
    let body: ComplexityBody = json_body(body)?;
    Ok(Response::from(complexity::estimate(&body.source_code)).into_response())
}

pub async fn health(Extension(state): Extension<AppState>) -> ResponseResult {
    Ok(Response::from(json_map!(
        "status" => "ok",
        "judgeConfigured" => state.judge.is_some()
    ))
    .into_response())
}
