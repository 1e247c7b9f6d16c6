use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header::{CONTENT_LENGTH, CONTENT_TYPE}, Request, StatusCode},
    Router,
};
use judge_gateway::config::{routes, state::AppState};
use judge_gateway::dao::rate_limit::RateLimiter;
use judge_gateway::model::submission::{SubmissionPayload, Ticket};
use judge_gateway::model::verdict::{JudgeResponse, JudgeStatus};
use judge_gateway::types::error::GatewayError;
use judge_gateway::utils::judger::JudgeBackend;
use judge_gateway::utils::poller::{CancelSignal, PollPolicy};
use serde_json::Value;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;

/// In-memory judge that records every call.
#[allow(dead_code)]
pub struct StubJudge {
    pub reject_submit: bool,
    /// Status ids returned by successive polls; the last one repeats.
    pub statuses: Vec<u32>,
    pub stdout: Option<String>,
    pub submits: AtomicU32,
    pub polls: AtomicU32,
    pub payloads: Mutex<Vec<SubmissionPayload>>,
}

#[allow(dead_code)]
impl StubJudge {
    pub fn finishing_with(statuses: Vec<u32>, stdout_b64: &str) -> Arc<Self> {
        Arc::new(Self {
            reject_submit: false,
            statuses,
            stdout: Some(stdout_b64.to_string()),
            submits: AtomicU32::new(0),
            polls: AtomicU32::new(0),
            payloads: Mutex::new(vec![]),
        })
    }

    pub fn rejecting() -> Arc<Self> {
        Arc::new(Self {
            reject_submit: true,
            statuses: vec![3],
            stdout: None,
            submits: AtomicU32::new(0),
            polls: AtomicU32::new(0),
            payloads: Mutex::new(vec![]),
        })
    }

    pub fn calls(&self) -> u32 {
        self.submits.load(Ordering::SeqCst) + self.polls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl JudgeBackend for StubJudge {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<Ticket, GatewayError> {
        self.submits.fetch_add(1, Ordering::SeqCst);
        self.payloads.lock().unwrap().push(payload.clone());
        if self.reject_submit {
            return Err(GatewayError::SubmissionFailed("status 401 Unauthorized".into()));
        }
        Ok(Ticket("stub-ticket".into()))
    }

    async fn fetch(&self, _ticket: &Ticket) -> Result<JudgeResponse, GatewayError> {
        let n = self.polls.fetch_add(1, Ordering::SeqCst) as usize;
        let id = self.statuses[n.min(self.statuses.len() - 1)];
        let description = match id {
            1 => "In Queue",
            2 => "Processing",
            3 => "Accepted",
            _ => "Wrong Answer",
        };
        Ok(JudgeResponse {
            status: Some(JudgeStatus { id, description: description.into() }),
            stdout: self.stdout.clone(),
            time: Some("0.01".into()),
            memory: Some(2048),
            ..Default::default()
        })
    }
}

#[allow(dead_code)]
pub fn fast_poll() -> PollPolicy {
    PollPolicy { max_attempts: 10, interval: Duration::from_millis(2) }
}

#[allow(dead_code)]
pub fn app_with(judge: Option<Arc<StubJudge>>, limit: u32) -> Router {
    let state = AppState::new(
        RateLimiter::new(limit, Duration::from_secs(60)),
        judge.map(|j| j as Arc<dyn JudgeBackend>),
        fast_poll(),
        CancelSignal::never(),
    );
    routes::config_routes(state)
}

#[allow(dead_code)]
pub async fn post_json(app: &Router, path: &str, client: &str, body: &str) -> (StatusCode, Value) {
    post_with(app, path, client, Some("application/json"), body).await
}

/// POST with an arbitrary (or no) `Content-Type`; `Content-Length` is always set.
#[allow(dead_code)]
pub async fn post_with(
    app: &Router,
    path: &str,
    client: &str,
    content_type: Option<&str>,
    body: &str,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method("POST")
        .uri(path)
        .header(CONTENT_LENGTH, body.len())
        .header("x-forwarded-for", client);
    if let Some(content_type) = content_type {
        builder = builder.header(CONTENT_TYPE, content_type);
    }
    let req = builder.body(Body::from(body.to_string())).unwrap();
    send(app, req).await
}

#[allow(dead_code)]
pub async fn get_json(app: &Router, path: &str) -> (StatusCode, Value) {
    let req = Request::builder().uri(path).body(Body::empty()).unwrap();
    send(app, req).await
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = hyper::body::to_bytes(resp.into_body()).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}
