use axum::{
    body::Bytes,
    extract::{Extension, Json, Path, RawQuery},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use judge_gateway::config::env::JudgeSettings;
use judge_gateway::model::submission::{SubmissionPayload, Ticket};
use judge_gateway::types::error::GatewayError;
use judge_gateway::utils::codec;
use judge_gateway::utils::judger::{HyperJudge, JudgeBackend};
use judge_gateway::utils::poller::{CancelSignal, PollLoop, PollPolicy};
use serde_json::{json, Value};
use std::net::{SocketAddr, TcpListener};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// What the fake Judge0 does on each endpoint.
#[derive(Default)]
struct Script {
    submit_status: Option<u16>,
    omit_token: bool,
    /// Per-poll (http status, body); the last entry repeats.
    polls: Vec<(u16, Value)>,
    poll_delay: Option<Duration>,
}

#[derive(Default)]
struct Recorded {
    submit_queries: Vec<String>,
    poll_queries: Vec<String>,
    keys: Vec<String>,
    hosts: Vec<String>,
    bodies: Vec<Value>,
    tokens: Vec<String>,
}

struct FakeJudge {
    script: Script,
    seen: Mutex<Recorded>,
    poll_count: AtomicU32,
}

fn header(headers: &HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

async fn submit(
    Extension(fake): Extension<Arc<FakeJudge>>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    {
        let mut seen = fake.seen.lock().unwrap();
        seen.submit_queries.push(query.unwrap_or_default());
        seen.keys.push(header(&headers, "x-rapidapi-key"));
        seen.hosts.push(header(&headers, "x-rapidapi-host"));
        seen.bodies.push(serde_json::from_slice(&body).unwrap_or(Value::Null));
    }
    let status = StatusCode::from_u16(fake.script.submit_status.unwrap_or(201)).unwrap();
    let body = match fake.script.omit_token {
        true => json!({}),
        false => json!({ "token": "d85cd024-1548-4165-96c7-7bc88673f194" }),
    };
    (status, Json(body))
}

async fn fetch(
    Extension(fake): Extension<Arc<FakeJudge>>,
    Path(token): Path<String>,
    RawQuery(query): RawQuery,
) -> impl IntoResponse {
    let n = fake.poll_count.fetch_add(1, Ordering::SeqCst) as usize;
    {
        let mut seen = fake.seen.lock().unwrap();
        seen.poll_queries.push(query.unwrap_or_default());
        seen.tokens.push(token);
    }
    if let Some(delay) = fake.script.poll_delay {
        tokio::time::sleep(delay).await;
    }
    let (code, body) = fake.script.polls[n.min(fake.script.polls.len() - 1)].clone();
    (StatusCode::from_u16(code).unwrap(), Json(body))
}

fn spawn_fake(script: Script) -> (Arc<FakeJudge>, SocketAddr) {
    let fake = Arc::new(FakeJudge {
        script,
        seen: Mutex::new(Recorded::default()),
        poll_count: AtomicU32::new(0),
    });
    let app = Router::new()
        .route("/submissions", post(submit))
        .route("/submissions/:token", get(fetch))
        .layer(Extension(fake.clone()));
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let addr = listener.local_addr().unwrap();
    let server = axum::Server::from_tcp(listener)
        .unwrap()
        .serve(app.into_make_service());
    tokio::spawn(server);
    (fake, addr)
}

fn judge_for(addr: SocketAddr) -> HyperJudge {
    let settings = JudgeSettings {
        base_url: format!("http://{}/", addr),
        api_key: Some("test-key".into()),
        api_host: "judge0-ce.p.rapidapi.com".into(),
        connect_timeout: Duration::from_secs(2),
        request_timeout: Duration::from_millis(300),
    };
    HyperJudge::new(&settings, "test-key".into())
}

fn payload() -> SubmissionPayload {
    SubmissionPayload {
        source_code: codec::encode_text("print('hi')"),
        language_id: 71,
        stdin: Some(codec::encode_text("1 2\n")),
        cpu_time_limit: 5,
        memory_limit: 128000,
    }
}

fn policy() -> PollPolicy {
    PollPolicy { max_attempts: 10, interval: Duration::from_millis(2) }
}

fn pending() -> (u16, Value) {
    (200, json!({ "status": { "id": 2, "description": "Processing" }, "stdout": null }))
}

#[tokio::test]
async fn submit_then_poll_until_accepted() {
    let (fake, addr) = spawn_fake(Script {
        polls: vec![
            pending(),
            (200, json!({
                "status": { "id": 3, "description": "Accepted" },
                "stdout": "aGkK\n",
                "stderr": null,
                "compile_output": null,
                "message": null,
                "time": "0.021",
                "memory": 7412
            })),
        ],
        ..Default::default()
    });
    let judge = judge_for(addr);

    let verdict = PollLoop::new(&judge, policy(), payload(), CancelSignal::never())
        .run()
        .await
        .unwrap();
    assert_eq!(verdict.stdout.as_deref(), Some("hi\n"));
    assert_eq!(verdict.status_description(), "Accepted");
    assert_eq!(verdict.time.as_deref(), Some("0.021"));
    assert_eq!(verdict.memory, Some(7412));

    let seen = fake.seen.lock().unwrap();
    assert_eq!(seen.submit_queries, vec!["base64_encoded=true&wait=false"]);
    assert_eq!(seen.poll_queries, vec!["base64_encoded=true"; 2]);
    assert_eq!(seen.tokens, vec!["d85cd024-1548-4165-96c7-7bc88673f194"; 2]);
    assert_eq!(seen.keys, vec!["test-key"]);
    assert_eq!(seen.hosts, vec!["judge0-ce.p.rapidapi.com"]);
    assert_eq!(
        seen.bodies[0],
        json!({
            "source_code": "cHJpbnQoJ2hpJyk=",
            "language_id": 71,
            "stdin": "MSAyCg==",
            "cpu_time_limit": 5,
            "memory_limit": 128000
        })
    );
}

#[tokio::test]
async fn rejected_submission_is_submission_failed() {
    let (fake, addr) = spawn_fake(Script {
        submit_status: Some(401),
        polls: vec![pending()],
        ..Default::default()
    });
    let err = judge_for(addr).submit(&payload()).await.unwrap_err();
    match err {
        GatewayError::SubmissionFailed(detail) => assert_eq!(detail, "status 401 Unauthorized"),
        other => panic!("unexpected error {:?}", other),
    }
    assert_eq!(fake.seen.lock().unwrap().bodies.len(), 1);
    assert_eq!(fake.poll_count.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn accepted_submission_returns_the_token() {
    let (fake, addr) = spawn_fake(Script {
        polls: vec![pending()],
        ..Default::default()
    });
    let ticket = judge_for(addr).submit(&payload()).await.unwrap();
    assert_eq!(ticket.as_str(), "d85cd024-1548-4165-96c7-7bc88673f194");
    assert_eq!(fake.seen.lock().unwrap().bodies[0]["language_id"], json!(71));
}

#[tokio::test]
async fn missing_token_is_submission_failed() {
    let (fake, addr) = spawn_fake(Script {
        omit_token: true,
        polls: vec![pending()],
        ..Default::default()
    });
    let err = judge_for(addr).submit(&payload()).await.unwrap_err();
    match err {
        GatewayError::SubmissionFailed(detail) => assert_eq!(detail, "no submission token received"),
        other => panic!("unexpected error {:?}", other),
    }
    assert_eq!(fake.seen.lock().unwrap().bodies.len(), 1);
}

#[tokio::test]
async fn failing_polls_are_transient() {
    let (fake, addr) = spawn_fake(Script {
        polls: vec![
            (503, json!({ "error": "busy" })),
            (200, json!({ "unexpected": true })),
            (200, json!({
                "status": { "id": 6, "description": "Compilation Error" },
                "compile_output": "bWFpbi5jcHA6MTogZXJyb3IK"
            })),
        ],
        ..Default::default()
    });
    let judge = judge_for(addr);

    let first = judge.fetch(&Ticket("x".into())).await.unwrap_err();
    assert!(matches!(first, GatewayError::TransientPollFailure(_)));

    let verdict = PollLoop::new(&judge, policy(), payload(), CancelSignal::never())
        .run()
        .await
        .unwrap();
    assert_eq!(verdict.status_id(), 6);
    assert_eq!(verdict.compile_output.as_deref(), Some("main.cpp:1: error\n"));
    assert_eq!(fake.poll_count.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn slow_polls_time_out_individually() {
    let (fake, addr) = spawn_fake(Script {
        polls: vec![pending()],
        poll_delay: Some(Duration::from_secs(2)),
        ..Default::default()
    });
    let policy = PollPolicy { max_attempts: 2, interval: Duration::from_millis(1) };
    let err = PollLoop::new(&judge_for(addr), policy, payload(), CancelSignal::never())
        .run()
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::ExecutionTimeout { attempts: 2 }));
    assert_eq!(fake.poll_count.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn unreachable_judge_fails_submission() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let err = judge_for(addr).submit(&payload()).await.unwrap_err();
    assert!(matches!(err, GatewayError::SubmissionFailed(_)));
}
