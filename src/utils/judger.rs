use crate::config::env::JudgeSettings;
use crate::constants;
use crate::model::submission::{SubmissionPayload, Ticket, TicketBody};
use crate::model::verdict::JudgeResponse;
use crate::types::error::GatewayError;
use async_trait::async_trait;
use hyper::{
    client::{Client, HttpConnector},
    header::CONTENT_TYPE,
    Body, Method, Request, Response, StatusCode,
};
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// The two calls of the judge protocol. `HyperJudge` talks to Judge0; tests
/// substitute recording stubs.
#[async_trait]
pub trait JudgeBackend: Send + Sync {
    /// Queues a submission and returns its ticket.
    async fn submit(&self, payload: &SubmissionPayload) -> Result<Ticket, GatewayError>;

    /// Fetches the current state of a ticket. Every error is a
    /// `TransientPollFailure`.
    async fn fetch(&self, ticket: &Ticket) -> Result<JudgeResponse, GatewayError>;
}

pub struct HyperJudge {
    client: Client<HttpsConnector<HttpConnector>, Body>,
    base_url: String,
    api_key: String,
    api_host: String,
    request_timeout: Duration,
}

impl HyperJudge {
    pub fn new(settings: &JudgeSettings, api_key: String) -> Self {
        let mut http = HttpConnector::new();
        http.set_connect_timeout(Some(settings.connect_timeout));
        http.enforce_http(false);
        let https = HttpsConnectorBuilder::new()
            .with_webpki_roots()
            .https_or_http()
            .enable_http1()
            .wrap_connector(http);
        Self {
            client: Client::builder().build(https),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key,
            api_host: settings.api_host.clone(),
            request_timeout: settings.request_timeout,
        }
    }

    fn request(&self, method: Method, path_and_query: &str, body: Body) -> Result<Request<Body>, GatewayError> {
        Ok(Request::builder()
            .uri(format!("{}{}", self.base_url, path_and_query))
            .method(method)
            .header(CONTENT_TYPE, "application/json")
            .header(constants::RAPID_API_KEY, self.api_key.as_str())
            .header(constants::RAPID_API_HOST, self.api_host.as_str())
            .body(body)?)
    }

    async fn send(&self, req: Request<Body>) -> Result<(StatusCode, Vec<u8>), String> {
        let exchange = async {
            let res: Response<Body> = self.client.request(req).await?;
            let status = res.status();
            let buf = hyper::body::to_bytes(res.into_body()).await?;
            Ok::<_, hyper::Error>((status, buf.to_vec()))
        };
        match tokio::time::timeout(self.request_timeout, exchange).await {
            Ok(Ok(r)) => Ok(r),
            Ok(Err(e)) => Err(e.to_string()),
            Err(_) => Err(format!("no response within {:?}", self.request_timeout)),
        }
    }

    /// One-off reachability check used at startup.
    pub async fn ping(&self) {
        let req = match self.request(Method::GET, "/about", Body::empty()) {
            Ok(req) => req,
            Err(e) => {
                warn!(error = %e, "could not build judge ping");
                return;
            }
        };
        match self.send(req).await {
            Ok((status, body)) if status.is_success() => {
                info!(judge = %self.base_url, about = %String::from_utf8_lossy(&body), "judge reachable")
            }
            Ok((status, _)) => warn!(judge = %self.base_url, %status, "judge ping rejected"),
            Err(e) => warn!(judge = %self.base_url, error = %e, "judge unreachable"),
        }
    }
}

#[async_trait]
impl JudgeBackend for HyperJudge {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<Ticket, GatewayError> {
        let js = serde_json::to_vec(payload)
            .map_err(|e| GatewayError::system_error(e.to_string().as_str()))?;
        let req = self.request(
            Method::POST,
            "/submissions?base64_encoded=true&wait=false",
            Body::from(js),
        )?;
        let (status, body) = self
            .send(req)
            .await
            .map_err(GatewayError::SubmissionFailed)?;
        if !status.is_success() {
            let text = String::from_utf8_lossy(&body);
            error!(%status, body = %text, "judge submission error");
            return Err(GatewayError::SubmissionFailed(format!("status {}", status)));
        }
        let ticket = serde_json::from_slice::<TicketBody>(&body)
            .ok()
            .and_then(TicketBody::into_ticket)
            .ok_or_else(|| GatewayError::SubmissionFailed("no submission token received".to_string()))?;
        debug!(ticket = ticket.as_str(), "submission queued");
        Ok(ticket)
    }

    async fn fetch(&self, ticket: &Ticket) -> Result<JudgeResponse, GatewayError> {
        let req = self.request(
            Method::GET,
            format!("/submissions/{}?base64_encoded=true", ticket.as_str()).as_str(),
            Body::empty(),
        )
        .map_err(|e| GatewayError::TransientPollFailure(e.to_string()))?;
        let (status, body) = self
            .send(req)
            .await
            .map_err(GatewayError::TransientPollFailure)?;
        if !status.is_success() {
            return Err(GatewayError::TransientPollFailure(format!("status {}", status)));
        }
        serde_json::from_slice(&body)
            .map_err(|e| GatewayError::TransientPollFailure(format!("undecodable result: {}", e)))
    }
}
