use thiserror::Error;

/// Every way an execution request can end without a verdict.
///
/// `TransientPollFailure` is absorbed by the poll loop and only escapes if a
/// caller invokes the judge backend directly.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("rate limit exceeded")]
    AdmissionRejected,

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("request body too large")]
    PayloadTooLarge,

    #[error("code execution service not configured")]
    ServiceUnavailable,

    #[error("judge rejected submission: {0}")]
    SubmissionFailed(String),

    #[error("execution did not finish within {attempts} polls")]
    ExecutionTimeout { attempts: u32 },

    #[error("poll attempt failed: {0}")]
    TransientPollFailure(String),

    #[error("execution cancelled")]
    Cancelled,

    #[error("system error: {0}")]
    System(String),
}

impl GatewayError {
    pub fn invalid_request(msg: &str) -> Self {
        Self::InvalidRequest(msg.to_string())
    }
    pub fn system_error(msg: &str) -> Self {
        Self::System(msg.to_string())
    }
}

impl From<hyper::http::Error> for GatewayError {
    fn from(e: hyper::http::Error) -> Self {
        GatewayError::system_error(e.to_string().as_str())
    }
}
