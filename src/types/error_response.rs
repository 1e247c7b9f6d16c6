use super::error::GatewayError;
use super::response::ErrorBody;
use axum::{
    http::StatusCode,
    response::{
        Response as AxumResponse,
        IntoResponse
    },
    Json as AxumJson,
};
use std::fmt::{Display, Formatter};
use tracing::{error, warn};

#[derive(Debug)]
pub struct ErrorResponse {
    status: StatusCode,
    info: String,
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> AxumResponse {
        (self.status, AxumJson(ErrorBody::new(self.info.as_str()))).into_response()
    }
}

impl Display for ErrorResponse {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.status, self.info)
    }
}

impl From<GatewayError> for ErrorResponse {
    fn from(e: GatewayError) -> Self {
        match e {
            GatewayError::AdmissionRejected => ErrorResponse::too_many_requests_default(),
            GatewayError::InvalidRequest(msg) => ErrorResponse::bad_request_with_str(msg.as_str()),
            GatewayError::PayloadTooLarge => ErrorResponse::new(
                StatusCode::PAYLOAD_TOO_LARGE,
                "Request body is too large".to_string(),
            ),
            GatewayError::ServiceUnavailable => {
                ErrorResponse::unavailable_with_str("Code execution service not configured")
            }
            GatewayError::SubmissionFailed(detail) => {
                error!(%detail, "judge submission failed");
                ErrorResponse::server_error_with_str("Failed to submit code for execution")
            }
            GatewayError::ExecutionTimeout { attempts } => {
                warn!(attempts, "execution polling exhausted");
                ErrorResponse::new(
                    StatusCode::REQUEST_TIMEOUT,
                    "Execution timed out. Please try again.".to_string(),
                )
            }
            GatewayError::Cancelled => {
                ErrorResponse::unavailable_with_str("Server is shutting down, please retry")
            }
            GatewayError::TransientPollFailure(detail) | GatewayError::System(detail) => {
                error!(%detail, "execution failed");
                ErrorResponse::server_error_default()
            }
        }
    }
}

impl ErrorResponse {
    pub fn new(status: StatusCode, info: String) -> Self {
        Self { status, info }
    }
    pub fn status(&self) -> StatusCode {
        self.status
    }
    pub fn server_error_with_str(err: &str) -> Self {
        ErrorResponse::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
    }
    pub fn server_error_default() -> Self {
        ErrorResponse::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error during code execution".to_string(),
        )
    }
    pub fn bad_request_with_str(err: &str) -> Self {
        ErrorResponse::new(StatusCode::BAD_REQUEST, err.to_string())
    }
    pub fn unavailable_with_str(err: &str) -> Self {
        ErrorResponse::new(StatusCode::SERVICE_UNAVAILABLE, err.to_string())
    }
    pub fn too_many_requests_default() -> Self {
        ErrorResponse::new(
            StatusCode::TOO_MANY_REQUESTS,
            "Rate limit exceeded. Please wait before submitting again.".to_string(),
        )
    }
}
