use super::language::LanguageConfig;
use crate::constants;
use crate::utils::codec;
use serde::{Deserialize, Serialize};

/// A validated request to run code once.
#[derive(Debug, Clone)]
pub struct SubmissionRequest {
    pub source_code: String,
    pub language: &'static LanguageConfig,
    pub stdin: String,
}

/// Wire body for `POST /submissions?base64_encoded=true`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SubmissionPayload {
    pub source_code: String, // base64
    pub language_id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stdin: Option<String>, // base64
    pub cpu_time_limit: u32,
    pub memory_limit: u32,
}

impl SubmissionPayload {
    pub fn encode(req: &SubmissionRequest) -> Self {
        Self {
            source_code: codec::encode_text(&req.source_code),
            language_id: req.language.id,
            stdin: match req.stdin.is_empty() {
                true => None,
                false => Some(codec::encode_text(&req.stdin)),
            },
            cpu_time_limit: constants::CPU_TIME_LIMIT_SECS,
            memory_limit: constants::MEMORY_LIMIT_KB,
        }
    }
}

/// Judge0's acknowledgement of an asynchronous submission.
#[derive(Deserialize, Debug, Default)]
pub struct TicketBody {
    pub token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket(pub String);

impl Ticket {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TicketBody {
    pub fn into_ticket(self) -> Option<Ticket> {
        self.token.filter(|t| !t.trim().is_empty()).map(Ticket)
    }
}
