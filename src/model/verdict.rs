use crate::constants;
use crate::utils::codec;
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct JudgeStatus {
    pub id: u32,
    #[serde(default)]
    pub description: String,
}

impl JudgeStatus {
    pub fn is_pending(&self) -> bool {
        self.id == constants::STATUS_IN_QUEUE || self.id == constants::STATUS_PROCESSING
    }
}

/// Body of `GET /submissions/{token}?base64_encoded=true`. Text fields are
/// still base64 here.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct JudgeResponse {
    pub status: Option<JudgeStatus>,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
    pub compile_output: Option<String>,
    pub message: Option<String>,
    pub time: Option<String>,
    pub memory: Option<u64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub stdout: Option<String>,
    pub stderr: Option<String>,
    pub compile_output: Option<String>,
    pub message: Option<String>,
    pub status: JudgeStatus,
    pub time: Option<String>,
    pub memory: Option<u64>,
}

impl Verdict {
    pub fn status_id(&self) -> u32 {
        self.status.id
    }
    pub fn status_description(&self) -> &str {
        self.status.description.as_str()
    }
    pub fn accepted(&self) -> bool {
        self.status.id == constants::STATUS_ACCEPTED
    }

    /// Builds the caller-facing verdict from a terminal judge response.
    pub fn normalize(status: JudgeStatus, raw: JudgeResponse) -> Self {
        Self {
            stdout: decode_field("stdout", raw.stdout),
            stderr: decode_field("stderr", raw.stderr),
            compile_output: decode_field("compile_output", raw.compile_output),
            message: decode_field("message", raw.message),
            status,
            time: raw.time,
            memory: raw.memory,
        }
    }
}

fn decode_field(name: &str, value: Option<String>) -> Option<String> {
    let value = value?;
    match codec::decode_text(&value) {
        Ok(text) => Some(text),
        Err(e) => {
            warn!(field = name, error = %e, "judge field is not base64, passing through");
            Some(value)
        }
    }
}
