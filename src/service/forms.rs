use crate::model::language;
use crate::model::submission::SubmissionRequest;
use crate::types::error::GatewayError;
use serde_json::Value as Json;
use std::collections::HashMap;
use validator::{Validate, ValidationError, ValidationErrors};

/// Body of `POST /api/execute` once the JSON types are checked.
#[derive(Validate, Debug)]
pub struct ExecuteForm {
    #[validate(length(min = 1, message = "Source code is required"))]
    #[validate(length(max = 65536, message = "Source code is too long"))]
    pub source_code: String,

    pub language_id: u32,

    #[validate(length(max = 65536, message = "Input is too long"))]
    pub stdin: String,
}

pub fn from_validation_errors(e: ValidationErrors) -> String {
    let errors_map: HashMap<&'static str, &Vec<ValidationError>> = e.field_errors();
    errors_map
        .values()
        .flat_map(|v| v.iter())
        .filter_map(|item| item.message.as_ref().map(|s| s.to_string()))
        .collect::<Vec<_>>()
        .join(" , ")
}

impl ExecuteForm {
    /// Checks field types by hand so a wrongly typed field is a 400 with a
    /// readable message rather than a deserializer error.
    pub fn from_json(body: &Json) -> Result<Self, GatewayError> {
        let source_code = match body.get("sourceCode") {
            Some(Json::String(s)) => s.clone(),
            _ => return Err(GatewayError::invalid_request("Source code is required")),
        };
        let language_id = body
            .get("languageId")
            .and_then(Json::as_u64)
            .filter(|&id| id > 0)
            .and_then(|id| u32::try_from(id).ok())
            .ok_or_else(|| GatewayError::invalid_request("Valid language ID is required"))?;
        let stdin = match body.get("stdin") {
            None | Some(Json::Null) => String::new(),
            Some(Json::String(s)) => s.clone(),
            Some(_) => return Err(GatewayError::invalid_request("Input must be a string")),
        };

        let form = Self {
            source_code,
            language_id,
            stdin,
        };
        form.validate()
            .map_err(|e| GatewayError::InvalidRequest(from_validation_errors(e)))?;
        Ok(form)
    }

    pub fn into_request(self) -> Result<SubmissionRequest, GatewayError> {
        let language = language::by_id(self.language_id)
            .ok_or_else(|| GatewayError::invalid_request("Unsupported language ID"))?;
        Ok(SubmissionRequest {
            source_code: self.source_code,
            language,
            stdin: self.stdin,
        })
    }
}
