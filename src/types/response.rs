use serde::{Deserialize, Serialize};
use axum::{
    Json as AxumJson,
    response::{
        IntoResponse,
        Response as AxumResponse
    }
};

/// Success envelope: `{ "success": true, ...data }`.
#[derive(Debug, Serialize)]
pub struct Response<T: Serialize> {
    pub success: bool,
    #[serde(flatten)]
    pub data: T,
}

impl<T> Response<T>
    where
        T: Serialize,
{
    pub fn from(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for Response<T> {
    fn into_response(self) -> AxumResponse {
        AxumJson::from(self).into_response()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: &str) -> Self {
        Self {
            error: error.to_string(),
        }
    }
}
