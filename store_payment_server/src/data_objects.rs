use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};

/// The envelope every response body is wrapped in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status_code: u16,
    pub message: String,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success<S: Into<String>>(status: StatusCode, message: S, data: T) -> Self {
        Self { status_code: status.as_u16(), message: message.into(), data: Some(data), error: None }
    }

    pub fn failure<S: Into<String>, E: Into<String>>(status: StatusCode, message: S, error: E) -> Self {
        Self { status_code: status.as_u16(), message: message.into(), data: None, error: Some(error.into()) }
    }
}

/// Query parameters for `GET /payments/search`
#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    pub filter: String,
    pub value: String,
}
