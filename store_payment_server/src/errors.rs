use actix_web::{
    error::ResponseError,
    http::StatusCode,
    HttpResponse,
};
use log::error;
use store_payment_engine::PaymentFlowError;
use thiserror::Error;

use crate::data_objects::ApiResponse;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("Could not read request body: {0}")]
    InvalidRequestBody(String),
    #[error("Could not read request path: {0}")]
    InvalidRequestPath(String),
    #[error("Invalid query. {0}")]
    InvalidQuery(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
    #[error("The data was not found. {0}")]
    NoRecordFound(String),
}

impl ServerError {
    /// The short, human-readable summary that goes into the `message` field of error responses.
    fn summary(&self) -> &'static str {
        match self {
            Self::InvalidRequestBody(_) | Self::InvalidRequestPath(_) => "fields provided are wrong",
            Self::InvalidQuery(_) => "invalid search query",
            Self::NoRecordFound(_) => "payment not found",
            _ => "internal server error",
        }
    }
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Self::InvalidRequestPath(_) => StatusCode::BAD_REQUEST,
            Self::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            Self::NoRecordFound(_) => StatusCode::NOT_FOUND,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let body = ApiResponse::<()>::failure(status, self.summary(), self.to_string());
        HttpResponse::build(status).json(body)
    }
}

impl From<PaymentFlowError> for ServerError {
    fn from(e: PaymentFlowError) -> Self {
        match e {
            PaymentFlowError::DatabaseError(s) => {
                error!("💻️ Database error while handling a payment request. {s}");
                Self::BackendError(format!("Database error: {s}"))
            },
            PaymentFlowError::InvalidUserId |
            PaymentFlowError::InvalidOrderId |
            PaymentFlowError::InvalidAmount(_) |
            PaymentFlowError::EmptyUpdate => Self::InvalidRequestBody(e.to_string()),
            PaymentFlowError::InvalidSearchField(_) => Self::InvalidQuery(e.to_string()),
            PaymentFlowError::PaymentNotFound(_) => Self::NoRecordFound(e.to_string()),
        }
    }
}
