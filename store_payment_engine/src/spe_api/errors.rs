use thiserror::Error;

use crate::traits::PaymentGatewayError;

#[derive(Debug, Clone, Error)]
pub enum PaymentFlowError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("User id is required")]
    InvalidUserId,
    #[error("Order id is required")]
    InvalidOrderId,
    #[error("Amount must be a positive number, not {0}")]
    InvalidAmount(f64),
    #[error("Invalid search filter. {0}")]
    InvalidSearchField(String),
    #[error("The update does not change any fields")]
    EmptyUpdate,
    #[error("Payment #{0} does not exist")]
    PaymentNotFound(i64),
}

impl From<PaymentGatewayError> for PaymentFlowError {
    fn from(e: PaymentGatewayError) -> Self {
        match e {
            PaymentGatewayError::DatabaseError(s) => PaymentFlowError::DatabaseError(s),
            PaymentGatewayError::PaymentModificationNoOp => PaymentFlowError::EmptyUpdate,
        }
    }
}
