use thiserror::Error;

use crate::db_types::{NewPayment, Payment, PaymentSearchField, PaymentUpdate};

/// Storage of payment records.
#[allow(async_fn_in_trait)]
pub trait PaymentManagement: Clone {
    /// Stores a new payment record, assigning its id and creation time. Returns the stored record.
    async fn insert_payment(&self, payment: NewPayment) -> Result<Payment, PaymentGatewayError>;

    /// Fetches every payment record, oldest first.
    async fn fetch_payments(&self) -> Result<Vec<Payment>, PaymentGatewayError>;

    /// Fetches the payment with the given id, or `None` if there is no such record.
    async fn fetch_payment(&self, id: i64) -> Result<Option<Payment>, PaymentGatewayError>;

    /// Applies the update to the payment with the given id. Returns the updated record, or `None` if the record does
    /// not exist.
    ///
    /// An empty update is rejected with [`PaymentGatewayError::PaymentModificationNoOp`].
    async fn update_payment(&self, id: i64, update: PaymentUpdate) -> Result<Option<Payment>, PaymentGatewayError>;

    /// Deletes the payment with the given id. Returns `false` if there was nothing to delete.
    async fn delete_payment(&self, id: i64) -> Result<bool, PaymentGatewayError>;

    /// Fetches the payments for which `field` equals `value`, oldest first.
    async fn search_payments(
        &self,
        field: PaymentSearchField,
        value: &str,
    ) -> Result<Vec<Payment>, PaymentGatewayError>;
}

#[derive(Debug, Clone, Error)]
pub enum PaymentGatewayError {
    #[error("We have an internal database engine (configuration/uptime etc.) : {0}")]
    DatabaseError(String),
    #[error("The requested payment update would result in a no-op.")]
    PaymentModificationNoOp,
}

impl From<sqlx::Error> for PaymentGatewayError {
    fn from(e: sqlx::Error) -> Self {
        PaymentGatewayError::DatabaseError(e.to_string())
    }
}
