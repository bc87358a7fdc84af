//! Store Payment Engine
//!
//! This library holds the payment logic of the store's payments service. It is independent of the HTTP layer.
//!
//! The library is divided into three sections:
//! 1. Payment record storage ([`mod@sqlite`]). The data types stored in the database are defined in the [`db_types`]
//!    module and are public. Backends implement [`traits::PaymentManagement`].
//! 2. The card processor seam ([`traits::PaymentProcessor`]), implemented for [`epay_tools::EpayApi`].
//! 3. The payment engine public API ([`mod@spe_api`]). [`PaymentFlowApi`] charges a card through the processor and
//!    records the outcome of every attempt, and exposes the payment records to the server.
pub mod db_types;
pub mod helpers;
mod spe_api;
#[cfg(feature = "sqlite")]
pub mod sqlite;
pub mod traits;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;
pub use spe_api::{
    errors::PaymentFlowError,
    payment_flow_api::PaymentFlowApi,
    payment_objects,
    payment_objects::{NewPaymentRequest, PaymentFlowConfig, SuccessCriterion},
};
pub use traits::{PaymentGatewayError, PaymentManagement, PaymentProcessor};
