//! # Backend interfaces
//!
//! The payment flow talks to two collaborators, both hidden behind traits so they can be swapped or mocked:
//!
//! * [`PaymentManagement`] is the repository of payment records. [`crate::SqliteDatabase`] implements it.
//! * [`PaymentProcessor`] is the external card processor. [`epay_tools::EpayApi`] implements it.
mod payment_management;
mod payment_processor;

pub use payment_management::{PaymentGatewayError, PaymentManagement};
pub use payment_processor::PaymentProcessor;
