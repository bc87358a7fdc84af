//! # Store payment engine public API
//!
//! [`payment_flow_api`] is the entry point. A [`payment_flow_api::PaymentFlowApi`] is created from a repository
//! backend (anything implementing [`crate::traits::PaymentManagement`]) and a card processor (anything implementing
//! [`crate::traits::PaymentProcessor`]):
//!
//! ```rust,ignore
//! use epay_tools::{EpayApi, EpayConfig};
//! use store_payment_engine::{PaymentFlowApi, PaymentFlowConfig, SqliteDatabase, SuccessCriterion};
//! let db = SqliteDatabase::new_with_url(...).await?;
//! let epay = EpayApi::new(EpayConfig::new_from_env_or_default())?;
//! let config = PaymentFlowConfig::from_epay_config(epay.config(), SuccessCriterion::default());
//! let api = PaymentFlowApi::new(db, epay, config);
//! let payment = api.create_payment(request).await?;
//! ```
pub mod errors;
pub mod payment_flow_api;
pub mod payment_objects;
