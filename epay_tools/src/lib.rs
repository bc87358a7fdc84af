//! # ePay tools
//!
//! A small client for the ePay card processor used by the store's payments service. It covers the four calls a card
//! payment needs:
//!
//! 1. [`EpayApi::acquire_token`] obtains an OAuth2 client-credentials bearer token.
//! 2. [`EpayApi::fetch_public_key`] downloads the processor's RSA public key.
//! 3. [`encrypt_cryptogram`] encrypts the card fields into a cryptogram with that key.
//! 4. [`EpayApi::submit_payment`] posts the payment, carrying the cryptogram, with the bearer token attached.
//!
//! None of the calls retry or cache anything. Sequencing them, and deciding what a failure means, is up to the caller.
mod api;
mod config;
mod cryptogram;
mod data_objects;
mod error;
mod public_key;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

pub use api::EpayApi;
pub use config::EpayConfig;
pub use cryptogram::{encrypt_cryptogram, encrypt_cryptogram_with_rng, CardCryptogram, PKCS1_V15_OVERHEAD};
pub use data_objects::{AccessToken, CardDetails, PaymentOutcome, PaymentSubmission, SubmissionResult, TokenRequest};
pub use error::{EpayApiError, ErrorCategory};
pub use public_key::parse_public_key_pem;
pub use rsa::RsaPublicKey;
