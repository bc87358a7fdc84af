use std::fmt::Display;

use thiserror::Error;

use crate::PaymentOutcome;

#[derive(Debug, Error)]
pub enum EpayApiError {
    #[error("Could not initialize client: {0}")]
    Initialization(String),
    #[error("Token request failed: {0}")]
    TokenRequest(String),
    #[error("Token endpoint returned HTTP {status}. {body}")]
    TokenHttp { status: u16, body: String },
    #[error("Could not decode access token: {0}")]
    TokenDecode(String),
    #[error("Could not fetch the processor public key: {0}")]
    KeyFetch(String),
    #[error("No valid PEM block containing the public key was found: {0}")]
    KeyDecode(String),
    #[error("The public key is not a valid PKIX public key: {0}")]
    KeyParse(String),
    #[error("The public key is not an RSA key. Algorithm: {0}")]
    KeyType(String),
    #[error("Could not encrypt the card cryptogram: {0}")]
    Encryption(String),
    #[error("Payment request failed: {0}")]
    SubmitTransport(String),
    #[error("Could not decode the payment response: {0}")]
    SubmitDecode(String),
    #[error("The processor rejected the payment with HTTP {status}. {body}")]
    SubmitRejected { status: u16, outcome: Option<PaymentOutcome>, body: String },
}

/// Coarse classification of processor failures, used when logging the cause of a failed payment attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Transport,
    HttpStatus,
    Decode,
    KeyType,
    EncryptionCapacity,
}

impl Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Transport => write!(f, "transport"),
            ErrorCategory::HttpStatus => write!(f, "http-status"),
            ErrorCategory::Decode => write!(f, "decode"),
            ErrorCategory::KeyType => write!(f, "key-type"),
            ErrorCategory::EncryptionCapacity => write!(f, "encryption"),
        }
    }
}

impl EpayApiError {
    pub fn category(&self) -> ErrorCategory {
        use EpayApiError::*;
        match self {
            Initialization(_) | TokenRequest(_) | KeyFetch(_) | SubmitTransport(_) => ErrorCategory::Transport,
            TokenHttp { .. } | SubmitRejected { .. } => ErrorCategory::HttpStatus,
            TokenDecode(_) | KeyDecode(_) | KeyParse(_) | SubmitDecode(_) => ErrorCategory::Decode,
            KeyType(_) => ErrorCategory::KeyType,
            Encryption(_) => ErrorCategory::EncryptionCapacity,
        }
    }
}
