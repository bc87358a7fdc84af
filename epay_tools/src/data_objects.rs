use log::warn;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use store_common::Secret;

use crate::EpayApiError;

//--------------------------------------     CardDetails       --------------------------------------------------------
/// The card a payment is charged to. Everything except the holder's name is kept in a [`Secret`], so it is redacted
/// in logs and zeroed when dropped.
#[derive(Debug, Clone, Deserialize)]
pub struct CardDetails {
    /// Primary account number
    pub pan: Secret<String>,
    /// Expiry date in MMYY format
    pub expiry: Secret<String>,
    pub cvc: Secret<String>,
    #[serde(default)]
    pub holder_name: String,
}

impl CardDetails {
    pub fn new<S: Into<String>>(pan: S, expiry: S, cvc: S, holder_name: S) -> Self {
        Self {
            pan: Secret::new(pan.into()),
            expiry: Secret::new(expiry.into()),
            cvc: Secret::new(cvc.into()),
            holder_name: holder_name.into(),
        }
    }
}

//--------------------------------------     TokenRequest      --------------------------------------------------------
/// The per-payment part of a token request. Client credentials, scope and terminal come from the [`crate::EpayConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct TokenRequest {
    pub invoice_id: String,
    pub amount: f64,
    pub currency: String,
}

//--------------------------------------     AccessToken       --------------------------------------------------------
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub access_token: Secret<String>,
    /// Declared lifetime of the token, in seconds
    pub expires_in: Option<u64>,
    pub scope: Vec<String>,
    pub refresh_token: Option<Secret<String>>,
    pub token_type: Option<String>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<Value>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    scope: Option<String>,
    #[serde(default)]
    token_type: Option<String>,
}

impl AccessToken {
    /// Decodes the token endpoint's JSON response. The body must contain a non-empty `access_token` string.
    /// `expires_in` is sent as a string by the processor, but plain numbers are accepted too.
    pub fn from_json(body: &str) -> Result<Self, EpayApiError> {
        let response =
            serde_json::from_str::<TokenResponse>(body).map_err(|e| EpayApiError::TokenDecode(e.to_string()))?;
        if response.access_token.is_empty() {
            return Err(EpayApiError::TokenDecode("access_token is empty".to_string()));
        }
        let expires_in = match response.expires_in {
            Some(Value::Number(n)) => n.as_u64(),
            Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
            Some(Value::Null) | None => None,
            Some(v) => {
                warn!("Ignoring unexpected expires_in value in token response: {v}");
                None
            },
        };
        let scope = response.scope.map(|s| s.split_whitespace().map(String::from).collect()).unwrap_or_default();
        Ok(Self {
            access_token: Secret::new(response.access_token),
            expires_in,
            scope,
            refresh_token: response.refresh_token.filter(|t| !t.is_empty()).map(Secret::new),
            token_type: response.token_type,
        })
    }

    pub fn bearer(&self) -> &str {
        self.access_token.reveal().as_str()
    }
}

//--------------------------------------  PaymentSubmission    --------------------------------------------------------
/// The body posted to the processor's payment endpoint.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PaymentSubmission {
    /// Whole amounts go on the wire as integers (`100`, not `100.0`)
    #[serde(serialize_with = "serialize_amount")]
    pub amount: f64,
    pub currency: String,
    /// Cardholder name
    pub name: String,
    /// Base64-encoded RSA cryptogram of the card fields
    pub cryptogram: String,
    #[serde(rename = "invoiceID")]
    pub invoice_id: String,
    #[serde(rename = "invoiceIdAlt")]
    pub invoice_id_alt: String,
    pub description: String,
    #[serde(rename = "accountID")]
    pub account_id: String,
    pub email: String,
    pub phone: String,
    #[serde(rename = "cardSave")]
    pub card_save: bool,
    /// Free-form statement metadata, sent as a JSON-encoded string
    pub data: String,
    #[serde(rename = "postLink")]
    pub post_link: String,
    #[serde(rename = "failurePostLink")]
    pub failure_post_link: String,
}

// Largest integer an f64 holds exactly
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

fn serialize_amount<S: Serializer>(amount: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if amount.fract() == 0.0 && amount.abs() <= MAX_EXACT_INTEGER {
        serializer.serialize_i64(*amount as i64)
    } else {
        serializer.serialize_f64(*amount)
    }
}

//--------------------------------------    PaymentOutcome     --------------------------------------------------------
/// The processor's decoded reply to a payment submission. Every field is optional: the processor leaves fields out
/// of error replies.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct PaymentOutcome {
    pub status: Option<String>,
    pub message: Option<String>,
    pub payment_id: Option<String>,
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub invoice_id: Option<String>,
}

impl PaymentOutcome {
    /// Decodes the payment endpoint's reply. The body must be a JSON object; its fields are read leniently, so ids
    /// may be strings or numbers and `amount` may be a number or a numeric string. Fields of any other type are
    /// logged and left empty.
    pub fn from_json(body: &str) -> Result<Self, EpayApiError> {
        let value = serde_json::from_str::<Value>(body).map_err(|e| EpayApiError::SubmitDecode(e.to_string()))?;
        let fields = match value {
            Value::Object(fields) => fields,
            other => return Err(EpayApiError::SubmitDecode(format!("expected a JSON object, got {other}"))),
        };
        Ok(Self {
            status: text_field(&fields, "status"),
            message: text_field(&fields, "message"),
            payment_id: text_field(&fields, "payment_id"),
            amount: amount_field(&fields, "amount"),
            currency: text_field(&fields, "currency"),
            invoice_id: text_field(&fields, "invoice_id"),
        })
    }
}

fn text_field(fields: &Map<String, Value>, name: &str) -> Option<String> {
    match fields.get(name)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => None,
        v => {
            warn!("Ignoring unexpected {name} value in payment reply: {v}");
            None
        },
    }
}

fn amount_field(fields: &Map<String, Value>, name: &str) -> Option<f64> {
    match fields.get(name)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Null => None,
        v => {
            warn!("Ignoring unexpected {name} value in payment reply: {v}");
            None
        },
    }
}

/// A submission the processor answered with HTTP 200.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionResult {
    pub http_status: u16,
    pub outcome: PaymentOutcome,
}
