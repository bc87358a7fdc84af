use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct ConversionError(String);

//--------------------------------------   PaymentStatus     ---------------------------------------------------------
/// The terminal state of a payment attempt. Every attempt that gets past request validation is recorded with
/// exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum PaymentStatus {
    Success,
    Failed,
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Success => write!(f, "success"),
            PaymentStatus::Failed => write!(f, "failed"),
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(Self::Success),
            "failed" => Ok(Self::Failed),
            s => Err(ConversionError(format!("Invalid payment status: {s}"))),
        }
    }
}

//--------------------------------------      Payment        ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Payment {
    pub id: i64,
    pub user_id: String,
    pub order_id: String,
    pub amount: f64,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

//--------------------------------------     NewPayment      ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq)]
pub struct NewPayment {
    pub user_id: String,
    pub order_id: String,
    pub amount: f64,
    pub status: PaymentStatus,
}

impl NewPayment {
    pub fn new<S: Into<String>>(user_id: S, order_id: S, amount: f64, status: PaymentStatus) -> Self {
        Self { user_id: user_id.into(), order_id: order_id.into(), amount, status }
    }
}

//--------------------------------------    PaymentUpdate    ---------------------------------------------------------
/// A partial change to a stored payment record. `None` fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentUpdate {
    pub user_id: Option<String>,
    pub order_id: Option<String>,
    pub amount: Option<f64>,
    pub status: Option<PaymentStatus>,
}

impl PaymentUpdate {
    pub fn is_empty(&self) -> bool {
        self.user_id.is_none() && self.order_id.is_none() && self.amount.is_none() && self.status.is_none()
    }

    pub fn with_status(mut self, status: PaymentStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_order_id<S: Into<String>>(mut self, order_id: S) -> Self {
        self.order_id = Some(order_id.into());
        self
    }

    pub fn with_user_id<S: Into<String>>(mut self, user_id: S) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}

//--------------------------------------  PaymentSearchField ---------------------------------------------------------
/// The columns payment records can be searched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentSearchField {
    UserId,
    OrderId,
    Status,
}

impl PaymentSearchField {
    pub fn column(&self) -> &'static str {
        match self {
            PaymentSearchField::UserId => "user_id",
            PaymentSearchField::OrderId => "order_id",
            PaymentSearchField::Status => "status",
        }
    }
}

impl Display for PaymentSearchField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.column())
    }
}

impl FromStr for PaymentSearchField {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user_id" => Ok(Self::UserId),
            "order_id" => Ok(Self::OrderId),
            "status" => Ok(Self::Status),
            s => Err(ConversionError(format!("Payments cannot be searched by '{s}'"))),
        }
    }
}
