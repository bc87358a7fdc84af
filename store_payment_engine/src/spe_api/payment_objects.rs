use epay_tools::{CardDetails, EpayConfig, SubmissionResult};
use serde::Deserialize;

use crate::{db_types::PaymentUpdate, spe_api::errors::PaymentFlowError};

//--------------------------------------  NewPaymentRequest  ---------------------------------------------------------
/// A request to charge a user for an order.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPaymentRequest {
    pub user_id: String,
    pub order_id: String,
    pub amount: f64,
    /// The card to charge. When absent, the configured test card is used.
    #[serde(default)]
    pub card: Option<CardDetails>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// Overrides the configured payment description
    #[serde(default)]
    pub description: Option<String>,
}

impl NewPaymentRequest {
    pub fn new<S: Into<String>>(user_id: S, order_id: S, amount: f64) -> Self {
        Self {
            user_id: user_id.into(),
            order_id: order_id.into(),
            amount,
            card: None,
            email: None,
            phone: None,
            description: None,
        }
    }

    pub fn with_card(mut self, card: CardDetails) -> Self {
        self.card = Some(card);
        self
    }

    pub fn validate(&self) -> Result<(), PaymentFlowError> {
        if self.user_id.trim().is_empty() {
            return Err(PaymentFlowError::InvalidUserId);
        }
        if self.order_id.trim().is_empty() {
            return Err(PaymentFlowError::InvalidOrderId);
        }
        validate_amount(self.amount)
    }
}

pub(crate) fn validate_amount(amount: f64) -> Result<(), PaymentFlowError> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(PaymentFlowError::InvalidAmount(amount))
    }
}

pub(crate) fn validate_update(update: &PaymentUpdate) -> Result<(), PaymentFlowError> {
    if update.is_empty() {
        return Err(PaymentFlowError::EmptyUpdate);
    }
    if update.user_id.as_ref().is_some_and(|s| s.trim().is_empty()) {
        return Err(PaymentFlowError::InvalidUserId);
    }
    if update.order_id.as_ref().is_some_and(|s| s.trim().is_empty()) {
        return Err(PaymentFlowError::InvalidOrderId);
    }
    match update.amount {
        Some(amount) => validate_amount(amount),
        None => Ok(()),
    }
}

//--------------------------------------  SuccessCriterion   ---------------------------------------------------------
/// Decides whether a submission the processor answered counts as a successful payment.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SuccessCriterion {
    /// HTTP 200 is a success, whatever the processor's own status says.
    #[default]
    HttpStatus,
    /// HTTP 200, and the processor's status must be one of `accepted` (compared case-insensitively).
    HttpStatusAndOutcome { accepted: Vec<String> },
}

impl SuccessCriterion {
    /// Builds the criterion from a list of accepted processor statuses. An empty list means [`Self::HttpStatus`].
    pub fn from_accepted_statuses(accepted: Vec<String>) -> Self {
        if accepted.is_empty() {
            Self::HttpStatus
        } else {
            Self::HttpStatusAndOutcome { accepted }
        }
    }

    pub fn is_success(&self, result: &SubmissionResult) -> bool {
        if result.http_status != 200 {
            return false;
        }
        match self {
            SuccessCriterion::HttpStatus => true,
            SuccessCriterion::HttpStatusAndOutcome { accepted } => result
                .outcome
                .status
                .as_deref()
                .is_some_and(|status| accepted.iter().any(|a| a.eq_ignore_ascii_case(status))),
        }
    }
}

//--------------------------------------  PaymentFlowConfig  ---------------------------------------------------------
/// The merchant settings the orchestrator needs to build a submission.
#[derive(Debug, Clone)]
pub struct PaymentFlowConfig {
    pub terminal_id: String,
    pub currency: String,
    pub account_id: String,
    pub description: String,
    pub post_link: String,
    pub failure_post_link: String,
    pub card_save: bool,
    pub test_card: Option<CardDetails>,
    pub success_criterion: SuccessCriterion,
}

impl PaymentFlowConfig {
    pub fn from_epay_config(config: &EpayConfig, success_criterion: SuccessCriterion) -> Self {
        Self {
            terminal_id: config.terminal_id.clone(),
            currency: config.currency.clone(),
            account_id: config.account_id.clone(),
            description: config.description.clone(),
            post_link: config.post_link.clone(),
            failure_post_link: config.failure_post_link.clone(),
            card_save: config.card_save,
            test_card: config.test_card.clone(),
            success_criterion,
        }
    }
}
