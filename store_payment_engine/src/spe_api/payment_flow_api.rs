use std::fmt::Debug;

use epay_tools::{
    encrypt_cryptogram,
    CardCryptogram,
    CardDetails,
    EpayApiError,
    PaymentSubmission,
    SubmissionResult,
    TokenRequest,
};
use log::*;
use serde_json::json;

use crate::{
    db_types::{NewPayment, Payment, PaymentSearchField, PaymentStatus, PaymentUpdate},
    helpers::new_invoice_id,
    spe_api::{
        errors::PaymentFlowError,
        payment_objects::{validate_update, NewPaymentRequest, PaymentFlowConfig},
    },
    traits::{PaymentManagement, PaymentProcessor},
};

/// `PaymentFlowApi` charges cards through the processor and manages the resulting payment records.
///
/// Creating a payment is the only operation that talks to the processor. Every other method is a plain pass-through
/// to the repository.
pub struct PaymentFlowApi<B, P> {
    db: B,
    processor: P,
    config: PaymentFlowConfig,
}

impl<B, P> Debug for PaymentFlowApi<B, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PaymentFlowApi")
    }
}

impl<B, P> PaymentFlowApi<B, P> {
    pub fn new(db: B, processor: P, config: PaymentFlowConfig) -> Self {
        Self { db, processor, config }
    }

    pub fn config(&self) -> &PaymentFlowConfig {
        &self.config
    }
}

impl<B, P> PaymentFlowApi<B, P>
where
    B: PaymentManagement,
    P: PaymentProcessor,
{
    /// Charges the user for the order and records the attempt.
    ///
    /// Exactly one payment record is written for every request that passes validation, with status `success` or
    /// `failed`. Processor failures are logged and recorded as `failed`; they are not returned as errors. The only
    /// errors are validation errors (nothing is written) and failures to write the record.
    ///
    /// If the returned future is dropped before it completes, outstanding processor calls are abandoned and nothing is
    /// written.
    pub async fn create_payment(&self, request: NewPaymentRequest) -> Result<Payment, PaymentFlowError> {
        request.validate()?;
        let invoice_id = new_invoice_id();
        let status = match request.card.as_ref().or(self.config.test_card.as_ref()) {
            None => {
                warn!("🔄️💳️ No card was supplied for order [{}] and no test card is configured", request.order_id);
                PaymentStatus::Failed
            },
            Some(card) => match self.charge(&request, card, &invoice_id).await {
                Ok(result) if self.config.success_criterion.is_success(&result) => PaymentStatus::Success,
                Ok(result) => {
                    warn!(
                        "🔄️💳️ Processor answered invoice {invoice_id} for order [{}] with HTTP {} and status '{}'. \
                         Recording the payment as failed.",
                        request.order_id,
                        result.http_status,
                        result.outcome.status.as_deref().unwrap_or("none")
                    );
                    PaymentStatus::Failed
                },
                Err(e) => {
                    warn!(
                        "🔄️💳️ Payment of invoice {invoice_id} for order [{}] failed ({}). {e}",
                        request.order_id,
                        e.category()
                    );
                    PaymentStatus::Failed
                },
            },
        };
        let payment = NewPayment::new(request.user_id, request.order_id, request.amount, status);
        let payment = self.db.insert_payment(payment).await.map_err(|e| {
            error!("🔄️💳️ Could not record the outcome of invoice {invoice_id}. {e}");
            PaymentFlowError::from(e)
        })?;
        info!(
            "🔄️💳️ Payment #{} for order [{}] of user {} recorded as {}",
            payment.id, payment.order_id, payment.user_id, payment.status
        );
        Ok(payment)
    }

    async fn charge(
        &self,
        request: &NewPaymentRequest,
        card: &CardDetails,
        invoice_id: &str,
    ) -> Result<SubmissionResult, EpayApiError> {
        let token_request = TokenRequest {
            invoice_id: invoice_id.to_string(),
            amount: request.amount,
            currency: self.config.currency.clone(),
        };
        let (token, key) =
            tokio::try_join!(self.processor.acquire_token(&token_request), self.processor.fetch_public_key())?;
        let cryptogram = encrypt_cryptogram(&CardCryptogram::new(card, &self.config.terminal_id), &key)?;
        let submission = self.build_submission(request, card, cryptogram, invoice_id);
        self.processor.submit_payment(&token, &submission).await
    }

    fn build_submission(
        &self,
        request: &NewPaymentRequest,
        card: &CardDetails,
        cryptogram: String,
        invoice_id: &str,
    ) -> PaymentSubmission {
        let statement = json!({ "statement": { "name": card.holder_name, "invoiceID": invoice_id } });
        PaymentSubmission {
            amount: request.amount,
            currency: self.config.currency.clone(),
            name: card.holder_name.clone(),
            cryptogram,
            invoice_id: invoice_id.to_string(),
            invoice_id_alt: request.order_id.clone(),
            description: request.description.clone().unwrap_or_else(|| self.config.description.clone()),
            account_id: self.config.account_id.clone(),
            email: request.email.clone().unwrap_or_default(),
            phone: request.phone.clone().unwrap_or_default(),
            card_save: self.config.card_save,
            data: statement.to_string(),
            post_link: self.config.post_link.clone(),
            failure_post_link: self.config.failure_post_link.clone(),
        }
    }

    pub async fn list_payments(&self) -> Result<Vec<Payment>, PaymentFlowError> {
        let payments = self.db.fetch_payments().await?;
        trace!("🔄️💳️ Fetched {} payments", payments.len());
        Ok(payments)
    }

    pub async fn fetch_payment(&self, id: i64) -> Result<Payment, PaymentFlowError> {
        self.db.fetch_payment(id).await?.ok_or(PaymentFlowError::PaymentNotFound(id))
    }

    pub async fn update_payment(&self, id: i64, update: PaymentUpdate) -> Result<Payment, PaymentFlowError> {
        validate_update(&update)?;
        let payment = self.db.update_payment(id, update).await?.ok_or(PaymentFlowError::PaymentNotFound(id))?;
        info!("🔄️💳️ Payment #{id} updated");
        Ok(payment)
    }

    pub async fn delete_payment(&self, id: i64) -> Result<(), PaymentFlowError> {
        if self.db.delete_payment(id).await? {
            info!("🔄️💳️ Payment #{id} deleted");
            Ok(())
        } else {
            Err(PaymentFlowError::PaymentNotFound(id))
        }
    }

    /// Fetches the payments whose `field` equals `value`. `field` must be one of `user_id`, `order_id` or `status`.
    pub async fn search_payments(&self, field: &str, value: &str) -> Result<Vec<Payment>, PaymentFlowError> {
        let field = field
            .parse::<PaymentSearchField>()
            .map_err(|e| PaymentFlowError::InvalidSearchField(e.to_string()))?;
        let payments = self.db.search_payments(field, value).await?;
        debug!("🔄️💳️ {} payments have {field} = '{value}'", payments.len());
        Ok(payments)
    }
}
