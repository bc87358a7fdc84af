use std::sync::Arc;

use log::*;
use reqwest::{multipart::Form, Client, StatusCode};
use rsa::RsaPublicKey;

use crate::{
    config::EpayConfig,
    public_key::parse_public_key_pem,
    AccessToken,
    EpayApiError,
    PaymentOutcome,
    PaymentSubmission,
    SubmissionResult,
    TokenRequest,
};

/// Client for the processor's HTTP endpoints. Cloning is cheap; clones share the underlying connection pool.
#[derive(Clone)]
pub struct EpayApi {
    config: EpayConfig,
    client: Arc<Client>,
}

impl EpayApi {
    pub fn new(config: EpayConfig) -> Result<Self, EpayApiError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| EpayApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    pub fn config(&self) -> &EpayConfig {
        &self.config
    }

    /// Requests a client-credentials access token for a single payment attempt.
    ///
    /// The request is a multipart form. There is exactly one attempt; the token is not cached.
    pub async fn acquire_token(&self, request: &TokenRequest) -> Result<AccessToken, EpayApiError> {
        let form = Form::new()
            .text("grant_type", "client_credentials")
            .text("scope", self.config.scope.clone())
            .text("client_id", self.config.client_id.clone())
            .text("client_secret", self.config.client_secret.reveal().clone())
            .text("invoiceID", request.invoice_id.clone())
            .text("amount", request.amount.to_string())
            .text("currency", request.currency.clone())
            .text("terminal", self.config.terminal_id.clone());
        debug!("Requesting access token for invoice {}", request.invoice_id);
        let response = self
            .client
            .post(&self.config.token_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| EpayApiError::TokenRequest(e.to_string()))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| EpayApiError::TokenRequest(e.to_string()))?;
        if status != StatusCode::OK {
            return Err(EpayApiError::TokenHttp { status: status.as_u16(), body });
        }
        let token = AccessToken::from_json(&body)?;
        trace!("Access token acquired for invoice {}. Expires in {:?}s", request.invoice_id, token.expires_in);
        Ok(token)
    }

    /// Downloads and parses the processor's RSA public key.
    pub async fn fetch_public_key(&self) -> Result<RsaPublicKey, EpayApiError> {
        trace!("Fetching processor public key from {}", self.config.public_key_url);
        let response = self
            .client
            .get(&self.config.public_key_url)
            .send()
            .await
            .map_err(|e| EpayApiError::KeyFetch(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(EpayApiError::KeyFetch(format!("Public key endpoint returned HTTP {status}")));
        }
        let pem = response.bytes().await.map_err(|e| EpayApiError::KeyFetch(e.to_string()))?;
        let key = parse_public_key_pem(&pem)?;
        debug!("Processor public key fetched");
        Ok(key)
    }

    /// Posts the payment to the processor.
    ///
    /// Any status other than 200 is returned as [`EpayApiError::SubmitRejected`], along with the decoded outcome when
    /// the body could be decoded. The outcome's own `status` is passed through untouched.
    pub async fn submit_payment(
        &self,
        token: &AccessToken,
        submission: &PaymentSubmission,
    ) -> Result<SubmissionResult, EpayApiError> {
        debug!("Submitting payment for invoice {}", submission.invoice_id);
        let response = self
            .client
            .post(&self.config.payment_url)
            .bearer_auth(token.bearer())
            .json(submission)
            .send()
            .await
            .map_err(|e| EpayApiError::SubmitTransport(e.to_string()))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| EpayApiError::SubmitTransport(e.to_string()))?;
        if status != StatusCode::OK {
            let outcome = PaymentOutcome::from_json(&body).ok();
            return Err(EpayApiError::SubmitRejected { status: status.as_u16(), outcome, body });
        }
        let outcome = PaymentOutcome::from_json(&body)?;
        info!(
            "Processor accepted invoice {}. Status: {}, payment id: {}",
            submission.invoice_id,
            outcome.status.as_deref().unwrap_or("none"),
            outcome.payment_id.as_deref().unwrap_or("none")
        );
        Ok(SubmissionResult { http_status: status.as_u16(), outcome })
    }
}
