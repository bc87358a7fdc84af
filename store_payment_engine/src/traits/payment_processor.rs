use epay_tools::{AccessToken, EpayApi, EpayApiError, PaymentSubmission, RsaPublicKey, SubmissionResult, TokenRequest};

/// The three remote calls a card payment is made of.
#[allow(async_fn_in_trait)]
pub trait PaymentProcessor {
    async fn acquire_token(&self, request: &TokenRequest) -> Result<AccessToken, EpayApiError>;

    async fn fetch_public_key(&self) -> Result<RsaPublicKey, EpayApiError>;

    async fn submit_payment(
        &self,
        token: &AccessToken,
        submission: &PaymentSubmission,
    ) -> Result<SubmissionResult, EpayApiError>;
}

impl PaymentProcessor for EpayApi {
    async fn acquire_token(&self, request: &TokenRequest) -> Result<AccessToken, EpayApiError> {
        EpayApi::acquire_token(self, request).await
    }

    async fn fetch_public_key(&self) -> Result<RsaPublicKey, EpayApiError> {
        EpayApi::fetch_public_key(self).await
    }

    async fn submit_payment(
        &self,
        token: &AccessToken,
        submission: &PaymentSubmission,
    ) -> Result<SubmissionResult, EpayApiError> {
        EpayApi::submit_payment(self, token, submission).await
    }
}
