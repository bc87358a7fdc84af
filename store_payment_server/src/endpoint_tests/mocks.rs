use epay_tools::{AccessToken, EpayApiError, PaymentSubmission, RsaPublicKey, SubmissionResult, TokenRequest};
use mockall::mock;
use store_payment_engine::{
    db_types::{NewPayment, Payment, PaymentSearchField, PaymentUpdate},
    traits::{PaymentGatewayError, PaymentManagement, PaymentProcessor},
};

mock! {
    pub PaymentManager {}
    impl Clone for PaymentManager {
        fn clone(&self) -> Self;
    }
    impl PaymentManagement for PaymentManager {
        async fn insert_payment(&self, payment: NewPayment) -> Result<Payment, PaymentGatewayError>;
        async fn fetch_payments(&self) -> Result<Vec<Payment>, PaymentGatewayError>;
        async fn fetch_payment(&self, id: i64) -> Result<Option<Payment>, PaymentGatewayError>;
        async fn update_payment(&self, id: i64, update: PaymentUpdate) -> Result<Option<Payment>, PaymentGatewayError>;
        async fn delete_payment(&self, id: i64) -> Result<bool, PaymentGatewayError>;
        async fn search_payments(&self, field: PaymentSearchField, value: &str) -> Result<Vec<Payment>, PaymentGatewayError>;
    }
}

mock! {
    pub Processor {}
    impl PaymentProcessor for Processor {
        async fn acquire_token(&self, request: &TokenRequest) -> Result<AccessToken, EpayApiError>;
        async fn fetch_public_key(&self) -> Result<RsaPublicKey, EpayApiError>;
        async fn submit_payment(&self, token: &AccessToken, submission: &PaymentSubmission) -> Result<SubmissionResult, EpayApiError>;
    }
}
