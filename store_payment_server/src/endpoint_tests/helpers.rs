use actix_web::{body::MessageBody, http::StatusCode, test, test::TestRequest, App};
use chrono::{TimeZone, Utc};
use epay_tools::{CardDetails, EpayConfig};
use log::debug;
use store_payment_engine::{
    db_types::{NewPayment, Payment},
    PaymentFlowApi,
    PaymentFlowConfig,
    SuccessCriterion,
};

use super::mocks::{MockPaymentManager, MockProcessor};
use crate::routes::{
    configure_extractors,
    CreatePaymentRoute,
    DeletePaymentRoute,
    PaymentByIdRoute,
    PaymentsRoute,
    SearchPaymentsRoute,
    UpdatePaymentRoute,
};

pub type MockFlowApi = PaymentFlowApi<MockPaymentManager, MockProcessor>;

pub fn flow_api(db: MockPaymentManager, processor: MockProcessor) -> MockFlowApi {
    let mut epay = EpayConfig::default();
    epay.terminal_id = "67e34d63-102f-4bd1-898e-370781d0074d".to_string();
    epay.test_card = Some(CardDetails::new("4405639704015096", "0125", "815", "JON JONSON"));
    PaymentFlowApi::new(db, processor, PaymentFlowConfig::from_epay_config(&epay, SuccessCriterion::default()))
}

pub fn stored_payment(id: i64, payment: NewPayment) -> Payment {
    Payment {
        id,
        user_id: payment.user_id,
        order_id: payment.order_id,
        amount: payment.amount,
        status: payment.status,
        created_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
    }
}

/// Sends the request to an app carrying every payments route, and returns the status and the decoded JSON body.
pub async fn send_request(req: TestRequest, api: MockFlowApi) -> (StatusCode, serde_json::Value) {
    let app = App::new()
        .app_data(actix_web::web::Data::new(api))
        .configure(configure_extractors)
        .service(CreatePaymentRoute::<MockPaymentManager, MockProcessor>::new())
        .service(PaymentsRoute::<MockPaymentManager, MockProcessor>::new())
        .service(SearchPaymentsRoute::<MockPaymentManager, MockProcessor>::new())
        .service(PaymentByIdRoute::<MockPaymentManager, MockProcessor>::new())
        .service(UpdatePaymentRoute::<MockPaymentManager, MockProcessor>::new())
        .service(DeletePaymentRoute::<MockPaymentManager, MockProcessor>::new());
    let service = test::init_service(app).await;
    debug!("Making request");
    let (_, res) = test::call_service(&service, req.to_request()).await.into_parts();
    let status = res.status();
    let body = res.into_body().try_into_bytes().unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}
