use actix_web::{http::StatusCode, test::TestRequest};
use epay_tools::{
    parse_public_key_pem,
    test_utils::TEST_RSA_PUBLIC_KEY_PEM,
    AccessToken,
    EpayApiError,
    PaymentOutcome,
    SubmissionResult,
};
use serde_json::json;
use store_payment_engine::{
    db_types::{NewPayment, PaymentSearchField, PaymentStatus},
    traits::PaymentGatewayError,
};

use super::{
    helpers::{flow_api, send_request, stored_payment},
    mocks::{MockPaymentManager, MockProcessor},
};

fn processor_with_submit_result(result: Result<SubmissionResult, EpayApiError>) -> MockProcessor {
    let mut processor = MockProcessor::new();
    processor
        .expect_acquire_token()
        .returning(|_| Ok(AccessToken::from_json(r#"{"access_token":"tok1"}"#).unwrap()));
    processor
        .expect_fetch_public_key()
        .returning(|| Ok(parse_public_key_pem(TEST_RSA_PUBLIC_KEY_PEM.as_bytes()).unwrap()));
    let mut result = Some(result);
    processor.expect_submit_payment().times(1).returning(move |_, _| result.take().unwrap());
    processor
}

fn accepting_db() -> MockPaymentManager {
    let mut db = MockPaymentManager::new();
    db.expect_insert_payment().times(1).returning(|p| Ok(stored_payment(1, p)));
    db
}

fn new_payment_body() -> serde_json::Value {
    json!({ "user_id": "u1", "order_id": "o1", "amount": 100.0 })
}

#[actix_web::test]
async fn create_payment() {
    let _ = env_logger::try_init().ok();
    let outcome = PaymentOutcome { status: Some("ok".into()), payment_id: Some("p1".into()), ..Default::default() };
    let processor = processor_with_submit_result(Ok(SubmissionResult { http_status: 200, outcome }));
    let req = TestRequest::post().uri("/payments").set_json(new_payment_body());
    let (status, body) = send_request(req, flow_api(accepting_db(), processor)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status_code"], 201);
    assert_eq!(body["message"], "the payment was successfully created");
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["status"], "success");
    assert_eq!(body["data"]["user_id"], "u1");
    assert_eq!(body["data"]["amount"], 100.0);
    assert!(body["error"].is_null());
}

#[actix_web::test]
async fn declined_payment_is_still_created() {
    let _ = env_logger::try_init().ok();
    let processor = processor_with_submit_result(Err(EpayApiError::SubmitRejected {
        status: 500,
        outcome: None,
        body: "internal error".into(),
    }));
    let req = TestRequest::post().uri("/payments").set_json(new_payment_body());
    let (status, body) = send_request(req, flow_api(accepting_db(), processor)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["status"], "failed");
}

#[actix_web::test]
async fn create_payment_validation() {
    let _ = env_logger::try_init().ok();
    for body in [
        json!({ "user_id": "u1", "order_id": "o1", "amount": 0 }),
        json!({ "user_id": "", "order_id": "o1", "amount": 10 }),
        json!({ "user_id": "u1", "order_id": "", "amount": 10 }),
        json!({ "user_id": "u1", "amount": 10 }),
        json!({ "user_id": "u1", "order_id": "o1", "amount": "ten" }),
    ] {
        let mut db = MockPaymentManager::new();
        db.expect_insert_payment().never();
        let mut processor = MockProcessor::new();
        processor.expect_acquire_token().never();
        let req = TestRequest::post().uri("/payments").set_json(body);
        let (status, body) = send_request(req, flow_api(db, processor)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status_code"], 400);
        assert_eq!(body["message"], "fields provided are wrong");
        assert!(body["data"].is_null());
        assert!(body["error"].is_string());
    }
}

#[actix_web::test]
async fn create_payment_storage_failure() {
    let _ = env_logger::try_init().ok();
    let outcome = PaymentOutcome { status: Some("ok".into()), ..Default::default() };
    let processor = processor_with_submit_result(Ok(SubmissionResult { http_status: 200, outcome }));
    let mut db = MockPaymentManager::new();
    db.expect_insert_payment().times(1).returning(|_| Err(PaymentGatewayError::DatabaseError("disk I/O error".into())));
    let req = TestRequest::post().uri("/payments").set_json(new_payment_body());
    let (status, body) = send_request(req, flow_api(db, processor)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status_code"], 500);
    assert!(body["error"].as_str().unwrap().contains("disk I/O error"));
}

#[actix_web::test]
async fn list_payments() {
    let _ = env_logger::try_init().ok();
    let mut db = MockPaymentManager::new();
    db.expect_fetch_payments().times(1).returning(|| {
        Ok(vec![
            stored_payment(1, NewPayment::new("u1", "o1", 100.0, PaymentStatus::Success)),
            stored_payment(2, NewPayment::new("u2", "o2", 50.0, PaymentStatus::Failed)),
        ])
    });
    let (status, body) = send_request(TestRequest::get().uri("/payments"), flow_api(db, MockProcessor::new())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"][1]["status"], "failed");
    assert_eq!(body["data"][0]["created_at"], "2024-06-01T12:00:00Z");
}

#[actix_web::test]
async fn list_no_payments() {
    let _ = env_logger::try_init().ok();
    let mut db = MockPaymentManager::new();
    db.expect_fetch_payments().times(1).returning(|| Ok(vec![]));
    let (status, body) = send_request(TestRequest::get().uri("/payments"), flow_api(db, MockProcessor::new())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["message"], "no payments found");
}

#[actix_web::test]
async fn fetch_payment() {
    let _ = env_logger::try_init().ok();
    let mut db = MockPaymentManager::new();
    db.expect_fetch_payment()
        .withf(|id| *id == 7)
        .returning(|id| Ok(Some(stored_payment(id, NewPayment::new("u1", "o1", 100.0, PaymentStatus::Success)))));
    let (status, body) = send_request(TestRequest::get().uri("/payments/7"), flow_api(db, MockProcessor::new())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], 7);
    assert_eq!(body["message"], "the payment details");
}

#[actix_web::test]
async fn fetch_unknown_payment() {
    let _ = env_logger::try_init().ok();
    let mut db = MockPaymentManager::new();
    db.expect_fetch_payment().returning(|_| Ok(None));
    let (status, body) = send_request(TestRequest::get().uri("/payments/7"), flow_api(db, MockProcessor::new())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status_code"], 404);
    assert_eq!(body["message"], "payment not found");
}

#[actix_web::test]
async fn fetch_payment_with_invalid_id() {
    let _ = env_logger::try_init().ok();
    let mut db = MockPaymentManager::new();
    db.expect_fetch_payment().never();
    let (status, body) = send_request(TestRequest::get().uri("/payments/abc"), flow_api(db, MockProcessor::new())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status_code"], 400);
}

#[actix_web::test]
async fn update_payment() {
    let _ = env_logger::try_init().ok();
    let mut db = MockPaymentManager::new();
    db.expect_update_payment()
        .withf(|id, update| *id == 3 && update.status == Some(PaymentStatus::Success) && update.amount.is_none())
        .times(1)
        .returning(|id, _| Ok(Some(stored_payment(id, NewPayment::new("u1", "o1", 100.0, PaymentStatus::Success)))));
    let req = TestRequest::put().uri("/payments/3").set_json(json!({ "status": "success" }));
    let (status, body) = send_request(req, flow_api(db, MockProcessor::new())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "success");
}

#[actix_web::test]
async fn update_payment_errors() {
    let _ = env_logger::try_init().ok();
    let mut db = MockPaymentManager::new();
    db.expect_update_payment().times(1).returning(|_, _| Ok(None));
    let api = flow_api(db, MockProcessor::new());
    let req = TestRequest::put().uri("/payments/3").set_json(json!({ "amount": 20.0 }));
    let (status, _) = send_request(req, api).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    for body in [json!({}), json!({ "amount": -1 }), json!({ "status": "pending" })] {
        let mut db = MockPaymentManager::new();
        db.expect_update_payment().never();
        let req = TestRequest::put().uri("/payments/3").set_json(body);
        let (status, body) = send_request(req, flow_api(db, MockProcessor::new())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status_code"], 400);
    }
}

#[actix_web::test]
async fn delete_payment() {
    let _ = env_logger::try_init().ok();
    let mut db = MockPaymentManager::new();
    db.expect_delete_payment().withf(|id| *id == 5).times(1).returning(|_| Ok(true));
    let (status, body) =
        send_request(TestRequest::delete().uri("/payments/5"), flow_api(db, MockProcessor::new())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], 5);

    let mut db = MockPaymentManager::new();
    db.expect_delete_payment().times(1).returning(|_| Ok(false));
    let (status, _) = send_request(TestRequest::delete().uri("/payments/5"), flow_api(db, MockProcessor::new())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn search_payments() {
    let _ = env_logger::try_init().ok();
    let mut db = MockPaymentManager::new();
    db.expect_search_payments()
        .withf(|field, value| *field == PaymentSearchField::UserId && value == "u1")
        .times(1)
        .returning(|_, _| Ok(vec![stored_payment(1, NewPayment::new("u1", "o1", 100.0, PaymentStatus::Success))]));
    let req = TestRequest::get().uri("/payments/search?filter=user_id&value=u1");
    let (status, body) = send_request(req, flow_api(db, MockProcessor::new())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["order_id"], "o1");
}

#[actix_web::test]
async fn search_with_unknown_filter() {
    let _ = env_logger::try_init().ok();
    for uri in ["/payments/search?filter=amount&value=100", "/payments/search?filter=user_id"] {
        let mut db = MockPaymentManager::new();
        db.expect_search_payments().never();
        let (status, body) = send_request(TestRequest::get().uri(uri), flow_api(db, MockProcessor::new())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "invalid search query");
    }
}
