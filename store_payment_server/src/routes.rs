//! Request handler definitions
//!
//! Define each route and it handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! A note about performance:
//! Since each worker thread processes its requests sequentially, handlers which block the current thread will cause the
//! current worker to stop processing new requests. Any long, non-cpu-bound operation (e.g. I/O, database operations,
//! calls to the payment processor) must be expressed as futures or asynchronous functions.
use actix_web::{get, http::StatusCode, web, HttpResponse, Responder};
use log::*;
use serde_json::json;
use store_payment_engine::{
    db_types::PaymentUpdate,
    traits::{PaymentManagement, PaymentProcessor},
    NewPaymentRequest,
    PaymentFlowApi,
};

use crate::{
    data_objects::{ApiResponse, SearchParams},
    errors::ServerError,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

/// Wraps extractor failures (malformed JSON, non-numeric ids, missing query parameters) in the standard error
/// envelope.
pub fn configure_extractors(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default().error_handler(|e, _| ServerError::InvalidRequestBody(e.to_string()).into()),
    )
    .app_data(web::PathConfig::default().error_handler(|e, _| ServerError::InvalidRequestPath(e.to_string()).into()))
    .app_data(web::QueryConfig::default().error_handler(|e, _| ServerError::InvalidQuery(e.to_string()).into()));
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Payments  ----------------------------------------------------
route!(create_payment => Post "/payments" impl PaymentManagement, PaymentProcessor);
/// Route handler for creating a payment
///
/// The card is charged through the processor, and the outcome is stored. A payment the processor declines is
/// still created: the response is a 201 with `status: "failed"` in the record. Only invalid requests (400) and
/// storage failures (500) are errors.
pub async fn create_payment<B, P>(
    body: web::Json<NewPaymentRequest>,
    api: web::Data<PaymentFlowApi<B, P>>,
) -> Result<HttpResponse, ServerError>
where
    B: PaymentManagement,
    P: PaymentProcessor,
{
    let request = body.into_inner();
    debug!("💻️ POST payment for order [{}] of user {}", request.order_id, request.user_id);
    let payment = api.create_payment(request).await?;
    let response = ApiResponse::success(StatusCode::CREATED, "the payment was successfully created", payment);
    Ok(HttpResponse::Created().json(response))
}

route!(payments => Get "/payments" impl PaymentManagement, PaymentProcessor);
pub async fn payments<B, P>(api: web::Data<PaymentFlowApi<B, P>>) -> Result<HttpResponse, ServerError>
where
    B: PaymentManagement,
    P: PaymentProcessor,
{
    debug!("💻️ GET payments");
    let payments = api.list_payments().await?;
    let message = if payments.is_empty() { "no payments found" } else { "the payments list" };
    Ok(HttpResponse::Ok().json(ApiResponse::success(StatusCode::OK, message, payments)))
}

route!(search_payments => Get "/payments/search" impl PaymentManagement, PaymentProcessor);
pub async fn search_payments<B, P>(
    query: web::Query<SearchParams>,
    api: web::Data<PaymentFlowApi<B, P>>,
) -> Result<HttpResponse, ServerError>
where
    B: PaymentManagement,
    P: PaymentProcessor,
{
    let SearchParams { filter, value } = query.into_inner();
    debug!("💻️ GET payments where {filter} = '{value}'");
    let payments = api.search_payments(&filter, &value).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(StatusCode::OK, "the payments list", payments)))
}

route!(payment_by_id => Get "/payments/{id}" impl PaymentManagement, PaymentProcessor);
pub async fn payment_by_id<B, P>(
    path: web::Path<i64>,
    api: web::Data<PaymentFlowApi<B, P>>,
) -> Result<HttpResponse, ServerError>
where
    B: PaymentManagement,
    P: PaymentProcessor,
{
    let id = path.into_inner();
    debug!("💻️ GET payment #{id}");
    let payment = api.fetch_payment(id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(StatusCode::OK, "the payment details", payment)))
}

route!(update_payment => Put "/payments/{id}" impl PaymentManagement, PaymentProcessor);
pub async fn update_payment<B, P>(
    path: web::Path<i64>,
    body: web::Json<PaymentUpdate>,
    api: web::Data<PaymentFlowApi<B, P>>,
) -> Result<HttpResponse, ServerError>
where
    B: PaymentManagement,
    P: PaymentProcessor,
{
    let id = path.into_inner();
    debug!("💻️ PUT payment #{id}");
    let payment = api.update_payment(id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(StatusCode::OK, "the payment was successfully updated", payment)))
}

route!(delete_payment => Delete "/payments/{id}" impl PaymentManagement, PaymentProcessor);
pub async fn delete_payment<B, P>(
    path: web::Path<i64>,
    api: web::Data<PaymentFlowApi<B, P>>,
) -> Result<HttpResponse, ServerError>
where
    B: PaymentManagement,
    P: PaymentProcessor,
{
    let id = path.into_inner();
    debug!("💻️ DELETE payment #{id}");
    api.delete_payment(id).await?;
    let response = ApiResponse::success(StatusCode::OK, "the payment was successfully deleted", json!({ "id": id }));
    Ok(HttpResponse::Ok().json(response))
}
