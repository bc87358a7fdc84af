use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use epay_tools::EpayApi;
use log::info;
use store_payment_engine::{PaymentFlowApi, PaymentFlowConfig, SqliteDatabase};

use crate::{
    config::ServerConfig,
    errors::ServerError,
    routes::{
        configure_extractors,
        health,
        CreatePaymentRoute,
        DeletePaymentRoute,
        PaymentByIdRoute,
        PaymentsRoute,
        SearchPaymentsRoute,
        UpdatePaymentRoute,
    },
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    db.migrate().await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let epay = EpayApi::new(config.epay.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    info!("💻️ Payments will be submitted to {}", config.epay.payment_url);
    let srv = create_server_instance(config, db, epay)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(config: ServerConfig, db: SqliteDatabase, epay: EpayApi) -> Result<Server, ServerError> {
    let flow_config = PaymentFlowConfig::from_epay_config(&config.epay, config.success_criterion.clone());
    let srv = HttpServer::new(move || {
        let payments_api = PaymentFlowApi::new(db.clone(), epay.clone(), flow_config.clone());
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("store::access_log"))
            .app_data(web::Data::new(payments_api))
            .configure(configure_extractors)
            .service(health)
            .service(CreatePaymentRoute::<SqliteDatabase, EpayApi>::new())
            .service(PaymentsRoute::<SqliteDatabase, EpayApi>::new())
            // Must be registered before /payments/{id}
            .service(SearchPaymentsRoute::<SqliteDatabase, EpayApi>::new())
            .service(PaymentByIdRoute::<SqliteDatabase, EpayApi>::new())
            .service(UpdatePaymentRoute::<SqliteDatabase, EpayApi>::new())
            .service(DeletePaymentRoute::<SqliteDatabase, EpayApi>::new())
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
