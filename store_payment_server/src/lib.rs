//! # Store payments server
//! This crate hosts the REST server of the store's payments service. It is responsible for:
//! Accepting payment requests from the API gateway and running them through the payment flow.
//! Serving the stored payment records to the other store services.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/health`: A health check route that returns a 200 OK response.
//! * `POST /payments`: Charges a card and records the outcome.
//! * `GET /payments`, `GET /payments/{id}`, `PUT /payments/{id}`, `DELETE /payments/{id}`: Payment records.
//! * `GET /payments/search?filter={field}&value={value}`: Payments where `field` (`user_id`, `order_id` or `status`)
//!   equals `value`.
pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
