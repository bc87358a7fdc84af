use std::env;

use epay_tools::EpayConfig;
use log::*;
use store_common::parse_list;
use store_payment_engine::SuccessCriterion;

const DEFAULT_STORE_HOST: &str = "127.0.0.1";
const DEFAULT_STORE_PORT: u16 = 8004;
const DEFAULT_DATABASE_URL: &str = "sqlite://data/store_payments.db";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Processor endpoints, credentials and merchant settings
    pub epay: EpayConfig,
    /// How processor replies are judged. Set `EPAY_SUCCESS_STATUSES` to require specific processor statuses.
    pub success_criterion: SuccessCriterion,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_STORE_HOST.to_string(),
            port: DEFAULT_STORE_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            epay: EpayConfig::default(),
            success_criterion: SuccessCriterion::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("STORE_HOST").ok().unwrap_or_else(|| DEFAULT_STORE_HOST.into());
        let port = env::var("STORE_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for STORE_PORT. {e} Using the default, {DEFAULT_STORE_PORT}, \
                         instead."
                    );
                    DEFAULT_STORE_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_STORE_PORT);
        let database_url = env::var("STORE_DATABASE_URL").ok().unwrap_or_else(|| {
            warn!("🪛️ STORE_DATABASE_URL is not set. Using the default, {DEFAULT_DATABASE_URL}.");
            DEFAULT_DATABASE_URL.to_string()
        });
        let epay = EpayConfig::new_from_env_or_default();
        let success_criterion = success_criterion_from_env();
        Self { host, port, database_url, epay, success_criterion }
    }
}

fn success_criterion_from_env() -> SuccessCriterion {
    let accepted = env::var("EPAY_SUCCESS_STATUSES").map(|s| parse_list(&s)).unwrap_or_default();
    let criterion = SuccessCriterion::from_accepted_statuses(accepted);
    match &criterion {
        SuccessCriterion::HttpStatus => {
            info!("🪛️ Any HTTP 200 reply from the processor will be treated as a successful payment.")
        },
        SuccessCriterion::HttpStatusAndOutcome { accepted } => info!(
            "🪛️ Payments are successful when the processor replies with HTTP 200 and one of these statuses: {}",
            accepted.join(", ")
        ),
    }
    criterion
}
