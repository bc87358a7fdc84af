use std::{env, time::Duration};

use log::*;
use store_common::{parse_boolean_flag, Secret};

use crate::CardDetails;

const DEFAULT_TOKEN_URL: &str = "https://testoauth.homebank.kz/epay2/oauth2/token";
const DEFAULT_PUBLIC_KEY_URL: &str = "https://testepay.homebank.kz/api/public.rsa";
const DEFAULT_PAYMENT_URL: &str = "https://testepay.homebank.kz/api/payment/cryptopay";
const DEFAULT_SCOPE: &str = "webapi usermanagement email_send verification statement statistics payment";
const DEFAULT_CURRENCY: &str = "KZT";
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct EpayConfig {
    /// OAuth2 client-credentials endpoint
    pub token_url: String,
    /// Endpoint serving the processor's PEM-encoded RSA public key
    pub public_key_url: String,
    /// Card payment endpoint that accepts cryptograms
    pub payment_url: String,
    pub client_id: String,
    pub client_secret: Secret<String>,
    /// Merchant terminal identifier assigned by the processor
    pub terminal_id: String,
    pub scope: String,
    pub currency: String,
    /// The merchant account id reported with each payment
    pub account_id: String,
    pub description: String,
    pub post_link: String,
    pub failure_post_link: String,
    pub card_save: bool,
    /// Applies to every outbound request individually.
    pub request_timeout: Duration,
    /// Sandbox card used when a payment request does not carry its own card.
    pub test_card: Option<CardDetails>,
}

impl Default for EpayConfig {
    fn default() -> Self {
        Self {
            token_url: DEFAULT_TOKEN_URL.to_string(),
            public_key_url: DEFAULT_PUBLIC_KEY_URL.to_string(),
            payment_url: DEFAULT_PAYMENT_URL.to_string(),
            client_id: String::default(),
            client_secret: Secret::default(),
            terminal_id: String::default(),
            scope: DEFAULT_SCOPE.to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
            account_id: String::default(),
            description: "Store payment".to_string(),
            post_link: String::default(),
            failure_post_link: String::default(),
            card_save: false,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            test_card: None,
        }
    }
}

impl EpayConfig {
    /// Builds a configuration that points all three processor endpoints at `base_url`, using the default paths
    /// `/oauth2/token`, `/public.rsa` and `/payment/cryptopay`. Handy for local mocks of the processor.
    pub fn with_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            token_url: format!("{base}/oauth2/token"),
            public_key_url: format!("{base}/public.rsa"),
            payment_url: format!("{base}/payment/cryptopay"),
            ..Default::default()
        }
    }

    pub fn new_from_env_or_default() -> Self {
        let defaults = Self::default();
        let token_url = env::var("EPAY_TOKEN_URL").unwrap_or_else(|_| {
            warn!("EPAY_TOKEN_URL not set, using the sandbox endpoint {DEFAULT_TOKEN_URL}");
            defaults.token_url.clone()
        });
        let public_key_url = env::var("EPAY_PUBLIC_KEY_URL").unwrap_or_else(|_| {
            warn!("EPAY_PUBLIC_KEY_URL not set, using the sandbox endpoint {DEFAULT_PUBLIC_KEY_URL}");
            defaults.public_key_url.clone()
        });
        let payment_url = env::var("EPAY_PAYMENT_URL").unwrap_or_else(|_| {
            warn!("EPAY_PAYMENT_URL not set, using the sandbox endpoint {DEFAULT_PAYMENT_URL}");
            defaults.payment_url.clone()
        });
        let client_id = env::var("EPAY_CLIENT_ID").unwrap_or_else(|_| {
            warn!("EPAY_CLIENT_ID not set. Token requests will most likely be rejected.");
            defaults.client_id.clone()
        });
        let client_secret = Secret::new(env::var("EPAY_CLIENT_SECRET").unwrap_or_else(|_| {
            warn!("EPAY_CLIENT_SECRET not set. Token requests will most likely be rejected.");
            String::default()
        }));
        let terminal_id = env::var("EPAY_TERMINAL_ID").unwrap_or_else(|_| {
            warn!("EPAY_TERMINAL_ID not set. Token requests will most likely be rejected.");
            String::default()
        });
        let scope = env::var("EPAY_SCOPE").unwrap_or(defaults.scope.clone());
        let currency = env::var("EPAY_CURRENCY").unwrap_or(defaults.currency.clone());
        let account_id = env::var("EPAY_ACCOUNT_ID").unwrap_or_default();
        let description = env::var("EPAY_DESCRIPTION").unwrap_or(defaults.description.clone());
        let post_link = env::var("EPAY_POST_LINK").unwrap_or_default();
        let failure_post_link = env::var("EPAY_FAILURE_POST_LINK").unwrap_or_default();
        let card_save = parse_boolean_flag(env::var("EPAY_CARD_SAVE").ok(), false);
        let request_timeout = env::var("EPAY_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|s| {
                s.parse::<u64>()
                    .map_err(|e| warn!("Invalid value for EPAY_REQUEST_TIMEOUT_SECS ({s}). {e}"))
                    .ok()
            })
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT);
        let test_card = test_card_from_env();
        Self {
            token_url,
            public_key_url,
            payment_url,
            client_id,
            client_secret,
            terminal_id,
            scope,
            currency,
            account_id,
            description,
            post_link,
            failure_post_link,
            card_save,
            request_timeout,
            test_card,
        }
    }
}

fn test_card_from_env() -> Option<CardDetails> {
    let pan = env::var("EPAY_TEST_CARD_PAN").ok();
    let expiry = env::var("EPAY_TEST_CARD_EXPIRY").ok();
    let cvc = env::var("EPAY_TEST_CARD_CVC").ok();
    match (pan, expiry, cvc) {
        (Some(pan), Some(expiry), Some(cvc)) => {
            let holder_name = env::var("EPAY_TEST_CARD_HOLDER").unwrap_or_default();
            info!("A sandbox test card is configured. Requests without card details will be charged to it.");
            Some(CardDetails::new(pan, expiry, cvc, holder_name))
        },
        (None, None, None) => None,
        _ => {
            warn!(
                "The sandbox test card is only partially configured. Set all of EPAY_TEST_CARD_PAN, \
                 EPAY_TEST_CARD_EXPIRY and EPAY_TEST_CARD_CVC to use it."
            );
            None
        },
    }
}
