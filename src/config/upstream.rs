use std::env;
use std::time::Duration;

use crate::core::{AppError, Result};

const DEFAULT_RB_PAYLOAD_URL: &str = "https://reusablebook-payload-production.up.railway.app";

/// Connection settings for the rb-payload booking service
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub api_key: String,
    pub bookings_limit: u32,
    pub services_limit: u32,
    pub customers_limit: u32,
    pub timeout: Duration,
}

impl UpstreamConfig {
    pub fn from_env() -> Result<Self> {
        Ok(UpstreamConfig {
            base_url: env::var("RB_PAYLOAD_URL")
                .unwrap_or_else(|_| DEFAULT_RB_PAYLOAD_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            api_key: env::var("RB_PAYLOAD_API_KEY")
                .map_err(|_| AppError::configuration("RB_PAYLOAD_API_KEY not set"))?,
            bookings_limit: parse_var("RB_PAYLOAD_BOOKINGS_LIMIT", 1000)?,
            services_limit: parse_var("RB_PAYLOAD_SERVICES_LIMIT", 100)?,
            customers_limit: parse_var("RB_PAYLOAD_CUSTOMERS_LIMIT", 1000)?,
            timeout: Duration::from_secs(parse_var("RB_PAYLOAD_TIMEOUT_SECS", 30)?),
        })
    }

    /// Settings pointing at an arbitrary base url, used by tests and tooling
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            bookings_limit: 1000,
            services_limit: 100,
            customers_limit: 1000,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(AppError::configuration("RB_PAYLOAD_API_KEY is empty"));
        }
        if self.bookings_limit == 0 || self.services_limit == 0 || self.customers_limit == 0 {
            return Err(AppError::configuration(
                "rb-payload page limits must be greater than 0",
            ));
        }
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| AppError::configuration(format!("Invalid {}", name))),
        Err(_) => Ok(default),
    }
}
