use crate::core::{AppError, Result};
use crate::modules::fees::{PricingTier, TierRateTable};
use serde::Deserialize;
use std::env;

pub mod server;
pub mod tiers;
pub mod upstream;

pub use server::ServerConfig;
pub use upstream::UpstreamConfig;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub fees: TierRateTable,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
    pub log_format: String,
    pub cors_origin: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub tenant_keys: Vec<TenantKeyConfig>,
    pub rate_limit_per_minute: u32,
}

/// One API key accepted by the service and the tenant it authenticates
#[derive(Debug, Clone, Deserialize)]
pub struct TenantKeyConfig {
    /// Argon2 PHC string of the API key
    pub key_hash: String,
    pub tenant_id: String,
    /// Tenant id in the rb-payload booking service
    pub rb_payload_tenant_id: String,
    pub tier: PricingTier,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let tenant_keys_raw = env::var("TENANT_API_KEYS")
            .map_err(|_| AppError::configuration("TENANT_API_KEYS not set"))?;

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "debug".to_string()),
                log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
                cors_origin: env::var("CORS_ORIGIN").ok(),
            },
            server: ServerConfig::from_env()?,
            upstream: UpstreamConfig::from_env()?,
            fees: tiers::tier_rates_from_env()?,
            security: SecurityConfig {
                tenant_keys: parse_tenant_keys(&tenant_keys_raw)?,
                rate_limit_per_minute: env::var("RATE_LIMIT_PER_MINUTE")
                    .unwrap_or_else(|_| "1000".to_string())
                    .parse()
                    .map_err(|_| AppError::configuration("Invalid RATE_LIMIT_PER_MINUTE"))?,
            },
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.upstream.validate()?;
        self.fees.validate()?;

        if self.security.tenant_keys.is_empty() {
            return Err(AppError::configuration(
                "TENANT_API_KEYS must contain at least one tenant",
            ));
        }

        for key in &self.security.tenant_keys {
            argon2::PasswordHash::new(&key.key_hash).map_err(|e| {
                AppError::configuration(format!(
                    "Invalid key_hash for tenant {}: {}",
                    key.tenant_id, e
                ))
            })?;
        }

        if self.security.rate_limit_per_minute == 0 {
            return Err(AppError::configuration("Rate limit must be greater than 0"));
        }

        Ok(())
    }
}

/// Parses the `TENANT_API_KEYS` JSON array
pub fn parse_tenant_keys(raw: &str) -> Result<Vec<TenantKeyConfig>> {
    serde_json::from_str(raw)
        .map_err(|e| AppError::configuration(format!("Invalid TENANT_API_KEYS: {}", e)))
}
