pub mod auth;
pub mod error_handler;
pub mod rate_limit;
pub mod request_id;

pub use auth::{hash_api_key, resolve_tenant, verify_api_key, ApiKeyAuth};
pub use error_handler::{extractor_configs, json_error_handler, query_error_handler};
pub use rate_limit::RateLimiter;
pub use request_id::{RequestId, RequestIdValue};
