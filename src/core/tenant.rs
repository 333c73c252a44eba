use actix_web::{dev::Payload, Error, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::config::TenantKeyConfig;
use crate::core::AppError;
use crate::modules::fees::PricingTier;

/// The authenticated tenant of the current request.
///
/// Inserted into request extensions by `ApiKeyAuth` and extracted by handlers,
/// so nothing about the caller lives in process-wide state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantContext {
    pub tenant_id: String,
    /// Tenant id used when querying rb-payload
    pub rb_payload_tenant_id: String,
    pub tier: PricingTier,
}

impl TenantContext {
    pub fn new(
        tenant_id: impl Into<String>,
        rb_payload_tenant_id: impl Into<String>,
        tier: PricingTier,
    ) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            rb_payload_tenant_id: rb_payload_tenant_id.into(),
            tier,
        }
    }
}

impl From<&TenantKeyConfig> for TenantContext {
    fn from(key: &TenantKeyConfig) -> Self {
        Self::new(&key.tenant_id, &key.rb_payload_tenant_id, key.tier)
    }
}

impl FromRequest for TenantContext {
    type Error = Error;
    type Future = Ready<std::result::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<TenantContext>()
                .cloned()
                .ok_or_else(|| Error::from(AppError::unauthorized("Missing tenant context"))),
        )
    }
}
