use crate::config::TenantKeyConfig;
use crate::core::{AppError, TenantContext};
use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage,
};
use argon2::{Argon2, PasswordHash, PasswordVerifier};
use futures_util::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;
use tracing::{debug, warn};

/// Paths served without an API key
const PUBLIC_PATHS: [&str; 3] = ["/", "/health", "/ready"];

/// API key authentication middleware
pub struct ApiKeyAuth {
    keys: Arc<Vec<TenantKeyConfig>>,
}

impl ApiKeyAuth {
    pub fn new(keys: Vec<TenantKeyConfig>) -> Self {
        Self {
            keys: Arc::new(keys),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ApiKeyAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = ApiKeyAuthMiddleware<S>;
    type Future = Ready<std::result::Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ApiKeyAuthMiddleware {
            service: Rc::new(service),
            keys: self.keys.clone(),
        }))
    }
}

pub struct ApiKeyAuthMiddleware<S> {
    service: Rc<S>,
    keys: Arc<Vec<TenantKeyConfig>>,
}

impl<S, B> Service<ServiceRequest> for ApiKeyAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, std::result::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let svc = self.service.clone();
        let keys = self.keys.clone();

        Box::pin(async move {
            if PUBLIC_PATHS.contains(&req.path()) {
                return svc.call(req).await;
            }

            let api_key = req
                .headers()
                .get("X-API-Key")
                .and_then(|h| h.to_str().ok())
                .map(str::to_string)
                .ok_or_else(|| Error::from(AppError::unauthorized("Missing X-API-Key header")))?;

            // Argon2 verification is CPU bound
            let tenant = web::block(move || resolve_tenant(&keys, &api_key))
                .await
                .map_err(|e| Error::from(AppError::internal(format!("Key verification failed: {}", e))))?
                .map_err(Error::from)?;

            let Some(tenant) = tenant else {
                warn!(path = %req.path(), "Rejected request with unknown API key");
                return Err(Error::from(AppError::unauthorized("Invalid API key")));
            };

            debug!(tenant_id = %tenant.tenant_id, tier = %tenant.tier, "Authenticated tenant");
            req.extensions_mut().insert(tenant);

            svc.call(req).await
        })
    }
}

/// Finds the tenant whose key hash matches `api_key`
pub fn resolve_tenant(
    keys: &[TenantKeyConfig],
    api_key: &str,
) -> crate::core::Result<Option<TenantContext>> {
    for key in keys {
        if verify_api_key(api_key, &key.key_hash)? {
            return Ok(Some(TenantContext::from(key)));
        }
    }
    Ok(None)
}

/// Helper function to hash API keys using Argon2
pub fn hash_api_key(api_key: &str) -> crate::core::Result<String> {
    use argon2::password_hash::{rand_core::OsRng, PasswordHasher, SaltString};

    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(api_key.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::internal(format!("Failed to hash API key: {}", e)))
}

/// Helper function to verify API keys using Argon2
pub fn verify_api_key(api_key: &str, hash: &str) -> crate::core::Result<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::configuration(format!("Invalid key hash format: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(api_key.as_bytes(), &parsed_hash)
        .is_ok())
}
