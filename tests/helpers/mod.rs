// Test helpers shared by the integration and contract suites.
//
// Each test binary pulls this in with `#[path = "../helpers/mod.rs"] mod helpers;`
// so not every item is used by every binary.
#![allow(dead_code)]

pub mod test_data;

pub use test_data::*;

use std::sync::{Arc, Mutex};

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{test, web, App};
use async_trait::async_trait;

use rentfee::app::AppState;
use rentfee::config::TenantKeyConfig;
use rentfee::core::Result;
use rentfee::middleware::{hash_api_key, ApiKeyAuth};
use rentfee::modules::bookings::{Booking, BookingSource, CatalogueItem, Customer, WhereClause};
use rentfee::modules::fees::{PricingTier, TierRateTable};
use rentfee::modules::health::ServiceStatus;

pub const TEST_API_KEY: &str = "test-key-bounce-kingdom";
pub const TEST_TENANT_ID: &str = "bounce-kingdom";
pub const TEST_RB_TENANT_ID: &str = "6";

/// Booking source serving fixed data for one rb-payload tenant
#[derive(Default)]
pub struct InMemorySource {
    pub bookings: Vec<Booking>,
    pub catalogue: Vec<CatalogueItem>,
    pub customers: Vec<Customer>,
    /// Filters received by `fetch_bookings`, in call order
    pub seen_filters: Mutex<Vec<WhereClause>>,
}

impl InMemorySource {
    pub fn with_bookings(bookings: Vec<Booking>) -> Self {
        Self {
            bookings,
            ..Self::default()
        }
    }

    fn owned<T: Clone>(&self, tenant_id: &str, items: &[T]) -> Vec<T> {
        if tenant_id == TEST_RB_TENANT_ID {
            items.to_vec()
        } else {
            Vec::new()
        }
    }
}

#[async_trait]
impl BookingSource for InMemorySource {
    async fn fetch_bookings(&self, tenant_id: &str, filter: &WhereClause) -> Result<Vec<Booking>> {
        if let Ok(mut seen) = self.seen_filters.lock() {
            seen.push(filter.clone());
        }
        Ok(self.owned(tenant_id, &self.bookings))
    }

    async fn fetch_catalogue(&self, tenant_id: &str) -> Result<Vec<CatalogueItem>> {
        Ok(self.owned(tenant_id, &self.catalogue))
    }

    async fn fetch_customers(&self, tenant_id: &str) -> Result<Vec<Customer>> {
        Ok(self.owned(tenant_id, &self.customers))
    }
}

/// Booking source whose every call fails like an unreachable upstream
pub struct FailingSource;

#[async_trait]
impl BookingSource for FailingSource {
    async fn fetch_bookings(&self, _tenant_id: &str, _filter: &WhereClause) -> Result<Vec<Booking>> {
        Err(rentfee::core::AppError::upstream("connection refused"))
    }

    async fn fetch_catalogue(&self, _tenant_id: &str) -> Result<Vec<CatalogueItem>> {
        Err(rentfee::core::AppError::upstream("connection refused"))
    }

    async fn fetch_customers(&self, _tenant_id: &str) -> Result<Vec<Customer>> {
        Err(rentfee::core::AppError::upstream("connection refused"))
    }
}

pub fn tenant_keys(tier: PricingTier) -> Vec<TenantKeyConfig> {
    vec![TenantKeyConfig {
        key_hash: hash_api_key(TEST_API_KEY).expect("hash test key"),
        tenant_id: TEST_TENANT_ID.to_string(),
        rb_payload_tenant_id: TEST_RB_TENANT_ID.to_string(),
        tier,
    }]
}

pub fn app_state(source: Arc<dyn BookingSource>) -> AppState {
    AppState::new(
        TierRateTable::default(),
        source,
        ServiceStatus {
            environment: "test".to_string(),
            upstream_url: "http://rb-payload.test".to_string(),
            tenants: 1,
        },
    )
}

/// App with authentication and every route, tenant on `tier`
pub fn build_app(
    source: Arc<dyn BookingSource>,
    tier: PricingTier,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = app_state(source);
    App::new()
        .wrap(ApiKeyAuth::new(tenant_keys(tier)))
        .configure(move |cfg: &mut web::ServiceConfig| state.configure(cfg))
}

/// Authenticated GET
pub fn get(uri: &str) -> test::TestRequest {
    test::TestRequest::get()
        .uri(uri)
        .insert_header(("X-API-Key", TEST_API_KEY))
}
