use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, error};

use crate::config::UpstreamConfig;
use crate::core::{AppError, Result};
use crate::modules::bookings::models::booking::{BookingDoc, CatalogueDoc, CustomerDoc};
use crate::modules::bookings::models::{Booking, CatalogueItem, Customer};
use crate::modules::bookings::repositories::WhereClause;

/// Read access to a tenant's bookings, service catalogue and customers.
///
/// Implementations return the full candidate set in one call; callers do not page.
#[async_trait]
pub trait BookingSource: Send + Sync {
    async fn fetch_bookings(&self, tenant_id: &str, filter: &WhereClause) -> Result<Vec<Booking>>;

    async fn fetch_catalogue(&self, tenant_id: &str) -> Result<Vec<CatalogueItem>>;

    async fn fetch_customers(&self, tenant_id: &str) -> Result<Vec<Customer>>;
}

#[derive(Debug, Deserialize)]
struct DocsResponse<T> {
    #[serde(default = "Vec::new")]
    docs: Vec<T>,
}

/// rb-payload REST client
pub struct RbPayloadClient {
    client: Client,
    config: UpstreamConfig,
}

impl RbPayloadClient {
    pub fn new(config: UpstreamConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    async fn fetch_docs<T: DeserializeOwned>(
        &self,
        collection: &str,
        filter: &WhereClause,
        limit: u32,
    ) -> Result<Vec<T>> {
        let url = format!("{}/api/{}", self.config.base_url, collection);

        let mut query = filter.to_query_pairs();
        query.push(("limit".to_string(), limit.to_string()));

        debug!(collection, filter = %filter, limit, "Fetching from rb-payload");

        let response = self
            .client
            .get(&url)
            .header("X-API-Key", &self.config.api_key)
            .query(&query)
            .send()
            .await
            .map_err(|e| {
                error!(collection, "rb-payload request failed: {}", e);
                AppError::upstream(format!("rb-payload {} request failed: {}", collection, e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(collection, status = %status, "rb-payload returned an error");
            return Err(AppError::upstream(format!(
                "rb-payload {} returned {}: {}",
                collection, status, body
            )));
        }

        let payload: DocsResponse<T> = response.json().await.map_err(|e| {
            AppError::upstream(format!("Failed to parse rb-payload {} response: {}", collection, e))
        })?;

        debug!(collection, count = payload.docs.len(), "Fetched from rb-payload");

        Ok(payload.docs)
    }
}

#[async_trait]
impl BookingSource for RbPayloadClient {
    async fn fetch_bookings(&self, tenant_id: &str, filter: &WhereClause) -> Result<Vec<Booking>> {
        let clause = WhereClause::for_tenant(tenant_id).merge(filter);
        let docs: Vec<BookingDoc> = self
            .fetch_docs("bookings", &clause, self.config.bookings_limit)
            .await?;

        docs.into_iter().map(Booking::try_from).collect()
    }

    async fn fetch_catalogue(&self, tenant_id: &str) -> Result<Vec<CatalogueItem>> {
        let docs: Vec<CatalogueDoc> = self
            .fetch_docs(
                "services",
                &WhereClause::for_tenant(tenant_id),
                self.config.services_limit,
            )
            .await?;

        docs.into_iter().map(CatalogueItem::try_from).collect()
    }

    async fn fetch_customers(&self, tenant_id: &str) -> Result<Vec<Customer>> {
        let docs: Vec<CustomerDoc> = self
            .fetch_docs(
                "customers",
                &WhereClause::for_tenant(tenant_id),
                self.config.customers_limit,
            )
            .await?;

        docs.into_iter().map(Customer::try_from).collect()
    }
}
