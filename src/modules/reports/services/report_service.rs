use std::sync::Arc;

use tracing::{info, warn};

use crate::core::{Currency, Result, TenantContext};
use crate::modules::bookings::{BookingSource, WhereClause};
use crate::modules::reports::models::{
    BookingReport, CustomerReport, InventoryReport, ReportRange, RevenueReport,
};
use crate::modules::reports::services::ReportAggregator;

/// Fetches a tenant's bookings from the booking source and aggregates them.
///
/// Every report is computed from a single fetch; an upstream failure fails the
/// whole report and nothing is retried.
pub struct ReportService {
    source: Arc<dyn BookingSource>,
    aggregator: ReportAggregator,
}

impl ReportService {
    pub fn new(source: Arc<dyn BookingSource>, aggregator: ReportAggregator) -> Self {
        Self { source, aggregator }
    }

    pub fn aggregator(&self) -> &ReportAggregator {
        &self.aggregator
    }

    /// Revenue report at the tenant's tier
    pub async fn revenue(
        &self,
        tenant: &TenantContext,
        range: &ReportRange,
        filter: &WhereClause,
        currency: Currency,
    ) -> Result<RevenueReport> {
        let bookings = self
            .source
            .fetch_bookings(&tenant.rb_payload_tenant_id, filter)
            .await?;

        let report = self
            .aggregator
            .revenue(&bookings, range, tenant.tier, currency)?;

        info!(
            tenant_id = %tenant.tenant_id,
            report = "revenue",
            bookings = bookings.len(),
            total = report.total,
            platform_fees = report.platform_fees,
            "Generated report"
        );

        Ok(report)
    }

    pub async fn bookings(
        &self,
        tenant: &TenantContext,
        range: &ReportRange,
        filter: &WhereClause,
    ) -> Result<BookingReport> {
        let bookings = self
            .source
            .fetch_bookings(&tenant.rb_payload_tenant_id, filter)
            .await?;

        let report = self.aggregator.bookings(&bookings, range)?;

        info!(
            tenant_id = %tenant.tenant_id,
            report = "bookings",
            bookings = bookings.len(),
            total = report.total,
            "Generated report"
        );

        Ok(report)
    }

    /// Inventory utilization; bookings and the catalogue are fetched concurrently
    pub async fn inventory(
        &self,
        tenant: &TenantContext,
        range: &ReportRange,
        filter: &WhereClause,
    ) -> Result<InventoryReport> {
        let tenant_id = tenant.rb_payload_tenant_id.as_str();
        let (bookings, catalogue) = tokio::try_join!(
            self.source.fetch_bookings(tenant_id, filter),
            self.source.fetch_catalogue(tenant_id),
        )?;

        if catalogue.is_empty() {
            warn!(tenant_id = %tenant.tenant_id, "Tenant has no catalogue items");
        }

        let report = self.aggregator.inventory(&bookings, &catalogue, range)?;

        info!(
            tenant_id = %tenant.tenant_id,
            report = "inventory",
            bookings = bookings.len(),
            items = catalogue.len(),
            "Generated report"
        );

        Ok(report)
    }

    /// Customer report; bookings and customers are fetched concurrently
    pub async fn customers(
        &self,
        tenant: &TenantContext,
        range: &ReportRange,
        filter: &WhereClause,
    ) -> Result<CustomerReport> {
        let tenant_id = tenant.rb_payload_tenant_id.as_str();
        let (bookings, customers) = tokio::try_join!(
            self.source.fetch_bookings(tenant_id, filter),
            self.source.fetch_customers(tenant_id),
        )?;

        let report = self.aggregator.customers(&bookings, &customers, range)?;

        info!(
            tenant_id = %tenant.tenant_id,
            report = "customers",
            bookings = bookings.len(),
            customers = customers.len(),
            total_customers = report.total_customers,
            "Generated report"
        );

        Ok(report)
    }
}
