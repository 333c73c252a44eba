use std::sync::Arc;

use actix_web::web;

use crate::config::Config;
use crate::middleware::extractor_configs;
use crate::modules::bookings::BookingSource;
use crate::modules::fees::{self, FeeCalculator, TierRateTable};
use crate::modules::health::{self, ServiceStatus};
use crate::modules::reports::{self, ReportAggregator, ReportService};

/// Shared handler state, built once and cloned into every worker
#[derive(Clone)]
pub struct AppState {
    pub fees: Arc<FeeCalculator>,
    pub reports: Arc<ReportService>,
    pub status: ServiceStatus,
}

impl AppState {
    pub fn new(rates: TierRateTable, source: Arc<dyn BookingSource>, status: ServiceStatus) -> Self {
        let calculator = FeeCalculator::new(rates);
        let aggregator = ReportAggregator::new(calculator.clone());

        Self {
            fees: Arc::new(calculator),
            reports: Arc::new(ReportService::new(source, aggregator)),
            status,
        }
    }

    pub fn from_config(config: &Config, source: Arc<dyn BookingSource>) -> Self {
        Self::new(
            config.fees.clone(),
            source,
            ServiceStatus {
                environment: config.app.env.clone(),
                upstream_url: config.upstream.base_url.clone(),
                tenants: config.security.tenant_keys.len(),
            },
        )
    }

    /// Registers app data and every route
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.fees.clone()))
            .app_data(web::Data::new(self.reports.clone()))
            .app_data(web::Data::new(self.status.clone()))
            .configure(extractor_configs)
            .configure(health::configure)
            .configure(fees::configure)
            .configure(reports::configure);
    }
}
