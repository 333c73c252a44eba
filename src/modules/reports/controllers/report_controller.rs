use std::sync::Arc;

use actix_web::{web, HttpResponse};
use tracing::error;

use crate::core::{AppError, Currency, Result, TenantContext};
use crate::modules::bookings::WhereClause;
use crate::modules::reports::models::ReportRange;
use crate::modules::reports::services::ReportService;

type QueryPairs = web::Query<Vec<(String, String)>>;

/// Parsed query string shared by every report endpoint.
///
/// Accepts `startDate`/`start_date`, `endDate`/`end_date`, `currency` and any
/// number of `where[field][op]` filters. Any other key is rejected.
#[derive(Debug)]
pub struct ReportQuery {
    pub range: ReportRange,
    pub currency: Currency,
    pub filter: WhereClause,
}

impl ReportQuery {
    pub fn from_pairs(pairs: &[(String, String)]) -> Result<Self> {
        let mut start = None;
        let mut end = None;
        let mut currency = Currency::default();
        let mut filter = WhereClause::new();

        for (key, value) in pairs {
            match key.as_str() {
                "startDate" | "start_date" => start = Some(value.as_str()),
                "endDate" | "end_date" => end = Some(value.as_str()),
                "currency" => currency = value.parse()?,
                k if k.starts_with("where[") => filter.push_caller_filter(k, value)?,
                other => {
                    return Err(AppError::invalid_argument(format!(
                        "Unknown query parameter: {}",
                        other
                    )))
                }
            }
        }

        Ok(Self {
            range: ReportRange::from_query(start, end)?,
            currency,
            filter,
        })
    }
}

fn log_failure<'a>(report: &'static str, tenant: &'a TenantContext) -> impl Fn(&AppError) + 'a {
    move |e| error!(tenant_id = %tenant.tenant_id, report, "Failed to generate report: {}", e)
}

/// GET /reports/revenue
pub async fn revenue_report(
    service: web::Data<Arc<ReportService>>,
    tenant: TenantContext,
    query: QueryPairs,
) -> std::result::Result<HttpResponse, AppError> {
    let query = ReportQuery::from_pairs(&query)?;
    let report = service
        .revenue(&tenant, &query.range, &query.filter, query.currency)
        .await
        .inspect_err(log_failure("revenue", &tenant))?;

    Ok(HttpResponse::Ok().json(report))
}

/// GET /reports/bookings
pub async fn bookings_report(
    service: web::Data<Arc<ReportService>>,
    tenant: TenantContext,
    query: QueryPairs,
) -> std::result::Result<HttpResponse, AppError> {
    let query = ReportQuery::from_pairs(&query)?;
    let report = service
        .bookings(&tenant, &query.range, &query.filter)
        .await
        .inspect_err(log_failure("bookings", &tenant))?;

    Ok(HttpResponse::Ok().json(report))
}

/// GET /reports/inventory
pub async fn inventory_report(
    service: web::Data<Arc<ReportService>>,
    tenant: TenantContext,
    query: QueryPairs,
) -> std::result::Result<HttpResponse, AppError> {
    let query = ReportQuery::from_pairs(&query)?;
    let report = service
        .inventory(&tenant, &query.range, &query.filter)
        .await
        .inspect_err(log_failure("inventory", &tenant))?;

    Ok(HttpResponse::Ok().json(report))
}

/// GET /reports/customers
pub async fn customers_report(
    service: web::Data<Arc<ReportService>>,
    tenant: TenantContext,
    query: QueryPairs,
) -> std::result::Result<HttpResponse, AppError> {
    let query = ReportQuery::from_pairs(&query)?;
    let report = service
        .customers(&tenant, &query.range, &query.filter)
        .await
        .inspect_err(log_failure("customers", &tenant))?;

    Ok(HttpResponse::Ok().json(report))
}

/// Configure routes for reports module
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/reports")
            .route("/revenue", web::get().to(revenue_report))
            .route("/bookings", web::get().to(bookings_report))
            .route("/inventory", web::get().to(inventory_report))
            .route("/customers", web::get().to(customers_report)),
    );
}
