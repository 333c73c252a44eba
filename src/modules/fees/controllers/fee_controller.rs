use std::sync::Arc;

use actix_web::{web, HttpResponse};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Cents, Currency, TenantContext};
use crate::modules::fees::models::{PaymentCalculation, PlatformFeeConfig, PricingTier};
use crate::modules::fees::services::FeeCalculator;

/// Body of POST /fees/calculate
#[derive(Debug, Deserialize)]
pub struct CalculatePaymentRequest {
    pub subtotal: Cents,
    /// Defaults to the calling tenant's tier
    #[serde(default)]
    pub tier: Option<String>,
    #[serde(default)]
    pub deposit_percentage: Option<Decimal>,
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CalculatePaymentResponse {
    pub tier: PricingTier,
    #[serde(flatten)]
    pub calculation: PaymentCalculation,
    pub formatted: FormattedAmounts,
}

#[derive(Debug, Serialize)]
pub struct FormattedAmounts {
    pub subtotal: String,
    pub platform_fee: String,
    pub stripe_fee: String,
    pub tenant_receives: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deposit_amount: Option<String>,
}

impl FormattedAmounts {
    fn new(calculation: &PaymentCalculation, currency: Currency) -> Self {
        Self {
            subtotal: currency.format_cents(calculation.subtotal),
            platform_fee: currency.format_cents(calculation.platform_fee),
            stripe_fee: currency.format_cents(calculation.stripe_fee),
            tenant_receives: currency.format_cents(calculation.tenant_receives),
            deposit_amount: calculation.deposit_amount.map(|d| currency.format_cents(d)),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TierRatesResponse {
    pub tiers: Vec<PlatformFeeConfig>,
}

/// List configured platform fee rates
/// GET /fees/tiers
pub async fn list_tiers(calculator: web::Data<Arc<FeeCalculator>>) -> HttpResponse {
    HttpResponse::Ok().json(TierRatesResponse {
        tiers: calculator.rates().configs(),
    })
}

/// Compute the payment breakdown for a booking subtotal
/// POST /fees/calculate
pub async fn calculate_payment(
    calculator: web::Data<Arc<FeeCalculator>>,
    tenant: TenantContext,
    request: web::Json<CalculatePaymentRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();

    let tier = match request.tier.as_deref() {
        Some(raw) => raw.parse::<PricingTier>()?,
        None => tenant.tier,
    };
    let currency = match request.currency.as_deref() {
        Some(raw) => raw.parse::<Currency>()?,
        None => Currency::default(),
    };

    let calculation =
        calculator.calculate_payment(request.subtotal, tier, request.deposit_percentage)?;

    tracing::debug!(
        tenant_id = %tenant.tenant_id,
        tier = %tier,
        subtotal = calculation.subtotal,
        platform_fee = calculation.platform_fee,
        "Calculated payment breakdown"
    );

    Ok(HttpResponse::Ok().json(CalculatePaymentResponse {
        tier,
        formatted: FormattedAmounts::new(&calculation, currency),
        calculation,
    }))
}

/// Configure fee routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/fees")
            .route("/tiers", web::get().to(list_tiers))
            .route("/calculate", web::post().to(calculate_payment)),
    );
}
