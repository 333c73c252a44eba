use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{http::header, App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use rentfee::app::AppState;
use rentfee::config::Config;
use rentfee::middleware::{ApiKeyAuth, RateLimiter, RequestId};
use rentfee::modules::bookings::RbPayloadClient;

fn init_tracing(log_level: &str, log_format: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("rentfee={},actix_web=info", log_level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if log_format.eq_ignore_ascii_case("json") {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn cors(origin: Option<&str>) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .allowed_header("X-API-Key")
        .allowed_header("X-Request-ID")
        .max_age(3600);

    match origin {
        Some(origin) => cors.allowed_origin(origin),
        None => cors.allow_any_origin(),
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Configuration is loaded first so LOG_LEVEL and LOG_FORMAT apply
    let config = Config::from_env().context("Failed to load configuration")?;
    init_tracing(&config.app.log_level, &config.app.log_format);
    config.validate().context("Configuration validation failed")?;

    tracing::info!("Starting rentfee fee and report service");
    tracing::info!(environment = %config.app.env, "Environment");
    tracing::info!(
        upstream = %config.upstream.base_url,
        tenants = config.security.tenant_keys.len(),
        "Booking source configured"
    );

    let source = RbPayloadClient::new(config.upstream.clone())
        .context("Failed to create booking source client")?;
    let state = AppState::from_config(&config, Arc::new(source));

    let tenant_keys = config.security.tenant_keys.clone();
    let rate_limit = config.security.rate_limit_per_minute;
    let cors_origin = config.app.cors_origin.clone();

    let bind_address = config.server.bind_address();
    tracing::info!(workers = config.server.workers, "Server binding to: {}", bind_address);

    // One limiter shared by every worker keeps the quota global
    let limiter = RateLimiter::new(rate_limit);

    HttpServer::new(move || {
        App::new()
            .wrap(ApiKeyAuth::new(tenant_keys.clone()))
            .wrap(limiter.clone())
            .wrap(cors(cors_origin.as_deref()))
            .wrap(RequestId)
            .wrap(TracingLogger::default())
            .configure(|cfg| state.configure(cfg))
    })
    .workers(config.server.workers)
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run()
    .await
    .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}
