use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

/// Static facts about the running service, registered as app data at startup
#[derive(Debug, Clone)]
pub struct ServiceStatus {
    pub environment: String,
    pub upstream_url: String,
    pub tenants: usize,
}

/// Health check response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: String,
}

/// Readiness check response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub checks: ReadinessChecks,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessChecks {
    pub upstream_configured: bool,
    pub tenants_configured: bool,
}

/// GET /health - Liveness check
/// Returns 200 if the application can respond to requests
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// GET /ready - Readiness check
///
/// Ready once an upstream and at least one tenant are configured. The booking
/// service is not called here so health checks do not spend its quota.
pub async fn readiness_check(status: Option<web::Data<ServiceStatus>>) -> impl Responder {
    let checks = match status.as_deref() {
        Some(status) => ReadinessChecks {
            upstream_configured: !status.upstream_url.is_empty(),
            tenants_configured: status.tenants > 0,
        },
        None => ReadinessChecks {
            upstream_configured: false,
            tenants_configured: false,
        },
    };
    let ready = checks.upstream_configured && checks.tenants_configured;

    if !ready {
        tracing::warn!(
            upstream_configured = checks.upstream_configured,
            tenants_configured = checks.tenants_configured,
            "Readiness check failed"
        );
    }

    let response = ReadinessResponse { ready, checks };
    if ready {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

/// GET / - Service banner
pub async fn index(status: Option<web::Data<ServiceStatus>>) -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "service": "rentfee",
        "version": env!("CARGO_PKG_VERSION"),
        "environment": status.as_deref().map(|s| s.environment.as_str()).unwrap_or("unknown"),
        "status": "running"
    }))
}

/// Configure health check routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/health", web::get().to(health_check))
        .route("/ready", web::get().to(readiness_check));
}
