//! Integration tests for the rb-payload booking source client
//!
//! A throwaway actix server on an ephemeral port stands in for rb-payload, so
//! the real reqwest client, query encoding and document decoding are exercised.

use std::sync::{Arc, Mutex};

use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use serde_json::json;

use rentfee::config::UpstreamConfig;
use rentfee::core::AppError;
use rentfee::modules::bookings::{
    BookingSource, BookingStatus, RbPayloadClient, WhereClause, WhereField, WhereOperator,
};

const UPSTREAM_KEY: &str = "rb-payload-test-key";

/// Query pairs received by the fake upstream, per request
#[derive(Clone, Default)]
struct Recorded(Arc<Mutex<Vec<Vec<(String, String)>>>>);

impl Recorded {
    fn last(&self) -> Vec<(String, String)> {
        self.0.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

fn authorized(req: &HttpRequest) -> bool {
    req.headers()
        .get("X-API-Key")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == UPSTREAM_KEY)
        .unwrap_or(false)
}

async fn bookings(
    req: HttpRequest,
    query: web::Query<Vec<(String, String)>>,
    recorded: web::Data<Recorded>,
) -> HttpResponse {
    if !authorized(&req) {
        return HttpResponse::Unauthorized().finish();
    }
    recorded.0.lock().unwrap().push(query.into_inner());

    HttpResponse::Ok().json(json!({
        "docs": [
            {
                "id": 101,
                "tenantId": 6,
                "customer": {"id": "c1", "name": "Ada Lovelace", "email": "ada@example.com"},
                "status": "confirmed",
                "items": [
                    {"service": {"id": "castle", "name": "Bounce House Castle"}, "price": 25000}
                ],
                "totalPrice": 25000,
                "startDate": "2025-06-07T08:00:00.000Z",
                "endDate": "2025-06-08T18:00:00.000Z",
                "createdAt": "2025-06-03T09:00:00.000Z",
                "paymentMethod": "card"
            },
            {
                "id": "102",
                "customerId": "c2",
                "status": "cancelled",
                "totalPrice": 15000,
                "createdAt": "2025-06-04T11:00:00.000Z",
                "cancellationReason": "Weather"
            }
        ],
        "totalDocs": 2
    }))
}

async fn services(
    req: HttpRequest,
    query: web::Query<Vec<(String, String)>>,
    recorded: web::Data<Recorded>,
) -> HttpResponse {
    if !authorized(&req) {
        return HttpResponse::Unauthorized().finish();
    }
    recorded.0.lock().unwrap().push(query.into_inner());

    HttpResponse::Ok().json(json!({
        "docs": [
            {"id": "castle", "name": "Bounce House Castle"},
            {"id": 7}
        ]
    }))
}

async fn customers() -> HttpResponse {
    HttpResponse::InternalServerError().body("database unavailable")
}

/// Starts the fake upstream and returns its base url
fn spawn_upstream(recorded: Recorded) -> String {
    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(recorded.clone()))
            .route("/api/bookings", web::get().to(bookings))
            .route("/api/services", web::get().to(services))
            .route("/api/customers", web::get().to(customers))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("bind fake upstream");

    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    format!("http://{}", addr)
}

fn client(base_url: &str, api_key: &str) -> RbPayloadClient {
    RbPayloadClient::new(UpstreamConfig::new(base_url, api_key)).expect("build client")
}

#[actix_web::test]
async fn test_fetch_bookings_decodes_documents() {
    let recorded = Recorded::default();
    let base_url = spawn_upstream(recorded.clone());

    let bookings = client(&base_url, UPSTREAM_KEY)
        .fetch_bookings("6", &WhereClause::new())
        .await
        .expect("fetch bookings");

    assert_eq!(bookings.len(), 2);

    let first = &bookings[0];
    assert_eq!(first.id, "101");
    assert_eq!(first.tenant_id.as_deref(), Some("6"));
    assert_eq!(first.customer_id(), Some("c1"));
    assert_eq!(first.status, BookingStatus::Confirmed);
    assert_eq!(first.items[0].item_id.as_deref(), Some("castle"));
    assert_eq!(first.items[0].label, "Bounce House Castle");
    assert!(first.rental_window().is_some());
    assert_eq!(first.payment_method.as_deref(), Some("card"));

    let second = &bookings[1];
    assert_eq!(second.customer_id(), Some("c2"));
    assert!(second.is_cancelled());
    assert_eq!(second.cancellation_reason.as_deref(), Some("Weather"));
}

#[actix_web::test]
async fn test_tenant_scope_and_filters_are_sent() {
    let recorded = Recorded::default();
    let base_url = spawn_upstream(recorded.clone());

    let filter = WhereClause::new().and(WhereField::Status, WhereOperator::NotEquals, "cancelled");
    client(&base_url, UPSTREAM_KEY)
        .fetch_bookings("6", &filter)
        .await
        .expect("fetch bookings");

    let query = recorded.last();
    assert_eq!(
        query,
        vec![
            ("where[tenantId][equals]".to_string(), "6".to_string()),
            ("where[status][not_equals]".to_string(), "cancelled".to_string()),
            ("limit".to_string(), "1000".to_string()),
        ]
    );
}

#[actix_web::test]
async fn test_fetch_catalogue() {
    let recorded = Recorded::default();
    let base_url = spawn_upstream(recorded.clone());

    let catalogue = client(&base_url, UPSTREAM_KEY)
        .fetch_catalogue("6")
        .await
        .expect("fetch catalogue");

    assert_eq!(catalogue.len(), 2);
    assert_eq!(catalogue[0].name, "Bounce House Castle");
    // unnamed services fall back to their id
    assert_eq!(catalogue[1].id, "7");
    assert_eq!(catalogue[1].name, "7");

    let query = recorded.last();
    assert!(query.contains(&("limit".to_string(), "100".to_string())));
}

#[actix_web::test]
async fn test_error_status_is_upstream_failure() {
    let base_url = spawn_upstream(Recorded::default());

    let err = client(&base_url, UPSTREAM_KEY)
        .fetch_customers("6")
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::UpstreamFetch(_)));
    assert!(err.to_string().contains("500"));
}

#[actix_web::test]
async fn test_rejected_api_key_is_upstream_failure() {
    let base_url = spawn_upstream(Recorded::default());

    let err = client(&base_url, "not-the-key")
        .fetch_bookings("6", &WhereClause::new())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::UpstreamFetch(_)));
}

#[actix_web::test]
async fn test_unreachable_upstream() {
    // port 9 (discard) is not listening on test hosts
    let err = client("http://127.0.0.1:9", UPSTREAM_KEY)
        .fetch_catalogue("6")
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::UpstreamFetch(_)));
}
