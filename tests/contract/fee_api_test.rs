// Contract tests for the fee endpoints and the public health checks

#[path = "../helpers/mod.rs"]
mod helpers;

use std::sync::Arc;

use actix_web::test;
use serde_json::{json, Value};

use helpers::*;
use rentfee::modules::fees::PricingTier;

fn calculate(body: Value) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/fees/calculate")
        .insert_header(("X-API-Key", TEST_API_KEY))
        .set_json(body)
}

#[actix_web::test]
async fn test_list_tiers() {
    let app = test::init_service(build_app(Arc::new(InMemorySource::default()), PricingTier::Free)).await;

    let body: Value = test::call_and_read_body_json(&app, get("/fees/tiers").to_request()).await;
    let tiers = body["tiers"].as_array().unwrap();

    assert_eq!(tiers.len(), 3);
    assert_eq!(tiers[0]["tier"], "free");
    assert_eq!(tiers[0]["rate"], "0.06");
    assert_eq!(tiers[0]["description"], "Free tier - 6% platform fee");
    assert_eq!(tiers[1]["rate"], "0.035");
    assert_eq!(tiers[2]["tier"], "platinum");
}

#[actix_web::test]
async fn test_calculate_uses_tenant_tier() {
    let app = test::init_service(build_app(Arc::new(InMemorySource::default()), PricingTier::Free)).await;

    let req = calculate(json!({"subtotal": 20000})).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["tier"], "free");
    assert_eq!(body["subtotal"], 20000);
    assert_eq!(body["platform_fee"], 1200);
    assert_eq!(body["stripe_fee"], 610);
    assert_eq!(body["total"], 20000);
    assert_eq!(body["tenant_receives"], 18190);
    assert!(body.get("deposit_amount").is_none());
    assert_eq!(body["formatted"]["subtotal"], "$200.00");
}

#[actix_web::test]
async fn test_calculate_with_tier_and_deposit() {
    let app = test::init_service(build_app(Arc::new(InMemorySource::default()), PricingTier::Free)).await;

    let req = calculate(json!({
        "subtotal": 20000,
        "tier": "pro",
        "deposit_percentage": 50
    }))
    .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["tier"], "pro");
    assert_eq!(body["platform_fee"], 700);
    assert_eq!(body["deposit_amount"], 10000);
    assert_eq!(body["formatted"]["deposit_amount"], "$100.00");
}

#[actix_web::test]
async fn test_calculate_reports_negative_payout() {
    let app = test::init_service(build_app(Arc::new(InMemorySource::default()), PricingTier::Free)).await;

    let req = calculate(json!({"subtotal": 10})).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["tenant_receives"], -21);
    assert_eq!(body["formatted"]["tenant_receives"], "-$0.21");
}

#[actix_web::test]
async fn test_calculate_rejects_bad_input() {
    let app = test::init_service(build_app(Arc::new(InMemorySource::default()), PricingTier::Free)).await;

    let cases = [
        json!({"subtotal": -100}),
        json!({"subtotal": 20000, "tier": "enterprise"}),
        json!({"subtotal": 20000, "currency": "DOGE"}),
        json!({"subtotal": "twenty"}),
    ];

    for case in cases {
        let resp = test::call_service(&app, calculate(case.clone()).to_request()).await;
        assert_eq!(resp.status(), 400, "{}", case);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], 400, "{}", case);
    }
}

#[actix_web::test]
async fn test_fees_require_api_key() {
    let app = test::init_service(build_app(Arc::new(InMemorySource::default()), PricingTier::Free)).await;

    let req = test::TestRequest::get().uri("/fees/tiers").to_request();
    let err = test::try_call_service(&app, req)
        .await
        .err()
        .expect("request should be rejected");
    assert_eq!(err.as_response_error().status_code(), 401);

    let req = test::TestRequest::get()
        .uri("/fees/tiers")
        .insert_header(("X-API-Key", "wrong-key"))
        .to_request();
    let err = test::try_call_service(&app, req)
        .await
        .err()
        .expect("request should be rejected");
    assert_eq!(err.as_response_error().status_code(), 401);
}

#[actix_web::test]
async fn test_health_checks_are_public() {
    let app = test::init_service(build_app(Arc::new(InMemorySource::default()), PricingTier::Free)).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "rentfee");

    let req = test::TestRequest::get().uri("/ready").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["ready"], true);
    assert_eq!(body["checks"]["tenants_configured"], true);
}
