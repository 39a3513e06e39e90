//! Integration tests for the shipping pipeline using wiremock HTTP mocks.
//!
//! One mock server stands in for both providers: the geocoder is addressed
//! under `/search` and the router under `/route/v1/driving/...`, exactly as
//! the real base URLs are laid out.

use std::sync::Arc;

use motoship_core::ShopOrigin;
use motoship_geo::{
    GeocodingClient, PincodeCache, QuoteMethod, RoutingClient, ShippingPipeline,
};
use wiremock::matchers::{any, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn shop_origin() -> ShopOrigin {
    ShopOrigin {
        lat: 17.385_044,
        lon: 78.486_671,
        address: "Hyderabad, Telangana, India".to_string(),
    }
}

fn build_pipeline(server: &MockServer) -> ShippingPipeline {
    let geocoder = GeocodingClient::with_base_url(&server.uri(), 5, "motoship-test/0.1")
        .expect("geocoding client construction should not fail");
    let router = RoutingClient::with_base_url(&server.uri(), 5, "motoship-test/0.1")
        .expect("routing client construction should not fail");
    ShippingPipeline::new(geocoder, router, Arc::new(PincodeCache::new()), shop_origin())
}

fn candidate(lat: &str, lon: &str, display_name: &str, postcode: Option<&str>) -> serde_json::Value {
    let mut address = serde_json::json!({
        "city": "Bangalore",
        "state": "Karnataka",
        "country": "India"
    });
    if let Some(code) = postcode {
        address["postcode"] = serde_json::Value::String(code.to_string());
    }
    serde_json::json!({
        "lat": lat,
        "lon": lon,
        "display_name": display_name,
        "address": address,
        "importance": 0.6
    })
}

fn route_body(distance_meters: f64, duration_seconds: f64) -> serde_json::Value {
    serde_json::json!({
        "code": "Ok",
        "routes": [
            { "distance": distance_meters, "duration": duration_seconds }
        ]
    })
}

#[tokio::test]
async fn pincode_address_is_priced_by_zone() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Pincode 560001, India"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            candidate("12.9763", "77.6033", "Bangalore GPO, 560001, Karnataka, India", Some("560001"))
        ])))
        .mount(&server)
        .await;

    let quote = build_pipeline(&server)
        .estimate("MG Road, Bangalore, Karnataka, 560001", 500.0)
        .await;

    assert_eq!(quote.method, QuoteMethod::PincodeBased);
    assert_eq!(quote.shipping_cost, 120, "round(150 * 0.8) for zone 5");
    assert!((quote.distance_km - 100.0).abs() < f64::EPSILON);
    assert!((quote.duration_hours - 2.0).abs() < f64::EPSILON);
    let zone = quote.zone.expect("zone info on pincode quotes");
    assert_eq!(zone.digit, '5');
    let coords = quote.coordinates.expect("resolved coordinates");
    assert!((coords.lat - 12.9763).abs() < 1e-6);
}

#[tokio::test]
async fn repeated_pincode_is_served_from_cache() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            candidate("17.39", "78.47", "Abids Post Office, 500001, Telangana, India", Some("500001"))
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let pipeline = build_pipeline(&server);
    let first = pipeline.estimate("Abids, Hyderabad, 500001", 400.0).await;
    let second = pipeline.estimate("Abids, Hyderabad, 500001", 400.0).await;

    assert_eq!(first.shipping_cost, second.shipping_cost);
    assert_eq!(first.method, QuoteMethod::PincodeBased);
    assert_eq!(second.method, QuoteMethod::PincodeBased);
    assert_eq!(pipeline.cache().len(), 1);
    // MockServer verifies expect(1) on drop: the second call made no request.
}

#[tokio::test]
async fn identical_requests_return_identical_quotes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            candidate("12.9763", "77.6033", "Bangalore GPO, 560001", Some("560001"))
        ])))
        .mount(&server)
        .await;

    let pipeline = build_pipeline(&server);
    let first = pipeline.estimate("Bangalore 560001", 250.0).await;
    let second = pipeline.estimate("Bangalore 560001", 250.0).await;

    assert_eq!(
        serde_json::to_value(&first).unwrap(),
        serde_json::to_value(&second).unwrap(),
        "estimate must be idempotent under stubbed providers"
    );
}

#[tokio::test]
async fn plain_address_is_priced_by_routed_distance() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "MG Road, Bangalore"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            candidate("12.97", "77.59", "MG Road, Bangalore, Karnataka, India", None)
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/route/v1/driving/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(route_body(570_000.0, 28_800.0)))
        .mount(&server)
        .await;

    let quote = build_pipeline(&server).estimate("MG Road, Bangalore", 300.0).await;

    assert_eq!(quote.method, QuoteMethod::GeocodingBased);
    // 570 km: long-distance base 500 + ceil(5.7)*25 = 650.
    assert_eq!(quote.shipping_cost, 650);
    assert!((quote.distance_km - 570.0).abs() < 1e-9);
    assert!((quote.duration_hours - 8.0).abs() < 1e-9);
    assert!(quote.zone.is_none());
    assert!(quote.fallback_reason.is_none());
}

#[tokio::test]
async fn resolver_falls_through_to_later_strategies() {
    let server = MockServer::start().await;

    // Full address comes back empty; the cleaned variant matches.
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "MG Road,  Bangalore"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "MG Road, Bangalore"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            candidate("12.97", "77.59", "MG Road, Bangalore, Karnataka, India", None)
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/route/v1/driving/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(route_body(12_000.0, 1_500.0)))
        .mount(&server)
        .await;

    let quote = build_pipeline(&server).estimate("MG Road,  Bangalore", 0.0).await;

    assert_eq!(quote.method, QuoteMethod::GeocodingBased);
    let coords = quote.coordinates.expect("resolved coordinates");
    assert_eq!(coords.strategy, "cleaned address");
}

#[tokio::test]
async fn routing_failure_degrades_to_fallback() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            candidate("12.97", "77.59", "MG Road, Bangalore, Karnataka, India", None)
        ])))
        .mount(&server)
        .await;

    // No route between the points.
    Mock::given(method("GET"))
        .and(path_regex(r"^/route/v1/driving/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"code": "NoRoute", "routes": []})),
        )
        .mount(&server)
        .await;

    let quote = build_pipeline(&server).estimate("MG Road, Bangalore", 200.0).await;

    assert_eq!(quote.method, QuoteMethod::Fallback);
    assert!(quote.fallback_reason.is_some());
    // Tier-1 metro heuristic.
    assert_eq!(quote.shipping_cost, 100);
}

#[tokio::test]
async fn total_provider_failure_still_quotes() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let quote = build_pipeline(&server)
        .estimate("MG Road, Bangalore, Karnataka, 560001", 500.0)
        .await;

    assert_eq!(quote.method, QuoteMethod::Fallback);
    assert!(quote.fallback_reason.is_some());
    // The fallback zone table agrees with the live one: still 120.
    assert_eq!(quote.shipping_cost, 120);
    assert!(quote.coordinates.is_none());
}

#[tokio::test]
async fn free_shipping_applies_on_every_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            candidate("12.97", "77.59", "Bangalore, 560001", Some("560001"))
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/route/v1/driving/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(route_body(570_000.0, 28_800.0)))
        .mount(&server)
        .await;

    let pipeline = build_pipeline(&server);

    let pincode_quote = pipeline.estimate("Bangalore 560001", 999.0).await;
    assert_eq!(pincode_quote.shipping_cost, 0);

    let geocoded_quote = pipeline.estimate("MG Road, Bangalore", 1_200.0).await;
    assert_eq!(geocoded_quote.shipping_cost, 0);

    let offline_server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .mount(&offline_server)
        .await;
    let fallback = build_pipeline(&offline_server).estimate("anywhere", 999.0).await;
    assert_eq!(fallback.shipping_cost, 0);
    assert_eq!(fallback.method, QuoteMethod::Fallback);
}

#[tokio::test]
async fn empty_address_skips_providers_entirely() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let quote = build_pipeline(&server).estimate("   ", 100.0).await;

    assert_eq!(quote.method, QuoteMethod::Fallback);
    assert_eq!(quote.shipping_cost, 150);
}

#[tokio::test]
async fn validate_pincode_reports_zone_and_cost() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            candidate("12.9763", "77.6033", "Bangalore GPO, 560001", Some("560001"))
        ])))
        .mount(&server)
        .await;

    let validation = build_pipeline(&server).validate_pincode("560001", 500.0).await;

    assert!(validation.valid);
    assert_eq!(validation.shipping_cost, Some(120));
    assert_eq!(validation.zone.unwrap().digit, '5');
    assert!(validation.coordinates.is_some());
    assert!(validation.error.is_none());
}

#[tokio::test]
async fn validate_pincode_rejects_bad_formats_without_network() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let pipeline = build_pipeline(&server);

    let five_digits = pipeline.validate_pincode("12345", 0.0).await;
    assert!(!five_digits.valid);
    assert!(five_digits.error.is_some());

    let leading_zero = pipeline.validate_pincode("012345", 0.0).await;
    assert!(!leading_zero.valid);
}

#[tokio::test]
async fn validate_pincode_reports_provider_failure_in_band() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let validation = build_pipeline(&server).validate_pincode("560001", 0.0).await;

    assert!(!validation.valid);
    assert!(validation.error.is_some());
    assert!(validation.shipping_cost.is_none());
}

#[tokio::test]
async fn validation_warms_the_cache_for_estimates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            candidate("17.39", "78.47", "Abids, 500001", Some("500001"))
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let pipeline = build_pipeline(&server);
    let validation = pipeline.validate_pincode("500001", 0.0).await;
    assert!(validation.valid);

    let quote = pipeline.estimate("Somewhere near Abids 500001", 0.0).await;
    assert_eq!(quote.method, QuoteMethod::PincodeBased);
    // expect(1) verifies the estimate reused the cached resolution.
}
