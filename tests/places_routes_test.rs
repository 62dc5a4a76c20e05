mod common;

use actix_web::{http::StatusCode, test};
use serde_json::Value;

use common::TestApp;

async fn get(uri: &str) -> (StatusCode, Value) {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri(uri).to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

#[actix_rt::test]
async fn test_search_without_maps_key_returns_empty_list() {
    let (status, body) = get("/api/places/search?q=chai").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["places"], serde_json::json!([]));
    assert_eq!(body["query"], "chai");
    assert_eq!(body["radius"], 5000);
    assert!(body["location"].is_null());
}

#[actix_rt::test]
async fn test_search_echoes_location_and_type() {
    let (status, body) =
        get("/api/places/search?q=biryani&lat=17.385&lng=78.4867&radius=2000&type=restaurant")
            .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["location"]["lat"], 17.385);
    assert_eq!(body["location"]["lng"], 78.4867);
    assert_eq!(body["radius"], 2000);
    assert_eq!(body["type"], "restaurant");
}

#[actix_rt::test]
async fn test_search_requires_query() {
    let (status, body) = get("/api/places/search").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Query parameter \"q\" is required");

    let (status, _) = get("/api/places/search?q=%20%20").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_search_rejects_bad_coordinates() {
    let (status, body) = get("/api/places/search?q=fort&lat=abc&lng=75.8").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid latitude or longitude values");
}

#[actix_rt::test]
async fn test_search_rejects_bad_radius() {
    let (status, body) = get("/api/places/search?q=fort&radius=wide").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid radius value");
}

#[actix_rt::test]
async fn test_search_post_not_allowed() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/places/search?q=fort")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[actix_rt::test]
async fn test_place_details_without_maps_key_is_not_found() {
    let (status, body) = get("/api/places/ChIJbU60yXAWrjsR4E9-UejD3_g").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Place not found");
}

#[actix_rt::test]
async fn test_geocode_without_maps_key() {
    let (status, body) = get("/api/geocode?address=Fort%20Kochi").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["address"], "Fort Kochi");
    assert!(body.get("location").is_none());

    let (status, body) = get("/api/geocode?lat=9.96&lng=76.24").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["location"]["lat"], 9.96);
    assert!(body.get("address").is_none());
}

#[actix_rt::test]
async fn test_geocode_requires_address_or_coordinates() {
    let (status, body) = get("/api/geocode").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Either address or lat and lng are required");

    let (status, _) = get("/api/geocode?lat=north&lng=76.24").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_directions_without_maps_key() {
    let (status, body) =
        get("/api/directions?origin=Kochi&destination=Munnar&mode=driving").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body["directions"].is_null());

    let (status, body) = get("/api/directions?origin=Kochi").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Origin and destination are required");

    let (status, _) = get("/api/directions?origin=Kochi&destination=Munnar&mode=teleport").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
