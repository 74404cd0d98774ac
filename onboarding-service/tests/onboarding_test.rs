mod common;

use axum::http::StatusCode;
use common::{json_body, valid_onboarding_body, TestApp};
use onboarding_service::services::ONBOARDING_PROFILES_COLLECTION;
use serde_json::json;
use std::collections::HashSet;

#[tokio::test]
async fn create_onboarding_profile_works() {
    let app = TestApp::spawn().await;

    let response = app
        .post_json("/api/onboarding", &valid_onboarding_body())
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Onboarding profile created successfully");
    assert_eq!(body["status"], "success");
    assert_eq!(body["userId"].as_str().unwrap().len(), 24);
    assert_eq!(app.store.count(ONBOARDING_PROFILES_COLLECTION), 1);
}

#[tokio::test]
async fn created_profile_can_be_fetched_back() {
    let app = TestApp::spawn().await;
    let input = valid_onboarding_body();

    let created = json_body(app.post_json("/api/onboarding", &input).await).await;
    let user_id = created["userId"].as_str().unwrap();

    let response = app.get(&format!("/api/onboarding/{}", user_id)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let profile = json_body(response).await;
    assert_eq!(profile["_id"], user_id);
    assert_eq!(profile["theme"], input["theme"]);
    assert_eq!(profile["persona"], input["persona"]);
    assert_eq!(profile["pricingPlan"], input["pricingPlan"]);
    assert_eq!(profile["referralSource"], input["referralSource"]);
    assert_eq!(
        profile["personalDetails"]["email"],
        input["personalDetails"]["email"]
    );
    assert_eq!(
        profile["personalDetails"]["age"],
        input["personalDetails"]["age"]
    );
    assert!(profile["createdAt"].is_string());
    assert_eq!(profile["createdAt"], profile["updatedAt"]);
}

#[tokio::test]
async fn every_created_profile_gets_a_fresh_id() {
    let app = TestApp::spawn().await;
    let mut ids = HashSet::new();

    for _ in 0..5 {
        let body = json_body(
            app.post_json("/api/onboarding", &valid_onboarding_body())
                .await,
        )
        .await;
        assert!(ids.insert(body["userId"].as_str().unwrap().to_string()));
    }

    assert_eq!(app.store.count(ONBOARDING_PROFILES_COLLECTION), 5);
}

#[tokio::test]
async fn invalid_email_is_rejected_before_any_write() {
    let app = TestApp::spawn().await;
    let mut input = valid_onboarding_body();
    input["personalDetails"]["email"] = json!("not-an-email");

    let response = app.post_json("/api/onboarding", &input).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Validation error");
    assert!(body["details"]
        .as_str()
        .unwrap()
        .contains("personalDetails.email"));
    assert_eq!(app.store.count(ONBOARDING_PROFILES_COLLECTION), 0);
}

#[tokio::test]
async fn non_integer_age_is_rejected_before_any_write() {
    let app = TestApp::spawn().await;
    let mut input = valid_onboarding_body();
    input["personalDetails"]["age"] = json!("thirty");

    let response = app.post_json("/api/onboarding", &input).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(app.store.count(ONBOARDING_PROFILES_COLLECTION), 0);
}

#[tokio::test]
async fn whole_valued_float_age_is_stored_as_integer() {
    let app = TestApp::spawn().await;
    let mut input = valid_onboarding_body();
    input["personalDetails"]["age"] = json!(30.0);

    let created = app.post_json("/api/onboarding", &input).await;
    assert_eq!(created.status(), StatusCode::OK);
    let user_id = json_body(created).await["userId"]
        .as_str()
        .unwrap()
        .to_string();

    let profile = json_body(app.get(&format!("/api/onboarding/{}", user_id)).await).await;
    assert_eq!(profile["personalDetails"]["age"], 30);
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let app = TestApp::spawn().await;

    let response = app
        .post_raw("/api/onboarding", "{\"theme\": ".to_string())
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .post_json("/api/onboarding", &json!({ "theme": "dark" }))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().starts_with("Json parse error"));

    assert_eq!(app.store.count(ONBOARDING_PROFILES_COLLECTION), 0);
}

#[tokio::test]
async fn rejected_write_is_internal_error() {
    let app = TestApp::spawn().await;
    app.store.set_reject_writes(true);

    let response = app
        .post_json("/api/onboarding", &valid_onboarding_body())
        .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(app.store.count(ONBOARDING_PROFILES_COLLECTION), 0);
}

#[tokio::test]
async fn malformed_profile_id_is_bad_request() {
    let app = TestApp::spawn().await;

    let response = app.get("/api/onboarding/not-a-valid-id").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Invalid user ID format");
}

#[tokio::test]
async fn unknown_profile_id_is_not_found() {
    let app = TestApp::spawn().await;

    let response = app.get("/api/onboarding/65a1b2c3d4e5f6a7b8c9d0e1").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Profile not found");
}

#[tokio::test]
async fn onboarding_endpoints_need_a_connected_store() {
    let app = TestApp::disconnected();

    let response = app
        .post_json("/api/onboarding", &valid_onboarding_body())
        .await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let response = app.get("/api/onboarding/65a1b2c3d4e5f6a7b8c9d0e1").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    assert_eq!(app.store.count(ONBOARDING_PROFILES_COLLECTION), 0);
}
