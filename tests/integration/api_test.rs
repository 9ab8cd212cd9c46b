use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use paywall::{models::common::MembershipTier, routes::create_router};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::test_state;

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    // Extractor rejections answer with plain text
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str, user_id: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("x-user-id", user_id)
        .body(Body::empty())
        .unwrap()
}

fn purchase(user_id: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/purchases")
        .header("x-user-id", user_id)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_needs_no_identity() {
    let (state, _) = test_state();
    let response = create_router(state)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn health_goes_through_the_logging_stack() {
    let (state, _) = test_state();
    let response = create_router(state)
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-request-id", "req-health-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-request-id"], "req-health-1");
    // The logging middleware buffers and re-emits the body
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({ "message": "ok" }));
}

#[tokio::test]
async fn api_requires_user_id() {
    let (state, _) = test_state();
    let request = Request::builder()
        .uri("/api/v1/paywall")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(create_router(state), request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn paywall_lists_both_sections_with_original_prices() {
    let (state, _) = test_state();
    let (status, body) = send(
        create_router(state),
        get("/api/v1/paywall?visiblePeriod=week", "user-1"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["membership"], "Standard");

    let gold = &data["visible"][0];
    assert_eq!(gold["tier"], "Gold");
    assert_eq!(gold["period"], "week");
    assert_eq!(gold["price"], "2,99 €");
    assert_eq!(gold["originalPrice"], "5.98€");
    assert_eq!(gold["isAvailable"], true);
    assert_eq!(data["visible"][1]["tier"], "VIP");

    let tiers: Vec<&str> = data["invisible"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["tier"].as_str().unwrap())
        .collect();
    assert_eq!(tiers, ["Ghost", "Phantom", "Celebrity"]);
    assert_eq!(data["invisible"][2]["originalPrice"], "39.98€");
}

#[tokio::test]
async fn paywall_rejects_unknown_period() {
    let (state, _) = test_state();
    let (status, _) = send(
        create_router(state),
        get("/api/v1/paywall?visiblePeriod=year", "user-1"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn purchase_flow_updates_membership_and_paywall() {
    let (state, _) = test_state();
    let app = create_router(state);

    let (status, body) = send(
        app.clone(),
        purchase(
            "user-1",
            json!({
                "productId": "com.flame.phantom.month",
                "platform": "apple",
                "receipt": "receipt-0000001"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["membership"], "Phantom");
    assert_eq!(body["data"]["period"], "month");
    assert_eq!(body["data"]["transactionId"], "txn-receipt-0000001");

    let (_, body) = send(app.clone(), get("/api/v1/membership", "user-1")).await;
    assert_eq!(body["data"]["membership"], "Phantom");
    assert_eq!(body["data"]["period"], "month");

    let (_, body) = send(app, get("/api/v1/paywall", "user-1")).await;
    let availability: Vec<bool> = body["data"]["invisible"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["isAvailable"].as_bool().unwrap())
        .collect();
    assert_eq!(availability, [false, false, true]);
}

#[tokio::test]
async fn dominated_purchase_is_conflict() {
    let (state, profiles) = test_state();
    profiles
        .set_membership("user-1", MembershipTier::Vip, None)
        .await;

    let (status, body) = send(
        create_router(state),
        purchase(
            "user-1",
            json!({
                "productId": "com.flame.gold.week",
                "platform": "apple",
                "receipt": "receipt-0000001"
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "TIER_NOT_AVAILABLE");
}

#[tokio::test]
async fn replayed_receipt_is_conflict() {
    let (state, _) = test_state();
    let app = create_router(state);
    let body = json!({
        "productId": "com.flame.ghost.month",
        "platform": "apple",
        "receipt": "receipt-0000001"
    });

    let (status, _) = send(app.clone(), purchase("user-1", body.clone())).await;
    assert_eq!(status, StatusCode::OK);

    // Same receipt again for a tier still open to the user
    let (status, response) = send(
        app,
        purchase(
            "user-1",
            json!({
                "productId": "com.flame.celebrity.month",
                "platform": "apple",
                "receipt": "receipt-0000001"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(response["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn invalid_purchase_requests_are_rejected() {
    let (state, _) = test_state();
    let app = create_router(state);

    let (status, body) = send(
        app.clone(),
        purchase(
            "user-1",
            json!({ "productId": "com.flame.gold.week", "platform": "apple", "receipt": "short" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");

    let (status, body) = send(
        app,
        purchase(
            "user-1",
            json!({
                "productId": "com.flame.unknown",
                "platform": "apple",
                "receipt": "receipt-0000001"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}
