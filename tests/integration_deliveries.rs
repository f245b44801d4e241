mod common;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{create_test_delivery, create_test_user, generate_unique_email, setup_test_app};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

async fn login(app: &Router, email: &str, password: &str) -> String {
    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(format!("username={}&password={}", email, password)))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    body["access_token"].as_str().unwrap().to_string()
}

fn authed_form(method: &str, uri: &str, token: &str, body: String) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {}", token))
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_delivery_requires_auth(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/deliveries")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(
            "item_name=Book&destination=Lagos&status=pending&tracking_number=TRK-1",
        ))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_and_show_delivery(pool: PgPool) {
    let email = generate_unique_email();
    let user = create_test_user(&pool, &email, "testpass123").await;

    let app = setup_test_app(pool.clone()).await;
    let token = login(&app, &email, "testpass123").await;

    let request = authed_form(
        "POST",
        "/api/deliveries",
        &token,
        "item_name=Book&destination=Lagos&status=pending&tracking_number=TRK-1".to_string(),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Delivery created successfully");
    assert_eq!(body["delivery"]["item_name"], "Book");
    assert_eq!(body["delivery"]["user_id"], user.id.to_string());

    let delivery_id = body["delivery"]["id"].as_str().unwrap().to_string();

    let request = Request::builder()
        .method("GET")
        .uri(format!("/api/deliveries/{}", delivery_id))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["tracking_number"], "TRK-1");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_delivery_owner_only(pool: PgPool) {
    let owner_email = generate_unique_email();
    let owner = create_test_user(&pool, &owner_email, "testpass123").await;
    let delivery = create_test_delivery(&pool, owner.id).await;

    let other_email = generate_unique_email();
    create_test_user(&pool, &other_email, "testpass123").await;

    let app = setup_test_app(pool.clone()).await;

    let other_token = login(&app, &other_email, "testpass123").await;
    let request = authed_form(
        "PUT",
        &format!("/api/deliveries/{}", delivery.id),
        &other_token,
        "status=delivered".to_string(),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let owner_token = login(&app, &owner_email, "testpass123").await;
    let request = authed_form(
        "PUT",
        &format!("/api/deliveries/{}", delivery.id),
        &owner_token,
        "status=delivered".to_string(),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["delivery"]["status"], "delivered");
    // Untouched fields keep their values.
    assert_eq!(body["delivery"]["item_name"], "Test Item");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_delivery(pool: PgPool) {
    let owner_email = generate_unique_email();
    let owner = create_test_user(&pool, &owner_email, "testpass123").await;
    let delivery = create_test_delivery(&pool, owner.id).await;

    let other_email = generate_unique_email();
    create_test_user(&pool, &other_email, "testpass123").await;

    let app = setup_test_app(pool.clone()).await;

    let other_token = login(&app, &other_email, "testpass123").await;
    let request = authed_form(
        "DELETE",
        &format!("/api/deliveries/{}", delivery.id),
        &other_token,
        String::new(),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let owner_token = login(&app, &owner_email, "testpass123").await;
    let request = authed_form(
        "DELETE",
        &format!("/api/deliveries/{}", delivery.id),
        &owner_token,
        String::new(),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let request = Request::builder()
        .method("GET")
        .uri(format!("/api/deliveries/{}", delivery.id))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
