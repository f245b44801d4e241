mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{create_test_delivery, create_test_user, generate_unique_email, setup_test_app};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

fn form_request(method: &str, uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_user(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;
    let email = generate_unique_email();

    let request = form_request(
        "POST",
        "/api/users",
        format!("name=Jane+Doe&email={}&password=testpass123", email),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;
    assert_eq!(body["message"], "User created successfully");
    assert_eq!(body["user"]["name"], "Jane Doe");
    assert_eq!(body["user"]["email"], email);
    assert!(body["user"].get("password").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_user_duplicate_email_conflicts(pool: PgPool) {
    let email = generate_unique_email();
    create_test_user(&pool, &email, "testpass123").await;

    let app = setup_test_app(pool.clone()).await;

    let request = form_request(
        "POST",
        "/api/users",
        format!("name=Other&email={}&password=testpass123", email),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = response_json(response).await;
    assert_eq!(body["error"], "Email already registered");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_user_short_password_rejected(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;

    let request = form_request(
        "POST",
        "/api/users",
        format!("name=Jane&email={}&password=short", generate_unique_email()),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_show_user_includes_deliveries(pool: PgPool) {
    let email = generate_unique_email();
    let user = create_test_user(&pool, &email, "testpass123").await;
    let delivery = create_test_delivery(&pool, user.id).await;

    let app = setup_test_app(pool.clone()).await;

    let request = Request::builder()
        .method("GET")
        .uri(format!("/api/users/{}", user.id))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["email"], email);
    assert_eq!(body["is_verified"], false);
    assert_eq!(body["deliveries"].as_array().unwrap().len(), 1);
    assert_eq!(body["deliveries"][0]["id"], delivery.id.to_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_show_user_not_found(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;

    let request = Request::builder()
        .method("GET")
        .uri(format!("/api/users/{}", Uuid::new_v4()))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_user_partial(pool: PgPool) {
    let email = generate_unique_email();
    let user = create_test_user(&pool, &email, "testpass123").await;

    let app = setup_test_app(pool.clone()).await;

    let request = form_request(
        "PUT",
        &format!("/api/users/{}", user.id),
        "name=Renamed".to_string(),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["user"]["name"], "Renamed");
    // Untouched fields keep their values.
    assert_eq!(body["user"]["email"], email);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_user_cascades_to_deliveries(pool: PgPool) {
    let email = generate_unique_email();
    let user = create_test_user(&pool, &email, "testpass123").await;
    let delivery = create_test_delivery(&pool, user.id).await;

    let app = setup_test_app(pool.clone()).await;

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/users/{}", user.id))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let request = Request::builder()
        .method("GET")
        .uri(format!("/api/users/{}", user.id))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM deliveries WHERE id = $1")
        .bind(delivery.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_user_not_found(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/users/{}", Uuid::new_v4()))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
