mod common;

use axum::body::Body;
use axum::http::header;
use axum::http::Method;
use axum::http::Request;
use axum::http::StatusCode;
use axum::Router;
use common::test_app;
use common::FailingUserRepository;
use common::TestApp;
use common::ADA_GOOGLE_TOKEN;
use common::DRIVER_ERROR;
use http_body_util::BodyExt;
use serde_json::json;
use serde_json::Value;
use tower::ServiceExt;

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str, bearer: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

fn ada_registration() -> Value {
    json!({ "name": "Ada", "email": "ada@example.com", "password": "pw1" })
}

#[tokio::test]
async fn test_root_says_hello() {
    let router = test_app().router();

    let (status, body) = send(&router, get("/", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "hello world" }));
}

#[tokio::test]
async fn test_register_returns_created_user() {
    let router = test_app().router();

    let (status, body) = send(&router, post_json("/register", ada_registration())).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["email"], "ada@example.com");
    assert_eq!(body["data"]["name"], "Ada");
    assert!(body["data"]["uid"].as_str().is_some());
    assert!(body["data"].get("token").is_none());
}

#[tokio::test]
async fn test_duplicate_register_is_conflict() {
    let router = test_app().router();
    send(&router, post_json("/register", ada_registration())).await;

    let (status, body) = send(
        &router,
        post_json(
            "/register",
            json!({ "name": "Ada", "email": "ada@example.com", "password": "pw2" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "email already registered");
    assert_eq!(body["error"]["code"], "EMAIL_EXIST");
}

#[tokio::test]
async fn test_register_validates_fields() {
    let router = test_app().router();

    let (status, body) = send(
        &router,
        post_json("/register", json!({ "name": "Ada", "email": "not-an-email" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(
        body["error"]["details"],
        json!([
            { "field": "email", "message": "must be a valid email" },
            { "field": "password", "message": "is required" },
        ])
    );
}

#[tokio::test]
async fn test_malformed_json_is_validation_error() {
    let router = test_app().router();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/login/password")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"email\":"))
        .unwrap();
    let (status, body) = send(&router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_password_login_and_current_user() {
    let router = test_app().router();
    let (_, registered) = send(&router, post_json("/register", ada_registration())).await;

    let (status, body) = send(
        &router,
        post_json(
            "/login/password",
            json!({ "email": "ada@example.com", "password": "pw1" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["uid"], registered["data"]["uid"]);
    assert_eq!(body["data"]["name"], "Ada");
    let token = body["data"]["token"].as_str().unwrap().to_string();

    let (status, me) = send(&router, get("/me", Some(token.as_str()))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["data"]["uid"], registered["data"]["uid"]);
    assert_eq!(me["data"]["email"], "ada@example.com");
}

#[tokio::test]
async fn test_failed_logins_share_one_response() {
    let router = test_app().router();
    send(&router, post_json("/register", ada_registration())).await;

    let unknown = send(
        &router,
        post_json(
            "/login/password",
            json!({ "email": "nobody@example.com", "password": "pw1" }),
        ),
    )
    .await;
    let wrong = send(
        &router,
        post_json(
            "/login/password",
            json!({ "email": "ada@example.com", "password": "nope" }),
        ),
    )
    .await;

    assert_eq!(unknown.0, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.1["error"]["code"], "LOGIN_ERROR");
    assert_eq!(unknown, wrong);
}

#[tokio::test]
async fn test_current_user_requires_valid_bearer() {
    let router = test_app().router();

    let (status, body) = send(&router, get("/me", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");

    let (status, _) = send(&router, get("/me", Some("not.a.token"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_google_login() {
    let router = test_app().router();

    let (status, body) = send(
        &router,
        post_json("/login/google", json!({ "id_token": ADA_GOOGLE_TOKEN })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Ada");

    let (status, body) = send(
        &router,
        post_json("/login/google", json!({ "id_token": "forged" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    let (status, body) = send(&router, post_json("/login/google", json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["details"][0]["field"], "id_token");
}

#[tokio::test]
async fn test_store_failure_is_masked() {
    let router = TestApp::with_repository(FailingUserRepository).router();

    let (status, body) = send(&router, post_json("/register", ada_registration())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "INTERNAL_SERVER_ERROR");
    assert_eq!(body["message"], "failed to get user");
    assert!(!body.to_string().contains(DRIVER_ERROR));
    assert!(!body.to_string().contains("hunter2"));
}
