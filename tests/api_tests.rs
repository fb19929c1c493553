use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use product_api::{build_router, AppConfig, AppState, ProductService};
use serde_json::{json, Value};
use std::collections::HashSet;
use tower::ServiceExt;

const AUTH: &str = "Bearer mysecrettoken";

fn app() -> Router {
    build_router(
        AppState::new(ProductService::with_seed_data()),
        &AppConfig::default(),
    )
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    auth: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

#[tokio::test]
async fn test_root_welcome() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!("Welcome to the Product API! Go to /api/products to see all products.")
    );
}

#[tokio::test]
async fn test_seeded_scenario() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/api/products", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);

    let (status, body) = send(&app, Method::GET, "/api/products/2", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Smartphone");
    assert_eq!(body["price"], 800);

    let (status, body) = send(&app, Method::DELETE, "/api/products/2", Some(AUTH), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Product deleted");
    assert_eq!(body["deleted"].as_array().unwrap().len(), 1);
    assert_eq!(body["deleted"][0]["id"], "2");
    assert_eq!(body["deleted"][0]["name"], "Smartphone");

    let (status, body) = send(&app, Method::GET, "/api/products/2", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Product not found" }));

    let (_, body) = send(&app, Method::GET, "/api/products", None, None).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_create_product() {
    let app = app();
    let mut ids = HashSet::new();

    for name in ["Desk", "Chair", "Lamp"] {
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/products",
            Some(AUTH),
            Some(json!({
                "name": name,
                "price": 120,
                "category": "furniture",
                "inStock": true
            })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["name"], name);
        assert_eq!(body["price"], 120);
        assert_eq!(body["inStock"], true);
        let id = body["id"].as_str().unwrap().to_string();
        assert!(!["1", "2", "3"].contains(&id.as_str()));
        assert!(ids.insert(id.clone()));

        let (status, fetched) =
            send(&app, Method::GET, &format!("/api/products/{}", id), None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, body);
    }

    let (_, body) = send(&app, Method::GET, "/api/products", None, None).await;
    assert_eq!(body.as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_create_ignores_client_id() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/products",
        Some(AUTH),
        Some(json!({ "id": "1", "name": "Clone", "price": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_ne!(body["id"], "1");
}

#[tokio::test]
async fn test_create_validation() {
    let app = app();
    let bodies = [
        json!({ "price": 10 }),
        json!({ "name": "Desk" }),
        json!({ "name": "", "price": 10 }),
        json!({}),
    ];

    for payload in bodies {
        let (status, body) =
            send(&app, Method::POST, "/api/products", Some(AUTH), Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Name and price are required" }));
    }

    let (_, body) = send(&app, Method::GET, "/api/products", None, None).await;
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/products")
        .header(header::AUTHORIZATION, AUTH)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_update_is_shallow_merge() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/products/1",
        Some(AUTH),
        Some(json!({ "price": 999 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "id": "1",
            "name": "Laptop",
            "description": "High-performance laptop with 16GB RAM",
            "price": 999,
            "category": "electronics",
            "inStock": true
        })
    );

    let (_, fetched) = send(&app, Method::GET, "/api/products/1", None, None).await;
    assert_eq!(fetched, body);
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let app = app();
    let not_found = json!({ "error": "Product not found" });

    let (status, body) = send(&app, Method::GET, "/api/products/99", None, None).await;
    assert_eq!((status, &body), (StatusCode::NOT_FOUND, &not_found));

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/products/99",
        Some(AUTH),
        Some(json!({ "name": "x" })),
    )
    .await;
    assert_eq!((status, &body), (StatusCode::NOT_FOUND, &not_found));

    let (status, body) = send(&app, Method::DELETE, "/api/products/99", Some(AUTH), None).await;
    assert_eq!((status, &body), (StatusCode::NOT_FOUND, &not_found));
}

#[tokio::test]
async fn test_mutations_require_auth() {
    let app = app();
    let unauthorized = json!({ "error": "Unauthorized access" });

    for auth in [None, Some("Bearer wrong"), Some("mysecrettoken")] {
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/products",
            auth,
            Some(json!({ "name": "Desk", "price": 10 })),
        )
        .await;
        assert_eq!((status, &body), (StatusCode::UNAUTHORIZED, &unauthorized));

        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/products/1",
            auth,
            Some(json!({ "price": 1 })),
        )
        .await;
        assert_eq!((status, &body), (StatusCode::UNAUTHORIZED, &unauthorized));

        let (status, body) = send(&app, Method::DELETE, "/api/products/1", auth, None).await;
        assert_eq!((status, &body), (StatusCode::UNAUTHORIZED, &unauthorized));
    }

    // 未认证的请求不应修改任何数据
    let (_, body) = send(&app, Method::GET, "/api/products/1", None, None).await;
    assert_eq!(body["price"], 1200);
    let (_, body) = send(&app, Method::GET, "/api/products", None, None).await;
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_reads_do_not_require_auth() {
    let app = app();
    let (status, _) = send(&app, Method::GET, "/api/products", Some("Bearer wrong"), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::GET, "/api/products/3", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_configured_token() {
    let config = AppConfig {
        auth_token: "rotated".to_string(),
        ..AppConfig::default()
    };
    let app = build_router(AppState::new(ProductService::with_seed_data()), &config);

    let (status, _) = send(&app, Method::DELETE, "/api/products/3", Some(AUTH), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) =
        send(&app, Method::DELETE, "/api/products/3", Some("Bearer rotated"), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_stores_are_isolated_per_app() {
    let first = app();
    let second = app();

    let (status, _) = send(&first, Method::DELETE, "/api/products/1", Some(AUTH), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&second, Method::GET, "/api/products/1", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_route() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api/unknown", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Route not found" }));
}

#[tokio::test]
async fn test_panicking_handler_returns_generic_error() {
    use axum::routing::get;
    use product_api::core::middleware::handle_panic;
    use tower_http::catch_panic::CatchPanicLayer;

    async fn boom() -> &'static str {
        panic!("handler exploded")
    }

    let app: Router = Router::new()
        .route("/boom", get(boom))
        .layer(CatchPanicLayer::custom(handle_panic));

    let (status, body) = send(&app, Method::GET, "/boom", None, None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Something went wrong" }));
}

#[tokio::test]
async fn test_update_overwrites_any_present_field() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/products/1",
        Some(AUTH),
        Some(json!({ "price": "abc", "description": null, "color": "red", "id": "7" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "id": "1",
            "name": "Laptop",
            "description": null,
            "price": "abc",
            "category": "electronics",
            "inStock": true,
            "color": "red"
        })
    );

    let (_, fetched) = send(&app, Method::GET, "/api/products/1", None, None).await;
    assert_eq!(fetched, body);
    let (status, _) = send(&app, Method::GET, "/api/products/7", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_without_body_requires_fields() {
    let app = app();
    let required = json!({ "error": "Name and price are required" });

    let (status, body) = send(&app, Method::POST, "/api/products", Some(AUTH), None).await;
    assert_eq!((status, &body), (StatusCode::BAD_REQUEST, &required));

    for payload in [
        json!({ "name": false, "price": 5 }),
        json!({ "name": "x", "price": false }),
        json!({ "name": "x", "price": 0 }),
        json!([1, 2, 3]),
    ] {
        let (status, body) =
            send(&app, Method::POST, "/api/products", Some(AUTH), Some(payload)).await;
        assert_eq!((status, &body), (StatusCode::BAD_REQUEST, &required));
    }
}

#[tokio::test]
async fn test_update_without_body() {
    let app = app();

    let (status, body) = send(&app, Method::PUT, "/api/products/99", Some(AUTH), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Product not found" }));

    let (_, before) = send(&app, Method::GET, "/api/products/2", None, None).await;
    let (status, body) = send(&app, Method::PUT, "/api/products/2", Some(AUTH), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, before);
}
