//! HTTP Route Tests
//!
//! Drives the full router in-process with `tower::ServiceExt::oneshot`.

use std::fs;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;
use userstore::http_server::{HttpServer, HttpServerConfig};
use userstore::store::UserStore;

// =============================================================================
// Test Utilities
// =============================================================================

struct TestApp {
    _temp: TempDir,
    store: Arc<UserStore>,
    router: Router,
}

fn test_app() -> TestApp {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let static_dir = temp.path().join("public");
    fs::create_dir_all(&static_dir).unwrap();
    fs::write(static_dir.join("index.html"), "<h1>usuarios</h1>").unwrap();

    let store = Arc::new(UserStore::open(temp.path().join("usuarios.json")));
    let config = HttpServerConfig {
        static_dir,
        ..Default::default()
    };
    let router = HttpServer::new(config, store.clone()).router();

    TestApp {
        _temp: temp,
        store,
        router,
    }
}

async fn send(app: &TestApp, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn create(app: &TestApp, body: Value) -> Value {
    let (status, value) = send(app, "POST", "/cadastrar-usuario", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "{}", value);
    value["usuario"].clone()
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn test_create_returns_sanitized_record() {
    let app = test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/cadastrar-usuario",
        Some(json!({
            "nome": "  Ana' SELECT ",
            "idade": "30",
            "email": "a@x.com",
            "endereco": "Rua: 1",
            "id": "forged"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["ok"], true);
    assert_eq!(body["usuario"]["nome"], "Ana");
    assert_eq!(body["usuario"]["idade"], 30);
    assert_eq!(body["usuario"]["endereco"], "Rua 1");
    assert_ne!(body["usuario"]["id"], "forged");
    assert!(body["usuario"]["criadoEm"].as_str().unwrap().ends_with('Z'));

    let stored = app.store.list_all(0).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(body["usuario"]["id"], stored[0].id.as_str());
}

#[tokio::test]
async fn test_create_invalid_body_is_400_and_writes_nothing() {
    let app = test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/cadastrar-usuario",
        Some(json!({ "nome": "", "idade": "abc" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["ok"], false);
    assert_eq!(body["message"], "Invalid data");
    assert_eq!(body["errors"].as_array().unwrap().len(), 3);
    assert!(app.store.list_all(0).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_empty_after_sanitize_is_400() {
    let app = test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/cadastrar-usuario",
        Some(json!({ "nome": "Ana", "idade": 20, "email": "'='" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"].as_array().unwrap().len(), 1);
}

/// Bodies that are not JSON get the validation envelope, not a bare 4xx.
#[tokio::test]
async fn test_unreadable_body_uses_validation_envelope() {
    let app = test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/cadastrar-usuario")
        .header("content-type", "application/json")
        .body(Body::from("{ nome: Ana"))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["ok"], false);
    assert_eq!(body["message"], "Invalid data");
    assert_eq!(body["errors"].as_array().unwrap().len(), 1);

    let created = create(&app, json!({ "nome": "Ana", "idade": 30, "email": "a@x.com" })).await;
    let request = Request::builder()
        .method("PUT")
        .uri(format!("/atualizar-usuario/{}", created["id"].as_str().unwrap()))
        .body(Body::from(r#"{"nome": "Ana Maria"}"#))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["ok"], false);
    assert_eq!(app.store.list_all(0).await.unwrap()[0].name, "Ana");
}

// =============================================================================
// List
// =============================================================================

#[tokio::test]
async fn test_list_routes() {
    let app = test_app();
    for i in 0..3 {
        create(&app, json!({ "nome": format!("U{}", i), "idade": 20, "email": "u@t.com" })).await;
    }

    let (status, all) = send(&app, "GET", "/list-users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 3);

    let (_, legacy) = send(&app, "GET", "/usuarios", None).await;
    assert_eq!(legacy, all);

    let (_, two) = send(&app, "GET", "/list-users/2", None).await;
    assert_eq!(two.as_array().unwrap().len(), 2);
    assert_eq!(two[0], all[0]);

    let (_, fallback) = send(&app, "GET", "/list-users/abc", None).await;
    assert_eq!(fallback.as_array().unwrap().len(), 3);

    let (_, prefixed) = send(&app, "GET", "/list-users/2abc", None).await;
    assert_eq!(prefixed.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_list_on_corrupt_file_is_500() {
    let app = test_app();
    fs::write(app.store.path(), "{ not an array").unwrap();

    let (status, body) = send(&app, "GET", "/list-users", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Storage operation failed");
}

// =============================================================================
// Update and Delete
// =============================================================================

#[tokio::test]
async fn test_update_route() {
    let app = test_app();
    let created = create(&app, json!({ "nome": "Ana", "idade": 30, "email": "a@x.com" })).await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/atualizar-usuario/{}", id),
        Some(json!({ "nome": "Ana Maria" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["usuario"]["nome"], "Ana Maria");
    assert_eq!(body["usuario"]["idade"], 30);
    assert_eq!(body["usuario"]["id"], created["id"]);
    assert_eq!(body["usuario"]["criadoEm"], created["criadoEm"]);
}

#[tokio::test]
async fn test_update_unknown_id_is_404() {
    let app = test_app();
    create(&app, json!({ "nome": "Ana", "idade": 30, "email": "a@x.com" })).await;

    let (status, body) = send(
        &app,
        "PUT",
        "/atualizar-usuario/zzz",
        Some(json!({ "nome": "X" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User not found");
}

#[tokio::test]
async fn test_update_invalid_field_is_400() {
    let app = test_app();
    let created = create(&app, json!({ "nome": "Ana", "idade": 30, "email": "a@x.com" })).await;
    let id = created["id"].as_str().unwrap();

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/atualizar-usuario/{}", id),
        Some(json!({ "idade": "velha" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.store.list_all(0).await.unwrap()[0].age, 30);
}

#[tokio::test]
async fn test_delete_route() {
    let app = test_app();
    let a = create(&app, json!({ "nome": "A", "idade": 1, "email": "a@t.com" })).await;
    let b = create(&app, json!({ "nome": "B", "idade": 2, "email": "b@t.com" })).await;

    let (status, body) = send(
        &app,
        "DELETE",
        &format!("/remover-usuario/{}", a["id"].as_str().unwrap()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["usuario"], a);

    let (_, remaining) = send(&app, "GET", "/list-users", None).await;
    assert_eq!(remaining, json!([b]));

    let (status, _) = send(&app, "DELETE", "/remover-usuario/zzz", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Health, Metrics and Static Client
// =============================================================================

#[tokio::test]
async fn test_health_and_metrics() {
    let app = test_app();
    create(&app, json!({ "nome": "Ana", "idade": 30, "email": "a@x.com" })).await;

    let (status, health) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "ok");

    let (status, metrics) = send(&app, "GET", "/observability/metrics", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(metrics["metrics"]["appends"], 1);
    assert_eq!(metrics["metrics"]["appends_new_array"], 1);
}

#[tokio::test]
async fn test_static_index_served() {
    let app = test_app();
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"<h1>usuarios</h1>");
}
