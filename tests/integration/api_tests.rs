//! API tests driving the router in-process

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use bookshelf_server::{
    api, repository::Repository, services::access_log::AccessLogService, services::Services,
    AppConfig, AppState,
};
use serde_json::{json, Value};
use tower::ServiceExt;

fn build_app() -> Router {
    let services = Services::new(Repository::seeded(), AccessLogService::disabled());
    api::create_router(AppState::new(AppConfig::default(), services))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let content_type = body.map(|_| "application/json");
    send_with_type(app, method, uri, content_type, body).await
}

async fn send_with_type(
    app: &Router,
    method: Method,
    uri: &str,
    content_type: Option<&str>,
    body: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(CONTENT_TYPE, content_type);
    }
    let request = match body {
        Some(body) => builder.body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn list(app: &Router) -> Vec<Value> {
    let (status, body) = send(app, Method::GET, "/books", None).await;
    assert_eq!(status, StatusCode::OK);
    body.as_array().cloned().expect("array body")
}

#[tokio::test]
async fn test_list_seed_books() {
    let app = build_app();
    let (status, body) = send(&app, Method::GET, "/books", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            { "id": "1", "title": "Book 1", "author": "Author 1" },
            { "id": "2", "title": "Book 2", "author": "Author 2" }
        ])
    );
}

#[tokio::test]
async fn test_create_then_list() {
    let app = build_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/books",
        Some(r#"{"id":"3","title":"T","author":"A"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "id": "3", "title": "T", "author": "A" }));
    assert_eq!(list(&app).await.len(), 3);
}

#[tokio::test]
async fn test_each_create_adds_one() {
    let app = build_app();
    for i in 0..5 {
        let payload = json!({ "id": format!("n{}", i), "title": "T", "author": "A" }).to_string();
        let (status, body) = send(&app, Method::POST, "/books", Some(&payload)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, serde_json::from_str::<Value>(&payload).unwrap());
        assert_eq!(list(&app).await.len(), 3 + i);
    }
}

#[tokio::test]
async fn test_create_keeps_caller_id_even_empty() {
    let app = build_app();
    let (status, body) = send(&app, Method::POST, "/books", Some(r#"{"title":"No id"}"#)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "id": "", "title": "No id", "author": "" }));
    assert_eq!(list(&app).await[2]["id"], "");
}

#[tokio::test]
async fn test_create_malformed_body() {
    let app = build_app();
    let (status, body) = send(&app, Method::POST, "/books", Some(r#"{"title": "#)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().is_some_and(|msg| !msg.is_empty()));
    assert_eq!(list(&app).await.len(), 2);
}

#[tokio::test]
async fn test_create_wrong_field_type() {
    let app = build_app();
    let (status, body) = send(&app, Method::POST, "/books", Some(r#"{"title": 7}"#)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert_eq!(list(&app).await.len(), 2);
}

#[tokio::test]
async fn test_create_without_body() {
    let app = build_app();
    let (status, body) = send(&app, Method::POST, "/books", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_create_decodes_body_without_content_type() {
    let app = build_app();
    let (status, body) = send_with_type(
        &app,
        Method::POST,
        "/books",
        None,
        Some(r#"{"id":"3","title":"T","author":"A"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "id": "3", "title": "T", "author": "A" }));
    assert_eq!(list(&app).await.len(), 3);
}

#[tokio::test]
async fn test_create_decodes_body_with_form_content_type() {
    let app = build_app();
    let (status, body) = send_with_type(
        &app,
        Method::POST,
        "/books",
        Some("application/x-www-form-urlencoded"),
        Some(r#"{"id":"3","title":"T","author":"A"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], "3");
}

#[tokio::test]
async fn test_create_null_fields_become_empty() {
    let app = build_app();
    let (status, body) = send(&app, Method::POST, "/books", Some(r#"{"id":"5","title":null}"#)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "id": "5", "title": "", "author": "" }));
}

#[tokio::test]
async fn test_update_decodes_body_without_content_type() {
    let app = build_app();
    let (status, body) = send_with_type(
        &app,
        Method::PUT,
        "/book/1",
        None,
        Some(r#"{"title":"New","author":null}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": "1", "title": "New", "author": "" }));
}

#[tokio::test]
async fn test_get_book_is_idempotent() {
    let app = build_app();
    let first = send(&app, Method::GET, "/book/2", None).await;
    let second = send(&app, Method::GET, "/book/2", None).await;

    assert_eq!(first.0, StatusCode::OK);
    assert_eq!(first.1, json!({ "id": "2", "title": "Book 2", "author": "Author 2" }));
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_get_missing_book() {
    let app = build_app();
    let (status, body) = send(&app, Method::GET, "/book/99", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Book not found" }));
}

#[tokio::test]
async fn test_update_is_full_overwrite() {
    let app = build_app();
    let (status, body) = send(&app, Method::PUT, "/book/1", Some(r#"{"title":"New"}"#)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": "1", "title": "New", "author": "" }));

    let (_, stored) = send(&app, Method::GET, "/book/1", None).await;
    assert_eq!(stored, body);
}

#[tokio::test]
async fn test_update_ignores_body_id() {
    let app = build_app();
    let (status, body) = send(
        &app,
        Method::PUT,
        "/book/2",
        Some(r#"{"id":"77","title":"X","author":"Y"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "2");

    let (status, _) = send(&app, Method::GET, "/book/77", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_missing_book() {
    let app = build_app();
    let (status, body) = send(&app, Method::PUT, "/book/99", Some(r#"{"title":"X"}"#)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Book not found" }));
}

#[tokio::test]
async fn test_update_missing_book_with_bad_body_is_not_found() {
    let app = build_app();
    let (status, _) = send(&app, Method::PUT, "/book/99", Some("not json")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_malformed_body_keeps_record() {
    let app = build_app();
    let (status, body) = send(&app, Method::PUT, "/book/1", Some(r#"{"title":"Half","author":"#)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (_, stored) = send(&app, Method::GET, "/book/1", None).await;
    assert_eq!(stored, json!({ "id": "1", "title": "Book 1", "author": "Author 1" }));
}

#[tokio::test]
async fn test_delete_book() {
    let app = build_app();
    let (status, body) = send(&app, Method::DELETE, "/book/1", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{ "id": "2", "title": "Book 2", "author": "Author 2" }]));
    assert_eq!(list(&app).await.len(), 1);
}

#[tokio::test]
async fn test_delete_missing_book_is_noop() {
    let app = build_app();
    let before = list(&app).await;
    let (status, body) = send(&app, Method::DELETE, "/book/99", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Array(before.clone()));
    assert_eq!(list(&app).await, before);
}

#[tokio::test]
async fn test_delete_removes_only_first_duplicate() {
    let app = build_app();
    send(&app, Method::POST, "/books", Some(r#"{"id":"1","title":"Dup"}"#)).await;
    send(&app, Method::POST, "/books", Some(r#"{"id":"4","title":"Four"}"#)).await;

    let (status, body) = send(&app, Method::DELETE, "/book/1", None).await;
    assert_eq!(status, StatusCode::OK);

    let remaining: Vec<(&str, &str)> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|b| (b["id"].as_str().unwrap(), b["title"].as_str().unwrap()))
        .collect();
    assert_eq!(remaining, vec![("2", "Book 2"), ("1", "Dup"), ("4", "Four")]);
}

#[tokio::test]
async fn test_health_reports_store_and_shipping() {
    let app = build_app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["books"], 2);
    assert_eq!(body["collector"], Value::Null);
    assert_eq!(body["access_log"]["enabled"], false);
}

#[tokio::test]
async fn test_openapi_document_lists_book_routes() {
    let app = build_app();
    let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/books"].is_object());
    assert!(body["paths"]["/book/{id}"]["put"].is_object());
}

#[tokio::test]
async fn test_unknown_route() {
    let app = build_app();
    let (status, _) = send(&app, Method::GET, "/authors", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
