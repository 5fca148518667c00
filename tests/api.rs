use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::{DateTime, Utc};
use folio::seed::{self, SEED_PROFILE_NAME};
use folio::server::{AppState, build_router};
use folio::storage::{ContentStore, MemoryStore, SqliteStore};
use serde_json::{Value, json};
use tower::ServiceExt;

fn app_with(store: Arc<dyn ContentStore>) -> Router {
    build_router(Arc::new(AppState { store }), None)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, body)
}

async fn get(app: &Router, path: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(path).body(Body::empty()).unwrap();
    send(app, request).await
}

async fn post_message(app: &Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/messages")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

#[tokio::test]
async fn profile_is_404_before_seed_and_200_after() {
    let store: Arc<dyn ContentStore> = Arc::new(MemoryStore::new());
    let app = app_with(store.clone());

    let (status, body) = get(&app, "/api/profile").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Profile not found" }));

    seed::seed_store(store.as_ref()).unwrap();

    let (status, body) = get(&app, "/api/profile").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], SEED_PROFILE_NAME);
    assert!(body["githubUrl"].is_string());
    assert!(body["id"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn skills_empty_then_seeded_in_order() {
    let store: Arc<dyn ContentStore> = Arc::new(MemoryStore::new());
    let app = app_with(store.clone());

    let (status, body) = get(&app, "/api/skills").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    seed::seed_store(store.as_ref()).unwrap();

    let (status, body) = get(&app, "/api/skills").await;
    assert_eq!(status, StatusCode::OK);
    let skills = body.as_array().unwrap();
    assert_eq!(skills.len(), 11);

    let names: Vec<&str> = skills.iter().map(|s| s["name"].as_str().unwrap()).collect();
    let expected: Vec<String> = seed::seed_skills().into_iter().map(|s| s.name).collect();
    assert_eq!(names, expected);

    let ids: Vec<i64> = skills.iter().map(|s| s["id"].as_i64().unwrap()).collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
}

#[tokio::test]
async fn list_routes_always_return_arrays() {
    let app = app_with(Arc::new(MemoryStore::new()));
    for path in ["/api/skills", "/api/projects", "/api/experience", "/api/education"] {
        let (status, body) = get(&app, path).await;
        assert_eq!(status, StatusCode::OK, "{}", path);
        assert!(body.is_array(), "{} returned {}", path, body);
    }
}

#[tokio::test]
async fn seeded_projects_experience_and_education() {
    let store: Arc<dyn ContentStore> = Arc::new(SqliteStore::open_in_memory().unwrap());
    seed::seed_store(store.as_ref()).unwrap();
    let app = app_with(store);

    let (_, projects) = get(&app, "/api/projects").await;
    let projects = projects.as_array().unwrap();
    assert_eq!(projects.len(), 6);
    assert_eq!(projects[0]["title"], "Valorant Chatbot");
    assert_eq!(projects[0]["imageUrl"], "/valorant_coach.png");
    assert_eq!(projects[0]["technologies"], json!(["LangChain", "Next.js", "PostgreSQL"]));

    let (_, experience) = get(&app, "/api/experience").await;
    assert_eq!(experience.as_array().unwrap().len(), 1);
    assert_eq!(experience[0]["company"], "Creative Plastering Group");

    let (_, education) = get(&app, "/api/education").await;
    assert_eq!(education[0]["school"], "Monash University");
}

#[tokio::test]
async fn valid_message_is_created_with_id_and_timestamp() {
    let app = app_with(Arc::new(MemoryStore::new()));
    let submitted = Utc::now();

    let (status, first) = post_message(
        &app,
        json!({ "name": "Ada", "email": "ada@example.com", "message": "Hello" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["name"], "Ada");
    assert_eq!(first["email"], "ada@example.com");
    assert_eq!(first["message"], "Hello");

    let first_id = first["id"].as_i64().unwrap();
    assert!(first_id > 0);
    let created_at: DateTime<Utc> = first["createdAt"].as_str().unwrap().parse().unwrap();
    assert!(created_at >= submitted);

    let (status, second) = post_message(
        &app,
        json!({ "name": "Grace", "email": "grace@example.com", "message": "Hi" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(second["id"].as_i64().unwrap() > first_id);
}

#[tokio::test]
async fn sqlite_message_is_created() {
    let store: Arc<dyn ContentStore> = Arc::new(SqliteStore::open_in_memory().unwrap());
    let app = app_with(store.clone());
    let submitted = Utc::now();

    let (status, body) = post_message(
        &app,
        json!({ "name": "Ada", "email": "ada@example.com", "message": "Hello" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 1);
    let created_at: DateTime<Utc> = body["createdAt"].as_str().unwrap().parse().unwrap();
    assert!(created_at >= submitted);
    assert_eq!(store.messages().unwrap().len(), 1);
}

#[tokio::test]
async fn missing_or_empty_fields_are_rejected_with_field_path() {
    let app = app_with(Arc::new(MemoryStore::new()));
    let valid = json!({ "name": "Ada", "email": "ada@example.com", "message": "Hello" });

    for field in ["name", "email", "message"] {
        let mut missing = valid.clone();
        missing.as_object_mut().unwrap().remove(field);
        let (status, body) = post_message(&app, missing).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["field"], field);
        assert_eq!(body["message"], "Required");

        let mut empty = valid.clone();
        empty[field] = json!("");
        let (status, body) = post_message(&app, empty).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["field"], field);
    }
}

#[tokio::test]
async fn only_first_failure_is_reported() {
    let app = app_with(Arc::new(MemoryStore::new()));
    let (status, body) = post_message(&app, json!({ "email": "nope" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": "Required", "field": "name" }));
}

#[tokio::test]
async fn malformed_email_is_rejected() {
    let store: Arc<dyn ContentStore> = Arc::new(MemoryStore::new());
    let app = app_with(store.clone());

    let (status, body) = post_message(
        &app,
        json!({ "name": "Ada", "email": "not-an-email", "message": "Hello" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "email");
    assert_eq!(body["message"], "Invalid email");
    assert!(store.messages().unwrap().is_empty());
}

#[tokio::test]
async fn unparseable_body_is_a_bad_request() {
    let app = app_with(Arc::new(MemoryStore::new()));
    let request = Request::builder()
        .method("POST")
        .uri("/api/messages")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "");
}

#[tokio::test]
async fn unavailable_store_is_a_server_error() {
    let store: Arc<dyn ContentStore> = Arc::new(SqliteStore::open_in_memory().unwrap());
    store.close().unwrap();
    let app = app_with(store);

    let (status, body) = get(&app, "/api/skills").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Internal Server Error");

    let (status, _) = post_message(
        &app,
        json!({ "name": "Ada", "email": "ada@example.com", "message": "Hello" }),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn unknown_api_path_is_404() {
    let app = app_with(Arc::new(MemoryStore::new()));
    let (status, _) = get(&app, "/api/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn static_dir_serves_frontend_for_non_api_paths() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<html>folio</html>").unwrap();

    let state = Arc::new(AppState { store: Arc::new(MemoryStore::new()) });
    let app = build_router(state, Some(dir.path().to_path_buf()));

    let request = Request::builder().uri("/projects/kitsunetic").body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"<html>folio</html>");

    let (status, body) = get(&app, "/api/skills").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}
