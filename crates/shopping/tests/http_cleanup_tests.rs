use std::time::Duration;

use axum::{Json, Router, http::StatusCode, routing::post};
use larder_shopping::{CleanupError, CleanupRequest, CleanupService, HttpCleanupService};
use serde_json::{Value, json};

async fn spawn_service(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}/api/parse-recipe")
}

fn request() -> CleanupRequest {
    CleanupRequest {
        recipe_text: "=== Pantry ===\n1 cup sugar\nFrom: Cake".to_owned(),
    }
}

#[tokio::test]
async fn test_http_service_posts_recipe_text() {
    let app = Router::new().route(
        "/api/parse-recipe",
        post(|Json(body): Json<Value>| async move {
            Json(json!({ "Pantry": [{ "name": body["recipeText"].clone() }] }))
        }),
    );
    let endpoint = spawn_service(app).await;

    let service = HttpCleanupService::new(endpoint, Duration::from_secs(5)).unwrap();
    let body = service.organize(&request()).await.unwrap();

    let answer: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(answer["Pantry"][0]["name"], request().recipe_text);
}

#[tokio::test]
async fn test_http_service_error_status_keeps_body() {
    let app = Router::new().route(
        "/api/parse-recipe",
        post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "busy") }),
    );
    let endpoint = spawn_service(app).await;

    let service = HttpCleanupService::new(endpoint, Duration::from_secs(5)).unwrap();
    let err = service.organize(&request()).await.unwrap_err();

    match err {
        CleanupError::Status { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "busy");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_http_service_unreachable_is_network_error() {
    // bind then drop to get a port nothing listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let service =
        HttpCleanupService::new(format!("http://{addr}/"), Duration::from_secs(5)).unwrap();
    let err = service.organize(&request()).await.unwrap_err();

    assert!(matches!(err, CleanupError::Network(_)));
}
