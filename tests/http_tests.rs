use axum::body::Body;
use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use graphql_crud::config::{DatabaseSettings, ServerSettings};
use graphql_crud::graphql::{build_schema, router};
use graphql_crud::storage::{TodoRepository, connect};

async fn app(settings: &ServerSettings) -> axum::Router {
    let db = connect(&DatabaseSettings::in_memory()).await.unwrap();
    router(build_schema(TodoRepository::new(db)), settings)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn graphql_request(uri: &str, query: &str) -> Request<Body> {
    let body = serde_json::json!({ "query": query }).to_string();
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_post_query_endpoint() {
    let app = app(&ServerSettings::default()).await;

    let resp = app
        .clone()
        .oneshot(graphql_request(
            "/query",
            r#"mutation { createUser(input: { name: "Jamie" }) { id name } }"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["data"]["createUser"]["name"], "Jamie");

    let resp = app
        .oneshot(graphql_request("/query", "{ users { name } }"))
        .await
        .unwrap();
    let body = body_json(resp).await;
    assert_eq!(body["data"]["users"][0]["name"], "Jamie");
}

#[tokio::test]
async fn test_not_found_is_reported_in_body() {
    let app = app(&ServerSettings::default()).await;
    let resp = app
        .oneshot(graphql_request("/query", "{ todo(input: { id: 1 }) { id } }"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["errors"][0]["extensions"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_playground_served_at_root() {
    let app = app(&ServerSettings::default()).await;
    let resp = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("/query"));
}

#[tokio::test]
async fn test_playground_can_be_disabled() {
    let settings = ServerSettings {
        playground: false,
        ..ServerSettings::default()
    };
    let app = app(&settings).await;
    let resp = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_custom_endpoint_path() {
    let settings = ServerSettings {
        path: "/graphql".to_string(),
        ..ServerSettings::default()
    };
    let app = app(&settings).await;

    let resp = app
        .clone()
        .oneshot(graphql_request("/graphql", "{ todos { id } }"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["data"]["todos"], serde_json::json!([]));

    let resp = app
        .oneshot(graphql_request("/query", "{ todos { id } }"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
