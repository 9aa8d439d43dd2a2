use axum::http::{self, Request, StatusCode};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use http_body_util::BodyExt;
use mock_server::{app, app_with, MockConfig};
use serde_json::Value;
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn auth() -> String {
    format!("Basic {}", STANDARD.encode("metron:metron"))
}

fn get(uri: &str) -> Request<String> {
    Request::builder()
        .uri(uri)
        .header(http::header::AUTHORIZATION, auth())
        .header(http::header::HOST, "mock.test")
        .body(String::new())
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::AUTHORIZATION, auth())
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

// --- auth ---

#[tokio::test]
async fn missing_credentials_is_401_with_detail() {
    let resp = app()
        .oneshot(Request::builder().uri("/api/creator/").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(resp).await;
    assert_eq!(body["detail"], "Authentication credentials were not provided.");
}

#[tokio::test]
async fn wrong_password_is_401() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/api/creator/")
                .header(
                    http::header::AUTHORIZATION,
                    format!("Basic {}", STANDARD.encode("metron:nope")),
                )
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(resp).await["detail"], "Invalid username/password.");
}

// --- reads ---

#[tokio::test]
async fn list_returns_envelope() {
    let resp = app().oneshot(get("/api/creator/")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["count"], 3);
    assert!(body["next"].is_null());
    assert_eq!(body["results"][0]["name"], "Jack Kirby");
}

#[tokio::test]
async fn small_pages_link_with_absolute_urls() {
    let config = MockConfig {
        page_size: 2,
        ..MockConfig::default()
    };
    let resp = app_with(config).oneshot(get("/api/issue/")).await.unwrap();

    let body = body_json(resp).await;
    assert_eq!(body["results"].as_array().unwrap().len(), 2);
    assert_eq!(body["next"], "http://mock.test/api/issue/?page=2");
}

#[tokio::test]
async fn detail_view_differs_from_list_entry() {
    let resp = app().oneshot(get("/api/issue/1/")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["series"]["sort_name"], "Fantastic Four");
    assert_eq!(body["price"], "0.10");
}

#[tokio::test]
async fn item_falls_back_to_list_record() {
    let resp = app().oneshot(get("/api/creator/3/")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["name"], "Steve Ditko");
}

#[tokio::test]
async fn unknown_item_is_404_detail() {
    let resp = app().oneshot(get("/api/creator/999/")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await["detail"], "Not found.");
}

#[tokio::test]
async fn maintenance_reports_detail_with_200() {
    let resp = app().oneshot(get("/api/maintenance/")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_json(resp).await["detail"].is_string());
}

#[tokio::test]
async fn bad_page_is_404() {
    let resp = app().oneshot(get("/api/creator/?page=0")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await["detail"], "Invalid page.");
}

// --- writes ---

#[tokio::test]
async fn create_without_name_is_field_error() {
    let resp = app()
        .oneshot(json_request("POST", "/api/creator/", r#"{"desc":"no name"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert!(body.get("detail").is_none());
    assert!(body["name"].is_array());
}

#[tokio::test]
async fn post_on_item_path_is_405() {
    let resp = app()
        .oneshot(json_request("POST", "/api/creator/1/", r#"{"name":"x"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn create_then_patch_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/api/creator/", r#"{"name":"Jim Steranko"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created = body_json(resp).await;
    assert_eq!(created["id"], 4);
    assert_eq!(created["resource_url"], "https://metron.cloud/creator/4/");

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("PATCH", "/api/creator/4/", r#"{"desc":"Nick Fury"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let patched = body_json(resp).await;
    assert_eq!(patched["name"], "Jim Steranko");
    assert_eq!(patched["desc"], "Nick Fury");

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/api/creator/"))
        .await
        .unwrap();
    assert_eq!(body_json(resp).await["count"], 4);
}

#[tokio::test]
async fn credit_post_accepts_a_list() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/api/credit/",
            r#"[{"issue":1,"creator":1,"role":[2]},{"issue":1,"creator":2,"role":[1]}]"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_json(resp).await;
    let ids: Vec<u64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn patch_unknown_item_is_404() {
    let resp = app()
        .oneshot(json_request("PATCH", "/api/team/77/", r#"{"name":"X"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
