use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use backend::dbs::MemoryDatabase;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    backend::init(Router::new(), Arc::new(MemoryDatabase::seeded()))
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone()
        .oneshot(request)
        .await
        .unwrap_or_else(|err| panic!("router request failed: {err}"))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn form_post(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/new")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap_or_else(|err| panic!("failed to read response body: {err}"));
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn characters(app: &Router) -> Vec<Value> {
    let body = body_text(send(app, get("/characters")).await).await;
    serde_json::from_str(&body).unwrap()
}

fn assert_redirects_to_list(response: &Response) {
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[header::LOCATION], "/list");
}

#[tokio::test]
async fn welcome_page() {
    let response = send(&app(), get("/index")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html")
    );
    assert!(body_text(response).await.contains("<title>Welcome</title>"));
}

#[tokio::test]
async fn list_page_shows_current_characters() {
    let app = app();
    let html = body_text(send(&app, get("/list")).await).await;
    assert!(html.contains("<title>Character list</title>"));
    assert!(html.contains("Cloud Strife"));
    assert!(html.contains("Tifa Lockhart"));
    assert!(html.contains("Aerith Gainsborough"));
}

#[tokio::test]
async fn new_page_has_form() {
    let html = body_text(send(&app(), get("/new")).await).await;
    assert!(html.contains("<title>New character</title>"));
    assert!(html.contains("action=\"/new\""));
    for field in ["id", "name", "job", "weapon", "level"] {
        assert!(html.contains(&format!("name=\"{field}\"")), "missing {field}");
    }
}

#[tokio::test]
async fn form_submission_appends_and_redirects() {
    let app = app();
    let body = "id=5&name=Cid+Highwind&job=Pilot&weapon=Spear&level=35";
    let response = send(&app, form_post(body)).await;
    assert_redirects_to_list(&response);

    let all = characters(&app).await;
    assert_eq!(all.len(), 4);
    assert_eq!(
        all[3],
        json!({ "id": 5, "name": "Cid Highwind", "job": "Pilot", "weapon": "Spear", "level": 35 })
    );

    let html = body_text(send(&app, get("/list")).await).await;
    assert!(html.contains("Cid Highwind"));
}

#[tokio::test]
async fn form_skips_validation() {
    let app = app();
    let body = "id=1&name=Cloud+Strife&job=Clone&weapon=None&level=500";
    let response = send(&app, form_post(body)).await;
    assert_redirects_to_list(&response);

    let all = characters(&app).await;
    assert_eq!(all.len(), 4);
    assert_eq!(all[3]["level"], 500);
    assert_eq!(all[3]["id"], 1);
}

#[tokio::test]
async fn form_coerces_numbers_loosely() {
    let app = app();
    let response = send(&app, form_post("id=&name=Blank&level=high")).await;
    assert_redirects_to_list(&response);

    let all = characters(&app).await;
    assert_eq!(all[3], json!({ "id": 0, "name": "Blank", "level": null }));

    let html = body_text(send(&app, get("/list")).await).await;
    assert!(html.contains("<td>Blank</td><td></td><td></td><td>NaN</td>"));
}

#[tokio::test]
async fn json_body_is_read_as_form_fields() {
    let app = app();
    let request = Request::builder()
        .method("POST")
        .uri("/new")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "id": 7, "name": "Vincent", "level": "60" }).to_string(),
        ))
        .unwrap();
    let response = send(&app, request).await;
    assert_redirects_to_list(&response);

    let all = characters(&app).await;
    assert_eq!(all.len(), 4);
    assert_eq!(all[3], json!({ "id": 7, "name": "Vincent", "level": 60 }));
}

#[tokio::test]
async fn undecodable_form_still_appends() {
    let app = app();
    let request = Request::builder()
        .method("POST")
        .uri("/new")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("garbage"))
        .unwrap();
    let response = send(&app, request).await;
    assert_redirects_to_list(&response);

    let all = characters(&app).await;
    assert_eq!(all.len(), 4);
    assert_eq!(all[3], json!({ "id": null, "level": null }));
}

#[tokio::test]
async fn malformed_json_form_still_appends() {
    let app = app();
    let request = Request::builder()
        .method("POST")
        .uri("/new")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"id\": "))
        .unwrap();
    let response = send(&app, request).await;
    assert_redirects_to_list(&response);
    assert_eq!(characters(&app).await.len(), 4);
}

#[tokio::test]
async fn list_page_escapes_markup() {
    let app = app();
    send(&app, form_post("id=6&name=%3Cscript%3E&level=1")).await;
    let html = body_text(send(&app, get("/list")).await).await;
    assert!(html.contains("&lt;script&gt;"));
    assert!(!html.contains("<script>"));
}
