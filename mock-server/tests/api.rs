use axum::http::{self, Request, StatusCode};
use axum::routing::RouterIntoService;
use http_body_util::BodyExt;
use mock_server::{app, User};
use tower::{Service, ServiceExt};

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

async fn send(
    app: &mut RouterIntoService<String>,
    request: Request<String>,
) -> axum::response::Response {
    ServiceExt::ready(app)
        .await
        .unwrap()
        .call(request)
        .await
        .unwrap()
}

// --- list ---

#[tokio::test]
async fn list_users_empty() {
    let resp = app()
        .oneshot(empty_request("GET", "/api/users"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let users: Vec<User> = body_json(resp).await;
    assert!(users.is_empty());
}

// --- create ---

#[tokio::test]
async fn create_user_returns_201_with_sequential_id() {
    let mut app = app().into_service();

    let resp = send(
        &mut app,
        json_request("POST", "/api/users", r#"{"firstName":"Ada","email":"ada@x.com"}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let first: User = body_json(resp).await;
    assert_eq!(first.id, 1);
    assert_eq!(first.first_name, "Ada");
    assert!(first.last_name.is_empty());

    let resp = send(
        &mut app,
        json_request("POST", "/api/users", r#"{"firstName":"Grace"}"#),
    )
    .await;
    let second: User = body_json(resp).await;
    assert_eq!(second.id, 2);
}

#[tokio::test]
async fn create_user_malformed_json_is_rejected() {
    let resp = app()
        .oneshot(json_request("POST", "/api/users", r#"{"firstName":"#))
        .await
        .unwrap();

    assert!(resp.status().is_client_error());
}

// --- search ---

#[tokio::test]
async fn search_filters_and_empty_search_lists_all() {
    let mut app = app().into_service();
    for body in [
        r#"{"firstName":"Ada","lastName":"Lovelace"}"#,
        r#"{"firstName":"Grace","lastName":"Hopper"}"#,
    ] {
        send(&mut app, json_request("POST", "/api/users", body)).await;
    }

    let resp = send(&mut app, empty_request("GET", "/api/users?search=HOPP")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let users: Vec<User> = body_json(resp).await;
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].first_name, "Grace");

    let resp = send(&mut app, empty_request("GET", "/api/users?search=")).await;
    let users: Vec<User> = body_json(resp).await;
    assert_eq!(users.len(), 2);

    let resp = send(&mut app, empty_request("GET", "/api/users?search=nobody")).await;
    let users: Vec<User> = body_json(resp).await;
    assert!(users.is_empty());
}

// --- get ---

#[tokio::test]
async fn get_user_not_found() {
    let resp = app()
        .oneshot(empty_request("GET", "/api/users/42"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_user_bad_id_returns_400() {
    let resp = app()
        .oneshot(empty_request("GET", "/api/users/not-a-number"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- update ---

#[tokio::test]
async fn update_user_not_found() {
    let resp = app()
        .oneshot(json_request("PUT", "/api/users/42", r#"{"email":"nope"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- delete ---

#[tokio::test]
async fn delete_user_not_found() {
    let resp = app()
        .oneshot(empty_request("DELETE", "/api/users/42"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- full CRUD lifecycle ---

#[tokio::test]
async fn crud_lifecycle() {
    let mut app = app().into_service();

    // create
    let resp = send(
        &mut app,
        json_request(
            "POST",
            "/api/users",
            r#"{"firstName":"Ada","lastName":"Lovelace","email":"ada@x.com"}"#,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: User = body_json(resp).await;
    let id = created.id;

    // list: contains the one user
    let resp = send(&mut app, empty_request("GET", "/api/users")).await;
    let users: Vec<User> = body_json(resp).await;
    assert_eq!(users, vec![created.clone()]);

    // update: only status
    let resp = send(
        &mut app,
        json_request("PUT", &format!("/api/users/{id}"), r#"{"status":"inactive"}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: User = body_json(resp).await;
    assert_eq!(updated.status, "inactive");
    assert_eq!(updated.email, "ada@x.com"); // unchanged

    // get reflects the update
    let resp = send(&mut app, empty_request("GET", &format!("/api/users/{id}"))).await;
    let fetched: User = body_json(resp).await;
    assert_eq!(fetched, updated);

    // delete
    let resp = send(&mut app, empty_request("DELETE", &format!("/api/users/{id}"))).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    // delete again: 404
    let resp = send(&mut app, empty_request("DELETE", &format!("/api/users/{id}"))).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // list after delete: empty
    let resp = send(&mut app, empty_request("GET", "/api/users")).await;
    let users: Vec<User> = body_json(resp).await;
    assert!(users.is_empty());
}
