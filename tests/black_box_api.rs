use jsonwebtoken::{EncodingKey, Header};
use reqwest::StatusCode;
use serde_json::json;
use time::OffsetDateTime;

use inkpost::app::build_app;
use inkpost::auth::claims::Claims;
use inkpost::state::AppState;

// Matches AppState::fake().
const JWT_SECRET: &str = "test";
const JWT_ISSUER: &str = "test";
const JWT_AUDIENCE: &str = "test";

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Spawn the production router on an ephemeral port. The fake state's
    /// pool connects lazily, so everything that fails before persistence
    /// is reachable without a database.
    async fn spawn() -> Self {
        let app = build_app(AppState::fake());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn mint_token(username: &str, ttl_secs: i64) -> String {
    let now = OffsetDateTime::now_utc().unix_timestamp();
    let claims = Claims {
        sub: username.to_owned(),
        iat: (now - 10) as usize,
        exp: (now + ttl_secs) as usize,
        iss: JWT_ISSUER.to_owned(),
        aud: JWT_AUDIENCE.to_owned(),
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .expect("failed to encode jwt")
}

async fn error_message(res: reqwest::Response) -> String {
    let body: serde_json::Value = res.json().await.unwrap();
    body["error"].as_str().expect("error field").to_owned()
}

#[tokio::test]
async fn preflight_is_answered_before_auth_for_any_path() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    for path in ["/create-blog", "/user/profile", "/no-such-route"] {
        let res = client
            .request(reqwest::Method::OPTIONS, format!("{}{}", srv.base_url, path))
            .header("Origin", "http://localhost:3000")
            .header("Access-Control-Request-Method", "POST")
            .send()
            .await
            .unwrap();

        assert!(
            res.status().is_success(),
            "preflight for {} got {}",
            path,
            res.status()
        );
        assert!(res
            .headers()
            .contains_key("access-control-allow-origin"));
    }
}

#[tokio::test]
async fn unmatched_route_is_json_not_found() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/definitely-not-a-route", srv.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(error_message(res).await, "Not Found");
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/user/profile", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(error_message(res).await, "Authorization token required");

    let res = client
        .post(format!("{}/create-blog", srv.base_url))
        .json(&json!({"title": "T", "description": "D", "content": "C"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn non_bearer_scheme_counts_as_missing_credential() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/user/profile", srv.base_url))
        .header("Authorization", "Basic YWxpY2U6c2VjcmV0")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(error_message(res).await, "Authorization token required");
}

#[tokio::test]
async fn malformed_token_is_rejected() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/user/blogs", srv.base_url))
        .bearer_auth("not-a-jwt")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(error_message(res).await, "Invalid or expired token");
}

#[tokio::test]
async fn expired_token_is_rejected() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    // Far enough in the past to clear the default validation leeway.
    let token = mint_token("alice", -300);

    let res = client
        .get(format!("{}/user/blogs", srv.base_url))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(error_message(res).await, "Invalid or expired token");
}

#[tokio::test]
async fn create_blog_validates_fields_after_auth() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = mint_token("alice", 300);

    let res = client
        .post(format!("{}/create-blog", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({"title": "T", "description": "D"}))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        error_message(res).await,
        "Title, description, and content are required"
    );
}

#[tokio::test]
async fn update_and_delete_require_a_blog_id() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = mint_token("alice", 300);

    let res = client
        .put(format!("{}/update-blog", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({"title": "New title"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_message(res).await, "Blog ID is required");

    let res = client
        .delete(format!("{}/delete-blog", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_message(res).await, "Blog ID is required");
}

#[tokio::test]
async fn search_requires_a_non_empty_query() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = mint_token("alice", 300);

    for url in [
        format!("{}/search", srv.base_url),
        format!("{}/search?query=", srv.base_url),
        format!("{}/search?query=%20%20", srv.base_url),
    ] {
        let res = client.get(url).bearer_auth(&token).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_message(res).await, "Search query is required");
    }
}

#[tokio::test]
async fn login_and_register_validate_fields() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/login", srv.base_url))
        .json(&json!({"username": "alice"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        error_message(res).await,
        "Username and password are required"
    );

    let res = client
        .post(format!("{}/register", srv.base_url))
        .json(&json!({"username": "alice", "password": "secret1"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_message(res).await, "All fields are required");
}

#[tokio::test]
async fn search_rejects_missing_token_before_validating_query() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/search?query=", srv.base_url))
        .send()
        .await
        .unwrap();

    // Authentication runs first; the empty query is never inspected.
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}
