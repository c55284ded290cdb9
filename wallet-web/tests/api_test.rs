//! End-to-end tests for wallet-web.
//!
//! Each test binds the router on an ephemeral port with its own state file.
//!
//! Run with: cargo test -p wallet-web --test api_test

use reqwest::header::{ACCESS_CONTROL_ALLOW_ORIGIN, LOCATION, ORIGIN};
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::path::PathBuf;
use tempfile::TempDir;
use wallet_web::config::{Config, CorsPolicy};
use wallet_web::state::AppState;

/// A running server plus the client and files backing it.
struct TestApp {
    base: String,
    client: reqwest::Client,
    state_file: PathBuf,
    _dir: TempDir,
}

impl TestApp {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn status(&self) -> Value {
        let response = self.client.get(self.url("/api/wallet-status")).send().await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        response.json().await.unwrap()
    }
}

async fn spawn_app_with(cors: CorsPolicy) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let state_file = dir.path().join("wallet_address.json");

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address: SocketAddr = listener.local_addr().unwrap();

    let config = Config {
        address,
        state_file: state_file.clone(),
        cors,
    };
    let state = AppState::new(config).await.unwrap();
    let app = wallet_web::router(state);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Do not follow the 303 from /redirect-to-next.
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp {
        base: format!("http://{}", address),
        client,
        state_file,
        _dir: dir,
    }
}

async fn spawn_app() -> TestApp {
    spawn_app_with(CorsPolicy::Permissive).await
}

#[tokio::test]
async fn test_liveness() {
    let app = spawn_app().await;

    let response = app.client.get(app.url("/api/")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"message": "Welcome to Cryptonian API!"}));
}

#[tokio::test]
async fn test_status_defaults_to_disconnected() {
    let app = spawn_app().await;

    assert_eq!(
        app.status().await,
        json!({"wallet_address": "", "connected": false})
    );
}

#[tokio::test]
async fn test_connect_status_disconnect_flow() {
    let app = spawn_app().await;

    let response = app
        .client
        .post(app.url("/api/connect-wallet"))
        .json(&json!({"address": "0xABC"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Wallet connected successfully");

    assert_eq!(
        app.status().await,
        json!({"wallet_address": "0xABC", "connected": true})
    );

    let response = app
        .client
        .post(app.url("/api/disconnect-wallet"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({"status": "success", "message": "Wallet disconnected successfully"})
    );

    assert_eq!(
        app.status().await,
        json!({"wallet_address": "", "connected": false})
    );
    assert!(!app.state_file.exists());
}

#[tokio::test]
async fn test_disconnect_without_wallet_succeeds() {
    let app = spawn_app().await;

    for _ in 0..2 {
        let response = app
            .client
            .post(app.url("/api/disconnect-wallet"))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn test_redirect_clears_and_redirects() {
    let app = spawn_app().await;

    app.client
        .post(app.url("/api/connect-wallet"))
        .json(&json!({"address": "0xABC"}))
        .send()
        .await
        .unwrap();

    let response = app
        .client
        .post(app.url("/api/redirect-to-next"))
        .json(&json!({"url": "https://example.com"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(LOCATION).unwrap(),
        "https://example.com"
    );

    assert_eq!(
        app.status().await,
        json!({"wallet_address": "", "connected": false})
    );
}

#[tokio::test]
async fn test_redirect_does_not_validate_url() {
    let app = spawn_app().await;

    let response = app
        .client
        .post(app.url("/api/redirect-to-next"))
        .json(&json!({"url": "next-app/home"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(LOCATION).unwrap(), "next-app/home");
}

#[tokio::test]
async fn test_empty_address_is_rejected() {
    let app = spawn_app().await;

    app.client
        .post(app.url("/api/connect-wallet"))
        .json(&json!({"address": "0xKEEP"}))
        .send()
        .await
        .unwrap();

    let response = app
        .client
        .post(app.url("/api/connect-wallet"))
        .json(&json!({"address": ""}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert!(body["detail"].as_str().unwrap().contains("must not be empty"));

    assert_eq!(
        app.status().await,
        json!({"wallet_address": "0xKEEP", "connected": true})
    );
}

#[tokio::test]
async fn test_whitespace_address_is_stored() {
    let app = spawn_app().await;

    let response = app
        .client
        .post(app.url("/api/connect-wallet"))
        .json(&json!({"address": " "}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(
        app.status().await,
        json!({"wallet_address": " ", "connected": true})
    );
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let app = spawn_app().await;

    let response = app
        .client
        .post(app.url("/api/connect-wallet"))
        .json(&json!({"wallet": "0xABC"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert!(body["detail"].is_string());

    let response = app
        .client
        .post(app.url("/api/redirect-to-next"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_corrupt_state_file_is_server_error() {
    let app = spawn_app().await;
    std::fs::write(&app.state_file, b"garbage").unwrap();

    let response = app
        .client
        .get(app.url("/api/wallet-status"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json().await.unwrap();
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .starts_with("storage unavailable"));
}

#[tokio::test]
async fn test_unwritable_state_file_is_server_error() {
    let app = spawn_app().await;
    // A non-empty directory cannot be replaced or unlinked as a file.
    std::fs::create_dir(&app.state_file).unwrap();
    std::fs::write(app.state_file.join("occupied"), b"x").unwrap();

    let response = app
        .client
        .post(app.url("/api/connect-wallet"))
        .json(&json!({"address": "0xABC"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = app
        .client
        .post(app.url("/api/disconnect-wallet"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = app
        .client
        .post(app.url("/api/redirect-to-next"))
        .json(&json!({"url": "https://example.com"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.headers().get(LOCATION).is_none());
}

#[tokio::test]
async fn test_permissive_cors() {
    let app = spawn_app().await;

    let response = app
        .client
        .get(app.url("/api/wallet-status"))
        .header(ORIGIN, "http://anywhere.test")
        .send()
        .await
        .unwrap();
    assert_eq!(
        response.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_restricted_cors() {
    let cors = CorsPolicy::from_origins(&["http://localhost:3000"]).unwrap();
    let app = spawn_app_with(cors).await;

    let response = app
        .client
        .get(app.url("/api/wallet-status"))
        .header(ORIGIN, "http://localhost:3000")
        .send()
        .await
        .unwrap();
    assert_eq!(
        response.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:3000"
    );

    let response = app
        .client
        .get(app.url("/api/wallet-status"))
        .header(ORIGIN, "http://evil.test")
        .send()
        .await
        .unwrap();
    assert!(response.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}
