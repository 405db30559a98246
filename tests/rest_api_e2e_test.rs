//! End-to-end REST API tests against a real listener

use std::net::SocketAddr;
use std::sync::Arc;

use racelab_core::{Dispatcher, ShutdownSignal};
use racelab_rest_api::{create_app, AppConfig, AppContext};

/// Bind the app on an ephemeral port and serve it in the background.
async fn spawn_server() -> SocketAddr {
    let dispatcher = Arc::new(Dispatcher::new(ShutdownSignal::none()));
    let app = create_app(AppContext::new(dispatcher), AppConfig::default());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server task");
    });

    addr
}

#[tokio::test]
async fn resolved_id_round_trips_over_http() {
    let addr = spawn_server().await;
    let response = reqwest::get(format!("http://{addr}/safe-singleton/carol/0"))
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["id"], "carol");
    assert_eq!(body["timeout_ms"], 0);
    assert_eq!(body["discipline"], "call-local");
    assert_eq!(body["strategy"], "call-local");
    assert!(body["timestamp_ms"].as_i64().unwrap() > 0);
    assert!(body["handler"]["instance_id"].as_u64().unwrap() > 0);
}

#[tokio::test]
async fn omitted_timeout_defaults_to_100() {
    let addr = spawn_server().await;
    let body: serde_json::Value = reqwest::get(format!("http://{addr}/unsafe/dave"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["id"], "dave");
    assert_eq!(body["timeout_ms"], 100);
}

#[tokio::test]
async fn non_numeric_timeout_returns_400_envelope() {
    let addr = spawn_server().await;
    let response = reqwest::get(format!("http://{addr}/safe-prototype/erin/later"))
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    assert_eq!(body["error"]["status"], 400);
}

#[tokio::test]
async fn unknown_route_returns_404_envelope() {
    let addr = spawn_server().await;
    let response = reqwest::get(format!("http://{addr}/mystery/alice"))
        .await
        .unwrap();

    assert_eq!(response.status(), 404);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn one_bad_call_does_not_stop_the_server() {
    let addr = spawn_server().await;

    let bad = reqwest::get(format!("http://{addr}/unsafe/x/nope"))
        .await
        .unwrap();
    assert_eq!(bad.status(), 400);

    // The server keeps accepting calls afterwards.
    let good = reqwest::get(format!("http://{addr}/unsafe/x/0")).await.unwrap();
    assert_eq!(good.status(), 200);
}

#[tokio::test]
async fn health_and_banner_respond() {
    let addr = spawn_server().await;

    let health: serde_json::Value = reqwest::get(format!("http://{addr}/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["status"], "healthy");

    let banner: serde_json::Value = reqwest::get(format!("http://{addr}/"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(banner["endpoints"]["unsafe"].is_string());
}
