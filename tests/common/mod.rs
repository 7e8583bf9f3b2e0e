#![allow(dead_code)]

use axum::{
    Json, Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Method, Request, StatusCode, header::CONTENT_TYPE},
    routing::post,
};
use serde_json::Value;
use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
};
use tokio::net::TcpListener;
use tower::ServiceExt;
use url::Url;

use vehicle_check::Config;
use vehicle_check::router::{VehicleState, vehicle_router};

pub const API_KEY: &str = "test-api-key";
pub const ENQUIRY_PATH: &str = "/vehicle-enquiry/v1/vehicles";

/// One request as seen by the stand-in DVLA server.
#[derive(Debug, Clone)]
pub struct CapturedCall {
    pub api_key: Option<String>,
    pub content_type: Option<String>,
    pub body: Value,
}

/// In-process stand-in for the Vehicle Enquiry API answering every call
/// with a fixed status and raw body.
pub struct MockDvla {
    pub addr: SocketAddr,
    calls: Arc<Mutex<Vec<CapturedCall>>>,
}

impl MockDvla {
    pub async fn spawn(status: StatusCode, body: &'static str) -> Self {
        let calls: Arc<Mutex<Vec<CapturedCall>>> = Arc::default();
        let recorded = calls.clone();

        let app = Router::new().route(
            ENQUIRY_PATH,
            post(move |headers: HeaderMap, Json(payload): Json<Value>| {
                let recorded = recorded.clone();
                async move {
                    let header = |name: &str| {
                        headers
                            .get(name)
                            .and_then(|v| v.to_str().ok())
                            .map(str::to_string)
                    };
                    recorded
                        .lock()
                        .expect("mock call log poisoned")
                        .push(CapturedCall {
                            api_key: header("x-api-key"),
                            content_type: header("content-type"),
                            body: payload,
                        });
                    (status, [(CONTENT_TYPE, "application/json")], body)
                }
            }),
        );

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind mock upstream");
        let addr = listener.local_addr().expect("mock upstream has no address");
        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("mock upstream crashed");
        });

        Self { addr, calls }
    }

    pub fn url(&self) -> Url {
        Url::parse(&format!("http://{}{}", self.addr, ENQUIRY_PATH)).expect("valid mock url")
    }

    pub fn calls(&self) -> Vec<CapturedCall> {
        self.calls.lock().expect("mock call log poisoned").clone()
    }
}

/// A URL nothing is listening on.
pub async fn unreachable_url() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind probe listener");
    let addr = listener.local_addr().expect("probe listener has no address");
    drop(listener);
    Url::parse(&format!("http://{addr}{ENQUIRY_PATH}")).expect("valid url")
}

pub fn config_for(upstream: Url) -> Config {
    let mut cfg = Config::with_api_key(API_KEY);
    cfg.production_url = upstream;
    cfg
}

pub fn app_for(cfg: &Config) -> Router {
    let state = VehicleState::new(cfg).expect("failed to build state");
    vehicle_router(state)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body was not JSON")
    }
}

pub async fn send(app: Router, method: Method, content_type: Option<&str>, body: String) -> TestResponse {
    let mut builder = Request::builder().method(method).uri("/api/vehicle");
    if let Some(ct) = content_type {
        builder = builder.header(CONTENT_TYPE, ct);
    }
    let resp = app
        .oneshot(builder.body(Body::from(body)).expect("failed to build request"))
        .await
        .expect("request failed");

    let status = resp.status();
    let headers = resp.headers().clone();
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body")
        .to_vec();
    TestResponse {
        status,
        headers,
        body,
    }
}

pub async fn post_json(app: Router, body: impl Into<String>) -> TestResponse {
    send(app, Method::POST, Some("application/json"), body.into()).await
}
