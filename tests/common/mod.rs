//! Shared integration-test harness: a fake Strapi CMS served by axum, page
//! contexts wired to it, and helpers for running the `pharmasite` binary.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::process::{Output, Stdio};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::body::Bytes;
use axum::extract::{Path, RawQuery, State};
use axum::http::{HeaderMap, Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use serde_json::{Value, json};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::TcpListener;
use tokio::process::{Child, Command};
use tokio_util::sync::CancellationToken;

use pharmasite::cms::http::DEFAULT_MAX_CACHED_RESPONSES;
use pharmasite::cms::{HttpCms, HttpCmsConfig};
use pharmasite::config::CatalogLoader;
use pharmasite::pages::PageContext;

/// Default timeout for waiting on a spawned process.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Environment variables the binary reads; cleared so the host
/// environment cannot leak into a test.
const SITE_ENV: [&str; 11] = [
    "PHARMASITE_CMS_URL",
    "PHARMASITE_CMS_TOKEN",
    "PHARMASITE_SITE_URL",
    "PHARMASITE_REVALIDATE",
    "PHARMASITE_ENV",
    "PHARMASITE_FALLBACKS",
    "PHARMASITE_BIND",
    "PHARMASITE_METRICS_PORT",
    "PHARMASITE_LOG_LEVEL",
    "PHARMASITE_LOG_FORMAT",
    "PHARMASITE_COLOR",
];

// ============================================================================
// Fake CMS
// ============================================================================

/// One request the fake CMS received.
#[derive(Debug, Clone)]
pub struct Hit {
    pub method: Method,
    pub endpoint: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Default)]
struct FakeState {
    responses: HashMap<String, (StatusCode, Value)>,
    hits: Mutex<Vec<Hit>>,
}

/// A Strapi stand-in on a random local port. Stops when dropped.
pub struct FakeCms {
    pub base_url: String,
    state: Arc<FakeState>,
    cancel: CancellationToken,
}

impl FakeCms {
    /// Starts a CMS that answers `endpoint` with the given status and
    /// body. Unknown endpoints answer a Strapi-style 404.
    pub async fn start(responses: Vec<(&str, u16, Value)>) -> Self {
        let state = Arc::new(FakeState {
            responses: responses
                .into_iter()
                .map(|(endpoint, status, body)| {
                    (
                        endpoint.to_string(),
                        (StatusCode::from_u16(status).unwrap(), body),
                    )
                })
                .collect(),
            hits: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/api/{*endpoint}", any(handle))
            .with_state(Arc::clone(&state));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let cancel = CancellationToken::new();
        let server_cancel = cancel.clone();
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move { server_cancel.cancelled().await })
                .await
                .ok();
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
            cancel,
        }
    }

    /// Every request received so far.
    pub fn hits(&self) -> Vec<Hit> {
        self.state.hits.lock().unwrap().clone()
    }

    /// Number of requests received for `endpoint`.
    pub fn hits_for(&self, endpoint: &str) -> usize {
        self.hits().iter().filter(|h| h.endpoint == endpoint).count()
    }
}

impl Drop for FakeCms {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn handle(
    State(state): State<Arc<FakeState>>,
    method: Method,
    Path(endpoint): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let body_json = serde_json::from_slice::<Value>(&body).ok();
    state.hits.lock().unwrap().push(Hit {
        method: method.clone(),
        endpoint: endpoint.clone(),
        query,
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: body_json.clone(),
    });

    if let Some((status, body)) = state.responses.get(&endpoint) {
        return (*status, axum::Json(body.clone())).into_response();
    }
    if method == Method::POST {
        let mut data = body_json
            .and_then(|b| b.get("data").cloned())
            .unwrap_or_else(|| json!({}));
        data["id"] = json!(1);
        return axum::Json(json!({"data": data, "meta": {}})).into_response();
    }
    (
        StatusCode::NOT_FOUND,
        axum::Json(json!({
            "data": null,
            "error": {"status": 404, "name": "NotFoundError", "message": "Not Found"}
        })),
    )
        .into_response()
}

/// A URL nothing listens on.
pub async fn dead_cms_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// Page context reading from `cms_url` with the built-in fallbacks.
pub fn context(cms_url: &str, revalidate: Duration) -> PageContext {
    let cms = HttpCms::new(HttpCmsConfig {
        base_url: cms_url.to_string(),
        token: Some("test-token".to_string()),
        default_revalidate: revalidate,
        max_cached_responses: DEFAULT_MAX_CACHED_RESPONSES,
    })
    .unwrap();
    PageContext {
        cms: Arc::new(cms),
        catalog: CatalogLoader::default().load_embedded().unwrap().catalog,
        revalidate,
    }
}

// ============================================================================
// Binary
// ============================================================================

fn command(args: &[&str]) -> std::process::Command {
    let mut cmd = std::process::Command::new(env!("CARGO_BIN_EXE_pharmasite"));
    for var in SITE_ENV {
        cmd.env_remove(var);
    }
    cmd.args(args);
    cmd
}

/// Runs the binary to completion.
pub fn run(args: &[&str]) -> Output {
    command(args).output().expect("failed to run pharmasite")
}

/// A running `pharmasite serve`, killed on drop.
pub struct ServeProcess {
    pub addr: SocketAddr,
    child: Child,
}

impl ServeProcess {
    /// Starts `serve` on a random port and waits for the bound address
    /// to appear in the JSON logs.
    pub async fn spawn(extra: &[&str]) -> Self {
        let mut args = vec!["-v", "--log-format", "json", "serve", "--bind", "127.0.0.1:0"];
        args.extend_from_slice(extra);
        let mut child = Command::from(command(&args))
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .expect("failed to spawn pharmasite serve");

        let stderr = child.stderr.take().expect("stderr not captured");
        let mut lines = BufReader::new(stderr).lines();
        let addr = tokio::time::timeout(DEFAULT_TIMEOUT, async {
            while let Some(line) = lines.next_line().await.expect("read stderr") {
                let Ok(event) = serde_json::from_str::<Value>(&line) else {
                    continue;
                };
                if let Some(addr) = event["fields"]["bound_addr"].as_str() {
                    return addr.parse::<SocketAddr>().expect("bound_addr");
                }
            }
            panic!("server exited before reporting its address");
        })
        .await
        .expect("timed out waiting for the server to bind");

        // Keep draining stderr so the child never blocks on a full pipe.
        tokio::spawn(async move { while let Ok(Some(_)) = lines.next_line().await {} });

        Self { addr, child }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Kills the server.
    pub async fn stop(mut self) {
        self.child.kill().await.ok();
    }
}
