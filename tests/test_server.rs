//! The HTTP surface over a live CMS client.

mod common;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::connect_info::MockConnectInfo;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;
use tower::util::ServiceExt;

use common::{FakeCms, context, dead_cms_url};
use pharmasite::cms::endpoints;
use pharmasite::render::RenderOptions;
use pharmasite::server::{self, AppState, build_router};

fn app(cms_url: &str) -> axum::Router {
    let state = AppState::new(context(cms_url, Duration::from_secs(60)), RenderOptions::default());
    build_router(Arc::new(state)).layer(MockConnectInfo(SocketAddr::from(([127, 0, 0, 1], 9999))))
}

async fn body(resp: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn products_with_cms_down_is_empty_200() {
    let resp = app(&dead_cms_url().await)
        .oneshot(get("/api/products?searchTerm=para&selectedLetter=P"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let page: Value = serde_json::from_str(&body(resp).await).unwrap();
    assert_eq!(page["data"], json!([]));
    assert_eq!(page["meta"]["pagination"]["total"], 0);
    assert_eq!(page["error"], "Failed to fetch products");
}

#[tokio::test]
async fn products_query_reaches_the_cms() {
    let cms = FakeCms::start(vec![(
        endpoints::PRODUCTS,
        200,
        json!({
            "data": [{"id": 3, "attributes": {"name": "Paracetamol", "composition": "Paracetamol IP 500 mg"}}],
            "meta": {"pagination": {"page": 1, "pageSize": 12, "pageCount": 1, "total": 1}}
        }),
    )])
    .await;
    let resp = app(&cms.base_url)
        .oneshot(get("/api/products?selectedLetter=P&page=1"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let page: Value = serde_json::from_str(&body(resp).await).unwrap();
    assert_eq!(page["data"][0]["name"], "Paracetamol");

    let hit = cms
        .hits()
        .into_iter()
        .find(|h| h.endpoint == endpoints::PRODUCTS)
        .unwrap();
    let query = hit.query.unwrap();
    assert!(query.contains("pagination%5Bpage%5D=1"), "{query}");
    assert!(query.contains("%24startsWithi%5D=P"), "{query}");
}

#[tokio::test]
async fn every_page_renders_with_cms_down() {
    let url = dead_cms_url().await;
    for path in [
        "/about-us",
        "/about-us/leadership",
        "/investors",
        "/media",
        "/media/press-releases",
        "/media/perspectives",
        "/media/media-kit",
        "/our-business",
        "/community",
        "/contact-us",
    ] {
        let resp = app(&url).oneshot(get(path)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK, "{path}");
        let html = body(resp).await;
        assert!(html.contains("<h1>"), "{path} has no hero");
    }
}

#[tokio::test]
async fn contact_form_posts_lead() {
    let cms = FakeCms::start(vec![]).await;
    let req = Request::builder()
        .method("POST")
        .uri("/contact-us")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(
            "fullName=Asha+Rao&email=asha%40example.org&country=Kenya&message=Distributor+enquiry",
        ))
        .unwrap();
    let resp = app(&cms.base_url).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body(resp).await.contains("status success"));

    let hit = cms
        .hits()
        .into_iter()
        .find(|h| h.endpoint == endpoints::ENQUIRY_LEADS)
        .unwrap();
    assert_eq!(hit.method, axum::http::Method::POST);
    let data = &hit.body.unwrap()["data"];
    assert_eq!(data["fullName"], "Asha Rao");
    assert_eq!(data["country"], "Kenya");
}

#[tokio::test]
async fn contact_form_cms_validation_message_shown() {
    let cms = FakeCms::start(vec![(
        endpoints::ENQUIRY_LEADS,
        400,
        json!({"data": null, "error": {"status": 400, "name": "ValidationError", "message": "phone must be a valid number"}}),
    )])
    .await;
    let req = Request::builder()
        .method("POST")
        .uri("/contact-us")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({"fullName": "Asha Rao", "email": "asha@example.org", "phone": "abc", "message": "Hi"})
                .to_string(),
        ))
        .unwrap();
    let resp = app(&cms.base_url).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let reply: Value = serde_json::from_str(&body(resp).await).unwrap();
    assert_eq!(
        reply,
        json!({"success": false, "message": "phone must be a valid number"})
    );
}

#[tokio::test]
async fn bound_server_serves_until_cancelled() {
    let cancel = CancellationToken::new();
    let state = AppState::new(
        context(&dead_cms_url().await, Duration::from_secs(60)),
        RenderOptions::default(),
    );
    let (handle, addr) = server::bind("127.0.0.1:0", Arc::new(state), cancel.clone())
        .await
        .unwrap();

    let resp = reqwest::get(format!("http://{addr}/api/pages/investors"))
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let page: Value = resp.json().await.unwrap();
    assert_eq!(page["path"], "/investors");
    assert!(
        page["fallbacks"]
            .as_array()
            .unwrap()
            .contains(&json!("dividends"))
    );

    cancel.cancel();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .unwrap()
        .unwrap();
}
