//! End-to-end smoke tests for the tiadmind HTTP stack.
//!
//! Each test builds the real router over a temporary assets directory and
//! exercises it via `tower::ServiceExt::oneshot`; no TCP port is bound.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tiadmin_adapter_http_axum::router;
use tiadmin_adapter_http_axum::state::AppState;
use tiadmin_domain::settings::DashboardSettings;
use tower::ServiceExt;

const INDEX: &str = concat!(
    "<!doctype html><html><body>",
    r#"<script type="module" src="/tiadmin.js"></script>"#,
    "</body></html>",
);

/// Lay out a bundle the way `trunk build` does.
fn dist() -> TempDir {
    let dir = tempfile::tempdir().expect("temp dir");
    std::fs::write(dir.path().join("index.html"), INDEX).expect("index.html");
    std::fs::write(dir.path().join("tiadmin.js"), "export default 1;").expect("js");
    std::fs::write(dir.path().join("tiadmin_bg.wasm"), [0x00, 0x61, 0x73, 0x6d]).expect("wasm");
    dir
}

fn app(dir: &TempDir) -> axum::Router {
    router::build(AppState::new(DashboardSettings::default(), dir.path()))
}

async fn body_string(resp: axum::response::Response) -> String {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_ok_when_health_check_called() {
    let dir = dist();
    let resp = app(&dir).oneshot(get("/health")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_string(resp).await, "OK");
}

// ---------------------------------------------------------------------------
// Runtime settings
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_round_trip_default_settings_through_config_json() {
    let dir = dist();
    let resp = app(&dir).oneshot(get("/config.json")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let settings: DashboardSettings = serde_json::from_str(&body_string(resp).await).unwrap();
    assert_eq!(settings, DashboardSettings::default());
}

// ---------------------------------------------------------------------------
// Dashboard bundle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_serve_wasm_bundle() {
    let dir = dist();
    let resp = app(&dir).oneshot(get("/tiadmin_bg.wasm")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["content-type"], "application/wasm");
}

#[tokio::test]
async fn should_serve_index_for_every_dashboard_route() {
    let dir = dist();
    for uri in [
        "/dashboard/home",
        "/dashboard/host-status/h1",
        "/dashboard/services",
        "/dashboard/chart",
        "/counter",
        "/no/such/page",
    ] {
        let resp = app(&dir).oneshot(get(uri)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK, "{uri}");
        assert_eq!(body_string(resp).await, INDEX, "{uri}");
    }
}
