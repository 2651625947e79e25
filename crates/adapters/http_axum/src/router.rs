//! Axum router assembly.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use tiadmin_domain::settings::DashboardSettings;

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// `/health` and `/config.json` are answered directly; every other path is
/// looked up in the assets directory, falling back to `index.html` so the
/// dashboard's own router can resolve it. Includes a [`TraceLayer`] that
/// logs each HTTP request/response at the `DEBUG` level.
pub fn build(state: AppState) -> Router {
    if !state.index_file().is_file() {
        tracing::warn!(
            assets_dir = %state.assets_dir().display(),
            "index.html not found, the dashboard will not load"
        );
    }
    let assets = ServeDir::new(state.assets_dir()).fallback(ServeFile::new(state.index_file()));

    Router::new()
        .route("/health", get(health_check))
        .route("/config.json", get(dashboard_settings))
        .fallback_service(assets)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

async fn dashboard_settings(State(state): State<AppState>) -> Json<DashboardSettings> {
    Json(DashboardSettings::clone(&state.settings))
}
