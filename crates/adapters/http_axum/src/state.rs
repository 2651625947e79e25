//! Shared application state for axum handlers.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tiadmin_domain::settings::DashboardSettings;

/// State shared across all handlers.
///
/// `Clone` only bumps the `Arc`s.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Settings handed to the dashboard at `/config.json`.
    pub settings: Arc<DashboardSettings>,
    /// Directory holding `index.html` and the compiled bundle.
    pub assets_dir: Arc<PathBuf>,
}

impl AppState {
    pub fn new(settings: DashboardSettings, assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            settings: Arc::new(settings),
            assets_dir: Arc::new(assets_dir.into()),
        }
    }

    #[must_use]
    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }

    #[must_use]
    pub fn index_file(&self) -> PathBuf {
        self.assets_dir.join("index.html")
    }
}
