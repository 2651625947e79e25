//! Runtime settings the server publishes at `/config.json` and the
//! dashboard reads before mounting.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default base path of the REST backend, relative to the page.
pub const DEFAULT_API_BASE: &str = "api/v1";

/// Default location of the standalone counter endpoint.
pub const DEFAULT_COUNTER_URL: &str = "http://127.0.0.1:10081/api/v1/counter";

/// Refresh periods, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PollIntervals {
    /// Metric strips and the counter.
    pub fast_ms: u32,
    /// Host, service and process lists, and the shared host store.
    pub slow_ms: u32,
    /// How often the sidebar re-reads the shared host store.
    pub sidebar_ms: u32,
}

impl PollIntervals {
    #[must_use]
    pub fn fast(&self) -> Duration {
        Duration::from_millis(u64::from(self.fast_ms))
    }

    #[must_use]
    pub fn slow(&self) -> Duration {
        Duration::from_millis(u64::from(self.slow_ms))
    }

    #[must_use]
    pub fn sidebar(&self) -> Duration {
        Duration::from_millis(u64::from(self.sidebar_ms))
    }
}

impl Default for PollIntervals {
    fn default() -> Self {
        Self {
            fast_ms: 1000,
            slow_ms: 3000,
            sidebar_ms: 1000,
        }
    }
}

/// Everything the dashboard needs to know about its environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardSettings {
    pub api_base: String,
    pub counter_url: String,
    pub intervals: PollIntervals,
}

impl DashboardSettings {
    /// Join `path` onto the API base without doubling slashes.
    #[must_use]
    pub fn api_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            counter_url: DEFAULT_COUNTER_URL.to_string(),
            intervals: PollIntervals::default(),
        }
    }
}
