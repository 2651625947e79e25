//! HTTP API client wrapping `gloo-net`, implementing the application ports.

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use tiadmin_app::ports::{AdminApi, CounterApi};
use tiadmin_domain::error::{ApiError, ModelError};
use tiadmin_domain::host::Host;
use tiadmin_domain::id::{MachId, ProcId};
use tiadmin_domain::metrics::{Counter, PerfMetrics};
use tiadmin_domain::process::{NewProcess, Process};
use tiadmin_domain::service::Service;
use tiadmin_domain::settings::DashboardSettings;

fn into_api_error(err: gloo_net::Error) -> ApiError {
    match err {
        gloo_net::Error::SerdeError(err) => ApiError::Decode(err.to_string()),
        other => ApiError::Transport(other.to_string()),
    }
}

/// Check the HTTP response status and extract an error if non-2xx.
///
/// The backend explains failures with `{errCode, reason}`; anything else
/// falls back to the bare status text.
async fn check_response(resp: Response) -> Result<Response, ApiError> {
    if resp.ok() {
        return Ok(resp);
    }
    let status = resp.status();
    let reason = match resp.json::<ModelError>().await {
        Ok(body) if !body.reason.is_empty() => body.reason,
        _ => resp.status_text(),
    };
    Err(ApiError::Status { status, reason })
}

async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    let resp = check_response(resp).await?;
    resp.json().await.map_err(into_api_error)
}

async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, ApiError> {
    let resp = Request::get(url).send().await.map_err(into_api_error)?;
    read_json(resp).await
}

/// Percent-encode a query parameter value (handles `+`, `&`, `=`, spaces, etc.).
fn encode_query_value(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('+', "%2B")
        .replace('&', "%26")
        .replace('=', "%3D")
        .replace(' ', "%20")
        .replace('#', "%23")
}

/// Make a page-relative base absolute from the site root, so it does not
/// resolve against the current client-side route.
fn rooted(base: &str) -> String {
    let base = base.trim_end_matches('/');
    if base.contains("://") || base.starts_with('/') {
        base.to_string()
    } else {
        format!("/{base}")
    }
}

/// Client for the management REST API.
#[derive(Debug, Clone)]
pub struct GlooAdminApi {
    base: String,
}

impl GlooAdminApi {
    pub fn new(settings: &DashboardSettings) -> Self {
        Self {
            base: rooted(&settings.api_base),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path.trim_start_matches('/'))
    }
}

impl AdminApi for GlooAdminApi {
    async fn list_hosts(&self) -> Result<Vec<Host>, ApiError> {
        get_json(&self.url("hosts")).await
    }

    async fn get_host(&self, mach_id: &MachId) -> Result<Host, ApiError> {
        get_json(&self.url(&format!("hosts/{mach_id}"))).await
    }

    async fn list_services(&self) -> Result<Vec<Service>, ApiError> {
        get_json(&self.url("services")).await
    }

    async fn list_processes(&self) -> Result<Vec<Process>, ApiError> {
        get_json(&self.url("processes")).await
    }

    async fn find_processes_by_host(&self, mach_id: &MachId) -> Result<Vec<Process>, ApiError> {
        let url = self.url(&format!(
            "processes/findByHost?machID={}",
            encode_query_value(mach_id.as_str())
        ));
        get_json(&url).await
    }

    async fn create_process(&self, request: &NewProcess) -> Result<Process, ApiError> {
        let resp = Request::post(&self.url("processes"))
            .json(request)
            .map_err(into_api_error)?
            .send()
            .await
            .map_err(into_api_error)?;
        read_json(resp).await
    }

    async fn start_process(&self, proc_id: &ProcId) -> Result<Process, ApiError> {
        get_json(&self.url(&format!("processes/{proc_id}/start"))).await
    }

    async fn stop_process(&self, proc_id: &ProcId) -> Result<Process, ApiError> {
        get_json(&self.url(&format!("processes/{proc_id}/stop"))).await
    }

    async fn delete_process(&self, proc_id: &ProcId) -> Result<Process, ApiError> {
        let resp = Request::delete(&self.url(&format!("processes/{proc_id}")))
            .send()
            .await
            .map_err(into_api_error)?;
        read_json(resp).await
    }

    async fn perf_metrics(&self) -> Result<PerfMetrics, ApiError> {
        get_json(&self.url("monitor/real/tidb_perf")).await
    }
}

/// Client for the standalone counter endpoint.
#[derive(Debug, Clone)]
pub struct GlooCounterApi {
    url: String,
}

impl GlooCounterApi {
    pub fn new(settings: &DashboardSettings) -> Self {
        Self {
            url: settings.counter_url.clone(),
        }
    }
}

impl CounterApi for GlooCounterApi {
    async fn fetch_counter(&self) -> Result<Counter, ApiError> {
        get_json(&self.url).await
    }
}

/// Fetch the runtime settings published by the server at `/config.json`.
///
/// A missing or malformed file is not fatal: the dashboard falls back to
/// the built-in defaults.
pub async fn load_settings() -> DashboardSettings {
    match get_json::<DashboardSettings>("/config.json").await {
        Ok(settings) => settings,
        Err(err) => {
            leptos::logging::warn!("using default settings, /config.json unavailable: {err}");
            DashboardSettings::default()
        }
    }
}
