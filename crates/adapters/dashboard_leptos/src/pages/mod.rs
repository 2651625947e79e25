mod chart;
mod counter;
mod home;
mod host_status;
mod not_found;
mod services;

pub use chart::Chart;
pub use counter::Counter;
pub use home::Home;
pub use host_status::HostStatus;
pub use not_found::NotFound;
pub use services::Services;

use leptos::prelude::*;
use tiadmin_domain::chart::{ChartPoint, PerfChart};
use tiadmin_domain::error::{ApiError, TiAdminError};
use tiadmin_domain::form::AfterSubmit;
use tiadmin_domain::metrics::PerfSeries;
use tiadmin_domain::process::Process;

/// Points of one strip, oldest first; empty before the first sample.
fn points_of(chart: &PerfChart, metric: PerfSeries) -> Vec<ChartPoint> {
    chart
        .series(metric)
        .map(|series| series.points().iter().copied().collect())
        .unwrap_or_default()
}

/// Report a failed process action. Failures are only logged; the tables
/// keep showing the last good data.
fn log_action_failure(action: &str, err: &ApiError) {
    leptos::logging::warn!("process {action} failed: {err}");
}

/// Outcome handling shared by both new-process dialogs.
///
/// Returns `true` when the dialog should close, which only happens once the
/// process was created. A missing selection raises the blocking "invalid
/// selection" alert; a rejected request is logged. Both keep the input.
fn handle_create_result(result: Result<Process, TiAdminError>) -> bool {
    let next = AfterSubmit::of(&result);
    match result {
        Ok(process) => {
            leptos::logging::log!("created process {} ({})", process.proc_id, process.svc_name);
        }
        Err(TiAdminError::Validation(err)) => {
            leptos::logging::warn!("{err}");
            if let Err(js) = window().alert_with_message("invalid selection") {
                leptos::logging::warn!("alert failed: {js:?}");
            }
        }
        Err(TiAdminError::Api(err)) => log_action_failure("create", &err),
    }
    next == AfterSubmit::Close
}
