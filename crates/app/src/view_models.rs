//! One view-model per dashboard view.
//!
//! Every view-model follows the same shape:
//! - `refresh()` fetches everything the view shows, concurrently, into
//!   sequenced slots and returns a [`RefreshReport`](crate::slot::RefreshReport)
//! - `snapshot()` returns a plain copy of the current state for rendering
//! - `activate()` starts the view's pollers and returns an
//!   [`Activation`](crate::poller::Activation); dropping it stops them
//!
//! Mutations send exactly one request and, only when it succeeds, run the
//! view's refresh exactly once.

pub mod chart;
pub mod counter;
pub mod home;
pub mod host_status;
pub mod services;

use std::future::Future;

use tiadmin_domain::error::ApiError;
use tiadmin_domain::id::ProcId;
use tiadmin_domain::process::Process;

use crate::ports::AdminApi;
use crate::slot::RefreshReport;

pub use chart::{ChartState, ChartViewModel};
pub use counter::CounterViewModel;
pub use home::{HomeState, HomeViewModel};
pub use host_status::{HostStatusState, HostStatusViewModel};
pub use services::{ServicesState, ServicesViewModel};

/// Lifecycle action on an existing process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessAction {
    Start,
    Stop,
    Delete,
}

impl ProcessAction {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Delete => "delete",
        }
    }

    async fn send<A: AdminApi>(self, api: &A, proc_id: &ProcId) -> Result<Process, ApiError> {
        match self {
            Self::Start => api.start_process(proc_id).await,
            Self::Stop => api.stop_process(proc_id).await,
            Self::Delete => api.delete_process(proc_id).await,
        }
    }
}

/// Await `request`; on success run `refresh` once.
pub(crate) async fn mutate_then_refresh<T, Fut>(
    action: &'static str,
    request: impl Future<Output = Result<T, ApiError>>,
    refresh: impl FnOnce() -> Fut,
) -> Result<T, ApiError>
where
    Fut: Future<Output = RefreshReport>,
{
    match request.await {
        Ok(value) => {
            tracing::debug!(action, "mutation accepted, refreshing");
            refresh().await;
            Ok(value)
        }
        Err(err) => {
            tracing::warn!(action, error = %err, "mutation failed");
            Err(err)
        }
    }
}

pub(crate) async fn run_process_action<A, Fut>(
    api: &A,
    action: ProcessAction,
    proc_id: &ProcId,
    refresh: impl FnOnce() -> Fut,
) -> Result<Process, ApiError>
where
    A: AdminApi,
    Fut: Future<Output = RefreshReport>,
{
    mutate_then_refresh(action.label(), action.send(api, proc_id), refresh).await
}
