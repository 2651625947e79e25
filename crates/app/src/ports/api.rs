//! REST backend ports.

use std::future::Future;
use std::sync::Arc;

use tiadmin_domain::error::ApiError;
use tiadmin_domain::host::Host;
use tiadmin_domain::id::{MachId, ProcId};
use tiadmin_domain::metrics::{Counter, PerfMetrics};
use tiadmin_domain::process::{NewProcess, Process};
use tiadmin_domain::service::Service;

/// The management backend under `api/v1`.
pub trait AdminApi {
    /// `GET /hosts`
    fn list_hosts(&self) -> impl Future<Output = Result<Vec<Host>, ApiError>>;

    /// `GET /hosts/{machID}`
    fn get_host(&self, mach_id: &MachId) -> impl Future<Output = Result<Host, ApiError>>;

    /// `GET /services`
    fn list_services(&self) -> impl Future<Output = Result<Vec<Service>, ApiError>>;

    /// `GET /processes`
    fn list_processes(&self) -> impl Future<Output = Result<Vec<Process>, ApiError>>;

    /// `GET /processes/findByHost?machID=`
    fn find_processes_by_host(
        &self,
        mach_id: &MachId,
    ) -> impl Future<Output = Result<Vec<Process>, ApiError>>;

    /// `POST /processes`: the backend echoes the request back.
    fn create_process(
        &self,
        request: &NewProcess,
    ) -> impl Future<Output = Result<Process, ApiError>>;

    /// `GET /processes/{procID}/start`
    fn start_process(&self, proc_id: &ProcId) -> impl Future<Output = Result<Process, ApiError>>;

    /// `GET /processes/{procID}/stop`
    fn stop_process(&self, proc_id: &ProcId) -> impl Future<Output = Result<Process, ApiError>>;

    /// `DELETE /processes/{procID}`
    fn delete_process(&self, proc_id: &ProcId)
    -> impl Future<Output = Result<Process, ApiError>>;

    /// `GET /monitor/real/tidb_perf`
    fn perf_metrics(&self) -> impl Future<Output = Result<PerfMetrics, ApiError>>;
}

/// The standalone demo counter.
pub trait CounterApi {
    fn fetch_counter(&self) -> impl Future<Output = Result<Counter, ApiError>>;
}

impl<T: AdminApi> AdminApi for Arc<T> {
    fn list_hosts(&self) -> impl Future<Output = Result<Vec<Host>, ApiError>> {
        (**self).list_hosts()
    }

    fn get_host(&self, mach_id: &MachId) -> impl Future<Output = Result<Host, ApiError>> {
        (**self).get_host(mach_id)
    }

    fn list_services(&self) -> impl Future<Output = Result<Vec<Service>, ApiError>> {
        (**self).list_services()
    }

    fn list_processes(&self) -> impl Future<Output = Result<Vec<Process>, ApiError>> {
        (**self).list_processes()
    }

    fn find_processes_by_host(
        &self,
        mach_id: &MachId,
    ) -> impl Future<Output = Result<Vec<Process>, ApiError>> {
        (**self).find_processes_by_host(mach_id)
    }

    fn create_process(
        &self,
        request: &NewProcess,
    ) -> impl Future<Output = Result<Process, ApiError>> {
        (**self).create_process(request)
    }

    fn start_process(&self, proc_id: &ProcId) -> impl Future<Output = Result<Process, ApiError>> {
        (**self).start_process(proc_id)
    }

    fn stop_process(&self, proc_id: &ProcId) -> impl Future<Output = Result<Process, ApiError>> {
        (**self).stop_process(proc_id)
    }

    fn delete_process(
        &self,
        proc_id: &ProcId,
    ) -> impl Future<Output = Result<Process, ApiError>> {
        (**self).delete_process(proc_id)
    }

    fn perf_metrics(&self) -> impl Future<Output = Result<PerfMetrics, ApiError>> {
        (**self).perf_metrics()
    }
}
