//! Host status view: one host, the processes on it, and process actions.

use std::sync::Arc;

use tiadmin_domain::error::{ApiError, TiAdminError};
use tiadmin_domain::form::{DialogScope, NewProcessForm};
use tiadmin_domain::host::Host;
use tiadmin_domain::id::{MachId, ProcId};
use tiadmin_domain::process::Process;
use tiadmin_domain::service::Service;
use tiadmin_domain::settings::PollIntervals;

use super::{ProcessAction, mutate_then_refresh, run_process_action};
use crate::poller::{self, Activation};
use crate::ports::{AdminApi, Scheduler};
use crate::slot::{RefreshReport, Slot};

/// Rendering copy of the host status view.
#[derive(Debug, Clone, PartialEq)]
pub struct HostStatusState {
    pub mach_id: MachId,
    /// `None` until the host detail has been fetched once.
    pub host: Option<Host>,
    pub processes: Vec<Process>,
    pub services: Vec<Service>,
}

pub struct HostStatusViewModel<A> {
    api: Arc<A>,
    mach_id: MachId,
    host: Slot<Option<Host>>,
    processes: Slot<Vec<Process>>,
    services: Slot<Vec<Service>>,
}

impl<A> Clone for HostStatusViewModel<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            mach_id: self.mach_id.clone(),
            host: self.host.clone(),
            processes: self.processes.clone(),
            services: self.services.clone(),
        }
    }
}

impl<A: AdminApi + 'static> HostStatusViewModel<A> {
    pub fn new(api: Arc<A>, mach_id: MachId) -> Self {
        Self {
            api,
            mach_id,
            host: Slot::default(),
            processes: Slot::default(),
            services: Slot::default(),
        }
    }

    pub fn mach_id(&self) -> &MachId {
        &self.mach_id
    }

    /// Fetch services, host detail and the processes on this host.
    pub async fn refresh(&self) -> RefreshReport {
        let services = async {
            let token = self.services.begin();
            let result = self.api.list_services().await;
            self.services.complete(token, result)
        };
        let host = async {
            let token = self.host.begin();
            let result = self.api.get_host(&self.mach_id).await;
            self.host.complete_some(token, result)
        };
        let processes = async {
            let token = self.processes.begin();
            let result = self.api.find_processes_by_host(&self.mach_id).await;
            self.processes.complete(token, result)
        };
        let (services, host, processes) = futures_util::join!(services, host, processes);

        let mut report = RefreshReport::new();
        report
            .record("services", services)
            .record("host", host)
            .record("processes", processes);
        report
    }

    pub fn snapshot(&self) -> HostStatusState {
        HostStatusState {
            mach_id: self.mach_id.clone(),
            host: self.host.snapshot(),
            processes: self.processes.snapshot(),
            services: self.services.snapshot(),
        }
    }

    pub fn activate<S, N>(
        &self,
        scheduler: &S,
        intervals: PollIntervals,
        on_refresh: N,
    ) -> Activation<S>
    where
        S: Scheduler,
        N: Fn() + Clone + 'static,
    {
        let vm = self.clone();
        Activation::new(vec![poller::start(scheduler, intervals.slow(), move || {
            let vm = vm.clone();
            let on_refresh = on_refresh.clone();
            async move {
                vm.refresh().await;
                on_refresh();
            }
        })])
    }

    /// An empty dialog form with this host already chosen.
    pub fn new_process_form(&self) -> NewProcessForm {
        NewProcessForm::new(DialogScope::OnHost(self.mach_id.clone()))
    }

    pub async fn start(&self, proc_id: &ProcId) -> Result<Process, ApiError> {
        self.run(ProcessAction::Start, proc_id).await
    }

    pub async fn stop(&self, proc_id: &ProcId) -> Result<Process, ApiError> {
        self.run(ProcessAction::Stop, proc_id).await
    }

    pub async fn delete(&self, proc_id: &ProcId) -> Result<Process, ApiError> {
        self.run(ProcessAction::Delete, proc_id).await
    }

    pub async fn run(&self, action: ProcessAction, proc_id: &ProcId) -> Result<Process, ApiError> {
        run_process_action(&*self.api, action, proc_id, || self.refresh()).await
    }

    /// Validate the dialog and create the process.
    ///
    /// # Errors
    ///
    /// Returns [`TiAdminError::Validation`] without sending anything when no
    /// service is selected, or [`TiAdminError::Api`] when the backend
    /// rejects the request.
    pub async fn submit_new_process(&self, form: &NewProcessForm) -> Result<Process, TiAdminError> {
        let request = form.submit()?;
        let created =
            mutate_then_refresh("create", self.api.create_process(&request), || self.refresh())
                .await?;
        Ok(created)
    }
}
