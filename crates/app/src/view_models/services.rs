//! Services view: every service, every process and every host.

use std::sync::Arc;

use tiadmin_domain::error::{ApiError, TiAdminError};
use tiadmin_domain::form::{DialogScope, NewProcessForm};
use tiadmin_domain::host::Host;
use tiadmin_domain::id::ProcId;
use tiadmin_domain::process::{Process, filter_by_service};
use tiadmin_domain::service::Service;
use tiadmin_domain::settings::PollIntervals;

use super::{ProcessAction, mutate_then_refresh, run_process_action};
use crate::poller::{self, Activation};
use crate::ports::{AdminApi, Scheduler};
use crate::slot::{RefreshReport, Slot};

/// Rendering copy of the services view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServicesState {
    pub services: Vec<Service>,
    pub processes: Vec<Process>,
    pub hosts: Vec<Host>,
}

impl ServicesState {
    /// Processes of `svc_name`, or all of them when the filter is empty.
    #[must_use]
    pub fn filtered_processes(&self, svc_name: &str) -> Vec<Process> {
        filter_by_service(&self.processes, svc_name)
            .into_iter()
            .cloned()
            .collect()
    }
}

pub struct ServicesViewModel<A> {
    api: Arc<A>,
    services: Slot<Vec<Service>>,
    processes: Slot<Vec<Process>>,
    hosts: Slot<Vec<Host>>,
}

impl<A> Clone for ServicesViewModel<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            services: self.services.clone(),
            processes: self.processes.clone(),
            hosts: self.hosts.clone(),
        }
    }
}

impl<A: AdminApi + 'static> ServicesViewModel<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            services: Slot::default(),
            processes: Slot::default(),
            hosts: Slot::default(),
        }
    }

    pub async fn refresh(&self) -> RefreshReport {
        let services = async {
            let token = self.services.begin();
            let result = self.api.list_services().await;
            self.services.complete(token, result)
        };
        let processes = async {
            let token = self.processes.begin();
            let result = self.api.list_processes().await;
            self.processes.complete(token, result)
        };
        let hosts = async {
            let token = self.hosts.begin();
            let result = self.api.list_hosts().await;
            self.hosts.complete(token, result)
        };
        let (services, processes, hosts) = futures_util::join!(services, processes, hosts);

        let mut report = RefreshReport::new();
        report
            .record("services", services)
            .record("processes", processes)
            .record("hosts", hosts);
        report
    }

    pub fn snapshot(&self) -> ServicesState {
        ServicesState {
            services: self.services.snapshot(),
            processes: self.processes.snapshot(),
            hosts: self.hosts.snapshot(),
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

    /// An empty dialog form; both a service and a host must be picked.
    pub fn new_process_form(&self) -> NewProcessForm {
        NewProcessForm::new(DialogScope::AnyHost)
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
    /// Returns [`TiAdminError::Validation`] without sending anything when the
    /// service or host is missing, or [`TiAdminError::Api`] when the backend
    /// rejects the request.
    pub async fn submit_new_process(&self, form: &NewProcessForm) -> Result<Process, TiAdminError> {
        let request = form.submit()?;
        let created =
            mutate_then_refresh("create", self.api.create_process(&request), || self.refresh())
                .await?;
        Ok(created)
    }
}
