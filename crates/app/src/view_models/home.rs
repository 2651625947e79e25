//! Home view: TPS strip, alive-node count, storage summary and the service
//! list.

use std::sync::Arc;

use tiadmin_domain::chart::PerfChart;
use tiadmin_domain::host::{Host, StorageSummary, alive_count};
use tiadmin_domain::metrics::PerfSeries;
use tiadmin_domain::service::Service;
use tiadmin_domain::settings::PollIntervals;

use crate::poller::{self, Activation};
use crate::ports::{AdminApi, Scheduler};
use crate::slot::{RefreshReport, Slot};

/// Rendering copy of the home view.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeState {
    pub tps: PerfChart,
    pub hosts: Vec<Host>,
    pub services: Vec<Service>,
    /// Hosts reporting alive.
    pub num_of_nodes: usize,
    pub storage: StorageSummary,
}

pub struct HomeViewModel<A> {
    api: Arc<A>,
    tps: Slot<PerfChart>,
    hosts: Slot<Vec<Host>>,
    services: Slot<Vec<Service>>,
}

impl<A> Clone for HomeViewModel<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            tps: self.tps.clone(),
            hosts: self.hosts.clone(),
            services: self.services.clone(),
        }
    }
}

impl<A: AdminApi + 'static> HomeViewModel<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            tps: Slot::new(PerfChart::new(&[PerfSeries::Tps])),
            hosts: Slot::default(),
            services: Slot::default(),
        }
    }

    pub async fn refresh_tps(&self) -> RefreshReport {
        let token = self.tps.begin();
        let result = self.api.perf_metrics().await;
        let mut report = RefreshReport::new();
        report.record(
            "perf",
            self.tps
                .complete_with(token, result, |chart, sample| chart.record(&sample)),
        );
        report
    }

    pub async fn refresh_hosts(&self) -> RefreshReport {
        let token = self.hosts.begin();
        let result = self.api.list_hosts().await;
        let mut report = RefreshReport::new();
        report.record("hosts", self.hosts.complete(token, result));
        report
    }

    pub async fn refresh_services(&self) -> RefreshReport {
        let token = self.services.begin();
        let result = self.api.list_services().await;
        let mut report = RefreshReport::new();
        report.record("services", self.services.complete(token, result));
        report
    }

    /// Fetch everything the view shows.
    pub async fn refresh(&self) -> RefreshReport {
        let (tps, hosts, services) = futures_util::join!(
            self.refresh_tps(),
            self.refresh_hosts(),
            self.refresh_services()
        );
        let mut report = tps;
        report.merge(hosts).merge(services);
        report
    }

    pub fn snapshot(&self) -> HomeState {
        let hosts = self.hosts.snapshot();
        HomeState {
            tps: self.tps.snapshot(),
            num_of_nodes: alive_count(&hosts),
            storage: StorageSummary::from_hosts(&hosts),
            services: self.services.snapshot(),
            hosts,
        }
    }

    /// TPS on the fast interval, hosts on the slow one, services once.
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
        let notify = on_refresh.clone();
        scheduler.spawn(async move {
            vm.refresh_services().await;
            notify();
        });

        let vm = self.clone();
        let notify = on_refresh.clone();
        let tps = poller::start(scheduler, intervals.fast(), move || {
            let vm = vm.clone();
            let notify = notify.clone();
            async move {
                vm.refresh_tps().await;
                notify();
            }
        });

        let vm = self.clone();
        let hosts = poller::start(scheduler, intervals.slow(), move || {
            let vm = vm.clone();
            let notify = on_refresh.clone();
            async move {
                vm.refresh_hosts().await;
                notify();
            }
        });

        Activation::new(vec![tps, hosts])
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::testing::{Call, FakeApi, ManualScheduler, host, service};

    fn view_model() -> (FakeApi, HomeViewModel<FakeApi>) {
        let api = FakeApi::default();
        (api.clone(), HomeViewModel::new(Arc::new(api)))
    }

    #[tokio::test]
    async fn should_derive_node_count_and_storage_from_hosts() {
        let (api, vm) = view_model();
        api.with(|b| b.hosts = vec![host("h1", true, &[(100, 40)])]);

        vm.refresh().await;

        let state = vm.snapshot();
        assert_eq!(state.num_of_nodes, 1);
        assert_eq!(
            state.storage,
            StorageSummary {
                usage: 40,
                capacity: 100
            }
        );
    }

    #[tokio::test]
    async fn should_count_only_alive_hosts() {
        let (api, vm) = view_model();
        api.with(|b| {
            b.hosts = vec![
                host("h1", true, &[(100, 10)]),
                host("h2", false, &[(50, 5)]),
                host("h3", true, &[]),
            ];
        });

        vm.refresh_hosts().await;

        let state = vm.snapshot();
        assert_eq!(state.num_of_nodes, 2);
        assert_eq!(state.storage.capacity, 150);
        assert_eq!(state.storage.usage, 15);
    }

    #[tokio::test]
    async fn should_keep_previous_hosts_when_fetch_fails() {
        let (api, vm) = view_model();
        api.with(|b| b.hosts = vec![host("h1", true, &[(100, 40)])]);
        vm.refresh_hosts().await;

        api.fail("hosts");
        let report = vm.refresh().await;

        assert!(report.outcome("hosts").and_then(|o| o.error()).is_some());
        assert!(report.outcome("services").is_some_and(|o| o.is_updated()));
        assert_eq!(vm.snapshot().num_of_nodes, 1);
    }

    #[tokio::test]
    async fn should_fetch_services_once_and_poll_the_rest() {
        let (api, vm) = view_model();
        api.with(|b| b.services = vec![service("tidb", &["--port", "4000"])]);
        let scheduler = ManualScheduler::default();

        let activation = vm.activate(&scheduler, PollIntervals::default(), || {});
        scheduler.advance(Duration::from_secs(6)).await;

        assert_eq!(api.count(|c| *c == Call::ListServices), 1);
        assert_eq!(api.count(|c| *c == Call::Perf), 7);
        assert_eq!(api.count(|c| *c == Call::ListHosts), 3);
        assert_eq!(activation.len(), 2);
        assert_eq!(vm.snapshot().services.len(), 1);
        assert_eq!(vm.snapshot().tps.tick(), 7);
    }
}
