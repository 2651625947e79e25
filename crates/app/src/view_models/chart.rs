//! Chart view: TPS, QPS, IOPS and connection-count strips.

use std::sync::Arc;

use tiadmin_domain::chart::PerfChart;
use tiadmin_domain::metrics::PerfSeries;
use tiadmin_domain::settings::PollIntervals;

use crate::poller::{self, Activation};
use crate::ports::{AdminApi, Scheduler};
use crate::slot::{RefreshReport, Slot};

/// Rendering copy of the chart view.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartState {
    pub chart: PerfChart,
}

pub struct ChartViewModel<A> {
    api: Arc<A>,
    chart: Slot<PerfChart>,
}

impl<A> Clone for ChartViewModel<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            chart: self.chart.clone(),
        }
    }
}

impl<A: AdminApi + 'static> ChartViewModel<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            chart: Slot::new(PerfChart::new(&PerfSeries::ALL)),
        }
    }

    /// Fetch one sample and append it to every strip.
    pub async fn refresh(&self) -> RefreshReport {
        let token = self.chart.begin();
        let result = self.api.perf_metrics().await;
        let outcome = self
            .chart
            .complete_with(token, result, |chart, sample| chart.record(&sample));
        let mut report = RefreshReport::new();
        report.record("perf", outcome);
        report
    }

    pub fn snapshot(&self) -> ChartState {
        ChartState {
            chart: self.chart.snapshot(),
        }
    }

    /// Sample every `fast` period; `on_refresh` runs after each sample.
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
        Activation::new(vec![poller::start(scheduler, intervals.fast(), move || {
            let vm = vm.clone();
            let on_refresh = on_refresh.clone();
            async move {
                vm.refresh().await;
                on_refresh();
            }
        })])
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tiadmin_domain::chart::WINDOW;
    use tiadmin_domain::metrics::PerfMetrics;

    use super::*;
    use crate::testing::{FakeApi, ManualScheduler};

    fn view_model() -> (FakeApi, ChartViewModel<FakeApi>) {
        let api = FakeApi::default();
        (api.clone(), ChartViewModel::new(Arc::new(api)))
    }

    #[tokio::test]
    async fn should_append_one_point_per_strip_when_sample_arrives() {
        let (api, vm) = view_model();
        api.with(|b| {
            b.perf = PerfMetrics {
                tps: 10,
                qps: 20,
                iops: 30,
                conns: 4,
            };
        });

        assert!(vm.refresh().await.is_ok());

        let state = vm.snapshot();
        let conns = state.chart.series(PerfSeries::Conns).unwrap();
        assert_eq!(conns.key(), "Conn Number");
        assert_eq!(conns.latest(), Some(4.0));
        assert_eq!(state.chart.iter().count(), 4);
        assert!(state.chart.iter().all(|s| s.len() == 1));
    }

    #[tokio::test]
    async fn should_keep_only_last_twenty_points() {
        let (api, vm) = view_model();
        for tps in 0..30 {
            api.with(|b| b.perf.tps = tps);
            vm.refresh().await;
        }

        let state = vm.snapshot();
        let tps = state.chart.series(PerfSeries::Tps).unwrap();
        assert_eq!(tps.len(), WINDOW);
        let xs: Vec<u64> = tps.points().iter().map(|p| p.x).collect();
        assert_eq!(xs, (10..30).collect::<Vec<_>>());
        assert_eq!(tps.latest(), Some(29.0));
    }

    #[tokio::test]
    async fn should_not_advance_tick_when_fetch_fails() {
        let (api, vm) = view_model();
        vm.refresh().await;
        api.fail("perf");
        let report = vm.refresh().await;
        api.recover("perf");
        vm.refresh().await;

        assert!(!report.is_ok());
        let state = vm.snapshot();
        assert_eq!(state.chart.tick(), 2);
        let xs: Vec<u64> = state
            .chart
            .series(PerfSeries::Qps)
            .unwrap()
            .points()
            .iter()
            .map(|p| p.x)
            .collect();
        assert_eq!(xs, vec![0, 1]);
    }

    #[tokio::test]
    async fn should_sample_every_second_while_active() {
        let (_api, vm) = view_model();
        let scheduler = ManualScheduler::default();
        let renders = std::rc::Rc::new(std::cell::Cell::new(0));
        let counter = std::rc::Rc::clone(&renders);

        let activation = vm.activate(&scheduler, PollIntervals::default(), move || {
            counter.set(counter.get() + 1);
        });
        scheduler.advance(Duration::from_secs(4)).await;
        drop(activation);
        scheduler.advance(Duration::from_secs(4)).await;

        assert_eq!(vm.snapshot().chart.tick(), 5);
        assert_eq!(renders.get(), 5);
    }
}
