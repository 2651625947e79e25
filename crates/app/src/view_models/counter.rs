//! Counter view: a standalone demo counter polled every second.

use std::sync::Arc;

use tiadmin_domain::metrics::Counter;
use tiadmin_domain::settings::PollIntervals;

use crate::poller::{self, Activation};
use crate::ports::{CounterApi, Scheduler};
use crate::slot::{RefreshReport, Slot};

pub struct CounterViewModel<C> {
    api: Arc<C>,
    counter: Slot<Option<Counter>>,
}

impl<C> Clone for CounterViewModel<C> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            counter: self.counter.clone(),
        }
    }
}

impl<C: CounterApi + 'static> CounterViewModel<C> {
    pub fn new(api: Arc<C>) -> Self {
        Self {
            api,
            counter: Slot::default(),
        }
    }

    pub async fn refresh(&self) -> RefreshReport {
        let token = self.counter.begin();
        let result = self.api.fetch_counter().await;
        let mut report = RefreshReport::new();
        report.record("counter", self.counter.complete_some(token, result));
        report
    }

    /// Last fetched count, `None` until the first successful fetch.
    pub fn snapshot(&self) -> Option<Counter> {
        self.counter.snapshot()
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
