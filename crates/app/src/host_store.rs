//! Shared host store.
//!
//! One [`HostStore`] is created at the application root. It is the only
//! writer of the cached host list and refreshes it on its own timer,
//! independently of which view is showing. Everything else gets a
//! [`HostReader`], which can only look at the last cached list.

use std::sync::Arc;
use std::time::Duration;

use tiadmin_domain::host::Host;
use tiadmin_domain::id::MachId;

use crate::poller::{self, PollHandle};
use crate::ports::{AdminApi, Scheduler};
use crate::slot::{FetchOutcome, Slot};

/// Single writer of the cached host list.
pub struct HostStore<A> {
    api: Arc<A>,
    hosts: Slot<Vec<Host>>,
}

impl<A> Clone for HostStore<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            hosts: self.hosts.clone(),
        }
    }
}

impl<A: AdminApi + 'static> HostStore<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            hosts: Slot::default(),
        }
    }

    /// Fetch the host list once and cache it.
    pub async fn refresh(&self) -> FetchOutcome {
        let token = self.hosts.begin();
        let result = self.api.list_hosts().await;
        let outcome = self.hosts.complete(token, result);
        if let Some(err) = outcome.error() {
            tracing::warn!(error = %err, "host store refresh failed");
        }
        outcome
    }

    /// Keep the cache fresh every `period` until the handle drops.
    pub fn activate<S: Scheduler>(&self, scheduler: &S, period: Duration) -> PollHandle<S> {
        let store = self.clone();
        poller::start(scheduler, period, move || {
            let store = store.clone();
            async move {
                store.refresh().await;
            }
        })
    }

    #[must_use]
    pub fn reader(&self) -> HostReader {
        HostReader {
            hosts: self.hosts.clone(),
        }
    }
}

/// Read-only view of the shared host store.
///
/// Reads never block on a fetch; they return whatever was cached last.
#[derive(Clone, Debug)]
pub struct HostReader {
    hosts: Slot<Vec<Host>>,
}

impl HostReader {
    #[must_use]
    pub fn hosts(&self) -> Vec<Host> {
        self.hosts.snapshot()
    }

    #[must_use]
    pub fn find(&self, mach_id: &MachId) -> Option<Host> {
        self.hosts
            .read(|hosts| hosts.iter().find(|h| &h.mach_id == mach_id).cloned())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.hosts.read(Vec::len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, FakeApi, ManualScheduler, host};

    fn store_with(hosts: Vec<Host>) -> (FakeApi, HostStore<FakeApi>) {
        let api = FakeApi::default();
        api.with(|b| b.hosts = hosts);
        let store = HostStore::new(Arc::new(api.clone()));
        (api, store)
    }

    #[tokio::test]
    async fn should_start_empty_before_first_refresh() {
        let (_api, store) = store_with(vec![host("h1", true, &[])]);
        assert!(store.reader().is_empty());
    }

    #[tokio::test]
    async fn should_expose_cached_hosts_to_every_reader() {
        let (_api, store) = store_with(vec![host("h1", true, &[]), host("h2", false, &[])]);
        let sidebar = store.reader();
        let other = sidebar.clone();

        assert_eq!(store.refresh().await, FetchOutcome::Updated);

        assert_eq!(sidebar.len(), 2);
        assert_eq!(other.find(&MachId::new("h2")).map(|h| h.is_alive), Some(false));
    }

    #[tokio::test]
    async fn should_keep_last_list_when_refresh_fails() {
        let (api, store) = store_with(vec![host("h1", true, &[])]);
        store.refresh().await;

        api.fail("hosts");
        api.with(|b| b.hosts.clear());
        let outcome = store.refresh().await;

        assert!(matches!(outcome, FetchOutcome::Failed(_)));
        assert_eq!(store.reader().len(), 1);
    }

    #[tokio::test]
    async fn should_poll_on_its_own_timer_until_dropped() {
        let (api, store) = store_with(vec![host("h1", true, &[])]);
        let scheduler = ManualScheduler::default();

        let handle = store.activate(&scheduler, Duration::from_secs(3));
        scheduler.advance(Duration::from_secs(9)).await;
        assert_eq!(api.count(|c| *c == Call::ListHosts), 4);

        drop(handle);
        scheduler.advance(Duration::from_secs(9)).await;
        assert_eq!(api.count(|c| *c == Call::ListHosts), 4);
        assert_eq!(store.reader().len(), 1);
    }
}
