//! Task and timer port.

use std::future::Future;
use std::time::Duration;

/// Runs background work for view-models.
///
/// Implementations decide the executor: `spawn_local` plus `gloo` intervals in
/// the browser, a manually advanced clock in tests.
pub trait Scheduler: Clone + 'static {
    /// Handle to a repeating timer. Dropping it cancels the timer; no tick
    /// fires after the drop.
    type Timer: 'static;

    /// Run `task` to completion in the background.
    fn spawn(&self, task: impl Future<Output = ()> + 'static);

    /// Call `tick` every `period` until the returned handle is dropped.
    fn every(&self, period: Duration, tick: impl FnMut() + 'static) -> Self::Timer;
}
