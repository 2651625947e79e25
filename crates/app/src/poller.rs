//! Polling driver: an immediate refresh, then one refresh per period.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use crate::ports::Scheduler;

/// Owns one repeating refresh. Dropping it cancels the timer.
///
/// A refresh that is already in flight still completes; only future ticks
/// are cancelled.
#[must_use = "dropping a PollHandle stops the polling"]
pub struct PollHandle<S: Scheduler> {
    period: Duration,
    _timer: S::Timer,
}

impl<S: Scheduler> PollHandle<S> {
    pub fn period(&self) -> Duration {
        self.period
    }
}

impl<S: Scheduler> fmt::Debug for PollHandle<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PollHandle")
            .field("period", &self.period)
            .finish_non_exhaustive()
    }
}

/// Spawn `refresh` now, then again every `period`.
pub fn start<S, F, Fut>(scheduler: &S, period: Duration, refresh: F) -> PollHandle<S>
where
    S: Scheduler,
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = ()> + 'static,
{
    scheduler.spawn(refresh());
    let spawner = scheduler.clone();
    let timer = scheduler.every(period, move || spawner.spawn(refresh()));
    tracing::debug!(period_ms = period.as_millis(), "polling started");
    PollHandle {
        period,
        _timer: timer,
    }
}

/// All the pollers of one active view. Dropping it stops every one of them.
#[must_use = "dropping an Activation stops the polling"]
pub struct Activation<S: Scheduler> {
    handles: Vec<PollHandle<S>>,
}

impl<S: Scheduler> Activation<S> {
    pub fn new(handles: Vec<PollHandle<S>>) -> Self {
        Self { handles }
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn periods(&self) -> impl Iterator<Item = Duration> + '_ {
        self.handles.iter().map(PollHandle::period)
    }
}

impl<S: Scheduler> fmt::Debug for Activation<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.handles).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::testing::ManualScheduler;

    fn counting(count: &Rc<Cell<u32>>) -> impl Fn() -> std::future::Ready<()> + 'static {
        let count = Rc::clone(count);
        move || {
            count.set(count.get() + 1);
            std::future::ready(())
        }
    }

    #[tokio::test]
    async fn should_refresh_immediately_on_start() {
        let scheduler = ManualScheduler::default();
        let count = Rc::new(Cell::new(0));

        let _handle = start(&scheduler, Duration::from_secs(3), counting(&count));
        scheduler.run_until_idle().await;

        assert_eq!(count.get(), 1);
    }

    #[tokio::test]
    async fn should_refresh_once_per_tick() {
        let scheduler = ManualScheduler::default();
        let count = Rc::new(Cell::new(0));

        let _handle = start(&scheduler, Duration::from_secs(1), counting(&count));
        scheduler.advance(Duration::from_secs(3)).await;

        assert_eq!(count.get(), 4);
    }

    #[tokio::test]
    async fn should_stop_ticking_when_handle_is_dropped() {
        let scheduler = ManualScheduler::default();
        let count = Rc::new(Cell::new(0));

        let handle = start(&scheduler, Duration::from_secs(1), counting(&count));
        scheduler.advance(Duration::from_secs(1)).await;
        assert_eq!(count.get(), 2);

        drop(handle);
        scheduler.advance(Duration::from_secs(5)).await;
        assert_eq!(count.get(), 2);
        assert_eq!(scheduler.live_timers(), 0);
    }

    #[tokio::test]
    async fn should_stop_every_poller_when_activation_is_dropped() {
        let scheduler = ManualScheduler::default();
        let fast = Rc::new(Cell::new(0));
        let slow = Rc::new(Cell::new(0));

        let activation = Activation::new(vec![
            start(&scheduler, Duration::from_secs(1), counting(&fast)),
            start(&scheduler, Duration::from_secs(3), counting(&slow)),
        ]);
        scheduler.advance(Duration::from_secs(3)).await;
        assert_eq!((fast.get(), slow.get()), (4, 2));
        assert_eq!(
            activation.periods().collect::<Vec<_>>(),
            vec![Duration::from_secs(1), Duration::from_secs(3)]
        );

        drop(activation);
        scheduler.advance(Duration::from_secs(6)).await;
        assert_eq!((fast.get(), slow.get()), (4, 2));
    }
}
