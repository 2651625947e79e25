//! Browser implementation of the scheduler port.

use std::future::Future;
use std::time::Duration;

use gloo_timers::callback::Interval;
use tiadmin_app::ports::Scheduler;

/// Runs tasks on the browser event loop and ticks with `setInterval`.
///
/// The timer handle is a [`gloo_timers::callback::Interval`], which calls
/// `clearInterval` when dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooScheduler;

impl Scheduler for GlooScheduler {
    type Timer = Interval;

    fn spawn(&self, task: impl Future<Output = ()> + 'static) {
        leptos::task::spawn_local(task);
    }

    fn every(&self, period: Duration, tick: impl FnMut() + 'static) -> Self::Timer {
        let millis = u32::try_from(period.as_millis()).unwrap_or(u32::MAX);
        Interval::new(millis, tick)
    }
}
