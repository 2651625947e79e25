//! Hand-written fakes for the ports, shared by the view-model tests.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tiadmin_domain::error::ApiError;
use tiadmin_domain::host::{DiskUsage, Host, Machine};
use tiadmin_domain::id::{MachId, ProcId};
use tiadmin_domain::metrics::{Counter, PerfMetrics};
use tiadmin_domain::process::{NewProcess, Process, ProcessState};
use tiadmin_domain::service::Service;

use crate::ports::{AdminApi, CounterApi, Scheduler};

// -- Scheduler ---------------------------------------------------------------

type Task = Pin<Box<dyn Future<Output = ()>>>;

struct TimerEntry {
    period: Duration,
    next_due: Duration,
    alive: Rc<Cell<bool>>,
    tick: Box<dyn FnMut()>,
}

#[derive(Default)]
struct SchedulerState {
    now: Duration,
    timers: Vec<TimerEntry>,
    tasks: Vec<Task>,
}

/// Scheduler driven by hand: `advance` moves a virtual clock and fires due
/// timers, `run_until_idle` drives spawned tasks.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    state: Rc<RefCell<SchedulerState>>,
}

pub struct ManualTimer {
    alive: Rc<Cell<bool>>,
}

impl Drop for ManualTimer {
    fn drop(&mut self) {
        self.alive.set(false);
    }
}

impl Scheduler for ManualScheduler {
    type Timer = ManualTimer;

    fn spawn(&self, task: impl Future<Output = ()> + 'static) {
        self.state.borrow_mut().tasks.push(Box::pin(task));
    }

    fn every(&self, period: Duration, tick: impl FnMut() + 'static) -> Self::Timer {
        assert!(!period.is_zero(), "zero period would never settle");
        let alive = Rc::new(Cell::new(true));
        let mut state = self.state.borrow_mut();
        let next_due = state.now + period;
        state.timers.push(TimerEntry {
            period,
            next_due,
            alive: Rc::clone(&alive),
            tick: Box::new(tick),
        });
        ManualTimer { alive }
    }
}

impl ManualScheduler {
    pub fn live_timers(&self) -> usize {
        self.state
            .borrow()
            .timers
            .iter()
            .filter(|t| t.alive.get())
            .count()
    }

    /// Poll spawned tasks until none of them makes progress.
    pub async fn run_until_idle(&self) {
        loop {
            let batch: Vec<Task> = self.state.borrow_mut().tasks.drain(..).collect();
            if batch.is_empty() {
                return;
            }
            let mut progressed = false;
            let mut pending = Vec::new();
            for mut task in batch {
                if futures_util::poll!(task.as_mut()).is_ready() {
                    progressed = true;
                } else {
                    pending.push(task);
                }
            }
            let mut state = self.state.borrow_mut();
            let spawned_more = !state.tasks.is_empty();
            pending.append(&mut state.tasks);
            state.tasks = pending;
            if !progressed && !spawned_more {
                return;
            }
        }
    }

    /// Move the clock forward by `by`, firing every timer that comes due and
    /// draining the work it spawns.
    pub async fn advance(&self, by: Duration) {
        self.run_until_idle().await;
        let target = self.state.borrow().now + by;
        loop {
            let due = {
                let mut state = self.state.borrow_mut();
                state.timers.retain(|t| t.alive.get());
                state.timers.iter().map(|t| t.next_due).min()
            };
            let Some(due) = due.filter(|due| *due <= target) else {
                break;
            };
            let mut firing: Vec<TimerEntry> = {
                let mut state = self.state.borrow_mut();
                state.now = due;
                let (firing, rest): (Vec<_>, Vec<_>) =
                    state.timers.drain(..).partition(|t| t.next_due == due);
                state.timers = rest;
                firing
            };
            for entry in &mut firing {
                if entry.alive.get() {
                    (entry.tick)();
                    entry.next_due += entry.period;
                }
            }
            self.state.borrow_mut().timers.extend(firing);
            self.run_until_idle().await;
        }
        self.state.borrow_mut().now = target;
    }
}

// -- API ---------------------------------------------------------------------

/// A request the fake API received.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListHosts,
    GetHost(MachId),
    ListServices,
    ListProcesses,
    FindByHost(MachId),
    Create(NewProcess),
    Start(ProcId),
    Stop(ProcId),
    Delete(ProcId),
    Perf,
    Counter,
}

#[derive(Default)]
pub struct FakeBackend {
    pub hosts: Vec<Host>,
    pub services: Vec<Service>,
    pub processes: Vec<Process>,
    pub perf: PerfMetrics,
    pub counter: i64,
    /// Names of the endpoints that currently fail, e.g. `"hosts"`.
    pub failing: HashSet<&'static str>,
    pub calls: Vec<Call>,
}

/// In-memory backend that records every call.
#[derive(Clone, Default)]
pub struct FakeApi {
    backend: Arc<Mutex<FakeBackend>>,
}

impl FakeApi {
    pub fn with(&self, f: impl FnOnce(&mut FakeBackend)) {
        f(&mut self.backend.lock().unwrap());
    }

    pub fn fail(&self, endpoint: &'static str) {
        self.with(|b| {
            b.failing.insert(endpoint);
        });
    }

    pub fn recover(&self, endpoint: &'static str) {
        self.with(|b| {
            b.failing.remove(endpoint);
        });
    }

    pub fn calls(&self) -> Vec<Call> {
        self.backend.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.with(|b| b.calls.clear());
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }

    fn handle<T>(
        &self,
        endpoint: &'static str,
        call: Call,
        f: impl FnOnce(&mut FakeBackend) -> T,
    ) -> Result<T, ApiError> {
        let mut backend = self.backend.lock().unwrap();
        backend.calls.push(call);
        if backend.failing.contains(endpoint) {
            return Err(ApiError::Status {
                status: 500,
                reason: format!("{endpoint} unavailable"),
            });
        }
        Ok(f(&mut backend))
    }
}

impl AdminApi for FakeApi {
    async fn list_hosts(&self) -> Result<Vec<Host>, ApiError> {
        self.handle("hosts", Call::ListHosts, |b| b.hosts.clone())
    }

    async fn get_host(&self, mach_id: &MachId) -> Result<Host, ApiError> {
        let found = self.handle("host", Call::GetHost(mach_id.clone()), |b| {
            b.hosts.iter().find(|h| &h.mach_id == mach_id).cloned()
        })?;
        found.ok_or_else(|| ApiError::Status {
            status: 404,
            reason: format!("host {mach_id} not found"),
        })
    }

    async fn list_services(&self) -> Result<Vec<Service>, ApiError> {
        self.handle("services", Call::ListServices, |b| b.services.clone())
    }

    async fn list_processes(&self) -> Result<Vec<Process>, ApiError> {
        self.handle("processes", Call::ListProcesses, |b| b.processes.clone())
    }

    async fn find_processes_by_host(&self, mach_id: &MachId) -> Result<Vec<Process>, ApiError> {
        self.handle("processes", Call::FindByHost(mach_id.clone()), |b| {
            b.processes
                .iter()
                .filter(|p| &p.mach_id == mach_id)
                .cloned()
                .collect()
        })
    }

    async fn create_process(&self, request: &NewProcess) -> Result<Process, ApiError> {
        self.handle("create", Call::Create(request.clone()), |b| {
            let created = Process {
                proc_id: ProcId::new(format!("p{}", b.processes.len() + 1)),
                svc_name: request.svc_name.clone(),
                mach_id: request.mach_id.clone(),
                desired_state: ProcessState::Started,
                args: request.args.clone(),
                ..Process::default()
            };
            b.processes.push(created.clone());
            created
        })
    }

    async fn start_process(&self, proc_id: &ProcId) -> Result<Process, ApiError> {
        self.handle("start", Call::Start(proc_id.clone()), |b| {
            set_state(b, proc_id, ProcessState::Started)
        })
    }

    async fn stop_process(&self, proc_id: &ProcId) -> Result<Process, ApiError> {
        self.handle("stop", Call::Stop(proc_id.clone()), |b| {
            set_state(b, proc_id, ProcessState::Stopped)
        })
    }

    async fn delete_process(&self, proc_id: &ProcId) -> Result<Process, ApiError> {
        self.handle("delete", Call::Delete(proc_id.clone()), |b| {
            let index = b.processes.iter().position(|p| &p.proc_id == proc_id);
            index.map(|i| b.processes.remove(i)).unwrap_or_default()
        })
    }

    async fn perf_metrics(&self) -> Result<PerfMetrics, ApiError> {
        self.handle("perf", Call::Perf, |b| b.perf)
    }
}

impl CounterApi for FakeApi {
    async fn fetch_counter(&self) -> Result<Counter, ApiError> {
        self.handle("counter", Call::Counter, |b| Counter { count: b.counter })
    }
}

fn set_state(backend: &mut FakeBackend, proc_id: &ProcId, state: ProcessState) -> Process {
    let Some(process) = backend.processes.iter_mut().find(|p| &p.proc_id == proc_id) else {
        return Process::default();
    };
    process.desired_state = state.clone();
    process.current_state = state;
    process.clone()
}

// -- Fixtures ----------------------------------------------------------------

pub fn host(id: &str, alive: bool, disks: &[(i64, i64)]) -> Host {
    Host {
        mach_id: MachId::new(id),
        host_name: format!("{id}.local"),
        is_alive: alive,
        machine: Some(Machine {
            mach_id: MachId::new(id),
            usage_of_disk: disks
                .iter()
                .map(|&(total_size, used_size)| DiskUsage {
                    mount: "/".to_string(),
                    total_size,
                    used_size,
                })
                .collect(),
            ..Machine::default()
        }),
        ..Host::default()
    }
}

pub fn service(name: &str, args: &[&str]) -> Service {
    Service {
        svc_name: name.to_string(),
        args: args.iter().map(ToString::to_string).collect(),
        ..Service::default()
    }
}

pub fn process(id: &str, svc: &str, mach: &str) -> Process {
    Process {
        proc_id: ProcId::new(id),
        svc_name: svc.to_string(),
        mach_id: MachId::new(mach),
        desired_state: ProcessState::Stopped,
        current_state: ProcessState::Stopped,
        ..Process::default()
    }
}
