//! # tiadmin-app
//!
//! Application layer: view-models, polling and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement:
//!   - `AdminApi`: the REST backend (hosts, services, processes, metrics)
//!   - `CounterApi`: the standalone demo counter
//!   - `Scheduler`: spawning tasks and repeating timers
//! - Hold fetched state in **sequenced slots** so an out-of-order response
//!   never overwrites a newer one
//! - Provide the **shared host store** (single writer, read-only readers)
//! - Provide one **view-model** per dashboard view: Home, HostStatus,
//!   Services, Chart, Counter
//!
//! ## Dependency rule
//! Depends on `tiadmin-domain` only. Never imports adapter crates, never
//! assumes a runtime: the browser adapter and the tests each plug in their
//! own `Scheduler`.

pub mod host_store;
pub mod poller;
pub mod ports;
pub mod slot;
pub mod view_models;

#[cfg(test)]
pub(crate) mod testing;
