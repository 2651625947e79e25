//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the view-model layer and the
//! adapter layer can depend on them without creating circular dependencies.
//!
//! Futures returned by ports are not required to be `Send`: the dashboard
//! runs on the browser's single-threaded event loop.

pub mod api;
pub mod scheduler;

pub use api::{AdminApi, CounterApi};
pub use scheduler::Scheduler;
