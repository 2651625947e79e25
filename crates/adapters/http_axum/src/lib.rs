//! # tiadmin-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **compiled dashboard** (the WASM bundle produced by `trunk`)
//!   from an assets directory
//! - Fall back to `index.html` for unknown paths so client-side routes such
//!   as `/dashboard/host-status/{machID}` survive a page reload
//! - Publish the dashboard's **runtime settings** at `/config.json`
//! - Answer `/health` for probes
//!
//! The management REST API itself lives elsewhere; the dashboard talks to it
//! directly through the configured API base.
//!
//! ## Dependency rule
//! Depends on `tiadmin-domain` only for the settings type. Never leaks axum
//! types into the domain.

pub mod router;
pub mod state;
