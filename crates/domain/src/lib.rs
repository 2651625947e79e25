//! # tiadmin-domain
//!
//! Pure domain model for the TiAdmin administration dashboard.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers and error conventions
//! - Mirror the backend's JSON schema: **Hosts**, **Services**, **Processes**,
//!   performance metrics and the demo counter
//! - Derive the summaries the views display (alive nodes, storage usage)
//! - Hold chart history in fixed-capacity sliding windows
//! - Enforce the new-process form rules before anything hits the network
//! - Describe the runtime settings shared by the server and the dashboard
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod chart;
pub mod form;
pub mod host;
pub mod metrics;
pub mod process;
pub mod service;
pub mod settings;

mod wire;
