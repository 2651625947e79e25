//! Process: a running (or stopped) instance of a service on a host.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::host::HostMeta;
use crate::id::{MachId, ProcId};
use crate::service::Environment;

/// Lifecycle state of a process as reported by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProcessState {
    Started,
    Stopped,
    /// The backend has not reported a state yet.
    #[default]
    Unknown,
    /// Any other string, preserved verbatim.
    Other(String),
}

impl ProcessState {
    /// Whether the process is (meant to be) running.
    #[must_use]
    pub fn is_started(&self) -> bool {
        matches!(self, Self::Started)
    }

    /// Short label for badges.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Started => "started",
            Self::Stopped => "stopped",
            Self::Unknown => "unknown",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for ProcessState {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "StateStarted" | "started" => Self::Started,
            "StateStopped" | "stopped" => Self::Stopped,
            "" => Self::Unknown,
            _ => Self::Other(raw),
        }
    }
}

impl From<ProcessState> for String {
    fn from(state: ProcessState) -> Self {
        match state {
            ProcessState::Started => "StateStarted".to_string(),
            ProcessState::Stopped => "StateStopped".to_string(),
            ProcessState::Unknown => String::new(),
            ProcessState::Other(raw) => raw,
        }
    }
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A managed process.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Process {
    #[serde(rename = "procID")]
    #[serde(deserialize_with = "crate::wire::null_as_default")]
    pub proc_id: ProcId,
    #[serde(deserialize_with = "crate::wire::null_as_default")]
    pub svc_name: String,
    #[serde(rename = "machID")]
    #[serde(deserialize_with = "crate::wire::null_as_default")]
    pub mach_id: MachId,
    #[serde(deserialize_with = "crate::wire::null_as_default")]
    pub desired_state: ProcessState,
    #[serde(deserialize_with = "crate::wire::null_as_default")]
    pub current_state: ProcessState,
    pub is_alive: bool,
    #[serde(deserialize_with = "crate::wire::null_as_default")]
    pub endpoints: Vec<String>,
    #[serde(deserialize_with = "crate::wire::null_as_default")]
    pub executor: Vec<String>,
    #[serde(deserialize_with = "crate::wire::null_as_default")]
    pub command: String,
    #[serde(deserialize_with = "crate::wire::null_as_default")]
    pub args: Vec<String>,
    #[serde(deserialize_with = "crate::wire::null_as_default")]
    pub environments: Vec<Environment>,
    #[serde(rename = "publicIP")]
    #[serde(deserialize_with = "crate::wire::null_as_default")]
    pub public_ip: String,
    #[serde(deserialize_with = "crate::wire::null_as_default")]
    pub host_name: String,
    #[serde(deserialize_with = "crate::wire::null_as_default")]
    pub host_meta: HostMeta,
    pub port: i32,
    #[serde(deserialize_with = "crate::wire::null_as_default")]
    pub protocol: String,
}

/// Desired state sent with every create request.
pub const DESIRED_STATE_STARTED: &str = "started";

/// Body of `POST /processes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProcess {
    pub svc_name: String,
    #[serde(rename = "machID")]
    pub mach_id: MachId,
    pub args: Vec<String>,
    pub desired_state: String,
}

impl NewProcess {
    /// Build a create request asking for the process to be started.
    #[must_use]
    pub fn started(svc_name: impl Into<String>, mach_id: MachId, args: Vec<String>) -> Self {
        Self {
            svc_name: svc_name.into(),
            mach_id,
            args,
            desired_state: DESIRED_STATE_STARTED.to_string(),
        }
    }
}

/// Keep the processes belonging to `svc_name`; an empty filter keeps all.
#[must_use]
pub fn filter_by_service<'a>(processes: &'a [Process], svc_name: &str) -> Vec<&'a Process> {
    if svc_name.is_empty() {
        return processes.iter().collect();
    }
    processes
        .iter()
        .filter(|p| p.svc_name == svc_name)
        .collect()
}
