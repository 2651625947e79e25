//! Host: a node the managed processes run on, plus the summaries derived
//! from the host list.

use serde::{Deserialize, Serialize};

use crate::id::MachId;

/// Placement metadata attached to a host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HostMeta {
    #[serde(deserialize_with = "crate::wire::null_as_default")]
    pub region: String,
    #[serde(deserialize_with = "crate::wire::null_as_default")]
    pub datacenter: String,
}

/// Usage of a single mounted disk, in the backend's size unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiskUsage {
    #[serde(deserialize_with = "crate::wire::null_as_default")]
    pub mount: String,
    pub total_size: i64,
    pub used_size: i64,
}

/// Resource snapshot reported by the agent running on a host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Machine {
    #[serde(rename = "machID")]
    #[serde(deserialize_with = "crate::wire::null_as_default")]
    pub mach_id: MachId,
    #[serde(rename = "usageOfCPU")]
    pub usage_of_cpu: f64,
    pub total_mem: i64,
    pub used_mem: i64,
    pub total_swp: i64,
    pub used_swp: i64,
    #[serde(deserialize_with = "crate::wire::null_as_default")]
    pub load_avg: Vec<f64>,
    #[serde(deserialize_with = "crate::wire::null_as_default")]
    pub usage_of_disk: Vec<DiskUsage>,
    pub clock_offset: f64,
}

/// A physical or virtual node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Host {
    #[serde(rename = "machID")]
    #[serde(deserialize_with = "crate::wire::null_as_default")]
    pub mach_id: MachId,
    #[serde(deserialize_with = "crate::wire::null_as_default")]
    pub host_name: String,
    #[serde(deserialize_with = "crate::wire::null_as_default")]
    pub host_meta: HostMeta,
    #[serde(rename = "publicIP")]
    #[serde(deserialize_with = "crate::wire::null_as_default")]
    pub public_ip: String,
    pub is_alive: bool,
    /// Absent (or `null`) until the host's agent has reported once.
    pub machine: Option<Machine>,
}

impl Host {
    /// Name to show in lists: the host name, or the identifier when unnamed.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.host_name.is_empty() {
            self.mach_id.as_str()
        } else {
            &self.host_name
        }
    }

    /// Disks reported by the host's agent (empty when it never reported).
    #[must_use]
    pub fn disks(&self) -> &[DiskUsage] {
        self.machine
            .as_ref()
            .map_or(&[][..], |m| m.usage_of_disk.as_slice())
    }
}

/// Cluster-wide storage totals shown on the home view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSummary {
    pub usage: i64,
    pub capacity: i64,
}

impl StorageSummary {
    /// Sum used and total size over every disk of every host.
    #[must_use]
    pub fn from_hosts(hosts: &[Host]) -> Self {
        hosts
            .iter()
            .flat_map(Host::disks)
            .fold(Self::default(), |acc, disk| Self {
                usage: acc.usage + disk.used_size,
                capacity: acc.capacity + disk.total_size,
            })
    }

    /// Used fraction in percent, `0` for an empty cluster.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percent(&self) -> f64 {
        if self.capacity <= 0 {
            return 0.0;
        }
        self.usage as f64 / self.capacity as f64 * 100.0
    }
}

/// Number of hosts currently reported alive.
#[must_use]
pub fn alive_count(hosts: &[Host]) -> usize {
    hosts.iter().filter(|h| h.is_alive).count()
}
