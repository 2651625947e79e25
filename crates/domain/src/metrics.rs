//! Live performance metrics and the standalone demo counter.

use serde::{Deserialize, Serialize};

/// One sample of `GET /monitor/real/tidb_perf`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerfMetrics {
    pub tps: i64,
    pub qps: i64,
    pub iops: i64,
    pub conns: i64,
}

/// The metrics plotted on the chart view, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PerfSeries {
    Tps,
    Qps,
    Iops,
    Conns,
}

impl PerfSeries {
    pub const ALL: [Self; 4] = [Self::Tps, Self::Qps, Self::Iops, Self::Conns];

    /// Legend shown next to the chart.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Tps => "TPS",
            Self::Qps => "QPS",
            Self::Iops => "IOPS",
            Self::Conns => "Conn Number",
        }
    }

    /// Pick this series' value out of a sample.
    #[must_use]
    pub fn value(self, sample: &PerfMetrics) -> i64 {
        match self {
            Self::Tps => sample.tps,
            Self::Qps => sample.qps,
            Self::Iops => sample.iops,
            Self::Conns => sample.conns,
        }
    }
}

/// Reply of the demo counter endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Counter {
    pub count: i64,
}
