//! Bounded history buffers for the metric strips.

use std::collections::VecDeque;

use serde::Serialize;

use crate::metrics::{PerfMetrics, PerfSeries};

/// Points kept per series.
pub const WINDOW: usize = 20;

/// Append `value`, dropping the oldest entries beyond `cap`.
pub fn push_capped<T>(dq: &mut VecDeque<T>, value: T, cap: usize) {
    dq.push_back(value);
    while dq.len() > cap {
        dq.pop_front();
    }
}

/// One plotted point; `x` is a tick counter, not wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub x: u64,
    pub y: f64,
}

/// A named series holding at most `cap` points in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    key: &'static str,
    #[serde(rename = "values")]
    points: VecDeque<ChartPoint>,
    #[serde(skip)]
    cap: usize,
}

impl Series {
    #[must_use]
    pub fn new(key: &'static str, cap: usize) -> Self {
        Self {
            key,
            points: VecDeque::with_capacity(cap),
            cap,
        }
    }

    #[must_use]
    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn push(&mut self, point: ChartPoint) {
        push_capped(&mut self.points, point, self.cap);
    }

    #[must_use]
    pub fn points(&self) -> &VecDeque<ChartPoint> {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Most recent value, if any.
    #[must_use]
    pub fn latest(&self) -> Option<f64> {
        self.points.back().map(|p| p.y)
    }
}

/// A group of perf series advanced together by one shared tick.
///
/// The tick moves only when a sample is applied, so a failed fetch leaves
/// no gap in `x`.
#[derive(Debug, Clone, PartialEq)]
pub struct PerfChart {
    tick: u64,
    series: Vec<(PerfSeries, Series)>,
}

impl PerfChart {
    /// Chart tracking the given metrics with the default window.
    #[must_use]
    pub fn new(tracked: &[PerfSeries]) -> Self {
        Self::with_capacity(tracked, WINDOW)
    }

    #[must_use]
    pub fn with_capacity(tracked: &[PerfSeries], cap: usize) -> Self {
        Self {
            tick: 0,
            series: tracked.iter().map(|&s| (s, Series::new(s.key(), cap))).collect(),
        }
    }

    /// Push one sample into every tracked series and advance the tick.
    #[allow(clippy::cast_precision_loss)]
    pub fn record(&mut self, sample: &PerfMetrics) {
        let x = self.tick;
        for (metric, series) in &mut self.series {
            series.push(ChartPoint {
                x,
                y: metric.value(sample) as f64,
            });
        }
        self.tick += 1;
    }

    /// Number of samples applied so far.
    #[must_use]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    #[must_use]
    pub fn series(&self, metric: PerfSeries) -> Option<&Series> {
        self.series
            .iter()
            .find(|(m, _)| *m == metric)
            .map(|(_, s)| s)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Series> {
        self.series.iter().map(|(_, s)| s)
    }
}
