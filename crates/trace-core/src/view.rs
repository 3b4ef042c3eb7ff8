// File: crates/trace-core/src/view.rs
// Visible time window and the sample range needed to draw it.

use std::ops::RangeInclusive;

use crate::series::TraceData;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewWindow {
    pub lower: f64,
    pub upper: f64,
}

impl ViewWindow {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Window spanning the whole trace.
    pub fn full(trace: &TraceData) -> Self {
        Self { lower: trace.min_timestamp(), upper: trace.max_timestamp() }
    }

    /// Window with either bound optionally overridden; absent bounds fall back
    /// to the trace's own range.
    pub fn from_bounds(trace: &TraceData, lower: Option<f64>, upper: Option<f64>) -> Self {
        Self {
            lower: lower.unwrap_or_else(|| trace.min_timestamp()),
            upper: upper.unwrap_or_else(|| trace.max_timestamp()),
        }
    }

    pub fn span(&self) -> f64 {
        self.upper - self.lower
    }

    /// Indices of the samples to draw: from the last sample at or before
    /// `lower` through the last sample at or before `upper`, plus one more
    /// when that sample falls short of `upper`, so the line reaches the edge.
    pub fn visible_range(&self, trace: &TraceData) -> RangeInclusive<usize> {
        let start = trace.index_at_or_before(self.lower).unwrap_or(0);
        let mut end = trace.index_at_or_before(self.upper).unwrap_or(0);
        if trace.timestamps()[end] < self.upper && end + 1 < trace.len() {
            end += 1;
        }
        start.min(end)..=end
    }
}
