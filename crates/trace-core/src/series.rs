// File: crates/trace-core/src/series.rs
// Summary: Immutable trace container (timestamp/value samples) with cached extrema and lookup.
// Notes:
// - Fields are private; the only way to obtain a `TraceData` is through the
//   validating constructor or `resample`, so every instance upholds the
//   ordering invariant and the cached stats never go stale.

use std::ops::RangeInclusive;

use tracing::debug;

use crate::downsample::{decimate_peaks, decimate_peaks_anchored};
use crate::error::ValidationError;
use crate::view::ViewWindow;

/// Sorted (timestamp, value) samples for one recorded variable.
#[derive(Clone, Debug, PartialEq)]
pub struct TraceData {
    name: String,
    timestamps: Vec<f64>,
    values: Vec<f64>,
    duration: f64,
    min_value: f64,
    max_value: f64,
}

impl TraceData {
    /// Build a trace from parallel arrays.
    ///
    /// Fails when the arrays differ in length, are empty, or when a timestamp
    /// is smaller than its predecessor (equal timestamps are fine).
    pub fn new(
        name: impl Into<String>,
        timestamps: Vec<f64>,
        values: Vec<f64>,
    ) -> Result<Self, ValidationError> {
        if timestamps.len() != values.len() {
            return Err(ValidationError::LengthMismatch {
                timestamps: timestamps.len(),
                values: values.len(),
            });
        }
        if timestamps.is_empty() {
            return Err(ValidationError::Empty);
        }

        let mut previous = timestamps[0];
        let mut min_value = values[0];
        let mut max_value = values[0];
        for (index, (&t, &v)) in timestamps.iter().zip(values.iter()).enumerate() {
            if !t.is_finite() {
                return Err(ValidationError::NonFiniteTimestamp { index });
            }
            if t < previous {
                return Err(ValidationError::Decreasing { index, previous, current: t });
            }
            previous = t;
            min_value = min_value.min(v);
            max_value = max_value.max(v);
        }

        let duration = timestamps[timestamps.len() - 1] - timestamps[0];
        let name = name.into();
        debug!(trace = %name, samples = timestamps.len(), duration, min_value, max_value, "trace constructed");

        Ok(Self { name, timestamps, values, duration, min_value, max_value })
    }

    pub fn name(&self) -> &str { &self.name }

    /// Number of samples; always at least one.
    pub fn len(&self) -> usize { self.timestamps.len() }

    /// Always false, a trace holds at least one sample.
    pub fn is_empty(&self) -> bool { self.timestamps.is_empty() }

    pub fn timestamps(&self) -> &[f64] { &self.timestamps }

    pub fn values(&self) -> &[f64] { &self.values }

    /// Iterate samples as `(timestamp, value)` pairs.
    pub fn samples(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.timestamps.iter().copied().zip(self.values.iter().copied())
    }

    pub fn min_timestamp(&self) -> f64 { self.timestamps[0] }

    pub fn max_timestamp(&self) -> f64 { self.timestamps[self.timestamps.len() - 1] }

    pub fn duration(&self) -> f64 { self.duration }

    pub fn min_value(&self) -> f64 { self.min_value }

    pub fn max_value(&self) -> f64 { self.max_value }

    /// Largest index whose timestamp is `<= t`, or `None` when `t` precedes
    /// the first sample. Among duplicate timestamps the last one wins.
    pub fn index_at_or_before(&self, t: f64) -> Option<usize> {
        // Half-open [lower, upper): every index below `lower` is <= t,
        // every index at or above `upper` is > t.
        let mut lower = 0usize;
        let mut upper = self.timestamps.len();
        while lower < upper {
            let mid = lower + (upper - lower) / 2;
            if self.timestamps[mid] <= t {
                lower = mid + 1;
            } else {
                upper = mid;
            }
        }
        lower.checked_sub(1)
    }

    /// Inclusive index bounds covering `[lower, upper]`, defaulting to the
    /// full trace for absent bounds. Never empty: a window that lies entirely
    /// before the first sample resolves to sample 0.
    pub fn window_indices(&self, lower: Option<f64>, upper: Option<f64>) -> (usize, usize) {
        let lower = lower.unwrap_or_else(|| self.min_timestamp());
        let upper = upper.unwrap_or_else(|| self.max_timestamp());
        let upper_index = self.index_at_or_before(upper).unwrap_or(0);
        let lower_index = self.index_at_or_before(lower).unwrap_or(0).min(upper_index);
        (lower_index, upper_index)
    }

    /// Decimate the samples inside `[lower, upper]` to roughly `target_length`
    /// points, keeping every sample that jumps by more than 10% of the
    /// window's value range. The target is a hint; peaks may push the result
    /// above it.
    pub fn resample(&self, target_length: usize, lower: Option<f64>, upper: Option<f64>) -> TraceData {
        let (lo, hi) = self.window_indices(lower, upper);
        self.resample_range(target_length, lo..=hi)
    }

    /// Decimate the samples at `indices` the same way `resample` decimates a
    /// time window. The range is clamped to the trace and never empty.
    pub fn resample_range(&self, target_length: usize, indices: RangeInclusive<usize>) -> TraceData {
        let (lo, hi) = self.clamp_range(indices);
        let (timestamps, values) = decimate_peaks(&self.timestamps[lo..=hi], &self.values[lo..=hi], target_length);
        debug!(trace = %self.name, window = hi - lo + 1, target_length, kept = timestamps.len(), "resampled");
        TraceData::from_validated(self.name.clone(), timestamps, values)
    }

    /// Decimate everything needed to draw `window`: its visible range,
    /// including the neighbour past the right edge. That last sample is kept
    /// even when off-stride, so the drawn line still reaches the edge.
    pub fn resample_view(&self, target_length: usize, window: &ViewWindow) -> TraceData {
        let (lo, hi) = self.clamp_range(window.visible_range(self));
        let (timestamps, values) =
            decimate_peaks_anchored(&self.timestamps[lo..=hi], &self.values[lo..=hi], target_length);
        debug!(trace = %self.name, window = hi - lo + 1, target_length, kept = timestamps.len(), "resampled view");
        TraceData::from_validated(self.name.clone(), timestamps, values)
    }

    fn clamp_range(&self, indices: RangeInclusive<usize>) -> (usize, usize) {
        let hi = (*indices.end()).min(self.timestamps.len() - 1);
        let lo = (*indices.start()).min(hi);
        (lo, hi)
    }

    /// Construct from samples taken in order from an existing trace; they are
    /// already sorted and non-empty so only the stats need computing.
    fn from_validated(name: String, timestamps: Vec<f64>, values: Vec<f64>) -> Self {
        let (min_value, max_value) = values
            .iter()
            .fold((values[0], values[0]), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        let duration = timestamps[timestamps.len() - 1] - timestamps[0];
        Self { name, timestamps, values, duration, min_value, max_value }
    }
}
