// File: crates/trace-core/src/downsample.rs
// Summary: Peak-preserving stride decimation for (timestamp, value) slices.

use tracing::trace;

/// Fraction of the window's value range a step must exceed to count as a peak.
pub const PEAK_TOLERANCE: f64 = 0.1;

/// Decimate parallel `timestamps`/`values` slices to roughly `target_length`
/// samples.
///
/// Keeps every `gap`-th sample (`gap = len / target_length`) plus every
/// sample whose value differs from its predecessor by more than
/// `PEAK_TOLERANCE` times the value range of the slice. Sample 0 is always
/// kept. Slices of one sample or fewer, and targets at or above the slice
/// length, are returned unchanged.
///
/// The slices must have equal length; in release builds any excess tail of
/// the longer slice is ignored.
pub fn decimate_peaks(timestamps: &[f64], values: &[f64], target_length: usize) -> (Vec<f64>, Vec<f64>) {
    decimate(timestamps, values, target_length, false)
}

/// Like `decimate_peaks`, but the last sample of the slice is always kept
/// too, so a line drawn from the result spans the same time range as the
/// input.
pub fn decimate_peaks_anchored(timestamps: &[f64], values: &[f64], target_length: usize) -> (Vec<f64>, Vec<f64>) {
    decimate(timestamps, values, target_length, true)
}

fn decimate(timestamps: &[f64], values: &[f64], target_length: usize, keep_last: bool) -> (Vec<f64>, Vec<f64>) {
    debug_assert_eq!(timestamps.len(), values.len(), "timestamps and values must pair up");
    let n = timestamps.len().min(values.len());
    if n <= 1 || target_length >= n {
        return (timestamps[..n].to_vec(), values[..n].to_vec());
    }

    let (min_v, max_v) = values[..n]
        .iter()
        .fold((values[0], values[0]), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let tolerance = PEAK_TOLERANCE * (max_v - min_v);
    let gap = (n / target_length.max(1)).max(1);

    let mut out_t = Vec::with_capacity(target_length + 2);
    let mut out_v = Vec::with_capacity(target_length + 2);
    let mut peaks = 0usize;
    for i in 0..n {
        let peak = i > 0 && (values[i] - values[i - 1]).abs() > tolerance;
        if peak {
            peaks += 1;
        }
        if peak || i % gap == 0 || (keep_last && i == n - 1) {
            out_t.push(timestamps[i]);
            out_v.push(values[i]);
        }
    }
    trace!(samples = n, tolerance, gap, peaks, keep_last, kept = out_t.len(), "decimate_peaks");
    (out_t, out_v)
}
