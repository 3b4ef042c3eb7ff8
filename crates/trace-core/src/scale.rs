// File: crates/trace-core/src/scale.rs
// Summary: Screen mapping for a trace drawn over a visible time window.

use crate::series::TraceData;
use crate::view::ViewWindow;

/// Maps trace samples into a `width x height` viewport.
///
/// The vertical range is taken from the whole trace, not the visible part,
/// so the value axis stays put while the window pans or zooms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TraceScale {
    pub width: f64,
    pub height: f64,
    pub lower: f64,
    pub min_value: f64,
    sx: f64,
    sy: f64,
    /// Pixel offset for the value axis: `height`, or `height / 2` for a flat trace.
    ty: f64,
    /// Pixel offset for the time axis: 0, or `width / 2` for a zero-span window.
    tx: f64,
}

impl TraceScale {
    pub fn new(trace: &TraceData, window: &ViewWindow, width: f64, height: f64) -> Self {
        Self::with_value_range(trace.min_value(), trace.max_value(), window, width, height)
    }

    /// Scale against an explicit value range, e.g. the extrema of the full
    /// trace when drawing a resampled copy of one window.
    pub fn with_value_range(min_value: f64, max_value: f64, window: &ViewWindow, width: f64, height: f64) -> Self {
        let span = window.span();
        let (sx, tx) = if span > 0.0 { (width / span, 0.0) } else { (0.0, width / 2.0) };

        let value_span = max_value - min_value;
        let (sy, ty) = if value_span == 0.0 || !value_span.is_finite() {
            (0.0, height / 2.0)
        } else {
            (height / value_span, height)
        };

        Self { width, height, lower: window.lower, min_value, sx, sy, ty, tx }
    }

    /// Horizontal pixels per second.
    pub fn x_scale(&self) -> f64 { self.sx }

    /// Vertical pixels per value unit; 0 for a flat trace.
    pub fn y_scale(&self) -> f64 { self.sy }

    #[inline]
    pub fn x(&self, t: f64) -> f64 {
        self.tx + self.sx * (t - self.lower)
    }

    /// Larger values map to smaller y (higher on screen).
    #[inline]
    pub fn y(&self, v: f64) -> f64 {
        self.ty - self.sy * (v - self.min_value)
    }

    #[inline]
    pub fn point(&self, t: f64, v: f64) -> (f64, f64) {
        (self.x(t), self.y(v))
    }

    /// Inverse of `x`; returns the window start for a zero-span window.
    pub fn timestamp_at(&self, px: f64) -> f64 {
        if self.sx == 0.0 { self.lower } else { self.lower + (px - self.tx) / self.sx }
    }
}
