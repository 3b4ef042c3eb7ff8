// File: crates/trace-render-skia/src/render.rs
// Summary: Headless trace rendering pipeline using Skia CPU raster surfaces.

use anyhow::{Context, Result};
use skia_safe as skia;
use tracing::debug;

use trace_core::{TraceData, TraceScale, ViewWindow};

use crate::theme::Theme;

/// Default surface width in pixels.
pub const WIDTH: i32 = 1024;
/// Default surface height in pixels.
pub const HEIGHT: i32 = 320;

pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub theme: Theme,
    /// Half the side of the square sample markers; also the padding kept
    /// around the plot so edge markers are not clipped.
    pub marker_radius: f32,
    pub draw_markers: bool,
    pub draw_labels: bool,
    /// Value range for the vertical axis; the drawn trace's own extrema when unset.
    pub value_range: Option<(f64, f64)>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            theme: Theme::default(),
            marker_radius: 1.5,
            draw_markers: true,
            draw_labels: true,
            value_range: None,
        }
    }
}

impl RenderOptions {
    /// Plot area once the marker padding is taken off every side.
    pub fn plot_size(&self) -> (f32, f32) {
        let pad = 2.0 * self.marker_radius;
        ((self.width as f32 - pad).max(1.0), (self.height as f32 - pad).max(1.0))
    }
}

/// Pixel positions of the samples needed to draw `window`, relative to the
/// plot origin. Y is rounded to whole pixels to keep flat runs crisp.
pub fn plot_points(trace: &TraceData, window: &ViewWindow, width: f32, height: f32) -> Vec<(f32, f32)> {
    let scale = TraceScale::new(trace, window, width as f64, height as f64);
    project(trace, window, &scale)
}

fn project(trace: &TraceData, window: &ViewWindow, scale: &TraceScale) -> Vec<(f32, f32)> {
    let range = window.visible_range(trace);
    let ts = &trace.timestamps()[range.clone()];
    let vs = &trace.values()[range];
    ts.iter()
        .zip(vs)
        .map(|(&t, &v)| (scale.x(t) as f32, scale.y(v).round() as f32))
        .collect()
}

/// Draw `trace` over `window` onto `canvas`, filling `opts.width x opts.height`.
pub fn draw_trace(canvas: &skia::Canvas, trace: &TraceData, window: &ViewWindow, opts: &RenderOptions) {
    let theme = &opts.theme;
    canvas.save();
    canvas.clear(theme.background);

    // Half-pixel center offset plus (radius - 0.5) of marker padding.
    let r = opts.marker_radius;
    canvas.translate((r, r));
    let (w, h) = opts.plot_size();

    let mut frame = skia::Paint::default();
    frame.set_anti_alias(true);
    frame.set_style(skia::paint::Style::Stroke);
    frame.set_stroke_width(1.0);
    frame.set_color(theme.frame);
    canvas.draw_rect(skia::Rect::from_xywh(0.0, 0.0, w, h), &frame);

    let scale = match opts.value_range {
        Some((lo, hi)) => TraceScale::with_value_range(lo, hi, window, w as f64, h as f64),
        None => TraceScale::new(trace, window, w as f64, h as f64),
    };
    let points = project(trace, window, &scale);
    debug!(trace = trace.name(), visible = points.len(), "draw_trace");

    if let Some(&(x0, y0)) = points.first() {
        let mut path = skia::Path::new();
        path.move_to((x0, y0));
        for &(x, y) in points.iter().skip(1) {
            path.line_to((x, y));
        }

        let mut stroke = skia::Paint::default();
        stroke.set_anti_alias(true);
        stroke.set_style(skia::paint::Style::Stroke);
        stroke.set_stroke_width(1.0);
        stroke.set_color(theme.line_stroke);
        canvas.draw_path(&path, &stroke);
    }

    if opts.draw_markers {
        let mut fill = skia::Paint::default();
        fill.set_anti_alias(true);
        fill.set_style(skia::paint::Style::Fill);
        fill.set_color(theme.marker);
        for &(x, y) in &points {
            canvas.draw_rect(skia::Rect::from_xywh(x - r, y - r, 2.0 * r, 2.0 * r), &fill);
        }
    }

    if opts.draw_labels {
        draw_label(canvas, trace.name(), (10.0, h - 10.0), theme);
    }

    canvas.restore();
}

/// Render to a PNG file at `output_png_path`.
pub fn render_to_png(
    trace: &TraceData,
    window: &ViewWindow,
    opts: &RenderOptions,
    output_png_path: impl AsRef<std::path::Path>,
) -> Result<()> {
    let bytes = render_to_png_bytes(trace, window, opts)?;
    let path = output_png_path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Render to in-memory PNG bytes.
pub fn render_to_png_bytes(trace: &TraceData, window: &ViewWindow, opts: &RenderOptions) -> Result<Vec<u8>> {
    let mut surface = render_surface(trace, window, opts)?;
    let image = surface.image_snapshot();
    #[allow(deprecated)]
    let data = image
        .encode_to_data(skia::EncodedImageFormat::PNG)
        .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
    Ok(data.as_bytes().to_vec())
}

/// Render to an unpremultiplied RGBA8 buffer; returns (pixels, width, height, row stride in bytes).
pub fn render_to_rgba8(
    trace: &TraceData,
    window: &ViewWindow,
    opts: &RenderOptions,
) -> Result<(Vec<u8>, u32, u32, usize)> {
    let mut surface = render_surface(trace, window, opts)?;
    let (w, h) = (opts.width, opts.height);
    let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
    let stride = w as usize * 4;
    let mut pixels = vec![0u8; stride * h as usize];
    if !surface.read_pixels(&info, &mut pixels, stride, (0, 0)) {
        anyhow::bail!("reading back {w}x{h} surface failed");
    }
    Ok((pixels, w as u32, h as u32, stride))
}

// ---- helpers ----------------------------------------------------------------

fn render_surface(trace: &TraceData, window: &ViewWindow, opts: &RenderOptions) -> Result<skia::Surface> {
    let mut surface = skia::surfaces::raster_n32_premul((opts.width, opts.height))
        .ok_or_else(|| anyhow::anyhow!("failed to create {}x{} raster surface", opts.width, opts.height))?;
    draw_trace(surface.canvas(), trace, window, opts);
    Ok(surface)
}

fn draw_label(canvas: &skia::Canvas, text: &str, at: (f32, f32), theme: &Theme) {
    let mut font = skia::Font::default();
    font.set_size(12.0);

    // A 3px halo keeps the name readable over the line.
    let mut halo = skia::Paint::default();
    halo.set_anti_alias(true);
    halo.set_style(skia::paint::Style::Stroke);
    halo.set_stroke_width(3.0);
    halo.set_stroke_join(skia::paint::Join::Round);
    halo.set_color(theme.label_halo);
    canvas.draw_str(text, at, &font, &halo);

    let mut fill = skia::Paint::default();
    fill.set_anti_alias(true);
    fill.set_color(theme.label);
    canvas.draw_str(text, at, &font, &fill);
}
