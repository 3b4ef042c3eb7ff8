// File: crates/trace-render-skia/tests/snapshot.rs
// Purpose: Golden snapshot harness with bless flow.
// Behavior:
// - Renders a deterministic small trace to PNG bytes.
// - If env UPDATE_SNAPSHOTS=1, (re)writes the snapshot file.
// - Else, if snapshot exists, compares decoded pixels for exact match.
// - Else, logs a note and returns (skips) without failing to ease first run.
// Independent of the snapshot files, known pixels (spike marker, empty plot
// area) are checked against the theme colors on every run.

use trace_core::{TraceData, ViewWindow};
use trace_render_skia::{plot_points, render_to_png_bytes, render_to_rgba8, RenderOptions, Theme};

fn bless_mode() -> bool {
    std::env::var("UPDATE_SNAPSHOTS").ok().map(|v| v == "1" || v.eq_ignore_ascii_case("true")).unwrap_or(false)
}

fn write_or_compare(path: &std::path::Path, bytes: &[u8]) {
    if bless_mode() {
        if let Some(parent) = path.parent() { std::fs::create_dir_all(parent).ok(); }
        std::fs::write(path, bytes).expect("write snapshot");
        eprintln!("[snapshot] Updated {} ({} bytes)", path.display(), bytes.len());
        return;
    }
    if path.exists() {
        let want = std::fs::read(path).expect("read snapshot");
        let got_img = image::load_from_memory(bytes).expect("decode got").to_rgba8();
        let want_img = image::load_from_memory(&want).expect("decode want").to_rgba8();
        assert_eq!(got_img.as_raw(), want_img.as_raw(), "Pixels differ: {}", path.display());
    } else {
        eprintln!("[snapshot] Missing {}; set UPDATE_SNAPSHOTS=1 to bless.", path.display());
    }
}

fn render(theme: Theme) -> Vec<u8> {
    let trace = TraceData::new(
        "step",
        vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        vec![0.0, 0.0, 1.0, 1.0, 4.0, 1.0, 1.0],
    )
    .unwrap();
    let mut opts = RenderOptions::default();
    opts.width = 320;
    opts.height = 120;
    opts.theme = theme;
    opts.draw_labels = false; // deterministic
    render_to_png_bytes(&trace, &ViewWindow::full(&trace), &opts).expect("render bytes")
}

#[test]
fn golden_light() {
    let bytes = render(Theme::light());
    let decoded = image::load_from_memory(&bytes).expect("decode").to_rgba8();
    assert_eq!(decoded.dimensions(), (320, 120));
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/__snapshots__/step_light.png");
    write_or_compare(&path, &bytes);
}

#[test]
fn golden_dark() {
    let bytes = render(Theme::dark());
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/__snapshots__/step_dark.png");
    write_or_compare(&path, &bytes);
}

fn rgba(c: skia_safe::Color) -> [u8; 4] {
    [c.r(), c.g(), c.b(), c.a()]
}

fn pixel(px: &[u8], stride: usize, x: usize, y: usize) -> [u8; 4] {
    let i = y * stride + x * 4;
    [px[i], px[i + 1], px[i + 2], px[i + 3]]
}

fn check_spike_pixels(theme: Theme) {
    let trace = TraceData::new("spike", vec![0.0, 1.0, 2.0, 3.0, 4.0], vec![0.0, 0.0, 10.0, 0.0, 0.0]).unwrap();
    let window = ViewWindow::full(&trace);
    let mut opts = RenderOptions::default();
    // 200x100 plot area once the 1.5px marker padding is taken off
    opts.width = 203;
    opts.height = 103;
    opts.theme = theme;
    opts.draw_labels = false;

    let (w, h) = opts.plot_size();
    let points = plot_points(&trace, &window, w, h);
    assert_eq!(points[2], (100.0, 0.0));

    let (px, _, _, stride) = render_to_rgba8(&trace, &window, &opts).expect("rgba render");
    let r = opts.marker_radius;
    let (mx, my) = ((points[2].0 + r) as usize, (points[2].1 + r) as usize);
    assert_eq!((mx, my), (101, 1));
    assert_eq!(pixel(&px, stride, mx, my), rgba(theme.marker), "spike marker at ({mx},{my})");
    // Plot interior, well clear of the line and frame.
    assert_eq!(pixel(&px, stride, 150, 20), rgba(theme.background));
}

#[test]
fn spike_marker_pixels_light() {
    check_spike_pixels(Theme::light());
}

#[test]
fn spike_marker_pixels_dark() {
    check_spike_pixels(Theme::dark());
}
