// File: crates/trace-render-skia/src/lib.rs
// Summary: Skia renderer crate. Draws a trace over a view window to PNG or RGBA buffers.

pub mod render;
pub mod theme;

pub use render::{
    draw_trace, plot_points, render_to_png, render_to_png_bytes, render_to_rgba8, RenderOptions, HEIGHT, WIDTH,
};
pub use theme::Theme;
