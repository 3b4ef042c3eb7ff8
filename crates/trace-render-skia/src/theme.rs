// File: crates/trace-render-skia/src/theme.rs
// Summary: Light/Dark color sets for trace rendering.

use skia_safe as skia;

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: skia::Color,
    pub frame: skia::Color,
    pub line_stroke: skia::Color,
    pub marker: skia::Color,
    pub label: skia::Color,
    pub label_halo: skia::Color,
}

impl Theme {
    /// White canvas with a silver frame, matching the classic trace viewer.
    pub fn light() -> Self {
        Self {
            name: "light",
            background: skia::Color::from_argb(255, 255, 255, 255),
            frame: skia::Color::from_argb(255, 192, 192, 192),
            line_stroke: skia::Color::from_argb(255, 32, 120, 200),
            marker: skia::Color::from_argb(255, 32, 120, 200),
            label: skia::Color::from_argb(255, 0, 0, 0),
            label_halo: skia::Color::from_argb(255, 255, 255, 255),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: skia::Color::from_argb(255, 18, 18, 20),
            frame: skia::Color::from_argb(255, 70, 70, 78),
            line_stroke: skia::Color::from_argb(255, 64, 160, 255),
            marker: skia::Color::from_argb(255, 64, 160, 255),
            label: skia::Color::from_argb(255, 235, 235, 245),
            label_halo: skia::Color::from_argb(255, 18, 18, 20),
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "light" => Some(Self::light()),
            "dark" => Some(Self::dark()),
            _ => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}
