// File: crates/trace-demo/src/main.rs
// Summary: Demo loads a CODESYS trace (or time,value CSV), decimates the requested window and renders it to PNG.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use trace_core::{loader, ViewWindow};
use trace_render_skia::{render_to_png, RenderOptions, Theme};

/// Render one variable of a recorded trace to a PNG timeline.
#[derive(Parser, Debug)]
#[command(name = "trace-demo")]
struct Args {
    /// Trace file (.xml/.trace CODESYS trace, or .csv with time,value columns)
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Index of the trace variable to plot (CODESYS traces)
    #[arg(short, long, default_value_t = 0)]
    variable: usize,

    /// Window start in seconds (trace start if omitted)
    #[arg(long, allow_hyphen_values = true)]
    from: Option<f64>,
    /// Window end in seconds (trace end if omitted)
    #[arg(long, allow_hyphen_values = true)]
    to: Option<f64>,

    #[arg(long, default_value_t = trace_render_skia::WIDTH)]
    width: i32,
    #[arg(long, default_value_t = trace_render_skia::HEIGHT)]
    height: i32,

    /// Target sample count after decimation (defaults to the image width)
    #[arg(long)]
    points: Option<usize>,

    /// Skip decimation and draw every sample
    #[arg(long)]
    raw: bool,

    /// Color theme: light or dark
    #[arg(long, default_value = "light")]
    theme: String,

    /// Output PNG path (defaults to target/out/trace_<stem>_<variable>.png)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let trace = loader::load_path(&args.file, args.variable)
        .with_context(|| format!("failed to load trace '{}'", args.file.display()))?;
    info!(
        name = trace.name(),
        samples = trace.len(),
        duration_s = trace.duration(),
        min = trace.min_value(),
        max = trace.max_value(),
        "loaded trace"
    );

    let window = ViewWindow::from_bounds(&trace, args.from, args.to);
    if window.span() < 0.0 {
        anyhow::bail!("window end {} precedes window start {}", window.upper, window.lower);
    }

    let theme = Theme::by_name(&args.theme).with_context(|| format!("unknown theme '{}'", args.theme))?;
    // Scale values against the whole trace, not the decimated window.
    let opts = RenderOptions {
        width: args.width,
        height: args.height,
        theme,
        value_range: Some((trace.min_value(), trace.max_value())),
        ..RenderOptions::default()
    };

    let drawn = if args.raw {
        trace.clone()
    } else {
        let target = args.points.unwrap_or(args.width.max(1) as usize);
        let reduced = trace.resample_view(target, &window);
        info!(target, kept = reduced.len(), "decimated window");
        reduced
    };

    let out = args.out.clone().unwrap_or_else(|| out_name_with(&args.file, args.variable));
    render_to_png(&drawn, &window, &opts, &out)?;
    info!(path = %out.display(), "wrote PNG");
    Ok(())
}

/// Produce output file name like target/out/trace_<stem>_<variable>.png
fn out_name_with(input: &Path, variable: usize) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("trace");
    let mut out = PathBuf::from("target/out");
    out.push(format!("trace_{stem}_{variable}.png"));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_name_uses_stem_and_variable() {
        assert_eq!(out_name_with(Path::new("logs/boiler.xml"), 2), PathBuf::from("target/out/trace_boiler_2.png"));
    }

    #[test]
    fn args_parse_window() {
        let args = Args::try_parse_from(["trace-demo", "t.xml", "--from", "0", "--to", "2.5", "-v", "1"]).unwrap();
        assert_eq!(args.from, Some(0.0));
        assert_eq!(args.to, Some(2.5));
        assert_eq!(args.variable, 1);
        assert_eq!(args.width, trace_render_skia::WIDTH);
    }
}
