// File: crates/trace-core/src/lib.rs
// Summary: Core library entry point; exports the trace container, decimation, view mapping and loaders.

pub mod error;
pub mod series;
pub mod downsample;
pub mod scale;
pub mod view;
pub mod loader;

pub use error::{LoadError, ValidationError};
pub use series::TraceData;
pub use downsample::{decimate_peaks, decimate_peaks_anchored};
pub use scale::TraceScale;
pub use view::ViewWindow;
