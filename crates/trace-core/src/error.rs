// File: crates/trace-core/src/error.rs
// Summary: Error types for trace construction and trace loading.

use thiserror::Error;

/// Raised by `TraceData::new` when the raw arrays break the trace invariants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("timestamps and values must have the same length ({timestamps} vs {values})")]
    LengthMismatch { timestamps: usize, values: usize },

    #[error("a trace needs at least one sample")]
    Empty,

    #[error("timestamps must be increasing: [{index}] = {current} follows {previous}")]
    Decreasing { index: usize, previous: f64, current: f64 },

    #[error("timestamp [{index}] is not finite")]
    NonFiniteTimestamp { index: usize },
}

/// Errors surfaced by the trace loaders.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("malformed trace XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("trace variable #{index} not found ({found} variables in document)")]
    MissingVariable { index: usize, found: usize },

    #[error("trace variable `{variable}` has no <{element}> element")]
    MissingElement { variable: String, element: &'static str },

    #[error("invalid {field} [{index}]: '{text}'")]
    BadNumber { field: &'static str, index: usize, text: String },

    #[error("unsupported trace file: {0}")]
    Unsupported(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
