// File: crates/trace-core/src/loader.rs
// Summary: Trace loaders: CODESYS trace XML documents and two-column CSV files.
// Notes:
// - CODESYS traces store each variable as a <TraceVariable VarName=".."> element
//   whose <Timestamps> (milliseconds) and <Values> children hold comma-separated
//   numbers. Timestamps are converted to seconds here; the core never sees ms.

use std::io::Read;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::{debug, warn};

use crate::error::LoadError;
use crate::series::TraceData;

/// Seconds per CODESYS timestamp unit.
const CODESYS_TIME_SCALE: f64 = 1e-3;

/// Load the `var_index`-th trace variable (document order) of a CODESYS trace.
pub fn from_codesys_trace(xml: &str, var_index: usize) -> Result<TraceData, LoadError> {
    let mut raw = scan_variables(xml)?;
    let found = raw.len();
    if var_index >= found {
        return Err(LoadError::MissingVariable { index: var_index, found });
    }
    raw.swap_remove(var_index).into_trace()
}

/// Load every trace variable of a CODESYS trace, in document order.
pub fn codesys_variables(xml: &str) -> Result<Vec<TraceData>, LoadError> {
    scan_variables(xml)?.into_iter().map(RawVariable::into_trace).collect()
}

/// Load a headed `time,value` CSV (time in seconds).
pub fn from_csv_reader<R: Read>(name: impl Into<String>, reader: R) -> Result<TraceData, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut timestamps = Vec::new();
    let mut values = Vec::new();
    for (row, rec) in rdr.records().enumerate() {
        let rec = rec?;
        timestamps.push(parse_number(rec.get(0).unwrap_or(""), "time", row)?);
        values.push(parse_number(rec.get(1).unwrap_or(""), "value", row)?);
    }
    Ok(TraceData::new(name, timestamps, values)?)
}

/// Load a trace file, picking the format from its extension.
/// `var_index` selects the variable in multi-variable CODESYS traces.
pub fn load_path(path: impl AsRef<Path>, var_index: usize) -> Result<TraceData, LoadError> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "xml" | "trace" => {
            let xml = std::fs::read_to_string(path)?;
            from_codesys_trace(&xml, var_index)
        }
        "csv" => {
            if var_index != 0 {
                warn!(path = %path.display(), var_index, "CSV files hold one variable; ignoring variable index");
            }
            let name = path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
            from_csv_reader(name, std::fs::File::open(path)?)
        }
        _ => Err(LoadError::Unsupported(path.display().to_string())),
    }
}

// ---- CODESYS scanning --------------------------------------------------------

#[derive(Clone, Copy, PartialEq, Eq)]
enum Field {
    Timestamps,
    Values,
}

#[derive(Default)]
struct RawVariable {
    name: String,
    timestamps: Option<String>,
    values: Option<String>,
}

impl RawVariable {
    fn into_trace(self) -> Result<TraceData, LoadError> {
        let ts_text = self.timestamps.ok_or_else(|| LoadError::MissingElement {
            variable: self.name.clone(),
            element: "Timestamps",
        })?;
        let vs_text = self.values.ok_or_else(|| LoadError::MissingElement {
            variable: self.name.clone(),
            element: "Values",
        })?;

        let timestamps = parse_list(&ts_text, "timestamp")?
            .into_iter()
            .map(|ms| ms * CODESYS_TIME_SCALE)
            .collect::<Vec<_>>();
        let values = parse_list(&vs_text, "value")?;
        debug!(variable = %self.name, samples = timestamps.len(), "loaded CODESYS trace variable");

        Ok(TraceData::new(self.name, timestamps, values)?)
    }

    fn slot(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Timestamps => &mut self.timestamps,
            Field::Values => &mut self.values,
        }
    }
}

fn scan_variables(xml: &str) -> Result<Vec<RawVariable>, LoadError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut vars: Vec<RawVariable> = Vec::new();
    let mut buf = Vec::new();
    let mut depth = 0usize;
    // Depth of the open <TraceVariable>, if any.
    let mut var_depth: Option<usize> = None;
    // Field being captured and its accumulated text.
    let mut capture: Option<(Field, String)> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                depth += 1;
                match e.name().as_ref() {
                    b"TraceVariable" => {
                        if var_depth.is_some() {
                            warn!("nested <TraceVariable> element; treating it as a new variable");
                        }
                        vars.push(RawVariable { name: var_name(e), ..RawVariable::default() });
                        var_depth = Some(depth);
                    }
                    other => {
                        if let Some(field) = child_field(other, var_depth, depth) {
                            capture = Some((field, String::new()));
                        }
                    }
                }
            }
            Event::Empty(ref e) => match e.name().as_ref() {
                b"TraceVariable" => {
                    vars.push(RawVariable { name: var_name(e), ..RawVariable::default() });
                }
                other => {
                    if let (Some(field), Some(var)) = (child_field(other, var_depth, depth + 1), vars.last_mut()) {
                        *var.slot(field) = Some(String::new());
                    }
                }
            },
            Event::Text(ref e) => {
                if let Some((_, text)) = capture.as_mut() {
                    text.push_str(&e.unescape().map_err(quick_xml::Error::from)?);
                }
            }
            Event::CData(ref e) => {
                if let Some((_, text)) = capture.as_mut() {
                    text.push_str(&String::from_utf8_lossy(e.as_ref()));
                }
            }
            Event::End(_) => {
                if let Some((field, text)) = capture.take() {
                    if let Some(var) = vars.last_mut() {
                        *var.slot(field) = Some(text);
                    }
                }
                if var_depth == Some(depth) {
                    var_depth = None;
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(vars)
}

/// Which captured field, if any, an element at `depth` is: only direct
/// children of the open <TraceVariable> count.
fn child_field(name: &[u8], var_depth: Option<usize>, depth: usize) -> Option<Field> {
    if var_depth.map(|d| d + 1) != Some(depth) {
        return None;
    }
    match name {
        b"Timestamps" => Some(Field::Timestamps),
        b"Values" => Some(Field::Values),
        _ => None,
    }
}

fn var_name(e: &BytesStart) -> String {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == b"VarName")
        .map(|a| String::from_utf8_lossy(&a.value).into_owned())
        .unwrap_or_default()
}

fn parse_list(text: &str, field: &'static str) -> Result<Vec<f64>, LoadError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }
    text.split(',')
        .enumerate()
        .map(|(index, s)| parse_number(s, field, index))
        .collect()
}

fn parse_number(s: &str, field: &'static str, index: usize) -> Result<f64, LoadError> {
    s.trim()
        .parse::<f64>()
        .map_err(|_| LoadError::BadNumber { field, index, text: s.to_string() })
}
