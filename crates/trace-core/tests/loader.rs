// File: crates/trace-core/tests/loader.rs
// Purpose: CODESYS trace XML and CSV loaders feeding TraceData construction.

use trace_core::loader::{codesys_variables, from_codesys_trace, from_csv_reader, load_path};
use trace_core::{LoadError, ValidationError};

const TRACE_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Trace Name="Trace" Version="3.5.14.0">
  <TraceVariableList>
    <TraceVariable VarName="PLC_PRG.rTemp" GraphType="0">
      <Timestamps>0,500,1000,1500</Timestamps>
      <Values>20.5, 21, 35.25, 21</Values>
    </TraceVariable>
    <TraceVariable VarName="PLC_PRG.xPump">
      <Values>0,1,1</Values>
      <Timestamps>0,100,200</Timestamps>
    </TraceVariable>
  </TraceVariableList>
</Trace>
"#;

#[test]
fn codesys_first_variable_in_seconds() {
    let t = from_codesys_trace(TRACE_XML, 0).expect("load variable 0");
    assert_eq!(t.name(), "PLC_PRG.rTemp");
    assert_eq!(t.timestamps(), &[0.0, 0.5, 1.0, 1.5]);
    assert_eq!(t.values(), &[20.5, 21.0, 35.25, 21.0]);
    assert_eq!(t.duration(), 1.5);
}

#[test]
fn codesys_selects_variable_by_index() {
    let t = from_codesys_trace(TRACE_XML, 1).expect("load variable 1");
    assert_eq!(t.name(), "PLC_PRG.xPump");
    assert_eq!(t.timestamps(), &[0.0, 0.1, 0.2]);

    let all = codesys_variables(TRACE_XML).unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[1], t);
}

#[test]
fn codesys_missing_variable() {
    let err = from_codesys_trace(TRACE_XML, 5).unwrap_err();
    assert!(matches!(err, LoadError::MissingVariable { index: 5, found: 2 }), "{err:?}");
}

#[test]
fn codesys_missing_values_element() {
    let xml = r#"<Trace><TraceVariable VarName="a"><Timestamps>0,1</Timestamps></TraceVariable></Trace>"#;
    let err = from_codesys_trace(xml, 0).unwrap_err();
    assert!(matches!(err, LoadError::MissingElement { element: "Values", .. }), "{err:?}");
}

#[test]
fn codesys_validation_error_surfaces_unchanged() {
    let xml = r#"<Trace><TraceVariable VarName="a"><Timestamps>0,10,5</Timestamps><Values>1,2,3</Values></TraceVariable></Trace>"#;
    let err = from_codesys_trace(xml, 0).unwrap_err();
    match err {
        LoadError::Validation(ValidationError::Decreasing { index, .. }) => assert_eq!(index, 2),
        other => panic!("unexpected error: {other:?}"),
    }

    let xml = r#"<Trace><TraceVariable VarName="a"><Timestamps>0,10</Timestamps><Values>1</Values></TraceVariable></Trace>"#;
    let err = from_codesys_trace(xml, 0).unwrap_err();
    assert!(matches!(err, LoadError::Validation(ValidationError::LengthMismatch { timestamps: 2, values: 1 })));
}

#[test]
fn codesys_bad_number() {
    let xml = r#"<Trace><TraceVariable VarName="a"><Timestamps>0,x</Timestamps><Values>1,2</Values></TraceVariable></Trace>"#;
    let err = from_codesys_trace(xml, 0).unwrap_err();
    assert!(matches!(err, LoadError::BadNumber { field: "timestamp", index: 1, .. }), "{err:?}");
}

#[test]
fn csv_two_columns() {
    let data = "time,value\n0.0, 1.5\n0.5,2.5\n1.0,-3\n";
    let t = from_csv_reader("pressure", data.as_bytes()).expect("csv");
    assert_eq!(t.name(), "pressure");
    assert_eq!(t.timestamps(), &[0.0, 0.5, 1.0]);
    assert_eq!(t.values(), &[1.5, 2.5, -3.0]);
}

#[test]
fn load_path_dispatches_on_extension() {
    let dir = std::path::PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("loader");
    std::fs::create_dir_all(&dir).unwrap();

    let xml_path = dir.join("recording.xml");
    std::fs::write(&xml_path, TRACE_XML).unwrap();
    assert_eq!(load_path(&xml_path, 1).unwrap().name(), "PLC_PRG.xPump");

    let csv_path = dir.join("flow.csv");
    std::fs::write(&csv_path, "t,v\n0,1\n1,2\n").unwrap();
    assert_eq!(load_path(&csv_path, 0).unwrap().name(), "flow");

    let err = load_path(dir.join("notes.txt"), 0).unwrap_err();
    assert!(matches!(err, LoadError::Unsupported(_)));
}
