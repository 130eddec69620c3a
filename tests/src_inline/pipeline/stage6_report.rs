use std::path::PathBuf;

use super::*;
use crate::input::reader::CsvTable;
use crate::pipeline::{PipelineOptions, run_batch};
use crate::report::{Filters, build_summary};

fn table(headers: &[&str], rows: &[&[&str]]) -> SpecimenTable {
    SpecimenTable::from_sources(vec![CsvTable {
        path: PathBuf::from("mem.csv"),
        headers: headers.iter().map(|h| h.to_string()).collect(),
        rows: rows
            .iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect(),
    }])
    .unwrap()
}

const HEADERS: &[&str] = &[
    "IDCODE", "P11", "P12", "P21", "P22", "P31", "P32", "ENTERO1", "ENTERO2", "PROVINCE",
];

#[test]
fn test_layout_appends_derived_columns() {
    let headers: Vec<String> = ["IDCODE", "P11", "LAB"].iter().map(|s| s.to_string()).collect();
    let layout = output_layout(&headers);
    assert_eq!(layout.len(), 12);
    assert_eq!(layout[0], OutputColumn::Original(0));
    assert_eq!(layout[1], OutputColumn::Reading(ReadingField::P11));
    assert_eq!(layout[2], OutputColumn::Original(2));
    assert_eq!(layout[3], OutputColumn::Derived(DerivedColumn::IdCode2));
    assert_eq!(layout[11], OutputColumn::Derived(DerivedColumn::Linelist));
}

#[test]
fn test_layout_replaces_existing_derived_column_in_place() {
    let headers: Vec<String> = ["RESULT", "IDCODE"].iter().map(|s| s.to_string()).collect();
    let layout = output_layout(&headers);
    assert_eq!(layout.len(), 10);
    assert_eq!(layout[0], OutputColumn::Derived(DerivedColumn::Result));
    let results = layout
        .iter()
        .filter(|c| **c == OutputColumn::Derived(DerivedColumn::Result))
        .count();
    assert_eq!(results, 1);
}

#[test]
fn test_combined_csv_contents() {
    let t = table(
        HEADERS,
        &[
            &["AFG/NAD/21/0002-1", "1", "2.0", "7", "7", "7", "7", "x", "", "Nangarhar"],
            &["AFG/NAD/21/0002-2", "1", "1", "7", "7", "7", "7", "1", "4", "Nangarhar"],
        ],
    );
    let batch = run_batch(&t, &PipelineOptions::default());
    let mut buf = Vec::new();
    write_combined_csv(&t, &batch, &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines[0],
        "IDCODE,P11,P12,P21,P22,P31,P32,ENTERO1,ENTERO2,PROVINCE,IDCODE2,Year,type1,type2,type3,ENTERO,RESULT,WPV1count,Linelist"
    );
    assert_eq!(
        lines[1],
        "AFG/NAD/21/0002-1,1,2,7,7,7,7,,,Nangarhar,AFG/NAD/21/0002,2021,WPV1 + SL1,Negative,Negative,,SL1 + WPV1,1,1"
    );
    assert_eq!(
        lines[2],
        "AFG/NAD/21/0002-2,1,1,7,7,7,7,1,4,Nangarhar,AFG/NAD/21/0002,2021,WPV1,Negative,Negative,NPEV,WPV1 + NPEV,1,0"
    );
    assert_eq!(lines.len(), 3);
}

#[test]
fn test_write_reports_standalone_and_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let t = table(HEADERS, &[&["A-1", "1", "1", "", "", "", "", "", "", "P"]]);
    let options = PipelineOptions::default();
    let batch = run_batch(&t, &options);
    let summary = build_summary(&t, &batch, &Filters::default(), &options);

    let standalone = resolve_output_dir(dir.path(), RunMode::Standalone);
    let written = write_reports(
        &Stage6Input {
            table: &t,
            batch: &batch,
            summary: &summary,
            run_mode: RunMode::Standalone,
        },
        &standalone,
    )
    .unwrap();
    assert_eq!(written.len(), 3);
    assert!(standalone.join(COMBINED_CSV).exists());
    assert!(standalone.join(SUMMARY_JSON).exists());
    assert!(standalone.join(REPORT_TXT).exists());
    assert!(!standalone.join(PIPELINE_STEP_JSON).exists());

    let nested = resolve_output_dir(dir.path(), RunMode::Pipeline);
    assert_eq!(nested, dir.path().join("afplab-linelist"));
    let written = write_reports(
        &Stage6Input {
            table: &t,
            batch: &batch,
            summary: &summary,
            run_mode: RunMode::Pipeline,
        },
        &nested,
    )
    .unwrap();
    assert_eq!(written.len(), 4);
    let step = std::fs::read_to_string(nested.join(PIPELINE_STEP_JSON)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&step).unwrap();
    assert_eq!(value["mode"], "pipeline");
    assert_eq!(value["key_metrics"]["linelist_cases"], 1);
}

#[test]
fn test_resolve_output_dir_standalone() {
    let out = resolve_output_dir(std::path::Path::new("/tmp/out"), RunMode::Standalone);
    assert_eq!(out, PathBuf::from("/tmp/out"));
}
