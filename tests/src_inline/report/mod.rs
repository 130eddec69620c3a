use std::path::PathBuf;

use super::json::render_summary_json;
use super::text::render_report_text;
use super::*;
use crate::input::reader::CsvTable;
use crate::pipeline::run_batch;

const HEADERS: &[&str] = &[
    "IDCODE", "P11", "P12", "P21", "P22", "P31", "P32", "ENTERO1", "ENTERO2", "PROVINCE",
];

fn fixture() -> SpecimenTable {
    let rows: &[&[&str]] = &[
        &["AFG/KDH/21/0001-1", "1", "1", "7", "7", "7", "7", "7", "7", "Kandahar"],
        &["AFG/KDH/21/0001-2", "1", "1", "7", "7", "7", "7", "7", "7", "Kandahar"],
        &["AFG/HLM/22/0004-1", "3", "3", "7", "7", "7", "7", "1", "1", "Helmand"],
        &["AFG/HLM/22/0005-1", "7", "7", "7", "7", "7", "7", "7", "7", "Helmand"],
        &["AFG/KDH/22/0009-1", "7", "7", "9", "9", "7", "7", "7", "7", "Kandahar"],
        &["AFG/XXX/22/0010-1", "1", "1", "7", "7", "7", "7", "7", "7", ""],
    ];
    SpecimenTable::from_sources(vec![CsvTable {
        path: PathBuf::from("lab.csv"),
        headers: HEADERS.iter().map(|h| h.to_string()).collect(),
        rows: rows
            .iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect(),
    }])
    .unwrap()
}

#[test]
fn test_filters_empty_selection_means_all() {
    let f = Filters::default();
    assert!(f.matches("Kandahar", "2021"));
    let f = Filters {
        provinces: vec!["Helmand".to_string()],
        years: vec![],
    };
    assert!(f.matches("Helmand", "2019"));
    assert!(!f.matches("Kandahar", "2019"));
    let f = Filters {
        provinces: vec![],
        years: vec!["2022".to_string()],
    };
    assert!(!f.matches("Helmand", "2021"));
}

#[test]
fn test_summary_totals_and_groupings() {
    let table = fixture();
    let options = PipelineOptions::default();
    let batch = run_batch(&table, &options);
    let summary = build_summary(&table, &batch, &Filters::default(), &options);

    assert_eq!(summary.input.records, 6);
    assert_eq!(summary.available_provinces, vec!["Kandahar", "Helmand", ""]);
    assert_eq!(summary.available_years, vec!["2021", "2022"]);
    assert_eq!(summary.filters.records, 6);
    assert_eq!(summary.totals.wpv1_cases, 4);
    assert_eq!(summary.totals.linelist_cases, 3);

    assert_eq!(
        summary.wpv1_by_province,
        vec![
            ProvinceCount {
                province: "Helmand".to_string(),
                wpv1_cases: 1,
            },
            ProvinceCount {
                province: "Kandahar".to_string(),
                wpv1_cases: 2,
            },
        ]
    );
    assert_eq!(
        summary.linelist_by_year_province,
        vec![
            YearProvinceCount {
                year: "2021".to_string(),
                province: "Kandahar".to_string(),
                linelist_cases: 1,
            },
            YearProvinceCount {
                year: "2022".to_string(),
                province: "Helmand".to_string(),
                linelist_cases: 1,
            },
            YearProvinceCount {
                year: "2022".to_string(),
                province: "Kandahar".to_string(),
                linelist_cases: 0,
            },
        ]
    );
    let not_received = summary
        .results
        .iter()
        .find(|r| r.label == "Not received in Lab")
        .unwrap();
    assert_eq!(not_received.records, 1);
}

#[test]
fn test_summary_respects_filters() {
    let table = fixture();
    let options = PipelineOptions::default();
    let batch = run_batch(&table, &options);
    let filters = Filters {
        provinces: vec!["Kandahar".to_string()],
        years: vec!["2021".to_string()],
    };
    let summary = build_summary(&table, &batch, &filters, &options);
    assert_eq!(summary.filters.records, 2);
    assert_eq!(summary.totals.wpv1_cases, 2);
    assert_eq!(summary.totals.linelist_cases, 1);
    assert_eq!(summary.wpv1_by_province.len(), 1);
    assert_eq!(summary.available_provinces.len(), 3);
}

#[test]
fn test_summary_renders() {
    let table = fixture();
    let options = PipelineOptions::default();
    let batch = run_batch(&table, &options);
    let summary = build_summary(&table, &batch, &Filters::default(), &options);

    let json = render_summary_json(&summary).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["tool"], "afplab-linelist");
    assert_eq!(value["totals"]["wpv1_cases"], 4);
    assert_eq!(value["options"]["missing_id"], "isolate");
    assert_eq!(value["input"]["files"][0]["rows"], 6);

    let text = render_report_text(&summary);
    assert!(text.contains("Total WPV1 Cases: 4"));
    assert!(text.contains("Total Linelist Cases: 3"));
    assert!(text.contains("Kandahar\t2"));
}
