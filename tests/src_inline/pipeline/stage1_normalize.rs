use std::path::PathBuf;

use super::*;
use crate::input::reader::CsvTable;

fn table(rows: &[&[&str]]) -> SpecimenTable {
    let headers = [
        "IDCODE", "P11", "P12", "P21", "P22", "P31", "P32", "ENTERO1", "ENTERO2", "PROVINCE",
    ];
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

#[test]
fn test_readings_are_coerced_per_field() {
    let t = table(&[&["AFG/KDH/21/0001-1", "1", "2.0", "", "x", "7", "7", "1", "4", "Kandahar"]]);
    let out = run_stage1(&t);
    let r = &out.records[0];
    assert_eq!(r.row, 0);
    assert_eq!(r.idcode.as_deref(), Some("AFG/KDH/21/0001-1"));
    assert_eq!(r.reading(ReadingField::P11), Some(1));
    assert_eq!(r.reading(ReadingField::P12), Some(2));
    assert_eq!(r.reading(ReadingField::P21), None);
    assert_eq!(r.reading(ReadingField::P22), None);
    assert_eq!(r.reading(ReadingField::P31), Some(7));
    assert_eq!(r.reading(ReadingField::Entero1), Some(1));
    assert_eq!(r.reading(ReadingField::Entero2), Some(4));
    assert_eq!(r.province, "Kandahar");
}

#[test]
fn test_audit_counts_only_non_blank_failures() {
    let t = table(&[
        &["A-1", "abc", "", "", "", "", "", "", "", "P"],
        &["B-1", "1.5", "", "", "", "", "", "", "n/a", "P"],
        &["C-1", "NA", "null", "", "", "", "", "", "?", "P"],
    ]);
    let out = run_stage1(&t);
    let p11 = out.audits.iter().find(|a| a.column == "P11").unwrap();
    assert_eq!(p11.coerced_to_missing, 2);
    let p12 = out.audits.iter().find(|a| a.column == "P12").unwrap();
    assert_eq!(p12.coerced_to_missing, 0);
    let e2 = out.audits.iter().find(|a| a.column == "ENTERO2").unwrap();
    assert_eq!(e2.coerced_to_missing, 1);
    assert_eq!(out.records[1].reading(ReadingField::Entero2), None);
    assert_eq!(out.records[2].reading(ReadingField::P11), None);
    assert_eq!(out.audits.len(), 8);
}

#[test]
fn test_blank_or_na_idcode_is_missing() {
    let t = table(&[
        &["", "1", "1", "", "", "", "", "", "", "P"],
        &["nan", "1", "1", "", "", "", "", "", "", "P"],
        &["X-2", "1", "1", "", "", "", "", "", "", "P"],
        &["  ", "1", "1", "", "", "", "", "", "", "P"],
    ]);
    let out = run_stage1(&t);
    assert_eq!(out.records[0].idcode, None);
    assert_eq!(out.records[1].idcode, None);
    assert_eq!(out.records[2].idcode.as_deref(), Some("X-2"));
    assert_eq!(out.records[2].row, 2);
    // whitespace is a value, not an NA spelling
    assert_eq!(out.records[3].idcode.as_deref(), Some("  "));
}
