use std::collections::BTreeMap;

use serde::Serialize;

use crate::input::SpecimenTable;
use crate::input::schema::is_na_token;
use crate::pipeline::stage3_identity::MissingIdPolicy;
use crate::pipeline::{BatchOutput, PipelineOptions};

pub mod json;
pub mod text;

/// Province/year selection for the dashboard summary. Empty means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub provinces: Vec<String>,
    pub years: Vec<String>,
}

impl Filters {
    pub fn matches(&self, province: &str, year: &str) -> bool {
        (self.provinces.is_empty() || self.provinces.iter().any(|p| p == province))
            && (self.years.is_empty() || self.years.iter().any(|y| y == year))
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SourceSummary {
    pub path: String,
    pub rows: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct InputSummary {
    pub files: Vec<SourceSummary>,
    pub records: usize,
    pub columns: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OptionsSummary {
    pub missing_id: &'static str,
    pub parallel_threshold: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FilterSummary {
    pub provinces: Vec<String>,
    pub years: Vec<String>,
    pub records: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Totals {
    pub wpv1_cases: usize,
    pub linelist_cases: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProvinceCount {
    pub province: String,
    pub wpv1_cases: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct YearProvinceCount {
    pub year: String,
    pub province: String,
    pub linelist_cases: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LabelCount {
    pub label: String,
    pub records: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ColumnCount {
    pub column: &'static str,
    pub cells: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct QualitySummary {
    pub non_numeric_readings: Vec<ColumnCount>,
    pub unmapped_codes: Vec<ColumnCount>,
    pub records_without_idcode: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SummaryData {
    pub tool: String,
    pub version: String,
    pub input: InputSummary,
    pub options: OptionsSummary,
    pub available_provinces: Vec<String>,
    pub available_years: Vec<String>,
    pub filters: FilterSummary,
    pub totals: Totals,
    pub wpv1_by_province: Vec<ProvinceCount>,
    pub linelist_by_year_province: Vec<YearProvinceCount>,
    pub results: Vec<LabelCount>,
    pub quality: QualitySummary,
}

pub fn missing_id_name(policy: MissingIdPolicy) -> &'static str {
    match policy {
        MissingIdPolicy::Isolate => "isolate",
        MissingIdPolicy::Legacy => "legacy",
    }
}

fn unique_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for v in values {
        if !out.iter().any(|o| o == v) {
            out.push(v.to_string());
        }
    }
    out
}

/// Dashboard aggregates over the filtered records. Reads the derived
/// columns as-is; nothing is re-classified here.
pub fn build_summary(
    table: &SpecimenTable,
    batch: &BatchOutput,
    filters: &Filters,
    options: &PipelineOptions,
) -> SummaryData {
    let available_provinces = unique_in_order(batch.records.iter().map(|r| r.province.as_str()));
    let available_years = unique_in_order(batch.classified.iter().map(|c| c.year.as_str()));

    let mut filtered = 0usize;
    let mut totals = Totals {
        wpv1_cases: 0,
        linelist_cases: 0,
    };
    let mut by_province: BTreeMap<&str, usize> = BTreeMap::new();
    let mut by_year_province: BTreeMap<(&str, &str), usize> = BTreeMap::new();
    let mut by_result: BTreeMap<&str, usize> = BTreeMap::new();

    for (record, classified) in batch.records.iter().zip(&batch.classified) {
        if !filters.matches(&record.province, &classified.year) {
            continue;
        }
        filtered += 1;
        totals.wpv1_cases += usize::from(classified.wpv1_count());
        totals.linelist_cases += usize::from(classified.linelist_flag());
        *by_result.entry(classified.result.as_str()).or_insert(0) += 1;

        // blank provinces have no group
        if is_na_token(&record.province) {
            continue;
        }
        *by_province.entry(record.province.as_str()).or_insert(0) +=
            usize::from(classified.wpv1_count());
        *by_year_province
            .entry((classified.year.as_str(), record.province.as_str()))
            .or_insert(0) += usize::from(classified.linelist_flag());
    }

    let column_counts = |counts: &[(&'static str, usize)]| {
        counts
            .iter()
            .map(|&(column, cells)| ColumnCount { column, cells })
            .collect::<Vec<_>>()
    };
    let coerced = batch
        .coercion
        .iter()
        .map(|a| (a.column, a.coerced_to_missing))
        .collect::<Vec<_>>();

    SummaryData {
        tool: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        input: InputSummary {
            files: table
                .sources
                .iter()
                .map(|s| SourceSummary {
                    path: s.path.display().to_string(),
                    rows: s.n_rows,
                })
                .collect(),
            records: table.n_rows(),
            columns: table.headers.len(),
        },
        options: OptionsSummary {
            missing_id: missing_id_name(options.missing_id),
            parallel_threshold: options.parallel_threshold,
        },
        available_provinces,
        available_years,
        filters: FilterSummary {
            provinces: filters.provinces.clone(),
            years: filters.years.clone(),
            records: filtered,
        },
        totals,
        wpv1_by_province: by_province
            .into_iter()
            .map(|(province, wpv1_cases)| ProvinceCount {
                province: province.to_string(),
                wpv1_cases,
            })
            .collect(),
        linelist_by_year_province: by_year_province
            .into_iter()
            .map(|((year, province), linelist_cases)| YearProvinceCount {
                year: year.to_string(),
                province: province.to_string(),
                linelist_cases,
            })
            .collect(),
        results: by_result
            .into_iter()
            .map(|(label, records)| LabelCount {
                label: label.to_string(),
                records,
            })
            .collect(),
        quality: QualitySummary {
            non_numeric_readings: column_counts(&coerced),
            unmapped_codes: column_counts(&batch.unmapped),
            records_without_idcode: batch.records.iter().filter(|r| r.idcode.is_none()).count(),
        },
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
