use crate::report::SummaryData;

fn list_or_all(values: &[String]) -> String {
    if values.is_empty() {
        "all".to_string()
    } else {
        values.join(", ")
    }
}

pub fn render_report_text(data: &SummaryData) -> String {
    let mut out = String::new();

    out.push_str("AFPLAB Processing Report\n");
    out.push_str("========================\n\n");

    out.push_str("1. Input\n");
    for file in &data.input.files {
        out.push_str(&format!("{} ({} rows)\n", file.path, file.rows));
    }
    out.push_str(&format!(
        "Records: {}\nColumns: {}\nMissing IDCODE grouping: {}\n\n",
        data.input.records, data.input.columns, data.options.missing_id
    ));

    out.push_str("2. Filters\n");
    out.push_str(&format!(
        "Provinces: {}\nYears: {}\nRecords in view: {}\n\n",
        list_or_all(&data.filters.provinces),
        list_or_all(&data.filters.years),
        data.filters.records
    ));

    out.push_str("3. Totals\n");
    out.push_str(&format!(
        "Total WPV1 Cases: {}\nTotal Linelist Cases: {}\n\n",
        data.totals.wpv1_cases, data.totals.linelist_cases
    ));

    out.push_str("4. WPV1 cases by province\n");
    if data.wpv1_by_province.is_empty() {
        out.push_str("(none)\n");
    }
    for row in &data.wpv1_by_province {
        out.push_str(&format!("{}\t{}\n", row.province, row.wpv1_cases));
    }
    out.push('\n');

    out.push_str("5. Linelist by year and province\n");
    if data.linelist_by_year_province.is_empty() {
        out.push_str("(none)\n");
    }
    for row in &data.linelist_by_year_province {
        let year = if row.year.is_empty() { "-" } else { &row.year };
        out.push_str(&format!("{}\t{}\t{}\n", year, row.province, row.linelist_cases));
    }
    out.push('\n');

    out.push_str("6. Results\n");
    for row in &data.results {
        out.push_str(&format!("{}\t{}\n", row.label, row.records));
    }
    out.push('\n');

    out.push_str("7. Data quality\n");
    let coerced: usize = data.quality.non_numeric_readings.iter().map(|c| c.cells).sum();
    let unmapped: usize = data.quality.unmapped_codes.iter().map(|c| c.cells).sum();
    out.push_str(&format!(
        "Non-numeric readings treated as missing: {}\n",
        coerced
    ));
    out.push_str(&format!("Unmapped codes: {}\n", unmapped));
    out.push_str(&format!(
        "Records without IDCODE: {}\n",
        data.quality.records_without_idcode
    ));

    out
}
