use serde_json::json;

use crate::report::SummaryData;

pub fn render_summary_json(data: &SummaryData) -> serde_json::Result<String> {
    serde_json::to_string_pretty(data)
}

pub fn render_pipeline_step_json(
    data: &SummaryData,
    artifacts: &[&str],
) -> serde_json::Result<String> {
    let step = json!({
        "tool": data.tool,
        "version": data.version,
        "mode": "pipeline",
        "artifacts": artifacts,
        "record_metrics": {
            "file": crate::pipeline::stage6_report::COMBINED_CSV,
            "result_column": "RESULT",
            "linelist_column": "Linelist",
        },
        "key_metrics": {
            "records": data.input.records,
            "wpv1_cases": data.totals.wpv1_cases,
            "linelist_cases": data.totals.linelist_cases,
        },
    });
    serde_json::to_string_pretty(&step)
}
