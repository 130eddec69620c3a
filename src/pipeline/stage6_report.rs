use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::input::SpecimenTable;
use crate::model::derived::ClassifiedRecord;
use crate::model::record::{ReadingField, SpecimenRecord};
use crate::pipeline::BatchOutput;
use crate::report::SummaryData;
use crate::report::json::{render_pipeline_step_json, render_summary_json};
use crate::report::text::render_report_text;

pub const COMBINED_CSV: &str = "afplab_combined.csv";
pub const SUMMARY_JSON: &str = "summary.json";
pub const REPORT_TXT: &str = "report.txt";
pub const PIPELINE_STEP_JSON: &str = "pipeline_step.json";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Standalone,
    Pipeline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivedColumn {
    IdCode2,
    Year,
    Type1,
    Type2,
    Type3,
    Entero,
    Result,
    Wpv1Count,
    Linelist,
}

impl DerivedColumn {
    pub const ALL: [DerivedColumn; 9] = [
        DerivedColumn::IdCode2,
        DerivedColumn::Year,
        DerivedColumn::Type1,
        DerivedColumn::Type2,
        DerivedColumn::Type3,
        DerivedColumn::Entero,
        DerivedColumn::Result,
        DerivedColumn::Wpv1Count,
        DerivedColumn::Linelist,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DerivedColumn::IdCode2 => "IDCODE2",
            DerivedColumn::Year => "Year",
            DerivedColumn::Type1 => "type1",
            DerivedColumn::Type2 => "type2",
            DerivedColumn::Type3 => "type3",
            DerivedColumn::Entero => "ENTERO",
            DerivedColumn::Result => "RESULT",
            DerivedColumn::Wpv1Count => "WPV1count",
            DerivedColumn::Linelist => "Linelist",
        }
    }

    fn value(self, c: &ClassifiedRecord) -> String {
        match self {
            DerivedColumn::IdCode2 => c.idcode2.clone(),
            DerivedColumn::Year => c.year.clone(),
            DerivedColumn::Type1 => c.labels.type1.clone(),
            DerivedColumn::Type2 => c.labels.type2.clone(),
            DerivedColumn::Type3 => c.labels.type3.clone(),
            DerivedColumn::Entero => c.labels.entero.clone(),
            DerivedColumn::Result => c.result.clone(),
            DerivedColumn::Wpv1Count => c.wpv1_count().to_string(),
            DerivedColumn::Linelist => c.linelist_flag().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputColumn {
    Original(usize),
    Reading(ReadingField),
    Derived(DerivedColumn),
}

/// Original columns, then derived columns. A derived column that already
/// exists in the input takes over that position.
pub fn output_layout(headers: &[String]) -> Vec<OutputColumn> {
    let mut layout = Vec::with_capacity(headers.len() + DerivedColumn::ALL.len());
    for (idx, name) in headers.iter().enumerate() {
        if let Some(derived) = DerivedColumn::ALL.iter().find(|d| d.name() == name.as_str()) {
            layout.push(OutputColumn::Derived(*derived));
        } else if let Some(field) = ReadingField::ALL
            .iter()
            .find(|f| f.column_name() == name.as_str())
        {
            layout.push(OutputColumn::Reading(*field));
        } else {
            layout.push(OutputColumn::Original(idx));
        }
    }
    for derived in DerivedColumn::ALL {
        if !layout.contains(&OutputColumn::Derived(derived)) {
            layout.push(OutputColumn::Derived(derived));
        }
    }
    layout
}

fn column_name(table: &SpecimenTable, column: OutputColumn) -> &str {
    match column {
        OutputColumn::Original(idx) => &table.headers[idx],
        OutputColumn::Reading(field) => field.column_name(),
        OutputColumn::Derived(derived) => derived.name(),
    }
}

fn cell_value(
    row: &[String],
    record: &SpecimenRecord,
    classified: &ClassifiedRecord,
    column: OutputColumn,
) -> String {
    match column {
        OutputColumn::Original(idx) => row[idx].clone(),
        OutputColumn::Reading(field) => record
            .reading(field)
            .map(|v| v.to_string())
            .unwrap_or_default(),
        OutputColumn::Derived(derived) => derived.value(classified),
    }
}

pub fn write_combined_csv<W: Write>(
    table: &SpecimenTable,
    batch: &BatchOutput,
    writer: W,
) -> csv::Result<()> {
    let layout = output_layout(&table.headers);
    let mut w = csv::Writer::from_writer(writer);
    w.write_record(layout.iter().map(|c| column_name(table, *c)))?;
    for ((row, record), classified) in table.rows.iter().zip(&batch.records).zip(&batch.classified)
    {
        w.write_record(
            layout
                .iter()
                .map(|c| cell_value(row, record, classified, *c)),
        )?;
    }
    w.flush()?;
    Ok(())
}

fn write_text(path: &Path, contents: &str) -> Result<(), ReportError> {
    let io_err = |source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut w = BufWriter::new(File::create(path).map_err(io_err)?);
    w.write_all(contents.as_bytes()).map_err(io_err)?;
    w.flush().map_err(io_err)?;
    Ok(())
}

pub fn resolve_output_dir(base: &Path, run_mode: RunMode) -> PathBuf {
    match run_mode {
        RunMode::Standalone => base.to_path_buf(),
        RunMode::Pipeline => base.join(env!("CARGO_PKG_NAME")),
    }
}

#[derive(Debug)]
pub struct Stage6Input<'a> {
    pub table: &'a SpecimenTable,
    pub batch: &'a BatchOutput,
    pub summary: &'a SummaryData,
    pub run_mode: RunMode,
}

/// Writes the combined table and the summary artifacts; returns the written paths.
pub fn write_reports(
    input: &Stage6Input<'_>,
    out_dir: &Path,
) -> Result<Vec<PathBuf>, ReportError> {
    fs::create_dir_all(out_dir).map_err(|source| ReportError::Io {
        path: out_dir.to_path_buf(),
        source,
    })?;
    let mut written = Vec::new();

    let csv_path = out_dir.join(COMBINED_CSV);
    let file = File::create(&csv_path).map_err(|source| ReportError::Io {
        path: csv_path.clone(),
        source,
    })?;
    write_combined_csv(input.table, input.batch, BufWriter::new(file)).map_err(|source| {
        ReportError::Csv {
            path: csv_path.clone(),
            source,
        }
    })?;
    written.push(csv_path);

    let summary_path = out_dir.join(SUMMARY_JSON);
    write_text(&summary_path, &render_summary_json(input.summary)?)?;
    written.push(summary_path);

    let report_path = out_dir.join(REPORT_TXT);
    write_text(&report_path, &render_report_text(input.summary))?;
    written.push(report_path);

    if input.run_mode == RunMode::Pipeline {
        let step_path = out_dir.join(PIPELINE_STEP_JSON);
        let json =
            render_pipeline_step_json(input.summary, &[COMBINED_CSV, SUMMARY_JSON, REPORT_TXT])?;
        write_text(&step_path, &json)?;
        written.push(step_path);
    }

    for path in &written {
        tracing::info!(path = %path.display(), "wrote output");
    }
    Ok(written)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage6_report.rs"]
mod tests;
