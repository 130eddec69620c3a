use rayon::prelude::*;

use crate::input::SpecimenTable;
use crate::model::derived::{ChannelLabels, ClassifiedRecord};
use crate::model::record::SpecimenRecord;

pub mod stage1_normalize;
pub mod stage2_channels;
pub mod stage3_identity;
pub mod stage4_compose;
pub mod stage5_linelist;
pub mod stage6_report;

use stage1_normalize::{CoercionAudit, run_stage1};
use stage2_channels::{count_unmapped, resolve_channels};
use stage3_identity::{CaseKey, MissingIdPolicy, case_key, year};
use stage4_compose::compose_labels;
use stage5_linelist::{select_linelist, wpv1_indicator};

pub const DEFAULT_PARALLEL_THRESHOLD: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    pub missing_id: MissingIdPolicy,
    /// Batches at least this large classify records on the rayon pool; 0 disables.
    pub parallel_threshold: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            missing_id: MissingIdPolicy::Isolate,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

#[derive(Debug)]
pub struct BatchOutput {
    pub records: Vec<SpecimenRecord>,
    pub classified: Vec<ClassifiedRecord>,
    pub coercion: Vec<CoercionAudit>,
    pub unmapped: Vec<(&'static str, usize)>,
}

impl BatchOutput {
    pub fn wpv1_records(&self) -> usize {
        self.classified.iter().filter(|c| c.wpv1).count()
    }

    pub fn linelist_records(&self) -> usize {
        self.classified.iter().filter(|c| c.linelist).count()
    }
}

struct RecordClassification {
    case_key: CaseKey,
    year: String,
    labels: ChannelLabels,
    result: String,
    wpv1: bool,
}

fn classify_record(record: &SpecimenRecord, policy: MissingIdPolicy) -> RecordClassification {
    let labels = resolve_channels(record);
    let result = compose_labels(&labels);
    let wpv1 = wpv1_indicator(&result);
    RecordClassification {
        case_key: case_key(record.idcode.as_deref(), record.row, policy),
        year: year(record.idcode.as_deref()),
        labels,
        result,
        wpv1,
    }
}

/// Classifies records and selects the linelist. Output is index-aligned with `records`.
pub fn classify_records(
    records: &[SpecimenRecord],
    options: &PipelineOptions,
) -> Vec<ClassifiedRecord> {
    let policy = options.missing_id;
    let parallel = options.parallel_threshold > 0 && records.len() >= options.parallel_threshold;
    let per_record: Vec<RecordClassification> = if parallel {
        records
            .par_iter()
            .map(|r| classify_record(r, policy))
            .collect()
    } else {
        records.iter().map(|r| classify_record(r, policy)).collect()
    };

    let keys: Vec<CaseKey> = per_record.iter().map(|c| c.case_key.clone()).collect();
    let indicators: Vec<bool> = per_record.iter().map(|c| c.wpv1).collect();
    let linelist = select_linelist(&keys, &indicators);

    per_record
        .into_iter()
        .zip(linelist)
        .map(|(c, flag)| ClassifiedRecord {
            idcode2: c.case_key.as_column().to_string(),
            case_key: c.case_key,
            year: c.year,
            labels: c.labels,
            result: c.result,
            wpv1: c.wpv1,
            linelist: flag,
        })
        .collect()
}

pub fn run_batch(table: &SpecimenTable, options: &PipelineOptions) -> BatchOutput {
    let stage1 = run_stage1(table);
    let unmapped = count_unmapped(&stage1.records);
    for (column, count) in &unmapped {
        if *count > 0 {
            tracing::debug!(column, codes = count, "unmapped codes resolved to empty labels");
        }
    }

    let unidentified = stage1.records.iter().filter(|r| r.idcode.is_none()).count();
    if unidentified > 0 {
        tracing::warn!(
            records = unidentified,
            policy = ?options.missing_id,
            "records without IDCODE"
        );
    }

    let classified = classify_records(&stage1.records, options);

    let output = BatchOutput {
        records: stage1.records,
        classified,
        coercion: stage1.audits,
        unmapped,
    };
    tracing::info!(
        records = output.records.len(),
        wpv1 = output.wpv1_records(),
        linelist = output.linelist_records(),
        "classified batch"
    );
    output
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/batch.rs"]
mod tests;
