use crate::input::SpecimenTable;
use crate::input::schema::{coerce_reading, is_na_token};
use crate::model::record::{ReadingField, ReadingPair, SpecimenRecord};

/// Cells that held text but could not be read as a code, per reading column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoercionAudit {
    pub column: &'static str,
    pub coerced_to_missing: usize,
}

#[derive(Debug)]
pub struct Stage1Output {
    pub records: Vec<SpecimenRecord>,
    pub audits: Vec<CoercionAudit>,
}

pub fn run_stage1(table: &SpecimenTable) -> Stage1Output {
    let mut records = Vec::with_capacity(table.n_rows());
    let mut failures = [0usize; 8];

    for (row_idx, row) in table.rows.iter().enumerate() {
        let idcode_cell = &row[table.columns.idcode];
        let idcode = if is_na_token(idcode_cell) {
            None
        } else {
            Some(idcode_cell.clone())
        };

        let mut values = [None; 8];
        for (slot, field) in ReadingField::ALL.iter().enumerate() {
            let cell = &row[table.columns.reading(*field)];
            values[slot] = coerce_reading(cell);
            // NA spellings are ordinary missing values, not failed parses
            if values[slot].is_none() && !cell.trim().is_empty() && !is_na_token(cell) {
                failures[slot] += 1;
            }
        }

        records.push(SpecimenRecord {
            row: row_idx,
            idcode,
            serotypes: [
                ReadingPair::new(values[0], values[1]),
                ReadingPair::new(values[2], values[3]),
                ReadingPair::new(values[4], values[5]),
            ],
            entero: ReadingPair::new(values[6], values[7]),
            province: row[table.columns.province].clone(),
        });
    }

    let audits = ReadingField::ALL
        .iter()
        .zip(failures)
        .map(|(field, count)| CoercionAudit {
            column: field.column_name(),
            coerced_to_missing: count,
        })
        .collect::<Vec<_>>();

    for audit in &audits {
        if audit.coerced_to_missing > 0 {
            tracing::warn!(
                column = audit.column,
                cells = audit.coerced_to_missing,
                "non-numeric readings treated as missing"
            );
        }
    }

    Stage1Output { records, audits }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_normalize.rs"]
mod tests;
