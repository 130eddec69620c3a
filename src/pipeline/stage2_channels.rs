use crate::codes::defs::{
    ENTERO, ENTERO_NPEV_CODE, SEROTYPE1, SEROTYPE2, SEROTYPE3, serotype_tables,
};
use crate::codes::{ChannelKind, CodeTable, is_mapped, lookup};
use crate::model::derived::ChannelLabels;
use crate::model::labels::{LABEL_SEPARATOR, NPEV};
use crate::model::record::{ReadingField, ReadingPair, SpecimenRecord};

/// Resolves the two readings of one channel into its composite label.
pub fn resolve_pair(first: Option<i64>, second: Option<i64>, table: &CodeTable) -> String {
    if let (Some(a), Some(b)) = (first, second)
        && a == b
    {
        return lookup(table, a).to_string();
    }

    if table.kind == ChannelKind::Entero
        && (first == Some(ENTERO_NPEV_CODE) || second == Some(ENTERO_NPEV_CODE))
    {
        return NPEV.to_string();
    }

    let first_label = first.map(|v| lookup(table, v)).unwrap_or("");
    let second_label = second.map(|v| lookup(table, v)).unwrap_or("");
    [first_label, second_label]
        .into_iter()
        .filter(|label| !label.is_empty())
        .collect::<Vec<_>>()
        .join(LABEL_SEPARATOR)
}

pub fn resolve_reading_pair(pair: &ReadingPair, table: &CodeTable) -> String {
    resolve_pair(pair.first, pair.second, table)
}

pub fn resolve_channels(record: &SpecimenRecord) -> ChannelLabels {
    let [t1, t2, t3] = serotype_tables();
    ChannelLabels {
        type1: resolve_reading_pair(&record.serotypes[0], t1),
        type2: resolve_reading_pair(&record.serotypes[1], t2),
        type3: resolve_reading_pair(&record.serotypes[2], t3),
        entero: resolve_reading_pair(&record.entero, &ENTERO),
    }
}

fn table_for(field: ReadingField) -> &'static CodeTable {
    match field {
        ReadingField::P11 | ReadingField::P12 => &SEROTYPE1,
        ReadingField::P21 | ReadingField::P22 => &SEROTYPE2,
        ReadingField::P31 | ReadingField::P32 => &SEROTYPE3,
        ReadingField::Entero1 | ReadingField::Entero2 => &ENTERO,
    }
}

/// Present readings whose code has no label, per reading column.
pub fn count_unmapped(records: &[SpecimenRecord]) -> Vec<(&'static str, usize)> {
    ReadingField::ALL
        .iter()
        .map(|field| {
            let table = table_for(*field);
            let count = records
                .iter()
                .filter_map(|r| r.reading(*field))
                .filter(|code| !is_mapped(table, *code))
                .count();
            (field.column_name(), count)
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_channels.rs"]
mod tests;
