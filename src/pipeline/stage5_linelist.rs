use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::pipeline::stage3_identity::CaseKey;

static WPV1_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bWPV1\b").expect("invalid WPV1 regex"));

/// Whole-word "WPV1" in a classification label.
pub fn wpv1_indicator(result: &str) -> bool {
    WPV1_WORD.is_match(result)
}

/// Flags the first WPV1 record of every case, in batch order.
///
/// Must run sequentially over the complete batch: which record is "first"
/// depends on the order of the input files and of the rows within them.
pub fn select_linelist(case_keys: &[CaseKey], indicators: &[bool]) -> Vec<bool> {
    let mut flags = vec![false; case_keys.len()];
    let mut taken: HashSet<&CaseKey> = HashSet::new();
    for (idx, (key, &wpv1)) in case_keys.iter().zip(indicators).enumerate() {
        if wpv1 && taken.insert(key) {
            flags[idx] = true;
        }
    }
    flags
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_linelist.rs"]
mod tests;
