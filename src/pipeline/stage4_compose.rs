use std::collections::HashSet;

use crate::model::derived::ChannelLabels;
use crate::model::labels::{
    LABEL_SEPARATOR, LabelSource, NOT_RECEIVED, NVI, POSITIVE_TOKENS, UNDER_PROCESS, VDPV_GENERIC,
    VDPV_VARIANTS,
};

fn contains_ci(text: &str, keyword: &str) -> bool {
    text.to_lowercase().contains(&keyword.to_lowercase())
}

/// Combines the four channel labels into the final classification label.
pub fn compose(type1: &str, type2: &str, type3: &str, entero: &str) -> String {
    let serotypes = [type1, type2, type3];

    if [type1, type2, type3, entero]
        .iter()
        .any(|label| contains_ci(label, NOT_RECEIVED))
    {
        return NOT_RECEIVED.to_string();
    }

    let mut tokens: Vec<String> = Vec::new();

    for (token, source) in POSITIVE_TOKENS {
        let label = match source {
            LabelSource::Serotype(idx) => serotypes[*idx],
            LabelSource::Entero => entero,
        };
        if contains_ci(label, token) {
            tokens.push(token.to_string());
        }
    }

    for (idx, label) in serotypes.iter().enumerate() {
        let n = idx + 1;
        let mut specific = false;
        for variant in VDPV_VARIANTS {
            if contains_ci(label, variant) {
                tokens.push(format!("{variant}{n}"));
                specific = true;
            }
        }
        if !specific && contains_ci(label, VDPV_GENERIC) {
            tokens.push(format!("{VDPV_GENERIC}{n}"));
        }
    }

    let tokens = dedup_preserving_order(tokens);

    if tokens.is_empty() {
        if contains_ci(entero, NVI) {
            return NVI.to_string();
        }
        return UNDER_PROCESS.to_string();
    }

    tokens.join(LABEL_SEPARATOR)
}

pub fn compose_labels(labels: &ChannelLabels) -> String {
    compose(&labels.type1, &labels.type2, &labels.type3, &labels.entero)
}

fn dedup_preserving_order(tokens: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    tokens
        .into_iter()
        .filter(|token| seen.insert(token.clone()))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_compose.rs"]
mod tests;
