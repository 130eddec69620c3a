/// Placeholder key the legacy grouping assigns to every record without an IDCODE.
pub const LEGACY_MISSING_KEY: &str = "nan";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingIdPolicy {
    /// Every record without an IDCODE is its own case.
    #[default]
    Isolate,
    /// All records without an IDCODE share the case key "nan".
    Legacy,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CaseKey {
    Id(String),
    /// Record without an IDCODE, keyed by its batch position.
    Unidentified(usize),
}

impl CaseKey {
    /// Value written to the IDCODE2 column.
    pub fn as_column(&self) -> &str {
        match self {
            CaseKey::Id(key) => key,
            CaseKey::Unidentified(_) => "",
        }
    }
}

pub fn case_key_text(idcode: &str) -> &str {
    match idcode.split_once('-') {
        Some((head, _)) => head,
        None => idcode,
    }
}

pub fn case_key(idcode: Option<&str>, row: usize, policy: MissingIdPolicy) -> CaseKey {
    match (idcode, policy) {
        (Some(id), _) => CaseKey::Id(case_key_text(id).to_string()),
        (None, MissingIdPolicy::Isolate) => CaseKey::Unidentified(row),
        (None, MissingIdPolicy::Legacy) => CaseKey::Id(LEGACY_MISSING_KEY.to_string()),
    }
}

/// Reporting year: "20" followed by the third "/"-separated segment.
pub fn year(idcode: Option<&str>) -> String {
    let Some(id) = idcode else {
        return String::new();
    };
    match id.split('/').nth(2) {
        Some(segment) => format!("20{segment}"),
        None => String::new(),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_identity.rs"]
mod tests;
