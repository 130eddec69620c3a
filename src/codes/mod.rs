pub mod defs;

pub use defs::{ChannelKind, CodeTable};

/// Label for `code` in `table`; codes outside the table resolve to "".
pub fn lookup(table: &CodeTable, code: i64) -> &'static str {
    for (key, label) in table.entries {
        if *key == code {
            return label;
        }
    }
    ""
}

pub fn is_mapped(table: &CodeTable, code: i64) -> bool {
    table.entries.iter().any(|(key, _)| *key == code)
}

#[cfg(test)]
#[path = "../../tests/src_inline/codes/tests.rs"]
mod tests;
