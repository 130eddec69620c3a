use crate::input::InputError;
use crate::model::record::ReadingField;

pub const IDCODE: &str = "IDCODE";
pub const PROVINCE: &str = "PROVINCE";

pub const REQUIRED_COLUMNS: &[&str] = &[
    "IDCODE", "P11", "P12", "P21", "P22", "P31", "P32", "ENTERO1", "ENTERO2", "PROVINCE",
];

/// Cell spellings read as "no value" in text columns.
const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredColumns {
    pub idcode: usize,
    pub province: usize,
    /// Indexed in `ReadingField::ALL` order.
    pub readings: [usize; 8],
}

impl RequiredColumns {
    pub fn reading(&self, field: ReadingField) -> usize {
        let pos = ReadingField::ALL
            .iter()
            .position(|f| *f == field)
            .unwrap_or(0);
        self.readings[pos]
    }
}

pub fn missing_columns(headers: &[String]) -> Vec<String> {
    REQUIRED_COLUMNS
        .iter()
        .filter(|&&name| !headers.iter().any(|h| h == name))
        .map(|name| name.to_string())
        .collect()
}

pub fn resolve_required(headers: &[String]) -> Result<RequiredColumns, InputError> {
    let missing = missing_columns(headers);
    if !missing.is_empty() {
        return Err(InputError::MissingColumns { missing });
    }
    let index_of = |name: &str| headers.iter().position(|h| h == name).unwrap_or(0);
    let mut readings = [0usize; 8];
    for (slot, field) in readings.iter_mut().zip(ReadingField::ALL) {
        *slot = index_of(field.column_name());
    }
    Ok(RequiredColumns {
        idcode: index_of(IDCODE),
        province: index_of(PROVINCE),
        readings,
    })
}

pub fn is_na_token(value: &str) -> bool {
    NA_TOKENS.contains(&value)
}

/// Coerces a reading cell to an integer code.
///
/// Integer text and finite floats without a fractional part are accepted;
/// everything else (blank, text, `1.5`, `NaN`) is a missing reading.
pub fn coerce_reading(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(v) = trimmed.parse::<i64>() {
        return Some(v);
    }
    let v = trimmed.parse::<f64>().ok()?;
    if !v.is_finite() || v.fract() != 0.0 || v.abs() > i64::MAX as f64 {
        return None;
    }
    Some(v as i64)
}
