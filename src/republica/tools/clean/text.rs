use once_cell::sync::Lazy;
use regex::Regex;

use crate::republica::tools::model::Value;

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Trims, collapses whitespace runs to one space, uppercases, and folds the
/// Spanish accented vowels and `Ñ` onto plain ASCII letters.
pub fn normalize_text(raw: &str) -> String {
    let collapsed = WHITESPACE_RUN.replace_all(raw.trim(), " ");
    collapsed.to_uppercase().chars().map(fold_accent).collect()
}

/// Applies [`normalize_text`] to a cell. Missing values stay missing.
pub fn normalize_value(value: &Value) -> Value {
    match value {
        Value::Null => Value::Null,
        Value::Text(text) => Value::Text(normalize_text(text)),
        other => Value::Text(normalize_text(&other.to_cell())),
    }
}

fn fold_accent(ch: char) -> char {
    match ch {
        'Á' => 'A',
        'É' => 'E',
        'Í' => 'I',
        'Ó' => 'O',
        'Ú' | 'Ü' => 'U',
        'Ñ' => 'N',
        other => other,
    }
}
