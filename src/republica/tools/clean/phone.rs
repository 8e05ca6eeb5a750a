use once_cell::sync::Lazy;
use regex::Regex;

use crate::republica::tools::model::Value;

static NON_DIGIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9]").expect("valid non-digit pattern"));
static VALID_PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{8,12}$").expect("valid phone pattern"));

/// Keeps only the ASCII digits of a phone cell. A missing phone has no digits.
pub fn clean_phone(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        other => NON_DIGIT.replace_all(&other.to_cell(), "").into_owned(),
    }
}

/// True when the cleaned phone is not 8 to 12 digits long.
pub fn phone_flag(cleaned: &str) -> bool {
    !VALID_PHONE.is_match(cleaned)
}
