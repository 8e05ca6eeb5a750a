use std::collections::BTreeSet;

use crate::republica::tools::model::Value;

/// Separator between shifts in a JORNADA value ("MATUTINA Y VESPERTINA").
pub const SHIFT_SEPARATOR: &str = " Y ";
/// Prefix of every generated indicator column.
pub const INDICATOR_PREFIX: &str = "JORNADA_";

/// Splits a JORNADA cell into its uppercased shift tokens, dropping empty ones.
pub fn shift_tokens(value: &Value) -> BTreeSet<String> {
    match value {
        Value::Null => BTreeSet::new(),
        other => other
            .to_cell()
            .to_uppercase()
            .split(SHIFT_SEPARATOR)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect(),
    }
}

/// Builds one `JORNADA_<token>` column per distinct token seen in `values`,
/// in ascending token order. Each cell is `1` when the row lists the token
/// and `0` otherwise.
pub fn indicator_columns<'a, I>(values: I) -> Vec<(String, Vec<Value>)>
where
    I: IntoIterator<Item = &'a Value>,
{
    let per_row: Vec<BTreeSet<String>> = values.into_iter().map(shift_tokens).collect();
    let vocabulary: BTreeSet<&String> = per_row.iter().flatten().collect();

    vocabulary
        .into_iter()
        .map(|token| {
            let cells = per_row
                .iter()
                .map(|tokens| Value::Int(i64::from(tokens.contains(token))))
                .collect();
            (format!("{INDICATOR_PREFIX}{token}"), cells)
        })
        .collect()
}
