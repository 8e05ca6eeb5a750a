use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::republica::tools::error::Result;
use crate::republica::tools::model::{Table, Value};

/// Primary key of the registry.
pub const KEY_COLUMN: &str = "CODIGO";

/// Counters reported at the end of a cleaning run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Rows in the cleaned table.
    pub filas_totales: usize,
    /// Distinct non-missing CODIGO values.
    pub codigos_unicos: usize,
    /// Rows in the duplicates report, every copy included.
    pub filas_duplicadas: usize,
    /// Distinct non-missing MUNICIPIO values.
    pub municipios: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "RESUMEN")?;
        writeln!(f, "filas_totales: {}", self.filas_totales)?;
        writeln!(f, "codigos_unicos: {}", self.codigos_unicos)?;
        writeln!(f, "filas_duplicadas: {}", self.filas_duplicadas)?;
        write!(f, "municipios: {}", self.municipios)
    }
}

/// The cleaned table split on its primary key.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Every row whose CODIGO occurs more than once, sorted by CODIGO.
    pub duplicates: Table,
    /// First occurrence of each CODIGO, in original order.
    pub deduplicated: Table,
    pub summary: Summary,
}

/// Splits the cleaned table into the duplicates report and the
/// deduplicated table, and computes the run summary.
pub fn resolve_duplicates(table: &Table) -> Result<Resolution> {
    let duplicates = find_duplicates(table)?;
    let deduplicated = drop_duplicates(table)?;
    let summary = Summary {
        filas_totales: table.len(),
        codigos_unicos: count_distinct(table, KEY_COLUMN)?,
        filas_duplicadas: duplicates.len(),
        municipios: count_distinct(table, "MUNICIPIO")?,
    };
    info!(
        rows = summary.filas_totales,
        duplicated = summary.filas_duplicadas,
        kept = deduplicated.len(),
        "resolved duplicate codes"
    );
    Ok(Resolution {
        duplicates,
        deduplicated,
        summary,
    })
}

/// Rows whose key appears more than once, stably sorted by key with missing
/// keys last. Missing keys compare equal to each other.
pub fn find_duplicates(table: &Table) -> Result<Table> {
    let key = table.require_column(KEY_COLUMN)?;

    let mut occurrences: HashMap<&Value, usize> = HashMap::new();
    for row in &table.rows {
        *occurrences.entry(&row[key]).or_default() += 1;
    }

    let mut duplicates =
        table.filter_rows(|_, row| occurrences.get(&row[key]).is_some_and(|&count| count > 1));
    duplicates
        .rows
        .sort_by(|lhs, rhs| compare_keys(&lhs[key], &rhs[key]));
    Ok(duplicates)
}

/// Keeps the first row of every key, preserving the original order.
pub fn drop_duplicates(table: &Table) -> Result<Table> {
    let key = table.require_column(KEY_COLUMN)?;
    let mut seen: HashSet<&Value> = HashSet::new();
    let kept: Vec<usize> = table
        .rows
        .iter()
        .enumerate()
        .filter(|&(_, row)| seen.insert(&row[key]))
        .map(|(idx, _)| idx)
        .collect();
    Ok(table.filter_rows(|idx, _| kept.binary_search(&idx).is_ok()))
}

fn count_distinct(table: &Table, column: &str) -> Result<usize> {
    let distinct: HashSet<&Value> = table
        .column_values(column)?
        .filter(|value| !value.is_null())
        .collect();
    Ok(distinct.len())
}

fn compare_keys(lhs: &Value, rhs: &Value) -> Ordering {
    match (lhs.is_null(), rhs.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => lhs.to_cell().cmp(&rhs.to_cell()),
    }
}
