use std::path::Path;

use tracing::{info, instrument};

use crate::republica::tools::clean::clean_table;
use crate::republica::tools::dedup::{Summary, resolve_duplicates};
use crate::republica::tools::error::{Result, ToolError};
use crate::republica::tools::io::csv_read::{self, Encoding};
use crate::republica::tools::io::csv_write;
use crate::republica::tools::merge::{self, MergeReport};
use crate::republica::tools::model::REQUIRED_COLUMNS;

/// Output locations of the cleaning job.
#[derive(Debug, Clone, Copy)]
pub struct CleanOutputs<'a> {
    /// Duplicate-CODIGO report.
    pub duplicates: &'a Path,
    /// Deduplicated cleaned table.
    pub cleaned: &'a Path,
}

/// Merges the raw extracts in `input_dir` into a single UTF-8 CSV.
///
/// Nothing is written when no extract is usable.
#[instrument(
    level = "info",
    skip_all,
    fields(input_dir = %input_dir.display(), output = %output.display())
)]
pub fn merge_to_csv(input_dir: &Path, output: &Path) -> Result<MergeReport> {
    let report = merge::merge_directory(input_dir, &REQUIRED_COLUMNS)?;
    csv_write::write_table(output, &report.table)?;
    info!(rows = report.table.len(), "combined table written");
    Ok(report)
}

/// Cleans the combined CSV and writes the duplicates report and the
/// deduplicated table.
#[instrument(
    level = "info",
    skip_all,
    fields(
        input = %input.display(),
        duplicates = %outputs.duplicates.display(),
        cleaned = %outputs.cleaned.display()
    )
)]
pub fn clean_csv(input: &Path, outputs: CleanOutputs<'_>) -> Result<Summary> {
    if !input.is_file() {
        return Err(ToolError::MissingInput(input.to_path_buf()));
    }

    let table = csv_read::read_table(input, Encoding::Utf8)?;
    info!(rows = table.len(), "read combined table");
    let cleaned = clean_table(table)?;
    let resolution = resolve_duplicates(&cleaned)?;

    csv_write::write_table(outputs.duplicates, &resolution.duplicates)?;
    csv_write::write_table(outputs.cleaned, &resolution.deduplicated)?;
    Ok(resolution.summary)
}

/// Runs the merge job followed by the cleaning job.
#[instrument(level = "info", skip_all, fields(input_dir = %input_dir.display()))]
pub fn run(
    input_dir: &Path,
    merged: &Path,
    outputs: CleanOutputs<'_>,
) -> Result<(MergeReport, Summary)> {
    let report = merge_to_csv(input_dir, merged)?;
    let summary = clean_csv(merged, outputs)?;
    Ok((report, summary))
}
