use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::republica::tools::error::{Result, ToolError};
use crate::republica::tools::io::csv_read::{self, Encoding};
use crate::republica::tools::model::Table;

/// Extension a directory entry must carry to be considered for merging.
pub const CSV_EXTENSION: &str = ".csv";

/// Why an input file was left out of the combined table.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// The file parsed but lacks some of the required columns.
    MissingColumns(Vec<String>),
    /// The file could not be read or parsed.
    Unreadable(String),
}

/// A file that did not make it into the combined table.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// Outcome of merging a directory of extracts.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeReport {
    /// Rows of every accepted file, in file then row order.
    pub table: Table,
    pub accepted: Vec<PathBuf>,
    pub skipped: Vec<SkippedFile>,
}

/// Merges every `.csv` file in `dir` that carries the `required` columns into
/// one table whose header is exactly `required`, in that order.
///
/// Files are visited in ascending file-name order and read as Latin-1. A file
/// that cannot be parsed, or that lacks a required column, is recorded in
/// [`MergeReport::skipped`] and does not stop the merge. When no file is
/// accepted the merge fails with [`ToolError::NoValidInputs`].
pub fn merge_directory(dir: &Path, required: &[&str]) -> Result<MergeReport> {
    if !dir.is_dir() {
        return Err(ToolError::MissingInput(dir.to_path_buf()));
    }

    let files = list_csv_files(dir)?;
    info!(file_count = files.len(), dir = %dir.display(), "found CSV files");

    let mut table = Table::new(required.iter().map(|name| name.to_string()).collect());
    let mut accepted = Vec::new();
    let mut skipped = Vec::new();

    for path in files {
        match load_extract(&path, required) {
            Ok(extract) => {
                debug!(file = %path.display(), rows = extract.len(), "accepted file");
                table.append(extract)?;
                accepted.push(path);
            }
            Err(ToolError::MissingColumns { missing }) => {
                warn!(
                    file = %path.display(),
                    missing = %missing.join(", "),
                    "skipping file with missing columns"
                );
                skipped.push(SkippedFile {
                    path,
                    reason: SkipReason::MissingColumns(missing),
                });
            }
            Err(err) => {
                error!(file = %path.display(), error = %err, "failed to read file");
                skipped.push(SkippedFile {
                    path,
                    reason: SkipReason::Unreadable(err.to_string()),
                });
            }
        }
    }

    if accepted.is_empty() {
        return Err(ToolError::NoValidInputs(dir.to_path_buf()));
    }

    info!(
        accepted = accepted.len(),
        skipped = skipped.len(),
        rows = table.len(),
        "combined files"
    );

    Ok(MergeReport {
        table,
        accepted,
        skipped,
    })
}

/// Reads one raw extract and projects it onto the required columns.
pub fn load_extract(path: &Path, required: &[&str]) -> Result<Table> {
    let raw = csv_read::read_table(path, Encoding::Latin1)?;
    raw.select(required)
}

fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let is_csv = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(CSV_EXTENSION));
        if is_csv && entry.path().is_file() {
            files.push(entry.path());
        }
    }
    files.sort_by(|lhs, rhs| lhs.file_name().cmp(&rhs.file_name()));
    Ok(files)
}
