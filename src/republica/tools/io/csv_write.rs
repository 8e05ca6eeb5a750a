use std::path::Path;

use csv::WriterBuilder;

use crate::republica::tools::error::Result;
use crate::republica::tools::model::{Table, Value};

/// Writes the table to the given path as UTF-8 CSV with a header row and no
/// index column. An existing file is overwritten.
pub fn write_table(path: &Path, table: &Table) -> Result<()> {
    let mut writer = WriterBuilder::new().from_path(path)?;

    writer.write_record(&table.columns)?;
    for row in &table.rows {
        writer.write_record(row.iter().map(Value::to_cell))?;
    }

    writer.flush()?;
    Ok(())
}
