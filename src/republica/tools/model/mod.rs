use crate::republica::tools::error::{Result, ToolError};

/// Canonical column order of the establishment registry.
pub const REQUIRED_COLUMNS: [&str; 17] = [
    "CODIGO",
    "DISTRITO",
    "DEPARTAMENTO",
    "MUNICIPIO",
    "ESTABLECIMIENTO",
    "DIRECCION",
    "TELEFONO",
    "SUPERVISOR",
    "DIRECTOR",
    "NIVEL",
    "SECTOR",
    "AREA",
    "STATUS",
    "MODALIDAD",
    "JORNADA",
    "PLAN",
    "DEPARTAMENTAL",
];

/// Field contents that are read as a missing value rather than as text.
pub const MISSING_TOKENS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// A single cell of a registry table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// Missing value.
    Null,
    /// Raw or normalised text.
    Text(String),
    /// Derived quality flag.
    Bool(bool),
    /// Derived integer, used by the indicator columns.
    Int(i64),
}

impl Value {
    /// Interprets a raw CSV field, mapping empty fields and NA sentinels to
    /// [`Value::Null`].
    pub fn from_field(field: &str) -> Self {
        if field.is_empty() || MISSING_TOKENS.contains(&field) {
            Value::Null
        } else {
            Value::Text(field.to_string())
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the text payload, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(value) => Some(value),
            _ => None,
        }
    }

    /// True when the cell holds exactly the given text.
    pub fn is_text(&self, expected: &str) -> bool {
        self.as_text() == Some(expected)
    }

    /// Renders the cell the way it is written to CSV.
    pub fn to_cell(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Text(value) => value.clone(),
            Value::Bool(true) => "True".to_string(),
            Value::Bool(false) => "False".to_string(),
            Value::Int(value) => value.to_string(),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<Option<String>> for Value {
    fn from(value: Option<String>) -> Self {
        value.map(Value::Text).unwrap_or(Value::Null)
    }
}

/// Row of cells, positionally aligned with [`Table::columns`].
pub type Row = Vec<Value>;

/// An ordered, column-named table of registry records.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    /// Creates an empty table with the provided header.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Like [`Table::column_index`], but a missing column is an error.
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| ToolError::MissingColumn(name.to_string()))
    }

    /// Iterates over the cells of one column.
    pub fn column_values(&self, name: &str) -> Result<impl Iterator<Item = &Value>> {
        let idx = self.require_column(name)?;
        Ok(self.rows.iter().map(move |row| &row[idx]))
    }

    /// Replaces the column in place when it exists, otherwise appends it.
    pub fn set_column(&mut self, name: &str, values: Vec<Value>) {
        debug_assert_eq!(values.len(), self.rows.len());
        match self.column_index(name) {
            Some(idx) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row[idx] = value;
                }
            }
            None => {
                self.columns.push(name.to_string());
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
    }

    /// Projects the table onto the given columns, in the given order.
    ///
    /// Every missing column is reported at once.
    pub fn select(&self, names: &[&str]) -> Result<Table> {
        let mut indices = Vec::with_capacity(names.len());
        let mut missing = Vec::new();
        for name in names {
            match self.column_index(name) {
                Some(idx) => indices.push(idx),
                None => missing.push(name.to_string()),
            }
        }
        if !missing.is_empty() {
            return Err(ToolError::MissingColumns { missing });
        }

        let rows = self
            .rows
            .iter()
            .map(|row| indices.iter().map(|&idx| row[idx].clone()).collect())
            .collect();

        Ok(Table {
            columns: names.iter().map(|name| name.to_string()).collect(),
            rows,
        })
    }

    /// Appends the rows of another table, reordering its columns onto this
    /// table's header when they differ.
    pub fn append(&mut self, other: Table) -> Result<()> {
        let other = if other.columns == self.columns {
            other
        } else {
            let names: Vec<&str> = self.columns.iter().map(String::as_str).collect();
            other.select(&names)?
        };
        self.rows.extend(other.rows);
        Ok(())
    }

    /// Returns a table with the same header holding only the selected rows.
    pub fn filter_rows<F>(&self, mut keep: F) -> Table
    where
        F: FnMut(usize, &Row) -> bool,
    {
        let rows = self
            .rows
            .iter()
            .enumerate()
            .filter(|(idx, row)| keep(*idx, *row))
            .map(|(_, row)| row.clone())
            .collect();

        Table {
            columns: self.columns.clone(),
            rows,
        }
    }
}
