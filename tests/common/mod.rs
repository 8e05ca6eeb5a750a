#![allow(dead_code)]

use republica_tools::model::{REQUIRED_COLUMNS, Table, Value};

/// Value of a column for a typical, well-formed establishment.
pub fn default_field(column: &str) -> &'static str {
    match column {
        "CODIGO" => "16-01-0138-46",
        "DISTRITO" => "16-031",
        "DEPARTAMENTO" => "ALTA VERAPAZ",
        "MUNICIPIO" => "COBAN",
        "ESTABLECIMIENTO" => "ESCUELA OFICIAL RURAL MIXTA",
        "DIRECCION" => "ALDEA CHICOJ",
        "TELEFONO" => "79511234",
        "SUPERVISOR" => "MARIA LOPEZ",
        "DIRECTOR" => "JUAN PEREZ",
        "NIVEL" => "PRIMARIA",
        "SECTOR" => "OFICIAL",
        "AREA" => "RURAL",
        "STATUS" => "ABIERTA",
        "MODALIDAD" => "DIARIO(REGULAR)",
        "JORNADA" => "MATUTINA",
        "PLAN" => "DIARIO(REGULAR)",
        "DEPARTAMENTAL" => "ALTA VERAPAZ",
        _ => "",
    }
}

/// Builds a canonical-schema table, one row per override list. Columns not
/// overridden take [`default_field`]; an override of `""` reads as missing.
pub fn registry(records: &[&[(&str, &str)]]) -> Table {
    let mut table = Table::new(REQUIRED_COLUMNS.iter().map(|name| name.to_string()).collect());
    for overrides in records {
        let row = REQUIRED_COLUMNS
            .iter()
            .map(|column| {
                let field = overrides
                    .iter()
                    .find(|(name, _)| name == column)
                    .map(|(_, value)| *value)
                    .unwrap_or_else(|| default_field(column));
                Value::from_field(field)
            })
            .collect();
        table.rows.push(row);
    }
    table
}

/// Cell at `row` of `column`, panicking if the column is absent.
pub fn cell<'a>(table: &'a Table, row: usize, column: &str) -> &'a Value {
    let idx = table
        .column_index(column)
        .unwrap_or_else(|| panic!("column {column} present"));
    &table.rows[row][idx]
}

pub fn text(value: &str) -> Value {
    Value::Text(value.to_string())
}

/// Renders rows as CSV text with the given header.
pub fn csv_text(header: &[&str], rows: &[&[&str]]) -> String {
    let mut out = header.join(",");
    out.push('\n');
    for row in rows {
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}

/// Encodes text as ISO-8859-1 bytes.
pub fn latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| u8::try_from(u32::from(ch)).expect("character representable in Latin-1"))
        .collect()
}
