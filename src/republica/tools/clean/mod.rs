//! Ordered column rules that turn the combined registry into the cleaned
//! table. Each rule reads the columns left behind by the rules before it and
//! never drops a row.

pub mod jornada;
pub mod modalidad;
pub mod phone;
pub mod text;

use tracing::{debug, info, instrument};

use crate::republica::tools::error::Result;
use crate::republica::tools::model::{Table, Value};

/// Free-text columns normalised by [`normalize_text_columns`].
pub const TEXT_COLUMNS: [&str; 4] = ["ESTABLECIMIENTO", "DIRECCION", "MUNICIPIO", "DEPARTAMENTO"];

/// Corrections applied to MUNICIPIO after normalisation.
pub const MUNICIPIO_RENAMES: [(&str, &str); 1] = [("LA-TINTA", "LA TINTA")];

pub const DEPT_MUN: &str = "DEPT_MUN";
pub const TELEFONO_CLEAN: &str = "TELEFONO_CLEAN";
pub const TELEFONO_FLAG: &str = "TELEFONO_FLAG";
pub const ADDR_MISSING_URBAN: &str = "ADDR_MISSING_URBAN";
pub const MOD_BUCKET: &str = "MOD_BUCKET";
pub const IS_BILINGUE: &str = "IS_BILINGUE";
pub const STATUS_NOT_ABIERTA: &str = "STATUS_NOT_ABIERTA";
pub const OFICIAL_NO_PHONE: &str = "OFICIAL_NO_PHONE";
pub const NACIONAL_TAG_MISTAKE: &str = "NACIONAL_TAG_MISTAKE";

/// Runs every cleaning rule over the table, in order.
#[instrument(level = "info", skip_all, fields(rows = table.len()))]
pub fn clean_table(mut table: Table) -> Result<Table> {
    normalize_text_columns(&mut table)?;
    derive_geographic_key(&mut table)?;
    clean_phones(&mut table)?;
    flag_missing_urban_address(&mut table)?;
    let shifts = expand_shift_indicators(&mut table)?;
    bucket_modality(&mut table)?;
    flag_quality_issues(&mut table)?;
    info!(
        columns = table.columns.len(),
        shift_columns = shifts,
        "cleaning rules applied"
    );
    Ok(table)
}

/// Normalises the free-text columns in place.
pub fn normalize_text_columns(table: &mut Table) -> Result<()> {
    for column in TEXT_COLUMNS {
        let idx = table.require_column(column)?;
        for row in &mut table.rows {
            row[idx] = text::normalize_value(&row[idx]);
        }
    }
    debug!("text columns normalised");
    Ok(())
}

/// Applies the MUNICIPIO corrections and derives `DEPT_MUN`.
///
/// `DEPT_MUN` is missing when either part is missing.
pub fn derive_geographic_key(table: &mut Table) -> Result<()> {
    let municipio = table.require_column("MUNICIPIO")?;
    let departamento = table.require_column("DEPARTAMENTO")?;

    for row in &mut table.rows {
        if let Some((_, fixed)) = MUNICIPIO_RENAMES
            .iter()
            .find(|(wrong, _)| row[municipio].is_text(wrong))
        {
            row[municipio] = Value::Text(fixed.to_string());
        }
    }

    let keys = table
        .rows
        .iter()
        .map(|row| {
            let key = row[departamento]
                .as_text()
                .zip(row[municipio].as_text())
                .map(|(dept, mun)| format!("{dept}_{mun}"));
            Value::from(key)
        })
        .collect();
    table.set_column(DEPT_MUN, keys);
    Ok(())
}

/// Derives `TELEFONO_CLEAN` and `TELEFONO_FLAG`.
pub fn clean_phones(table: &mut Table) -> Result<()> {
    let cleaned: Vec<String> = table.column_values("TELEFONO")?.map(phone::clean_phone).collect();
    let flags = cleaned
        .iter()
        .map(|digits| Value::from(phone::phone_flag(digits)))
        .collect();
    let flagged = cleaned.iter().filter(|digits| phone::phone_flag(digits)).count();

    table.set_column(TELEFONO_CLEAN, cleaned.into_iter().map(Value::Text).collect());
    table.set_column(TELEFONO_FLAG, flags);
    debug!(flagged, "phones cleaned");
    Ok(())
}

/// Derives `ADDR_MISSING_URBAN`: no address on an urban establishment.
pub fn flag_missing_urban_address(table: &mut Table) -> Result<()> {
    let direccion = table.require_column("DIRECCION")?;
    let area = table.require_column("AREA")?;
    let flags = table
        .rows
        .iter()
        .map(|row| Value::from(row[direccion].is_null() && row[area].is_text("URBANA")))
        .collect();
    table.set_column(ADDR_MISSING_URBAN, flags);
    Ok(())
}

/// Appends one `JORNADA_<token>` indicator column per shift seen in the
/// table and returns how many were produced.
pub fn expand_shift_indicators(table: &mut Table) -> Result<usize> {
    let indicators = jornada::indicator_columns(table.column_values("JORNADA")?);
    let count = indicators.len();
    for (name, values) in indicators {
        table.set_column(&name, values);
    }
    debug!(count, "shift indicators expanded");
    Ok(count)
}

/// Derives `MOD_BUCKET`. Unknown modalities get no bucket.
pub fn bucket_modality(table: &mut Table) -> Result<()> {
    let buckets: Vec<Value> = table
        .column_values("MODALIDAD")?
        .map(modalidad::bucket_value)
        .collect();
    let unmapped = buckets.iter().filter(|bucket| bucket.is_null()).count();
    table.set_column(MOD_BUCKET, buckets);
    debug!(unmapped, "modalities bucketed");
    Ok(())
}

/// Derives the boolean quality flags.
pub fn flag_quality_issues(table: &mut Table) -> Result<()> {
    let modalidad = table.require_column("MODALIDAD")?;
    let status = table.require_column("STATUS")?;
    let sector = table.require_column("SECTOR")?;
    let establecimiento = table.require_column("ESTABLECIMIENTO")?;
    let telefono = table.require_column(TELEFONO_CLEAN)?;

    let mut bilingue = Vec::with_capacity(table.len());
    let mut not_abierta = Vec::with_capacity(table.len());
    let mut oficial_no_phone = Vec::with_capacity(table.len());
    let mut nacional_mistake = Vec::with_capacity(table.len());

    for row in &table.rows {
        let oficial = row[sector].is_text("OFICIAL");
        bilingue.push(Value::from(row[modalidad].as_text().is_some_and(|text| {
            text.to_uppercase().contains("BILINGUE")
        })));
        not_abierta.push(Value::from(!row[status].is_text("ABIERTA")));
        oficial_no_phone.push(Value::from(oficial && row[telefono].is_text("")));
        nacional_mistake.push(Value::from(
            row[establecimiento]
                .as_text()
                .is_some_and(|text| text.contains("NACIONAL"))
                && !oficial,
        ));
    }

    table.set_column(IS_BILINGUE, bilingue);
    table.set_column(STATUS_NOT_ABIERTA, not_abierta);
    table.set_column(OFICIAL_NO_PHONE, oficial_no_phone);
    table.set_column(NACIONAL_TAG_MISTAKE, nacional_mistake);
    Ok(())
}
