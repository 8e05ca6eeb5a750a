mod common;

use std::fs;

use common::{cell, csv_text, default_field, latin1, text};
use republica_tools::ToolError;
use republica_tools::clean;
use republica_tools::dedup::Summary;
use republica_tools::io::csv_read::{self, Encoding};
use republica_tools::model::{REQUIRED_COLUMNS, Value};
use republica_tools::pipeline::{self, CleanOutputs};
use tempfile::tempdir;

fn row_with(overrides: &[(&str, &'static str)]) -> Vec<&'static str> {
    REQUIRED_COLUMNS
        .iter()
        .map(|column| {
            overrides
                .iter()
                .find(|(name, _)| name == column)
                .map(|(_, value)| *value)
                .unwrap_or_else(|| default_field(column))
        })
        .collect()
}

#[test]
fn raw_extracts_become_cleaned_outputs() {
    let dir = tempdir().expect("temporary directory");
    let raw = dir.path().join("raw");
    fs::create_dir(&raw).expect("raw directory created");

    let first = row_with(&[
        ("CODIGO", "001"),
        ("MUNICIPIO", " la-tinta "),
        ("ESTABLECIMIENTO", "Instituto Nacional de Educación"),
        ("SECTOR", "PRIVADO"),
        ("TELEFONO", "(502) 1234-5678"),
    ]);
    let second = row_with(&[("CODIGO", "002"), ("DIRECCION", ""), ("AREA", "URBANA")]);
    let repeat = row_with(&[("CODIGO", "001"), ("JORNADA", "MATUTINA Y VESPERTINA")]);
    fs::write(
        raw.join("alta_verapaz.csv"),
        latin1(&csv_text(
            &REQUIRED_COLUMNS,
            &[first.as_slice(), second.as_slice(), repeat.as_slice()],
        )),
    )
    .expect("extract written");

    let merged = dir.path().join("republica.csv");
    let duplicates = dir.path().join("codigos_duplicados.csv");
    let cleaned = dir.path().join("republica_limpia_sin_duplicados.csv");

    let (report, summary) = pipeline::run(
        &raw,
        &merged,
        CleanOutputs {
            duplicates: &duplicates,
            cleaned: &cleaned,
        },
    )
    .expect("pipeline runs");

    assert_eq!(report.accepted.len(), 1);
    assert_eq!(
        summary,
        Summary {
            filas_totales: 3,
            codigos_unicos: 2,
            filas_duplicadas: 2,
            municipios: 2,
        }
    );

    let combined = fs::read_to_string(&merged).expect("combined CSV read");
    assert!(combined.starts_with(&REQUIRED_COLUMNS.join(",")));
    assert!(combined.contains("Instituto Nacional de Educación"));

    let report_table = csv_read::read_table(&duplicates, Encoding::Utf8).expect("report read");
    assert_eq!(report_table.len(), 2);
    assert_eq!(cell(&report_table, 0, "CODIGO"), &text("001"));
    assert_eq!(cell(&report_table, 1, "CODIGO"), &text("001"));

    let final_table = csv_read::read_table(&cleaned, Encoding::Utf8).expect("final table read");
    assert_eq!(final_table.len(), 2);
    assert_eq!(final_table.columns, report_table.columns);
    assert_eq!(cell(&final_table, 0, "MUNICIPIO"), &text("LA TINTA"));
    assert_eq!(
        cell(&final_table, 0, clean::DEPT_MUN),
        &text("ALTA VERAPAZ_LA TINTA")
    );
    assert_eq!(
        cell(&final_table, 0, "ESTABLECIMIENTO"),
        &text("INSTITUTO NACIONAL DE EDUCACION")
    );
    assert_eq!(cell(&final_table, 0, clean::TELEFONO_CLEAN), &text("50212345678"));
    assert_eq!(cell(&final_table, 0, clean::TELEFONO_FLAG), &text("False"));
    assert_eq!(cell(&final_table, 0, clean::NACIONAL_TAG_MISTAKE), &text("True"));
    assert_eq!(cell(&final_table, 0, "JORNADA_VESPERTINA"), &text("0"));
    assert_eq!(cell(&final_table, 1, clean::ADDR_MISSING_URBAN), &text("True"));
    assert_eq!(cell(&final_table, 1, "DIRECCION"), &Value::Null);
    assert_eq!(cell(&final_table, 1, clean::MOD_BUCKET), &text("presencial"));
}

#[test]
fn failed_merge_writes_nothing() {
    let dir = tempdir().expect("temporary directory");
    let raw = dir.path().join("raw");
    fs::create_dir(&raw).expect("raw directory created");
    fs::write(raw.join("otro.csv"), latin1("NOMBRE\nX\n")).expect("extract written");

    let merged = dir.path().join("republica.csv");
    let result = pipeline::merge_to_csv(&raw, &merged);

    assert!(matches!(result, Err(ToolError::NoValidInputs(_))));
    assert!(!merged.exists());
}

#[test]
fn cleaning_a_missing_file_is_reported() {
    let dir = tempdir().expect("temporary directory");
    let duplicates = dir.path().join("codigos_duplicados.csv");
    let cleaned = dir.path().join("limpia.csv");

    let result = pipeline::clean_csv(
        &dir.path().join("republica.csv"),
        CleanOutputs {
            duplicates: &duplicates,
            cleaned: &cleaned,
        },
    );

    assert!(matches!(result, Err(ToolError::MissingInput(_))));
    assert!(!duplicates.exists());
}
