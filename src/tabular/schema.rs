use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::RowDefect;
use crate::tabular::Row;

/// Esquema de una tabla: convierte una fila en un registro tipado o en el
/// defecto que la invalida.
pub trait FromRow: Sized {
    fn from_row(row: &Row) -> Result<Self, RowDefect>;
}

/// Quita las celdas vacías del final (columnas irregulares de exportación).
pub fn trim_trailing_blanks(cells: &[String]) -> &[String] {
    let end = cells
        .iter()
        .rposition(|c| !c.trim().is_empty())
        .map(|i| i + 1)
        .unwrap_or(0);
    &cells[..end]
}

/// Exige al menos `expected` campos poblados.
pub fn require_fields(cells: &[String], expected: usize) -> Result<(), RowDefect> {
    if cells.len() < expected {
        return Err(RowDefect::TooFewFields { expected, found: cells.len() });
    }
    Ok(())
}

/// Celda obligatoria no vacía.
pub fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, RowDefect> {
    let v = value.trim();
    if v.is_empty() {
        return Err(RowDefect::MissingField { field });
    }
    Ok(v)
}

/// Flag 0/1. Cualquier otro valor es un error de tipo.
pub fn parse_flag(value: &str, field: &'static str) -> Result<bool, RowDefect> {
    match value.trim() {
        "1" => Ok(true),
        "0" => Ok(false),
        other => Err(RowDefect::InvalidFlag { field, value: other.to_string() }),
    }
}

/// Entero no negativo.
pub fn parse_u32(value: &str, field: &'static str) -> Result<u32, RowDefect> {
    let v = required(value, field)?;
    v.parse::<u32>()
        .map_err(|_| RowDefect::InvalidNumber { field, value: v.to_string() })
}

/// Entero con signo; el rango lo valida quien lo usa.
pub fn parse_i64(value: &str, field: &'static str) -> Result<i64, RowDefect> {
    let v = required(value, field)?;
    v.parse::<i64>()
        .map_err(|_| RowDefect::InvalidNumber { field, value: v.to_string() })
}

/// Decimal exacto no negativo (créditos).
pub fn parse_decimal(value: &str, field: &'static str) -> Result<Decimal, RowDefect> {
    let v = required(value, field)?;
    match Decimal::from_str(v) {
        Ok(d) if !d.is_sign_negative() => Ok(d.normalize()),
        _ => Err(RowDefect::InvalidNumber { field, value: v.to_string() }),
    }
}
