use std::fs::File;
use std::io::Read;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::error::Result;
use crate::tabular::Row;

/// Convierte una celda de calamine a String. Los flotantes enteros se escriben
/// sin parte decimal para que "1.0" se lea como el flag `1`.
pub fn cell_to_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => {
            if (f.floor() - f).abs() < f64::EPSILON {
                format!("{}", *f as i64)
            } else {
                format!("{}", f)
            }
        }
        Data::Int(i) => format!("{}", i),
        Data::Bool(b) => if *b { "1".to_string() } else { "0".to_string() },
        Data::Empty => String::new(),
        Data::Error(_) => String::new(),
        Data::DateTime(s) => s.to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

/// ¿La ruta apunta a un libro de cálculo (y no a un CSV)?
pub fn is_workbook(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => matches!(ext.to_lowercase().as_str(), "xlsx" | "xlsm" | "xlsb" | "xls" | "ods"),
        None => false,
    }
}

/// Lee la primera hoja de un workbook como filas de celdas.
pub fn read_first_sheet(path: &Path) -> Result<Vec<Row>> {
    let mut workbook = open_workbook_auto(path)?;

    let names = workbook.sheet_names().to_owned();
    let Some(first) = names.first() else {
        return Ok(Vec::new());
    };

    let range = workbook.worksheet_range(first)?;
    Ok(range
        .rows()
        .enumerate()
        .map(|(idx, r)| Row::new(idx + 1, r.iter().map(cell_to_string).collect()))
        .collect())
}

/// Lee un CSV completo. Las filas pueden tener distinto número de columnas
/// (exportaciones de hojas de cálculo con columnas irregulares).
pub fn read_csv_records<R: Read>(reader: R) -> Result<Vec<Row>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (idx, record) in csv_reader.records().enumerate() {
        let record = record?;
        let line = record.position().map(|p| p.line() as usize).unwrap_or(idx + 1);
        rows.push(Row::new(line, record.iter().map(|c| c.trim().to_string()).collect()));
    }
    Ok(rows)
}

/// Abre y lee un CSV. El archivo se cierra al salir de la función.
pub fn read_csv_file(path: &Path) -> Result<Vec<Row>> {
    let file = File::open(path)?;
    read_csv_records(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_floats_lose_fraction() {
        assert_eq!(cell_to_string(&Data::Float(1.0)), "1");
        assert_eq!(cell_to_string(&Data::Float(1.5)), "1.5");
        assert_eq!(cell_to_string(&Data::Bool(true)), "1");
        assert_eq!(cell_to_string(&Data::Empty), "");
    }

    #[test]
    fn ragged_csv_keeps_every_row() {
        let text = "a,b,c\n1,2\n3,4,5,6,\n";
        let rows = read_csv_records(text.as_bytes()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].cells, vec!["1", "2"]);
        assert_eq!(rows[2].cells, vec!["3", "4", "5", "6", ""]);
        assert_eq!(rows[2].line, 3);
    }

    #[test]
    fn workbook_detection_by_extension() {
        assert!(is_workbook(Path::new("dat/course-list.XLSX")));
        assert!(!is_workbook(Path::new("dat/course-list.csv")));
        assert!(!is_workbook(Path::new("dat/noext")));
    }
}
