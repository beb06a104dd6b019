// Lectura de tablas planas (CSV o libros de cálculo) y esquema por tabla.
//
// Submódulos:
// - `io`: lectura de CSV con `csv` y de workbooks con `calamine`
// - `schema`: trait `FromRow` y parsers de campos tipados

mod io;
pub mod schema;

pub use io::{cell_to_string, is_workbook};
pub use schema::FromRow;

use std::path::Path;

use tracing::debug;

use crate::error::{Result, ScheduleError};

/// Fila de una tabla con su número de línea en el origen (1-based).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub line: usize,
    pub cells: Vec<String>,
}

impl Row {
    pub fn new(line: usize, cells: Vec<String>) -> Self {
        Row { line, cells }
    }

    /// Celda `idx` recortada; vacía si la fila no llega a esa columna.
    pub fn cell(&self, idx: usize) -> &str {
        self.cells.get(idx).map(|c| c.trim()).unwrap_or("")
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|c| c.trim().is_empty())
    }

    /// Celdas sin las columnas vacías del final.
    pub fn populated(&self) -> &[String] {
        schema::trim_trailing_blanks(&self.cells)
    }
}

/// Tabla ya leída. `name` se usa en los mensajes de error.
#[derive(Debug, Clone)]
pub struct Table {
    pub name: String,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(name: impl Into<String>, rows: Vec<Row>) -> Self {
        Table { name: name.into(), rows }
    }

    /// Lee una tabla desde disco. La extensión decide el lector: workbooks
    /// (xlsx, xls, ods...) vía calamine, todo lo demás como CSV.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(ScheduleError::MissingInput { path: path.to_path_buf() });
        }

        let rows = if io::is_workbook(path) {
            io::read_first_sheet(path)?
        } else {
            io::read_csv_file(path)?
        };

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("tabla")
            .to_string();
        debug!(table = %name, rows = rows.len(), "tabla leída");
        Ok(Table { name, rows })
    }

    /// Construye una tabla a partir de texto CSV en memoria.
    pub fn from_csv_str(name: impl Into<String>, text: &str) -> Result<Self> {
        let rows = io::read_csv_records(text.as_bytes())?;
        Ok(Table { name: name.into(), rows })
    }

    /// Filas de datos: omite la cabecera (siempre la primera fila) y las
    /// filas completamente vacías.
    pub fn data_rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter().skip(1).filter(|r| !r.is_blank())
    }

    /// Parsea una fila con el esquema `T`, anotando tabla y línea en el error.
    pub fn parse_row<T: FromRow>(&self, row: &Row) -> Result<T> {
        T::from_row(row).map_err(|defect| ScheduleError::malformed(&self.name, row.line, defect))
    }
}
