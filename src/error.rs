// Errores del generador. Todos son fatales: se propagan hasta `main` y
// ningún artefacto se escribe a partir de un modelo parcialmente válido.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::CourseCode;

/// Defecto concreto de una fila mal formada.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowDefect {
    #[error("se esperaban al menos {expected} campos, hay {found}")]
    TooFewFields { expected: usize, found: usize },

    #[error("falta el campo `{field}`")]
    MissingField { field: &'static str },

    #[error("el campo `{field}` debe ser 0 o 1, vale {value:?}")]
    InvalidFlag { field: &'static str, value: String },

    #[error("el campo `{field}` no es un número válido: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("valor inválido en `{field}`: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("la tabla no tiene fila de datos")]
    MissingRow,
}

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no se encontró el archivo de entrada {path:?}")]
    MissingInput { path: PathBuf },

    #[error("{table}, línea {line}: fila malformada: {defect}")]
    MalformedRow { table: String, line: usize, defect: RowDefect },

    #[error("curso duplicado `{code}` en la línea {line} del catálogo")]
    DuplicateCourse { code: CourseCode, line: usize },

    #[error("curso desconocido `{code}` referenciado desde {referenced_from}{}", did_you_mean(.suggestion))]
    UnknownCourse {
        code: CourseCode,
        referenced_from: String,
        suggestion: Option<CourseCode>,
    },

    #[error("semestre {semester} inválido en la línea {line}: debe estar en 1..={semesters_left}")]
    InvalidSemester { semester: i64, semesters_left: u32, line: usize },

    #[error("`{code}` ya está fijado en el semestre {semester} (línea {line})")]
    DuplicatePin { code: CourseCode, semester: u32, line: usize },

    #[error("ciclo de prerrequisitos que pasa por `{code}`")]
    PrerequisiteCycle { code: CourseCode },

    #[error("{part} se construyó contra otro catálogo")]
    StaleCatalog { part: &'static str },

    #[error("el mapa de fijaciones cubre {pinned} semestres pero la configuración dice {settings}")]
    HorizonMismatch { pinned: u32, settings: u32 },
}

impl ScheduleError {
    pub(crate) fn malformed(table: &str, line: usize, defect: RowDefect) -> Self {
        ScheduleError::MalformedRow { table: table.to_string(), line, defect }
    }
}

fn did_you_mean(suggestion: &Option<CourseCode>) -> String {
    match suggestion {
        Some(s) => format!(" (¿quiso decir `{}`?)", s),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
