use std::collections::BTreeSet;

use serde::Serialize;
use tracing::info;

use crate::error::{Result, RowDefect};
use crate::tabular::{FromRow, Row, Table};

/// Categorías de requisitos del título: major, breadth (HSA) y core.
/// Son etiquetas libres, no códigos de curso.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequirementIndex {
    pub major: BTreeSet<String>,
    pub hsa: BTreeSet<String>,
    pub core: BTreeSet<String>,
}

impl RequirementIndex {
    pub fn len(&self) -> usize {
        self.major.len() + self.hsa.len() + self.core.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Fila de la tabla de requisitos. Las columnas son irregulares: cualquier
/// celda puede venir vacía.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementRecord {
    pub major: Option<String>,
    pub hsa: Option<String>,
    pub core: Option<String>,
}

fn non_empty(v: &str) -> Option<String> {
    if v.is_empty() { None } else { Some(v.to_string()) }
}

impl FromRow for RequirementRecord {
    fn from_row(row: &Row) -> std::result::Result<Self, RowDefect> {
        Ok(RequirementRecord {
            major: non_empty(row.cell(0)),
            hsa: non_empty(row.cell(1)),
            core: non_empty(row.cell(2)),
        })
    }
}

/// Lee la tabla `(major, hsa, core)`.
pub fn read_requirements(table: &Table) -> Result<RequirementIndex> {
    let mut index = RequirementIndex::default();

    for row in table.data_rows() {
        let rec: RequirementRecord = table.parse_row(row)?;
        index.major.extend(rec.major);
        index.hsa.extend(rec.hsa);
        index.core.extend(rec.core);
    }

    info!(
        event = "requirements_loaded",
        table = %table.name,
        major = index.major.len(),
        hsa = index.hsa.len(),
        core = index.core.len(),
    );
    Ok(index)
}
