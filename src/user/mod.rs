// Lectura de la tabla de usuario: cursos aprobados, escalares de
// configuración y cursos fijados por semestre.
//
// La tabla comparte tres regiones:
// - columna 0: cursos ya aprobados (uno por fila)
// - primera fila de datos, columnas 1..=4: `semesters_left, min_credits, max_credits, next_fall`
// - columnas 5..=7: fijaciones `(course, semester, take)`

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::{debug, info};

use crate::catalog::{Catalog, CatalogId};
use crate::error::{Result, RowDefect, ScheduleError};
use crate::models::{CourseCode, UserSettings};
use crate::tabular::schema::{parse_flag, parse_i64, parse_u32, require_fields, required};
use crate::tabular::{FromRow, Row, Table};

const TAKEN_COL: usize = 0;
const PIN_COL: usize = 5;

/// Tope del horizonte de planificación (doce años de semestres).
pub const MAX_SEMESTERS_LEFT: u32 = 24;

/// Conjunto de cursos aprobados, validado contra un catálogo concreto.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TakenSet {
    #[serde(skip)]
    catalog: CatalogId,
    codes: BTreeSet<CourseCode>,
}

impl TakenSet {
    pub fn catalog_id(&self) -> CatalogId {
        self.catalog
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CourseCode> {
        self.codes.iter()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// Fijaciones por semestre: `true` = debe cursarse, `false` = no debe cursarse.
///
/// Siempre contiene las claves `0..=semesters_left`. El semestre 0 (anterior
/// al horizonte) queda vacío.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PinningMap {
    #[serde(skip)]
    catalog: CatalogId,
    semesters_left: u32,
    semesters: BTreeMap<u32, BTreeMap<CourseCode, bool>>,
}

impl PinningMap {
    fn empty(catalog: CatalogId, semesters_left: u32) -> Self {
        let semesters = (0..=semesters_left).map(|s| (s, BTreeMap::new())).collect();
        PinningMap { catalog, semesters_left, semesters }
    }

    pub fn catalog_id(&self) -> CatalogId {
        self.catalog
    }

    pub fn semesters_left(&self) -> u32 {
        self.semesters_left
    }

    /// Semestres (claves) del mapa, en orden.
    pub fn semesters(&self) -> impl Iterator<Item = u32> + '_ {
        self.semesters.keys().copied()
    }

    /// Fijaciones de un semestre. `None` si el semestre está fuera del mapa.
    pub fn pins(&self, semester: u32) -> Option<&BTreeMap<CourseCode, bool>> {
        self.semesters.get(&semester)
    }

    /// Todas las fijaciones como `(semestre, curso, take)`.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &CourseCode, bool)> {
        self.semesters
            .iter()
            .flat_map(|(s, pins)| pins.iter().map(move |(code, take)| (*s, code, *take)))
    }

    pub fn pin_count(&self) -> usize {
        self.semesters.values().map(|p| p.len()).sum()
    }
}

/// Fila de configuración: columnas 1..=4 de la primera fila de datos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingsRecord(pub UserSettings);

impl FromRow for SettingsRecord {
    fn from_row(row: &Row) -> std::result::Result<Self, RowDefect> {
        require_fields(row.populated(), 5)?;

        let semesters_left = parse_u32(row.cell(1), "semesters_left")?;
        let min_credits = parse_u32(row.cell(2), "min_credits")?;
        let max_credits = parse_u32(row.cell(3), "max_credits")?;
        let next_semester_is_fall = parse_flag(required(row.cell(4), "next_fall")?, "next_fall")?;

        if semesters_left == 0 {
            return Err(RowDefect::InvalidValue {
                field: "semesters_left",
                reason: "debe ser al menos 1".to_string(),
            });
        }
        if semesters_left > MAX_SEMESTERS_LEFT {
            return Err(RowDefect::InvalidValue {
                field: "semesters_left",
                reason: format!("{} supera el máximo de {}", semesters_left, MAX_SEMESTERS_LEFT),
            });
        }
        if min_credits > max_credits {
            return Err(RowDefect::InvalidValue {
                field: "min_credits",
                reason: format!("{} supera max_credits ({})", min_credits, max_credits),
            });
        }

        Ok(SettingsRecord(UserSettings {
            semesters_left,
            min_credits,
            max_credits,
            next_semester_is_fall,
        }))
    }
}

/// Fijación leída de las columnas 5..=7.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinRecord {
    pub course: String,
    /// Con signo: un semestre negativo es un semestre inválido, no texto mal formado.
    pub semester: i64,
    pub take: bool,
}

impl FromRow for PinRecord {
    fn from_row(row: &Row) -> std::result::Result<Self, RowDefect> {
        let course = required(row.cell(PIN_COL), "pin_course")?.to_string();
        let semester = parse_i64(row.cell(PIN_COL + 1), "pin_semester")?;
        let take = parse_flag(required(row.cell(PIN_COL + 2), "pin_take")?, "pin_take")?;
        Ok(PinRecord { course, semester, take })
    }
}

/// Cursos aprobados (columna 0). Las celdas vacías se ignoran.
pub fn read_taken(table: &Table, catalog: &Catalog) -> Result<TakenSet> {
    let mut codes = BTreeSet::new();

    for row in table.data_rows() {
        let code = row.cell(TAKEN_COL);
        if code.is_empty() {
            continue;
        }
        let code = catalog.resolve(code, format!("{}, línea {}", table.name, row.line))?;
        codes.insert(code.clone());
    }

    info!(event = "taken_loaded", table = %table.name, taken = codes.len());
    Ok(TakenSet { catalog: catalog.id(), codes })
}

/// Escalares de configuración: exactamente la primera fila de datos.
pub fn read_settings(table: &Table) -> Result<UserSettings> {
    let Some(row) = table.data_rows().next() else {
        return Err(ScheduleError::malformed(&table.name, 2, RowDefect::MissingRow));
    };

    let SettingsRecord(settings) = table.parse_row::<SettingsRecord>(row)?;
    info!(
        event = "settings_loaded",
        semesters_left = settings.semesters_left,
        min_credits = settings.min_credits,
        max_credits = settings.max_credits,
        next_fall = settings.next_semester_is_fall,
    );
    Ok(settings)
}

/// Fijaciones por semestre (columnas 5..=7).
pub fn read_pinned(table: &Table, catalog: &Catalog, semesters_left: u32) -> Result<PinningMap> {
    let mut pinned = PinningMap::empty(catalog.id(), semesters_left);

    for row in table.data_rows() {
        if row.cell(PIN_COL).is_empty() {
            continue;
        }

        let rec: PinRecord = table.parse_row(row)?;
        let code = catalog.resolve(&rec.course, format!("{}, línea {}", table.name, row.line))?;

        let semester = match u32::try_from(rec.semester) {
            Ok(s) if (1..=semesters_left).contains(&s) => s,
            _ => {
                return Err(ScheduleError::InvalidSemester {
                    semester: rec.semester,
                    semesters_left,
                    line: row.line,
                });
            }
        };

        let slot = pinned.semesters.entry(semester).or_default();
        if slot.contains_key(code.as_str()) {
            return Err(ScheduleError::DuplicatePin {
                code: code.clone(),
                semester,
                line: row.line,
            });
        }
        debug!(code = %code, semester, take = rec.take, "curso fijado");
        slot.insert(code.clone(), rec.take);
    }

    info!(event = "pins_loaded", table = %table.name, pins = pinned.pin_count(), semesters_left);
    Ok(pinned)
}
