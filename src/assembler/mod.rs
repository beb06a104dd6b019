// Composición final del modelo que se entrega al renderizador.

use std::fmt;

use serde::Serialize;

use crate::catalog::Catalog;
use crate::error::{Result, ScheduleError};
use crate::models::{CourseCode, Season, UserSettings};
use crate::requirements::RequirementIndex;
use crate::user::{PinningMap, TakenSet};

/// Instantánea inmutable: catálogo, aprobados, fijaciones, requisitos y
/// escalares del usuario. No guarda estado derivado.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleModel {
    catalog: Catalog,
    taken: TakenSet,
    pinned: PinningMap,
    requirements: RequirementIndex,
    settings: UserSettings,
}

/// Aviso no fatal sobre el modelo ensamblado.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelWarning {
    /// Se fuerza un curso en un semestre cuya temporada no lo ofrece.
    NotOffered { code: CourseCode, semester: u32, season: Season },
    /// Un curso aprobado tiene un prerrequisito que no figura como aprobado.
    MissingPrereq { code: CourseCode, prereq: CourseCode },
}

impl fmt::Display for ModelWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelWarning::NotOffered { code, semester, season } => {
                write!(f, "{} está fijado en el semestre {} ({}) pero no se ofrece en esa temporada", code, semester, season)
            }
            ModelWarning::MissingPrereq { code, prereq } => {
                write!(f, "{} figura como aprobado pero su prerrequisito {} no", code, prereq)
            }
        }
    }
}

impl ScheduleModel {
    /// Ensambla el modelo. Sólo comprueba que todas las piezas se
    /// construyeron contra el mismo catálogo y el mismo horizonte.
    pub fn assemble(
        catalog: Catalog,
        taken: TakenSet,
        pinned: PinningMap,
        requirements: RequirementIndex,
        settings: UserSettings,
    ) -> Result<Self> {
        if taken.catalog_id() != catalog.id() {
            return Err(ScheduleError::StaleCatalog { part: "el conjunto de aprobados" });
        }
        if pinned.catalog_id() != catalog.id() {
            return Err(ScheduleError::StaleCatalog { part: "el mapa de fijaciones" });
        }
        if pinned.semesters_left() != settings.semesters_left {
            return Err(ScheduleError::HorizonMismatch {
                pinned: pinned.semesters_left(),
                settings: settings.semesters_left,
            });
        }

        Ok(ScheduleModel { catalog, taken, pinned, requirements, settings })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn taken(&self) -> &TakenSet {
        &self.taken
    }

    pub fn pinned(&self) -> &PinningMap {
        &self.pinned
    }

    pub fn requirements(&self) -> &RequirementIndex {
        &self.requirements
    }

    pub fn settings(&self) -> &UserSettings {
        &self.settings
    }

    /// Resumen de una línea para logs y `--summary`.
    pub fn summary(&self) -> String {
        format!(
            "MODELO: {} cursos | {} aprobados | {} fijaciones en {} semestres | requisitos {} major / {} hsa / {} core | créditos {}..={}",
            self.catalog.len(),
            self.taken.len(),
            self.pinned.pin_count(),
            self.settings.semesters_left,
            self.requirements.major.len(),
            self.requirements.hsa.len(),
            self.requirements.core.len(),
            self.settings.min_credits,
            self.settings.max_credits,
        )
    }

    /// Avisos sobre combinaciones sospechosas que el solver rechazaría o
    /// resolvería de forma inesperada. Nunca son errores.
    pub fn offering_warnings(&self) -> Vec<ModelWarning> {
        let mut out = Vec::new();

        for (semester, code, take) in self.pinned.iter() {
            if !take {
                continue;
            }
            let season = self.settings.season_of(semester);
            if let Some(course) = self.catalog.lookup(code.as_str()) {
                if !course.offered_in(season) {
                    out.push(ModelWarning::NotOffered { code: code.clone(), semester, season });
                }
            }
        }

        for code in self.taken.iter() {
            let Some(course) = self.catalog.lookup(code.as_str()) else { continue };
            for prereq in &course.prereqs {
                if !self.taken.contains(prereq.as_str()) {
                    out.push(ModelWarning::MissingPrereq { code: code.clone(), prereq: prereq.clone() });
                }
            }
        }

        out
    }
}
