// Estructuras de datos principales

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use rust_decimal::Decimal;
use serde::Serialize;

/// Código de curso (clave primaria del catálogo). Distingue mayúsculas.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CourseCode(String);

impl CourseCode {
    pub fn new(code: impl Into<String>) -> Self {
        CourseCode(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CourseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Permite buscar en BTreeMap/BTreeSet<CourseCode> con un &str
impl Borrow<str> for CourseCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CourseCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CourseCode {
    fn from(s: &str) -> Self {
        CourseCode(s.to_string())
    }
}

impl From<String> for CourseCode {
    fn from(s: String) -> Self {
        CourseCode(s)
    }
}

/// Temporada académica de un semestre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Fall,
    Spring,
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Season::Fall => f.write_str("fall"),
            Season::Spring => f.write_str("spring"),
        }
    }
}

/// Curso del catálogo.
///
/// La identidad es el código: dos `Course` son iguales si comparten código,
/// aunque difieran el resto de atributos. `Hash` y `Ord` también derivan sólo
/// del código.
#[derive(Debug, Clone, Serialize)]
pub struct Course {
    pub code: CourseCode,
    pub in_fall: bool,
    pub in_spring: bool,
    /// Créditos exactos (admite valores fraccionarios como 1.5). En JSON se
    /// serializan como número.
    #[serde(with = "rust_decimal::serde::float")]
    pub credits: Decimal,
    pub workload: u32,
    /// Prerrequisitos en el orden en que aparecen en la fila.
    pub prereqs: Vec<CourseCode>,
}

impl Course {
    pub fn code(&self) -> &CourseCode {
        &self.code
    }

    pub fn offered_in(&self, season: Season) -> bool {
        match season {
            Season::Fall => self.in_fall,
            Season::Spring => self.in_spring,
        }
    }
}

/// Accesor explícito del código de un curso.
pub fn code_of(course: &Course) -> &CourseCode {
    &course.code
}

impl PartialEq for Course {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for Course {}

impl Hash for Course {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

impl PartialOrd for Course {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Course {
    fn cmp(&self, other: &Self) -> Ordering {
        self.code.cmp(&other.code)
    }
}

/// Escalares de configuración del alumno (fila de settings de la tabla de usuario).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UserSettings {
    pub semesters_left: u32,
    pub min_credits: u32,
    pub max_credits: u32,
    pub next_semester_is_fall: bool,
}

impl UserSettings {
    /// Temporada del semestre `semester` (1 = el próximo). Las temporadas se
    /// alternan a partir de `next_semester_is_fall`. El semestre 0 es el
    /// anterior al horizonte de planificación.
    pub fn season_of(&self, semester: u32) -> Season {
        let first = if self.next_semester_is_fall { Season::Fall } else { Season::Spring };
        let other = match first {
            Season::Fall => Season::Spring,
            Season::Spring => Season::Fall,
        };
        if semester % 2 == 1 { first } else { other }
    }
}
