// Catálogo de cursos: ancla de integridad referencial para el resto de tablas.

use std::collections::BTreeMap;
use std::collections::btree_map::Values;
use std::sync::atomic::{AtomicU64, Ordering};

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Result, RowDefect, ScheduleError};
use crate::models::{Course, CourseCode};
use crate::tabular::schema::{parse_decimal, parse_flag, parse_u32, required, require_fields};
use crate::tabular::{FromRow, Row, Table};

static NEXT_CATALOG_ID: AtomicU64 = AtomicU64::new(1);

/// Identificador único de una carga de catálogo dentro del proceso.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CatalogId(u64);

impl CatalogId {
    fn next() -> Self {
        CatalogId(NEXT_CATALOG_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Registro de la tabla de cursos:
/// `code, fall(0/1), spring(0/1), credits, workload, prereq*`
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRecord {
    pub course: Course,
}

impl FromRow for CatalogRecord {
    fn from_row(row: &Row) -> std::result::Result<Self, RowDefect> {
        let fields = row.populated();
        require_fields(fields, 5)?;

        let code = required(&fields[0], "code")?;
        let in_fall = parse_flag(&fields[1], "fall")?;
        let in_spring = parse_flag(&fields[2], "spring")?;
        let credits = parse_decimal(&fields[3], "credits")?;
        let workload = parse_u32(&fields[4], "workload")?;
        // repetidos en la misma fila se descartan, conservando el primer orden
        let mut prereqs: Vec<CourseCode> = Vec::new();
        for cell in fields[5..].iter().map(|c| c.trim()).filter(|c| !c.is_empty()) {
            if !prereqs.iter().any(|p| p.as_str() == cell) {
                prereqs.push(CourseCode::from(cell));
            }
        }

        Ok(CatalogRecord {
            course: Course {
                code: CourseCode::from(code),
                in_fall,
                in_spring,
                credits,
                workload,
                prereqs,
            },
        })
    }
}

/// Conjunto validado de cursos indexado por código. Inmutable tras `load`.
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    #[serde(skip)]
    id: CatalogId,
    courses: BTreeMap<CourseCode, Course>,
}

impl Catalog {
    /// Construye el catálogo desde la tabla de cursos.
    ///
    /// Los prerrequisitos pueden referenciar cursos que aparecen más abajo;
    /// la resolución se comprueba al final, junto con la ausencia de ciclos.
    pub fn load(table: &Table) -> Result<Self> {
        let mut courses: BTreeMap<CourseCode, Course> = BTreeMap::new();

        for row in table.data_rows() {
            let CatalogRecord { course } = table.parse_row::<CatalogRecord>(row)?;
            if courses.contains_key(course.code.as_str()) {
                return Err(ScheduleError::DuplicateCourse { code: course.code, line: row.line });
            }
            debug!(code = %course.code, prereqs = course.prereqs.len(), line = row.line, "curso leído");
            courses.insert(course.code.clone(), course);
        }

        let catalog = Catalog { id: CatalogId::next(), courses };
        catalog.check_prereqs_resolve()?;
        catalog.check_acyclic()?;

        info!(event = "catalog_loaded", table = %table.name, courses = catalog.len());
        Ok(catalog)
    }

    pub fn id(&self) -> CatalogId {
        self.id
    }

    pub fn lookup(&self, code: &str) -> Option<&Course> {
        self.courses.get(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.courses.contains_key(code)
    }

    /// Devuelve el código canónico o `UnknownCourse` con una sugerencia.
    pub fn resolve(&self, code: &str, referenced_from: impl Into<String>) -> Result<&CourseCode> {
        match self.courses.get_key_value(code) {
            Some((key, _)) => Ok(key),
            None => Err(ScheduleError::UnknownCourse {
                code: CourseCode::from(code),
                referenced_from: referenced_from.into(),
                suggestion: self.closest_code(code),
            }),
        }
    }

    pub fn iter(&self) -> Values<'_, CourseCode, Course> {
        self.courses.values()
    }

    pub fn codes(&self) -> impl Iterator<Item = &CourseCode> {
        self.courses.keys()
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Código más parecido (Jaro-Winkler ≥ 0.85), para los mensajes de error.
    fn closest_code(&self, code: &str) -> Option<CourseCode> {
        self.courses
            .keys()
            .map(|k| (k, strsim::jaro_winkler(&k.as_str().to_lowercase(), &code.to_lowercase())))
            .filter(|(_, score)| *score >= 0.85)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(k, _)| k.clone())
    }

    fn check_prereqs_resolve(&self) -> Result<()> {
        for course in self.courses.values() {
            for prereq in &course.prereqs {
                self.resolve(prereq.as_str(), format!("los prerrequisitos de {}", course.code))?;
            }
        }
        Ok(())
    }

    fn check_acyclic(&self) -> Result<()> {
        let mut graph: DiGraph<&CourseCode, ()> = DiGraph::new();
        let mut node_map: BTreeMap<&CourseCode, NodeIndex> = BTreeMap::new();

        for code in self.courses.keys() {
            node_map.insert(code, graph.add_node(code));
        }

        // arista prerrequisito -> curso
        for course in self.courses.values() {
            for prereq in &course.prereqs {
                if let (Some(&from), Some(&to)) = (node_map.get(prereq), node_map.get(&course.code)) {
                    graph.add_edge(from, to, ());
                }
            }
        }

        toposort(&graph, None)
            .map(|_| ())
            .map_err(|cycle| ScheduleError::PrerequisiteCycle { code: graph[cycle.node_id()].clone() })
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Course;
    type IntoIter = Values<'a, CourseCode, Course>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
