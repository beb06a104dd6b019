// Renderizado del modelo en los tres artefactos de entrada del solver.
//
// - `schedule.dat`: catálogo + categorías de requisitos
// - `user.dat`: aprobados + escalares del usuario
// - `pinned.dat`: fijaciones por semestre
//
// Cada artefacto recibe un subconjunto con nombre del modelo
// (`Artifact::context`). `DatRenderer` produce sintaxis de datos AMPL;
// `JsonRenderer` vuelca los parámetros con nombre tal cual.

use std::fmt::Write as _;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use serde_json::json;
use tracing::info;

use crate::assembler::ScheduleModel;
use crate::error::Result;

/// Artefactos generados, en orden de emisión.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    Schedule,
    User,
    Pinned,
}

impl Artifact {
    pub const ALL: [Artifact; 3] = [Artifact::Schedule, Artifact::User, Artifact::Pinned];

    pub fn file_name(self) -> &'static str {
        match self {
            Artifact::Schedule => "schedule.dat",
            Artifact::User => "user.dat",
            Artifact::Pinned => "pinned.dat",
        }
    }

    /// Parámetros con nombre que recibe la plantilla del artefacto.
    pub fn context(self, model: &ScheduleModel) -> serde_json::Value {
        match self {
            Artifact::Schedule => json!({
                "courses": model.catalog().iter().collect::<Vec<_>>(),
                "major_reqs": model.requirements().major,
                "hsa_reqs": model.requirements().hsa,
                "core_reqs": model.requirements().core,
            }),
            Artifact::User => {
                let s = model.settings();
                json!({
                    "taken": model.taken(),
                    "semesters_left": s.semesters_left,
                    "min_credits": s.min_credits,
                    "max_credits": s.max_credits,
                    "next_semester_is_fall": s.next_semester_is_fall,
                })
            }
            Artifact::Pinned => json!({
                "semesters_left": model.pinned().semesters_left(),
                "pinned": model.pinned(),
            }),
        }
    }
}

/// Colaborador externo que convierte un artefacto en texto.
pub trait Renderer {
    fn render(&self, artifact: Artifact, model: &ScheduleModel) -> Result<String>;
}

/// Vuelca el contexto de cada artefacto como JSON legible.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, artifact: Artifact, model: &ScheduleModel) -> Result<String> {
        let mut out = serde_json::to_string_pretty(&artifact.context(model))?;
        out.push('\n');
        Ok(out)
    }
}

/// Sintaxis de datos AMPL (`set ... := ... ;`, `param ... := ... ;`).
/// El orden de salida es determinista (todo se recorre ordenado por código).
#[derive(Debug, Clone, Copy, Default)]
pub struct DatRenderer;

/// Símbolo AMPL: sin comillas si sólo usa caracteres válidos sin comillas.
/// Lo que se leería como número (`101`, `1e5`) va siempre entre comillas.
fn symbol(s: &str) -> String {
    let bare = !s.is_empty()
        && s.parse::<f64>().is_err()
        && s.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '+'));
    if bare {
        s.to_string()
    } else {
        format!("'{}'", s.replace('\'', "''"))
    }
}

fn flag(b: bool) -> u8 {
    if b { 1 } else { 0 }
}

fn write_set<'a, I>(out: &mut String, name: &str, members: I)
where
    I: IntoIterator<Item = &'a str>,
{
    let _ = write!(out, "set {} :=", name);
    for m in members {
        let _ = write!(out, " {}", symbol(m));
    }
    out.push_str(" ;\n");
}

impl DatRenderer {
    fn schedule(model: &ScheduleModel) -> String {
        let mut out = String::from("# catálogo y requisitos\n\n");
        let catalog = model.catalog();

        write_set(&mut out, "COURSES", catalog.codes().map(|c| c.as_str()));
        out.push('\n');

        out.push_str("param: in_fall in_spring credits workload :=\n");
        for course in catalog {
            let _ = writeln!(
                out,
                "  {} {} {} {} {}",
                symbol(course.code.as_str()),
                flag(course.in_fall),
                flag(course.in_spring),
                course.credits,
                course.workload,
            );
        }
        out.push_str(";\n\n");

        for course in catalog {
            write_set(
                &mut out,
                &format!("PREREQS[{}]", symbol(course.code.as_str())),
                course.prereqs.iter().map(|p| p.as_str()),
            );
        }
        out.push('\n');

        let reqs = model.requirements();
        write_set(&mut out, "MAJOR_REQS", reqs.major.iter().map(String::as_str));
        write_set(&mut out, "HSA_REQS", reqs.hsa.iter().map(String::as_str));
        write_set(&mut out, "CORE_REQS", reqs.core.iter().map(String::as_str));
        out
    }

    fn user(model: &ScheduleModel) -> String {
        let s = model.settings();
        let mut out = String::from("# restricciones del usuario\n\n");
        let _ = writeln!(out, "param semesters_left := {} ;", s.semesters_left);
        let _ = writeln!(out, "param min_credits := {} ;", s.min_credits);
        let _ = writeln!(out, "param max_credits := {} ;", s.max_credits);
        let _ = writeln!(out, "param next_is_fall := {} ;", flag(s.next_semester_is_fall));
        out.push('\n');
        write_set(&mut out, "TAKEN", model.taken().iter().map(|c| c.as_str()));
        out
    }

    fn pinned(model: &ScheduleModel) -> String {
        let pinned = model.pinned();
        let mut out = String::from("# cursos fijados: 1 = cursar, 0 = no cursar\n\n");
        out.push_str("set SEMESTERS :=");
        for s in pinned.semesters().filter(|s| *s > 0) {
            let _ = write!(out, " {}", s);
        }
        out.push_str(" ;\n\n");

        out.push_str("param: PINNED: pin :=\n");
        for (semester, code, take) in pinned.iter() {
            let _ = writeln!(out, "  {} {} {}", symbol(code.as_str()), semester, flag(take));
        }
        out.push_str(";\n");
        out
    }
}

impl Renderer for DatRenderer {
    fn render(&self, artifact: Artifact, model: &ScheduleModel) -> Result<String> {
        Ok(match artifact {
            Artifact::Schedule => Self::schedule(model),
            Artifact::User => Self::user(model),
            Artifact::Pinned => Self::pinned(model),
        })
    }
}

/// Destino de los artefactos renderizados.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Dry run: todo a stdout, cada artefacto precedido por `# ==> nombre`.
    Stdout,
    /// Directorio de build; se crea si no existe.
    Directory(PathBuf),
}

/// Renderiza los tres artefactos y sólo entonces los escribe. Devuelve las
/// rutas escritas (vacío en dry run).
pub fn emit(model: &ScheduleModel, renderer: &dyn Renderer, target: &OutputTarget) -> Result<Vec<PathBuf>> {
    let rendered = render_all(model, renderer)?;

    match target {
        OutputTarget::Stdout => {
            let stdout = std::io::stdout();
            write_dry_run(&mut stdout.lock(), &rendered)?;
            Ok(Vec::new())
        }
        OutputTarget::Directory(dir) => {
            fs::create_dir_all(dir)?;
            let mut written = Vec::new();
            for (artifact, text) in &rendered {
                let path = dir.join(artifact.file_name());
                fs::write(&path, text)?;
                info!(event = "artifact_written", path = %path.display(), bytes = text.len());
                written.push(path);
            }
            Ok(written)
        }
    }
}

pub fn render_all(model: &ScheduleModel, renderer: &dyn Renderer) -> Result<Vec<(Artifact, String)>> {
    Artifact::ALL
        .iter()
        .map(|a| renderer.render(*a, model).map(|text| (*a, text)))
        .collect()
}

/// Escribe la salida de dry run en `w`.
pub fn write_dry_run<W: Write>(w: &mut W, rendered: &[(Artifact, String)]) -> Result<()> {
    for (artifact, text) in rendered {
        writeln!(w, "# ==> {}", artifact.file_name())?;
        w.write_all(text.as_bytes())?;
    }
    w.flush()?;
    Ok(())
}
