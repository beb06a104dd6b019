// Biblioteca raíz del crate `schedgen`.
// Lee las tablas de cursos, usuario y requisitos, las valida entre sí y
// ensambla el modelo que se renderiza como entrada del solver de horarios.
pub mod error;
pub mod models;
pub mod tabular;
pub mod catalog;
pub mod user;
pub mod requirements;
pub mod assembler;
pub mod render;
pub mod config;

pub use assembler::{ModelWarning, ScheduleModel};
pub use catalog::Catalog;
pub use config::{GeneratorConfig, OutputFormat};
pub use error::{Result, RowDefect, ScheduleError};
pub use models::{code_of, Course, CourseCode, Season, UserSettings};
pub use render::{DatRenderer, JsonRenderer, OutputTarget, Renderer};
pub use requirements::{read_requirements, RequirementIndex};
pub use user::{read_pinned, read_settings, read_taken, PinningMap, TakenSet};

use std::path::PathBuf;

use tracing::{info, warn};

use tabular::Table;

/// Construye el modelo a partir de las tres tablas ya leídas.
///
/// El catálogo se construye primero; aprobados y fijaciones se validan contra
/// él y los requisitos se leen por separado.
pub fn build_model(catalog_table: &Table, user_table: &Table, requirements_table: &Table) -> Result<ScheduleModel> {
    let catalog = Catalog::load(catalog_table)?;
    let taken = read_taken(user_table, &catalog)?;
    let settings = read_settings(user_table)?;
    let pinned = read_pinned(user_table, &catalog, settings.semesters_left)?;
    let requirements = read_requirements(requirements_table)?;

    ScheduleModel::assemble(catalog, taken, pinned, requirements, settings)
}

/// Lee las entradas indicadas en `config` y ensambla el modelo. Los avisos
/// no fatales se registran con `warn!`.
pub fn load_model(config: &GeneratorConfig) -> Result<ScheduleModel> {
    let catalog_table = Table::from_path(&config.catalog_path()?)?;
    let user_table = Table::from_path(&config.user_path()?)?;
    let requirements_table = Table::from_path(&config.requirements_path()?)?;

    let model = build_model(&catalog_table, &user_table, &requirements_table)?;
    info!(event = "model_assembled", "{}", model.summary());
    for w in model.offering_warnings() {
        warn!("{}", w);
    }
    Ok(model)
}

/// Ejecución completa: cargar, validar y emitir los artefactos.
pub fn generate(config: &GeneratorConfig) -> Result<Vec<PathBuf>> {
    let model = load_model(config)?;

    let renderer: &dyn Renderer = match config.format {
        OutputFormat::Dat => &DatRenderer,
        OutputFormat::Json => &JsonRenderer,
    };
    let target = if config.dry_run {
        OutputTarget::Stdout
    } else {
        OutputTarget::Directory(config.build_dir.clone())
    };

    render::emit(&model, renderer, &target)
}
