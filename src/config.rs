// Configuración del generador: rutas de entrada/salida y modo de salida.
//
// Orden de precedencia: flags de la CLI > variables de entorno (incluido un
// `.env` cargado con `dotenv`) > valores por defecto.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use tracing::debug;

use crate::error::{Result, ScheduleError};

pub const DEFAULT_DATA_DIR: &str = "dat";
pub const DEFAULT_BUILD_DIR: &str = "build";
pub const DEFAULT_CATALOG_FILE: &str = "course-list.csv";
pub const DEFAULT_USER_FILE: &str = "user.csv";
pub const DEFAULT_REQUIREMENTS_FILE: &str = "requirements.csv";

/// Formato de los artefactos generados.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Datos AMPL para el solver
    #[default]
    Dat,
    /// Parámetros con nombre en JSON (depuración)
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub data_dir: PathBuf,
    pub build_dir: PathBuf,
    pub catalog_file: String,
    pub user_file: String,
    pub requirements_file: String,
    pub dry_run: bool,
    pub format: OutputFormat,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            build_dir: PathBuf::from(DEFAULT_BUILD_DIR),
            catalog_file: DEFAULT_CATALOG_FILE.to_string(),
            user_file: DEFAULT_USER_FILE.to_string(),
            requirements_file: DEFAULT_REQUIREMENTS_FILE.to_string(),
            dry_run: false,
            format: OutputFormat::Dat,
        }
    }
}

impl GeneratorConfig {
    /// Defaults sobreescritos por `SCHEDGEN_*` del entorno. El `.env` lo carga
    /// `main` antes de llamar aquí.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Igual que `from_env` pero con una función de búsqueda inyectable (tests).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = GeneratorConfig::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("SCHEDGEN_DATA_DIR") {
            cfg.data_dir = PathBuf::from(v);
        }
        if let Some(v) = get("SCHEDGEN_BUILD_DIR") {
            cfg.build_dir = PathBuf::from(v);
        }
        if let Some(v) = get("SCHEDGEN_CATALOG") {
            cfg.catalog_file = v;
        }
        if let Some(v) = get("SCHEDGEN_USER") {
            cfg.user_file = v;
        }
        if let Some(v) = get("SCHEDGEN_REQUIREMENTS") {
            cfg.requirements_file = v;
        }
        cfg
    }

    /// Resuelve un archivo de entrada: si el nombre existe tal cual se usa
    /// directamente, si no se busca dentro de `data_dir`.
    pub fn resolve_input(&self, name: &str) -> Result<PathBuf> {
        let direct = Path::new(name);
        if direct.is_file() {
            return Ok(direct.to_path_buf());
        }

        let candidate = self.data_dir.join(name);
        if candidate.is_file() {
            debug!(path = %candidate.display(), "entrada resuelta en data_dir");
            return Ok(candidate);
        }

        Err(ScheduleError::MissingInput { path: candidate })
    }

    pub fn catalog_path(&self) -> Result<PathBuf> {
        self.resolve_input(&self.catalog_file)
    }

    pub fn user_path(&self) -> Result<PathBuf> {
        self.resolve_input(&self.user_file)
    }

    pub fn requirements_path(&self) -> Result<PathBuf> {
        self.resolve_input(&self.requirements_file)
    }
}
