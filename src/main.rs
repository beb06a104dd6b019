// --- Generador de datos para el solver de horarios - Archivo principal ---

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use schedgen::{GeneratorConfig, OutputFormat};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schedgen")]
#[command(about = "Genera los .dat del solver de horarios a partir de las tablas de cursos")]
#[command(version)]
struct Cli {
    #[arg(long, value_name = "DIR", help = "Directorio de las tablas de entrada")]
    data_dir: Option<PathBuf>,
    #[arg(long, value_name = "DIR", help = "Directorio donde escribir los artefactos")]
    build_dir: Option<PathBuf>,
    #[arg(long, value_name = "FILE", help = "Tabla de cursos")]
    catalog: Option<String>,
    #[arg(long, value_name = "FILE", help = "Tabla de usuario (aprobados, configuración, fijaciones)")]
    user: Option<String>,
    #[arg(long, value_name = "FILE", help = "Tabla de requisitos")]
    requirements: Option<String>,
    #[arg(long, short = 'n', help = "Escribir los artefactos en stdout en vez del directorio de build")]
    dry_run: bool,
    #[arg(long, short, value_enum, default_value = "dat", help = "Formato de salida")]
    format: OutputFormat,
    #[arg(long, help = "Sólo validar y mostrar el resumen del modelo")]
    summary: bool,
}

impl Cli {
    fn into_config(self, mut cfg: GeneratorConfig) -> GeneratorConfig {
        if let Some(d) = self.data_dir {
            cfg.data_dir = d;
        }
        if let Some(d) = self.build_dir {
            cfg.build_dir = d;
        }
        if let Some(f) = self.catalog {
            cfg.catalog_file = f;
        }
        if let Some(f) = self.user {
            cfg.user_file = f;
        }
        if let Some(f) = self.requirements {
            cfg.requirements_file = f;
        }
        cfg.dry_run = self.dry_run;
        cfg.format = self.format;
        cfg
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("schedgen=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    // .env es opcional
    dotenv::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let summary_only = cli.summary;
    let config = cli.into_config(GeneratorConfig::from_env());

    let result = if summary_only {
        schedgen::load_model(&config).map(|model| {
            println!("{}", model.summary());
            for w in model.offering_warnings() {
                println!("aviso: {}", w);
            }
        })
    } else {
        schedgen::generate(&config).map(|written| {
            for path in written {
                println!("escrito {}", path.display());
            }
        })
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
