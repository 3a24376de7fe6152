//! Metlink CLI: integrate a parsed model against reference tables.
//!
//! Usage:
//!   metlink integrate --model model.json --tables tables.json --curation cc.tsv [--config cfg.yaml]
//!   metlink components --curation cc.tsv

use clap::{Parser, Subcommand};
use metlink::config::load_document;
use metlink::{Biodb, ConnectedComponents, IntegrationConfig, ModelIntegration, ModelSnapshot, ReferenceTables};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "metlink",
    version,
    about = "Identifier integration for imported metabolic models"
)]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve species and reactions of a model
    Integrate {
        /// Parsed model (species and reactions), JSON or YAML
        #[arg(long)]
        model: PathBuf,
        /// Reference tables exported by the database service, JSON or YAML
        #[arg(long)]
        tables: PathBuf,
        /// Curated equivalence classes, one tab-separated group per line
        #[arg(long)]
        curation: PathBuf,
        /// Run configuration, JSON or YAML
        #[arg(long)]
        config: Option<PathBuf>,
        /// Never override a species' own reference during propagation
        #[arg(long)]
        no_strict: bool,
        /// Write the result here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the equivalence classes of a curation file
    Components {
        #[arg(long)]
        curation: PathBuf,
    },
}

fn cmd_integrate(
    model: &Path,
    tables: &Path,
    curation: &Path,
    config: Option<&Path>,
    no_strict: bool,
    output: Option<&Path>,
) -> Result<(), String> {
    let mut config = match config {
        Some(path) => IntegrationConfig::load(path).map_err(|e| format!("Failed to load config: {}", e))?,
        None => IntegrationConfig::default(),
    };
    if no_strict {
        config.strict_propagation = false;
    }

    let snapshot: ModelSnapshot = load_document(model).map_err(|e| format!("Failed to load model: {}", e))?;
    let tables: ReferenceTables = load_document(tables).map_err(|e| format!("Failed to load tables: {}", e))?;
    let (components, _) =
        ConnectedComponents::load(curation).map_err(|e| format!("Failed to load curation file: {}", e))?;

    let integration = ModelIntegration::new(Arc::new(Biodb::new(tables)), Arc::new(components)).with_config(config);
    let result = integration.integrate(&snapshot.species, &snapshot.reactions);

    let json = serde_json::to_string_pretty(&result).map_err(|e| format!("Failed to serialize result: {}", e))?;
    match output {
        Some(path) => std::fs::write(path, json).map_err(|e| format!("Failed to write {}: {}", path.display(), e))?,
        None => println!("{}", json),
    }
    Ok(())
}

fn cmd_components(curation: &Path) -> Result<(), String> {
    let (components, stats) =
        ConnectedComponents::load(curation).map_err(|e| format!("Failed to load curation file: {}", e))?;
    for class in components.components() {
        println!("{}", class.into_iter().collect::<Vec<_>>().join("\t"));
    }
    eprintln!(
        "{} classes, {} identifiers ({} lines, {} skipped)",
        components.component_count(),
        components.len(),
        stats.lines,
        stats.skipped
    );
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let outcome = match cli.command {
        Commands::Integrate {
            model,
            tables,
            curation,
            config,
            no_strict,
            output,
        } => cmd_integrate(&model, &tables, &curation, config.as_deref(), no_strict, output.as_deref()),
        Commands::Components { curation } => cmd_components(&curation),
    };

    if let Err(e) = outcome {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
