use std::path::{Path, PathBuf};

use build_schema_core::{Diagnostics, validate_model};
use build_schema_loader::{SchemaCatalog, SchemaLoader};
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "schema-check")]
#[command(about = "Load and check JSON build schemas", version)]
struct Cli {
    /// Log loader activity to stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load schema files and report their diagnostics.
    Check(CheckArgs),
    /// Print the resolved model of a schema file as JSON.
    Dump(DumpArgs),
    /// Load and compose every schema listed in a catalog file.
    Catalog(CatalogArgs),
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// Schema JSON files.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
    /// Fail when any warning is reported.
    #[arg(long)]
    deny_warnings: bool,
}

#[derive(Debug, Args)]
struct DumpArgs {
    /// Schema JSON file.
    input: PathBuf,
    /// Print compact JSON instead of pretty-printed JSON.
    #[arg(long)]
    compact: bool,
}

#[derive(Debug, Args)]
struct CatalogArgs {
    /// Catalog YAML file.
    catalog: PathBuf,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Check(args) => run_check(args),
        Command::Dump(args) => run_dump(args),
        Command::Catalog(args) => run_catalog(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_diagnostics(path: &Path, diagnostics: &Diagnostics) {
    for diagnostic in diagnostics {
        println!("{}: {}", path.display(), diagnostic);
    }
}

fn is_failure(diagnostics: &Diagnostics, deny_warnings: bool) -> bool {
    diagnostics.has_errors() || (deny_warnings && diagnostics.warning_count() > 0)
}

fn run_check(args: CheckArgs) -> Result<(), String> {
    let mut failed = 0usize;

    for input in &args.inputs {
        debug!(path = %input.display(), "checking schema");
        match SchemaLoader::load_path(input) {
            Ok(outcome) => {
                print_diagnostics(input, &outcome.diagnostics);
                if is_failure(&outcome.diagnostics, args.deny_warnings) {
                    failed += 1;
                } else {
                    println!(
                        "{}: ok ({} entities, {} warnings)",
                        input.display(),
                        outcome.model.entity_count(),
                        outcome.diagnostics.warning_count()
                    );
                }
            }
            Err(err) => {
                println!("{}: fatal: {err}", input.display());
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(format!("{failed} of {} schema(s) failed", args.inputs.len()));
    }
    Ok(())
}

fn run_dump(args: DumpArgs) -> Result<(), String> {
    let outcome = SchemaLoader::load_path(&args.input)
        .map_err(|e| format!("failed to load {}: {e}", args.input.display()))?;

    let document = serde_json::json!({
        "model": outcome.model,
        "diagnostics": outcome.diagnostics,
    });
    let text = if args.compact {
        serde_json::to_string(&document)
    } else {
        serde_json::to_string_pretty(&document)
    }
    .map_err(|e| format!("failed to serialize model: {e}"))?;

    println!("{text}");
    Ok(())
}

fn run_catalog(args: CatalogArgs) -> Result<(), String> {
    let catalog = SchemaCatalog::from_file(&args.catalog)
        .map_err(|e| format!("failed to read catalog {}: {e}", args.catalog.display()))?;
    let base_dir = args
        .catalog
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();

    let outcome = catalog.load(&base_dir).map_err(|e| e.to_string())?;
    for file in &outcome.files {
        print_diagnostics(&file.path, &file.diagnostics);
    }
    for problem in validate_model(&outcome.model) {
        println!("{}: composed model: {problem}", args.catalog.display());
    }

    println!(
        "{} schemas composed: {} properties, {} items, {} targets, {} errors, {} warnings",
        outcome.files.len(),
        outcome.model.properties.len(),
        outcome.model.items.len(),
        outcome.model.targets.len(),
        outcome.error_count(),
        outcome.warning_count()
    );

    if !catalog.accepts(&outcome) {
        return Err("catalog check failed".to_string());
    }
    Ok(())
}
