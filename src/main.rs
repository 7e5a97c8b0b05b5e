use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use dynamic_mapper::{
    config::{GeneratorConfig, RowAccess},
    emit::{FileEmitter, MemoryEmitter},
    error::ScanError,
    model::ModelDefinition,
    run::{GenerationReport, Generator},
    scan::{scan_schema_file, scan_source_file},
};
use log::{LevelFilter, info};

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Log every scanned model and emitted unit
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate table descriptors and mapper traits
    Generate(GenerateArgs),
    /// Scan and generate in memory, reporting problems without writing files
    Check(InputArgs),
}

#[derive(Args, Clone)]
struct InputArgs {
    /// TOML schema with `[[model]]` entries
    #[arg(long, conflicts_with = "source", required_unless_present = "source")]
    schema: Option<PathBuf>,
    /// Rust file with `#[dynamic_model]` structs
    #[arg(long)]
    source: Option<PathBuf>,
    /// Module path of the models in `--source`
    #[arg(long, default_value = "crate")]
    package: String,
    /// Exit with an error when any input or artifact fails
    #[arg(long)]
    strict: bool,
}

#[derive(Args, Clone)]
struct GenerateArgs {
    #[command(flatten)]
    input: InputArgs,
    /// Output directory; generated files go below it by package
    #[arg(long, short, required_unless_present = "dry_run")]
    out_dir: Option<PathBuf>,
    /// Generator config file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides `runtime_path` from the config file
    #[arg(long)]
    runtime_path: Option<String>,
    /// Overrides `row_access` from the config file
    #[arg(long, value_enum)]
    row_access: Option<RowAccess>,
    /// Print generated units to stdout instead of writing them
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .parse_default_env()
        .init();

    match cli.command {
        Commands::Generate(args) => generate(args),
        Commands::Check(args) => check(args),
    }
}

fn scan(input: &InputArgs) -> Result<Vec<Result<ModelDefinition, ScanError>>> {
    let inputs = match (&input.schema, &input.source) {
        (Some(schema), _) => scan_schema_file(schema)
            .with_context(|| format!("reading schema {}", schema.display()))?,
        (None, Some(source)) => scan_source_file(source, &input.package)
            .with_context(|| format!("reading source {}", source.display()))?,
        (None, None) => bail!("either --schema or --source is required"),
    };
    Ok(inputs)
}

fn load_config(args: &GenerateArgs) -> Result<GeneratorConfig> {
    let mut config = match &args.config {
        Some(path) => GeneratorConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GeneratorConfig::default(),
    };
    if let Some(runtime_path) = &args.runtime_path {
        config.runtime_path = runtime_path.clone();
    }
    if let Some(row_access) = args.row_access {
        config.row_access = row_access;
    }
    Ok(config)
}

fn generate(args: GenerateArgs) -> Result<()> {
    let config = load_config(&args)?;
    let inputs = scan(&args.input)?;
    let generator = Generator::new(config);

    let report = if args.dry_run {
        let mut emitter = MemoryEmitter::new();
        let report = generator.run(inputs, &mut emitter);
        for unit in emitter.units() {
            println!("// {} -> {}", unit, unit.file_name);
            println!("{}", unit.body);
        }
        report
    } else {
        let out_dir = args.out_dir.context("--out-dir is required")?;
        generator.run(inputs, &mut FileEmitter::new(out_dir))
    };

    finish(&report, args.input.strict)
}

fn check(args: InputArgs) -> Result<()> {
    let report = Generator::default().run(scan(&args)?, &mut MemoryEmitter::new());
    for model in &report.models {
        info!("ok: {model}");
    }
    finish(&report, args.strict)
}

fn finish(report: &GenerationReport, strict: bool) -> Result<()> {
    for diagnostic in &report.diagnostics {
        eprintln!("{diagnostic}");
    }
    info!(
        "{} models, {} artifacts, {} diagnostics",
        report.models.len(),
        report.emitted.len(),
        report.diagnostics.len()
    );
    if strict && !report.is_clean() {
        bail!("{} diagnostics reported", report.diagnostics.len());
    }
    Ok(())
}
