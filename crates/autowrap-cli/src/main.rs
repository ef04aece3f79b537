//! Command-line interface for contract and wrapper generation

use anyhow::{bail, Context, Result};
use autowrap_codegen::{CodeGenerator, ContractGenerator, GeneratorConfig, TypeGenerator, TypeRegistry};
use autowrap_core::{AssemblyMetadata, MetadataDiscovery, TypeDescriptor};
use clap::{Parser, Subcommand, ValueEnum};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "autowrap")]
#[command(about = "Generate contracts and forwarding wrappers from type metadata")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable quiet mode (suppress non-error output)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Set log level
    #[arg(long, global = true, value_enum)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Debug)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate C# source for the selected types
    Generate {
        /// Metadata file, or a directory to scan for `*.metadata.json` files
        #[arg(long)]
        metadata: PathBuf,
        /// Generator configuration (TOML)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Full name of a type to wrap; all eligible types when omitted
        #[arg(long = "type")]
        types: Vec<String>,
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Make both contracts and wrappers public
        #[arg(long)]
        public: bool,
    },
    /// Print the contract and wrapper declarations of a type as JSON
    Inspect {
        /// Metadata file
        #[arg(long)]
        metadata: PathBuf,
        /// Full name of the type to inspect
        #[arg(long = "type")]
        type_name: String,
        /// Generator configuration (TOML)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli);

    match cli.command {
        Commands::Generate {
            metadata,
            config,
            types,
            output,
            public,
        } => handle_generate_command(&metadata, config.as_deref(), &types, output.as_deref(), public),
        Commands::Inspect {
            metadata,
            type_name,
            config,
        } => handle_inspect_command(&metadata, &type_name, config.as_deref()),
    }
}

fn init_logging(cli: &Cli) {
    let log_level = if cli.quiet {
        log::LevelFilter::Error
    } else if cli.verbose {
        log::LevelFilter::Debug
    } else {
        match &cli.log_level {
            Some(LogLevel::Error) => log::LevelFilter::Error,
            Some(LogLevel::Warn) => log::LevelFilter::Warn,
            Some(LogLevel::Info) => log::LevelFilter::Info,
            Some(LogLevel::Debug) => log::LevelFilter::Debug,
            Some(LogLevel::Trace) => log::LevelFilter::Trace,
            None => log::LevelFilter::Warn,
        }
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format_timestamp_secs()
        .init();
}

fn load_config(path: Option<&Path>) -> Result<GeneratorConfig> {
    match path {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            GeneratorConfig::from_file(path).with_context(|| format!("Invalid configuration: {}", path.display()))
        }
        None => Ok(GeneratorConfig::default()),
    }
}

fn load_assemblies(metadata: &Path) -> Result<Vec<AssemblyMetadata>> {
    if metadata.is_dir() {
        let mut discovery = MetadataDiscovery::new();
        discovery.add_search_path(metadata);
        let assemblies = discovery.discover()?;
        if assemblies.is_empty() {
            warn!("No metadata files found under {}", metadata.display());
        }
        Ok(assemblies)
    } else {
        Ok(vec![AssemblyMetadata::from_file(metadata)?])
    }
}

fn find_type<'a>(assemblies: &'a [AssemblyMetadata], full_name: &str) -> Result<&'a dyn TypeDescriptor> {
    assemblies
        .iter()
        .find_map(|assembly| assembly.find_type(full_name))
        .map(|found| found as &dyn TypeDescriptor)
        .with_context(|| format!("Type not found in metadata: {}", full_name))
}

fn handle_generate_command(
    metadata: &Path,
    config: Option<&Path>,
    types: &[String],
    output: Option<&Path>,
    public: bool,
) -> Result<()> {
    let mut config = load_config(config)?;
    if public {
        config.contract_public = true;
        config.type_public = true;
    }

    let assemblies = load_assemblies(metadata)?;
    let mut registry = TypeRegistry::new();

    if types.is_empty() {
        let forbidden = config.forbidden_base_types();
        for assembly in &assemblies {
            registry.register_assembly(assembly, &forbidden)?;
        }
    } else {
        for full_name in types {
            registry.register(find_type(&assemblies, full_name)?, None, None)?;
        }
    }

    if registry.is_empty() {
        bail!("No types selected for generation");
    }

    let source = CodeGenerator::new(&config).generate_source(&registry)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
            }
            fs::write(path, &source).with_context(|| format!("Failed to write output file: {}", path.display()))?;
            info!("Wrote {} wrapped types to {}", registry.len(), path.display());
        }
        None => print!("{}", source),
    }

    Ok(())
}

fn handle_inspect_command(metadata: &Path, type_name: &str, config: Option<&Path>) -> Result<()> {
    let config = load_config(config)?;
    let assemblies = load_assemblies(metadata)?;
    let original = find_type(&assemblies, type_name)?;

    let mut registry = TypeRegistry::new();
    registry.register(original, None, None)?;

    let contract = ContractGenerator::new(config.contract_options()).generate_declaration(&registry, original)?;
    let wrapper = TypeGenerator::new(config.type_options()).generate_declaration(&registry, original)?;

    let report = serde_json::json!({
        "contract": contract,
        "type": wrapper,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
