mod commands;
mod layout;
mod output;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use envelope_lib::{ContractConfig, ValidationPolicy};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "envelope")]
#[command(about = "Inspect and validate API response envelopes")]
struct Cli {
    /// Output format: table, json, csv, or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// Contract config file (TOML). Falls back to $ENVELOPE_CONFIG
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log paging violations instead of failing on them
    #[arg(long, global = true)]
    lenient: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode and validate an envelope file
    Inspect(commands::inspect::InspectArgs),
    /// Classify a reply body by its HTTP status
    Reply(commands::reply::ReplyArgs),
    /// Cut one page out of a JSON array
    Paginate(commands::paginate::PaginateArgs),
}

fn load_config(path: Option<&Path>, lenient: bool) -> Result<ContractConfig> {
    let path = path
        .map(Path::to_path_buf)
        .or_else(|| dotenvy::var("ENVELOPE_CONFIG").ok().map(PathBuf::from));
    let mut config = match path {
        Some(path) => ContractConfig::from_path(&path)?,
        None => ContractConfig::default(),
    };
    if lenient {
        config = config.with_policy(ValidationPolicy::Lenient);
    }
    Ok(config)
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("envelope=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        "csv" => OutputFormat::Csv,
        "markdown" | "md" => OutputFormat::Markdown,
        _ => OutputFormat::Table,
    };

    let config = load_config(cli.config.as_deref(), cli.lenient)?;

    match &cli.command {
        Commands::Inspect(args) => commands::inspect::run(args, &config, &format)?,
        Commands::Reply(args) => commands::reply::run(args, &format)?,
        Commands::Paginate(args) => commands::paginate::run(args, &config, &format)?,
    }

    Ok(())
}
