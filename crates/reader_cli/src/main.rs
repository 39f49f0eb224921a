mod commands;
mod output;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "vread")]
#[command(version, about = "Validated Reader CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Where and how to read a dataset.
#[derive(Args)]
pub struct SourceArgs {
    /// Location of the data (file or directory)
    pub location: String,

    /// Data format: csv, json, parquet
    #[arg(short, long, default_value = "csv")]
    pub format: String,

    /// Reader option as key=value, applied in order (repeatable)
    #[arg(short = 'o', long = "option", value_parser = commands::parse_option)]
    pub options: Vec<(String, String)>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a dataset and print its dtypes and row count
    Read {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Check column names and types against an expected schema
    Schema {
        #[command(flatten)]
        source: SourceArgs,

        /// Expected column as name:type (repeatable)
        #[arg(short, long = "column", required = true)]
        columns: Vec<String>,

        /// Match each column's type instead of the set of types
        #[arg(long)]
        per_column: bool,
    },

    /// Check that columns contain no nulls
    NotNull {
        #[command(flatten)]
        source: SourceArgs,

        /// Column that must not contain nulls (repeatable)
        #[arg(short, long = "column", required = true)]
        columns: Vec<String>,
    },

    /// Check that a combination of columns is unique
    Unique {
        #[command(flatten)]
        source: SourceArgs,

        /// Column of the unique combination (repeatable)
        #[arg(short, long = "column", required = true)]
        columns: Vec<String>,
    },

    /// Run a read request file against its data
    Run {
        /// Path to the request file (YAML or TOML)
        request: String,

        /// Stop at the first failing check
        #[arg(long)]
        fail_fast: bool,

        /// Only check the schema, skip the data passes
        #[arg(long)]
        schema_only: bool,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Check a request file without reading data
    Check {
        /// Path to the request file (YAML or TOML)
        request: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(filter)
        .init();

    match cli.command {
        Commands::Read { source } => commands::read::execute(&source).await,

        Commands::Schema {
            source,
            columns,
            per_column,
        } => commands::validate::schema(&source, &columns, per_column).await,

        Commands::NotNull { source, columns } => {
            commands::validate::not_null(&source, &columns).await
        }

        Commands::Unique { source, columns } => commands::validate::unique(&source, &columns).await,

        Commands::Run {
            request,
            fail_fast,
            schema_only,
            format,
        } => commands::run::execute(&request, fail_fast, schema_only, &format).await,

        Commands::Check { request } => commands::check::execute(&request),
    }
}
