//! Command-line interface for tagged-csv
//!
//! # Usage Examples
//!
//! ```bash
//! # List the header columns of a file
//! tagged-csv headers people.csv
//!
//! # Check every row against an ad-hoc column mapping
//! tagged-csv validate people.csv \
//!   --column name=text \
//!   --column active=bool \
//!   --column age=i32:Age
//!
//! # Same, with the mapping kept in a descriptor file
//! tagged-csv validate people.csv --descriptor person.yaml
//!
//! # Decode on the rayon pool for large files
//! TAGGED_CSV_PARALLEL_THRESHOLD=10000 tagged-csv validate big.csv --descriptor big.yaml
//! ```
//!
//! ## Descriptor Format
//! ```yaml
//! name: Person
//! fields:
//!   - field: name
//!     type: String
//!     kind: text
//!     column: name
//!   - field: cache
//!     type: Vec<String>
//! ```
//!
//! Logging is controlled with `RUST_LOG` (e.g. `RUST_LOG=tagged_csv=debug`).

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tagged_csv::validate::{descriptor_from_columns, validate_rows, ColumnSpec};
use tagged_csv::{Config, LocalFile, RecordDescriptor, TypeDescriptor};
use tagged_csv_file::DEFAULT_BUFFER_SIZE;

#[derive(Parser)]
#[command(name = "tagged-csv")]
#[command(about = "Inspect CSV files and validate them against a column mapping")]
#[command(long_about = None)]
struct Cli {
    /// Decode rows in parallel once a file has at least this many data rows
    #[arg(long, global = true, env = "TAGGED_CSV_PARALLEL_THRESHOLD")]
    parallel_threshold: Option<usize>,

    /// Read buffer size in bytes
    #[arg(long, global = true, env = "TAGGED_CSV_BUFFER_SIZE", default_value_t = DEFAULT_BUFFER_SIZE)]
    buffer_size: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print each header column with its index
    Headers {
        /// CSV file to inspect
        file: PathBuf,
    },

    /// Decode every row against a mapping and report the first failure
    Validate {
        /// CSV file to validate
        file: PathBuf,

        /// Column mapping (format: FIELD=KIND[:COLUMN], repeatable)
        #[arg(
            long = "column",
            value_name = "FIELD=KIND[:COLUMN]",
            required_unless_present = "descriptor",
            conflicts_with = "descriptor"
        )]
        columns: Vec<ColumnSpec>,

        /// YAML record descriptor
        #[arg(long, value_name = "PATH")]
        descriptor: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config {
        parallel_threshold: cli.parallel_threshold,
        buffer_size: cli.buffer_size,
    };

    match cli.command {
        Commands::Headers { file } => run_headers(file, &config),
        Commands::Validate {
            file,
            columns,
            descriptor,
        } => run_validate(file, columns, descriptor, &config),
    }
}

fn run_headers(file: PathBuf, config: &Config) -> anyhow::Result<()> {
    let rows = LocalFile::new(&file)
        .with_buffer_size(config.buffer_size)
        .read_all()
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let Some(header) = rows.first() else {
        bail!("{} has no header row", file.display());
    };

    for (index, column) in header.iter().enumerate() {
        println!("{index}\t{column}");
    }
    Ok(())
}

fn run_validate(
    file: PathBuf,
    columns: Vec<ColumnSpec>,
    descriptor: Option<PathBuf>,
    config: &Config,
) -> anyhow::Result<()> {
    let descriptor = match descriptor {
        Some(path) => RecordDescriptor::from_yaml_file(&path)
            .with_context(|| format!("Failed to load descriptor from {}", path.display()))?,
        None => descriptor_from_columns(&columns),
    };
    tracing::info!(
        "Validating {} against {} ({} fields)",
        file.display(),
        descriptor.name,
        descriptor.fields.len()
    );

    let rows = LocalFile::new(&file)
        .with_buffer_size(config.buffer_size)
        .read_all()
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let descriptor = TypeDescriptor::Record(descriptor);
    let valid = validate_rows(&descriptor, &rows, config)
        .with_context(|| format!("{} failed validation", file.display()))?;

    println!("{valid} valid rows");
    Ok(())
}
