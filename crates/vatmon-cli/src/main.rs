mod commands;
mod output;

use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "vatmon",
    version,
    about = "VAT registration threshold monitor for cross-border sales"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Where sales data comes from and how it is read.
#[derive(Args, Clone)]
pub struct InputArgs {
    /// Path to a CSV or XLSX file with Country and Sales_EUR columns (demo data if omitted)
    pub input_file: Option<PathBuf>,

    /// Field delimiter for CSV input
    #[arg(short, long, default_value = ",")]
    pub delimiter: char,

    /// Worksheet to read from an XLSX file (default: first sheet)
    #[arg(long, value_name = "NAME")]
    pub sheet: Option<String>,

    /// Fail on the first malformed row instead of skipping it
    #[arg(long)]
    pub strict: bool,
}

/// Threshold selection shared by analysis commands.
#[derive(Args, Clone)]
pub struct ThresholdArgs {
    /// Predefined threshold: eu-oss (default), us-nexus
    #[arg(short, long = "preset", value_name = "NAME", conflicts_with = "config")]
    pub preset: Option<String>,

    /// Custom JSON threshold file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the registration limit
    #[arg(short, long)]
    pub limit: Option<Decimal>,

    /// Override the warning ratio (0 < ratio <= 1)
    #[arg(short, long = "warning-ratio")]
    pub warning_ratio: Option<Decimal>,
}

/// How results are written to stdout.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate sales per country and flag registration obligations
    Analyze {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        threshold: ThresholdArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,

        /// List rows skipped during ingestion
        #[arg(long)]
        show_skipped: bool,

        /// Show the reasoning for every country
        #[arg(long)]
        verbose: bool,
    },
    /// Compare outcomes across several what-if limits
    Scenario {
        #[command(flatten)]
        input: InputArgs,

        /// Comma-separated limits to evaluate, e.g. 8000,10000,12000
        #[arg(long, value_delimiter = ',', required = true)]
        limits: Vec<Decimal>,

        /// Warning ratio applied to every limit
        #[arg(short, long = "warning-ratio", default_value = "0.8")]
        warning_ratio: Decimal,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,
    },
    /// Write aggregated totals per country as a two-column table
    Export {
        #[command(flatten)]
        input: InputArgs,

        /// Output file (stdout if omitted)
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// Field delimiter for the exported file
        #[arg(long = "out-delimiter", default_value = ",")]
        out_delimiter: char,
    },
    /// Inspect and validate threshold presets
    Presets {
        #[command(subcommand)]
        action: PresetsAction,
    },
}

#[derive(Subcommand)]
enum PresetsAction {
    /// List predefined thresholds
    List,
    /// Explain a preset in plain language
    Explain {
        /// Preset name (e.g., "eu-oss")
        preset: String,
    },
    /// Print the JSON schema with field descriptions and example
    Schema,
    /// Validate a custom threshold file
    Validate {
        /// Path to JSON threshold file
        file: PathBuf,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let result = match cli.command {
        Commands::Analyze {
            input,
            threshold,
            output,
            show_skipped,
            verbose,
        } => commands::analyze::run(&input, &threshold, output, show_skipped, verbose),
        Commands::Scenario {
            input,
            limits,
            warning_ratio,
            output,
        } => commands::scenario::run(&input, &limits, warning_ratio, output),
        Commands::Export {
            input,
            out,
            out_delimiter,
        } => commands::export::run(&input, out, out_delimiter),
        Commands::Presets { action } => match action {
            PresetsAction::List => commands::presets::list(),
            PresetsAction::Explain { preset } => commands::presets::explain(&preset),
            PresetsAction::Schema => commands::presets::schema(),
            PresetsAction::Validate { file } => commands::presets::validate(&file),
        },
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
