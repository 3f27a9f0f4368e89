mod catalog;
mod cli;
mod compare;
mod error;
mod genotype;
mod model;
mod output;
mod reader;
mod report;

use crate::error::Result;
use chrono::Local;
use clap::Parser;
use miette::IntoDiagnostic;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Find pairs of individuals who carry the same ClinVar pathogenic allele.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// ClinVar variant_summary table (.txt or .txt.gz).
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    catalog: PathBuf,

    /// Directory holding one raw genotype file per individual.
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    genotype_directory: PathBuf,

    /// Output directory.
    #[arg(
        short,
        long,
        value_hint = clap::ValueHint::DirPath,
        default_value_t = format!("carrierscan_output_{}", Local::now().format("%Y%m%d_%H%M%S"))
    )]
    output_directory: String,

    /// MD5 checksum file for the catalog. Defaults to <CATALOG>.md5 when present.
    #[arg(long, value_hint = clap::ValueHint::FilePath, conflicts_with = "skip_checksum")]
    md5: Option<PathBuf>,

    /// Do not verify the catalog checksum.
    #[arg(long)]
    skip_checksum: bool,

    /// Individual ids are the part of the file name before this marker.
    #[arg(long, default_value = reader::genotype::DEFAULT_ID_MARKER)]
    id_marker: String,

    /// Only keep catalog rows for this assembly (e.g. GRCh37).
    #[arg(long)]
    assembly: Option<String>,

    /// Number of threads for pairwise comparison.
    #[arg(short, long)]
    threads: Option<usize>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("carrierscan={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn try_main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    std::fs::create_dir_all(&args.output_directory)
        .map_err(|e| error::CustomError::OutputDir { source: e })?;

    let input_spec = cli::build_input_spec(&args);
    input_spec.print_paths();
    cli::run(&input_spec)?;
    println!("Done. Output in {}", input_spec.output_dir().display());
    Ok(())
}

fn main() -> miette::Result<()> {
    try_main().into_diagnostic()
}
