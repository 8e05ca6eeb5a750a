use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use republica_tools::dedup::Summary;
use republica_tools::merge::{MergeReport, SkipReason};
use republica_tools::pipeline::{self, CleanOutputs};
use republica_tools::{Result, ToolError};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_logging(&cli.log_level).and_then(|()| run(cli)) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

/// Logs go to stderr so the summary on stdout stays machine-readable.
fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| ToolError::Logging(err.to_string()))
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Merge(args) => {
            let report = pipeline::merge_to_csv(&args.input_dir, &args.output)?;
            print_merge_report(&report, &args.output);
            Ok(())
        }
        Command::Clean(args) => {
            let summary = pipeline::clean_csv(&args.input, args.outputs())?;
            print_summary(&summary, args.json)
        }
        Command::Run(args) => {
            let (report, summary) =
                pipeline::run(&args.input_dir, &args.clean.input, args.clean.outputs())?;
            if !args.clean.json {
                print_merge_report(&report, &args.clean.input);
            }
            print_summary(&summary, args.clean.json)
        }
    }
}

fn print_merge_report(report: &MergeReport, output: &Path) {
    for skipped in &report.skipped {
        match &skipped.reason {
            SkipReason::MissingColumns(missing) => println!(
                "Archivo omitido por columnas faltantes: {} ({})",
                skipped.path.display(),
                missing.join(", ")
            ),
            SkipReason::Unreadable(reason) => {
                println!("Error leyendo {}: {reason}", skipped.path.display())
            }
        }
    }
    println!(
        "{} archivos combinados en '{}'",
        report.accepted.len(),
        output.display()
    );
}

fn print_summary(summary: &Summary, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
    } else {
        println!("{summary}");
    }
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Merge and clean the establishment registry extracts."
)]
struct Cli {
    /// Log filter used when RUST_LOG is not set.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Combine the raw CSV extracts into one table.
    Merge(MergeArgs),
    /// Clean the combined table and split out duplicate codes.
    Clean(CleanArgs),
    /// Merge, then clean.
    Run(RunArgs),
}

#[derive(clap::Args)]
struct MergeArgs {
    /// Directory holding the raw Latin-1 extracts.
    #[arg(long, env = "REPUBLICA_RAW_DIR", default_value = "./raw")]
    input_dir: PathBuf,

    /// Combined UTF-8 CSV to write.
    #[arg(long, default_value = "republica.csv")]
    output: PathBuf,
}

#[derive(clap::Args)]
struct CleanArgs {
    /// Combined CSV produced by the merge step.
    #[arg(long, default_value = "republica.csv")]
    input: PathBuf,

    /// Report of rows sharing a CODIGO.
    #[arg(long, default_value = "codigos_duplicados.csv")]
    duplicates: PathBuf,

    /// Cleaned table with one row per CODIGO.
    #[arg(long, default_value = "republica_limpia_sin_duplicados.csv")]
    output: PathBuf,

    /// Print the summary as JSON.
    #[arg(long)]
    json: bool,
}

impl CleanArgs {
    fn outputs(&self) -> CleanOutputs<'_> {
        CleanOutputs {
            duplicates: &self.duplicates,
            cleaned: &self.output,
        }
    }
}

#[derive(clap::Args)]
struct RunArgs {
    /// Directory holding the raw Latin-1 extracts.
    #[arg(long, env = "REPUBLICA_RAW_DIR", default_value = "./raw")]
    input_dir: PathBuf,

    #[command(flatten)]
    clean: CleanArgs,
}
