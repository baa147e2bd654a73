// jobrecon - job cost reconciliation between a field-system feed and
// the internal job export.

mod exit_codes;
mod ids;
mod recon;
mod report;
mod util;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use exit_codes::{recon_exit_code, EXIT_IO, EXIT_SUCCESS, EXIT_USAGE};
use jobrecon_engine::ids::DEFAULT_SHOW_LIMIT;
use jobrecon_engine::ReconError;

#[derive(Parser)]
#[command(name = "jobrecon")]
#[command(about = "Reconcile per-job labor and materials between two sources")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare both sources of a TOML config and print the report
    #[command(after_help = "\
Examples:
  jobrecon run october.recon.toml
  jobrecon run october.recon.toml --top 50
  jobrecon run october.recon.toml --json
  jobrecon run october.recon.toml --output result.json")]
    Run {
        /// Path to the .recon.toml config file
        config: PathBuf,

        /// Print the JSON report to stdout instead of the text report
        #[arg(long)]
        json: bool,

        /// Also write the JSON report to a file
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Number of largest discrepancies to list (overrides [report].top)
        #[arg(long)]
        top: Option<usize>,
    },

    /// Validate a config without loading any data
    #[command(after_help = "\
Examples:
  jobrecon validate october.recon.toml")]
    Validate {
        /// Path to the .recon.toml config file
        config: PathBuf,
    },

    /// List reference job ids missing from our export
    #[command(after_help = "\
Examples:
  jobrecon missing-ids st_job_ids.txt october_all_jobs.csv
  jobrecon missing-ids st_job_ids.txt ours.csv --column id --limit 100
  jobrecon missing-ids st_job_ids.txt ours.csv --output /tmp/missing.txt --json")]
    MissingIds {
        /// Reference ids, one per line
        reference: PathBuf,

        /// Our export (CSV with header row)
        ours: PathBuf,

        /// Id column in our export
        #[arg(long, default_value = "job_id")]
        column: String,

        /// File receiving the full missing set
        #[arg(long, short = 'o', default_value = "missing_jobs.txt")]
        output: PathBuf,

        /// How many ids to print per list
        #[arg(long, default_value_t = DEFAULT_SHOW_LIMIT)]
        limit: usize,

        /// Print the id diff as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the distinct business units of one source
    #[command(after_help = "\
Examples:
  jobrecon units october.recon.toml
  jobrecon units october.recon.toml --side left")]
    Units {
        /// Path to the .recon.toml config file
        config: PathBuf,

        /// Which source to read
        #[arg(long, value_enum, default_value_t = Side::Right)]
        side: Side,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Side {
    Left,
    Right,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Run { config, json, output, top } => recon::cmd_run(config, json, output, top),
        Commands::Validate { config } => recon::cmd_validate(config),
        Commands::MissingIds { reference, ours, column, output, limit, json } => {
            ids::cmd_missing_ids(reference, ours, column, output, limit, json)
        }
        Commands::Units { config, side } => recon::cmd_units(config, side),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into(), hint: None }
    }

    /// Create error from an engine error with the matching exit code.
    pub fn recon(err: ReconError) -> Self {
        let code = recon_exit_code(&err);
        let hint = match &err {
            ReconError::MissingColumn { .. } => {
                Some("map header names under [left.columns] / [right.columns]".to_string())
            }
            ReconError::AmountParse { .. } => {
                Some("set amount_format = \"currency\" to treat unparseable cells as zero".to_string())
            }
            _ => None,
        };
        Self { code, message: err.to_string(), hint }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
