//! docmatica CLI tool.
//!
//! Usage:
//! ```bash
//! docmatica [OPTIONS]
//! docmatica list-rules
//! docmatica init
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Exit code for errors that stop a run before it can produce a verdict.
pub const FATAL_EXIT: u8 = 2;

const LONG_ABOUT: &str = "\
A linter for archivematica-docs.

This tool works best when run at the root of the archivematica-docs repository.
The following checks will be performed:
- All files found have extension .rst or .svg or .png in an images directory.
- All .rst files are nested within chapter directories, except:
    * index.rst files, which can be in the root of manuals or the root of the repository.
    * contents.rst files, which can be in the root of the repository.
- All .rst files have 'Back to Top' anchors.

Exits with 0 when no violation is found, 1 when at least one is found.";

/// Structural linter for reStructuredText documentation trees
#[derive(Parser)]
#[command(name = "docmatica")]
#[command(author, version, about, long_about = LONG_ABOUT)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory to lint (default: current working directory)
    #[arg(short, long)]
    path: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Only run specific rules (comma-separated names or codes)
    #[arg(long)]
    rules: Option<String>,

    /// Number of rule workers (default: available parallelism)
    #[arg(short, long)]
    jobs: Option<usize>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List available rules
    ListRules,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `<path>: <message>` per violation.
    #[default]
    Text,
    /// One JSON object per violation.
    Json,
    /// `<path>: [<code>] <message>` per violation.
    Compact,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Some(Commands::ListRules) => {
            commands::list_rules::run();
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Init { force }) => commands::init::run(force).map(|()| ExitCode::SUCCESS),
        None => commands::check::run(&commands::check::CheckArgs {
            path: cli.path.as_deref(),
            config: cli.config.as_deref(),
            format: cli.format,
            rules: cli.rules.as_deref(),
            jobs: cli.jobs,
        }),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(FATAL_EXIT)
        }
    }
}
