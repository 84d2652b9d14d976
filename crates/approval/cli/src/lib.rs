//! approvalctl - command-line interface for approval workflow templates
//!
//! This CLI gives template authors and operators a terminal interface to:
//! - List and inspect the configured templates
//! - Instantiate a template against a transaction context
//! - Check condition expressions before putting them in a template
//! - Validate template files before they are loaded as seeds
//!
//! Every invocation builds a fresh in-process engine from configuration.

use approval_engine::{EngineConfig, LoggingConfig, TemplateService};
use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod error;
mod output;

use commands::{condition, instantiate, templates, validate};
pub use error::{CliError, CliResult};
pub use output::OutputFormat;

/// approvalctl application
#[derive(Parser)]
#[command(name = "approvalctl")]
#[command(about = "approvalctl - approval workflow template tooling", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path (TOML, YAML or JSON)
    #[arg(short, long, env = "APPROVAL_CONFIG")]
    config: Option<PathBuf>,

    /// Output format (table, json, yaml)
    #[arg(short, long, default_value = "table", global = true)]
    output: OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Inspect workflow templates
    Templates {
        #[command(subcommand)]
        command: templates::TemplateCommands,
    },

    /// Compute the approval steps that apply to a transaction
    Instantiate(instantiate::InstantiateArgs),

    /// Work with condition expressions
    Condition {
        #[command(subcommand)]
        command: condition::ConditionCommands,
    },

    /// Validate a template file (YAML or JSON)
    Validate {
        /// Path to the template file
        file: PathBuf,
    },
}

/// Run using the current process arguments.
pub fn run() -> CliResult<()> {
    run_with_args(std::env::args_os())
}

/// Run using the provided argument iterator.
pub fn run_with_args<I, T>(args: I) -> CliResult<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);
    let config = EngineConfig::load(cli.config.as_deref())?;

    init_tracing(&config.logging, cli.verbose, cli.json_logs);

    match cli.command {
        Commands::Templates { command } => {
            let service = TemplateService::from_config(&config)?;
            templates::execute(command, &service, cli.output)
        }
        Commands::Instantiate(args) => {
            let service = TemplateService::from_config(&config)?;
            instantiate::execute(args, &service, cli.output)
        }
        Commands::Condition { command } => condition::execute(command, cli.output),
        Commands::Validate { file } => validate::execute(&file, cli.output),
    }
}

/// Print an error the way the binary reports failures
pub fn report_error(err: &CliError) {
    output::print_error(&err.to_string());
}

/// Logs go to stderr; stdout carries command output
fn init_tracing(logging: &LoggingConfig, verbose: bool, json_logs: bool) {
    let level = if verbose { "debug" } else { logging.level.as_str() };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let result = if json_logs || logging.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .without_time()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    // Already initialised when run more than once in one process
    let _ = result;
}
