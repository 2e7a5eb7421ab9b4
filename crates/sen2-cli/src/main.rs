// Rust guideline compliant 2026-10-17

//! sen2cli Application
//!
//! Command-line interface for the Sen2Cube.at inference backend.

use clap::Parser;
use sen2_app::{AppError, ErrorCode, ErrorEnvelope};
use sen2_cli::commands;
use sen2_cli::commands::create::CreateArgs;
use sen2_cli::commands::list::ListArgs;
use sen2_cli::commands::update::{UpdateAction, UpdateArgs};
use sen2_cli::logging::init_tracing;
use sen2_cli::{create_formatter, should_use_color, OutputFormat};
use sen2_core::{Config, Error as CoreError};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "sen2cli",
    version,
    about = "Command line client for Sen2Cube.at",
    long_about = "sen2cli lists, reruns, aborts, deletes and creates inferences on the Sen2Cube.at backend, using the session token stored by the login flow.",
    after_help = "Examples:\n  sen2cli session info\n  sen2cli inference ls --status FAILED --count_only\n  sen2cli inference --output_format table ls --knowledgebase_id 12 --columns status,owner\n  sen2cli inference rerun --id 8366 --dry-run\n  sen2cli inference create 12 34 2021-06-01 2021-06-30 aoi.geojson --description test\n"
)]
struct Cli {
    /// Increase log verbosity (-v WARN, -vv INFO, -vvv DEBUG)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Write logs to this file instead of stderr
    #[arg(long = "log_file", global = true)]
    log_file: Option<PathBuf>,

    /// Custom config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Print the version
    Version,

    /// Session related commands
    Session {
        #[command(flatten)]
        options: SessionOptions,

        #[command(subcommand)]
        action: SessionAction,
    },

    /// List/Rerun/Abort/Delete/Create inferences
    Inference {
        #[command(flatten)]
        options: InferenceOptions,

        #[command(subcommand)]
        action: InferenceAction,
    },
}

#[derive(Debug, clap::Args)]
struct SessionOptions {
    /// File that stores the token
    #[arg(long = "tokenfile", env = "S2C_TOKENFILE", global = true)]
    tokenfile: Option<PathBuf>,

    /// Output format
    #[arg(long = "output_format", value_enum, default_value_t = OutputFormat::Table, global = true)]
    output_format: OutputFormat,
}

#[derive(Debug, clap::Subcommand)]
enum SessionAction {
    /// Show info for the current session
    Info,
}

#[derive(Debug, clap::Args)]
struct InferenceOptions {
    /// File that stores the token
    #[arg(long = "tokenfile", env = "S2C_TOKENFILE", global = true)]
    tokenfile: Option<PathBuf>,

    /// Output format
    #[arg(long = "output_format", value_enum, default_value_t = OutputFormat::Csv, global = true)]
    output_format: OutputFormat,
}

#[derive(Debug, clap::Subcommand)]
enum InferenceAction {
    /// List inferences
    Ls(ListArgs),

    /// Rerun aborted, failed or succeeded inferences
    Rerun(UpdateArgs),

    /// Abort created, scheduled or started inferences
    Abort(UpdateArgs),

    /// Delete inferences that are not running
    Delete(UpdateArgs),

    /// Create a new inference
    Create(CreateArgs),
}

impl Commands {
    fn output_format(&self) -> OutputFormat {
        match self {
            Commands::Version => OutputFormat::Table,
            Commands::Session { options, .. } => options.output_format,
            Commands::Inference { options, .. } => options.output_format,
        }
    }
}

fn load_config(cli: &Cli) -> Result<Config, AppError> {
    Ok(Config::load(cli.config.as_deref())?)
}

fn run(cli: &Cli, config: &Config, use_color: bool) -> anyhow::Result<String> {
    let formatter = create_formatter(cli.command.output_format(), use_color, config.csv_delimiter);

    match &cli.command {
        Commands::Version => Ok(version()),
        Commands::Session { options, action } => {
            let token_file = options
                .tokenfile
                .clone()
                .unwrap_or_else(|| config.token_file.clone());
            match action {
                SessionAction::Info => {
                    commands::session::execute_info(config, &token_file, formatter.as_ref())
                }
            }
        }
        Commands::Inference { options, action } => {
            let token_file = options
                .tokenfile
                .clone()
                .unwrap_or_else(|| config.token_file.clone());
            let client = commands::connect(config, &token_file)?;

            match action {
                InferenceAction::Ls(args) => {
                    commands::list::execute_list(&client, args, formatter.as_ref())
                }
                InferenceAction::Rerun(args) => commands::update::execute_update(
                    &client,
                    UpdateAction::Rerun,
                    args,
                    formatter.as_ref(),
                ),
                InferenceAction::Abort(args) => commands::update::execute_update(
                    &client,
                    UpdateAction::Abort,
                    args,
                    formatter.as_ref(),
                ),
                InferenceAction::Delete(args) => commands::update::execute_update(
                    &client,
                    UpdateAction::Delete,
                    args,
                    formatter.as_ref(),
                ),
                InferenceAction::Create(args) => commands::create::execute_create(
                    &client,
                    args,
                    config.owner.as_deref(),
                    formatter.as_ref(),
                ),
            }
        }
    }
}

fn version() -> String {
    format!("sen2cli {}", env!("CARGO_PKG_VERSION"))
}

fn error_envelope(error: &anyhow::Error) -> ErrorEnvelope {
    let (code, details) = if let Some(app) = error.downcast_ref::<AppError>() {
        (app.code(), app.details())
    } else if let Some(core) = error.downcast_ref::<CoreError>() {
        (ErrorCode::for_core(core), None)
    } else {
        (ErrorCode::IoError, None)
    };

    ErrorEnvelope::new(code, format!("{:#}", error)).with_details(details)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _guard = match init_tracing(cli.verbose, cli.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: cannot open log file: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if matches!(cli.command, Commands::Version) {
        println!("{}", version());
        return ExitCode::SUCCESS;
    }

    let use_color = should_use_color();
    let (delimiter, result) = match load_config(&cli) {
        Ok(config) => (config.csv_delimiter, run(&cli, &config, use_color)),
        Err(e) => (Config::default().csv_delimiter, Err(e.into())),
    };

    match result {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
            ExitCode::SUCCESS
        }
        Err(error) => {
            tracing::debug!(error = ?error, "command failed");
            let envelope = error_envelope(&error);
            let formatter = create_formatter(cli.command.output_format(), use_color, delimiter);
            eprintln!("{}", formatter.format_error(&envelope));
            ExitCode::from(u8::try_from(envelope.code.exit_code()).unwrap_or(1))
        }
    }
}
