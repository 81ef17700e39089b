// crates/category-probe/src/main.rs
// ============================================================================
// Module: Category Probe CLI Entry Point
// Description: Command dispatcher for category contract runs.
// Purpose: Load credentials, acquire a token, run scenarios, report results.
// Dependencies: category-probe, clap, thiserror, tokio
// ============================================================================

//! ## Overview
//! `category-probe run` executes the contract scenarios against the API named
//! in the credentials file and exits non-zero when any scenario fails.
//! `category-probe list` prints the scenario catalog. Stdout carries the
//! report; logs go to stderr.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use category_probe::Credentials;
use category_probe::ProbeConfig;
use category_probe::ProbeContext;
use category_probe::ProbeError;
use category_probe::ScenarioId;
use category_probe::SuiteReport;
use category_probe::config::ProbeEnv;
use category_probe::config::parse_timeout_seconds;
use category_probe::run_suite;
use category_probe::telemetry::LogFormat;
use category_probe::telemetry::init_tracing;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use thiserror::Error;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "category-probe", version, about = "Sale-category API contract probe")]
struct Cli {
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Acquire a token and run the contract scenarios.
    Run(RunCommand),
    /// List scenario identifiers in execution order.
    List,
}

/// Arguments for `run`.
#[derive(Args, Debug)]
struct RunCommand {
    /// Credentials JSON file (overrides `CATEGORY_PROBE_CREDENTIALS`).
    #[arg(long, value_name = "PATH")]
    credentials: Option<PathBuf>,
    /// Request timeout in seconds (overrides `CATEGORY_PROBE_TIMEOUT_SEC`).
    #[arg(long, value_name = "SECS", value_parser = parse_timeout_arg)]
    timeout_secs: Option<Duration>,
    /// Directory for report artifacts (overrides `CATEGORY_PROBE_REPORT_DIR`).
    #[arg(long, value_name = "DIR")]
    report_dir: Option<PathBuf>,
    /// Run only the named scenario; repeatable.
    #[arg(long = "scenario", value_name = "ID")]
    scenarios: Vec<ScenarioId>,
    /// Log format (overrides `CATEGORY_PROBE_LOG_FORMAT`).
    #[arg(long, value_enum, value_name = "FORMAT")]
    log_format: Option<LogFormatArg>,
}

/// CLI log format values.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum LogFormatArg {
    /// Human-readable text.
    Text,
    /// Newline-delimited JSON.
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(value: LogFormatArg) -> Self {
        match value {
            LogFormatArg::Text => Self::Text,
            LogFormatArg::Json => Self::Json,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper.
#[derive(Debug, Error)]
enum CliError {
    /// A fatal probe error.
    #[error(transparent)]
    Probe(#[from] ProbeError),
    /// Any other fatal condition.
    #[error("{0}")]
    Message(String),
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Tests
// ============================================================================


// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Run(command) => command_run(command).await,
        Commands::List => command_list(),
    }
}

// ============================================================================
// SECTION: Commands
// ============================================================================

/// Executes the `run` command.
async fn command_run(command: RunCommand) -> CliResult<ExitCode> {
    let overrides = ProbeConfig {
        credentials_path: command.credentials,
        timeout: command.timeout_secs,
        report_dir: command.report_dir,
        log_format: command.log_format.map(LogFormat::from),
    };
    let config = ProbeConfig::load_over(overrides).map_err(ProbeError::from)?;
    init_tracing(config.log_format.unwrap_or_default())
        .map_err(|err| CliError::Message(err.to_string()))?;

    let credentials_path = config.credentials_path_or_default();
    tracing::info!(
        path = %credentials_path.display(),
        env = ProbeEnv::CredentialsPath.as_str(),
        "loading credentials"
    );
    let credentials = Credentials::load(&credentials_path).map_err(ProbeError::from)?;
    let context = ProbeContext::establish(&credentials, config.timeout).await?;

    let report = run_suite(&context, &command.scenarios).await;
    write_report(&report)?;
    if let Some(dir) = &config.report_dir {
        let written = report
            .write_artifacts(dir, &context.client().transcript())
            .map_err(ProbeError::from)?;
        tracing::info!(artifacts = written.len(), dir = %dir.display(), "report artifacts written");
    }

    Ok(if report.passed() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Executes the `list` command.
fn command_list() -> CliResult<ExitCode> {
    for id in ScenarioId::ALL {
        let line =
            format!("{:<36} {:<16} {}", id.as_str(), id.group().title(), id.description());
        write_stdout_line(&line)?;
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Argument Parsers
// ============================================================================

/// Parses `--timeout-secs` as a positive number of seconds.
fn parse_timeout_arg(raw: &str) -> Result<Duration, String> {
    parse_timeout_seconds("--timeout-secs", raw).map_err(|err| err.to_string())
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes one line per scenario and a final tally.
fn write_report(report: &SuiteReport) -> CliResult<()> {
    for outcome in &report.outcomes {
        let line = match &outcome.detail {
            None => format!("{} {}", outcome.status.as_str(), outcome.scenario),
            Some(detail) => format!("{} {}: {detail}", outcome.status.as_str(), outcome.scenario),
        };
        write_stdout_line(&line)?;
    }
    write_stdout_line(&format!(
        "{} passed, {} failed ({} ms)",
        report.passed_count(),
        report.failed_count(),
        report.duration_ms
    ))
}

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> CliResult<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
        .map_err(|err| CliError::Message(format!("failed to write stdout: {err}")))
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(&format!("category-probe: {message}"));
    ExitCode::FAILURE
}
