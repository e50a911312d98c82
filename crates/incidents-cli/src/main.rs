#![forbid(unsafe_code)]

mod cmd;
mod output;
mod session;
mod tui;

use clap::{CommandFactory, Parser, Subcommand};
use incidents_core::config::resolve_config;
use incidents_core::error::ErrorCode;
use incidents_core::{IncidentStore, StoreError};
use output::{CliError, ErrorRendered, OutputMode, is_rendered, render_error};
use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "incidents: AI safety incident dashboard",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Load incidents from a JSON seed file instead of the sample set.
    #[arg(long, global = true, value_name = "PATH")]
    seed: Option<PathBuf>,

    /// Output format: pretty, text, or json.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Interactive",
        about = "Open the incident dashboard",
        long_about = "Open the full-screen dashboard. This is the default when no subcommand is given.",
        after_help = "EXAMPLES:\n    # Open the dashboard with sample incidents\n    incidents\n\n    # Open the dashboard on a custom seed set\n    incidents --seed incidents.json dashboard"
    )]
    Dashboard,

    #[command(
        next_help_heading = "Read",
        about = "List incidents",
        long_about = "List incidents with an optional severity filter and sort order.",
        after_help = "EXAMPLES:\n    # Newest first (default)\n    incidents list\n\n    # Only high severity, oldest first\n    incidents list --severity high --sort oldest\n\n    # Emit machine-readable output\n    incidents list --format json"
    )]
    List(cmd::list::ListArgs),

    #[command(
        next_help_heading = "Write",
        about = "Report a new incident",
        long_about = "Validate and submit a new incident report. All fields are required.",
        after_help = "EXAMPLES:\n    # Report an incident\n    incidents report --title \"Prompt leak\" --description \"System prompt echoed\" --severity medium\n\n    # Emit machine-readable output\n    incidents report -t x -d y -s high --format json"
    )]
    Report(cmd::report::ReportArgs),

    #[command(
        next_help_heading = "Project Maintenance",
        about = "Generate shell completion scripts",
        long_about = "Generate shell completion scripts for supported shells.",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    incidents completions bash\n\n    # Generate zsh completions\n    incidents completions zsh"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

impl Cli {
    const fn is_interactive(&self) -> bool {
        matches!(self.command, None | Some(Commands::Dashboard))
    }

    /// Output mode from flags alone, used before config has been read.
    fn flag_output_mode(&self) -> OutputMode {
        self.format.unwrap_or(if self.json {
            OutputMode::Json
        } else {
            OutputMode::Pretty
        })
    }
}

/// Install the global subscriber.
///
/// Logs go to stderr. While the dashboard owns the terminal the default
/// level drops to `error`; `INCIDENTS_LOG` still overrides it.
fn init_tracing(interactive: bool) {
    let filter = EnvFilter::try_from_env("INCIDENTS_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if interactive {
            "error"
        } else if env::var("DEBUG").is_ok() {
            "incidents=debug,info"
        } else {
            "incidents=info,warn"
        })
    });

    let format = env::var("INCIDENTS_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

/// Print a classified failure in the active output mode, then hand the error
/// back marked as rendered.
fn report_failure(output: OutputMode, code: ErrorCode, err: anyhow::Error) -> anyhow::Error {
    tracing::debug!(code = code.code(), error = %err, "{}", code.message());
    let cli_error = CliError::from_code(code, format!("{err:#}"));
    if let Err(write_err) = render_error(output, &cli_error) {
        tracing::warn!(error = %write_err, "failed to write error output");
    }
    err.context(ErrorRendered)
}

fn open_session(cli: &Cli, project_root: &Path) -> anyhow::Result<(IncidentStore, OutputMode)> {
    let effective = resolve_config(project_root, cli.json).map_err(|err| {
        report_failure(cli.flag_output_mode(), ErrorCode::ConfigParseError, err)
    })?;
    let output = cli
        .format
        .unwrap_or_else(|| OutputMode::from_name(&effective.resolved_output));

    let store = session::open_store(project_root, &effective.project, cli.seed.as_deref())
        .map_err(|err| {
            let code = if err.downcast_ref::<StoreError>().is_some() {
                ErrorCode::InvalidSeed
            } else {
                ErrorCode::SeedLoadFailed
            };
            report_failure(output, code, err)
        })?;

    Ok((store, output))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.is_interactive());

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if !is_rendered(&err) {
                report_failure(cli.flag_output_mode(), ErrorCode::InternalUnexpected, err);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    if let Some(Commands::Completions(ref args)) = cli.command {
        let mut command = Cli::command();
        return cmd::completions::run_completions(args.shell, &mut command);
    }

    let project_root = env::current_dir()?;
    let (mut store, output) = open_session(cli, &project_root)?;

    match cli.command {
        None | Some(Commands::Dashboard) => tui::run_dashboard(store)
            .map_err(|err| report_failure(output, ErrorCode::TerminalIoFailed, err)),
        Some(Commands::List(ref args)) => cmd::list::run_list(args, &store, output),
        Some(Commands::Report(ref args)) => cmd::report::run_report(args, &mut store, output),
        Some(Commands::Completions(_)) => Ok(()),
    }
}
