use anyhow::Result;
use clap::Args;
use clap_complete::{Shell, generate};

/// Arguments for `incidents completions`.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate the completion script for.
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Write a completion script for `shell` to stdout.
///
/// # Errors
///
/// Never fails today; returns `Result` to match the other command handlers.
pub fn run_completions(shell: Shell, command: &mut clap::Command) -> Result<()> {
    let mut out = std::io::stdout();
    generate(shell, command, "incidents", &mut out);
    Ok(())
}
