//! Shell completion generation.

use clap::CommandFactory;

use crate::cli::{Cli, CompletionsArgs};

/// Write a completion script for the requested shell to stdout.
pub fn execute(args: &CompletionsArgs) {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(args.shell, &mut command, name, &mut std::io::stdout());
}
