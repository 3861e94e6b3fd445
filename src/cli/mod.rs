//! Command-line interface for `mint`.
//!
//! This module provides the CLI parsing and command routing using clap.

pub mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::config::{self, CliOverrides, Environment};
use crate::format::OutputContext;
use crate::logging;
use commands::CommandContext;

/// `mint` - Local file-backed issue tracker.
#[derive(Parser, Debug)]
#[command(name = "mint")]
#[command(
    author,
    version,
    about = "Local file-backed issue tracker with dependency tracking",
    long_about = None,
    after_help = "Issues live in .mint/issues.yaml. IDs may be shortened to any unique prefix."
)]
pub struct Cli {
    /// Issue document (default: nearest .mint/issues.yaml)
    #[arg(long, global = true, env = "MINT_FILE", value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Config file (default: <config dir>/mint/config.yaml)
    #[arg(long, global = true, env = "MINT_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable coloured output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a mint workspace
    Init(InitArgs),

    /// Create a new issue
    Create(CreateArgs),

    /// List issues (open by default)
    List(ListArgs),

    /// Show issue details
    Show(IdArgs),

    /// List ready (unblocked) issues
    Ready(ReadyArgs),

    /// List open issues waiting on an open dependency
    Blocked(ReadyArgs),

    /// Change an issue's title
    Edit(EditArgs),

    /// Add a comment to an issue
    #[command(alias = "comments")]
    Comment(CommentArgs),

    /// Close an issue
    Close(CloseArgs),

    /// Reopen a closed issue
    Reopen(IdArgs),

    /// Delete an issue and every reference to it
    Delete(IdArgs),

    /// Manage dependencies
    Dep(DepCommand),

    /// Show the ID prefix, or rename every issue to a new one
    Prefix(PrefixArgs),

    /// Stats summary (alias: status)
    #[command(alias = "status")]
    Stats,

    /// Check the document for dangling or one-sided references
    Doctor,

    /// Generate shell completions
    Completions(CompletionsArgs),

    /// Show version information
    Version,
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// ID prefix for the new workspace
    #[arg(long)]
    pub prefix: Option<String>,

    /// Overwrite an existing document
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Issue title
    pub title: String,
}

#[derive(Args, Debug)]
pub struct IdArgs {
    /// Issue ID (full or unique prefix)
    pub id: String,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Include closed issues
    #[arg(short, long, conflicts_with = "closed")]
    pub all: bool,

    /// Only closed issues
    #[arg(long)]
    pub closed: bool,

    /// Case-insensitive title search
    #[arg(short, long)]
    pub search: Option<String>,

    /// Maximum number of issues
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Args, Debug)]
pub struct ReadyArgs {
    /// Maximum number of issues
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Issue ID (full or unique prefix)
    pub id: String,

    /// New title
    pub title: String,
}

#[derive(Args, Debug)]
pub struct CommentArgs {
    /// Issue ID (full or unique prefix)
    pub id: String,

    /// Comment text
    pub text: String,
}

#[derive(Args, Debug)]
pub struct CloseArgs {
    /// Issue ID (full or unique prefix)
    pub id: String,

    /// Reason, recorded as a comment
    #[arg(short, long)]
    pub reason: Option<String>,
}

#[derive(Args, Debug)]
pub struct DepCommand {
    /// Dependency subcommand
    #[command(subcommand)]
    pub command: DepSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum DepSubcommand {
    /// Add a dependency: ISSUE depends on TARGET (or blocks it with --blocks)
    Add(DepArgs),

    /// Remove a dependency
    Remove(DepArgs),
}

#[derive(Args, Debug)]
pub struct DepArgs {
    /// Issue ID (full or unique prefix)
    pub issue: String,

    /// Other issue ID (full or unique prefix)
    pub target: String,

    /// ISSUE blocks TARGET instead of depending on it
    #[arg(long)]
    pub blocks: bool,
}

#[derive(Args, Debug)]
pub struct PrefixArgs {
    /// New prefix; every issue is renamed to match
    pub new_prefix: Option<String>,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Run the CLI.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn run() -> Result<()> {
    execute(Cli::parse())
}

/// Execute an already-parsed command line.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded or the command fails.
pub fn execute(cli: Cli) -> Result<()> {
    match &cli.command {
        Commands::Completions(args) => {
            commands::completions::execute(args);
            return Ok(());
        }
        Commands::Version => {
            return commands::version::execute(&OutputContext::new(cli.json, false));
        }
        _ => {}
    }

    let cwd = std::env::current_dir().context("reading current directory")?;
    let overrides = CliOverrides {
        file: cli.file.clone(),
        config: cli.config.clone(),
        no_color: cli.no_color,
    };
    let config = config::load(&overrides, &Environment::capture(), &cwd)?;

    logging::init_logging(cli.verbose, cli.quiet, config.log.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;
    for source in &config.sources {
        tracing::trace!(path = %source.display(), "Config source");
    }
    tracing::debug!(document = %config.document.display(), prefix = %config.prefix, "Resolved configuration");

    let output = OutputContext::new(cli.json, config.color);
    let ctx = CommandContext::new(config, output);

    match cli.command {
        Commands::Init(args) => commands::init::execute(&args, &ctx),
        Commands::Create(args) => commands::create::execute(&args, &ctx),
        Commands::List(args) => commands::list::execute(&args, &ctx),
        Commands::Show(args) => commands::show::execute(&args, &ctx),
        Commands::Ready(args) => commands::ready::execute(&args, &ctx),
        Commands::Blocked(args) => commands::ready::execute_blocked(&args, &ctx),
        Commands::Edit(args) => commands::edit::execute(&args, &ctx),
        Commands::Comment(args) => commands::comment::execute(&args, &ctx),
        Commands::Close(args) => commands::close::execute_close(&args, &ctx),
        Commands::Reopen(args) => commands::close::execute_reopen(&args, &ctx),
        Commands::Delete(args) => commands::delete::execute(&args, &ctx),
        Commands::Dep(dep) => commands::dep::execute(&dep.command, &ctx),
        Commands::Prefix(args) => commands::prefix::execute(&args, &ctx),
        Commands::Stats => commands::stats::execute(&ctx),
        Commands::Doctor => commands::doctor::execute(&ctx),
        Commands::Completions(_) | Commands::Version => Ok(()),
    }
}
