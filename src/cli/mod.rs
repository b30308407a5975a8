//! Command-line interface for hookpin
//!
//! Argument parsing with clap and dispatch to the command implementations.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod commands;
mod output;

pub use output::Output;

/// hookpin - validate and plan pre-commit hook configurations
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Hook configuration file (default: discovered from the working directory)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable quiet output (minimal)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Force overwrite without prompting
    #[arg(short, long, global = true)]
    pub force: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Check the configuration for errors and suspicious entries
    Validate {
        /// Validate these files instead of the discovered configuration
        files: Vec<PathBuf>,
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
    /// Show the repositories, revisions and hooks in the configuration
    Show,
    /// Show which files each hook would receive
    Plan {
        /// Consider every tracked file instead of the staged ones
        #[arg(short, long, conflicts_with = "files")]
        all_files: bool,
        /// Stage to plan for
        #[arg(short, long)]
        stage: Option<String>,
        /// Only plan this hook (id or alias)
        #[arg(long)]
        hook: Option<String>,
        /// Explicit candidate files
        files: Vec<String>,
    },
    /// Report hooks that apply to no file and excludes that exclude nothing
    Audit {
        /// Audit against these files instead of every tracked file
        files: Vec<String>,
    },
    /// Write a starter configuration
    Init,
    /// Show version information
    Version,
}

impl Cli {
    /// Execute the CLI command
    pub async fn run(self) -> Result<()> {
        let output = Output::new(self.verbose, self.quiet);
        let context = commands::CommandContext::new(self.config, self.format, self.no_color)?;

        match self.command {
            Some(Commands::Validate { files, strict }) => {
                commands::validate::execute(&context, files, strict, &output).await
            }
            Some(Commands::Show) => commands::show::execute(&context, &output).await,
            Some(Commands::Plan {
                all_files,
                stage,
                hook,
                files,
            }) => {
                let args = commands::plan::PlanArgs {
                    all_files,
                    stage,
                    hook,
                    files,
                };
                commands::plan::execute(&context, args, &output).await
            }
            Some(Commands::Audit { files }) => {
                commands::audit::execute(&context, files, &output).await
            }
            Some(Commands::Init) => commands::init::execute(&context, self.force, &output).await,
            Some(Commands::Version) => commands::version::execute(&output).await,
            None => {
                // Show help when no command is provided
                let mut cmd = Cli::command();
                cmd.print_help()?;
                Ok(())
            }
        }
    }
}
