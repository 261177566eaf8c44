use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Top-level CLI parser for the `milestone-bridge` binary.
#[derive(Debug, Parser)]
#[command(
    name = "milestone-bridge",
    version,
    about = "Complete Process Street tasks when Teamwork milestones are completed"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Extra TOML config file, applied over the user and project files
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log format: text, json
    #[arg(long, global = true, default_value = "text")]
    pub log_format: LogFormat,

    /// Quiet mode (warnings and errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug logging, including every webhook parameter read)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Listen for Teamwork webhooks (default)
    Serve(ServeArgs),
    /// Run the milestone-completed pipeline once for a milestone
    Complete(CompleteArgs),
    /// Load and validate configuration, then exit
    CheckConfig,
}

#[derive(Debug, Default, clap::Args)]
pub struct ServeArgs {
    /// Listen address, overriding `server.listen`
    #[arg(long)]
    pub listen: Option<String>,
}

#[derive(Debug, clap::Args)]
pub struct CompleteArgs {
    /// Teamwork milestone id
    #[arg(long)]
    pub milestone_id: String,
}

impl Cli {
    /// Subcommand to run; `serve` when none was given.
    #[must_use]
    pub fn into_command(self) -> Commands {
        self.command
            .unwrap_or_else(|| Commands::Serve(ServeArgs::default()))
    }

    /// Default tracing filter for the verbosity flags.
    #[must_use]
    pub const fn log_level(&self) -> &'static str {
        if self.quiet {
            "warn"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}
