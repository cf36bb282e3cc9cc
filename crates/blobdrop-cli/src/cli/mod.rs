//! CLI for blobdrop.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use commands::{run_completions, run_config, run_get, run_man, GetArgs};

/// Top-level CLI for blobdrop.
#[derive(Debug, Parser)]
#[command(name = "blobdrop", version)]
#[command(about = "Fetch one URL into memory and save it as video.mp4", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download a URL and save it as video.mp4.
    Get {
        /// Direct HTTP/HTTPS URL to download.
        url: String,
        /// Save into DIR instead of the configured or current directory.
        #[arg(long, value_name = "DIR")]
        download_dir: Option<PathBuf>,
        /// Replace an existing video.mp4 instead of picking a new name.
        #[arg(long)]
        overwrite: bool,
    },

    /// Show the config file path and effective configuration.
    Config,

    /// Print shell completions to stdout.
    Completions {
        /// Target shell.
        shell: Shell,
    },

    /// Print the man page (roff) to stdout.
    Man,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Get {
                url,
                download_dir,
                overwrite,
            } => {
                run_get(GetArgs {
                    url,
                    download_dir,
                    overwrite,
                })
                .await?
            }
            CliCommand::Config => run_config()?,
            CliCommand::Completions { shell } => run_completions(shell)?,
            CliCommand::Man => run_man()?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
