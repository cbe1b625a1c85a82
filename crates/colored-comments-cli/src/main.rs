//! Command line driver for Colored Comments.
//!
//! Classifies the comments of a file against the configured tags and
//! generates, or reverts, the derived color scheme in a packages directory.

use std::io;

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use eyre::Result;

mod commands;
mod config;
mod error;
mod host;
mod logging;

use crate::commands::{Host, Session};
use crate::config::{CliConfig, LogLevel};
use crate::logging::init_logging;

/// Highlight tagged comments and keep a matching color scheme.
#[derive(Parser, Debug)]
#[command(name = "colored-comments", version, about)]
struct Cli {
    /// Plugin settings file (`colored_comments.sublime-settings`).
    #[arg(long, global = true, default_value = "colored_comments.sublime-settings")]
    settings: Utf8PathBuf,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

/// Supported commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the tagged comment lines of a file.
    Classify {
        /// File to classify.
        file: Utf8PathBuf,
        /// Also print the scope and draw flags of each line.
        #[arg(long)]
        verbose: bool,
        /// Packages directory; with `--preferences`, refresh the derived
        /// scheme first while the settings still offer it.
        #[arg(long, requires = "preferences")]
        packages: Option<Utf8PathBuf>,
        /// Preferences file holding `color_scheme`.
        #[arg(long, requires = "packages")]
        preferences: Option<Utf8PathBuf>,
    },
    /// Merge tag colours into a derived copy of the active color scheme.
    Generate {
        #[command(flatten)]
        host: HostArgs,
        /// Rebuild from the original scheme and always rewrite.
        #[arg(long)]
        regenerate: bool,
        /// Switch to the derived scheme when asked.
        #[arg(long, conflicts_with = "no")]
        yes: bool,
        /// Keep the current scheme when asked (the default).
        #[arg(long)]
        no: bool,
    },
    /// Restore the color scheme active before the derived one.
    Revert {
        #[command(flatten)]
        host: HostArgs,
    },
}

/// Where the editor's packages and preferences live.
#[derive(clap::Args, Debug)]
struct HostArgs {
    /// Packages directory holding color schemes.
    #[arg(long)]
    packages: Utf8PathBuf,
    /// Preferences file holding `color_scheme`.
    #[arg(long)]
    preferences: Utf8PathBuf,
}

impl HostArgs {
    fn host(&self) -> Host<'_> {
        Host {
            packages: &self.packages,
            preferences: &self.preferences,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::from_env()?.apply_overrides(cli.log_level);
    init_logging(&config);

    let mut session = Session::open(&cli.settings)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Commands::Classify {
            file,
            verbose,
            packages,
            preferences,
        } => {
            let host = packages
                .as_deref()
                .zip(preferences.as_deref())
                .map(|(packages, preferences)| Host {
                    packages,
                    preferences,
                });
            commands::classify(&mut session, &file, verbose, host, &mut out)
        }
        Commands::Generate {
            host,
            regenerate,
            yes,
            no: _,
        } => commands::generate(session, host.host(), regenerate, yes, &mut out),
        Commands::Revert { host } => commands::revert(session, host.host(), &mut out),
    }
}
