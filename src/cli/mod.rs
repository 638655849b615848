//! Command-line interface for Marquee.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Marquee - movie catalog service
/// Movies, the characters in them and their genres, over HTTP
#[derive(Parser)]
#[command(name = "marquee")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of the search path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP API (default)
    Serve,

    /// Create default config file
    #[command(alias = "--init")]
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Apply database migrations and exit
    Migrate,
}

impl Cli {
    #[must_use]
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default() {
        let cli = Cli::parse_from(["marquee"]);
        assert_eq!(cli.command(), Commands::Serve);
        assert!(cli.config.is_none());
    }

    #[test]
    fn parses_init_and_config_path() {
        let cli = Cli::parse_from(["marquee", "init", "--force", "--config", "/etc/marquee.toml"]);
        assert_eq!(cli.command(), Commands::Init { force: true });
        assert_eq!(cli.config, Some(PathBuf::from("/etc/marquee.toml")));
    }

    #[test]
    fn parses_migrate() {
        let cli = Cli::parse_from(["marquee", "migrate"]);
        assert_eq!(cli.command(), Commands::Migrate);
    }
}
