//! CLI command definitions for the `askcampus` binary.
//!
//! Uses clap derive macros for argument parsing.

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Session-scoped conversational relay for campus questions.
#[derive(Parser)]
#[command(name = "askcampus", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the relay HTTP server.
    Serve {
        /// Bind address, overriding config.toml (e.g., 0.0.0.0:8787).
        #[arg(long)]
        bind: Option<String>,
    },

    /// Interactive terminal chat against a running relay.
    Chat {
        /// Base URL of the relay server.
        #[arg(long, default_value = "http://127.0.0.1:8787")]
        server: String,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}
