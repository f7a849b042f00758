//! CLI command definitions for the `noah` binary.

pub mod chat;
pub mod history;
pub mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Noah, the store-support chat assistant: server and terminal client.
#[derive(Parser)]
#[command(name = "noah", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log as JSON lines and print machine-readable output.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (default: {data_dir}/config.toml).
    #[arg(long, global = true, env = "NOAH_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP chat server.
    Serve {
        /// Host to bind to.
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on.
        #[arg(short, long)]
        port: Option<u16>,

        /// SQLite database URL.
        #[arg(long)]
        db: Option<String>,
    },

    /// Chat with Noah in the terminal.
    Chat {
        /// Server base URL.
        #[arg(long)]
        server: Option<String>,
    },

    /// Print the transcript of a conversation.
    History {
        /// Session id to look up.
        session_id: String,

        /// Server base URL.
        #[arg(long)]
        server: Option<String>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
