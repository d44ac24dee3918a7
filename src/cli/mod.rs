//! CLI module - Command-line interface for askai
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

/// askai - ask a generative model and keep a log of the answers
#[derive(Parser)]
#[command(name = "askai")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the web server until interrupted
    #[command(alias = "daemon")]
    Serve,

    /// Ask a single question and record the answer
    #[command(alias = "a")]
    Ask {
        /// The question text
        #[arg(required = true)]
        question: Vec<String>,
    },

    /// Show recently recorded questions and answers
    #[command(alias = "h")]
    History {
        /// Number of entries to show
        #[arg(default_value = "10")]
        limit: u64,
    },

    /// Create default config file
    Init,
}

pub use commands::*;
