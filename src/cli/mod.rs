//! CLI command definitions for task-board.
//!
//! The main entry point is the `Cli` struct which contains subcommands.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::types::TaskFilter;

/// Task Board service and client
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    /// Task service base URL used by client commands (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the task service
    Serve {
        /// Port to listen on (overrides PORT and config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Database file (overrides DB_NAME and config)
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Show the latest pending tasks, or every task with --all
    List {
        #[arg(short, long)]
        all: bool,

        /// Filter for --all: all, pending or completed
        #[arg(short, long, default_value = "all", value_parser = parse_filter)]
        filter: TaskFilter,
    },

    /// Add a task
    Add {
        title: String,

        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// Replace a task's title, and its description when given
    Edit {
        id: i64,

        title: String,

        /// New description; the stored one is kept when omitted
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Mark a task as completed
    Done { id: i64 },

    /// Delete a task
    Delete {
        id: i64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Keep the board on screen with a rotating quote until Ctrl-C
    Watch,
}

fn parse_filter(s: &str) -> Result<TaskFilter, String> {
    TaskFilter::parse(s).ok_or_else(|| format!("unknown filter '{}' (all, pending, completed)", s))
}
