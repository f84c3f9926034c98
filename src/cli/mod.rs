//! CLI module
//!
//! This module defines the command-line interface using clap and implements
//! the command execution logic.

use crate::codec::Codepoint;
use crate::{Config, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod commands;
pub mod output;

/// Integer-alphabet automaton toolkit
#[derive(Parser, Debug)]
#[command(name = "cp-automaton")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (overrides config, RUST_LOG overrides both)
    #[arg(long, global = true, env = "CP_AUTOMATON_LOG")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile a symbol pattern and print its automaton
    Compile {
        /// Symbol pattern, e.g. "1 2* 3" written as "12*3"
        #[arg(short, long)]
        pattern: String,

        /// Lowest codepoint kept (overrides config)
        #[arg(long)]
        min: Option<Codepoint>,

        /// Highest codepoint kept (overrides config)
        #[arg(long)]
        max: Option<Codepoint>,

        /// Keep the automaton as compiled
        #[arg(long)]
        no_minimize: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        output: OutputFormat,

        /// Write DOT output to this file instead of stdout
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Test words against a symbol pattern
    Run {
        /// Symbol pattern
        #[arg(short, long)]
        pattern: String,

        /// Comma-separated symbols, e.g. 1,2,3 (repeatable, empty for the
        /// empty word)
        #[arg(short, long, required = true)]
        word: Vec<String>,

        /// Lowest codepoint kept (overrides config)
        #[arg(long)]
        min: Option<Codepoint>,

        /// Highest codepoint kept (overrides config)
        #[arg(long)]
        max: Option<Codepoint>,
    },

    /// Show the codepoint of a symbol, or the symbol of a codepoint
    Symbol {
        /// Value to look up
        #[arg(allow_negative_numbers = true)]
        value: i64,

        /// Treat the value as a codepoint
        #[arg(short, long)]
        reverse: bool,
    },
}

/// Output format types
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// DOT format (Graphviz)
    Dot,
    /// Plain text table
    Table,
}

/// Execute the CLI command
pub fn execute(args: Cli, config: Config) -> Result<()> {
    match args.command {
        Commands::Compile { .. } => commands::compile::execute(args, config),
        Commands::Run { .. } => commands::run::execute(args, config),
        Commands::Symbol { value, reverse } => commands::symbol::execute(value, reverse),
    }
}
