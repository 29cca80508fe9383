//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - list: list the research bots in the catalog
//! - describe: show a bot's input fields, including conditional groups
//! - invoke: submit an invocation and render the response

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Botdesk - a terminal workspace for research bot invocations
#[derive(Parser, Debug)]
#[command(name = "botdesk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the research bots in the catalog
    List {
        /// Show only bots in this category
        #[arg(long)]
        category: Option<String>,
    },

    /// Show a bot's input fields
    Describe {
        /// Tool id to describe
        tool: String,
    },

    /// Invoke a bot and render its response
    Invoke {
        /// Tool id to invoke
        tool: String,

        /// Field value as NAME=VALUE (repeatable)
        #[arg(short = 'f', long = "field", value_name = "NAME=VALUE")]
        fields: Vec<String>,

        /// File to attach (only for bots that accept one)
        #[arg(short, long)]
        attach: Option<PathBuf>,

        /// Copy the raw response to the clipboard after rendering
        #[arg(long)]
        copy: bool,
    },
}

/// Split a NAME=VALUE argument at the first '='
pub fn split_field(raw: &str) -> Option<(&str, &str)> {
    let (name, value) = raw.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((name, value))
}
