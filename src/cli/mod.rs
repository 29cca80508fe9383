//! CLI module for botdesk - command-line interface and subcommands.

pub mod commands;

pub use commands::Cli;
