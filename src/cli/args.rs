//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

use crate::config::Order;

/// Load trees written in parenthetic notation and walk them
#[derive(Parser, Debug)]
#[command(name = "postree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global one
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print every label, one per line
    Show {
        /// Parenthetic tree file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Traversal order (overrides config)
        #[arg(short, long, value_enum)]
        order: Option<Order>,
        /// Print all labels on one line
        #[arg(long)]
        inline: bool,
    },

    /// Show the tree as an indented diagram
    Tree {
        /// Parenthetic tree file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Re-serialize in canonical parenthetic form
    Format {
        /// Parenthetic tree file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Print node count, leaf count and height
    Stats {
        /// Parenthetic tree file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Print a commented template
    Template,
    /// Print the global config file location
    Path,
}
