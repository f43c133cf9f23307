//! CLI argument definitions using clap

use clap::{Parser, Subcommand};

/// Classic design-pattern traversal demos: composite trees, cursors, visitors
#[derive(Parser, Debug)]
#[command(name = "rspatterns")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d, -dd, -ddd)
    #[arg(short = 'd', long = "debug", action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Composite demo: build a two-branch tree, mutate it, render each step
    Tree {
        /// Also print the tree structure
        #[arg(short, long)]
        show: bool,
    },

    /// Iterator demo: forward and backward cursors over one collection
    Iterate,

    /// Visitor demo: dispatch elements to a visitor chosen by tag
    Visit {
        /// Visitor tag ('x' or 'y'); both when omitted
        visitor: Option<String>,
    },

    /// Run all demos in order
    All,

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
