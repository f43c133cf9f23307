use std::io;

use clap::CommandFactory;
use clap_complete::generate;
use colored::Colorize;
use tracing::{debug, instrument};

use crate::arena::{NodeKind, TreeArena};
use crate::cli::args::{Cli, Commands};
use crate::demos::{composite_demo, cursor_demo, visitor_demo};
use crate::errors::{PatternError, PatternResult};

pub fn execute_command(cli: &Cli) -> PatternResult<()> {
    match &cli.command {
        Some(Commands::Tree { show }) => _tree(*show),
        Some(Commands::Iterate) => _iterate(),
        Some(Commands::Visit { visitor }) => _visit(visitor.as_deref()),
        Some(Commands::All) => _all(),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => _all(),
    }
}

#[instrument]
fn _tree(show: bool) -> PatternResult<()> {
    for line in composite_demo()? {
        println!("{}", line);
    }
    if show {
        println!("{}", build_display_tree()?);
    }
    Ok(())
}

#[instrument]
fn _iterate() -> PatternResult<()> {
    for line in cursor_demo()? {
        println!("{}", line);
    }
    Ok(())
}

#[instrument]
fn _visit(visitor: Option<&str>) -> PatternResult<()> {
    match visitor_demo(visitor) {
        Ok(lines) => {
            for line in lines {
                println!("{}", line);
            }
            Ok(())
        }
        // An unknown tag is reported, not fatal
        Err(e @ PatternError::UnknownVisitor(_)) => {
            eprintln!("{}", format!("Cannot run visitor demo: {}", e).red());
            Ok(())
        }
        Err(e) => Err(e),
    }
}

#[instrument]
fn _all() -> PatternResult<()> {
    _tree(false)?;
    _iterate()?;
    _visit(None)
}

/// The final composite-demo tree as a termtree view.
fn build_display_tree() -> PatternResult<termtree::Tree<String>> {
    let mut tree = TreeArena::new();
    let root = tree.insert_node(NodeKind::Composite, None)?;
    let branch1 = tree.insert_node(NodeKind::Composite, Some(root))?;
    tree.insert_node(NodeKind::leaf("Leaf"), Some(branch1))?;
    tree.insert_node(NodeKind::leaf("Leaf"), Some(branch1))?;
    debug!("display tree has {} nodes", tree.len());
    tree.to_termtree(root)
}
