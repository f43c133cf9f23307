//! Deterministic demo drivers.
//!
//! Each driver assembles a fixed scenario and returns its output lines, so the
//! CLI can print them and tests can compare them byte for byte.

use tracing::{debug, instrument};

use crate::arena::{NodeKind, TreeArena};
use crate::cursor::Aggregate;
use crate::errors::PatternResult;
use crate::visitor::{visitor_for, Element, ElementA, ElementB};

/// Builds the two-branch tree, then mutates it, rendering after each change.
#[instrument]
pub fn composite_demo() -> PatternResult<Vec<String>> {
    let mut lines = Vec::new();

    let mut tree = TreeArena::new();
    let simple = tree.insert_node(NodeKind::leaf("Leaf"), None)?;
    lines.push(format!("Result: {}", tree.render(simple)?));

    let mut tree = TreeArena::new();
    let root = tree.insert_node(NodeKind::Composite, None)?;
    let branch1 = tree.insert_node(NodeKind::Composite, Some(root))?;
    tree.insert_node(NodeKind::leaf("Leaf"), Some(branch1))?;
    tree.insert_node(NodeKind::leaf("Leaf"), Some(branch1))?;
    let branch2 = tree.insert_node(NodeKind::Composite, Some(root))?;
    tree.insert_node(NodeKind::leaf("Leaf"), Some(branch2))?;
    lines.push(format!("Result: {}", tree.render(root)?));

    let simple = tree.insert_node(NodeKind::leaf("Leaf"), Some(root))?;
    lines.push(format!("Result: {}", tree.render(root)?));

    tree.remove_subtree(simple)?;
    let freed = tree.remove_subtree(branch2)?;
    debug!("freed {} nodes, {} remain", freed + 1, tree.len());
    lines.push(format!("Result: {}", tree.render(root)?));

    Ok(lines)
}

/// Runs a forward and a backward cursor over the digits 0..10.
#[instrument]
pub fn cursor_demo() -> PatternResult<Vec<String>> {
    let aggregate: Aggregate<usize> = (0..10).collect();

    let mut forward = String::new();
    let mut cursor = aggregate.cursor_forward();
    while cursor.has_next() {
        forward.push_str(&cursor.current()?.to_string());
    }

    let mut backward = String::new();
    let mut cursor = aggregate.cursor_backward();
    while cursor.has_next() {
        backward.push_str(&cursor.current()?.to_string());
    }

    Ok(vec![forward, backward])
}

/// Accepts `[ElementA, ElementB]` with the named visitor, or with X then Y
/// when no tag is given.
#[instrument]
pub fn visitor_demo(visitor_tag: Option<&str>) -> PatternResult<Vec<String>> {
    let elements = [Element::A(ElementA), Element::B(ElementB)];
    let tags: Vec<&str> = match visitor_tag {
        Some(tag) => vec![tag],
        None => vec!["x", "y"],
    };

    let mut lines = Vec::new();
    for tag in tags {
        let visitor = visitor_for(tag)?;
        for element in &elements {
            lines.push(element.accept(visitor.as_ref()));
        }
    }
    Ok(lines)
}
