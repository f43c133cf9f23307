use std::fmt;

use generational_arena::{Arena, Index};
use itertools::Itertools;
use termtree::Tree;
use tracing::instrument;

use crate::errors::{PatternError, PatternResult};

/// Payload distinguishing terminal nodes from aggregating ones.
///
/// Leaves carry a display label; composites have a fixed rendering shape
/// (`Branch(...)`) and aggregate whatever their children render to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Leaf(String),
    Composite,
}

impl NodeKind {
    pub fn leaf(label: impl Into<String>) -> Self {
        NodeKind::Leaf(label.into())
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Leaf(label) => write!(f, "{}", label),
            NodeKind::Composite => write!(f, "Branch"),
        }
    }
}

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug)]
pub struct TreeNode {
    /// Leaf/composite payload for this node
    pub kind: NodeKind,
    /// Index of parent node in the arena, None for root nodes
    pub parent: Option<Index>,
    /// Indices of child nodes, in attach order
    pub children: Vec<Index>,
}

impl TreeNode {
    pub fn is_composite(&self) -> bool {
        matches!(self.kind, NodeKind::Composite)
    }
}

/// Arena-based composite tree.
///
/// The arena alone owns node storage; parent and child relations are plain
/// index fields. Child-to-parent links are observational: they never extend a
/// node's lifetime, and a freed slot simply stops resolving. This replaces the
/// shared/weak reference-counting a pointer-based composite would need.
#[derive(Debug, Default)]
pub struct TreeArena {
    arena: Arena<TreeNode>,
    root: Option<Index>,
}

impl TreeArena {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Allocates a node and, when a parent is given, attaches it there.
    ///
    /// The first node inserted without a parent becomes the root.
    #[instrument(level = "trace", skip(self))]
    pub fn insert_node(&mut self, kind: NodeKind, parent: Option<Index>) -> PatternResult<Index> {
        if let Some(parent_idx) = parent {
            if !self.arena.contains(parent_idx) {
                return Err(PatternError::NodeNotFound(parent_idx));
            }
        }

        let node_idx = self.arena.insert(TreeNode {
            kind,
            parent: None,
            children: Vec::new(),
        });

        match parent {
            Some(parent_idx) => self.attach(parent_idx, node_idx)?,
            None => {
                if self.root.is_none() {
                    self.root = Some(node_idx);
                }
            }
        }

        Ok(node_idx)
    }

    /// Attaches `child` under `parent`, setting the child's back-reference.
    ///
    /// A leaf parent ignores the request (no error). A child that already has
    /// a parent is detached from it first, so a node never has two parents.
    /// Attaching a node to itself or below one of its own descendants fails
    /// with `CycleDetected`.
    #[instrument(level = "trace", skip(self))]
    pub fn attach(&mut self, parent: Index, child: Index) -> PatternResult<()> {
        if !self.arena.contains(child) {
            return Err(PatternError::NodeNotFound(child));
        }
        let parent_node = self
            .arena
            .get(parent)
            .ok_or(PatternError::NodeNotFound(parent))?;
        if !parent_node.is_composite() {
            return Ok(());
        }
        if parent == child || self.is_ancestor(child, parent) {
            return Err(PatternError::CycleDetected { parent, child });
        }

        if let Some(old_parent) = self.arena[child].parent {
            self.unlink_child(old_parent, child);
        }

        self.arena[parent].children.push(child);
        self.arena[child].parent = Some(parent);
        Ok(())
    }

    /// Detaches `child` from `parent` and clears its back-reference.
    ///
    /// Detaching a non-member child is a no-op, as is detach on a leaf parent.
    /// The child stays in the arena and can be re-attached elsewhere.
    #[instrument(level = "trace", skip(self))]
    pub fn detach(&mut self, parent: Index, child: Index) -> PatternResult<()> {
        if !self.arena.contains(parent) {
            return Err(PatternError::NodeNotFound(parent));
        }
        if self.unlink_child(parent, child) {
            if let Some(node) = self.arena.get_mut(child) {
                node.parent = None;
            }
        }
        Ok(())
    }

    /// Frees `idx` and all its descendants, returning how many nodes were
    /// reclaimed. Indices into the freed subtree go stale and stop resolving.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_subtree(&mut self, idx: Index) -> PatternResult<usize> {
        if !self.arena.contains(idx) {
            return Err(PatternError::NodeNotFound(idx));
        }
        if let Some(parent) = self.arena[idx].parent {
            self.unlink_child(parent, idx);
        }

        let mut freed = 0;
        let mut stack = vec![idx];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.arena.remove(current) {
                stack.extend(node.children);
                freed += 1;
            }
        }
        if self.root == Some(idx) {
            self.root = None;
        }
        Ok(freed)
    }

    /// Renders the subtree rooted at `idx`.
    ///
    /// Leaves render their label. Composites render their children joined with
    /// `+` inside `Branch(...)`; an empty composite renders `Branch()`. A child
    /// index whose slot has been freed is skipped, not an error.
    #[instrument(level = "trace", skip(self))]
    pub fn render(&self, idx: Index) -> PatternResult<String> {
        let node = self.get_node(idx).ok_or(PatternError::NodeNotFound(idx))?;
        Ok(self.render_node(node))
    }

    fn render_node(&self, node: &TreeNode) -> String {
        match &node.kind {
            NodeKind::Leaf(label) => label.clone(),
            NodeKind::Composite => {
                let joined = node
                    .children
                    .iter()
                    .filter_map(|&child| self.get_node(child))
                    .map(|child| self.render_node(child))
                    .join("+");
                format!("Branch({})", joined)
            }
        }
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    pub fn is_composite(&self, idx: Index) -> PatternResult<bool> {
        self.get_node(idx)
            .map(TreeNode::is_composite)
            .ok_or(PatternError::NodeNotFound(idx))
    }

    pub fn parent(&self, idx: Index) -> Option<Index> {
        self.get_node(idx).and_then(|node| node.parent)
    }

    pub fn children(&self, idx: Index) -> &[Index] {
        self.get_node(idx)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    #[instrument(level = "trace", skip(self))]
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn iter_postorder(&self) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        if let Some(root) = self.root {
            self.calculate_depth(root)
        } else {
            0
        }
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Collects the labels of all live leaf nodes, left to right.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_labels(&self) -> Vec<String> {
        let mut leaves = Vec::new();
        if let Some(root) = self.root {
            self.collect_leaves(root, &mut leaves);
        }
        leaves
    }

    fn collect_leaves(&self, node_idx: Index, leaves: &mut Vec<String>) {
        if let Some(node) = self.get_node(node_idx) {
            match &node.kind {
                NodeKind::Leaf(label) => leaves.push(label.clone()),
                NodeKind::Composite => {
                    for &child in &node.children {
                        self.collect_leaves(child, leaves);
                    }
                }
            }
        }
    }

    /// Converts the subtree at `idx` into a `termtree::Tree` for display.
    pub fn to_termtree(&self, idx: Index) -> PatternResult<Tree<String>> {
        let node = self.get_node(idx).ok_or(PatternError::NodeNotFound(idx))?;
        let leaves: Vec<_> = node
            .children
            .iter()
            .filter_map(|&child| self.to_termtree(child).ok())
            .collect();
        Ok(Tree::new(node.kind.to_string()).with_leaves(leaves))
    }

    fn is_ancestor(&self, ancestor: Index, descendant: Index) -> bool {
        let mut current = self.parent(descendant);
        while let Some(idx) = current {
            if idx == ancestor {
                return true;
            }
            current = self.parent(idx);
        }
        false
    }

    fn unlink_child(&mut self, parent: Index, child: Index) -> bool {
        if let Some(node) = self.arena.get_mut(parent) {
            if let Some(pos) = node.children.iter().position(|&c| c == child) {
                node.children.remove(pos);
                return true;
            }
        }
        false
    }
}

pub struct TreeIterator<'a> {
    arena: &'a TreeArena,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(arena: &'a TreeArena) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = arena.root() {
            stack.push(root);
        }
        Self { arena, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a> {
    arena: &'a TreeArena,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(arena: &'a TreeArena) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = arena.root() {
            stack.push((root, false));
        }
        Self { arena, stack }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                if !visited {
                    self.stack.push((current_idx, true));
                    for &child in node.children.iter().rev() {
                        self.stack.push((child, false));
                    }
                } else {
                    return Some((current_idx, node));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_parent_ignores_attach() {
        let mut tree = TreeArena::new();
        let leaf = tree.insert_node(NodeKind::leaf("Leaf"), None).unwrap();
        let other = tree.insert_node(NodeKind::leaf("Other"), None).unwrap();

        tree.attach(leaf, other).unwrap();

        assert!(tree.children(leaf).is_empty());
        assert_eq!(tree.parent(other), None);
    }

    #[test]
    fn test_attach_rejects_self_cycle() {
        let mut tree = TreeArena::new();
        let root = tree.insert_node(NodeKind::Composite, None).unwrap();

        let err = tree.attach(root, root).unwrap_err();
        assert!(matches!(err, PatternError::CycleDetected { .. }));
    }

    #[test]
    fn test_reparent_keeps_single_parent() {
        let mut tree = TreeArena::new();
        let root = tree.insert_node(NodeKind::Composite, None).unwrap();
        let branch = tree.insert_node(NodeKind::Composite, Some(root)).unwrap();
        let leaf = tree.insert_node(NodeKind::leaf("Leaf"), Some(root)).unwrap();

        tree.attach(branch, leaf).unwrap();

        assert_eq!(tree.parent(leaf), Some(branch));
        assert!(!tree.children(root).contains(&leaf));
        assert!(tree.children(branch).contains(&leaf));
    }
}
