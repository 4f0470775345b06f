//! General multi-child tree backed by a generational arena.
//!
//! Each node holds an arbitrary payload, a parent back-reference and an
//! ordered list of children. One `Tree` value is one complete hierarchy.

use generational_arena::{Arena, Index};
use std::fmt;
use tracing::instrument;

/// Tree node: payload plus structural links.
#[derive(Debug)]
pub struct TreeNode<T> {
    pub value: T,
    /// Index of the parent node, `None` for the root
    pub parent: Option<Index>,
    /// Indices of child nodes, in insertion order
    pub children: Vec<Index>,
}

/// Arena-based tree for payloads of any type.
#[derive(Debug)]
pub struct Tree<T> {
    /// Arena storage for all tree nodes
    arena: Arena<TreeNode<T>>,
    /// Index of the root node, `None` for the empty tree
    root: Option<Index>,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Tree<T> {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Inserts a node under `parent`, or as the root when `parent` is
    /// `None`.
    #[instrument(level = "trace", skip(self, value))]
    pub fn insert_node(&mut self, value: T, parent: Option<Index>) -> Index {
        let node = TreeNode {
            value,
            parent,
            children: Vec::new(),
        };
        let node_idx = self.arena.insert(node);

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.push(node_idx);
            }
        } else {
            self.root = Some(node_idx);
        }

        node_idx
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode<T>> {
        self.arena.get(idx)
    }

    pub fn value(&self, idx: Index) -> Option<&T> {
        self.arena.get(idx).map(|n| &n.value)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn count(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Pre-order iterator: node before its children, left to right.
    pub fn iter(&self) -> TreeIterator<'_, T> {
        TreeIterator::new(self)
    }

    /// Post-order iterator: children before their node.
    pub fn iter_postorder(&self) -> PostOrderIterator<'_, T> {
        PostOrderIterator::new(self)
    }

    /// Longest root-to-leaf path, counted in nodes. 0 for the empty tree.
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

    /// Payloads of all leaf nodes (nodes with no children), left to right.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_values(&self) -> Vec<&T> {
        let mut leaves = Vec::new();
        if let Some(root) = self.root {
            self.collect_leaves(root, &mut leaves);
        }
        leaves
    }

    fn collect_leaves<'a>(&'a self, node_idx: Index, leaves: &mut Vec<&'a T>) {
        if let Some(node) = self.get_node(node_idx) {
            if node.children.is_empty() {
                leaves.push(&node.value);
            } else {
                for &child in &node.children {
                    self.collect_leaves(child, leaves);
                }
            }
        }
    }
}

impl<T: PartialEq> Tree<T> {
    /// Depth-first search for a payload: a node matches before its children
    /// are tried, children left to right.
    #[instrument(level = "trace", skip(self, value))]
    pub fn search(&self, value: &T) -> Option<Index> {
        self.root.and_then(|root| self.search_from(root, value))
    }

    fn search_from(&self, node_idx: Index, value: &T) -> Option<Index> {
        let node = self.get_node(node_idx)?;
        if node.value == *value {
            return Some(node_idx);
        }
        for &child in &node.children {
            if let Some(found) = self.search_from(child, value) {
                return Some(found);
            }
        }
        None
    }
}

pub struct TreeIterator<'a, T> {
    tree: &'a Tree<T>,
    stack: Vec<Index>,
}

impl<'a, T> TreeIterator<'a, T> {
    fn new(tree: &'a Tree<T>) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = tree.root() {
            stack.push(root);
        }
        Self { tree, stack }
    }
}

impl<'a, T> Iterator for TreeIterator<'a, T> {
    type Item = (Index, &'a TreeNode<T>);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
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

pub struct PostOrderIterator<'a, T> {
    tree: &'a Tree<T>,
    stack: Vec<(Index, bool)>,
}

impl<'a, T> PostOrderIterator<'a, T> {
    fn new(tree: &'a Tree<T>) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = tree.root() {
            stack.push((root, false));
        }
        Self { tree, stack }
    }
}

impl<'a, T> Iterator for PostOrderIterator<'a, T> {
    type Item = (Index, &'a TreeNode<T>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
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

impl<T: fmt::Display> Tree<T> {
    fn fmt_subtree(&self, f: &mut fmt::Formatter<'_>, node_idx: Index) -> fmt::Result {
        let Some(node) = self.get_node(node_idx) else {
            return Ok(());
        };
        write!(f, "{}", node.value)?;
        if !node.children.is_empty() {
            write!(f, "{{")?;
            for (i, &child) in node.children.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                self.fmt_subtree(f, child)?;
            }
            write!(f, "}}")?;
        }
        Ok(())
    }
}

impl<T: fmt::Display> fmt::Display for Tree<T> {
    /// Renders `value{child1, child2}`, braces omitted for leaves.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root {
            Some(root) => self.fmt_subtree(f, root),
            None => Ok(()),
        }
    }
}
