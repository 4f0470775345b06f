//! Unbalanced binary search tree backed by a generational arena.
//!
//! Child links (`left`, `right`) and the `parent` back-reference are all
//! arena indices. The arena owns every node; removal takes the node out of
//! the arena, so its handle goes stale instead of dangling.
//!
//! Insertion never rebalances. Pathological insert orders degrade every
//! operation to O(n), and the depth of a node is a function of the exact
//! insert sequence.

use generational_arena::{Arena, Index};
use std::fmt;
use tracing::instrument;

use crate::error::{ContainerError, ContainerResult};

/// Tree node: a value, two owned child slots and the parent back-reference.
#[derive(Debug)]
pub struct Node<T> {
    value: T,
    /// Back-reference, `None` for the root
    parent: Option<Index>,
    left: Option<Index>,
    right: Option<Index>,
}

/// Binary search tree: left-subtree values compare `<` the node's value,
/// right-subtree values `>=` (ties descend right).
#[derive(Debug)]
pub struct BinarySearchTree<T> {
    /// Arena storage for all tree nodes
    arena: Arena<Node<T>>,
    /// Index of the root node, `None` once the last node is removed
    root: Option<Index>,
}

impl<T> BinarySearchTree<T> {
    /// Tree holding a single root value.
    pub fn new(value: T) -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(Node {
            value,
            parent: None,
            left: None,
            right: None,
        });
        Self {
            arena,
            root: Some(root),
        }
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Total number of nodes in the tree.
    pub fn count(&self) -> usize {
        self.arena.len()
    }

    pub fn value(&self, node: Index) -> Option<&T> {
        self.arena.get(node).map(|n| &n.value)
    }

    pub fn left(&self, node: Index) -> Option<Index> {
        self.arena.get(node).and_then(|n| n.left)
    }

    pub fn right(&self, node: Index) -> Option<Index> {
        self.arena.get(node).and_then(|n| n.right)
    }

    pub fn parent(&self, node: Index) -> Option<Index> {
        self.arena.get(node).and_then(|n| n.parent)
    }

    pub fn is_root(&self, node: Index) -> bool {
        self.arena[node].parent.is_none()
    }

    pub fn is_leaf(&self, node: Index) -> bool {
        let n = &self.arena[node];
        n.left.is_none() && n.right.is_none()
    }

    pub fn is_left_child(&self, node: Index) -> bool {
        self.arena[node]
            .parent
            .is_some_and(|p| self.arena[p].left == Some(node))
    }

    pub fn is_right_child(&self, node: Index) -> bool {
        self.arena[node]
            .parent
            .is_some_and(|p| self.arena[p].right == Some(node))
    }

    pub fn has_any_child(&self, node: Index) -> bool {
        !self.is_leaf(node)
    }

    pub fn has_both_children(&self, node: Index) -> bool {
        let n = &self.arena[node];
        n.left.is_some() && n.right.is_some()
    }

    /// Number of nodes in the subtree rooted at `node`.
    #[instrument(level = "trace", skip(self))]
    pub fn subtree_count(&self, node: Index) -> usize {
        let n = &self.arena[node];
        let left = n.left.map_or(0, |l| self.subtree_count(l));
        let right = n.right.map_or(0, |r| self.subtree_count(r));
        left + 1 + right
    }

    /// Leftmost node of the subtree rooted at `node`.
    pub fn minimum_of(&self, node: Index) -> Index {
        let mut current = node;
        while let Some(left) = self.arena[current].left {
            current = left;
        }
        current
    }

    /// Rightmost node of the subtree rooted at `node`.
    pub fn maximum_of(&self, node: Index) -> Index {
        let mut current = node;
        while let Some(right) = self.arena[current].right {
            current = right;
        }
        current
    }

    pub fn minimum(&self) -> Option<Index> {
        self.root.map(|root| self.minimum_of(root))
    }

    pub fn maximum(&self) -> Option<Index> {
        self.root.map(|root| self.maximum_of(root))
    }

    /// Number of parent links walked from `node` to the root.
    #[instrument(level = "trace", skip(self))]
    pub fn depth(&self, node: Index) -> usize {
        let mut edges = 0;
        let mut current = node;
        while let Some(parent) = self.arena[current].parent {
            edges += 1;
            current = parent;
        }
        edges
    }

    /// In-order iterator over `(handle, value)` pairs, leftmost first.
    pub fn iter(&self) -> InOrderIter<'_, T> {
        InOrderIter {
            tree: self,
            next: self.root,
            stack: Vec::new(),
        }
    }

    /// Applies `process` to every value: left subtree, node, right subtree.
    pub fn traverse_in_order<F: FnMut(&T)>(&self, mut process: F) {
        if let Some(root) = self.root {
            self.in_order_from(root, &mut process);
        }
    }

    /// Applies `process` to every value: node, left subtree, right subtree.
    pub fn traverse_pre_order<F: FnMut(&T)>(&self, mut process: F) {
        if let Some(root) = self.root {
            self.pre_order_from(root, &mut process);
        }
    }

    /// Applies `process` to every value: left subtree, right subtree, node.
    pub fn traverse_post_order<F: FnMut(&T)>(&self, mut process: F) {
        if let Some(root) = self.root {
            self.post_order_from(root, &mut process);
        }
    }

    /// In-order values transformed by `formula`, left to right.
    pub fn map<U, F: FnMut(&T) -> U>(&self, mut formula: F) -> Vec<U> {
        let mut result = Vec::with_capacity(self.count());
        self.traverse_in_order(|value| result.push(formula(value)));
        result
    }

    fn in_order_from<F: FnMut(&T)>(&self, node: Index, process: &mut F) {
        let n = &self.arena[node];
        if let Some(left) = n.left {
            self.in_order_from(left, process);
        }
        process(&n.value);
        if let Some(right) = n.right {
            self.in_order_from(right, process);
        }
    }

    fn pre_order_from<F: FnMut(&T)>(&self, node: Index, process: &mut F) {
        let n = &self.arena[node];
        process(&n.value);
        if let Some(left) = n.left {
            self.pre_order_from(left, process);
        }
        if let Some(right) = n.right {
            self.pre_order_from(right, process);
        }
    }

    fn post_order_from<F: FnMut(&T)>(&self, node: Index, process: &mut F) {
        let n = &self.arena[node];
        if let Some(left) = n.left {
            self.post_order_from(left, process);
        }
        if let Some(right) = n.right {
            self.post_order_from(right, process);
        }
        process(&n.value);
    }

    /// Re-points the parent's child slot holding `node` (or the root) at
    /// `replacement`, and `replacement`'s back-reference at that parent.
    fn reconnect_parent(&mut self, node: Index, replacement: Option<Index>) {
        let parent = self.arena[node].parent;
        match parent {
            Some(p) => {
                if self.arena[p].left == Some(node) {
                    self.arena[p].left = replacement;
                } else {
                    self.arena[p].right = replacement;
                }
            }
            None => self.root = replacement,
        }
        if let Some(r) = replacement {
            self.arena[r].parent = parent;
        }
    }

    /// Unlinks a node with at most one child: the parent's slot takes the
    /// child directly, and the node's own links are cleared. The node stays
    /// in the arena.
    fn splice_out(&mut self, node: Index) {
        let child = {
            let n = &self.arena[node];
            n.left.or(n.right)
        };
        self.reconnect_parent(node, child);
        let n = &mut self.arena[node];
        n.parent = None;
        n.left = None;
        n.right = None;
    }

    /// Removes `node`, re-linking survivors so the BST and parent invariants
    /// hold. Returns the removed value and the node now occupying the
    /// removed position (`None` when a leaf was removed). Re-roots the tree
    /// when the root is removed.
    ///
    /// Panics on a stale or foreign handle (precondition).
    #[instrument(level = "debug", skip(self))]
    pub fn remove(&mut self, node: Index) -> (T, Option<Index>) {
        let (left, right) = match self.arena.get(node) {
            Some(n) => (n.left, n.right),
            None => panic!("{}", ContainerError::StaleHandle),
        };

        let replacement = match (left, right) {
            (Some(_), Some(right)) => {
                // Two children: the in-order successor takes this node's
                // place. Splice it out of its original position first; when
                // the successor is the right child itself, the splice
                // promotes its own right subtree into the right slot, and
                // the graft below re-attaches exactly that.
                let successor = self.minimum_of(right);
                self.splice_out(successor);

                let remaining_left = self.arena[node].left;
                let remaining_right = self.arena[node].right;
                self.arena[successor].left = remaining_left;
                if let Some(l) = remaining_left {
                    self.arena[l].parent = Some(successor);
                }
                self.arena[successor].right = remaining_right;
                if let Some(r) = remaining_right {
                    self.arena[r].parent = Some(successor);
                }
                Some(successor)
            }
            (Some(child), None) | (None, Some(child)) => Some(child),
            (None, None) => None,
        };

        self.reconnect_parent(node, replacement);
        let removed = self
            .arena
            .remove(node)
            .expect("node was present at the start of remove");
        (removed.value, replacement)
    }
}

impl<T: Ord> BinarySearchTree<T> {
    /// Tree built by inserting the slice's values in order. The first value
    /// becomes the root; the tree's shape is a function of the input order.
    ///
    /// Panics on an empty slice (precondition).
    pub fn from_values(values: &[T]) -> Self
    where
        T: Clone,
    {
        match Self::try_from_values(values) {
            Ok(tree) => tree,
            Err(e) => panic!("{}", e),
        }
    }

    pub fn try_from_values(values: &[T]) -> ContainerResult<Self>
    where
        T: Clone,
    {
        let (first, rest) = values.split_first().ok_or(ContainerError::EmptyInput)?;
        let mut tree = Self::new(first.clone());
        for value in rest {
            tree.insert(value.clone());
        }
        Ok(tree)
    }

    /// Inserts `value` by descending from the root: `<` goes left, ties go
    /// right. Returns the handle of the new node.
    #[instrument(level = "debug", skip(self, value))]
    pub fn insert(&mut self, value: T) -> Index {
        match self.root {
            Some(root) => self.insert_below(root, value),
            None => {
                let idx = self.arena.insert(Node {
                    value,
                    parent: None,
                    left: None,
                    right: None,
                });
                self.root = Some(idx);
                idx
            }
        }
    }

    fn insert_below(&mut self, node: Index, value: T) -> Index {
        if value < self.arena[node].value {
            match self.arena[node].left {
                Some(left) => self.insert_below(left, value),
                None => {
                    let idx = self.attach_new(value, node);
                    self.arena[node].left = Some(idx);
                    idx
                }
            }
        } else {
            match self.arena[node].right {
                Some(right) => self.insert_below(right, value),
                None => {
                    let idx = self.attach_new(value, node);
                    self.arena[node].right = Some(idx);
                    idx
                }
            }
        }
    }

    fn attach_new(&mut self, value: T, parent: Index) -> Index {
        self.arena.insert(Node {
            value,
            parent: Some(parent),
            left: None,
            right: None,
        })
    }

    /// Iterative descent search. Alias for [`iterative_search`].
    ///
    /// [`iterative_search`]: BinarySearchTree::iterative_search
    pub fn search(&self, value: &T) -> Option<Index> {
        self.iterative_search(value)
    }

    #[instrument(level = "trace", skip(self, value))]
    pub fn recursive_search(&self, value: &T) -> Option<Index> {
        self.root
            .and_then(|root| self.recursive_search_from(root, value))
    }

    pub fn recursive_search_from(&self, node: Index, value: &T) -> Option<Index> {
        let n = &self.arena[node];
        if *value < n.value {
            n.left.and_then(|l| self.recursive_search_from(l, value))
        } else if *value > n.value {
            n.right.and_then(|r| self.recursive_search_from(r, value))
        } else {
            Some(node)
        }
    }

    /// Loop-based descent with the same logic as [`recursive_search`]; safe
    /// for deep, badly unbalanced trees.
    ///
    /// [`recursive_search`]: BinarySearchTree::recursive_search
    #[instrument(level = "trace", skip(self, value))]
    pub fn iterative_search(&self, value: &T) -> Option<Index> {
        let mut node = self.root;
        while let Some(idx) = node {
            let n = &self.arena[idx];
            if *value < n.value {
                node = n.left;
            } else if *value > n.value {
                node = n.right;
            } else {
                return Some(idx);
            }
        }
        None
    }

    /// In-order predecessor: maximum of the left subtree when one exists,
    /// otherwise the nearest ancestor with a strictly smaller value.
    pub fn predecessor(&self, node: Index) -> Option<Index> {
        if let Some(left) = self.arena[node].left {
            return Some(self.maximum_of(left));
        }
        let value = &self.arena[node].value;
        let mut current = node;
        while let Some(parent) = self.arena[current].parent {
            if self.arena[parent].value < *value {
                return Some(parent);
            }
            current = parent;
        }
        None
    }

    /// In-order successor: minimum of the right subtree when one exists,
    /// otherwise the nearest ancestor with a strictly greater value.
    pub fn successor(&self, node: Index) -> Option<Index> {
        if let Some(right) = self.arena[node].right {
            return Some(self.minimum_of(right));
        }
        let value = &self.arena[node].value;
        let mut current = node;
        while let Some(parent) = self.arena[current].parent {
            if self.arena[parent].value > *value {
                return Some(parent);
            }
            current = parent;
        }
        None
    }

    /// Checks the BST property against explicit bounds: every value must lie
    /// within `[min_value, max_value]`, the left recursion tightens the
    /// upper bound, the right recursion the lower one. Verification utility;
    /// mutators never call it.
    pub fn is_bst(&self, min_value: &T, max_value: &T) -> bool {
        self.root
            .map_or(true, |root| self.is_bst_from(root, min_value, max_value))
    }

    pub fn is_bst_from(&self, node: Index, min_value: &T, max_value: &T) -> bool {
        let n = &self.arena[node];
        if n.value < *min_value || n.value > *max_value {
            return false;
        }
        let left_ok = n
            .left
            .map_or(true, |l| self.is_bst_from(l, min_value, &n.value));
        let right_ok = n
            .right
            .map_or(true, |r| self.is_bst_from(r, &n.value, max_value));
        left_ok && right_ok
    }

    /// Bound-free validity check: strict `<` towards the left, `>=` towards
    /// the right, matching the insert rule for ties.
    pub fn is_valid_bst(&self) -> bool {
        self.is_valid_between(self.root, None, None)
    }

    fn is_valid_between(&self, node: Option<Index>, min: Option<&T>, max: Option<&T>) -> bool {
        let Some(idx) = node else { return true };
        let n = &self.arena[idx];
        if min.is_some_and(|m| n.value < *m) || max.is_some_and(|m| n.value >= *m) {
            return false;
        }
        self.is_valid_between(n.left, min, Some(&n.value))
            && self.is_valid_between(n.right, Some(&n.value), max)
    }
}

impl<T: Clone> BinarySearchTree<T> {
    /// In-order values, left to right.
    pub fn to_array(&self) -> Vec<T> {
        self.map(|value| value.clone())
    }
}

/// Explicit-stack in-order iterator: descend left pushing ancestors, pop,
/// then descend the popped node's right subtree.
pub struct InOrderIter<'a, T> {
    tree: &'a BinarySearchTree<T>,
    next: Option<Index>,
    stack: Vec<Index>,
}

impl<'a, T> Iterator for InOrderIter<'a, T> {
    type Item = (Index, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(idx) = self.next {
            self.stack.push(idx);
            self.next = self.tree.arena[idx].left;
        }
        let current = self.stack.pop()?;
        let n = &self.tree.arena[current];
        self.next = n.right;
        Some((current, &n.value))
    }
}

impl<T: fmt::Display> BinarySearchTree<T> {
    fn fmt_subtree(&self, f: &mut fmt::Formatter<'_>, node: Index) -> fmt::Result {
        let n = &self.arena[node];
        if let Some(left) = n.left {
            write!(f, "(")?;
            self.fmt_subtree(f, left)?;
            write!(f, ") <- ")?;
        }
        write!(f, "{}", n.value)?;
        if let Some(right) = n.right {
            write!(f, " -> (")?;
            self.fmt_subtree(f, right)?;
            write!(f, ")")?;
        }
        Ok(())
    }
}

impl<T: fmt::Display> fmt::Display for BinarySearchTree<T> {
    /// Renders the parenthesized infix form `(<left>) <- value -> (<right>)`,
    /// omitting absent sides.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root {
            Some(root) => self.fmt_subtree(f, root),
            None => Ok(()),
        }
    }
}
