//! Doubly linked list backed by a generational arena.
//!
//! Forward (`next`) and backward (`previous`) links are both arena indices;
//! the arena owns every node, so the back-reference can never keep a removed
//! node alive. A handle to a removed node goes stale and lookups on it
//! return `None`.

use generational_arena::{Arena, Index};
use std::fmt;
use tracing::instrument;

use crate::error::{ContainerError, ContainerResult};

/// List node: a value plus its two neighbor links.
#[derive(Debug)]
pub struct Node<T> {
    value: T,
    /// Forward link, `None` for the terminal node
    next: Option<Index>,
    /// Back-reference, `None` for the head node
    previous: Option<Index>,
}

/// Doubly linked list with O(1) structural mutation given a node handle.
///
/// There is no tail pointer; the last element is found by traversal, so
/// `append` and `last` are O(n).
#[derive(Debug)]
pub struct DoublyLinkedList<T> {
    /// Arena storage for all list nodes
    arena: Arena<Node<T>>,
    /// Index of the head node, `None` for the empty list
    head: Option<Index>,
}

impl<T> Default for DoublyLinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DoublyLinkedList<T> {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            head: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Handle of the head node.
    pub fn first(&self) -> Option<Index> {
        self.head
    }

    /// Handle of the terminal node, found by walking from the head.
    #[instrument(level = "trace", skip(self))]
    pub fn last(&self) -> Option<Index> {
        let mut node = self.head?;
        while let Some(next) = self.arena[node].next {
            node = next;
        }
        Some(node)
    }

    /// Number of nodes, counted by walking the forward links. Not cached.
    #[instrument(level = "trace", skip(self))]
    pub fn count(&self) -> usize {
        let mut count = 0;
        let mut node = self.head;
        while let Some(idx) = node {
            count += 1;
            node = self.arena[idx].next;
        }
        count
    }

    pub fn value(&self, node: Index) -> Option<&T> {
        self.arena.get(node).map(|n| &n.value)
    }

    pub fn value_mut(&mut self, node: Index) -> Option<&mut T> {
        self.arena.get_mut(node).map(|n| &mut n.value)
    }

    pub fn next(&self, node: Index) -> Option<Index> {
        self.arena.get(node).and_then(|n| n.next)
    }

    pub fn previous(&self, node: Index) -> Option<Index> {
        self.arena.get(node).and_then(|n| n.previous)
    }

    /// Creates a node for `value` and links it after the current last node,
    /// or makes it the head of an empty list.
    #[instrument(level = "debug", skip(self, value))]
    pub fn append(&mut self, value: T) -> Index {
        let last = self.last();
        self.link_back(value, last)
    }

    /// Handle of the node at `index`, walking forward from the head.
    /// `None` past the end of the list.
    #[instrument(level = "trace", skip(self))]
    pub fn node_at(&self, index: usize) -> Option<Index> {
        let mut node = self.head;
        let mut i = index;
        while let Some(idx) = node {
            if i == 0 {
                return Some(idx);
            }
            i -= 1;
            node = self.arena[idx].next;
        }
        None
    }

    /// Value at `index`, `None` past the end.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.node_at(index).and_then(|idx| self.value(idx))
    }

    /// Inserts `value` so that it ends up at position `index`, wiring both
    /// neighbor links and re-pointing the head when inserting at 0.
    ///
    /// Panics when `index > count` (precondition).
    #[instrument(level = "debug", skip(self, value))]
    pub fn insert(&mut self, value: T, index: usize) -> Index {
        let (prev, next) = self.nodes_before_and_after(index);

        let node = self.arena.insert(Node {
            value,
            next,
            previous: prev,
        });
        match prev {
            Some(p) => self.arena[p].next = Some(node),
            None => self.head = Some(node),
        }
        if let Some(n) = next {
            self.arena[n].previous = Some(node);
        }
        node
    }

    /// The (prev, next) pair surrounding position `index`. Either side may be
    /// absent: both for the empty list, one at the ends.
    fn nodes_before_and_after(&self, index: usize) -> (Option<Index>, Option<Index>) {
        let mut i = index;
        let mut next = self.head;
        let mut prev = None;

        while i > 0 {
            match next {
                Some(idx) => {
                    i -= 1;
                    prev = next;
                    next = self.arena[idx].next;
                }
                None => break,
            }
        }
        if i != 0 {
            panic!(
                "{}",
                ContainerError::InsertBeyondEnd {
                    index,
                    len: self.count(),
                }
            );
        }
        (prev, next)
    }

    /// Unlinks `node` from its neighbors, takes it out of the arena and
    /// returns its value. Updates the head when the first node is removed.
    ///
    /// Panics on a stale or foreign handle (precondition).
    #[instrument(level = "debug", skip(self))]
    pub fn remove(&mut self, node: Index) -> T {
        let removed = match self.arena.remove(node) {
            Some(n) => n,
            None => panic!("{}", ContainerError::StaleHandle),
        };
        match removed.previous {
            Some(p) => self.arena[p].next = removed.next,
            None => self.head = removed.next,
        }
        if let Some(n) = removed.next {
            self.arena[n].previous = removed.previous;
        }
        removed.value
    }

    /// Panics when the list is empty (precondition).
    pub fn remove_last(&mut self) -> T {
        match self.try_remove_last() {
            Ok(value) => value,
            Err(e) => panic!("{}", e),
        }
    }

    #[instrument(level = "debug", skip(self))]
    pub fn try_remove_last(&mut self) -> ContainerResult<T> {
        let last = self.last().ok_or(ContainerError::Empty("remove_last"))?;
        Ok(self.remove(last))
    }

    /// Panics when `index` has no corresponding node (precondition).
    pub fn remove_at(&mut self, index: usize) -> T {
        match self.try_remove_at(index) {
            Ok(value) => value,
            Err(e) => panic!("{}", e),
        }
    }

    #[instrument(level = "debug", skip(self))]
    pub fn try_remove_at(&mut self, index: usize) -> ContainerResult<T> {
        let node = self
            .node_at(index)
            .ok_or_else(|| ContainerError::IndexOutOfBounds {
                index,
                len: self.count(),
            })?;
        Ok(self.remove(node))
    }

    /// Drops every node.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_all(&mut self) {
        self.arena.clear();
        self.head = None;
    }

    /// Reverses the list in place: one walk, swapping each node's link pair
    /// and re-pointing the head at the final node visited.
    #[instrument(level = "debug", skip(self))]
    pub fn reverse(&mut self) {
        let mut node = self.head;
        while let Some(current) = node {
            node = self.arena[current].next;
            let n = &mut self.arena[current];
            std::mem::swap(&mut n.next, &mut n.previous);
            self.head = Some(current);
        }
    }

    /// New list with `transform` applied to every value in order. The
    /// receiver is unmodified.
    #[instrument(level = "debug", skip(self, transform))]
    pub fn map<U, F>(&self, mut transform: F) -> DoublyLinkedList<U>
    where
        F: FnMut(&T) -> U,
    {
        let mut result = DoublyLinkedList::new();
        let mut tail = None;
        let mut node = self.head;
        while let Some(idx) = node {
            let n = &self.arena[idx];
            tail = Some(result.link_back(transform(&n.value), tail));
            node = n.next;
        }
        result
    }

    /// Front-to-back iterator over the values.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            node: self.head,
        }
    }

    /// Links a fresh node behind `last` without walking the list. `last`
    /// must be the current terminal node (or `None` for the empty list).
    fn link_back(&mut self, value: T, last: Option<Index>) -> Index {
        let node = self.arena.insert(Node {
            value,
            next: None,
            previous: last,
        });
        match last {
            Some(l) => self.arena[l].next = Some(node),
            None => self.head = Some(node),
        }
        node
    }
}

impl<T: Clone> DoublyLinkedList<T> {
    /// New list keeping only the values satisfying `predicate`, in original
    /// order. The receiver is unmodified.
    #[instrument(level = "debug", skip(self, predicate))]
    pub fn filter<F>(&self, mut predicate: F) -> DoublyLinkedList<T>
    where
        F: FnMut(&T) -> bool,
    {
        let mut result = DoublyLinkedList::new();
        let mut tail = None;
        let mut node = self.head;
        while let Some(idx) = node {
            let n = &self.arena[idx];
            if predicate(&n.value) {
                tail = Some(result.link_back(n.value.clone(), tail));
            }
            node = n.next;
        }
        result
    }
}

/// Indexed read access. Panics when `index` has no corresponding node.
impl<T> std::ops::Index<usize> for DoublyLinkedList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Some(value) => value,
            None => panic!(
                "{}",
                ContainerError::IndexOutOfBounds {
                    index,
                    len: self.count(),
                }
            ),
        }
    }
}

impl<T> FromIterator<T> for DoublyLinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = DoublyLinkedList::new();
        let mut tail = None;
        for value in iter {
            tail = Some(list.link_back(value, tail));
        }
        list
    }
}

pub struct Iter<'a, T> {
    list: &'a DoublyLinkedList<T>,
    node: Option<Index>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.node?;
        let n = &self.list.arena[current];
        self.node = n.next;
        Some(&n.value)
    }
}

impl<'a, T> IntoIterator for &'a DoublyLinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Display> fmt::Display for DoublyLinkedList<T> {
    /// Renders `[v1, v2, ..., vn]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        let mut node = self.head;
        while let Some(idx) = node {
            let n = &self.arena[idx];
            write!(f, "{}", n.value)?;
            node = n.next;
            if node.is_some() {
                write!(f, ", ")?;
            }
        }
        write!(f, "]")
    }
}
