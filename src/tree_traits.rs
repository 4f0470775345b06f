//! Pretty tree rendering via `termtree`.
//!
//! `termtree::Tree` lives in another crate, so the conversions hang off a
//! local trait instead of inherent impls (E0116).

use generational_arena::Index;
use termtree::Tree as TermTree;

use crate::bst::BinarySearchTree;
use crate::tree::Tree;

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> TermTree<String>;
}

impl<T: ToString> TreeNodeConvert for Tree<T> {
    fn to_tree_string(&self) -> TermTree<String> {
        fn build<T: ToString>(tree: &Tree<T>, node_idx: Index) -> TermTree<String> {
            let node = tree.get_node(node_idx).expect("child index in arena");
            let mut rendered = TermTree::new(node.value.to_string());
            for &child_idx in &node.children {
                rendered.push(build(tree, child_idx));
            }
            rendered
        }

        match self.root() {
            Some(root_idx) => build(self, root_idx),
            None => TermTree::new("Empty tree".to_string()),
        }
    }
}

impl<T: ToString> TreeNodeConvert for BinarySearchTree<T> {
    /// Children render left before right; one-child nodes show the single
    /// child without marking which side it hangs on.
    fn to_tree_string(&self) -> TermTree<String> {
        fn build<T: ToString>(tree: &BinarySearchTree<T>, node_idx: Index) -> TermTree<String> {
            let value = tree.value(node_idx).expect("child index in arena");
            let mut rendered = TermTree::new(value.to_string());
            if let Some(left) = tree.left(node_idx) {
                rendered.push(build(tree, left));
            }
            if let Some(right) = tree.right(node_idx) {
                rendered.push(build(tree, right));
            }
            rendered
        }

        match self.root() {
            Some(root_idx) => build(self, root_idx),
            None => TermTree::new("Empty tree".to_string()),
        }
    }
}
