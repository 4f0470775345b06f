//! Tests for the arena-backed binary search tree

use itertools::Itertools;
use rscoll::{BinarySearchTree, TreeNodeConvert};
use rstest::rstest;

/// The worked tree used throughout:
///
/// ```text
///         7
///        / \
///       2   10
///      / \  /
///     1  5 9
/// ```
fn worked_tree() -> BinarySearchTree<i32> {
    BinarySearchTree::from_values(&[7, 2, 5, 10, 9, 1])
}

// ============================================================
// Construction
// ============================================================

#[test]
fn given_value_sequence_when_built_then_in_order_is_sorted() {
    rscoll::util::testing::init_test_setup();
    let tree = worked_tree();

    assert_eq!(tree.count(), 6);
    assert_eq!(tree.to_array(), vec![1, 2, 5, 7, 9, 10]);
    assert!(tree.to_array().iter().tuple_windows().all(|(a, b)| a <= b));
}

#[test]
#[should_panic(expected = "empty slice")]
fn given_empty_slice_when_built_then_panics() {
    let _ = BinarySearchTree::<i32>::from_values(&[]);
}

#[test]
fn given_empty_slice_when_try_built_then_error_not_panic() {
    assert!(BinarySearchTree::<i32>::try_from_values(&[]).is_err());
}

#[test]
fn given_ascending_inserts_when_built_then_shape_degenerates() {
    // no rebalancing: each value hangs off the previous one's right slot
    let tree = BinarySearchTree::from_values(&[1, 2, 3, 4, 5]);
    let deepest = tree.search(&5).unwrap();

    assert_eq!(tree.depth(deepest), 4);
    assert!(tree.is_valid_bst());
}

#[test]
fn given_duplicate_insert_when_placed_then_routes_right() {
    let mut tree = BinarySearchTree::new(5);
    let dup = tree.insert(5);

    assert!(tree.is_right_child(dup));
    assert_eq!(tree.to_array(), vec![5, 5]);
    assert!(tree.is_valid_bst());
    // search stops at the topmost equal node
    assert_eq!(tree.search(&5), tree.root());
}

// ============================================================
// Search
// ============================================================

#[test]
fn given_worked_tree_when_searching_then_recursive_and_iterative_agree() {
    let tree = worked_tree();

    for v in -1..12 {
        let recursive = tree.recursive_search(&v);
        let iterative = tree.iterative_search(&v);
        assert_eq!(recursive, iterative, "disagreement for {}", v);
        if let Some(node) = recursive {
            assert_eq!(tree.value(node), Some(&v));
        }
    }
}

#[test]
fn given_worked_tree_when_searching_nine_then_node_found() {
    let tree = worked_tree();
    let node = tree.recursive_search(&9).unwrap();

    assert_eq!(tree.value(node), Some(&9));
    assert_eq!(tree.recursive_search(&6), None);
}

// ============================================================
// Extremes, neighbors, depth
// ============================================================

#[test]
fn given_worked_tree_when_querying_extremes_then_min_one_max_ten() {
    let tree = worked_tree();

    assert_eq!(tree.value(tree.minimum().unwrap()), Some(&1));
    assert_eq!(tree.value(tree.maximum().unwrap()), Some(&10));
}

#[test]
fn given_worked_tree_when_chaining_successors_then_in_order_reproduced() {
    let tree = worked_tree();

    let mut chain = Vec::new();
    let mut node = tree.minimum();
    while let Some(idx) = node {
        chain.push(*tree.value(idx).unwrap());
        node = tree.successor(idx);
    }
    assert_eq!(chain, tree.to_array());
}

#[test]
fn given_worked_tree_when_chaining_predecessors_then_reverse_in_order() {
    let tree = worked_tree();

    let mut chain = Vec::new();
    let mut node = tree.maximum();
    while let Some(idx) = node {
        chain.push(*tree.value(idx).unwrap());
        node = tree.predecessor(idx);
    }
    chain.reverse();
    assert_eq!(chain, tree.to_array());
}

#[test]
fn given_extreme_nodes_when_asking_beyond_then_none() {
    let tree = worked_tree();

    assert_eq!(tree.predecessor(tree.minimum().unwrap()), None);
    assert_eq!(tree.successor(tree.maximum().unwrap()), None);
}

#[test]
fn given_worked_tree_when_measuring_depth_then_parent_hops_counted() {
    let tree = worked_tree();

    assert_eq!(tree.depth(tree.root().unwrap()), 0);
    assert_eq!(tree.depth(tree.search(&1).unwrap()), 2);
    assert_eq!(tree.depth(tree.search(&9).unwrap()), 2);
    assert_eq!(tree.depth(tree.search(&10).unwrap()), 1);
}

// ============================================================
// Node predicates
// ============================================================

#[test]
fn given_worked_tree_when_classifying_nodes_then_predicates_match_shape() {
    let tree = worked_tree();
    let root = tree.root().unwrap();
    let two = tree.search(&2).unwrap();
    let one = tree.search(&1).unwrap();
    let ten = tree.search(&10).unwrap();

    assert!(tree.is_root(root));
    assert!(tree.has_both_children(root));
    assert!(tree.is_left_child(two));
    assert!(tree.is_right_child(ten));
    assert!(tree.is_leaf(one));
    assert!(!tree.has_any_child(one));
    assert_eq!(tree.subtree_count(two), 3);
    assert_eq!(tree.subtree_count(root), 6);
}

// ============================================================
// Removal
// ============================================================

#[test]
fn given_worked_tree_when_removing_root_then_successor_takes_over() {
    let mut tree = worked_tree();
    let root = tree.root().unwrap();

    let (removed, replacement) = tree.remove(root);
    assert_eq!(removed, 7);
    assert_eq!(replacement, tree.root());
    assert_eq!(tree.value(tree.root().unwrap()), Some(&9));
    assert_eq!(tree.count(), 5);
    assert_eq!(tree.to_array(), vec![1, 2, 5, 9, 10]);
    assert!(tree.is_bst(&i32::MIN, &i32::MAX));
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(5)]
#[case(7)]
#[case(9)]
#[case(10)]
fn given_worked_tree_when_removing_any_value_then_bst_holds_and_count_drops_by_one(
    #[case] target: i32,
) {
    let mut tree = worked_tree();
    let node = tree.search(&target).unwrap();

    let (removed, _) = tree.remove(node);
    assert_eq!(removed, target);
    assert_eq!(tree.count(), 5);
    assert!(tree.is_valid_bst());

    let mut expected = vec![1, 2, 5, 7, 9, 10];
    expected.retain(|v| *v != target);
    assert_eq!(tree.to_array(), expected);
}

#[test]
fn given_two_child_node_when_removed_then_successor_inherits_both_subtrees() {
    let mut tree = worked_tree();
    let two = tree.search(&2).unwrap();

    // successor of 2 is its right child 5, which has no subtrees of its own
    let (_, replacement) = tree.remove(two);
    let five = replacement.unwrap();
    assert_eq!(tree.value(five), Some(&5));
    assert_eq!(tree.value(tree.left(five).unwrap()), Some(&1));
    assert!(tree.is_left_child(five));
    assert!(tree.is_valid_bst());
}

#[test]
fn given_successor_with_right_child_when_grafted_then_nothing_is_orphaned() {
    //      4
    //     / \
    //    2   8
    //       /
    //      6
    //       \
    //        7
    // removing 4: successor is 6, whose right child 7 must survive the splice
    let mut tree = BinarySearchTree::from_values(&[4, 2, 8, 6, 7]);
    let root = tree.root().unwrap();

    let (removed, _) = tree.remove(root);
    assert_eq!(removed, 4);
    assert_eq!(tree.count(), 4);
    assert_eq!(tree.to_array(), vec![2, 6, 7, 8]);
    assert!(tree.is_valid_bst());
}

#[test]
fn given_one_child_node_when_removed_then_child_is_spliced_up() {
    let mut tree = worked_tree();
    let ten = tree.search(&10).unwrap();

    // 10 has only the left child 9
    let (removed, replacement) = tree.remove(ten);
    assert_eq!(removed, 10);
    assert_eq!(tree.value(replacement.unwrap()), Some(&9));
    assert!(tree.is_right_child(replacement.unwrap()));
    assert_eq!(tree.to_array(), vec![1, 2, 5, 7, 9]);
    assert!(tree.is_valid_bst());
}

#[test]
fn given_leaf_when_removed_then_parent_slot_clears() {
    let mut tree = worked_tree();
    let one = tree.search(&1).unwrap();
    let two = tree.search(&2).unwrap();

    let (removed, replacement) = tree.remove(one);
    assert_eq!(removed, 1);
    assert_eq!(replacement, None);
    assert_eq!(tree.left(two), None);
    assert!(tree.is_valid_bst());
}

#[test]
fn given_single_node_tree_when_removed_then_tree_is_empty() {
    let mut tree = BinarySearchTree::new(42);
    let root = tree.root().unwrap();

    let (removed, replacement) = tree.remove(root);
    assert_eq!(removed, 42);
    assert_eq!(replacement, None);
    assert!(tree.is_empty());
    assert_eq!(tree.count(), 0);

    // the tree accepts inserts again and re-roots
    let new_root = tree.insert(3);
    assert_eq!(tree.root(), Some(new_root));
}

#[test]
#[should_panic(expected = "does not belong")]
fn given_removed_node_when_removed_again_then_panics() {
    let mut tree = worked_tree();
    let one = tree.search(&1).unwrap();
    tree.remove(one);
    tree.remove(one);
}

#[test]
fn given_repeated_removals_when_tree_drains_then_each_step_stays_valid() {
    let mut tree = BinarySearchTree::from_values(&[8, 3, 10, 1, 6, 14, 4, 7, 13]);
    let mut expected = vec![1, 3, 4, 6, 7, 8, 10, 13, 14];

    for target in [8, 1, 14, 6, 3, 13, 10, 7, 4] {
        let node = tree.search(&target).unwrap();
        tree.remove(node);
        expected.retain(|v| *v != target);
        assert_eq!(tree.to_array(), expected);
        assert!(tree.is_valid_bst());
    }
    assert!(tree.is_empty());
}

// ============================================================
// Validity checking
// ============================================================

#[test]
fn given_insert_sequences_when_checked_then_bst_property_always_holds() {
    let sequences: [&[i32]; 4] = [
        &[7, 2, 5, 10, 9, 1],
        &[1, 2, 3, 4, 5, 6],
        &[6, 5, 4, 3, 2, 1],
        &[5, 5, 5, 1, 9, 5],
    ];
    for seq in sequences {
        let tree = BinarySearchTree::from_values(seq);
        assert!(tree.is_bst(&i32::MIN, &i32::MAX), "sequence {:?}", seq);
        assert!(tree.is_valid_bst(), "sequence {:?}", seq);
    }
}

#[test]
fn given_subtree_when_checked_with_tight_bounds_then_violations_surface() {
    let tree = worked_tree();
    let two = tree.search(&2).unwrap();

    // the subtree under 2 holds {1, 2, 5}
    assert!(tree.is_bst_from(two, &1, &5));
    assert!(!tree.is_bst_from(two, &2, &5));
    assert!(!tree.is_bst_from(two, &1, &4));
}

// ============================================================
// Traversal and rendering
// ============================================================

#[test]
fn given_worked_tree_when_traversing_then_each_order_is_correct() {
    let tree = worked_tree();

    let mut in_order = Vec::new();
    tree.traverse_in_order(|v| in_order.push(*v));
    assert_eq!(in_order, vec![1, 2, 5, 7, 9, 10]);

    let mut pre_order = Vec::new();
    tree.traverse_pre_order(|v| pre_order.push(*v));
    assert_eq!(pre_order, vec![7, 2, 1, 5, 10, 9]);

    let mut post_order = Vec::new();
    tree.traverse_post_order(|v| post_order.push(*v));
    assert_eq!(post_order, vec![1, 5, 2, 9, 10, 7]);
}

#[test]
fn given_worked_tree_when_iterated_then_pairs_come_in_order() {
    let tree = worked_tree();

    let values: Vec<i32> = tree.iter().map(|(_, v)| *v).collect();
    assert_eq!(values, vec![1, 2, 5, 7, 9, 10]);

    for (idx, value) in tree.iter() {
        assert_eq!(tree.value(idx), Some(value));
    }
}

#[test]
fn given_worked_tree_when_mapped_then_formula_applies_in_order() {
    let tree = worked_tree();
    assert_eq!(tree.map(|v| v * 2), vec![2, 4, 10, 14, 18, 20]);
    // receiver untouched
    assert_eq!(tree.count(), 6);
}

#[test]
fn given_worked_tree_when_displayed_then_infix_form_matches() {
    let tree = worked_tree();
    assert_eq!(
        tree.to_string(),
        "((1) <- 2 -> (5)) <- 7 -> ((9) <- 10)"
    );
}

#[test]
fn given_worked_tree_when_rendered_as_termtree_then_root_leads() {
    let tree = worked_tree();
    let rendered = tree.to_tree_string().to_string();

    assert!(rendered.starts_with('7'));
    for v in ["1", "2", "5", "9", "10"] {
        assert!(rendered.contains(v), "missing {} in:\n{}", v, rendered);
    }
}
