//! Integration tests for LinkedBinary structure and traversals

use postree::util::testing;
use postree::{BinaryPosition, BinaryTree, Conflict, LinkedBinary, PositionFault, Tree, TreeError};
use rstest::{fixture, rstest};

/// ```text
///         1
///       /   \
///      2     3
///     / \     \
///    4   5     6
/// ```
struct Sample {
    tree: LinkedBinary<i32>,
    n: Vec<BinaryPosition>,
}

#[fixture]
fn sample() -> Sample {
    testing::init_test_setup();
    let mut tree = LinkedBinary::new();
    let one = tree.add_root(1).unwrap();
    let two = tree.add_left(one, 2).unwrap();
    let three = tree.add_right(one, 3).unwrap();
    let four = tree.add_left(two, 4).unwrap();
    let five = tree.add_right(two, 5).unwrap();
    let six = tree.add_right(three, 6).unwrap();
    Sample {
        tree,
        n: vec![one, two, three, four, five, six],
    }
}

fn labels<I>(tree: &LinkedBinary<i32>, it: I) -> Vec<i32>
where
    I: Iterator<Item = BinaryPosition>,
{
    it.map(|p| *tree.element(p).unwrap()).collect()
}

// ============================================================
// Traversals
// ============================================================

#[rstest]
fn given_sample_when_traversing_then_orders_match(sample: Sample) {
    let t = &sample.tree;
    assert_eq!(labels(t, t.preorder()), vec![1, 2, 4, 5, 3, 6]);
    assert_eq!(labels(t, t.postorder()), vec![4, 5, 2, 6, 3, 1]);
    assert_eq!(labels(t, t.breadth_first()), vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(labels(t, t.inorder()), vec![4, 2, 5, 1, 3, 6]);
}

#[rstest]
fn given_sample_when_listing_positions_then_preorder(sample: Sample) {
    let t = &sample.tree;
    assert_eq!(t.positions().collect::<Vec<_>>(), t.preorder().collect::<Vec<_>>());
}

#[rstest]
fn given_subtree_root_when_traversing_from_it_then_only_subtree_visited(sample: Sample) {
    let t = &sample.tree;
    let two = sample.n[1];
    assert_eq!(labels(t, t.inorder_from(two).unwrap()), vec![4, 2, 5]);
    assert_eq!(labels(t, t.preorder_from(two).unwrap()), vec![2, 4, 5]);
}

#[rstest]
fn given_sample_when_measuring_then_depth_and_height_agree(sample: Sample) {
    let t = &sample.tree;
    assert_eq!(t.height(), Ok(2));
    assert_eq!(t.depth(sample.n[5]), Ok(2));
    assert_eq!(t.height_of(sample.n[2]), Ok(1));
    assert_eq!(t.num_children(sample.n[0]), Ok(2));
}

#[rstest]
fn given_children_when_asking_for_sibling_then_symmetric(sample: Sample) {
    let t = &sample.tree;
    let (one, two, three, four, five, six) =
        (sample.n[0], sample.n[1], sample.n[2], sample.n[3], sample.n[4], sample.n[5]);
    assert_eq!(t.sibling(two), Ok(Some(three)));
    assert_eq!(t.sibling(three), Ok(Some(two)));
    assert_eq!(t.sibling(four), Ok(Some(five)));
    assert_eq!(t.sibling(six), Ok(None));
    assert_eq!(t.sibling(one), Ok(None));
}

// ============================================================
// Construction conflicts
// ============================================================

#[rstest]
fn given_occupied_slots_when_adding_then_structural_conflict(mut sample: Sample) {
    let t = &mut sample.tree;
    assert_eq!(t.add_root(0), Err(TreeError::StructuralConflict(Conflict::RootExists)));
    assert_eq!(
        t.add_left(sample.n[0], 0),
        Err(TreeError::StructuralConflict(Conflict::LeftOccupied))
    );
    assert_eq!(
        t.add_right(sample.n[0], 0),
        Err(TreeError::StructuralConflict(Conflict::RightOccupied))
    );
    assert_eq!(t.len(), 6);
}

// ============================================================
// Delete
// ============================================================

#[rstest]
fn given_node_with_one_child_when_deleted_then_child_promoted(mut sample: Sample) {
    let three = sample.n[2];
    let six = sample.n[5];
    let t = &mut sample.tree;

    assert_eq!(t.delete(three), Ok(3));
    assert_eq!(t.len(), 5);
    assert_eq!(t.right(sample.n[0]), Ok(Some(six)));
    assert_eq!(t.parent(six), Ok(Some(sample.n[0])));
    assert_eq!(
        t.element(three),
        Err(TreeError::InvalidPosition(PositionFault::Deleted))
    );
}

#[rstest]
fn given_node_with_two_children_when_deleted_then_conflict_and_unchanged(mut sample: Sample) {
    let t = &mut sample.tree;
    assert_eq!(
        t.delete(sample.n[1]),
        Err(TreeError::StructuralConflict(Conflict::TwoChildren))
    );
    assert_eq!(t.len(), 6);
    assert_eq!(t.element(sample.n[1]), Ok(&2));
}

#[test]
fn given_root_with_single_child_when_deleted_then_child_becomes_root() {
    let mut t = LinkedBinary::new();
    let root = t.add_root("r").unwrap();
    let left = t.add_left(root, "l").unwrap();

    assert_eq!(t.delete(root), Ok("r"));
    assert_eq!(t.root(), Some(left));
    assert_eq!(t.parent(left), Ok(None));
    assert_eq!(t.len(), 1);
}

#[test]
fn given_only_root_when_deleted_then_tree_empty() {
    let mut t = LinkedBinary::new();
    let root = t.add_root(7).unwrap();
    assert_eq!(t.delete(root), Ok(7));
    assert!(t.is_empty());
    assert_eq!(t.root(), None);
    assert_eq!(t.height(), Err(TreeError::EmptyContainer));
}

// ============================================================
// Attach
// ============================================================

#[test]
fn given_leaf_when_attaching_two_trees_then_sizes_add_and_donors_empty() {
    let mut t = LinkedBinary::new();
    let root = t.add_root(1).unwrap();

    let mut left = LinkedBinary::new();
    let l_root = left.add_root(2).unwrap();
    left.add_left(l_root, 4).unwrap();

    let mut right = LinkedBinary::new();
    right.add_root(3).unwrap();

    t.attach(root, &mut left, &mut right).unwrap();

    assert_eq!(t.len(), 4);
    assert!(left.is_empty());
    assert!(right.is_empty());
    assert_eq!(labels(&t, t.preorder()), vec![1, 2, 4, 3]);
    assert_eq!(
        left.element(l_root),
        Err(TreeError::InvalidPosition(PositionFault::Deleted))
    );
    assert_eq!(
        t.element(l_root),
        Err(TreeError::InvalidPosition(PositionFault::ForeignContainer))
    );
}

#[test]
fn given_empty_donor_when_attaching_then_slot_stays_empty() {
    let mut t = LinkedBinary::new();
    let root = t.add_root(1).unwrap();
    let mut left = LinkedBinary::new();
    left.add_root(2).unwrap();
    let mut right = LinkedBinary::new();

    t.attach(root, &mut left, &mut right).unwrap();

    assert_eq!(t.len(), 2);
    assert_eq!(t.right(root), Ok(None));
}

#[rstest]
fn given_internal_node_when_attaching_then_not_a_leaf(mut sample: Sample) {
    let mut left = LinkedBinary::new();
    left.add_root(9).unwrap();
    let mut right = LinkedBinary::new();

    assert_eq!(
        sample.tree.attach(sample.n[1], &mut left, &mut right),
        Err(TreeError::StructuralConflict(Conflict::NotALeaf))
    );
    assert_eq!(left.len(), 1);
}

#[rstest]
fn given_position_from_other_tree_when_used_then_foreign_container(sample: Sample) {
    let mut other = LinkedBinary::new();
    let foreign = other.add_root(1).unwrap();
    assert_eq!(
        sample.tree.left(foreign),
        Err(TreeError::InvalidPosition(PositionFault::ForeignContainer))
    );
}
