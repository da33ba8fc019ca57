use asg::{AsgError, Factory, FilterState, NodeId, NodeKind, Preorder, PreorderOptions, VisitorFilter};

use crate::helpers::graph_fixtures::{collect_all, sample_tree};

fn states(factory: &Factory, ids: &[NodeId]) -> Vec<FilterState> {
    ids.iter().map(|id| factory.filter_state(*id)).collect()
}

#[test]
fn test_set_filtered_marks_the_subtree_only() {
    let mut tree = sample_tree();
    tree.factory.set_filtered(tree.class).unwrap();

    assert!(tree.factory.is_filtered(tree.class));
    assert!(tree.factory.is_filtered(tree.method));
    assert!(!tree.factory.is_filtered(tree.root));
    assert!(!tree.factory.is_filtered(tree.namespace));
}

#[test]
fn test_filtering_twice_is_idempotent() {
    let mut tree = sample_tree();
    let all = [tree.root, tree.class, tree.method, tree.namespace];

    tree.factory.set_filtered_this_node_only(tree.method).unwrap();
    let once = states(&tree.factory, &all);
    tree.factory.set_filtered_this_node_only(tree.method).unwrap();
    assert_eq!(states(&tree.factory, &all), once);

    tree.factory.set_filtered(tree.class).unwrap();
    let once = states(&tree.factory, &all);
    tree.factory.set_filtered(tree.class).unwrap();
    assert_eq!(states(&tree.factory, &all), once);
}

#[test]
fn test_this_node_only_does_not_cascade() {
    let mut tree = sample_tree();
    tree.factory.set_filtered_this_node_only(tree.class).unwrap();
    assert_eq!(tree.factory.filter_state(tree.method), FilterState::NotFiltered);
}

#[test]
fn test_set_not_filtered_clears_subtree_and_ancestors() {
    let mut tree = sample_tree();
    tree.factory.set_filtered(tree.root).unwrap();
    assert!(tree.factory.iter().next().is_none());

    tree.factory.set_not_filtered(tree.class).unwrap();
    assert!(!tree.factory.is_filtered(tree.root));
    assert!(!tree.factory.is_filtered(tree.class));
    assert!(!tree.factory.is_filtered(tree.method));
    assert!(tree.factory.is_filtered(tree.namespace));
}

#[test]
fn test_set_not_filtered_this_node_keeps_descendants() {
    let mut tree = sample_tree();
    tree.factory.set_filtered(tree.root).unwrap();

    tree.factory.set_not_filtered_this_node(tree.class).unwrap();
    assert!(!tree.factory.is_filtered(tree.root));
    assert!(!tree.factory.is_filtered(tree.class));
    assert!(tree.factory.is_filtered(tree.method));
}

#[test]
fn test_filter_switch_hides_states_without_losing_them() {
    let mut tree = sample_tree();
    tree.factory.set_filtered(tree.class).unwrap();

    tree.factory.with_filter_off(|factory| {
        assert!(!factory.is_filtered(tree.class));
        assert_eq!(factory.iter().count(), 4);
    });
    assert!(tree.factory.is_filtered(tree.class));
    assert_eq!(tree.factory.iter().count(), 2);
}

#[test]
fn test_filter_visitor_through_preorder() {
    let mut tree = sample_tree();
    let walker = Preorder::new(PreorderOptions::default());

    walker
        .run(&mut tree.factory, &mut VisitorFilter::new(true))
        .unwrap();
    assert_eq!(tree.factory.iter().count(), 0);
    assert!(collect_all(&mut tree.factory, PreorderOptions::default()).is_empty());

    let unfilter = Preorder::new(PreorderOptions {
        visit_filtered: true,
        ..PreorderOptions::default()
    });
    unfilter
        .run(&mut tree.factory, &mut VisitorFilter::new(false))
        .unwrap();
    assert_eq!(tree.factory.iter().count(), 4);
}

#[test]
fn test_filtering_unknown_nodes_fails() {
    let mut tree = sample_tree();
    assert!(matches!(
        tree.factory.set_filtered(42),
        Err(AsgError::NoSuchElement { .. })
    ));
    assert!(matches!(
        tree.factory.set_filtered(0),
        Err(AsgError::IllegalState { .. })
    ));
}

#[test]
fn test_new_nodes_start_unfiltered() {
    let mut factory = Factory::new();
    let id = factory.create_node(NodeKind::BlockSyntax).unwrap();
    assert_eq!(factory.filter_state(id), FilterState::NotFiltered);
}
