use asg::{Field, Incoming, NodeKind};

use crate::helpers::graph_fixtures::sample_tree;

#[test]
fn test_parents_and_referrers() {
    let mut tree = sample_tree();
    let edges = tree.factory.reverse_edges().unwrap();

    assert_eq!(edges.tree_parent(tree.method), Some(tree.class));
    assert_eq!(edges.tree_parent(tree.class), Some(tree.root));
    assert_eq!(edges.tree_parent(tree.namespace), Some(tree.root));
    assert_eq!(edges.tree_parent(tree.root), None);
    assert_eq!(edges.tree_ancestors(tree.method), vec![tree.class, tree.root]);
    assert_eq!(edges.referrers(tree.class).collect::<Vec<_>>(), vec![tree.method]);
    assert_eq!(
        edges.incoming(tree.class),
        &[
            Incoming {
                from: tree.root,
                slot: 0,
                tree: true,
            },
            Incoming {
                from: tree.method,
                slot: 3,
                tree: false,
            },
        ]
    );
    // The unset `Child(0)` on the namespace is not an edge.
    assert_eq!(edges.len(), 4);
}

#[test]
fn test_index_is_cached_until_nodes_change() {
    let mut tree = sample_tree();
    assert!(!tree.factory.has_reverse_edges());

    tree.factory.enable_reverse_edges().unwrap();
    assert!(tree.factory.has_reverse_edges());

    tree.factory.set_filtered(tree.class).unwrap();
    tree.factory.set_not_filtered(tree.method).unwrap();
    assert!(tree.factory.has_reverse_edges());

    tree.factory.create_node(NodeKind::BlockSyntax).unwrap();
    assert!(!tree.factory.has_reverse_edges());

    tree.factory.enable_reverse_edges().unwrap();
    tree.factory.node_mut(tree.method).unwrap();
    assert!(!tree.factory.has_reverse_edges());

    tree.factory.enable_reverse_edges().unwrap();
    tree.factory.disable_reverse_edges();
    assert!(!tree.factory.has_reverse_edges());
}

#[test]
fn test_rebuilt_index_follows_moved_edges() {
    let mut tree = sample_tree();
    tree.factory.enable_reverse_edges().unwrap();

    tree.factory
        .node_mut(tree.class)
        .unwrap()
        .set_field(1, Field::Children(Vec::new()))
        .unwrap();
    tree.factory
        .node_mut(tree.namespace)
        .unwrap()
        .set_field(1, Field::Child(tree.method))
        .unwrap();

    let edges = tree.factory.reverse_edges().unwrap();
    assert_eq!(edges.tree_parent(tree.method), Some(tree.namespace));
}

#[test]
fn test_unfiltering_uses_current_parents() {
    let mut tree = sample_tree();
    tree.factory.set_filtered(tree.root).unwrap();
    tree.factory.enable_reverse_edges().unwrap();

    tree.factory
        .node_mut(tree.class)
        .unwrap()
        .set_field(1, Field::Children(Vec::new()))
        .unwrap();
    tree.factory
        .node_mut(tree.namespace)
        .unwrap()
        .set_field(1, Field::Child(tree.method))
        .unwrap();

    tree.factory.set_not_filtered(tree.method).unwrap();
    assert!(!tree.factory.is_filtered(tree.method));
    assert!(!tree.factory.is_filtered(tree.namespace));
    assert!(!tree.factory.is_filtered(tree.root));
    assert!(tree.factory.is_filtered(tree.class));
}
