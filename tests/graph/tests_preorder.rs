use std::cell::RefCell;

use asg::{AsgError, Field, HandlerVisitor, NodeKind, Preorder, PreorderOptions, Step};
use rstest::rstest;

use crate::helpers::graph_fixtures::{collect_all, collect_from, sample_tree};

#[test]
fn test_subtree_collector_yields_preorder() {
    let mut tree = sample_tree();
    let ids = collect_all(&mut tree.factory, PreorderOptions::default());
    assert_eq!(ids, vec![tree.root, tree.class, tree.method, tree.namespace]);
}

#[test]
fn test_collect_from_inner_node() {
    let mut tree = sample_tree();
    let ids = collect_from(&mut tree.factory, tree.class, PreorderOptions::default());
    assert_eq!(ids, vec![tree.class, tree.method]);
}

#[test]
fn test_enter_is_preorder_and_exit_is_postorder() {
    let mut tree = sample_tree();
    let entered = RefCell::new(Vec::new());
    let exited = RefCell::new(Vec::new());
    let mut visitor = HandlerVisitor::new();
    visitor.on(
        NodeKind::Base,
        |_, node| {
            entered.borrow_mut().push(node.id());
            Ok(Step::Continue)
        },
        |_, node| {
            exited.borrow_mut().push(node.id());
            Ok(Step::Continue)
        },
    );

    let count = Preorder::default()
        .run(&mut tree.factory, &mut visitor)
        .unwrap();
    drop(visitor);

    assert_eq!(count, 4);
    assert_eq!(
        entered.into_inner(),
        vec![tree.root, tree.class, tree.method, tree.namespace]
    );
    assert_eq!(
        exited.into_inner(),
        vec![tree.method, tree.class, tree.namespace, tree.root]
    );
}

#[test]
fn test_every_overridden_level_fires_once_per_node() {
    let mut tree = sample_tree();
    let hits = RefCell::new(Vec::new());
    let mut visitor = HandlerVisitor::new();
    visitor
        .on_enter(NodeKind::MemberDeclarationSyntax, |_, node| {
            hits.borrow_mut().push(("member", node.id()));
            Ok(Step::Continue)
        })
        .on_enter(NodeKind::Positioned, |_, node| {
            hits.borrow_mut().push(("positioned", node.id()));
            Ok(Step::Continue)
        });

    Preorder::default()
        .run_from(&mut tree.factory, tree.class, &mut visitor)
        .unwrap();
    drop(visitor);

    assert_eq!(
        hits.into_inner(),
        vec![
            ("member", tree.class),
            ("positioned", tree.class),
            ("member", tree.method),
            ("positioned", tree.method),
        ]
    );
}

#[rstest]
#[case(false, 5)]
#[case(true, 4)]
fn test_shared_child_is_revisited_unless_safe_mode(#[case] safe_mode: bool, #[case] expected: usize) {
    let mut tree = sample_tree();
    // The namespace also becomes a tree child of the class.
    tree.factory
        .node_mut(tree.class)
        .unwrap()
        .push_field(Field::Child(tree.namespace));

    let options = PreorderOptions {
        safe_mode,
        ..PreorderOptions::default()
    };
    let ids = collect_all(&mut tree.factory, options);
    assert_eq!(ids.len(), expected);
    assert_eq!(ids[..3], [tree.root, tree.class, tree.method]);
}

#[test]
fn test_cross_edges_are_walked_once_when_enabled() {
    let mut tree = sample_tree();
    let detached = tree
        .factory
        .create_node(NodeKind::IdentifierNameSyntax)
        .unwrap();
    let method = tree.factory.node_mut(tree.method).unwrap();
    method.push_field(Field::Refs(vec![detached, detached]));

    let plain = collect_all(&mut tree.factory, PreorderOptions::default());
    assert!(!plain.contains(&detached));

    let options = PreorderOptions {
        visit_cross_edges: true,
        ..PreorderOptions::default()
    };
    let ids = collect_all(&mut tree.factory, options);
    // The method's ref back to the class re-enters the class subtree once;
    // the second ref to the detached node is not followed.
    assert_eq!(
        ids,
        vec![
            tree.root,
            tree.class,
            tree.method,
            tree.class,
            tree.method,
            detached,
            tree.namespace,
        ]
    );
}

#[test]
fn test_special_nodes_are_walked_after_the_root() {
    let mut tree = sample_tree();
    let orphan = tree.factory.create_node(NodeKind::BlockSyntax).unwrap();

    let options = PreorderOptions {
        visit_special_nodes: true,
        ..PreorderOptions::default()
    };
    let ids = collect_all(&mut tree.factory, options);
    assert_eq!(
        ids,
        vec![tree.root, tree.class, tree.method, tree.namespace, orphan]
    );
}

#[test]
fn test_filtered_nodes_are_skipped_unless_requested() {
    let mut tree = sample_tree();
    tree.factory
        .set_filtered_this_node_only(tree.class)
        .unwrap();

    let ids = collect_all(&mut tree.factory, PreorderOptions::default());
    assert_eq!(ids, vec![tree.root, tree.namespace]);

    let options = PreorderOptions {
        visit_filtered: true,
        ..PreorderOptions::default()
    };
    let ids = collect_all(&mut tree.factory, options);
    assert_eq!(ids.len(), 4);

    tree.factory.turn_filter_off();
    let ids = collect_all(&mut tree.factory, PreorderOptions::default());
    assert_eq!(ids.len(), 4);
}

#[test]
fn test_edge_to_missing_node_is_an_error() {
    let mut tree = sample_tree();
    tree.factory
        .node_mut(tree.namespace)
        .unwrap()
        .push_field(Field::Child(99));

    let mut visitor = HandlerVisitor::new();
    let err = Preorder::default()
        .run(&mut tree.factory, &mut visitor)
        .unwrap_err();
    assert!(matches!(err, AsgError::NoSuchElement { .. }));
}

#[test]
fn test_run_without_root_walks_nothing() {
    let mut factory = asg::Factory::new();
    factory.create_node(NodeKind::BlockSyntax).unwrap();
    assert!(collect_all(&mut factory, PreorderOptions::default()).is_empty());
}
