use asg::io::{BinaryWriter, Header, keys};
use asg::schema::version;
use asg::{AsgError, Factory, Field, NodeKind, SaveOptions};
use rstest::rstest;
use std::error::Error as _;

use crate::helpers::graph_fixtures::sample_tree;

fn header_stream(api: &str, binary: &str) -> BinaryWriter<Vec<u8>> {
    let mut header = Header::new();
    header.set(keys::TYPE, version::LANGUAGE_TYPE);
    header.set(keys::API_VERSION, api);
    header.set(keys::BINARY_VERSION, binary);
    let mut writer = BinaryWriter::new(Vec::new());
    header.save(&mut writer).unwrap();
    writer
}

#[test]
fn test_round_trip_through_memory() {
    let mut tree = sample_tree();
    let orphan = tree.factory.create_node(NodeKind::LiteralExpressionSyntax).unwrap();
    tree.factory
        .node_mut(tree.namespace)
        .unwrap()
        .push_field(Field::Refs(vec![orphan, tree.method]));

    let bytes = tree
        .factory
        .save_to(Vec::new(), SaveOptions::default())
        .unwrap();

    let mut loaded = Factory::new();
    loaded.load_from(bytes.as_slice()).unwrap();

    assert_eq!(loaded.len(), 5);
    assert_eq!(loaded.root(), Some(tree.root));
    for expected in tree.factory.iter() {
        assert_eq!(loaded.node(expected.id()).unwrap(), expected);
    }
    assert_eq!(
        loaded.strings().iter().collect::<Vec<_>>(),
        tree.factory.strings().iter().collect::<Vec<_>>()
    );
    let path = loaded.node(tree.method).unwrap().position().unwrap().path;
    assert_eq!(loaded.strings().get(path), Some("Program.cs"));
}

#[rstest]
#[case(false, false)]
#[case(true, true)]
fn test_filter_states_survive_only_when_requested(#[case] with_filter: bool, #[case] expected: bool) {
    let mut tree = sample_tree();
    tree.factory.set_filtered(tree.class).unwrap();

    let bytes = tree
        .factory
        .save_to(Vec::new(), SaveOptions { with_filter })
        .unwrap();
    assert!(tree.factory.is_filter_on());

    let mut loaded = Factory::new();
    loaded.load_from(bytes.as_slice()).unwrap();
    // Filtered nodes are always written.
    assert_eq!(loaded.len(), 4);
    assert_eq!(loaded.is_filtered(tree.method), expected);
    assert!(!loaded.is_filtered(tree.root));
}

#[test]
fn test_round_trip_through_file() {
    let mut tree = sample_tree();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Program.csi");

    tree.factory.save(&path, SaveOptions::default()).unwrap();

    let mut loaded = Factory::new();
    loaded.load(&path).unwrap();
    assert_eq!(
        loaded.node(tree.class).unwrap(),
        tree.factory.node(tree.class).unwrap()
    );
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut factory = Factory::new();
    let err = factory.load(dir.path().join("absent.csi")).unwrap_err();
    assert!(matches!(err, AsgError::Io { .. }));
}

#[rstest]
#[case("0.9", version::BINARY_VERSION, "APIVersion")]
#[case(version::API_VERSION, "0.9", "BinaryVersion")]
fn test_version_mismatch_is_rejected(#[case] api: &str, #[case] binary: &str, #[case] key: &str) {
    let mut writer = header_stream(api, binary);
    writer.write_u32(0).unwrap();
    let bytes = writer.into_inner().unwrap();

    let mut factory = Factory::new();
    let err = factory.load_from(bytes.as_slice()).unwrap_err();
    assert!(matches!(err, AsgError::Io { .. }));
    assert!(err.message().contains(key), "{err}");
    assert!(err.message().contains("0.9 found"), "{err}");
}

#[test]
fn test_unknown_kind_tag_is_rejected() {
    let mut writer = header_stream(version::API_VERSION, version::BINARY_VERSION);
    writer.write_u32(0).unwrap();
    writer.write_u32(2).unwrap();
    writer.write_u16(u16::MAX).unwrap();
    let bytes = writer.into_inner().unwrap();

    let err = Factory::new().load_from(bytes.as_slice()).unwrap_err();
    assert!(matches!(err, AsgError::Io { .. }));
    assert!(err.message().contains("unknown kind tag"), "{err}");
}

/// Header, no root, then one node record with an empty position and no fields.
fn single_record_stream(id: u32, kind: NodeKind) -> Vec<u8> {
    let mut writer = header_stream(version::API_VERSION, version::BINARY_VERSION);
    writer.write_u32(0).unwrap();
    writer.write_u32(id).unwrap();
    writer.write_u16(kind.tag()).unwrap();
    for _ in 0..5 {
        writer.write_u32(0).unwrap();
    }
    writer.write_u16(0).unwrap();
    writer.write_u32(0).unwrap();
    writer.write_u16(0).unwrap();
    writer.write_u32(0).unwrap();
    writer.write_bool(false).unwrap();
    writer.into_inner().unwrap()
}

#[test]
fn test_single_record_stream_loads() {
    let bytes = single_record_stream(2, NodeKind::BlockSyntax);
    let mut factory = Factory::new();
    factory.load_from(bytes.as_slice()).unwrap();
    assert_eq!(factory.kind_of(2).unwrap(), NodeKind::BlockSyntax);
}

#[test]
fn test_abstract_kind_in_stream_is_rejected() {
    let bytes = single_record_stream(2, NodeKind::ExpressionSyntax);

    let err = Factory::new().load_from(bytes.as_slice()).unwrap_err();
    assert!(matches!(err, AsgError::Io { .. }));
    assert!(err.message().contains("cannot restore node 2"), "{err}");
    let cause = err.source().map(|s| s.to_string()).unwrap_or_default();
    assert!(cause.contains("abstract kind ExpressionSyntax"), "{cause}");
}

#[rstest]
#[case(3)]
#[case(0xFFFF_FFF0)]
fn test_node_id_beyond_record_count_is_rejected(#[case] id: u32) {
    let bytes = single_record_stream(id, NodeKind::BlockSyntax);

    let err = Factory::new().load_from(bytes.as_slice()).unwrap_err();
    assert!(matches!(err, AsgError::Io { .. }));
    assert!(err.message().contains("out of range"), "{err}");
}

#[test]
fn test_oversized_length_prefix_is_io_error() {
    let err = Factory::new()
        .load_from(&[0xF0u8, 0xFF, 0xFF, 0xFF][..])
        .unwrap_err();
    assert!(matches!(err, AsgError::Io { .. }));
}

#[test]
fn test_graph_with_id_gaps_is_not_saved() {
    let mut factory = Factory::new();
    factory
        .create_node_with_id(5, NodeKind::BlockSyntax)
        .unwrap();
    let err = factory
        .save_to(Vec::new(), SaveOptions::default())
        .unwrap_err();
    assert!(matches!(err, AsgError::IllegalState { .. }));
}

#[test]
fn test_failed_load_keeps_current_graph() {
    let mut tree = sample_tree();
    let bytes = tree
        .factory
        .save_to(Vec::new(), SaveOptions::default())
        .unwrap();
    let truncated = &bytes[..bytes.len() - 3];

    let err = tree.factory.load_from(truncated).unwrap_err();
    assert!(matches!(err, AsgError::Io { .. }));
    assert_eq!(tree.factory.len(), 4);
    assert_eq!(tree.factory.root(), Some(tree.root));
}

#[test]
fn test_load_keeps_filter_switch() {
    let mut tree = sample_tree();
    let bytes = tree
        .factory
        .save_to(Vec::new(), SaveOptions::default())
        .unwrap();

    let mut loaded = Factory::new();
    loaded.turn_filter_off();
    loaded.load_from(bytes.as_slice()).unwrap();
    assert!(!loaded.is_filter_on());
}

#[test]
fn test_filter_file_round_trip() {
    let mut tree = sample_tree();
    tree.factory.set_filtered(tree.class).unwrap();
    let file = tempfile::NamedTempFile::new().unwrap();
    tree.factory.save_filter(file.path()).unwrap();

    let mut other = sample_tree();
    other.factory.load_filter(file.path()).unwrap();
    assert!(other.factory.is_filtered(other.class));
    assert!(other.factory.is_filtered(other.method));
    assert!(!other.factory.is_filtered(other.namespace));
}

#[test]
fn test_filter_for_smaller_graph_is_rejected() {
    let tree = sample_tree();
    let bytes = tree.factory.save_filter_to(Vec::new()).unwrap();

    let mut bigger = sample_tree();
    bigger.factory.create_node(NodeKind::BlockSyntax).unwrap();
    let err = bigger.factory.load_filter_from(bytes.as_slice()).unwrap_err();
    assert!(matches!(err, AsgError::Io { .. }));
}
