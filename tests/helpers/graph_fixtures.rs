//! Small graphs shared by the integration tests.

use asg::{
    Factory, Field, NodeId, NodeKind, Preorder, PreorderOptions, SourceRange, Span,
    VisitorSubtreeCollector,
};

/// ```text
/// CompilationUnit (root)
/// ├── ClassDeclaration "Program"
/// │   └── MethodDeclaration "Main"   (ref → ClassDeclaration)
/// └── NamespaceDeclaration "App"
/// ```
pub struct SampleTree {
    pub factory: Factory,
    pub root: NodeId,
    pub class: NodeId,
    pub method: NodeId,
    pub namespace: NodeId,
}

pub fn sample_tree() -> SampleTree {
    let mut factory = Factory::new();
    let root = factory.create_node(NodeKind::CompilationUnitSyntax).unwrap();
    let class = factory.create_node(NodeKind::ClassDeclarationSyntax).unwrap();
    let method = factory.create_node(NodeKind::MethodDeclarationSyntax).unwrap();
    let namespace = factory.create_node(NodeKind::NamespaceDeclarationSyntax).unwrap();

    let path = factory.strings_mut().intern("Program.cs");
    let program = factory.strings_mut().intern("Program");
    let main = factory.strings_mut().intern("Main");
    let app = factory.strings_mut().intern("App");

    let positions = [
        (root, Span::from_coords(1, 1, 20, 2)),
        (class, Span::from_coords(3, 1, 12, 2)),
        (method, Span::from_coords(5, 5, 10, 6)),
        (namespace, Span::from_coords(14, 1, 20, 2)),
    ];
    for (id, span) in positions {
        factory
            .node_mut(id)
            .unwrap()
            .set_position(SourceRange::new(path, span))
            .unwrap();
    }

    let node = factory.node_mut(root).unwrap();
    node.push_field(Field::Children(vec![class, namespace]));

    let node = factory.node_mut(class).unwrap();
    node.push_field(Field::Str(program));
    node.push_field(Field::Children(vec![method]));

    let node = factory.node_mut(method).unwrap();
    node.push_field(Field::Str(main));
    node.push_field(Field::Bool(true));
    node.push_field(Field::UInt(2));
    node.push_field(Field::Ref(class));

    let node = factory.node_mut(namespace).unwrap();
    node.push_field(Field::Str(app));
    node.push_field(Field::Child(0));

    factory.set_root(root).unwrap();

    SampleTree {
        factory,
        root,
        class,
        method,
        namespace,
    }
}

/// Ids entered by a preorder walk from `start`.
pub fn collect_from(factory: &mut Factory, start: NodeId, options: PreorderOptions) -> Vec<NodeId> {
    let mut ids = Vec::new();
    let mut collector = VisitorSubtreeCollector::new(&mut ids);
    Preorder::new(options)
        .run_from(factory, start, &mut collector)
        .unwrap();
    ids
}

/// Ids entered by a preorder walk from the root.
pub fn collect_all(factory: &mut Factory, options: PreorderOptions) -> Vec<NodeId> {
    let mut ids = Vec::new();
    let mut collector = VisitorSubtreeCollector::new(&mut ids);
    Preorder::new(options).run(factory, &mut collector).unwrap();
    ids
}
