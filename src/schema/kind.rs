//! Node kinds of the C# ASG and their single-parent ancestry.
//!
//! The `node_kinds!` table below is the whole taxonomy. Each row names a kind,
//! its parent kind, its grammar category and whether the kind is a leaf
//! (terminal) or composite. All `is_*` queries in [`super::classify`] are
//! derived from this one table.
//!
//! Tags are assigned in row order and are written to the binary stream, so the
//! table may only change together with a bump of the schema versions in
//! [`super::version`].

use std::fmt;

/// Grammar category a kind belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Category {
    Base,
    Expression,
    Statement,
    Structure,
}

/// Authored composite/leaf partition of the kind set.
///
/// Leaf kinds are terminals: tokens, empty markers and omitted-argument
/// placeholders. Every abstract kind is composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Shape {
    Composite,
    Leaf,
}

macro_rules! node_kinds {
    (@parent) => { None };
    (@parent $parent:ident) => { Some(NodeKind::$parent) };
    ($( $kind:ident ( $($parent:ident)? ) : $category:ident, $shape:ident; )*) => {
        /// Tag identifying a node's grammar production.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[repr(u16)]
        pub enum NodeKind {
            $( $kind, )*
        }

        impl NodeKind {
            /// Every kind, in tag order.
            pub const ALL: &'static [NodeKind] = &[ $( NodeKind::$kind, )* ];

            /// Direct parent in the taxonomy. `None` only for [`NodeKind::Base`].
            pub const fn parent(self) -> Option<NodeKind> {
                match self {
                    $( NodeKind::$kind => node_kinds!(@parent $($parent)?), )*
                }
            }

            pub const fn category(self) -> Category {
                match self {
                    $( NodeKind::$kind => Category::$category, )*
                }
            }

            pub const fn shape(self) -> Shape {
                match self {
                    $( NodeKind::$kind => Shape::$shape, )*
                }
            }

            pub const fn name(self) -> &'static str {
                match self {
                    $( NodeKind::$kind => stringify!($kind), )*
                }
            }
        }
    };
}

node_kinds! {
    // base
    Base(): Base, Composite;
    Positioned(Base): Base, Composite;

    // expression
    AliasQualifiedNameSyntax(NameSyntax): Expression, Composite;
    AnonymousFunctionExpressionSyntax(ExpressionSyntax): Expression, Composite;
    AnonymousMethodExpressionSyntax(AnonymousFunctionExpressionSyntax): Expression, Composite;
    AnonymousObjectCreationExpressionSyntax(ExpressionSyntax): Expression, Composite;
    ArrayCreationExpressionSyntax(ExpressionSyntax): Expression, Composite;
    ArrayTypeSyntax(TypeSyntax): Expression, Composite;
    AssignmentExpressionSyntax(ExpressionSyntax): Expression, Composite;
    AwaitExpressionSyntax(ExpressionSyntax): Expression, Composite;
    BaseExpressionSyntax(InstanceExpressionSyntax): Expression, Leaf;
    BinaryExpressionSyntax(ExpressionSyntax): Expression, Composite;
    CastExpressionSyntax(ExpressionSyntax): Expression, Composite;
    CheckedExpressionSyntax(ExpressionSyntax): Expression, Composite;
    ConditionalAccessExpressionSyntax(ExpressionSyntax): Expression, Composite;
    ConditionalExpressionSyntax(ExpressionSyntax): Expression, Composite;
    DeclarationExpressionSyntax(ExpressionSyntax): Expression, Composite;
    DefaultExpressionSyntax(ExpressionSyntax): Expression, Composite;
    ElementAccessExpressionSyntax(ExpressionSyntax): Expression, Composite;
    ElementBindingExpressionSyntax(ExpressionSyntax): Expression, Composite;
    ExpressionSyntax(Positioned): Expression, Composite;
    GenericNameSyntax(SimpleNameSyntax): Expression, Composite;
    IdentifierNameSyntax(SimpleNameSyntax): Expression, Leaf;
    ImplicitArrayCreationExpressionSyntax(ExpressionSyntax): Expression, Composite;
    ImplicitElementAccessSyntax(ExpressionSyntax): Expression, Composite;
    ImplicitStackAllocArrayCreationExpressionSyntax(ExpressionSyntax): Expression, Composite;
    InitializerExpressionSyntax(ExpressionSyntax): Expression, Composite;
    InstanceExpressionSyntax(ExpressionSyntax): Expression, Composite;
    InterpolatedStringExpressionSyntax(ExpressionSyntax): Expression, Composite;
    InvocationExpressionSyntax(ExpressionSyntax): Expression, Composite;
    IsPatternExpressionSyntax(ExpressionSyntax): Expression, Composite;
    LambdaExpressionSyntax(AnonymousFunctionExpressionSyntax): Expression, Composite;
    LiteralExpressionSyntax(ExpressionSyntax): Expression, Leaf;
    MakeRefExpressionSyntax(ExpressionSyntax): Expression, Composite;
    MemberAccessExpressionSyntax(ExpressionSyntax): Expression, Composite;
    MemberBindingExpressionSyntax(ExpressionSyntax): Expression, Composite;
    NameSyntax(TypeSyntax): Expression, Composite;
    NullableTypeSyntax(TypeSyntax): Expression, Composite;
    ObjectCreationExpressionSyntax(ExpressionSyntax): Expression, Composite;
    OmittedArraySizeExpressionSyntax(ExpressionSyntax): Expression, Leaf;
    OmittedTypeArgumentSyntax(TypeSyntax): Expression, Leaf;
    ParenthesizedExpressionSyntax(ExpressionSyntax): Expression, Composite;
    ParenthesizedLambdaExpressionSyntax(LambdaExpressionSyntax): Expression, Composite;
    PointerTypeSyntax(TypeSyntax): Expression, Composite;
    PostfixUnaryExpressionSyntax(ExpressionSyntax): Expression, Composite;
    PredefinedTypeSyntax(TypeSyntax): Expression, Leaf;
    PrefixUnaryExpressionSyntax(ExpressionSyntax): Expression, Composite;
    QualifiedNameSyntax(NameSyntax): Expression, Composite;
    QueryExpressionSyntax(ExpressionSyntax): Expression, Composite;
    RangeExpressionSyntax(ExpressionSyntax): Expression, Composite;
    RefExpressionSyntax(ExpressionSyntax): Expression, Composite;
    RefTypeExpressionSyntax(ExpressionSyntax): Expression, Composite;
    RefTypeSyntax(TypeSyntax): Expression, Composite;
    RefValueExpressionSyntax(ExpressionSyntax): Expression, Composite;
    SimpleLambdaExpressionSyntax(LambdaExpressionSyntax): Expression, Composite;
    SimpleNameSyntax(NameSyntax): Expression, Composite;
    SizeOfExpressionSyntax(ExpressionSyntax): Expression, Composite;
    StackAllocArrayCreationExpressionSyntax(ExpressionSyntax): Expression, Composite;
    SwitchExpressionSyntax(ExpressionSyntax): Expression, Composite;
    ThisExpressionSyntax(InstanceExpressionSyntax): Expression, Leaf;
    ThrowExpressionSyntax(ExpressionSyntax): Expression, Composite;
    TupleExpressionSyntax(ExpressionSyntax): Expression, Composite;
    TupleTypeSyntax(TypeSyntax): Expression, Composite;
    TypeOfExpressionSyntax(ExpressionSyntax): Expression, Composite;
    TypeSyntax(ExpressionSyntax): Expression, Composite;

    // statement
    BlockSyntax(StatementSyntax): Statement, Composite;
    BreakStatementSyntax(StatementSyntax): Statement, Composite;
    CheckedStatementSyntax(StatementSyntax): Statement, Composite;
    CommonForEachStatementSyntax(StatementSyntax): Statement, Composite;
    ContinueStatementSyntax(StatementSyntax): Statement, Composite;
    DoStatementSyntax(StatementSyntax): Statement, Composite;
    EmptyStatementSyntax(StatementSyntax): Statement, Composite;
    ExpressionStatementSyntax(StatementSyntax): Statement, Composite;
    FixedStatementSyntax(StatementSyntax): Statement, Composite;
    ForEachStatementSyntax(CommonForEachStatementSyntax): Statement, Composite;
    ForEachVariableStatementSyntax(CommonForEachStatementSyntax): Statement, Composite;
    ForStatementSyntax(StatementSyntax): Statement, Composite;
    GotoStatementSyntax(StatementSyntax): Statement, Composite;
    IfStatementSyntax(StatementSyntax): Statement, Composite;
    LabeledStatementSyntax(StatementSyntax): Statement, Composite;
    LocalDeclarationStatementSyntax(StatementSyntax): Statement, Composite;
    LocalFunctionStatementSyntax(StatementSyntax): Statement, Composite;
    LockStatementSyntax(StatementSyntax): Statement, Composite;
    ReturnStatementSyntax(StatementSyntax): Statement, Composite;
    StatementSyntax(Positioned): Statement, Composite;
    SwitchStatementSyntax(StatementSyntax): Statement, Composite;
    ThrowStatementSyntax(StatementSyntax): Statement, Composite;
    TryStatementSyntax(StatementSyntax): Statement, Composite;
    UnsafeStatementSyntax(StatementSyntax): Statement, Composite;
    UsingStatementSyntax(StatementSyntax): Statement, Composite;
    WhileStatementSyntax(StatementSyntax): Statement, Composite;
    YieldStatementSyntax(StatementSyntax): Statement, Composite;

    // structure
    AccessorDeclarationSyntax(Positioned): Structure, Composite;
    AccessorListSyntax(Positioned): Structure, Composite;
    AnonymousObjectMemberDeclaratorSyntax(Positioned): Structure, Composite;
    ArgumentListSyntax(BaseArgumentListSyntax): Structure, Composite;
    ArgumentSyntax(Positioned): Structure, Composite;
    ArrayRankSpecifierSyntax(Positioned): Structure, Composite;
    ArrowExpressionClauseSyntax(Positioned): Structure, Composite;
    AttributeArgumentListSyntax(Positioned): Structure, Composite;
    AttributeArgumentSyntax(Positioned): Structure, Composite;
    AttributeListSyntax(Positioned): Structure, Composite;
    AttributeSyntax(Positioned): Structure, Composite;
    AttributeTargetSpecifierSyntax(Positioned): Structure, Leaf;
    BaseArgumentListSyntax(Positioned): Structure, Composite;
    BaseCrefParameterListSyntax(Positioned): Structure, Composite;
    BaseFieldDeclarationSyntax(MemberDeclarationSyntax): Structure, Composite;
    BaseListSyntax(Positioned): Structure, Composite;
    BaseMethodDeclarationSyntax(MemberDeclarationSyntax): Structure, Composite;
    BaseParameterListSyntax(Positioned): Structure, Composite;
    BasePropertyDeclarationSyntax(MemberDeclarationSyntax): Structure, Composite;
    BaseTypeDeclarationSyntax(MemberDeclarationSyntax): Structure, Composite;
    BaseTypeSyntax(Positioned): Structure, Composite;
    BracketedArgumentListSyntax(BaseArgumentListSyntax): Structure, Composite;
    BracketedParameterListSyntax(BaseParameterListSyntax): Structure, Composite;
    CasePatternSwitchLabelSyntax(SwitchLabelSyntax): Structure, Composite;
    CaseSwitchLabelSyntax(SwitchLabelSyntax): Structure, Composite;
    CatchClauseSyntax(Positioned): Structure, Composite;
    CatchDeclarationSyntax(Positioned): Structure, Composite;
    CatchFilterClauseSyntax(Positioned): Structure, Composite;
    ClassDeclarationSyntax(TypeDeclarationSyntax): Structure, Composite;
    ClassOrStructConstraintSyntax(TypeParameterConstraintSyntax): Structure, Leaf;
    CompilationUnitSyntax(Positioned): Structure, Composite;
    ConstantPatternSyntax(PatternSyntax): Structure, Composite;
    ConstructorConstraintSyntax(TypeParameterConstraintSyntax): Structure, Leaf;
    ConstructorDeclarationSyntax(BaseMethodDeclarationSyntax): Structure, Composite;
    ConstructorInitializerSyntax(Positioned): Structure, Composite;
    ConversionOperatorDeclarationSyntax(BaseMethodDeclarationSyntax): Structure, Composite;
    ConversionOperatorMemberCrefSyntax(MemberCrefSyntax): Structure, Composite;
    CrefBracketedParameterListSyntax(BaseCrefParameterListSyntax): Structure, Composite;
    CrefParameterListSyntax(BaseCrefParameterListSyntax): Structure, Composite;
    CrefParameterSyntax(Positioned): Structure, Composite;
    CrefSyntax(Positioned): Structure, Composite;
    DeclarationPatternSyntax(PatternSyntax): Structure, Composite;
    DefaultSwitchLabelSyntax(SwitchLabelSyntax): Structure, Leaf;
    DelegateDeclarationSyntax(MemberDeclarationSyntax): Structure, Composite;
    DestructorDeclarationSyntax(BaseMethodDeclarationSyntax): Structure, Composite;
    DiscardDesignationSyntax(VariableDesignationSyntax): Structure, Leaf;
    DiscardPatternSyntax(PatternSyntax): Structure, Leaf;
    ElseClauseSyntax(Positioned): Structure, Composite;
    EnumDeclarationSyntax(BaseTypeDeclarationSyntax): Structure, Composite;
    EnumMemberDeclarationSyntax(MemberDeclarationSyntax): Structure, Composite;
    EqualsValueClauseSyntax(Positioned): Structure, Composite;
    EventDeclarationSyntax(BasePropertyDeclarationSyntax): Structure, Composite;
    EventFieldDeclarationSyntax(BaseFieldDeclarationSyntax): Structure, Composite;
    ExplicitInterfaceSpecifierSyntax(Positioned): Structure, Composite;
    ExternAliasDirectiveSyntax(Positioned): Structure, Leaf;
    FieldDeclarationSyntax(BaseFieldDeclarationSyntax): Structure, Composite;
    FinallyClauseSyntax(Positioned): Structure, Composite;
    FromClauseSyntax(QueryClauseSyntax): Structure, Composite;
    GlobalStatementSyntax(MemberDeclarationSyntax): Structure, Composite;
    GroupClauseSyntax(SelectOrGroupClauseSyntax): Structure, Composite;
    IncompleteMemberSyntax(MemberDeclarationSyntax): Structure, Composite;
    IndexerDeclarationSyntax(BasePropertyDeclarationSyntax): Structure, Composite;
    IndexerMemberCrefSyntax(MemberCrefSyntax): Structure, Composite;
    InterfaceDeclarationSyntax(TypeDeclarationSyntax): Structure, Composite;
    InterpolatedStringContentSyntax(Positioned): Structure, Composite;
    InterpolatedStringTextSyntax(InterpolatedStringContentSyntax): Structure, Leaf;
    InterpolationAlignmentClauseSyntax(Positioned): Structure, Composite;
    InterpolationFormatClauseSyntax(Positioned): Structure, Leaf;
    InterpolationSyntax(InterpolatedStringContentSyntax): Structure, Composite;
    JoinClauseSyntax(QueryClauseSyntax): Structure, Composite;
    JoinIntoClauseSyntax(Positioned): Structure, Leaf;
    LetClauseSyntax(QueryClauseSyntax): Structure, Composite;
    MemberCrefSyntax(CrefSyntax): Structure, Composite;
    MemberDeclarationSyntax(Positioned): Structure, Composite;
    MethodDeclarationSyntax(BaseMethodDeclarationSyntax): Structure, Composite;
    NameColonSyntax(Positioned): Structure, Composite;
    NameEqualsSyntax(Positioned): Structure, Composite;
    NameMemberCrefSyntax(MemberCrefSyntax): Structure, Composite;
    NamespaceDeclarationSyntax(MemberDeclarationSyntax): Structure, Composite;
    OperatorDeclarationSyntax(BaseMethodDeclarationSyntax): Structure, Composite;
    OperatorMemberCrefSyntax(MemberCrefSyntax): Structure, Composite;
    OrderByClauseSyntax(QueryClauseSyntax): Structure, Composite;
    OrderingSyntax(Positioned): Structure, Composite;
    ParameterListSyntax(BaseParameterListSyntax): Structure, Composite;
    ParameterSyntax(Positioned): Structure, Composite;
    ParenthesizedVariableDesignationSyntax(VariableDesignationSyntax): Structure, Composite;
    PatternSyntax(Positioned): Structure, Composite;
    PositionalPatternClauseSyntax(Positioned): Structure, Composite;
    PropertyDeclarationSyntax(BasePropertyDeclarationSyntax): Structure, Composite;
    PropertyPatternClauseSyntax(Positioned): Structure, Composite;
    QualifiedCrefSyntax(CrefSyntax): Structure, Composite;
    QueryBodySyntax(Positioned): Structure, Composite;
    QueryClauseSyntax(Positioned): Structure, Composite;
    QueryContinuationSyntax(Positioned): Structure, Composite;
    RecursivePatternSyntax(PatternSyntax): Structure, Composite;
    SelectClauseSyntax(SelectOrGroupClauseSyntax): Structure, Composite;
    SelectOrGroupClauseSyntax(Positioned): Structure, Composite;
    SimpleBaseTypeSyntax(BaseTypeSyntax): Structure, Composite;
    SingleVariableDesignationSyntax(VariableDesignationSyntax): Structure, Leaf;
    StructDeclarationSyntax(TypeDeclarationSyntax): Structure, Composite;
    SubpatternSyntax(Positioned): Structure, Composite;
    SwitchExpressionArmSyntax(Positioned): Structure, Composite;
    SwitchLabelSyntax(Positioned): Structure, Composite;
    SwitchSectionSyntax(Positioned): Structure, Composite;
    SyntaxToken(Positioned): Structure, Leaf;
    TupleElementSyntax(Positioned): Structure, Composite;
    TypeArgumentListSyntax(Positioned): Structure, Composite;
    TypeConstraintSyntax(TypeParameterConstraintSyntax): Structure, Composite;
    TypeCrefSyntax(CrefSyntax): Structure, Composite;
    TypeDeclarationSyntax(BaseTypeDeclarationSyntax): Structure, Composite;
    TypeParameterConstraintClauseSyntax(Positioned): Structure, Composite;
    TypeParameterConstraintSyntax(Positioned): Structure, Composite;
    TypeParameterListSyntax(Positioned): Structure, Composite;
    TypeParameterSyntax(Positioned): Structure, Composite;
    UsingDirectiveSyntax(Positioned): Structure, Composite;
    VarPatternSyntax(PatternSyntax): Structure, Composite;
    VariableDeclarationSyntax(Positioned): Structure, Composite;
    VariableDeclaratorSyntax(Positioned): Structure, Composite;
    VariableDesignationSyntax(Positioned): Structure, Composite;
    WhenClauseSyntax(Positioned): Structure, Composite;
    WhereClauseSyntax(QueryClauseSyntax): Structure, Composite;
    XmlAttributeSyntax(Positioned): Structure, Composite;
    XmlCDataSectionSyntax(XmlNodeSyntax): Structure, Leaf;
    XmlCommentSyntax(XmlNodeSyntax): Structure, Leaf;
    XmlCrefAttributeSyntax(XmlAttributeSyntax): Structure, Composite;
    XmlElementEndTagSyntax(Positioned): Structure, Composite;
    XmlElementStartTagSyntax(Positioned): Structure, Composite;
    XmlElementSyntax(XmlNodeSyntax): Structure, Composite;
    XmlEmptyElementSyntax(XmlNodeSyntax): Structure, Composite;
    XmlNameAttributeSyntax(XmlAttributeSyntax): Structure, Composite;
    XmlNameSyntax(Positioned): Structure, Composite;
    XmlNodeSyntax(Positioned): Structure, Composite;
    XmlPrefixSyntax(Positioned): Structure, Leaf;
    XmlProcessingInstructionSyntax(XmlNodeSyntax): Structure, Composite;
    XmlTextAttributeSyntax(XmlAttributeSyntax): Structure, Composite;
    XmlTextSyntax(XmlNodeSyntax): Structure, Leaf;
}

impl NodeKind {
    /// Number of kinds in the taxonomy.
    pub const COUNT: usize = NodeKind::ALL.len();

    /// The universal root kind.
    pub const ROOT: NodeKind = NodeKind::Base;

    /// Numeric tag as written to the binary stream.
    pub const fn tag(self) -> u16 {
        self as u16
    }

    /// Decode a tag. Returns `None` for tags outside the current schema.
    pub fn from_u16(raw: u16) -> Option<NodeKind> {
        Self::ALL.get(raw as usize).copied()
    }

    /// Distance from the root (`Base` has depth 0).
    pub const fn depth(self) -> usize {
        DEPTH[self as usize] as usize
    }

    /// True if some other kind names this one as its parent.
    pub const fn is_abstract(self) -> bool {
        ABSTRACT[self as usize]
    }

    /// Kinds a node can actually have.
    pub const fn is_concrete(self) -> bool {
        !self.is_abstract()
    }

    /// Fully qualified name, e.g. `expression::IdentifierNameSyntax`.
    pub fn qualified_name(self) -> String {
        let namespace = match self.category() {
            Category::Base => "base",
            Category::Expression => "expression",
            Category::Statement => "statement",
            Category::Structure => "structure",
        };
        format!("{namespace}::{}", self.name())
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Evaluated at compile time: a cycle, a second root or a root other than
// `Base` fails the build.
const DEPTH: [u8; NodeKind::COUNT] = {
    let mut depth = [0u8; NodeKind::COUNT];
    let mut roots = 0;
    let mut i = 0;
    while i < NodeKind::COUNT {
        let mut cursor = NodeKind::ALL[i];
        let mut steps = 0usize;
        while let Some(parent) = cursor.parent() {
            steps += 1;
            if steps > NodeKind::COUNT {
                panic!("node kind ancestry contains a cycle");
            }
            cursor = parent;
        }
        if cursor as u16 != NodeKind::ROOT as u16 {
            panic!("node kind ancestry does not end at Base");
        }
        if steps == 0 {
            roots += 1;
        }
        depth[i] = steps as u8;
        i += 1;
    }
    if roots != 1 {
        panic!("node kind ancestry must have exactly one root");
    }
    depth
};

const ABSTRACT: [bool; NodeKind::COUNT] = {
    let mut table = [false; NodeKind::COUNT];
    let mut i = 0;
    while i < NodeKind::COUNT {
        if let Some(parent) = NodeKind::ALL[i].parent() {
            table[parent as usize] = true;
        }
        i += 1;
    }
    table
};
