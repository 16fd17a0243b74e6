//! Typed AST wrappers over CST nodes.
//!
//! Each struct wraps a `SyntaxNode` and provides typed accessors.
//! Cast is infallible for correct `SyntaxKind`; accessors skip trivia and return
//! `None` for parts missing from broken input.

use super::cst::{SyntaxKind, SyntaxNode, SyntaxToken};

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl $name {
            pub fn cast(node: SyntaxNode) -> Option<Self> {
                (node.kind() == SyntaxKind::$kind).then(|| Self(node))
            }

            pub fn as_cst(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

ast_node!(SourceFile, SourceFile);
ast_node!(PragmaDirective, PragmaDirective);
ast_node!(ImportDirective, ImportDirective);
ast_node!(ContractDeclaration, ContractDeclaration);
ast_node!(InterfaceDeclaration, InterfaceDeclaration);
ast_node!(LibraryDeclaration, LibraryDeclaration);
ast_node!(ContractBody, ContractBody);
ast_node!(StateVariableDeclaration, StateVariableDeclaration);
ast_node!(FunctionDefinition, FunctionDefinition);
ast_node!(ModifierDefinition, ModifierDefinition);
ast_node!(ConstructorDefinition, ConstructorDefinition);
ast_node!(FallbackReceiveDefinition, FallbackReceiveDefinition);
ast_node!(StructDeclaration, StructDeclaration);
ast_node!(EnumDeclaration, EnumDeclaration);
ast_node!(EventDefinition, EventDefinition);
ast_node!(ErrorDeclaration, ErrorDeclaration);
ast_node!(UsingDirective, UsingDirective);
ast_node!(UserDefinedTypeDefinition, UserDefinedTypeDefinition);
ast_node!(Parameter, Parameter);
ast_node!(FunctionBody, FunctionBody);
ast_node!(Statement, Statement);
ast_node!(TypeName, TypeName);

/// Anything a contract, interface or library body may contain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Member {
    StateVariable(StateVariableDeclaration),
    Function(FunctionDefinition),
    Modifier(ModifierDefinition),
    Constructor(ConstructorDefinition),
    FallbackReceive(FallbackReceiveDefinition),
    Struct(StructDeclaration),
    Enum(EnumDeclaration),
    Event(EventDefinition),
    Error(ErrorDeclaration),
    Using(UsingDirective),
    UserDefinedType(UserDefinedTypeDefinition),
}

impl Member {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::StateVariableDeclaration => {
                StateVariableDeclaration::cast(node).map(Member::StateVariable)
            }
            SyntaxKind::FunctionDefinition => FunctionDefinition::cast(node).map(Member::Function),
            SyntaxKind::ModifierDefinition => ModifierDefinition::cast(node).map(Member::Modifier),
            SyntaxKind::ConstructorDefinition => {
                ConstructorDefinition::cast(node).map(Member::Constructor)
            }
            SyntaxKind::FallbackReceiveDefinition => {
                FallbackReceiveDefinition::cast(node).map(Member::FallbackReceive)
            }
            SyntaxKind::StructDeclaration => StructDeclaration::cast(node).map(Member::Struct),
            SyntaxKind::EnumDeclaration => EnumDeclaration::cast(node).map(Member::Enum),
            SyntaxKind::EventDefinition => EventDefinition::cast(node).map(Member::Event),
            SyntaxKind::ErrorDeclaration => ErrorDeclaration::cast(node).map(Member::Error),
            SyntaxKind::UsingDirective => UsingDirective::cast(node).map(Member::Using),
            SyntaxKind::UserDefinedTypeDefinition => {
                UserDefinedTypeDefinition::cast(node).map(Member::UserDefinedType)
            }
            _ => None,
        }
    }

    pub fn as_cst(&self) -> &SyntaxNode {
        match self {
            Member::StateVariable(n) => n.as_cst(),
            Member::Function(n) => n.as_cst(),
            Member::Modifier(n) => n.as_cst(),
            Member::Constructor(n) => n.as_cst(),
            Member::FallbackReceive(n) => n.as_cst(),
            Member::Struct(n) => n.as_cst(),
            Member::Enum(n) => n.as_cst(),
            Member::Event(n) => n.as_cst(),
            Member::Error(n) => n.as_cst(),
            Member::Using(n) => n.as_cst(),
            Member::UserDefinedType(n) => n.as_cst(),
        }
    }
}

/// First non-trivia direct token of `kind`.
fn token(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|it| it.into_token())
        .find(|t| t.kind() == kind)
}

/// Declarations name themselves with their only direct identifier token.
fn name(node: &SyntaxNode) -> Option<SyntaxToken> {
    token(node, SyntaxKind::Identifier)
}

/// Keyword inside a wrapper node such as `visibility`.
fn wrapped_keyword(node: &SyntaxNode, wrapper: SyntaxKind) -> Option<SyntaxToken> {
    node.children()
        .find(|n| n.kind() == wrapper)?
        .children_with_tokens()
        .filter_map(|it| it.into_token())
        .find(|t| t.kind().is_keyword())
}

impl SourceFile {
    pub fn pragmas(&self) -> impl Iterator<Item = PragmaDirective> + '_ {
        self.0.children().filter_map(PragmaDirective::cast)
    }

    pub fn imports(&self) -> impl Iterator<Item = ImportDirective> + '_ {
        self.0.children().filter_map(ImportDirective::cast)
    }

    pub fn contracts(&self) -> impl Iterator<Item = ContractDeclaration> + '_ {
        self.0.children().filter_map(ContractDeclaration::cast)
    }

    pub fn interfaces(&self) -> impl Iterator<Item = InterfaceDeclaration> + '_ {
        self.0.children().filter_map(InterfaceDeclaration::cast)
    }

    pub fn libraries(&self) -> impl Iterator<Item = LibraryDeclaration> + '_ {
        self.0.children().filter_map(LibraryDeclaration::cast)
    }

    /// File-level functions.
    pub fn functions(&self) -> impl Iterator<Item = FunctionDefinition> + '_ {
        self.0.children().filter_map(FunctionDefinition::cast)
    }
}

impl PragmaDirective {
    pub fn is_solidity(&self) -> bool {
        self.0
            .children()
            .any(|n| n.kind() == SyntaxKind::SolidityPragmaToken)
    }

    /// Constraint texts such as `^0.8.0`, operator and version joined.
    pub fn constraints(&self) -> Vec<String> {
        let Some(token) = self
            .0
            .children()
            .find(|n| n.kind() == SyntaxKind::SolidityPragmaToken)
        else {
            return Vec::new();
        };
        let mut out = Vec::new();
        let mut operator = String::new();
        for child in token.children() {
            match child.kind() {
                SyntaxKind::SolidityVersionComparisonOperator => {
                    operator = child.text().to_string();
                }
                SyntaxKind::SolidityVersion => {
                    out.push(format!("{}{}", std::mem::take(&mut operator), child.text()));
                }
                _ => {}
            }
        }
        out
    }
}

impl ImportDirective {
    /// The imported path, quotes included.
    pub fn source(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::QuotedString)
    }
}

impl ContractDeclaration {
    pub fn is_abstract(&self) -> bool {
        token(&self.0, SyntaxKind::AbstractKw).is_some()
    }

    pub fn name(&self) -> Option<SyntaxToken> {
        name(&self.0)
    }

    /// Base contracts after `is`.
    pub fn ancestors(&self) -> impl Iterator<Item = SyntaxNode> + '_ {
        self.0
            .children()
            .filter(|n| n.kind() == SyntaxKind::InheritanceSpecifier)
            .filter_map(|n| n.children().find(|c| c.kind() == SyntaxKind::UserDefinedType))
    }

    pub fn body(&self) -> Option<ContractBody> {
        self.0.children().find_map(ContractBody::cast)
    }
}

impl InterfaceDeclaration {
    pub fn name(&self) -> Option<SyntaxToken> {
        name(&self.0)
    }

    pub fn body(&self) -> Option<ContractBody> {
        self.0.children().find_map(ContractBody::cast)
    }
}

impl LibraryDeclaration {
    pub fn name(&self) -> Option<SyntaxToken> {
        name(&self.0)
    }

    pub fn body(&self) -> Option<ContractBody> {
        self.0.children().find_map(ContractBody::cast)
    }
}

impl ContractBody {
    pub fn members(&self) -> impl Iterator<Item = Member> + '_ {
        self.0.children().filter_map(Member::cast)
    }

    pub fn functions(&self) -> impl Iterator<Item = FunctionDefinition> + '_ {
        self.0.children().filter_map(FunctionDefinition::cast)
    }

    pub fn state_variables(&self) -> impl Iterator<Item = StateVariableDeclaration> + '_ {
        self.0.children().filter_map(StateVariableDeclaration::cast)
    }
}

impl StateVariableDeclaration {
    pub fn type_name(&self) -> Option<TypeName> {
        self.0.children().find_map(TypeName::cast)
    }

    pub fn name(&self) -> Option<SyntaxToken> {
        name(&self.0)
    }

    pub fn visibility(&self) -> Option<SyntaxToken> {
        wrapped_keyword(&self.0, SyntaxKind::Visibility)
    }

    pub fn is_constant(&self) -> bool {
        token(&self.0, SyntaxKind::ConstantKw).is_some()
    }

    pub fn is_immutable(&self) -> bool {
        self.0.children().any(|n| n.kind() == SyntaxKind::Immutable)
    }
}

impl FunctionDefinition {
    pub fn name(&self) -> Option<SyntaxToken> {
        name(&self.0)
    }

    pub fn parameters(&self) -> impl Iterator<Item = Parameter> + '_ {
        self.0.children().filter_map(Parameter::cast)
    }

    /// Parameters of the `returns (...)` list.
    pub fn return_parameters(&self) -> Vec<Parameter> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::ReturnTypeDefinition)
            .map(|returns| returns.children().filter_map(Parameter::cast).collect())
            .unwrap_or_default()
    }

    pub fn visibility(&self) -> Option<SyntaxToken> {
        wrapped_keyword(&self.0, SyntaxKind::Visibility)
    }

    pub fn state_mutability(&self) -> Option<SyntaxToken> {
        wrapped_keyword(&self.0, SyntaxKind::StateMutability)
    }

    pub fn is_virtual(&self) -> bool {
        self.0.children().any(|n| n.kind() == SyntaxKind::Virtual)
    }

    /// `None` for a declaration ending in `;`.
    pub fn body(&self) -> Option<FunctionBody> {
        self.0.children().find_map(FunctionBody::cast)
    }
}

impl ModifierDefinition {
    pub fn name(&self) -> Option<SyntaxToken> {
        name(&self.0)
    }

    pub fn body(&self) -> Option<FunctionBody> {
        self.0.children().find_map(FunctionBody::cast)
    }
}

impl ConstructorDefinition {
    pub fn parameters(&self) -> impl Iterator<Item = Parameter> + '_ {
        self.0.children().filter_map(Parameter::cast)
    }

    pub fn body(&self) -> Option<FunctionBody> {
        self.0.children().find_map(FunctionBody::cast)
    }
}

impl FallbackReceiveDefinition {
    /// `fallback`, `receive`, or `function` for the legacy unnamed form.
    pub fn keyword(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|t| t.kind().is_keyword())
    }

    pub fn body(&self) -> Option<FunctionBody> {
        self.0.children().find_map(FunctionBody::cast)
    }
}

impl StructDeclaration {
    pub fn name(&self) -> Option<SyntaxToken> {
        name(&self.0)
    }
}

impl EnumDeclaration {
    pub fn name(&self) -> Option<SyntaxToken> {
        name(&self.0)
    }

    pub fn values(&self) -> Vec<SyntaxToken> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::EnumBody)
            .map(|body| {
                body.children()
                    .filter(|n| n.kind() == SyntaxKind::EnumValue)
                    .filter_map(|n| name(&n))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl EventDefinition {
    pub fn name(&self) -> Option<SyntaxToken> {
        name(&self.0)
    }

    pub fn is_anonymous(&self) -> bool {
        token(&self.0, SyntaxKind::AnonymousKw).is_some()
    }
}

impl ErrorDeclaration {
    pub fn name(&self) -> Option<SyntaxToken> {
        name(&self.0)
    }
}

impl UserDefinedTypeDefinition {
    pub fn name(&self) -> Option<SyntaxToken> {
        name(&self.0)
    }
}

impl Parameter {
    pub fn type_name(&self) -> Option<TypeName> {
        self.0.children().find_map(TypeName::cast)
    }

    pub fn name(&self) -> Option<SyntaxToken> {
        name(&self.0)
    }

    /// `memory`, `storage` or `calldata`.
    pub fn location(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|t| {
                matches!(
                    t.kind(),
                    SyntaxKind::MemoryKw | SyntaxKind::StorageKw | SyntaxKind::CalldataKw
                )
            })
    }
}

impl FunctionBody {
    pub fn statements(&self) -> impl Iterator<Item = Statement> + '_ {
        self.0.children().filter_map(Statement::cast)
    }
}

impl Statement {
    /// The concrete statement node (`return_statement`, `if_statement`, ...).
    pub fn inner(&self) -> Option<SyntaxNode> {
        self.0.first_child()
    }

    pub fn kind(&self) -> Option<SyntaxKind> {
        self.inner().map(|n| n.kind())
    }
}

impl TypeName {
    /// Source text without surrounding trivia, e.g. `mapping(address => uint256)`.
    pub fn text(&self) -> String {
        self.0.text().to_string()
    }

    pub fn is_array(&self) -> bool {
        token(&self.0, SyntaxKind::BracketOpen).is_some()
    }

    pub fn is_mapping(&self) -> bool {
        token(&self.0, SyntaxKind::MappingKw).is_some()
    }
}
