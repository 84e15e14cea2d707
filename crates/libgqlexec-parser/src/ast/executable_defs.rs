use crate::ast::AstNode;
use crate::ast::Directive;
use crate::ast::InputValue;
use crate::ast::SelectionSet;
use crate::ast::TypeCondition;
use crate::ast::TypeRef;
use crate::GraphQLSourceSpan;
use inherent::inherent;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl OperationKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            OperationKind::Query => "query",
            OperationKind::Mutation => "mutation",
            OperationKind::Subscription => "subscription",
        }
    }

    /// Name of the schema type this kind of operation is rooted at.
    pub fn root_type_name(&self) -> &'static str {
        match self {
            OperationKind::Query => "Query",
            OperationKind::Mutation => "Mutation",
            OperationKind::Subscription => "Subscription",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "query" => Some(OperationKind::Query),
            "mutation" => Some(OperationKind::Mutation),
            "subscription" => Some(OperationKind::Subscription),
            _ => None,
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

/// `$name: Type = default`.
///
/// `value` is empty until the variable is bound for an execution; after
/// binding it holds the caller-supplied value, else the default, else `Null`.
#[derive(Clone, Debug, PartialEq)]
pub struct VariableDefinition {
    pub name: String,
    pub type_ref: TypeRef,
    pub default_value: Option<InputValue>,
    pub value: Option<InputValue>,
    pub span: GraphQLSourceSpan,
}

#[inherent]
impl AstNode for VariableDefinition {
    pub fn span(&self) -> &GraphQLSourceSpan {
        &self.span
    }
}

/// A query, mutation or subscription. The `{ ... }` shorthand is a query
/// with no name.
#[derive(Clone, Debug, PartialEq)]
pub struct OperationDefinition {
    pub kind: OperationKind,
    pub name: Option<String>,
    pub variables: Vec<VariableDefinition>,
    pub directives: Vec<Directive>,
    pub selection_set: SelectionSet,
    pub span: GraphQLSourceSpan,
}

impl OperationDefinition {
    pub fn variable(&self, name: &str) -> Option<&VariableDefinition> {
        self.variables.iter().find(|var| var.name == name)
    }
}

#[inherent]
impl AstNode for OperationDefinition {
    pub fn span(&self) -> &GraphQLSourceSpan {
        &self.span
    }
}

/// `fragment Name on Type @directives { ... }`
#[derive(Clone, Debug, PartialEq)]
pub struct FragmentDefinition {
    pub name: String,
    pub type_condition: TypeCondition,
    pub directives: Vec<Directive>,
    pub selection_set: SelectionSet,
    pub span: GraphQLSourceSpan,
}

#[inherent]
impl AstNode for FragmentDefinition {
    pub fn span(&self) -> &GraphQLSourceSpan {
        &self.span
    }
}

/// Index of a statement within its [`Document`](crate::ast::Document).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StatementId(u32);

impl StatementId {
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// A top-level definition of an executable document.
#[derive(Clone, Debug, PartialEq)]
pub enum Statement {
    Operation(OperationDefinition),
    Fragment(FragmentDefinition),
}

impl Statement {
    pub fn name(&self) -> Option<&str> {
        match self {
            Statement::Operation(op) => op.name.as_deref(),
            Statement::Fragment(frag) => Some(&frag.name),
        }
    }

    pub fn selection_set(&self) -> &SelectionSet {
        match self {
            Statement::Operation(op) => &op.selection_set,
            Statement::Fragment(frag) => &frag.selection_set,
        }
    }

    pub fn directives(&self) -> &[Directive] {
        match self {
            Statement::Operation(op) => &op.directives,
            Statement::Fragment(frag) => &frag.directives,
        }
    }

    pub fn as_operation(&self) -> Option<&OperationDefinition> {
        match self {
            Statement::Operation(op) => Some(op),
            Statement::Fragment(_) => None,
        }
    }

    pub fn as_fragment(&self) -> Option<&FragmentDefinition> {
        match self {
            Statement::Operation(_) => None,
            Statement::Fragment(frag) => Some(frag),
        }
    }
}

#[inherent]
impl AstNode for Statement {
    pub fn span(&self) -> &GraphQLSourceSpan {
        match self {
            Statement::Operation(op) => &op.span,
            Statement::Fragment(frag) => &frag.span,
        }
    }
}
