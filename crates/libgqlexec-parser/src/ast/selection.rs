use crate::ast::AstNode;
use crate::ast::Argument;
use crate::ast::Directive;
use crate::ast::TypeId;
use crate::GraphQLSourceSpan;
use inherent::inherent;

/// Index of a selection within its [`Document`](crate::ast::Document)'s
/// selection arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SelectionId(u32);

impl SelectionId {
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// An arena slot: a selection plus the selection that encloses it
/// (`None` for selections directly under an operation or fragment).
#[derive(Clone, Debug, PartialEq)]
pub struct SelectionNode {
    pub parent: Option<SelectionId>,
    pub selection: Selection,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Selection {
    Field(Field),
    FragmentSpread(FragmentSpread),
    InlineFragment(InlineFragment),
}

impl Selection {
    pub fn directives(&self) -> &[Directive] {
        match self {
            Selection::Field(field) => &field.directives,
            Selection::FragmentSpread(spread) => &spread.directives,
            Selection::InlineFragment(inline) => &inline.directives,
        }
    }

    /// The nested selection set, if this kind of selection has one.
    pub fn selection_set(&self) -> Option<&SelectionSet> {
        match self {
            Selection::Field(field) => Some(&field.selection_set),
            Selection::FragmentSpread(_) => None,
            Selection::InlineFragment(inline) => Some(&inline.selection_set),
        }
    }
}

#[inherent]
impl AstNode for Selection {
    pub fn span(&self) -> &GraphQLSourceSpan {
        match self {
            Selection::Field(field) => &field.span,
            Selection::FragmentSpread(spread) => &spread.span,
            Selection::InlineFragment(inline) => &inline.span,
        }
    }
}

/// `{ ... }`. Empty (with the span of its owner) when a field has no
/// sub-selections.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectionSet {
    pub items: Vec<SelectionId>,
    pub span: GraphQLSourceSpan,
}

impl SelectionSet {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// `alias: name(arguments) @directives { selections }`
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub alias: Option<String>,
    pub name: String,
    pub arguments: Vec<Argument>,
    pub directives: Vec<Directive>,
    pub selection_set: SelectionSet,
    pub span: GraphQLSourceSpan,
}

impl Field {
    /// The key this field's value is stored under in a response: its alias
    /// if it has one, otherwise its name.
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    pub fn argument(&self, name: &str) -> Option<&Argument> {
        self.arguments.iter().find(|arg| arg.name == name)
    }
}

#[inherent]
impl AstNode for Field {
    pub fn span(&self) -> &GraphQLSourceSpan {
        &self.span
    }
}

/// `...FragmentName @directives`
#[derive(Clone, Debug, PartialEq)]
pub struct FragmentSpread {
    pub fragment_name: String,
    pub directives: Vec<Directive>,
    pub span: GraphQLSourceSpan,
}

/// `... on Type @directives { selections }`; the type condition is optional.
#[derive(Clone, Debug, PartialEq)]
pub struct InlineFragment {
    pub type_condition: Option<TypeCondition>,
    pub directives: Vec<Directive>,
    pub selection_set: SelectionSet,
    pub span: GraphQLSourceSpan,
}

/// `on TypeName`, with a slot for the type it resolves to.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeCondition {
    pub name: String,
    pub span: GraphQLSourceSpan,
    pub resolved: Option<TypeId>,
}
