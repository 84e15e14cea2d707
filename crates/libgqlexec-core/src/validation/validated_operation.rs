use crate::validation::ResponsePath;
use indexmap::IndexMap;
use libgqlexec_parser::ast::InputValue;
use libgqlexec_parser::ast::OperationKind;
use libgqlexec_parser::ast::SelectionId;
use libgqlexec_parser::ast::StatementId;
use libgqlexec_parser::ast::TypeRef;
use libgqlexec_parser::GraphQLSourceSpan;

/// An operation that passed validation, as the executor walks it.
///
/// Fragment spreads are expanded, selections excluded by `@include`/`@skip`
/// are gone, and every field carries its coerced arguments (variables
/// substituted, defaults filled in) and its schema type. The AST it was
/// built from is left untouched; selections point back into it by id.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidatedOperation {
    pub statement: StatementId,
    pub name: Option<String>,
    pub kind: OperationKind,
    pub root_type: String,
    pub variables: IndexMap<String, InputValue>,
    pub selection_set: ValidatedSelectionSet,

    /// Response paths of every leaf field, in selection order.
    pub leaf_paths: Vec<ResponsePath>,
}

impl ValidatedOperation {
    /// Finds the first field (in selection order) at `path`.
    pub fn find_field(&self, path: &str) -> Option<&ValidatedField> {
        self.selection_set.find_field(path)
    }

    pub fn field_count(&self) -> usize {
        self.selection_set.field_count()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValidatedSelectionSet {
    pub items: Vec<ValidatedSelection>,
}

impl ValidatedSelectionSet {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Fields directly in this set, looking through fragments.
    pub fn fields(&self) -> Vec<&ValidatedField> {
        let mut out = vec![];
        for item in &self.items {
            match item {
                ValidatedSelection::Field(field) => out.push(field),
                ValidatedSelection::Fragment(frag) => out.extend(frag.selection_set.fields()),
            }
        }
        out
    }

    fn find_field(&self, path: &str) -> Option<&ValidatedField> {
        self.items.iter().find_map(|item| match item {
            ValidatedSelection::Field(field) if field.path.as_str() == path => Some(field),
            ValidatedSelection::Field(field) => field.selection_set.find_field(path),
            ValidatedSelection::Fragment(frag) => frag.selection_set.find_field(path),
        })
    }

    fn field_count(&self) -> usize {
        self.items
            .iter()
            .map(|item| match item {
                ValidatedSelection::Field(field) => 1 + field.selection_set.field_count(),
                ValidatedSelection::Fragment(frag) => frag.selection_set.field_count(),
            })
            .sum()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ValidatedSelection {
    Field(ValidatedField),
    Fragment(ValidatedFragment),
}

/// A field with everything execution needs resolved up front.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidatedField {
    pub selection: SelectionId,
    pub name: String,
    pub response_key: String,
    pub path: ResponsePath,

    /// The static type of the object this field is selected on.
    pub parent_type: String,
    pub field_type: TypeRef,
    pub arguments: IndexMap<String, InputValue>,

    /// Empty for leaf fields.
    pub selection_set: ValidatedSelectionSet,
    pub span: GraphQLSourceSpan,
}

impl ValidatedField {
    pub const TYPENAME: &'static str = "__typename";

    pub fn is_typename(&self) -> bool {
        self.name == Self::TYPENAME
    }
}

/// An expanded fragment spread or inline fragment.
///
/// `type_condition` is `None` when the fragment applies to every value of
/// the enclosing type; otherwise only values whose concrete type is (or
/// implements) the condition get its fields.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidatedFragment {
    pub selection: SelectionId,
    pub type_condition: Option<String>,
    pub selection_set: ValidatedSelectionSet,
}
