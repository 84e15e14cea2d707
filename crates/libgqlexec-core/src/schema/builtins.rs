//! Scalars and directives every schema has without declaring them.

use indexmap::IndexMap;
use libgqlexec_parser::ast::DirectiveDefinition;
use libgqlexec_parser::ast::DirectiveLocation;
use libgqlexec_parser::ast::InputValueDefinition;
use libgqlexec_parser::ast::ScalarTypeDefinition;
use libgqlexec_parser::ast::TypeDefinition;
use libgqlexec_parser::ast::TypeRef;
use libgqlexec_parser::GraphQLSourceSpan;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BuiltinScalar {
    Int,
    Float,
    String,
    Boolean,
    ID,
}

impl BuiltinScalar {
    pub const ALL: [BuiltinScalar; 5] = [
        BuiltinScalar::Int,
        BuiltinScalar::Float,
        BuiltinScalar::String,
        BuiltinScalar::Boolean,
        BuiltinScalar::ID,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BuiltinScalar::Int => "Int",
            BuiltinScalar::Float => "Float",
            BuiltinScalar::String => "String",
            BuiltinScalar::Boolean => "Boolean",
            BuiltinScalar::ID => "ID",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|scalar| scalar.name() == name)
    }
}

pub const BUILTIN_DIRECTIVES: [&str; 2] = ["include", "skip"];

pub fn is_builtin_scalar(name: &str) -> bool {
    BuiltinScalar::from_name(name).is_some()
}

pub fn is_builtin_directive(name: &str) -> bool {
    BUILTIN_DIRECTIVES.contains(&name)
}

pub(crate) fn builtin_scalar_definitions() -> impl Iterator<Item = TypeDefinition> {
    BuiltinScalar::ALL.into_iter().map(|scalar| {
        TypeDefinition::Scalar(ScalarTypeDefinition {
            name: scalar.name().to_string(),
            span: GraphQLSourceSpan::builtin(),
        })
    })
}

/// `@include(if: Boolean!)` and `@skip(if: Boolean!)`, both allowed on
/// fields, fragment spreads and inline fragments.
pub(crate) fn builtin_directive_definitions() -> Vec<DirectiveDefinition> {
    BUILTIN_DIRECTIVES
        .iter()
        .map(|name| {
            let mut arguments = IndexMap::new();
            arguments.insert(
                "if".to_string(),
                InputValueDefinition {
                    name: "if".to_string(),
                    type_ref: TypeRef::named("Boolean").non_null(),
                    default_value: None,
                    span: GraphQLSourceSpan::builtin(),
                },
            );
            DirectiveDefinition {
                name: name.to_string(),
                arguments,
                repeatable: false,
                locations: vec![
                    DirectiveLocation::Field,
                    DirectiveLocation::FragmentSpread,
                    DirectiveLocation::InlineFragment,
                ],
                span: GraphQLSourceSpan::builtin(),
            }
        })
        .collect()
}
