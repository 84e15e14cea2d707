//! AST for executable documents, schema fragments and input values.
//!
//! Executable documents keep every selection in a single arena owned by the
//! [`Document`]; selection sets hold [`SelectionId`]s into it and every node
//! records its parent. Identity of a selection is its id, which stays stable
//! for the life of the document.

mod ast_node;
mod display;
mod document;
mod executable_defs;
mod selection;
mod type_ref;
mod type_system_defs;
mod value;

pub use ast_node::AstNode;
pub use document::Document;
pub use executable_defs::FragmentDefinition;
pub use executable_defs::OperationDefinition;
pub use executable_defs::OperationKind;
pub use executable_defs::Statement;
pub use executable_defs::StatementId;
pub use executable_defs::VariableDefinition;
pub use selection::Field;
pub use selection::FragmentSpread;
pub use selection::InlineFragment;
pub use selection::Selection;
pub use selection::SelectionId;
pub use selection::SelectionNode;
pub use selection::SelectionSet;
pub use selection::TypeCondition;
pub use type_ref::TypeId;
pub use type_ref::TypeRef;
pub use type_system_defs::DirectiveDefinition;
pub use type_system_defs::DirectiveLocation;
pub use type_system_defs::EnumTypeDefinition;
pub use type_system_defs::FieldDefinition;
pub use type_system_defs::InputObjectTypeDefinition;
pub use type_system_defs::InputValueDefinition;
pub use type_system_defs::ObjectOrInterfaceTypeDefinition;
pub use type_system_defs::ScalarTypeDefinition;
pub use type_system_defs::SchemaDocument;
pub use type_system_defs::TypeDefinition;
pub use type_system_defs::UnionTypeDefinition;
pub use value::Argument;
pub use value::Directive;
pub use value::InputValue;

#[cfg(test)]
mod tests;
