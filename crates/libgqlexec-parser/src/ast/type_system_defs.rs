use crate::ast::AstNode;
use crate::ast::InputValue;
use crate::ast::TypeRef;
use crate::GraphQLSourceSpan;
use indexmap::IndexMap;
use inherent::inherent;

/// The definitions found in a schema (SDL) document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SchemaDocument {
    pub type_definitions: Vec<TypeDefinition>,
    pub directive_definitions: Vec<DirectiveDefinition>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TypeDefinition {
    Scalar(ScalarTypeDefinition),
    Object(ObjectOrInterfaceTypeDefinition),
    Interface(ObjectOrInterfaceTypeDefinition),
    Union(UnionTypeDefinition),
    Enum(EnumTypeDefinition),
    InputObject(InputObjectTypeDefinition),
}

impl TypeDefinition {
    pub fn name(&self) -> &str {
        match self {
            TypeDefinition::Scalar(def) => &def.name,
            TypeDefinition::Object(def) | TypeDefinition::Interface(def) => &def.name,
            TypeDefinition::Union(def) => &def.name,
            TypeDefinition::Enum(def) => &def.name,
            TypeDefinition::InputObject(def) => &def.name,
        }
    }

    /// The SDL keyword introducing this kind of definition.
    pub fn kind_name(&self) -> &'static str {
        match self {
            TypeDefinition::Scalar(_) => "scalar",
            TypeDefinition::Object(_) => "type",
            TypeDefinition::Interface(_) => "interface",
            TypeDefinition::Union(_) => "union",
            TypeDefinition::Enum(_) => "enum",
            TypeDefinition::InputObject(_) => "input",
        }
    }

    /// Object, interface and union types: the ones that take a selection
    /// set.
    pub fn is_composite(&self) -> bool {
        matches!(
            self,
            TypeDefinition::Object(_) | TypeDefinition::Interface(_) | TypeDefinition::Union(_),
        )
    }

    /// Scalars and enums: the ones that end a selection.
    pub fn is_leaf(&self) -> bool {
        matches!(self, TypeDefinition::Scalar(_) | TypeDefinition::Enum(_))
    }

    pub fn is_input_type(&self) -> bool {
        matches!(
            self,
            TypeDefinition::Scalar(_) | TypeDefinition::Enum(_) | TypeDefinition::InputObject(_),
        )
    }

    /// Looks up a field on an object or interface type.
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        match self {
            TypeDefinition::Object(def) | TypeDefinition::Interface(def) => def.fields.get(name),
            _ => None,
        }
    }

    /// Names of every type this definition refers to: field, argument and
    /// input field types, implemented interfaces and union members.
    pub fn referenced_type_names(&self) -> Vec<(&str, &GraphQLSourceSpan)> {
        let mut names = Vec::new();
        match self {
            TypeDefinition::Scalar(_) | TypeDefinition::Enum(_) => {},
            TypeDefinition::Object(def) | TypeDefinition::Interface(def) => {
                for (iface, span) in &def.implements {
                    names.push((iface.as_str(), span));
                }
                for field in def.fields.values() {
                    names.push((field.type_ref.name.as_str(), &field.type_ref.span));
                    for arg in field.arguments.values() {
                        names.push((arg.type_ref.name.as_str(), &arg.type_ref.span));
                    }
                }
            },
            TypeDefinition::Union(def) => {
                for (member, span) in &def.members {
                    names.push((member.as_str(), span));
                }
            },
            TypeDefinition::InputObject(def) => {
                for field in def.fields.values() {
                    names.push((field.type_ref.name.as_str(), &field.type_ref.span));
                }
            },
        }
        names
    }

    /// Every type reference owned by this definition, for patching their
    /// resolved slots.
    pub fn type_refs_mut(&mut self) -> Vec<&mut TypeRef> {
        match self {
            TypeDefinition::Scalar(_)
            | TypeDefinition::Enum(_)
            | TypeDefinition::Union(_) => vec![],
            TypeDefinition::Object(def) | TypeDefinition::Interface(def) => def
                .fields
                .values_mut()
                .flat_map(|field| {
                    std::iter::once(&mut field.type_ref).chain(
                        field.arguments.values_mut().map(|arg| &mut arg.type_ref),
                    )
                })
                .collect(),
            TypeDefinition::InputObject(def) => def
                .fields
                .values_mut()
                .map(|field| &mut field.type_ref)
                .collect(),
        }
    }
}

#[inherent]
impl AstNode for TypeDefinition {
    pub fn span(&self) -> &GraphQLSourceSpan {
        match self {
            TypeDefinition::Scalar(def) => &def.span,
            TypeDefinition::Object(def) | TypeDefinition::Interface(def) => &def.span,
            TypeDefinition::Union(def) => &def.span,
            TypeDefinition::Enum(def) => &def.span,
            TypeDefinition::InputObject(def) => &def.span,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScalarTypeDefinition {
    pub name: String,
    pub span: GraphQLSourceSpan,
}

/// Shared shape of `type` and `interface` definitions.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectOrInterfaceTypeDefinition {
    pub name: String,
    pub implements: Vec<(String, GraphQLSourceSpan)>,
    pub fields: IndexMap<String, FieldDefinition>,
    pub span: GraphQLSourceSpan,
}

impl ObjectOrInterfaceTypeDefinition {
    pub fn implements_interface(&self, name: &str) -> bool {
        self.implements.iter().any(|(iface, _)| iface == name)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldDefinition {
    pub name: String,
    pub arguments: IndexMap<String, InputValueDefinition>,
    pub type_ref: TypeRef,
    pub span: GraphQLSourceSpan,
}

/// An argument or input-object field definition: `name: Type = default`.
#[derive(Clone, Debug, PartialEq)]
pub struct InputValueDefinition {
    pub name: String,
    pub type_ref: TypeRef,
    pub default_value: Option<InputValue>,
    pub span: GraphQLSourceSpan,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UnionTypeDefinition {
    pub name: String,
    pub members: Vec<(String, GraphQLSourceSpan)>,
    pub span: GraphQLSourceSpan,
}

impl UnionTypeDefinition {
    pub fn has_member(&self, name: &str) -> bool {
        self.members.iter().any(|(member, _)| member == name)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnumTypeDefinition {
    pub name: String,
    pub values: Vec<String>,
    pub span: GraphQLSourceSpan,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InputObjectTypeDefinition {
    pub name: String,
    pub fields: IndexMap<String, InputValueDefinition>,
    pub span: GraphQLSourceSpan,
}

/// `directive @name(arguments) repeatable? on LOCATION | ...`
#[derive(Clone, Debug, PartialEq)]
pub struct DirectiveDefinition {
    pub name: String,
    pub arguments: IndexMap<String, InputValueDefinition>,
    pub repeatable: bool,
    pub locations: Vec<DirectiveLocation>,
    pub span: GraphQLSourceSpan,
}

#[inherent]
impl AstNode for DirectiveDefinition {
    pub fn span(&self) -> &GraphQLSourceSpan {
        &self.span
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DirectiveLocation {
    // Executable locations
    Query,
    Mutation,
    Subscription,
    Field,
    FragmentDefinition,
    FragmentSpread,
    InlineFragment,
    VariableDefinition,

    // Type system locations
    Schema,
    Scalar,
    Object,
    FieldDefinition,
    ArgumentDefinition,
    Interface,
    Union,
    Enum,
    EnumValue,
    InputObject,
    InputFieldDefinition,
}

impl DirectiveLocation {
    pub const ALL: [DirectiveLocation; 19] = [
        DirectiveLocation::Query,
        DirectiveLocation::Mutation,
        DirectiveLocation::Subscription,
        DirectiveLocation::Field,
        DirectiveLocation::FragmentDefinition,
        DirectiveLocation::FragmentSpread,
        DirectiveLocation::InlineFragment,
        DirectiveLocation::VariableDefinition,
        DirectiveLocation::Schema,
        DirectiveLocation::Scalar,
        DirectiveLocation::Object,
        DirectiveLocation::FieldDefinition,
        DirectiveLocation::ArgumentDefinition,
        DirectiveLocation::Interface,
        DirectiveLocation::Union,
        DirectiveLocation::Enum,
        DirectiveLocation::EnumValue,
        DirectiveLocation::InputObject,
        DirectiveLocation::InputFieldDefinition,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DirectiveLocation::Query => "QUERY",
            DirectiveLocation::Mutation => "MUTATION",
            DirectiveLocation::Subscription => "SUBSCRIPTION",
            DirectiveLocation::Field => "FIELD",
            DirectiveLocation::FragmentDefinition => "FRAGMENT_DEFINITION",
            DirectiveLocation::FragmentSpread => "FRAGMENT_SPREAD",
            DirectiveLocation::InlineFragment => "INLINE_FRAGMENT",
            DirectiveLocation::VariableDefinition => "VARIABLE_DEFINITION",
            DirectiveLocation::Schema => "SCHEMA",
            DirectiveLocation::Scalar => "SCALAR",
            DirectiveLocation::Object => "OBJECT",
            DirectiveLocation::FieldDefinition => "FIELD_DEFINITION",
            DirectiveLocation::ArgumentDefinition => "ARGUMENT_DEFINITION",
            DirectiveLocation::Interface => "INTERFACE",
            DirectiveLocation::Union => "UNION",
            DirectiveLocation::Enum => "ENUM",
            DirectiveLocation::EnumValue => "ENUM_VALUE",
            DirectiveLocation::InputObject => "INPUT_OBJECT",
            DirectiveLocation::InputFieldDefinition => "INPUT_FIELD_DEFINITION",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|loc| loc.as_str() == name)
    }
}

impl std::fmt::Display for DirectiveLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
