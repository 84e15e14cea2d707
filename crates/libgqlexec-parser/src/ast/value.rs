use crate::ast::AstNode;
use crate::GraphQLSourceSpan;
use indexmap::IndexMap;
use inherent::inherent;
use serde::de;
use serde::Deserialize;
use serde::Deserializer;

/// A value literal: an argument, a default, a bound variable or a parsed
/// resolver result.
///
/// An empty list is `List(vec![])`, which is distinct from `Null`.
#[derive(Clone, Debug, PartialEq)]
pub enum InputValue {
    Int(i64),
    Float(f64),
    String(String),
    /// Content of a `"""block string"""` (already dedented).
    RawString(String),
    Boolean(bool),
    Null,
    Enum(String),
    List(Vec<InputValue>),
    Object(IndexMap<String, InputValue>),
    /// A `$name` reference, substituted once variables are bound.
    Variable(String),
}

impl InputValue {
    pub fn is_null(&self) -> bool {
        matches!(self, InputValue::Null)
    }

    pub fn as_list(&self) -> Option<&[InputValue]> {
        match self {
            InputValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, InputValue>> {
        match self {
            InputValue::Object(fields) => Some(fields),
            _ => None,
        }
    }

    /// Text content of `String` and `RawString` values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            InputValue::String(s) | InputValue::RawString(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            InputValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// A short noun for the kind of this value, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            InputValue::Int(_) => "int",
            InputValue::Float(_) => "float",
            InputValue::String(_) => "string",
            InputValue::RawString(_) => "block string",
            InputValue::Boolean(_) => "boolean",
            InputValue::Null => "null",
            InputValue::Enum(_) => "enum value",
            InputValue::List(_) => "list",
            InputValue::Object(_) => "object",
            InputValue::Variable(_) => "variable",
        }
    }

    /// Number of directly nested list levels, following the first item of
    /// each list. `[[1]]` is 2, `[]` is 1 and `1` is 0.
    pub fn list_depth(&self) -> u8 {
        match self {
            InputValue::List(items) => {
                1 + items.first().map(|item| item.list_depth()).unwrap_or(0)
            },
            _ => 0,
        }
    }

    /// `true` if any `Variable` remains anywhere inside this value.
    pub fn contains_variables(&self) -> bool {
        match self {
            InputValue::Variable(_) => true,
            InputValue::List(items) => items.iter().any(|v| v.contains_variables()),
            InputValue::Object(fields) => fields.values().any(|v| v.contains_variables()),
            _ => false,
        }
    }
}

/// Deserializes from self-describing data such as JSON. Strings become
/// `String`, whole numbers `Int`, other numbers `Float`, maps `Object`.
impl<'de> Deserialize<'de> for InputValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(InputValueVisitor)
    }
}

struct InputValueVisitor;

impl<'de> de::Visitor<'de> for InputValueVisitor {
    type Value = InputValue;

    fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str("a GraphQL input value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<InputValue, E> {
        Ok(InputValue::Boolean(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<InputValue, E> {
        Ok(InputValue::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<InputValue, E> {
        match i64::try_from(v) {
            Ok(v) => Ok(InputValue::Int(v)),
            Err(_) => Ok(InputValue::Float(v as f64)),
        }
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<InputValue, E> {
        Ok(InputValue::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<InputValue, E> {
        Ok(InputValue::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<InputValue, E> {
        Ok(InputValue::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<InputValue, E> {
        Ok(InputValue::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<InputValue, E> {
        Ok(InputValue::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<InputValue, D::Error> {
        InputValue::deserialize(deserializer)
    }

    fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<InputValue, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(InputValue::List(items))
    }

    fn visit_map<A: de::MapAccess<'de>>(self, mut map: A) -> Result<InputValue, A::Error> {
        let mut fields = IndexMap::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, InputValue>()? {
            fields.insert(key, value);
        }
        Ok(InputValue::Object(fields))
    }
}

/// `name: value` inside a field's or directive's argument list.
#[derive(Clone, Debug, PartialEq)]
pub struct Argument {
    pub name: String,
    pub value: InputValue,
    pub span: GraphQLSourceSpan,
}

#[inherent]
impl AstNode for Argument {
    pub fn span(&self) -> &GraphQLSourceSpan {
        &self.span
    }
}

/// A directive annotation such as `@include(if: $withFriends)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Directive {
    pub name: String,
    pub arguments: Vec<Argument>,
    pub span: GraphQLSourceSpan,
}

impl Directive {
    pub fn argument(&self, name: &str) -> Option<&Argument> {
        self.arguments.iter().find(|arg| arg.name == name)
    }
}

#[inherent]
impl AstNode for Directive {
    pub fn span(&self) -> &GraphQLSourceSpan {
        &self.span
    }
}
