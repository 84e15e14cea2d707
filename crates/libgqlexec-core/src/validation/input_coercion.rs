//! Checks input values (arguments, variable values, defaults) against the
//! type they are declared with, producing the value execution will see.

use crate::schema::BuiltinScalar;
use crate::schema::TypeCache;
use crate::validation::ValidationError;
use indexmap::IndexMap;
use libgqlexec_parser::ast::InputValue;
use libgqlexec_parser::ast::TypeDefinition;
use libgqlexec_parser::ast::TypeRef;
use libgqlexec_parser::GraphQLSourceSpan;

/// The type a reference describes once `level` list wrappers have been
/// peeled off: level `1` of `[[Int!]]!` is `[Int!]`.
pub fn type_at_level(type_ref: &TypeRef, level: u8) -> TypeRef {
    TypeRef {
        name: type_ref.name.clone(),
        depth: type_ref.depth.saturating_sub(level),
        non_null: type_ref.non_null >> level,
        span: type_ref.span.clone(),
        resolved: type_ref.resolved,
    }
}

/// `kind `value`` as used in mismatch messages.
pub(crate) fn describe_value(value: &InputValue) -> String {
    format!("{} `{value}`", value.kind_name())
}

/// Coerces input values against their declared types.
///
/// List nesting must match the declared depth level by level; a bare value
/// where a list is expected (or the other way round) is a mismatch. Null is
/// rejected at every level whose non-null bit is set. `Int`s must fit in 32
/// bits, enum values must be declared by their enum, and input objects are
/// checked field by field with defaults filled in.
///
/// ```
/// use libgqlexec_core::schema::TypeCache;
/// use libgqlexec_core::validation::InputCoercer;
/// use libgqlexec_parser::ast::InputValue;
/// use libgqlexec_parser::ast::TypeRef;
/// use libgqlexec_parser::GraphQLSourceSpan;
///
/// let cache = TypeCache::new();
/// let list_of_floats = TypeRef::named("Float").non_null().list();
/// let coerced = InputCoercer::new(&cache)
///     .coerce(
///         &InputValue::List(vec![InputValue::Int(1)]),
///         &list_of_floats,
///         &GraphQLSourceSpan::builtin(),
///     )
///     .unwrap();
/// assert_eq!(coerced, InputValue::List(vec![InputValue::Float(1.0)]));
/// ```
pub struct InputCoercer<'a> {
    cache: &'a TypeCache,
    variables: Option<&'a IndexMap<String, InputValue>>,
    string_enums: bool,
}

impl<'a> InputCoercer<'a> {
    pub fn new(cache: &'a TypeCache) -> Self {
        Self {
            cache,
            variables: None,
            string_enums: false,
        }
    }

    /// Substitutes `$name` references with these bound values. Without
    /// bound variables, any variable reference is an error.
    pub fn with_variables(mut self, variables: &'a IndexMap<String, InputValue>) -> Self {
        self.variables = Some(variables);
        self
    }

    /// Caller-supplied variable values arrive as JSON-like data, where enum
    /// values can only be spelled as strings.
    pub fn for_variable_values(cache: &'a TypeCache) -> Self {
        Self {
            cache,
            variables: None,
            string_enums: true,
        }
    }

    pub fn coerce(
        &self,
        value: &InputValue,
        type_ref: &TypeRef,
        span: &GraphQLSourceSpan,
    ) -> Result<InputValue, Vec<ValidationError>> {
        let mut errors = vec![];
        match self.coerce_at(value, type_ref, 0, span, &mut errors) {
            Some(coerced) if errors.is_empty() => Ok(coerced),
            _ => Err(errors),
        }
    }

    fn coerce_at(
        &self,
        value: &InputValue,
        type_ref: &TypeRef,
        level: u8,
        span: &GraphQLSourceSpan,
        errors: &mut Vec<ValidationError>,
    ) -> Option<InputValue> {
        let value = match value {
            InputValue::Variable(name) => {
                let Some(bound) = self.variables.and_then(|vars| vars.get(name)) else {
                    errors.push(ValidationError::UndefinedVariable {
                        name: name.clone(),
                        span: span.clone(),
                    });
                    return None;
                };
                bound
            },
            other => other,
        };

        if value.is_null() {
            if type_ref.is_non_null_at(level) {
                errors.push(ValidationError::NonNullViolation {
                    expected: type_at_level(type_ref, level).to_string(),
                    span: span.clone(),
                });
                return None;
            }
            return Some(InputValue::Null);
        }

        if level < type_ref.depth {
            let InputValue::List(items) = value else {
                errors.push(ValidationError::ListDepthMismatch {
                    type_name: type_ref.to_string(),
                    expected: type_ref.depth,
                    found: level,
                    span: span.clone(),
                });
                return None;
            };
            let mut coerced = Vec::with_capacity(items.len());
            let mut ok = true;
            for item in items {
                match self.coerce_at(item, type_ref, level + 1, span, errors) {
                    Some(item) => coerced.push(item),
                    None => ok = false,
                }
            }
            return ok.then_some(InputValue::List(coerced));
        }

        if let InputValue::List(_) = value {
            errors.push(ValidationError::ListDepthMismatch {
                type_name: type_ref.to_string(),
                expected: type_ref.depth,
                found: level + value.list_depth(),
                span: span.clone(),
            });
            return None;
        }

        let Some(def) = self.cache.lookup(type_ref) else {
            errors.push(ValidationError::UnknownType {
                name: type_ref.name.clone(),
                span: span.clone(),
            });
            return None;
        };
        let mismatch = |errors: &mut Vec<ValidationError>| -> Option<InputValue> {
            errors.push(ValidationError::TypeMismatch {
                expected: type_ref.name.clone(),
                found: describe_value(value),
                span: span.clone(),
            });
            None
        };

        match def {
            TypeDefinition::Scalar(scalar) => match BuiltinScalar::from_name(&scalar.name) {
                Some(builtin) => {
                    let before = errors.len();
                    match coerce_builtin_scalar(builtin, value, span, errors) {
                        Some(coerced) => Some(coerced),
                        None if errors.len() == before => mismatch(errors),
                        None => None,
                    }
                },
                None => Some(value.clone()),
            },

            TypeDefinition::Enum(enum_def) => {
                let name = match value {
                    InputValue::Enum(name) => name,
                    InputValue::String(name) if self.string_enums => name,
                    _ => return mismatch(errors),
                };
                if enum_def.values.iter().any(|declared| declared == name) {
                    Some(InputValue::Enum(name.clone()))
                } else {
                    errors.push(ValidationError::InvalidEnumValue {
                        enum_name: enum_def.name.clone(),
                        value: name.clone(),
                        span: span.clone(),
                    });
                    None
                }
            },

            TypeDefinition::InputObject(input_def) => {
                let InputValue::Object(fields) = value else {
                    return mismatch(errors);
                };
                let before = errors.len();
                for key in fields.keys() {
                    if !input_def.fields.contains_key(key) {
                        errors.push(ValidationError::UnknownInputField {
                            type_name: input_def.name.clone(),
                            field: key.clone(),
                            span: span.clone(),
                        });
                    }
                }

                let mut coerced = IndexMap::new();
                for (field_name, field_def) in &input_def.fields {
                    match fields.get(field_name) {
                        Some(field_value) => {
                            if let Some(v) =
                                self.coerce_at(field_value, &field_def.type_ref, 0, span, errors)
                            {
                                coerced.insert(field_name.clone(), v);
                            }
                        },
                        None => match &field_def.default_value {
                            Some(default) => {
                                coerced.insert(field_name.clone(), default.clone());
                            },
                            None if field_def.type_ref.is_non_null() => {
                                errors.push(ValidationError::MissingInputField {
                                    type_name: input_def.name.clone(),
                                    field: field_name.clone(),
                                    span: span.clone(),
                                });
                            },
                            None => {},
                        },
                    }
                }
                (errors.len() == before).then_some(InputValue::Object(coerced))
            },

            TypeDefinition::Object(_) | TypeDefinition::Interface(_) | TypeDefinition::Union(_) => {
                errors.push(ValidationError::NotInputType {
                    type_name: def.name().to_string(),
                    span: span.clone(),
                });
                None
            },
        }
    }
}

/// `None` without pushing an error means the value's kind does not match.
fn coerce_builtin_scalar(
    scalar: BuiltinScalar,
    value: &InputValue,
    span: &GraphQLSourceSpan,
    errors: &mut Vec<ValidationError>,
) -> Option<InputValue> {
    match (scalar, value) {
        (BuiltinScalar::Int, InputValue::Int(v)) => {
            if i32::try_from(*v).is_ok() {
                Some(InputValue::Int(*v))
            } else {
                errors.push(ValidationError::IntOutOfRange {
                    value: *v,
                    span: span.clone(),
                });
                None
            }
        },
        (BuiltinScalar::Float, InputValue::Int(v)) => Some(InputValue::Float(*v as f64)),
        (BuiltinScalar::Float, InputValue::Float(v)) => Some(InputValue::Float(*v)),
        (BuiltinScalar::String, InputValue::String(s) | InputValue::RawString(s)) => {
            Some(InputValue::String(s.clone()))
        },
        (BuiltinScalar::Boolean, InputValue::Boolean(b)) => Some(InputValue::Boolean(*b)),
        (BuiltinScalar::ID, InputValue::String(s) | InputValue::RawString(s)) => {
            Some(InputValue::String(s.clone()))
        },
        (BuiltinScalar::ID, InputValue::Int(v)) => Some(InputValue::String(v.to_string())),
        _ => None,
    }
}
