use crate::execution::ExecutionError;
use crate::execution::ResolverContext;
use crate::execution::ResolverRegistry;
use crate::execution::Response;
use crate::schema::BuiltinScalar;
use crate::schema::TypeCache;
use crate::validation::input_coercion::describe_value;
use crate::validation::input_coercion::type_at_level;
use crate::validation::ValidatedField;
use crate::validation::ValidatedOperation;
use crate::validation::ValidatedSelection;
use crate::validation::ValidatedSelectionSet;
use crate::GraphQLError;
use async_recursion::async_recursion;
use indexmap::IndexMap;
use libgqlexec_parser::ast::InputValue;
use libgqlexec_parser::ast::TypeDefinition;
use libgqlexec_parser::parse_value_text;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

/// Executes validated operations against registered resolvers.
///
/// Fields are visited depth first in selection order. A field with a
/// resolver registered at its response path gets its data from that
/// resolver; any other field reads its value out of the enclosing value by
/// field name. Either way the value is checked against the field's type
/// level by level (list nesting, nullability, scalar kind, enum values)
/// before it is written to the response under its response key.
///
/// A field that fails is written as `null` and its error recorded; siblings
/// carry on. Once more than `max_errors` errors have been recorded, or the
/// cancellation token fires, the rest of the tree is skipped.
pub struct Executor<'a> {
    cache: &'a TypeCache,
    resolvers: &'a ResolverRegistry,
    cancellation: CancellationToken,
    max_errors: usize,
    errors: Vec<ExecutionError>,
    aborted: bool,
}

impl<'a> Executor<'a> {
    pub const DEFAULT_MAX_ERRORS: usize = 10;

    pub fn new(cache: &'a TypeCache, resolvers: &'a ResolverRegistry) -> Self {
        Self {
            cache,
            resolvers,
            cancellation: CancellationToken::new(),
            max_errors: Self::DEFAULT_MAX_ERRORS,
            errors: vec![],
            aborted: false,
        }
    }

    /// Resolver calls in flight are abandoned once `cancellation` fires.
    pub fn with_cancellation(mut self, cancellation: CancellationToken) -> Self {
        self.cancellation = cancellation;
        self
    }

    pub fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors.max(1);
        self
    }

    pub async fn execute(mut self, operation: &ValidatedOperation) -> Response {
        let started = Instant::now();
        let data = self
            .execute_selection_set(&operation.selection_set, &operation.root_type, None)
            .await;
        let cancelled = self.cancellation.is_cancelled();

        tracing::debug!(
            operation = operation.name.as_deref().unwrap_or("<anonymous>"),
            errors = self.errors.len(),
            aborted = self.aborted,
            cancelled,
            elapsed_us = started.elapsed().as_micros() as u64,
            "executed operation",
        );

        let data = if cancelled {
            InputValue::Null
        } else {
            InputValue::Object(data)
        };
        Response::new(data, self.errors.into_iter().map(GraphQLError::from).collect())
    }

    fn report(&mut self, error: ExecutionError) {
        if self.aborted {
            return;
        }
        tracing::trace!(%error, "execution error");
        self.errors.push(error);
        if self.errors.len() > self.max_errors {
            tracing::debug!(limit = self.max_errors, "execution error ceiling reached");
            self.errors.push(ExecutionError::TooManyErrors {
                limit: self.max_errors,
            });
            self.aborted = true;
        }
    }

    /// `object_type` is always an object type: the root type, or the
    /// runtime type of `item`.
    #[async_recursion]
    async fn execute_selection_set(
        &mut self,
        set: &ValidatedSelectionSet,
        object_type: &str,
        item: Option<&InputValue>,
    ) -> IndexMap<String, InputValue> {
        let mut out = IndexMap::new();
        self.collect_selection_set(set, object_type, item, &mut out).await;
        out
    }

    #[async_recursion]
    async fn collect_selection_set(
        &mut self,
        set: &ValidatedSelectionSet,
        object_type: &str,
        item: Option<&InputValue>,
        out: &mut IndexMap<String, InputValue>,
    ) {
        for selection in &set.items {
            if self.aborted {
                return;
            }
            match selection {
                ValidatedSelection::Field(field) => {
                    let value = self
                        .execute_field(field, object_type, item)
                        .await
                        .unwrap_or(InputValue::Null);
                    out.insert(field.response_key.clone(), value);
                },
                ValidatedSelection::Fragment(fragment) => {
                    if let Some(condition) = &fragment.type_condition
                        && !self.cache.is_possible_type(condition, object_type)
                    {
                        continue;
                    }
                    self.collect_selection_set(&fragment.selection_set, object_type, item, out)
                        .await;
                },
            }
        }
    }

    async fn execute_field(
        &mut self,
        field: &ValidatedField,
        object_type: &str,
        item: Option<&InputValue>,
    ) -> Option<InputValue> {
        if field.is_typename() {
            return Some(InputValue::String(object_type.to_string()));
        }
        if self.cancellation.is_cancelled() {
            self.report(ExecutionError::Cancelled {
                path: field.path.to_string(),
                span: field.span.clone(),
            });
            self.aborted = true;
            return None;
        }

        let inherited = item
            .and_then(InputValue::as_object)
            .map(|fields| fields.get(&field.name).cloned().unwrap_or(InputValue::Null));

        let value = match self.resolvers.get(field.path.as_str()) {
            Some(_) => self.invoke_resolver(field, item, inherited).await?,
            None => match inherited {
                Some(value) => value,
                None => {
                    self.report(ExecutionError::MissingData {
                        path: field.path.to_string(),
                        span: field.span.clone(),
                    });
                    return None;
                },
            },
        };

        self.complete_value(field, value, 0).await
    }

    async fn invoke_resolver(
        &mut self,
        field: &ValidatedField,
        item: Option<&InputValue>,
        inherited: Option<InputValue>,
    ) -> Option<InputValue> {
        let resolver = self.resolvers.get(field.path.as_str())?.clone();

        let mut arguments = field.arguments.clone();
        if let Some(value) = inherited
            && !value.is_null()
        {
            arguments.insert(ResolverContext::RESP_ARGUMENT.to_string(), value);
        }
        let ctx = ResolverContext {
            path: field.path.clone(),
            arguments,
            parent: item.cloned(),
            cancellation: self.cancellation.clone(),
        };

        let started = Instant::now();
        let result = tokio::select! {
            biased;
            _ = self.cancellation.cancelled() => None,
            result = resolver.resolve(ctx) => Some(result),
        };
        tracing::debug!(
            path = field.path.as_str(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "resolver returned",
        );

        let text = match result {
            None => {
                self.report(ExecutionError::Cancelled {
                    path: field.path.to_string(),
                    span: field.span.clone(),
                });
                self.aborted = true;
                return None;
            },
            Some(Err(err)) => {
                self.report(ExecutionError::ResolverFailed {
                    path: field.path.to_string(),
                    message: err.message().to_string(),
                    span: field.span.clone(),
                });
                return None;
            },
            Some(Ok(text)) => text,
        };

        if text.trim().is_empty() {
            self.report(ExecutionError::EmptyResolverOutput {
                path: field.path.to_string(),
                span: field.span.clone(),
            });
            return None;
        }
        match parse_value_text(&text).into_result() {
            Ok(value) => Some(value),
            Err(errors) => {
                self.report(ExecutionError::UnparseableResolverOutput {
                    path: field.path.to_string(),
                    errors,
                    span: field.span.clone(),
                });
                None
            },
        }
    }

    /// Checks `value` against list level `level` of the field's type and
    /// produces the value written to the response.
    #[async_recursion]
    async fn complete_value(
        &mut self,
        field: &ValidatedField,
        value: InputValue,
        level: u8,
    ) -> Option<InputValue> {
        let type_ref = &field.field_type;

        if value.is_null() {
            if type_ref.is_non_null_at(level) {
                self.report(ExecutionError::NonNullViolation {
                    path: field.path.to_string(),
                    expected: type_at_level(type_ref, level).to_string(),
                    span: field.span.clone(),
                });
                return None;
            }
            return Some(InputValue::Null);
        }

        if level < type_ref.depth {
            let InputValue::List(items) = value else {
                self.report(ExecutionError::ListDepthMismatch {
                    path: field.path.to_string(),
                    type_name: type_ref.to_string(),
                    expected: type_ref.depth,
                    found: level,
                    span: field.span.clone(),
                });
                return None;
            };
            let mut completed = Vec::with_capacity(items.len());
            for item in items {
                completed.push(self.complete_value(field, item, level + 1).await?);
            }
            return Some(InputValue::List(completed));
        }

        if let InputValue::List(_) = &value {
            self.report(ExecutionError::ListDepthMismatch {
                path: field.path.to_string(),
                type_name: type_ref.to_string(),
                expected: type_ref.depth,
                found: level + value.list_depth(),
                span: field.span.clone(),
            });
            return None;
        }

        let cache = self.cache;
        let Some(def) = cache.lookup(type_ref) else {
            self.report(ExecutionError::UnknownType {
                path: field.path.to_string(),
                name: type_ref.name.clone(),
                span: field.span.clone(),
            });
            return None;
        };

        match def {
            TypeDefinition::Scalar(scalar) => match BuiltinScalar::from_name(&scalar.name) {
                Some(builtin) => match complete_builtin_scalar(builtin, &value) {
                    Some(completed) => Some(completed),
                    None => {
                        self.report_mismatch(field, &scalar.name, &value);
                        None
                    },
                },
                None => Some(value),
            },

            TypeDefinition::Enum(enum_def) => {
                let name = match &value {
                    InputValue::Enum(name) | InputValue::String(name) => name,
                    _ => {
                        self.report_mismatch(field, &enum_def.name, &value);
                        return None;
                    },
                };
                if enum_def.values.iter().any(|declared| declared == name) {
                    Some(InputValue::Enum(name.clone()))
                } else {
                    self.report(ExecutionError::InvalidEnumValue {
                        path: field.path.to_string(),
                        enum_name: enum_def.name.clone(),
                        value: name.clone(),
                        span: field.span.clone(),
                    });
                    None
                }
            },

            TypeDefinition::Object(_) | TypeDefinition::Interface(_) | TypeDefinition::Union(_) => {
                let Some(fields) = value.as_object() else {
                    self.report_mismatch(field, def.name(), &value);
                    return None;
                };
                let runtime_type = match def {
                    TypeDefinition::Object(obj) => Some(obj.name.as_str()),
                    _ => {
                        let possible = cache.possible_types(def.name());
                        fields
                            .get(ValidatedField::TYPENAME)
                            .and_then(InputValue::as_str)
                            .filter(|name| possible.contains(name))
                            .or(match possible.as_slice() {
                                [only] => Some(*only),
                                _ => None,
                            })
                    },
                };
                let Some(runtime_type) = runtime_type else {
                    self.report(ExecutionError::UnresolvedAbstractType {
                        path: field.path.to_string(),
                        type_name: def.name().to_string(),
                        span: field.span.clone(),
                    });
                    return None;
                };
                let completed = self
                    .execute_selection_set(&field.selection_set, runtime_type, Some(&value))
                    .await;
                Some(InputValue::Object(completed))
            },

            TypeDefinition::InputObject(_) => {
                self.report_mismatch(field, def.name(), &value);
                None
            },
        }
    }

    fn report_mismatch(&mut self, field: &ValidatedField, expected: &str, value: &InputValue) {
        self.report(ExecutionError::TypeMismatch {
            path: field.path.to_string(),
            expected: expected.to_string(),
            found: describe_value(value),
            span: field.span.clone(),
        });
    }
}

/// `None` when the value's kind does not fit the scalar.
fn complete_builtin_scalar(scalar: BuiltinScalar, value: &InputValue) -> Option<InputValue> {
    match (scalar, value) {
        (BuiltinScalar::Int, InputValue::Int(v)) if i32::try_from(*v).is_ok() => Some(InputValue::Int(*v)),
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
