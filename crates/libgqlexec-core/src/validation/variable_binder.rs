use crate::schema::TypeCache;
use crate::validation::InputCoercer;
use crate::validation::ValidationError;
use indexmap::IndexMap;
use libgqlexec_parser::ast::Document;
use libgqlexec_parser::ast::InputValue;
use libgqlexec_parser::ast::OperationDefinition;
use libgqlexec_parser::ast::Statement;
use libgqlexec_parser::ast::StatementId;

/// Binds the variables an operation declares.
///
/// Each variable takes the caller-supplied value if there is one, else its
/// default, else `null`. A non-null variable with neither is an error, as is
/// any value that does not fit the declared type. Supplied values for
/// variables the operation does not declare are ignored.
pub fn bind_variables(
    cache: &TypeCache,
    operation: &OperationDefinition,
    supplied: &IndexMap<String, InputValue>,
) -> Result<IndexMap<String, InputValue>, Vec<ValidationError>> {
    let mut bound = IndexMap::new();
    let mut errors = vec![];

    for var in &operation.variables {
        match cache.lookup(&var.type_ref) {
            Some(def) if def.is_input_type() => {},
            Some(def) => {
                errors.push(ValidationError::NotInputType {
                    type_name: def.name().to_string(),
                    span: var.type_ref.span.clone(),
                });
                continue;
            },
            None => {
                errors.push(ValidationError::UnknownType {
                    name: var.type_ref.name.clone(),
                    span: var.type_ref.span.clone(),
                });
                continue;
            },
        }

        let coerced = match (supplied.get(&var.name), &var.default_value) {
            (Some(value), _) => {
                InputCoercer::for_variable_values(cache).coerce(value, &var.type_ref, &var.span)
            },
            (None, Some(default)) => {
                InputCoercer::new(cache).coerce(default, &var.type_ref, &var.span)
            },
            (None, None) if var.type_ref.is_non_null() => {
                errors.push(ValidationError::MissingVariable {
                    name: var.name.clone(),
                    type_name: var.type_ref.to_string(),
                    span: var.span.clone(),
                });
                continue;
            },
            (None, None) => Ok(InputValue::Null),
        };
        match coerced {
            Ok(value) => {
                bound.insert(var.name.clone(), value);
            },
            Err(errs) => errors.extend(errs),
        }
    }

    for name in supplied.keys() {
        if operation.variable(name).is_none() {
            tracing::warn!(
                variable = name.as_str(),
                operation = operation.name.as_deref().unwrap_or("<anonymous>"),
                "ignoring value for undeclared variable",
            );
        }
    }

    if errors.is_empty() {
        Ok(bound)
    } else {
        Err(errors)
    }
}

/// Writes bound values into the `value` slots of an operation's variable
/// definitions.
pub fn apply_bindings(
    document: &mut Document,
    operation: StatementId,
    bound: &IndexMap<String, InputValue>,
) {
    if let Statement::Operation(op) = document.statement_mut(operation) {
        for var in &mut op.variables {
            var.value = bound.get(&var.name).cloned();
        }
    }
}
