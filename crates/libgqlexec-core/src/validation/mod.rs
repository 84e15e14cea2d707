//! Checks an operation against the resolved type graph and produces the
//! [`ValidatedOperation`] the executor walks.

mod field_validator;
pub mod input_coercion;
mod response_path;
mod validated_operation;
mod validation_error;
mod variable_binder;

pub use field_validator::FieldValidator;
pub use input_coercion::InputCoercer;
pub use response_path::ResponsePath;
pub use validated_operation::ValidatedField;
pub use validated_operation::ValidatedFragment;
pub use validated_operation::ValidatedOperation;
pub use validated_operation::ValidatedSelection;
pub use validated_operation::ValidatedSelectionSet;
pub use validation_error::ValidationError;
pub use variable_binder::apply_bindings;
pub use variable_binder::bind_variables;

#[cfg(test)]
mod tests;
