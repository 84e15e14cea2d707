use crate::validation::ValidatedOperation;
use indexmap::IndexMap;
use libgqlexec_parser::ast::Document;
use libgqlexec_parser::ast::InputValue;
use libgqlexec_parser::ast::OperationKind;

/// An operation that parsed, resolved and validated, with its variables
/// bound. Ready to be executed any number of times.
#[derive(Clone, Debug)]
pub struct PreparedOperation {
    document: Document,
    operation: ValidatedOperation,
}

impl PreparedOperation {
    pub(crate) fn new(document: Document, operation: ValidatedOperation) -> Self {
        Self {
            document,
            operation,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.operation.name.as_deref()
    }

    pub fn kind(&self) -> OperationKind {
        self.operation.kind
    }

    /// The parsed document, with resolved type slots and bound variable
    /// values filled in.
    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn operation(&self) -> &ValidatedOperation {
        &self.operation
    }

    pub fn variables(&self) -> &IndexMap<String, InputValue> {
        &self.operation.variables
    }
}
