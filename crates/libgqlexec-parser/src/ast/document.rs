use crate::ast::FragmentDefinition;
use crate::ast::OperationDefinition;
use crate::ast::Selection;
use crate::ast::SelectionId;
use crate::ast::SelectionNode;
use crate::ast::SelectionSet;
use crate::ast::Statement;
use crate::ast::StatementId;
use indexmap::IndexMap;

/// A parsed executable document.
///
/// Owns its statements and the arena holding every selection of every
/// statement. Named operations and fragments are indexed by name, but only
/// when they parsed without errors; a statement that needed error recovery is
/// kept for tooling yet can never be looked up and run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    statements: Vec<Statement>,
    selections: Vec<SelectionNode>,
    operation_index: IndexMap<String, StatementId>,
    fragment_index: IndexMap<String, StatementId>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn statement_ids(&self) -> impl Iterator<Item = StatementId> + use<> {
        (0..self.statements.len()).map(StatementId::new)
    }

    pub fn statement(&self, id: StatementId) -> &Statement {
        &self.statements[id.index()]
    }

    pub fn statement_mut(&mut self, id: StatementId) -> &mut Statement {
        &mut self.statements[id.index()]
    }

    /// All operations, indexed or not, in document order.
    pub fn operations(&self) -> impl Iterator<Item = (StatementId, &OperationDefinition)> {
        self.statements
            .iter()
            .enumerate()
            .filter_map(|(i, stmt)| stmt.as_operation().map(|op| (StatementId::new(i), op)))
    }

    /// Looks up a cleanly-parsed operation by name.
    pub fn operation_by_name(&self, name: &str) -> Option<StatementId> {
        self.operation_index.get(name).copied()
    }

    /// Looks up a cleanly-parsed fragment by name.
    pub fn fragment_by_name(&self, name: &str) -> Option<StatementId> {
        self.fragment_index.get(name).copied()
    }

    pub fn fragment(&self, name: &str) -> Option<&FragmentDefinition> {
        self.fragment_by_name(name)
            .and_then(|id| self.statement(id).as_fragment())
    }

    pub fn fragment_ids(&self) -> impl Iterator<Item = StatementId> + '_ {
        self.fragment_index.values().copied()
    }

    pub fn selection_node(&self, id: SelectionId) -> &SelectionNode {
        &self.selections[id.index()]
    }

    pub fn selection(&self, id: SelectionId) -> &Selection {
        &self.selections[id.index()].selection
    }

    pub fn selection_mut(&mut self, id: SelectionId) -> &mut Selection {
        &mut self.selections[id.index()].selection
    }

    pub fn parent_of(&self, id: SelectionId) -> Option<SelectionId> {
        self.selections[id.index()].parent
    }

    pub fn selection_count(&self) -> usize {
        self.selections.len()
    }

    /// Every selection nested under `set`, depth first, in source order.
    pub fn descendants(&self, set: &SelectionSet) -> Vec<SelectionId> {
        let mut out = Vec::new();
        let mut stack: Vec<SelectionId> = set.items.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(children) = self.selection(id).selection_set() {
                stack.extend(children.items.iter().rev().copied());
            }
        }
        out
    }

    pub(crate) fn push_selection(
        &mut self,
        parent: Option<SelectionId>,
        selection: Selection,
    ) -> SelectionId {
        let id = SelectionId::new(self.selections.len());
        self.selections.push(SelectionNode { parent, selection });
        id
    }

    /// Appends a statement. It is indexed by name only when `register` is
    /// set and no statement of the same kind already claimed that name.
    pub(crate) fn push_statement(&mut self, statement: Statement, register: bool) -> StatementId {
        let id = StatementId::new(self.statements.len());
        if register {
            match &statement {
                Statement::Operation(op) => {
                    if let Some(name) = &op.name {
                        self.operation_index.entry(name.clone()).or_insert(id);
                    }
                },
                Statement::Fragment(frag) => {
                    self.fragment_index.entry(frag.name.clone()).or_insert(id);
                },
            }
        }
        self.statements.push(statement);
        id
    }

    pub(crate) fn is_operation_name_taken(&self, name: &str) -> bool {
        self.operation_index.contains_key(name)
    }

    pub(crate) fn is_fragment_name_taken(&self, name: &str) -> bool {
        self.fragment_index.contains_key(name)
    }
}
