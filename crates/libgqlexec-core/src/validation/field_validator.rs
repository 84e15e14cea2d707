use crate::schema::TypeCache;
use crate::validation::InputCoercer;
use crate::validation::ResponsePath;
use crate::validation::ValidatedField;
use crate::validation::ValidatedFragment;
use crate::validation::ValidatedOperation;
use crate::validation::ValidatedSelection;
use crate::validation::ValidatedSelectionSet;
use crate::validation::ValidationError;
use indexmap::IndexMap;
use libgqlexec_parser::ast::Argument;
use libgqlexec_parser::ast::Directive;
use libgqlexec_parser::ast::DirectiveLocation;
use libgqlexec_parser::ast::Document;
use libgqlexec_parser::ast::Field;
use libgqlexec_parser::ast::InputValue;
use libgqlexec_parser::ast::InputValueDefinition;
use libgqlexec_parser::ast::OperationKind;
use libgqlexec_parser::ast::Selection;
use libgqlexec_parser::ast::SelectionId;
use libgqlexec_parser::ast::SelectionSet;
use libgqlexec_parser::ast::Statement;
use libgqlexec_parser::ast::StatementId;
use libgqlexec_parser::ast::TypeDefinition;
use libgqlexec_parser::ast::TypeRef;
use libgqlexec_parser::GraphQLSourceSpan;
use std::collections::HashMap;
use std::collections::HashSet;

type Result<T> = std::result::Result<T, Vec<ValidationError>>;

/// Walks an operation's selections against the type graph in a
/// [`TypeCache`].
///
/// Each field is matched to its schema definition and its arguments are
/// coerced, with defaults synthesized for omitted ones. Fragment spreads are
/// expanded in place at the current response path; type-conditioned inline
/// fragments append their type name to it. `@include`/`@skip` are evaluated
/// against the bound variables and excluded selections are not visited.
///
/// Every leaf field registers its response path, the chain of type and field
/// names resolvers are looked up by. Aliases do not take part, so selecting
/// one field twice under different aliases is still a duplicate field error,
/// reported at the second occurrence.
///
/// ```
/// use libgqlexec_core::schema::TypeCache;
/// use libgqlexec_core::validation::FieldValidator;
/// use libgqlexec_parser::GraphQLParser;
///
/// let mut cache = TypeCache::new();
/// cache.insert_definitions(
///     GraphQLParser::new("type Query { allPersons(last: Int = 10): [Person!] } type Person { name: String! }")
///         .parse_schema_document()
///         .into_result()
///         .unwrap(),
/// );
/// let document = GraphQLParser::new("{ allPersons { name } }")
///     .parse_executable_document()
///     .into_result()
///     .unwrap();
/// let id = document.statement_ids().next().unwrap();
///
/// let validated = FieldValidator::new(&cache, &document).validate(id).unwrap();
/// let all_persons = validated.find_field("Query/allPersons").unwrap();
/// assert_eq!(all_persons.arguments["last"].to_string(), "10");
/// ```
pub struct FieldValidator<'a> {
    cache: &'a TypeCache,
    document: &'a Document,
    variables: Option<&'a IndexMap<String, InputValue>>,
    max_errors: usize,
    errors: Vec<ValidationError>,
    aborted: bool,
    leaf_spans: HashMap<ResponsePath, GraphQLSourceSpan>,
    leaf_paths: Vec<ResponsePath>,
    fragment_stack: Vec<String>,
    reported_cycles: HashSet<Vec<String>>,
}

impl<'a> FieldValidator<'a> {
    pub const DEFAULT_MAX_ERRORS: usize = 10;

    pub fn new(cache: &'a TypeCache, document: &'a Document) -> Self {
        Self {
            cache,
            document,
            variables: None,
            max_errors: Self::DEFAULT_MAX_ERRORS,
            errors: vec![],
            aborted: false,
            leaf_spans: HashMap::new(),
            leaf_paths: vec![],
            fragment_stack: vec![],
            reported_cycles: HashSet::new(),
        }
    }

    /// The operation's bound variable values. Without them, any variable
    /// reference is reported as undefined.
    pub fn with_variables(mut self, variables: &'a IndexMap<String, InputValue>) -> Self {
        self.variables = Some(variables);
        self
    }

    /// Stops validating once more than this many errors have been reported.
    pub fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors.max(1);
        self
    }

    pub fn validate(mut self, operation: StatementId) -> Result<ValidatedOperation> {
        let document = self.document;
        let Statement::Operation(op) = document.statement(operation) else {
            return Err(vec![ValidationError::NotAnOperation {
                span: document.statement(operation).span().clone(),
            }]);
        };

        let root_name = op.kind.root_type_name();
        match self.cache.get_by_name(root_name) {
            Some(TypeDefinition::Object(_)) => {},
            _ => {
                return Err(vec![ValidationError::UnknownType {
                    name: root_name.to_string(),
                    span: op.span.clone(),
                }]);
            },
        }

        let location = match op.kind {
            OperationKind::Query => DirectiveLocation::Query,
            OperationKind::Mutation => DirectiveLocation::Mutation,
            OperationKind::Subscription => DirectiveLocation::Subscription,
        };
        let included = self.check_directives(&op.directives, location);

        let root_path = ResponsePath::root(root_name);
        let selection_set = if included {
            self.validate_selection_set(&op.selection_set, root_name, &root_path)
        } else {
            ValidatedSelectionSet::default()
        };

        tracing::debug!(
            operation = op.name.as_deref().unwrap_or("<anonymous>"),
            leaf_fields = self.leaf_paths.len(),
            errors = self.errors.len(),
            aborted = self.aborted,
            "validated operation",
        );

        if !self.errors.is_empty() {
            return Err(self.errors);
        }
        Ok(ValidatedOperation {
            statement: operation,
            name: op.name.clone(),
            kind: op.kind,
            root_type: root_name.to_string(),
            variables: self.variables.cloned().unwrap_or_default(),
            selection_set,
            leaf_paths: self.leaf_paths,
        })
    }

    fn report(&mut self, error: ValidationError) {
        if self.aborted {
            return;
        }
        self.errors.push(error);
        if self.errors.len() > self.max_errors {
            tracing::debug!(limit = self.max_errors, "validation error ceiling reached");
            self.errors.push(ValidationError::TooManyErrors {
                limit: self.max_errors,
            });
            self.aborted = true;
        }
    }

    fn report_all(&mut self, errors: Vec<ValidationError>) {
        for error in errors {
            self.report(error);
        }
    }

    fn validate_selection_set(
        &mut self,
        set: &SelectionSet,
        parent_type: &str,
        path: &ResponsePath,
    ) -> ValidatedSelectionSet {
        let mut validated = ValidatedSelectionSet::default();
        for &id in &set.items {
            if self.aborted {
                break;
            }
            let document = self.document;
            match document.selection(id) {
                Selection::Field(field) => {
                    if !self.check_directives(&field.directives, DirectiveLocation::Field) {
                        continue;
                    }
                    if let Some(field) = self.validate_field(id, field, parent_type, path) {
                        validated.items.push(ValidatedSelection::Field(field));
                    }
                },

                Selection::FragmentSpread(spread) => {
                    if !self.check_directives(&spread.directives, DirectiveLocation::FragmentSpread) {
                        continue;
                    }
                    let Some(fragment) = document.fragment(&spread.fragment_name) else {
                        self.report(ValidationError::UnknownFragment {
                            name: spread.fragment_name.clone(),
                            span: spread.span.clone(),
                        });
                        continue;
                    };
                    if self.enters_cycle(&spread.fragment_name, &spread.span) {
                        continue;
                    }
                    if !self.check_directives(&fragment.directives, DirectiveLocation::FragmentDefinition) {
                        continue;
                    }
                    let condition = fragment.type_condition.name.as_str();
                    if !self.check_type_condition(condition, parent_type, &spread.span) {
                        continue;
                    }

                    self.fragment_stack.push(fragment.name.clone());
                    let body = self.validate_selection_set(&fragment.selection_set, condition, path);
                    self.fragment_stack.pop();

                    validated.items.push(ValidatedSelection::Fragment(ValidatedFragment {
                        selection: id,
                        type_condition: (condition != parent_type).then(|| condition.to_string()),
                        selection_set: body,
                    }));
                },

                Selection::InlineFragment(inline) => {
                    if !self.check_directives(&inline.directives, DirectiveLocation::InlineFragment) {
                        continue;
                    }
                    let body = match &inline.type_condition {
                        None => {
                            self.validate_selection_set(&inline.selection_set, parent_type, path)
                        },
                        Some(cond) => {
                            if !self.check_type_condition(&cond.name, parent_type, &inline.span) {
                                continue;
                            }
                            self.validate_selection_set(
                                &inline.selection_set,
                                &cond.name,
                                &path.type_condition(&cond.name),
                            )
                        },
                    };
                    validated.items.push(ValidatedSelection::Fragment(ValidatedFragment {
                        selection: id,
                        type_condition: inline
                            .type_condition
                            .as_ref()
                            .map(|cond| cond.name.clone())
                            .filter(|name| name != parent_type),
                        selection_set: body,
                    }));
                },
            }
        }
        validated
    }

    fn validate_field(
        &mut self,
        id: SelectionId,
        field: &Field,
        parent_type: &str,
        path: &ResponsePath,
    ) -> Option<ValidatedField> {
        let field_path = path.field(&field.name);

        if field.name == ValidatedField::TYPENAME {
            for arg in &field.arguments {
                self.report(ValidationError::UnknownArgument {
                    owner: ValidatedField::TYPENAME.to_string(),
                    argument: arg.name.clone(),
                    span: arg.span.clone(),
                });
            }
            if !field.selection_set.is_empty() {
                self.report(ValidationError::UnexpectedSelectionSet {
                    field: field.name.clone(),
                    type_name: "String".to_string(),
                    span: field.span.clone(),
                });
                return None;
            }
            self.register_leaf(field_path.clone(), &field.span);
            return Some(ValidatedField {
                selection: id,
                name: field.name.clone(),
                response_key: field.response_key().to_string(),
                path: field_path,
                parent_type: parent_type.to_string(),
                field_type: TypeRef::named("String").non_null(),
                arguments: IndexMap::new(),
                selection_set: ValidatedSelectionSet::default(),
                span: field.span.clone(),
            });
        }

        let cache = self.cache;
        let Some(field_def) = cache.get_by_name(parent_type).and_then(|def| def.field(&field.name)) else {
            self.report(ValidationError::UnknownField {
                type_name: parent_type.to_string(),
                field: field.name.clone(),
                span: field.span.clone(),
            });
            return None;
        };

        let owner = format!("{parent_type}.{}", field.name);
        let arguments = self.coerce_arguments(&owner, &field_def.arguments, &field.arguments, &field.span);

        let Some(type_def) = cache.lookup(&field_def.type_ref) else {
            self.report(ValidationError::UnknownType {
                name: field_def.type_ref.name.clone(),
                span: field.span.clone(),
            });
            return None;
        };

        let selection_set = if type_def.is_composite() {
            if field.selection_set.is_empty() {
                self.report(ValidationError::MissingSelectionSet {
                    field: field.name.clone(),
                    type_name: field_def.type_ref.to_string(),
                    span: field.span.clone(),
                });
                return None;
            }
            self.validate_selection_set(&field.selection_set, type_def.name(), &field_path)
        } else {
            if !field.selection_set.is_empty() {
                self.report(ValidationError::UnexpectedSelectionSet {
                    field: field.name.clone(),
                    type_name: field_def.type_ref.to_string(),
                    span: field.span.clone(),
                });
                return None;
            }
            self.register_leaf(field_path.clone(), &field.span);
            ValidatedSelectionSet::default()
        };

        Some(ValidatedField {
            selection: id,
            name: field.name.clone(),
            response_key: field.response_key().to_string(),
            path: field_path,
            parent_type: parent_type.to_string(),
            field_type: field_def.type_ref.clone(),
            arguments: arguments?,
            selection_set,
            span: field.span.clone(),
        })
    }

    fn register_leaf(&mut self, path: ResponsePath, span: &GraphQLSourceSpan) {
        if let Some(first) = self.leaf_spans.get(&path) {
            let first = first.clone();
            self.report(ValidationError::DuplicateField {
                path: path.to_string(),
                span: span.clone(),
                first,
            });
            return;
        }
        self.leaf_spans.insert(path.clone(), span.clone());
        self.leaf_paths.push(path);
    }

    /// Coerces supplied arguments and fills in omitted ones from their
    /// defaults, in declaration order. `None` if anything was reported.
    fn coerce_arguments(
        &mut self,
        owner: &str,
        definitions: &IndexMap<String, InputValueDefinition>,
        supplied: &[Argument],
        span: &GraphQLSourceSpan,
    ) -> Option<IndexMap<String, InputValue>> {
        let before = self.errors.len();
        for arg in supplied {
            if !definitions.contains_key(&arg.name) {
                self.report(ValidationError::UnknownArgument {
                    owner: owner.to_string(),
                    argument: arg.name.clone(),
                    span: arg.span.clone(),
                });
            }
        }

        let mut coercer = InputCoercer::new(self.cache);
        if let Some(variables) = self.variables {
            coercer = coercer.with_variables(variables);
        }

        let mut coerced = IndexMap::new();
        for (name, def) in definitions {
            let result = match supplied.iter().find(|arg| &arg.name == name) {
                Some(arg) => coercer.coerce(&arg.value, &def.type_ref, &arg.span),
                None => match &def.default_value {
                    Some(default) => InputCoercer::new(self.cache).coerce(default, &def.type_ref, span),
                    None => Err(vec![ValidationError::MissingArgument {
                        owner: owner.to_string(),
                        argument: name.clone(),
                        span: span.clone(),
                    }]),
                },
            };
            match result {
                Ok(value) => {
                    coerced.insert(name.clone(), value);
                },
                Err(errors) => self.report_all(errors),
            }
        }
        (self.errors.len() == before).then_some(coerced)
    }

    /// Validates a selection's directives and evaluates `@include`/`@skip`.
    /// Returns whether the selection is included.
    fn check_directives(&mut self, directives: &[Directive], location: DirectiveLocation) -> bool {
        let cache = self.cache;
        let mut included = true;
        for directive in directives {
            let Some(def) = cache.directive(&directive.name) else {
                self.report(ValidationError::UnknownDirective {
                    name: directive.name.clone(),
                    span: directive.span.clone(),
                });
                continue;
            };
            if !def.locations.contains(&location) {
                self.report(ValidationError::MisplacedDirective {
                    name: directive.name.clone(),
                    location,
                    span: directive.span.clone(),
                });
                continue;
            }
            let owner = format!("@{}", directive.name);
            let Some(arguments) =
                self.coerce_arguments(&owner, &def.arguments, &directive.arguments, &directive.span)
            else {
                continue;
            };
            let condition = arguments.get("if").and_then(InputValue::as_bool);
            match (directive.name.as_str(), condition) {
                ("include", Some(false)) | ("skip", Some(true)) => included = false,
                _ => {},
            }
        }
        included
    }

    /// Checks that a fragment typed `condition` can apply within
    /// `parent_type`.
    fn check_type_condition(
        &mut self,
        condition: &str,
        parent_type: &str,
        span: &GraphQLSourceSpan,
    ) -> bool {
        let cache = self.cache;
        let Some(cond_def) = cache.get_by_name(condition) else {
            self.report(ValidationError::UnknownType {
                name: condition.to_string(),
                span: span.clone(),
            });
            return false;
        };
        if !cond_def.is_composite() {
            self.report(ValidationError::ConditionNotComposite {
                condition: condition.to_string(),
                span: span.clone(),
            });
            return false;
        }
        if cache.is_compatible(parent_type, condition) {
            return true;
        }

        let error = match cache.get_by_name(parent_type) {
            Some(TypeDefinition::Interface(_)) => ValidationError::ConditionNotImplemented {
                condition: condition.to_string(),
                interface: parent_type.to_string(),
                span: span.clone(),
            },
            Some(TypeDefinition::Union(_)) => ValidationError::ConditionNotMember {
                condition: condition.to_string(),
                union_name: parent_type.to_string(),
                span: span.clone(),
            },
            _ => ValidationError::ConditionNeverApplies {
                condition: condition.to_string(),
                parent: parent_type.to_string(),
                span: span.clone(),
            },
        };
        self.report(error);
        false
    }

    /// Reports (once per distinct cycle) a spread of a fragment that is
    /// already being expanded.
    fn enters_cycle(&mut self, fragment_name: &str, span: &GraphQLSourceSpan) -> bool {
        let Some(start) = self.fragment_stack.iter().position(|name| name == fragment_name) else {
            return false;
        };
        let mut cycle: Vec<String> = self.fragment_stack[start..].to_vec();
        cycle.push(fragment_name.to_string());

        if self.reported_cycles.insert(normalize_cycle(&cycle)) {
            self.report(ValidationError::FragmentCycle {
                cycle,
                span: span.clone(),
            });
        }
        true
    }
}

/// Rotates `[B, C, A, B]` to start at its smallest name: `[A, B, C, A]`.
fn normalize_cycle(cycle: &[String]) -> Vec<String> {
    let Some((_, without_repeat)) = cycle.split_last() else {
        return vec![];
    };
    let min_idx = without_repeat
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.cmp(b))
        .map(|(idx, _)| idx)
        .unwrap_or(0);

    let mut normalized = Vec::with_capacity(cycle.len());
    normalized.extend_from_slice(&without_repeat[min_idx..]);
    normalized.extend_from_slice(&without_repeat[..min_idx]);
    if let Some(first) = normalized.first().cloned() {
        normalized.push(first);
    }
    normalized
}
