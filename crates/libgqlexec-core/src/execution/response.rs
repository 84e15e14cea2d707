use crate::GraphQLError;
use libgqlexec_parser::ast::InputValue;
use serde::ser::SerializeMap;
use serde::ser::SerializeSeq;
use serde::Serialize;
use serde::Serializer;

/// The result of running one operation.
///
/// `data` mirrors the operation's selections (response keys, in selection
/// order) and is `Null` when nothing could be produced at all. Fields whose
/// subtree failed are `null` and have a matching entry in `errors`.
///
/// `Display` renders the value-literal form used throughout this crate,
/// `{ data: { allPersons: [{ name: "Jack Smith", age: 53 }] } }`, while
/// `Serialize` produces the usual `{"data": ..., "errors": [...]}` JSON shape.
#[derive(Debug)]
pub struct Response {
    pub data: InputValue,
    pub errors: Vec<GraphQLError>,
}

impl Response {
    pub fn new(data: InputValue, errors: Vec<GraphQLError>) -> Self {
        Self { data, errors }
    }

    /// A response for an operation that never got to execute.
    pub fn from_errors(errors: Vec<GraphQLError>) -> Self {
        Self {
            data: InputValue::Null,
            errors,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// The value at a `/`-separated chain of response keys below `data`,
    /// e.g. `allPersons/0/name`. Numeric segments index into lists.
    pub fn get(&self, key_path: &str) -> Option<&InputValue> {
        key_path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .try_fold(&self.data, |value, segment| match value {
                InputValue::Object(fields) => fields.get(segment),
                InputValue::List(items) => segment.parse::<usize>().ok().and_then(|idx| items.get(idx)),
                _ => None,
            })
    }
}

impl std::fmt::Display for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{ data: {}", self.data)?;
        if !self.errors.is_empty() {
            f.write_str(", errors: [")?;
            for (i, err) in self.errors.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", InputValue::String(err.format_oneline()))?;
            }
            f.write_str("]")?;
        }
        f.write_str(" }")
    }
}

impl Serialize for Response {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("data", &JsonValue(&self.data))?;
        if !self.errors.is_empty() {
            let errors: Vec<JsonError<'_>> = self.errors.iter().map(JsonError).collect();
            map.serialize_entry("errors", &errors)?;
        }
        map.end()
    }
}

struct JsonValue<'a>(&'a InputValue);

impl Serialize for JsonValue<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            InputValue::Int(v) => serializer.serialize_i64(*v),
            InputValue::Float(v) => serializer.serialize_f64(*v),
            InputValue::String(s) | InputValue::RawString(s) | InputValue::Enum(s) => {
                serializer.serialize_str(s)
            },
            InputValue::Boolean(b) => serializer.serialize_bool(*b),
            InputValue::Null => serializer.serialize_unit(),
            InputValue::Variable(name) => serializer.serialize_str(&format!("${name}")),
            InputValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(&JsonValue(item))?;
                }
                seq.end()
            },
            InputValue::Object(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (key, value) in fields {
                    map.serialize_entry(key, &JsonValue(value))?;
                }
                map.end()
            },
        }
    }
}

struct JsonError<'a>(&'a GraphQLError);

#[derive(Serialize)]
struct JsonLocation {
    line: usize,
    column: usize,
}

impl Serialize for JsonError<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("message", &self.0.to_string())?;
        map.serialize_entry("category", self.0.category().as_str())?;
        if let Some(span) = self.0.span()
            && *span != libgqlexec_parser::GraphQLSourceSpan::builtin()
        {
            let (line, column) = span.start_inclusive.to_line_col();
            map.serialize_entry("locations", &[JsonLocation { line, column }])?;
        }
        if let GraphQLError::Execution(err) = self.0
            && let Some(path) = err.path()
        {
            map.serialize_entry("path", path)?;
        }
        map.end()
    }
}
