//! Canonical GraphQL text for documents and values.
//!
//! Output uses two-space indentation and a blank line between statements.
//! Parsing printed output yields an equivalent AST.

use crate::ast::Argument;
use crate::ast::Directive;
use crate::ast::Document;
use crate::ast::InputValue;
use crate::ast::Selection;
use crate::ast::SelectionSet;
use crate::ast::Statement;
use std::fmt;
use std::fmt::Write;

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, statement) in self.statements().iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            match statement {
                Statement::Operation(op) => {
                    f.write_str(op.kind.keyword())?;
                    if let Some(name) = &op.name {
                        write!(f, " {name}")?;
                    }
                    if !op.variables.is_empty() {
                        f.write_str("(")?;
                        for (j, var) in op.variables.iter().enumerate() {
                            if j > 0 {
                                f.write_str(", ")?;
                            }
                            write!(f, "${}: {}", var.name, var.type_ref)?;
                            if let Some(default) = &var.default_value {
                                write!(f, " = {default}")?;
                            }
                        }
                        f.write_str(")")?;
                    }
                    write_directives(f, &op.directives)?;
                },
                Statement::Fragment(frag) => {
                    write!(f, "fragment {} on {}", frag.name, frag.type_condition.name)?;
                    write_directives(f, &frag.directives)?;
                },
            }
            f.write_str(" ")?;
            self.write_selection_set(f, statement.selection_set(), 0)?;
            f.write_str("\n")?;
        }
        Ok(())
    }
}

impl Document {
    fn write_selection_set(
        &self,
        f: &mut fmt::Formatter<'_>,
        set: &SelectionSet,
        indent: usize,
    ) -> fmt::Result {
        f.write_str("{\n")?;
        let pad = "  ".repeat(indent + 1);
        for id in &set.items {
            f.write_str(&pad)?;
            match self.selection(*id) {
                Selection::Field(field) => {
                    if let Some(alias) = &field.alias {
                        write!(f, "{alias}: ")?;
                    }
                    f.write_str(&field.name)?;
                    write_arguments(f, &field.arguments)?;
                    write_directives(f, &field.directives)?;
                    if !field.selection_set.is_empty() {
                        f.write_str(" ")?;
                        self.write_selection_set(f, &field.selection_set, indent + 1)?;
                    }
                },
                Selection::FragmentSpread(spread) => {
                    write!(f, "...{}", spread.fragment_name)?;
                    write_directives(f, &spread.directives)?;
                },
                Selection::InlineFragment(inline) => {
                    f.write_str("...")?;
                    if let Some(cond) = &inline.type_condition {
                        write!(f, " on {}", cond.name)?;
                    }
                    write_directives(f, &inline.directives)?;
                    f.write_str(" ")?;
                    self.write_selection_set(f, &inline.selection_set, indent + 1)?;
                },
            }
            f.write_str("\n")?;
        }
        write!(f, "{}}}", "  ".repeat(indent))
    }
}

fn write_arguments(f: &mut fmt::Formatter<'_>, arguments: &[Argument]) -> fmt::Result {
    if arguments.is_empty() {
        return Ok(());
    }
    f.write_str("(")?;
    for (i, arg) in arguments.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}: {}", arg.name, arg.value)?;
    }
    f.write_str(")")
}

fn write_directives(f: &mut fmt::Formatter<'_>, directives: &[Directive]) -> fmt::Result {
    for directive in directives {
        write!(f, " @{}", directive.name)?;
        write_arguments(f, &directive.arguments)?;
    }
    Ok(())
}

impl fmt::Display for InputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputValue::Int(v) => write!(f, "{v}"),
            InputValue::Float(v) => write_float(f, *v),
            InputValue::String(s) => write_escaped_string(f, s),
            InputValue::RawString(s) => {
                f.write_str("\"\"\"")?;
                f.write_str(&s.replace("\"\"\"", "\\\"\"\""))?;
                f.write_str("\"\"\"")
            },
            InputValue::Boolean(b) => write!(f, "{b}"),
            InputValue::Null => f.write_str("null"),
            InputValue::Enum(name) => f.write_str(name),
            InputValue::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            },
            InputValue::Object(fields) => {
                if fields.is_empty() {
                    return f.write_str("{}");
                }
                f.write_str("{ ")?;
                for (i, (key, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str(" }")
            },
            InputValue::Variable(name) => write!(f, "${name}"),
        }
    }
}

/// Writes `v` so that it re-lexes as a float: integral values get a `.0`.
pub(crate) fn write_float(f: &mut impl Write, v: f64) -> fmt::Result {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 {
        write!(f, "{v:.1}")
    } else {
        write!(f, "{v:?}")
    }
}

pub(crate) fn write_escaped_string(f: &mut impl Write, s: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            '\u{0008}' => f.write_str("\\b")?,
            '\u{000C}' => f.write_str("\\f")?,
            c if (c as u32) < 0x20 => write!(f, "\\u{:04X}", c as u32)?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}
