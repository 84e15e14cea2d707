use libgqlexec::GraphQLError;

pub(crate) const GREEN_CHECK: &str = "\u{2705}";
pub(crate) const RED_X: &str = "\u{274c}";

/// One `file:line:col: category: message` line per error.
pub(crate) fn format_errors(errors: &[GraphQLError]) -> String {
    errors
        .iter()
        .map(|err| format!("  {}", err.format_oneline()))
        .collect::<Vec<_>>()
        .join("\n")
}
