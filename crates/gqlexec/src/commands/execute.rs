use crate::commands::parse_variables;
use crate::commands::SchemaArgs;
use crate::output_utils;
use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use anyhow::Context;
use indexmap::IndexMap;
use libgqlexec::execution::StaticResolver;
use libgqlexec::parser::ast::InputValue;
use libgqlexec::read_content;
use libgqlexec::schema::DirSchemaStore;
use libgqlexec::Session;
use serde::Deserialize;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

#[derive(Debug, clap::Args)]
pub(crate) struct ExecuteCmd {
    #[command(flatten)]
    schema: SchemaArgs,

    #[arg(
        help="Name of the operation to run when the document defines more \
             than one.",
        long,
        short='o',
    )]
    operation: Option<String>,

    #[arg(
        help="JSON object of variable values.",
        long,
    )]
    variables: Option<String>,

    #[arg(
        help="JSON file mapping response paths (e.g. `Query/allPersons`) to \
             the data each resolver returns. Strings are used as GraphQL \
             value text; any other JSON value is converted.",
        long,
        short='r',
    )]
    resolvers: Option<PathBuf>,

    #[arg(
        help="Print the response as JSON instead of GraphQL value text.",
        long,
    )]
    json: bool,

    #[arg(
        help="Cancel execution after this many milliseconds.",
        long,
    )]
    timeout_ms: Option<u64>,

    #[arg(
        help="Path to a file holding the query document.",
        name="QUERY_FILE",
    )]
    query_file: PathBuf,
}

#[inherent::inherent]
impl RunnableCommand for ExecuteCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        let (mut session, query, variables) = match self.setup() {
            Ok(setup) => setup,
            Err(err) => return err.into(),
        };

        let prepared = match session.prepare(&query, &variables) {
            Ok(prepared) => prepared,
            Err(errors) => return CommandResult::stderr(format_args!(
                "{} {} failed validation:\n{}",
                output_utils::RED_X,
                self.query_file.display(),
                output_utils::format_errors(&errors),
            )),
        };

        let cancellation = CancellationToken::new();
        if let Some(timeout_ms) = self.timeout_ms {
            let token = cancellation.clone();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(timeout_ms)).await;
                log::debug!("Cancelling execution after {timeout_ms}ms.");
                token.cancel();
            });
        }
        let response = session.execute(&prepared, cancellation).await;

        let rendered = if self.json {
            match serde_json::to_string_pretty(&response) {
                Ok(json) => json,
                Err(err) => return anyhow::Error::from(err).into(),
            }
        } else {
            response.to_string()
        };
        if response.is_ok() {
            CommandResult::stdout(format_args!("{rendered}"))
        } else {
            CommandResult::failed_stdout(format_args!("{rendered}"))
        }
    }
}

impl ExecuteCmd {
    fn setup(
        &self,
    ) -> anyhow::Result<(Session<DirSchemaStore>, String, IndexMap<String, InputValue>)> {
        let mut session = self.schema.open_session(self.operation.as_deref())?;
        if let Some(resolvers) = &self.resolvers {
            for (path, text) in load_resolvers(resolvers)? {
                log::debug!("Registering static resolver for `{path}`.");
                session.register_resolver(&path, StaticResolver::new(text));
            }
        }
        let query = read_content(&self.query_file)?;
        let variables = parse_variables(self.variables.as_deref())?;
        Ok((session, query, variables))
    }
}

fn load_resolvers(file_path: &Path) -> anyhow::Result<Vec<(String, String)>> {
    let source = read_content(file_path)?;
    let entries: IndexMap<String, serde_json::Value> = serde_json::from_str(&source)
        .with_context(|| format!(
            "{} must hold a JSON object of response paths",
            file_path.display(),
        ))?;

    entries
        .into_iter()
        .map(|(path, value)| -> anyhow::Result<(String, String)> {
            let text = match value {
                serde_json::Value::String(text) => text,
                other => InputValue::deserialize(other)
                    .with_context(|| format!("bad resolver data for `{path}`"))?
                    .to_string(),
            };
            Ok((path, text))
        })
        .collect()
}
