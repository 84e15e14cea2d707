use crate::output_utils;
use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use libgqlexec::parser::GraphQLParser;
use libgqlexec::read_content;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, clap::Args)]
pub(crate) struct PrintCmd {
    #[arg(
        help="Path to a file holding an executable GraphQL document.",
        name="QUERY_FILE",
    )]
    query_file: PathBuf,
}

#[inherent::inherent]
impl RunnableCommand for PrintCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        let source = match read_content(&self.query_file) {
            Ok(source) => source,
            Err(err) => return anyhow::Error::from(err).into(),
        };

        let file_path = self.query_file.display().to_string();
        let result = GraphQLParser::with_file_path(&source, Arc::new(self.query_file))
            .parse_executable_document()
            .into_result();
        match result {
            Ok(document) => CommandResult::stdout(format_args!("{document}")),
            Err(errors) => CommandResult::stderr(format_args!(
                "{} Failed to parse {file_path}:\n{}",
                output_utils::RED_X,
                errors.iter()
                    .map(|err| format!("  {}", err.format_oneline()))
                    .collect::<Vec<_>>()
                    .join("\n"),
            )),
        }
    }
}
