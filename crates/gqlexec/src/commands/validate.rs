use crate::commands::collect_files;
use crate::commands::parse_variables;
use crate::commands::SchemaArgs;
use crate::output_utils;
use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use libgqlexec::parser::GraphQLParser;
use libgqlexec::read_content;
use std::path::PathBuf;

#[derive(Debug, clap::Args)]
pub(crate) struct ValidateCmd {
    #[command(flatten)]
    schema: SchemaArgs,

    #[arg(
        default_values_t=[
            "graphql".to_string(),
            "gql".to_string(),
        ],
        help="Set of file extensions to filter to when searching for query \
             files within a directory.",
        long,
        value_delimiter = ',',
    )]
    query_file_exts: Vec<String>,

    #[arg(
        help="JSON object of variable values supplied to every operation.",
        long,
    )]
    variables: Option<String>,

    #[arg(
        help="Paths to one or more query files or directories containing \
             query files which need to be validated.",
        name="FILE_OR_DIR_PATHS",
        required=true,
    )]
    file_or_dir_paths: Vec<PathBuf>,
}

#[inherent::inherent]
impl RunnableCommand for ValidateCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        let setup = collect_files(&self.file_or_dir_paths, &self.query_file_exts)
            .and_then(|files| Ok((files, self.schema.open_session(None)?)))
            .and_then(|(files, session)| {
                Ok((files, session, parse_variables(self.variables.as_deref())?))
            });
        let (file_paths, mut session, variables) = match setup {
            Ok(setup) => setup,
            Err(err) => return err.into(),
        };
        log::debug!("Found {} query files to be validated.", file_paths.len());

        let mut failures: Vec<String> = vec![];
        let mut num_operations = 0;
        for file_path in &file_paths {
            let source = match read_content(file_path) {
                Ok(source) => source,
                Err(err) => {
                    failures.push(format!("{err}"));
                    continue;
                },
            };
            let names: Vec<Option<String>> =
                match GraphQLParser::new(&source).parse_executable_document().into_result() {
                    Ok(document) => document
                        .operations()
                        .map(|(_, op)| op.name.clone())
                        .collect(),
                    Err(errors) => {
                        failures.push(format!(
                            "{}:\n{}",
                            file_path.display(),
                            errors.iter()
                                .map(|err| format!("  {}", err.format_oneline()))
                                .collect::<Vec<_>>()
                                .join("\n"),
                        ));
                        continue;
                    },
                };

            for name in names {
                num_operations += 1;
                session.select_operation(name.as_deref());
                if let Err(errors) = session.prepare(&source, &variables) {
                    failures.push(format!(
                        "{} ({}):\n{}",
                        file_path.display(),
                        name.as_deref().unwrap_or("<anonymous>"),
                        output_utils::format_errors(&errors),
                    ));
                }
            }
        }

        if !failures.is_empty() {
            return CommandResult::stderr(format_args!(
                "{} {} of {num_operations} operations failed validation:\n{}",
                output_utils::RED_X,
                failures.len(),
                failures.join("\n"),
            ));
        }

        CommandResult::stdout(format_args!(
            concat!(
                "{} All operations validated successfully:\n",
                "  * Analyzed {} files.\n",
                "  * Validated {} operations.\n",
                "  * Resolved {} schema types.",
            ),
            output_utils::GREEN_CHECK,
            file_paths.len(),
            num_operations,
            session.type_cache().len(),
        ))
    }
}
