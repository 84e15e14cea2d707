mod execute;
mod print;
mod validate;

use crate::Cli;
use crate::CommandResult;
use anyhow::Context;
use execute::ExecuteCmd;
use indexmap::IndexMap;
use libgqlexec::parser::ast::InputValue;
use libgqlexec::schema::DirSchemaStore;
use libgqlexec::Session;
use libgqlexec::SessionConfig;
use print::PrintCmd;
use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;
use validate::ValidateCmd;
use walkdir::WalkDir;

#[derive(Debug, clap::Parser)]
#[command(name = "gqlexec")]
pub(crate) enum CommandEnum {
    /// Run one operation against a schema directory and static resolvers.
    Execute(Box<ExecuteCmd>),
    /// Parse a query document and print it back in canonical form.
    Print(Box<PrintCmd>),
    /// Prepare every operation found under the given paths.
    Validate(Box<ValidateCmd>),
}
impl CommandEnum {
    pub(crate) async fn run(self, cli: Cli) -> CommandResult {
        match self {
            Self::Execute(cmd) => cmd.run(cli).await,
            Self::Print(cmd) => cmd.run(cli).await,
            Self::Validate(cmd) => cmd.run(cli).await,
        }
    }
}

/// Where schema types come from and how a session reports errors.
#[derive(Debug, clap::Args)]
pub(crate) struct SchemaArgs {
    #[arg(
        help="Directory of `.graphqls` files (one subdirectory per \
             namespace) that types are fetched from.",
        long,
        short='s',
    )]
    schema_dir: PathBuf,

    #[arg(
        help="Namespace to look types up in before falling back to the \
             global definitions.",
        long,
    )]
    namespace: Option<String>,

    #[arg(
        help="Stop collecting errors once this many have been reported.",
        long,
    )]
    max_errors: Option<usize>,
}
impl SchemaArgs {
    pub(crate) fn open_session(
        &self,
        operation_name: Option<&str>,
    ) -> anyhow::Result<Session<DirSchemaStore>> {
        let store = DirSchemaStore::load(&self.schema_dir)
            .with_context(|| format!(
                "failed to load schema files from {}",
                self.schema_dir.display(),
            ))?;
        log::debug!(
            "Loaded {} schema files from {:#?}.",
            store.file_count(),
            self.schema_dir,
        );

        let mut config = SessionConfig::builder();
        if let Some(max_errors) = self.max_errors {
            config = config.max_errors(max_errors);
        }
        if let Some(namespace) = &self.namespace {
            config = config.namespace(namespace);
        }
        if let Some(name) = operation_name {
            config = config.operation_name(name);
        }
        Ok(Session::new(store, config.build()))
    }
}

/// Parses `--variables` JSON into named input values.
pub(crate) fn parse_variables(
    json: Option<&str>,
) -> anyhow::Result<IndexMap<String, InputValue>> {
    match json {
        None => Ok(IndexMap::new()),
        Some(json) => serde_json::from_str(json)
            .context("`--variables` must be a JSON object"),
    }
}

/// Finds every file at or under `paths` whose extension is in `exts`. A
/// single file argument is kept whatever its extension.
pub(crate) fn collect_files(
    paths: &[PathBuf],
    exts: &[String],
) -> anyhow::Result<Vec<PathBuf>> {
    let exts: HashSet<&str> = exts
        .iter()
        .map(|ext| ext.trim_start_matches('.'))
        .collect();

    let mut file_paths = vec![];
    for path in paths {
        for entry in WalkDir::new(path.as_path()).follow_links(true) {
            let entry = entry.with_context(|| format!(
                "failed to scan {}",
                path.display(),
            ))?;
            let path = entry.path();
            if !entry.file_type().is_file() {
                log::trace!("Skipping non-file: {path:#?}.");
                continue;
            }
            if has_extension(path, &exts) {
                log::trace!("Found file at {path:#?}.");
                file_paths.push(path.to_path_buf());
            }
        }
    }

    if file_paths.is_empty()
        && paths.len() == 1
        && let Some(first) = paths.first()
        && first.is_file() {
        log::warn!(
            "Proceeding with {first:#?} even though its extension is not \
            one of {}.",
            exts.iter()
                .map(|ext| format!("`.{ext}`"))
                .collect::<Vec<_>>()
                .join(", "),
        );
        file_paths.push(first.clone());
    }
    file_paths.sort();
    Ok(file_paths)
}

fn has_extension(path: &Path, exts: &HashSet<&str>) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy())
        .is_some_and(|ext| exts.contains(ext.as_ref()))
}
