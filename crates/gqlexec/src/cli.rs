use clap::CommandFactory;
use crate::commands;

/// Parse, validate and execute GraphQL operations against schema files on
/// disk, with resolver output supplied as value text.
#[derive(clap::Parser, Debug)]
#[command(name = "gqlexec", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) cmd: Option<commands::CommandEnum>,

    #[arg(
        action=clap::ArgAction::Count,
        global=true,
        help="Log schema fetches, validation and resolver timings to stderr. \
              Pass twice to also log type cache hits and each execution error.",
        long,
        short='v',
    )]
    pub verbose: u8,
}

impl Cli {
    /// The level asked for on the command line, if any `-v` was given.
    pub(crate) fn verbosity(&self) -> Option<tracing::Level> {
        match self.verbose {
            0 => None,
            1 => Some(tracing::Level::DEBUG),
            _ => Some(tracing::Level::TRACE),
        }
    }

    pub(crate) async fn run_default(self) -> anyhow::Result<()> {
        Self::command().print_help()?;
        println!(
            "\nTo run an operation: gqlexec execute --schema-dir <DIR> \
             --resolvers <FILE> <QUERY_FILE>",
        );
        Ok(())
    }
}
