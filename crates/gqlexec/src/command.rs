use crate::Cli;
use crate::CommandResult;

/// A `gqlexec` subcommand. Nothing is printed while it runs; `main` writes
/// the returned output and exits with its code.
pub(crate) trait RunnableCommand: std::fmt::Debug {
    async fn run(self, cli: Cli) -> CommandResult;
}
