mod cli;
mod command;
mod command_result;
mod commands;
mod output_utils;

use clap::Parser;
pub(crate) use cli::Cli;
pub(crate) use command::RunnableCommand;
pub(crate) use command_result::CommandResult;
use std::process::ExitCode;
use std::str::FromStr;

const DEFAULT_LOG_LEVEL: tracing::Level = tracing::Level::WARN;

#[tokio::main(flavor = "multi_thread", worker_threads = 10)]
async fn main() -> ExitCode {
    let mut cli = Cli::parse();
    setup_logger(&cli);

    let Some(command) = cli.cmd.take() else {
        return match cli.run_default().await {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("{err:#}");
                ExitCode::FAILURE
            },
        };
    };

    tracing::debug!(?command, "running command");
    let result = command.run(cli).await;
    if let Some(stdout) = result.stdout {
        println!("{stdout}");
    }
    if let Some(stderr) = result.stderr {
        eprintln!("{stderr}");
    }
    result.exit_code
}

/// `-v`/`-vv` win over `GQLEXEC_LOG`, which takes any `tracing` level name.
/// Logs go to stderr so `execute --json` output stays parseable.
fn setup_logger(cli: &Cli) {
    let mut invalid_env_level = None;
    let log_level = cli.verbosity().unwrap_or_else(|| {
        match std::env::var("GQLEXEC_LOG") {
            Ok(value) => tracing::Level::from_str(value.trim()).unwrap_or_else(|_| {
                invalid_env_level = Some(value);
                DEFAULT_LOG_LEVEL
            }),
            Err(_) => DEFAULT_LOG_LEVEL,
        }
    });

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_target(log_level >= tracing::Level::DEBUG)
        .init();
    log::trace!("Logging at `{log_level}`.");

    if let Some(value) = invalid_env_level {
        log::warn!("Ignoring invalid `GQLEXEC_LOG` value `{value}`.");
    }
}
