//! # clinic-forms
//!
//! Validate clinic record forms and submit the clean ones.
//!
//! `main` loads `.env`, parses arguments, installs logging, loads
//! [`AppConfig`] and hands the command to [`dispatch`]. Every failure after
//! argument parsing comes back as a [`CliError`] and leaves through
//! [`report_failure`].
//!
//! | Exit | Meaning                     |
//! |------|-----------------------------|
//! |  0   | Success, or a clean form    |
//! |  1   | Internal error              |
//! |  2   | Usage error or invalid form |
//! |  3   | Unknown field or file       |
//! |  4   | Configuration error         |

use std::io::IsTerminal as _;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, instrument};

use crate::{
    cli::{Cli, Commands},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // Usage errors exit 2 from inside clap; --help and --version exit 0.
    let cli = Cli::parse();

    if let Err(e) = init_logging(&cli.global) {
        eprintln!("clinic-forms: {e:#}");
        return ExitCode::FAILURE;
    }

    let verbose = cli.global.verbose > 0;
    let config = match AppConfig::load(cli.global.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            let err = CliError::ConfigError {
                message: format!("{e:#}"),
                source: None,
            };
            return report_failure(&err, verbose, cli.global.no_color);
        }
    };

    let no_color = cli.global.no_color || config.output.no_color;
    let output = OutputManager::new(&cli.global, &config);

    match dispatch(cli, config, output) {
        Ok(()) => {
            debug!("Command finished");
            ExitCode::SUCCESS
        }
        Err(e) => report_failure(&e, verbose, no_color),
    }
}

#[instrument(skip_all)]
fn dispatch(cli: Cli, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cli.command {
        Commands::Validate(args) => commands::validate::execute(args, output),
        Commands::Batch(args) => commands::batch::execute(args, config, output),
        Commands::Submit(args) => commands::submit::execute(args, cli.global, config, output),
        Commands::Fields(args) => commands::fields::execute(args, output),
        Commands::Init(args) => commands::init::execute(args, output),
        Commands::Completions(args) => commands::completions::execute(args),
        Commands::Config(cmd) => commands::config::execute(cmd, cli.global.config, config, output),
    }
}

/// Log the failure, print it to stderr and pick the exit code.
fn report_failure(err: &CliError, verbose: bool, no_color: bool) -> ExitCode {
    err.log();

    let message = if !no_color && std::io::stderr().is_terminal() {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{message}");

    ExitCode::from(err.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn argument_tree_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn version_comes_from_the_package() {
        assert_eq!(Cli::command().get_version(), Some(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn usage_errors_map_to_exit_2() {
        let err = Cli::try_parse_from(["clinic-forms", "validate", "nurse"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);

        let help = Cli::try_parse_from(["clinic-forms", "--help"]).unwrap_err();
        assert_eq!(help.exit_code(), 0);
    }

    #[test]
    fn config_failures_exit_4_with_message() {
        let err = CliError::ConfigError {
            message: "bad".into(),
            source: None,
        };
        assert_eq!(err.exit_code(), 4);
        assert!(err.format_plain(false).contains("bad"));
    }
}
