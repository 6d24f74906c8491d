//! Diagnostics for `clinic-forms`.
//!
//! Validation reports go to stdout; everything logged here goes to stderr.
//! The level comes from `-v`/`--quiet` unless `RUST_LOG` is set:
//!
//! | Flag(s)   | Level |
//! |-----------|-------|
//! | (none)    | warn  |
//! | `-v`      | info  |
//! | `-vv`     | debug |
//! | `-vvv`    | trace |
//! | `--quiet` | error |
//!
//! With `--output-format json` the log lines are JSON objects too.

use std::io::IsTerminal as _;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{GlobalArgs, OutputFormat};

/// Crates whose events pass the verbosity filter.
const LOG_TARGETS: [&str; 3] = ["clinic_forms", "clinic_forms_core", "clinic_forms_adapters"];

/// Install the stderr subscriber. Call once, before the first event.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(derive_level(args))));

    let layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let registry = tracing_subscriber::registry().with(filter);
    let installed = if args.output_format == OutputFormat::Json {
        registry.with(layer.json().with_ansi(false)).try_init()
    } else {
        let ansi = !args.no_color && std::io::stderr().is_terminal();
        registry.with(layer.with_ansi(ansi)).try_init()
    };

    installed.map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {e}"))
}

fn filter_directives(level: &str) -> String {
    LOG_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

fn derive_level(args: &GlobalArgs) -> &'static str {
    match (args.quiet, args.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    }
}
