//! Implementation of the `clinic-forms validate` command.
//!
//! Loads one form, runs the entity's validator (or a single field check) and
//! prints the error map. Exits 2 when any field failed.

use std::io::{self, IsTerminal, Read};
use std::path::Path;

use tracing::{debug, instrument};

use clinic_forms_adapters::{FormFormat, load_form, parse_form_str};
use clinic_forms_core::{
    domain::{Entity, ErrorMap, FormValues},
    error::CoreError,
};

use crate::{
    cli::{StdinFormat, ValidateArgs},
    error::{CliError, CliResult, IntoCli},
    output::{OutputManager, ValidationReport},
};

/// Execute the `clinic-forms validate` command.
#[instrument(skip_all, fields(entity = %args.entity))]
pub fn execute(args: ValidateArgs, output: OutputManager) -> CliResult<()> {
    let entity: Entity = args.entity.into();
    let values = read_form(args.file.as_deref(), args.stdin_format)?;

    let errors = match args.field.as_deref() {
        Some(field) => check_field(entity, field, &values)?,
        None => entity.validate(&values),
    };

    debug!(
        checked = errors.len(),
        failed = errors.error_count(),
        "Validation finished"
    );

    let mut report = ValidationReport::new(entity, &errors);
    if let Some(file) = args.file.as_deref().filter(|f| !is_stdin(f)) {
        report = report.for_file(file);
    }
    output.report(&report)?;

    if errors.has_errors() {
        return Err(CliError::FormInvalid {
            entity,
            failed: errors.error_count(),
        });
    }
    Ok(())
}

/// Run one field's rule; the result is a one-entry error map.
fn check_field(entity: Entity, field: &str, values: &FormValues) -> CliResult<ErrorMap> {
    let error = entity
        .validate_field(field, values)
        .map_err(CoreError::from)?;
    Ok(std::iter::once((field, error)).collect())
}

fn is_stdin(path: &Path) -> bool {
    path == Path::new("-")
}

/// Load the form from `file`, or from stdin when `file` is absent or `-`.
pub(crate) fn read_form(file: Option<&Path>, stdin_format: StdinFormat) -> CliResult<FormValues> {
    match file {
        Some(path) if !is_stdin(path) => load_form(path).with_cli_context(|| "loading form"),
        _ => {
            let stdin = io::stdin();
            if stdin.is_terminal() {
                return Err(CliError::InvalidInput {
                    message: "no form file given and stdin is a terminal".into(),
                    source: None,
                });
            }
            read_from(stdin.lock(), stdin_format)
        }
    }
}

fn read_from(mut reader: impl Read, format: StdinFormat) -> CliResult<FormValues> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .with_cli_context(|| "reading form from stdin")?;

    let format = match format {
        StdinFormat::Json => FormFormat::Json,
        StdinFormat::Toml => FormFormat::Toml,
    };
    parse_form_str(&text, format).map_err(|reason| CliError::InvalidInput {
        message: format!("stdin is not a valid {format} form: {reason}"),
        source: None,
    })
}
