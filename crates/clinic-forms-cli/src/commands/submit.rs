//! Implementation of the `clinic-forms submit` command.
//!
//! Dispatch sequence:
//! 1. Load the form and run the entity's validator
//! 2. Stop with the error map if any field failed
//! 3. Early-exit if `--dry-run`
//! 4. Confirm with the user unless `--yes` or `--quiet`
//! 5. Hand the form to [`SubmissionService`] backed by the outbox

use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, instrument};

use clinic_forms_adapters::{OutboxGateway, load_form};
use clinic_forms_core::{
    application::{ApplicationError, SubmissionService},
    domain::Entity,
};

use crate::{
    cli::{GlobalArgs, SubmitArgs},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::{OutputManager, ValidationReport},
};

#[derive(Debug, Serialize)]
struct SubmittedForm {
    id: String,
    entity: Entity,
    path: PathBuf,
}

/// Execute the `clinic-forms submit` command.
#[instrument(skip_all, fields(entity = %args.entity, file = %args.file.display()))]
pub fn execute(
    args: SubmitArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let entity: Entity = args.entity.into();
    let values = load_form(&args.file).with_cli_context(|| "loading form")?;

    let outbox_dir = args
        .outbox
        .clone()
        .unwrap_or_else(|| config.submission.outbox_dir.clone());
    let gateway = OutboxGateway::new(&outbox_dir);
    let service = SubmissionService::new(Box::new(gateway.clone()));

    // 1-2. Validate before asking anything.
    let errors = service.check(entity, &values);
    if errors.has_errors() {
        output.report(&ValidationReport::new(entity, &errors).for_file(&args.file))?;
        return Err(CliError::Core(
            ApplicationError::FormRejected { entity, errors }.into(),
        ));
    }

    // 3. Dry run: describe but do not write.
    if args.dry_run {
        if output.is_json() {
            output.report(&ValidationReport::new(entity, &errors).for_file(&args.file))?;
        } else {
            output.success(&format!("{entity} form is valid"))?;
            output.info(&format!(
                "Dry run: would queue it under {}",
                outbox_dir.join(entity.as_str()).display()
            ))?;
        }
        return Ok(());
    }

    // 4. Confirm.
    if !global.quiet && !args.yes && !confirm(entity, &outbox_dir)? {
        return Err(CliError::Cancelled);
    }

    // 5. Submit.
    let receipt = service.submit(entity, &values)?;
    let path = gateway.path_for(&receipt);
    debug!(id = %receipt.id, path = %path.display(), "Submission queued");

    if output.is_json() {
        output.json(&SubmittedForm {
            id: receipt.id.to_string(),
            entity,
            path,
        })?;
    } else {
        output.success(&format!("Submitted {entity} form {}", receipt.id))?;
        output.print(&format!("  {}", path.display()))?;
    }
    Ok(())
}

#[cfg(feature = "interactive")]
fn confirm(entity: Entity, outbox_dir: &std::path::Path) -> CliResult<bool> {
    use std::io::IsTerminal as _;

    if !std::io::stdin().is_terminal() {
        return Err(CliError::InvalidInput {
            message: "cannot ask for confirmation without a terminal; pass --yes".into(),
            source: None,
        });
    }

    dialoguer::Confirm::new()
        .with_prompt(format!(
            "Submit this {entity} form to {}?",
            outbox_dir.display()
        ))
        .default(true)
        .interact()
        .map_err(|e| CliError::InvalidInput {
            message: "failed to read confirmation".into(),
            source: Some(Box::new(e)),
        })
}

#[cfg(not(feature = "interactive"))]
fn confirm(_entity: Entity, _outbox_dir: &std::path::Path) -> CliResult<bool> {
    Err(CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}
