//! Implementation of the `clinic-forms batch` command.
//!
//! Every `.json`/`.toml` file under a directory is validated against one
//! entity. Files that cannot be read count as failures but do not stop the
//! run.

use std::io::IsTerminal as _;
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{info, instrument, warn};

use clinic_forms_adapters::{discover_forms, load_form};
use clinic_forms_core::domain::{Entity, ErrorMap};

use crate::{
    cli::BatchArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::{OutputManager, ValidationReport},
};

/// Outcome for one file.
#[derive(Debug)]
enum Outcome {
    Checked(ErrorMap),
    Unreadable(String),
}

impl Outcome {
    fn failed(&self) -> bool {
        match self {
            Self::Checked(errors) => errors.has_errors(),
            Self::Unreadable(_) => true,
        }
    }
}

#[derive(Debug, Serialize)]
struct UnreadableForm<'a> {
    file: &'a Path,
    error: &'a str,
}

#[derive(Debug, Serialize)]
struct BatchSummary<'a> {
    entity: Entity,
    total: usize,
    failed: usize,
    forms: Vec<ValidationReport<'a>>,
    unreadable: Vec<UnreadableForm<'a>>,
}

/// Execute the `clinic-forms batch` command.
#[instrument(skip_all, fields(dir = %args.dir.display()))]
pub fn execute(args: BatchArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let entity = resolve_entity(&args, &config)?;

    if !args.dir.is_dir() {
        return Err(CliError::InvalidInput {
            message: format!("'{}' is not a directory", args.dir.display()),
            source: None,
        });
    }

    let files = discover_forms(&args.dir)?;
    if files.is_empty() {
        output.warning(&format!("No form files found in {}", args.dir.display()))?;
        return Ok(());
    }

    let progress = progress_bar(&output, files.len() as u64);
    let results = validate_all(entity, files, progress);
    let failed = results.iter().filter(|(_, outcome)| outcome.failed()).count();
    info!(%entity, total = results.len(), failed, "Batch finished");

    if output.is_json() {
        output.json(&summary(entity, &results))?;
    } else {
        render(&output, &results)?;
    }

    if failed > 0 {
        return Err(CliError::BatchFailed {
            failed,
            total: results.len(),
        });
    }
    Ok(())
}

/// `--entity`, else `validation.default_entity`.
fn resolve_entity(args: &BatchArgs, config: &AppConfig) -> CliResult<Entity> {
    args.entity
        .map(Entity::from)
        .or_else(|| config.default_entity())
        .ok_or_else(|| CliError::InvalidInput {
            message: "no entity given; pass --entity or set validation.default_entity".into(),
            source: None,
        })
}

fn validate_all(
    entity: Entity,
    files: Vec<PathBuf>,
    progress: ProgressBar,
) -> Vec<(PathBuf, Outcome)> {
    let mut results = Vec::with_capacity(files.len());

    for file in files {
        progress.set_message(file.display().to_string());
        let outcome = match load_form(&file) {
            Ok(values) => Outcome::Checked(entity.validate(&values)),
            Err(e) => {
                warn!(file = %file.display(), error = %e, "Form could not be loaded");
                Outcome::Unreadable(e.to_string())
            }
        };
        results.push((file, outcome));
        progress.inc(1);
    }

    progress.finish_and_clear();
    results
}

/// A bar on an interactive terminal; hidden otherwise.
fn progress_bar(output: &OutputManager, len: u64) -> ProgressBar {
    if output.is_quiet() || output.is_json() || !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len);
    let style = ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {wide_msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
    bar.set_style(style);
    bar
}

fn summary(entity: Entity, results: &[(PathBuf, Outcome)]) -> BatchSummary<'_> {
    let mut forms = Vec::new();
    let mut unreadable = Vec::new();

    for (file, outcome) in results {
        match outcome {
            Outcome::Checked(errors) => {
                forms.push(ValidationReport::new(entity, errors).for_file(file))
            }
            Outcome::Unreadable(error) => unreadable.push(UnreadableForm { file, error }),
        }
    }

    BatchSummary {
        entity,
        total: results.len(),
        failed: results.iter().filter(|(_, o)| o.failed()).count(),
        forms,
        unreadable,
    }
}

fn render(output: &OutputManager, results: &[(PathBuf, Outcome)]) -> CliResult<()> {
    output.header(&format!("Validated {} form(s)", results.len()))?;

    for (file, outcome) in results {
        let name = file.display();
        match outcome {
            Outcome::Checked(errors) => match errors.first_error() {
                None => output.success(&format!("{name}"))?,
                Some(first) => output.error(&format!(
                    "{name}: {} field(s) failed, first: {first}",
                    errors.error_count()
                ))?,
            },
            Outcome::Unreadable(error) => output.error(&format!("{name}: {error}"))?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Entity as EntityArg;

    fn write(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn entity_falls_back_to_config() {
        let mut config = AppConfig::default();
        let args = BatchArgs {
            dir: PathBuf::from("."),
            entity: None,
        };
        assert!(resolve_entity(&args, &config).is_err());

        config.validation.default_entity = Some("centre".into());
        assert_eq!(resolve_entity(&args, &config).unwrap(), Entity::Center);

        let args = BatchArgs {
            dir: PathBuf::from("."),
            entity: Some(EntityArg::Doctor),
        };
        assert_eq!(resolve_entity(&args, &config).unwrap(), Entity::Doctor);
    }

    #[test]
    fn unreadable_files_count_as_failures() {
        let dir = tempfile::tempdir().unwrap();
        let good = write(
            dir.path(),
            "a.json",
            r#"{"name":"Asha Rao","phone":"9876543210","email":"a@b.com","username":"asha_01","password":"abcd1234"}"#,
        );
        let bad = write(dir.path(), "b.json", "{ not json");

        let results = validate_all(
            Entity::Receptionist,
            vec![good.clone(), bad.clone()],
            ProgressBar::hidden(),
        );

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, good);
        assert!(!results[0].1.failed());
        assert!(matches!(results[1].1, Outcome::Unreadable(_)));

        let summary = summary(Entity::Receptionist, &results);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.forms.len(), 1);
        assert_eq!(summary.unreadable.len(), 1);
    }
}
