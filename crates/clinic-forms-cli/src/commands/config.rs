//! `clinic-forms config`: read and write configuration values.

use std::path::PathBuf;

use crate::{
    cli::ConfigCommands,
    config::{AppConfig, KNOWN_KEYS, set_in_file},
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
///
/// `config_file` is the `--config` flag; it decides which file `set` edits
/// and what `path` prints.
pub fn execute(
    cmd: ConfigCommands,
    config_file: Option<PathBuf>,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.print(&format!("{key} = {value:?}"))?;
        }

        ConfigCommands::Set { key, value } => {
            let path = AppConfig::active_path(config_file.as_ref());
            set_in_file(&path, &key, &value).map_err(|e| CliError::ConfigError {
                message: format!("{e:#}"),
                source: None,
            })?;
            output.success(&format!("Set {key} = {value:?} in {}", path.display()))?;
        }

        ConfigCommands::List => {
            if output.is_json() {
                output.json(&config)?;
                return Ok(());
            }
            output.header("Current Configuration:")?;
            let serialised =
                toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                    message: format!("Failed to serialise config: {e}"),
                    source: Some(Box::new(e)),
                })?;
            output.print(&serialised)?;
        }

        ConfigCommands::Path => {
            output.print(
                &AppConfig::active_path(config_file.as_ref())
                    .display()
                    .to_string(),
            )?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    config.get(key).ok_or_else(|| CliError::ConfigError {
        message: format!(
            "Unknown config key: '{key}' (known keys: {})",
            KNOWN_KEYS.join(", ")
        ),
        source: None,
    })
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_known_key() {
        let cfg = AppConfig::default();
        assert_eq!(get_config_value(&cfg, "output.format").unwrap(), "auto");
    }

    #[test]
    fn get_unknown_key_is_error() {
        let cfg = AppConfig::default();
        let err = get_config_value(&cfg, "does.not.exist").unwrap_err();
        assert!(matches!(err, CliError::ConfigError { .. }));
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn get_default_entity_is_empty_when_unset() {
        let cfg = AppConfig::default();
        assert_eq!(
            get_config_value(&cfg, "validation.default_entity").unwrap(),
            ""
        );
    }
}
