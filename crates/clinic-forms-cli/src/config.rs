//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `CLINIC_FORMS__SECTION__KEY`
//! 3. Config file: `--config FILE`, else `./.clinic-forms.toml`, else the
//!    platform config dir
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use clinic_forms_core::domain::Entity;

/// Name of the per-directory config file written by `init --local`.
pub const LOCAL_CONFIG_FILE: &str = ".clinic-forms.toml";

/// Prefix for environment overrides.
const ENV_PREFIX: &str = "CLINIC_FORMS";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Output settings.
    pub output: OutputConfig,
    /// Validation defaults.
    pub validation: ValidationConfig,
    /// Where submissions go.
    pub submission: SubmissionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Entity used by `batch` when `--entity` is not given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_entity: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionConfig {
    pub outbox_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            outbox_dir: PathBuf::from("outbox"),
        }
    }
}

/// Keys accepted by `config get` / `config set`.
pub const KNOWN_KEYS: &[&str] = &[
    "output.no_color",
    "output.format",
    "validation.default_entity",
    "submission.outbox_dir",
];

impl AppConfig {
    /// Load configuration by layering defaults, the config file and the
    /// environment.
    ///
    /// A missing file is not an error; the defaults stand in for it.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let defaults = Config::try_from(&Self::default())
            .context("Failed to build default configuration")?;

        let path = Self::active_path(config_file);
        debug!(path = %path.display(), "Loading config file if present");

        let builder = Config::builder().add_source(defaults).add_source(
            File::from(path.as_path())
                .format(FileFormat::Toml)
                .required(false),
        );

        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?;

        let config: Self = config
            .try_deserialize()
            .context("Configuration has invalid values")?;

        if let Some(name) = &config.validation.default_entity {
            Entity::from_str(name)
                .with_context(|| format!("validation.default_entity: unknown entity '{name}'"))?;
        }

        Ok(config)
    }

    /// Path to the global configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.clinic-forms.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "clinic-forms", "clinic-forms")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// The file that `load` reads: the explicit path, else a local
    /// `.clinic-forms.toml` when one exists, else the global file.
    pub fn active_path(explicit: Option<&PathBuf>) -> PathBuf {
        if let Some(path) = explicit {
            return path.clone();
        }
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.is_file() {
            local
        } else {
            Self::config_path()
        }
    }

    /// `validation.default_entity`, parsed.
    pub fn default_entity(&self) -> Option<Entity> {
        self.validation
            .default_entity
            .as_deref()
            .and_then(|name| Entity::from_str(name).ok())
    }

    /// Current value of a dotted key, rendered as text.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "output.no_color" => Some(self.output.no_color.to_string()),
            "output.format" => Some(self.output.format.clone()),
            "validation.default_entity" => {
                Some(self.validation.default_entity.clone().unwrap_or_default())
            }
            "submission.outbox_dir" => Some(self.submission.outbox_dir.display().to_string()),
            _ => None,
        }
    }
}

/// Set `key` to `value` inside the TOML file at `path`, creating the file if
/// needed. Other keys in the file are left untouched.
pub fn set_in_file(path: &Path, key: &str, value: &str) -> anyhow::Result<()> {
    let item = typed_value(key, value)?;
    let (section, field) = key
        .split_once('.')
        .with_context(|| format!("Unknown config key: '{key}'"))?;

    let mut table: toml::Table = if path.is_file() {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))?
    } else {
        toml::Table::new()
    };

    let section = table
        .entry(section)
        .or_insert_with(|| toml::Value::Table(toml::Table::new()));
    let toml::Value::Table(section) = section else {
        anyhow::bail!("'{key}' is not inside a table in {}", path.display());
    };
    section.insert(field.to_owned(), item);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let text = toml::to_string_pretty(&table).context("Failed to serialise configuration")?;
    std::fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))?;

    debug!(path = %path.display(), key, "Config value written");
    Ok(())
}

/// Check `value` against the type `key` expects.
fn typed_value(key: &str, value: &str) -> anyhow::Result<toml::Value> {
    match key {
        "output.no_color" => {
            let flag: bool = value
                .parse()
                .with_context(|| format!("'{key}' expects true or false, got '{value}'"))?;
            Ok(toml::Value::Boolean(flag))
        }
        "output.format" => match value {
            "auto" | "human" | "plain" | "json" => Ok(toml::Value::String(value.into())),
            _ => anyhow::bail!("'{key}' expects auto, human, plain or json, got '{value}'"),
        },
        "validation.default_entity" => {
            let entity = Entity::from_str(value)?;
            Ok(toml::Value::String(entity.as_str().into()))
        }
        "submission.outbox_dir" => Ok(toml::Value::String(value.into())),
        _ => anyhow::bail!("Unknown config key: '{key}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = AppConfig::default();
        assert!(!cfg.output.no_color);
        assert_eq!(cfg.output.format, "auto");
        assert_eq!(cfg.submission.outbox_dir, PathBuf::from("outbox"));
        assert_eq!(cfg.default_entity(), None);
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[validation]\ndefault_entity = \"doctor\"\n\n[submission]\noutbox_dir = \"/srv/outbox\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.default_entity(), Some(Entity::Doctor));
        assert_eq!(cfg.submission.outbox_dir, PathBuf::from("/srv/outbox"));
        assert_eq!(cfg.output.format, "auto");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.submission.outbox_dir, PathBuf::from("outbox"));
    }

    #[test]
    fn mistyped_value_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[output]\nno_color = \"maybe\"\n").unwrap();
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn unknown_default_entity_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[validation]\ndefault_entity = \"nurse\"\n").unwrap();
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn get_known_and_unknown_keys() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.get("output.no_color").as_deref(), Some("false"));
        assert_eq!(cfg.get("submission.outbox_dir").as_deref(), Some("outbox"));
        assert_eq!(cfg.get("does.not.exist"), None);
        for key in KNOWN_KEYS {
            assert!(cfg.get(key).is_some(), "{key}");
        }
    }

    #[test]
    fn set_in_file_round_trips_through_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.toml");

        set_in_file(&path, "validation.default_entity", "lab_staff").unwrap();
        set_in_file(&path, "output.no_color", "true").unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.default_entity(), Some(Entity::LabStaff));
        assert!(cfg.output.no_color);
    }

    #[test]
    fn set_in_file_checks_types() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert!(set_in_file(&path, "output.no_color", "maybe").is_err());
        assert!(set_in_file(&path, "output.format", "yaml").is_err());
        assert!(set_in_file(&path, "nope", "x").is_err());
        assert!(!path.exists());
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
