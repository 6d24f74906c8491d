//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use clinic_forms_core::domain::Entity as CoreEntity;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "clinic-forms",
    bin_name = "clinic-forms",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Validate and submit clinic record forms",
    long_about = "clinic-forms checks patient, doctor, receptionist, center and \
                  lab-staff forms field by field and only lets clean forms through.",
    after_help = "EXAMPLES:\n\
        \x20 clinic-forms validate patient intake.json\n\
        \x20 clinic-forms validate doctor form.toml --field email\n\
        \x20 clinic-forms batch ./submissions --entity receptionist\n\
        \x20 clinic-forms submit center center.json --outbox ./outbox --yes\n\
        \x20 clinic-forms fields lab-staff",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Validate one form.
    #[command(
        visible_alias = "v",
        about = "Validate a form file (or stdin)",
        after_help = "EXAMPLES:\n\
            \x20 clinic-forms validate patient intake.json\n\
            \x20 cat form.json | clinic-forms validate receptionist\n\
            \x20 clinic-forms validate doctor form.toml --field password"
    )]
    Validate(ValidateArgs),

    /// Validate every form in a directory.
    #[command(
        about = "Validate a directory of forms",
        after_help = "EXAMPLES:\n\
            \x20 clinic-forms batch ./submissions --entity patient\n\
            \x20 clinic-forms batch ./staff --entity lab-staff --output-format json"
    )]
    Batch(BatchArgs),

    /// Validate a form and, if clean, queue it in the outbox.
    #[command(
        about = "Submit a form through the outbox",
        after_help = "EXAMPLES:\n\
            \x20 clinic-forms submit patient intake.json --outbox ./outbox\n\
            \x20 clinic-forms submit doctor dr-rao.toml --yes\n\
            \x20 clinic-forms submit center center.json --dry-run"
    )]
    Submit(SubmitArgs),

    /// List the fields each form checks.
    #[command(
        visible_alias = "ls",
        about = "List form fields",
        after_help = "EXAMPLES:\n\
            \x20 clinic-forms fields\n\
            \x20 clinic-forms fields doctor --format list"
    )]
    Fields(FieldsArgs),

    /// Initialise a configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 clinic-forms init           # default location\n\
            \x20 clinic-forms init --global  # global config\n\
            \x20 clinic-forms init --local   # .clinic-forms.toml in CWD"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 clinic-forms completions bash > ~/.local/share/bash-completion/completions/clinic-forms\n\
            \x20 clinic-forms completions zsh  > ~/.zfunc/_clinic-forms"
    )]
    Completions(CompletionsArgs),

    /// Manage the configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 clinic-forms config get submission.outbox_dir\n\
            \x20 clinic-forms config set submission.outbox_dir /var/spool/clinic\n\
            \x20 clinic-forms config list"
    )]
    Config(ConfigCommands),
}

// ── validate ──────────────────────────────────────────────────────────────────

/// Arguments for `clinic-forms validate`.
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Which form the values belong to.
    #[arg(value_enum, value_name = "ENTITY", help = "Form to validate against")]
    pub entity: Entity,

    /// Form file (`.json` / `.toml`); omit or pass `-` to read stdin.
    #[arg(value_name = "FILE", help = "Form file, or - for stdin")]
    pub file: Option<PathBuf>,

    /// Format of the document on stdin.
    #[arg(
        long = "stdin-format",
        value_enum,
        default_value = "json",
        help = "Format of the form read from stdin"
    )]
    pub stdin_format: StdinFormat,

    /// Validate a single field only.
    #[arg(
        short = 'f',
        long = "field",
        value_name = "NAME",
        help = "Check only this field"
    )]
    pub field: Option<String>,
}

// ── batch ─────────────────────────────────────────────────────────────────────

/// Arguments for `clinic-forms batch`.
#[derive(Debug, Args)]
pub struct BatchArgs {
    /// Directory searched recursively for `.json` / `.toml` forms.
    #[arg(value_name = "DIR", help = "Directory of form files")]
    pub dir: PathBuf,

    /// Which form every file holds (falls back to `validation.default_entity`).
    #[arg(
        short = 'e',
        long = "entity",
        value_enum,
        help = "Form every file is validated against"
    )]
    pub entity: Option<Entity>,
}

// ── submit ────────────────────────────────────────────────────────────────────

/// Arguments for `clinic-forms submit`.
#[derive(Debug, Args)]
pub struct SubmitArgs {
    #[arg(value_enum, value_name = "ENTITY", help = "Form to submit")]
    pub entity: Entity,

    #[arg(value_name = "FILE", help = "Form file (.json or .toml)")]
    pub file: PathBuf,

    /// Outbox directory (overrides `submission.outbox_dir`).
    #[arg(
        short = 'o',
        long = "outbox",
        value_name = "DIR",
        help = "Outbox directory"
    )]
    pub outbox: Option<PathBuf>,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long = "yes", help = "Submit without confirmation")]
    pub yes: bool,

    /// Validate and describe without writing anything.
    #[arg(long = "dry-run", help = "Validate only; do not write to the outbox")]
    pub dry_run: bool,
}

// ── fields ────────────────────────────────────────────────────────────────────

/// Arguments for `clinic-forms fields`.
#[derive(Debug, Args)]
pub struct FieldsArgs {
    /// Limit the listing to one form.
    #[arg(value_enum, value_name = "ENTITY", help = "Form to list")]
    pub entity: Option<Entity>,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: FieldsFormat,
}

/// Output format for the `fields` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FieldsFormat {
    /// Human-readable table.
    Table,
    /// One `entity.field` per line.
    List,
    /// JSON array of `{entity, fields}` objects.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `clinic-forms init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to the user config directory (the default).
    #[arg(
        long = "global",
        conflicts_with = "local",
        help = "Create global configuration (default)"
    )]
    pub global: bool,

    /// Write `.clinic-forms.toml` in the current directory instead of the
    /// user config directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `clinic-forms completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `clinic-forms config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `submission.outbox_dir`.
        key: String,
    },
    /// Set a configuration key in the active config file.
    Set {
        /// Dotted key path.
        key: String,
        /// New value.
        value: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── value enums ───────────────────────────────────────────────────────────────

/// Forms accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum Entity {
    Patient,
    Doctor,
    Receptionist,
    #[value(alias = "centre")]
    Center,
    #[value(alias = "lab_staff", alias = "labstaff")]
    LabStaff,
}

impl From<Entity> for CoreEntity {
    fn from(entity: Entity) -> Self {
        match entity {
            Entity::Patient => CoreEntity::Patient,
            Entity::Doctor => CoreEntity::Doctor,
            Entity::Receptionist => CoreEntity::Receptionist,
            Entity::Center => CoreEntity::Center,
            Entity::LabStaff => CoreEntity::LabStaff,
        }
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(CoreEntity::from(*self).as_str())
    }
}

/// Format of a form piped on stdin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum StdinFormat {
    #[default]
    Json,
    Toml,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn entity_display_matches_core() {
        assert_eq!(Entity::Patient.to_string(), "patient");
        assert_eq!(Entity::LabStaff.to_string(), "lab-staff");
        assert_eq!(CoreEntity::from(Entity::Center), CoreEntity::Center);
    }

    #[test]
    fn parse_validate_command() {
        let cli = Cli::parse_from(["clinic-forms", "validate", "patient", "intake.json"]);
        match cli.command {
            Commands::Validate(args) => {
                assert_eq!(args.entity, Entity::Patient);
                assert_eq!(args.file, Some(PathBuf::from("intake.json")));
                assert_eq!(args.stdin_format, StdinFormat::Json);
            }
            other => panic!("expected Validate command, got {other:?}"),
        }
    }

    #[test]
    fn lab_staff_aliases() {
        for alias in ["lab-staff", "lab_staff", "labstaff"] {
            let cli = Cli::parse_from(["clinic-forms", "fields", alias]);
            if let Commands::Fields(args) = cli.command {
                assert_eq!(args.entity, Some(Entity::LabStaff));
            } else {
                panic!("expected Fields command");
            }
        }
    }

    #[test]
    fn submit_requires_file() {
        let result = Cli::try_parse_from(["clinic-forms", "submit", "doctor"]);
        assert!(result.is_err());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["clinic-forms", "--quiet", "--verbose", "fields"]);
        assert!(result.is_err());
    }
}
