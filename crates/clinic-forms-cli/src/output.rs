//! Output management and formatting.

use std::io::{self, IsTerminal};
use std::path::Path;

use console::Term;
use owo_colors::OwoColorize;
use serde::Serialize;

use clinic_forms_core::domain::{Entity, ErrorMap};

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;
use crate::error::{CliError, CliResult};

/// Machine-readable result of validating one form.
#[derive(Debug, Serialize)]
pub struct ValidationReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<&'a Path>,
    pub entity: Entity,
    pub valid: bool,
    pub errors: &'a ErrorMap,
}

impl<'a> ValidationReport<'a> {
    pub fn new(entity: Entity, errors: &'a ErrorMap) -> Self {
        Self {
            file: None,
            entity,
            valid: !errors.has_errors(),
            errors,
        }
    }

    pub fn for_file(mut self, file: &'a Path) -> Self {
        self.file = Some(file);
        self
    }
}

/// Manages CLI output based on configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    ///
    /// `--output-format` beats `output.format`; `Auto` resolves to `Human` on a
    /// TTY and `Plain` otherwise.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let requested = match args.output_format {
            OutputFormat::Auto => OutputFormat::from_config(&config.output.format),
            explicit => explicit,
        };

        let resolved_format = if requested == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            requested
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}")
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Error indicator: `✗ <msg>`.  *Not* suppressed in quiet mode.
    pub fn error(&self, msg: &str) -> io::Result<()> {
        let line = if self.no_color {
            format!("\u{2717} {msg}")
        } else {
            format!("{} {}", "\u{2717}".red().bold(), msg.red())
        };
        self.term.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}")
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}")
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// Pretty JSON on stdout. Written even in quiet mode.
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> CliResult<()> {
        let text = serde_json::to_string_pretty(value).map_err(|e| CliError::InvalidInput {
            message: format!("Failed to serialise output: {e}"),
            source: Some(Box::new(e)),
        })?;
        self.term.write_line(&text)?;
        Ok(())
    }

    // ── Reports ───────────────────────────────────────────────────────────

    /// Render the outcome of one validation in the resolved format.
    ///
    /// Human/plain output lists every field in form order: `✓ field` when it
    /// passed, `✗ field: message` when it failed.
    pub fn report(&self, report: &ValidationReport<'_>) -> CliResult<()> {
        if self.resolved_format == OutputFormat::Json {
            return self.json(report);
        }

        let title = match report.file {
            Some(file) => format!("{} form ({})", report.entity, file.display()),
            None => format!("{} form", report.entity),
        };
        self.header(&title)?;

        for (field, error) in report.errors.iter() {
            match error {
                Some(error) => self.error(&format!("  {field}: {error}"))?,
                None => self.success(&format!("  {field}"))?,
            }
        }

        let failed = report.errors.error_count();
        if failed == 0 {
            self.success("Form is valid")?;
        } else {
            self.error(&format!(
                "{failed} of {} field(s) failed",
                report.errors.len()
            ))?;
        }
        Ok(())
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// `true` if ANSI colours are enabled.
    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    /// `true` if quiet mode suppresses most output.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }

    /// `true` when stdout carries JSON.
    pub fn is_json(&self) -> bool {
        self.resolved_format == OutputFormat::Json
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
