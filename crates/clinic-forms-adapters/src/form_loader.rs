//! Reads `FormValues` from JSON and TOML documents.
//!
//! A form document is a single flat object (JSON) or table (TOML) mapping
//! field names to text, numbers or booleans. JSON `null` is accepted and
//! treated as a missing value.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use clinic_forms_core::{
    application::ApplicationError,
    domain::FormValues,
    error::CoreResult,
};

/// Serialization format of a form document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormFormat {
    #[default]
    Json,
    Toml,
}

impl FormFormat {
    /// Format implied by a file extension, if any.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Toml => "toml",
        }
    }
}

impl fmt::Display for FormFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a form document held in memory. The error is the parser's message.
pub fn parse_form_str(text: &str, format: FormFormat) -> Result<FormValues, String> {
    match format {
        FormFormat::Json => {
            let value: serde_json::Value =
                serde_json::from_str(text).map_err(|e| e.to_string())?;
            FormValues::try_from(value).map_err(|e| e.to_string())
        }
        FormFormat::Toml => toml::from_str(text).map_err(|e| e.to_string()),
    }
}

/// Load one form file; the format follows the extension.
pub fn load_form(path: &Path) -> CoreResult<FormValues> {
    let format = FormFormat::from_path(path).ok_or_else(|| ApplicationError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    let text = std::fs::read_to_string(path).map_err(|e| ApplicationError::FormLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let values = parse_form_str(&text, format).map_err(|reason| ApplicationError::FormLoad {
        path: path.to_path_buf(),
        reason,
    })?;

    debug!(path = %path.display(), %format, fields = values.len(), "Form loaded");
    Ok(values)
}

/// Every `.json`/`.toml` file under `root`, sorted by path.
pub fn discover_forms(root: &Path) -> CoreResult<Vec<PathBuf>> {
    let mut forms = Vec::new();

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.map_err(|e| ApplicationError::FormLoad {
            path: e.path().map_or_else(|| root.to_path_buf(), Path::to_path_buf),
            reason: e.to_string(),
        })?;

        if !entry.file_type().is_file() {
            continue;
        }
        if FormFormat::from_path(entry.path()).is_some() {
            forms.push(entry.into_path());
        } else {
            warn!(path = %entry.path().display(), "Skipping file with unsupported extension");
        }
    }

    forms.sort();
    debug!(root = %root.display(), count = forms.len(), "Forms discovered");
    Ok(forms)
}
