//! Domain value objects: the form entities.
//!
//! `Entity` names a form and owns its fixed field set. The rules each field
//! is checked with live in `forms.rs`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{
    error::DomainError, error_map::ErrorMap, field_error::FieldError, form_values::FormValues,
    forms,
};

/// A form whose values the core knows how to validate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Entity {
    Patient,
    Doctor,
    Receptionist,
    Center,
    LabStaff,
}

impl Entity {
    pub const ALL: [Entity; 5] = [
        Self::Patient,
        Self::Doctor,
        Self::Receptionist,
        Self::Center,
        Self::LabStaff,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Patient => "patient",
            Self::Doctor => "doctor",
            Self::Receptionist => "receptionist",
            Self::Center => "center",
            Self::LabStaff => "lab-staff",
        }
    }

    /// Field keys the entity's validator always reports, in check order.
    pub const fn fields(&self) -> &'static [&'static str] {
        match self {
            Self::Patient => &[
                "name",
                "age",
                "gender",
                "contact",
                "email",
                "address",
                "assignedDoctor",
            ],
            Self::Doctor => &[
                "name",
                "phone",
                "email",
                "username",
                "password",
                "qualification",
                "designation",
                "kmcNumber",
                "experience",
                "bio",
            ],
            Self::Receptionist => &["name", "phone", "email", "username", "password"],
            Self::Center => &["name", "location", "address", "email", "phone", "code"],
            Self::LabStaff => &[
                "name",
                "phone",
                "email",
                "username",
                "password",
                "qualification",
                "designation",
            ],
        }
    }

    /// Validate a whole form. Delegates to the entity's validator in `forms`.
    pub fn validate(self, values: &FormValues) -> ErrorMap {
        forms::validate(self, values)
    }

    /// Validate a single field, exactly as the whole-form validator would.
    pub fn validate_field(
        self,
        field: &str,
        values: &FormValues,
    ) -> Result<Option<FieldError>, DomainError> {
        forms::validate_field(self, field, values).ok_or_else(|| DomainError::UnknownField {
            entity: self.to_string(),
            field: field.to_owned(),
        })
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Entity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "patient" => Ok(Self::Patient),
            "doctor" => Ok(Self::Doctor),
            "receptionist" => Ok(Self::Receptionist),
            "center" | "centre" => Ok(Self::Center),
            "lab-staff" | "lab_staff" | "labstaff" => Ok(Self::LabStaff),
            other => Err(DomainError::UnknownEntity(other.to_owned())),
        }
    }
}
