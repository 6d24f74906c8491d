//! Entity validators.
//!
//! Each form is a fixed, ordered table of `(field, check)` pairs. Running a
//! table always yields one entry per field, so callers can rely on key
//! presence as well as value.
//!
//! `designation` is checked differently per form on purpose: optional with
//! the qualification rule for doctors, required for lab staff.

use tracing::trace;

use crate::domain::{
    error_map::ErrorMap,
    field_error::FieldError,
    form_values::FormValues,
    rules::{
        validate_age, validate_bio, validate_center_code, validate_email, validate_experience,
        validate_kmc_number, validate_name, validate_password, validate_phone,
        validate_qualification, validate_required, validate_username,
    },
    value_objects::Entity,
};

type Check = fn(&FormValues) -> Option<FieldError>;

struct FieldCheck {
    field: &'static str,
    check: Check,
}

/// Required check first, then the shape rule.
fn required_then(
    value: Option<&str>,
    label: &str,
    rule: fn(Option<&str>) -> Option<FieldError>,
) -> Option<FieldError> {
    validate_required(value, label).or_else(|| rule(value))
}

const PATIENT: &[FieldCheck] = &[
    FieldCheck {
        field: "name",
        check: |v| validate_name(v.text("name").as_deref()),
    },
    FieldCheck {
        field: "age",
        check: |v| validate_age(v.text("age").as_deref()),
    },
    FieldCheck {
        field: "gender",
        check: |v| validate_required(v.text("gender").as_deref(), "Gender"),
    },
    FieldCheck {
        field: "contact",
        check: |v| validate_phone(v.text("contact").as_deref()),
    },
    FieldCheck {
        field: "email",
        check: |v| validate_email(v.text("email").as_deref()),
    },
    FieldCheck {
        field: "address",
        check: |v| validate_required(v.text("address").as_deref(), "Address"),
    },
    FieldCheck {
        field: "assignedDoctor",
        check: |v| validate_required(v.text("assignedDoctor").as_deref(), "Assigned doctor"),
    },
];

const DOCTOR: &[FieldCheck] = &[
    FieldCheck {
        field: "name",
        check: |v| validate_name(v.text("name").as_deref()),
    },
    FieldCheck {
        field: "phone",
        check: |v| validate_phone(v.text("phone").as_deref()),
    },
    FieldCheck {
        field: "email",
        check: |v| required_then(v.text("email").as_deref(), "Email", validate_email),
    },
    FieldCheck {
        field: "username",
        check: |v| validate_username(v.text("username").as_deref()),
    },
    FieldCheck {
        field: "password",
        check: |v| validate_password(v.text("password").as_deref()),
    },
    FieldCheck {
        field: "qualification",
        check: |v| validate_qualification(v.text("qualification").as_deref()),
    },
    FieldCheck {
        field: "designation",
        check: |v| validate_qualification(v.text("designation").as_deref()),
    },
    FieldCheck {
        field: "kmcNumber",
        check: |v| validate_kmc_number(v.text("kmcNumber").as_deref()),
    },
    FieldCheck {
        field: "experience",
        check: |v| validate_experience(v.text("experience").as_deref()),
    },
    FieldCheck {
        field: "bio",
        check: |v| validate_bio(v.text("bio").as_deref()),
    },
];

const RECEPTIONIST: &[FieldCheck] = &[
    FieldCheck {
        field: "name",
        check: |v| validate_name(v.text("name").as_deref()),
    },
    FieldCheck {
        field: "phone",
        check: |v| validate_phone(v.text("phone").as_deref()),
    },
    FieldCheck {
        field: "email",
        check: |v| validate_email(v.text("email").as_deref()),
    },
    FieldCheck {
        field: "username",
        check: |v| validate_username(v.text("username").as_deref()),
    },
    FieldCheck {
        field: "password",
        check: |v| validate_password(v.text("password").as_deref()),
    },
];

const CENTER: &[FieldCheck] = &[
    FieldCheck {
        field: "name",
        check: |v| validate_name(v.text("name").as_deref()),
    },
    FieldCheck {
        field: "location",
        check: |v| validate_required(v.text("location").as_deref(), "Location"),
    },
    FieldCheck {
        field: "address",
        check: |v| validate_required(v.text("address").as_deref(), "Address"),
    },
    FieldCheck {
        field: "email",
        check: |v| validate_email(v.text("email").as_deref()),
    },
    FieldCheck {
        field: "phone",
        check: |v| validate_phone(v.text("phone").as_deref()),
    },
    FieldCheck {
        field: "code",
        check: |v| validate_center_code(v.text("code").as_deref()),
    },
];

const LAB_STAFF: &[FieldCheck] = &[
    FieldCheck {
        field: "name",
        check: |v| validate_name(v.text("name").as_deref()),
    },
    FieldCheck {
        field: "phone",
        check: |v| validate_phone(v.text("phone").as_deref()),
    },
    FieldCheck {
        field: "email",
        check: |v| validate_email(v.text("email").as_deref()),
    },
    FieldCheck {
        field: "username",
        check: |v| validate_username(v.text("username").as_deref()),
    },
    FieldCheck {
        field: "password",
        check: |v| validate_password(v.text("password").as_deref()),
    },
    FieldCheck {
        field: "qualification",
        check: |v| {
            required_then(
                v.text("qualification").as_deref(),
                "Qualification",
                validate_qualification,
            )
        },
    },
    FieldCheck {
        field: "designation",
        check: |v| validate_required(v.text("designation").as_deref(), "Designation"),
    },
];

fn checks(entity: Entity) -> &'static [FieldCheck] {
    match entity {
        Entity::Patient => PATIENT,
        Entity::Doctor => DOCTOR,
        Entity::Receptionist => RECEPTIONIST,
        Entity::Center => CENTER,
        Entity::LabStaff => LAB_STAFF,
    }
}

fn run(entity: Entity, values: &FormValues) -> ErrorMap {
    let table = checks(entity);
    let mut errors = ErrorMap::with_capacity(table.len());
    for FieldCheck { field, check } in table {
        errors.set(*field, check(values));
    }
    trace!(
        entity = %entity,
        checked = errors.len(),
        failed = errors.error_count(),
        "Form validated"
    );
    errors
}

/// Whole-form validation for any entity.
pub fn validate(entity: Entity, values: &FormValues) -> ErrorMap {
    run(entity, values)
}

/// One field's result, `None` if the entity does not check `field`.
pub fn validate_field(
    entity: Entity,
    field: &str,
    values: &FormValues,
) -> Option<Option<FieldError>> {
    checks(entity)
        .iter()
        .find(|c| c.field == field)
        .map(|c| (c.check)(values))
}

pub fn validate_patient_form(values: &FormValues) -> ErrorMap {
    run(Entity::Patient, values)
}

pub fn validate_doctor_form(values: &FormValues) -> ErrorMap {
    run(Entity::Doctor, values)
}

pub fn validate_receptionist_form(values: &FormValues) -> ErrorMap {
    run(Entity::Receptionist, values)
}

pub fn validate_center_form(values: &FormValues) -> ErrorMap {
    run(Entity::Center, values)
}

pub fn validate_lab_staff_form(values: &FormValues) -> ErrorMap {
    run(Entity::LabStaff, values)
}
