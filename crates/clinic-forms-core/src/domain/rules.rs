//! Field validators.
//!
//! Every rule takes the text form of one raw value and returns `None` when
//! the value is acceptable or `Some(FieldError)` when it is not. Rules are
//! total: they never panic and never return `Result`.
//!
//! Values are trimmed before checking, except passwords. Absent, empty and
//! whitespace-only values count as blank: optional rules accept blank,
//! required rules reject it with `"<label> is required"`. Lengths are
//! counted in characters, not bytes.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::field_error::FieldError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const PASSWORD_MIN_LENGTH: usize = 8;

pub const USERNAME_MIN_LENGTH: usize = 3;
pub const USERNAME_MAX_LENGTH: usize = 20;

pub const NAME_MIN_LENGTH: usize = 2;

pub const AGE_MIN: i64 = 0;
pub const AGE_MAX: i64 = 150;

pub const CENTER_CODE_MIN_LENGTH: usize = 3;
pub const CENTER_CODE_MAX_LENGTH: usize = 10;

pub const EXPERIENCE_MAX_LENGTH: usize = 50;
pub const QUALIFICATION_MIN_LENGTH: usize = 2;
pub const BIO_MAX_LENGTH: usize = 500;

pub const SPECIALIZATION_MIN_LENGTH: usize = 2;
pub const SPECIALIZATION_MAX_LENGTH: usize = 50;

// Compiled once, reused forever.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

static PHONE_NOISE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9+]").expect("valid regex"));

static INTERNATIONAL_PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+[0-9]{7,15}$").expect("valid regex"));

static DOMESTIC_PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("valid regex"));

static PASSWORD_CHARSET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9@$!%*#?&]+$").expect("valid regex"));

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("valid regex"));

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L} '-]+$").expect("valid regex"));

static ALPHANUMERIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("valid regex"));

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Trimmed value, or `None` when blank.
fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

// ---------------------------------------------------------------------------
// Generic
// ---------------------------------------------------------------------------

/// Non-blank check; the error embeds `label`.
pub fn validate_required(value: Option<&str>, label: &str) -> Option<FieldError> {
    match present(value) {
        Some(_) => None,
        None => Some(FieldError::required(label)),
    }
}

// ---------------------------------------------------------------------------
// Contact details
// ---------------------------------------------------------------------------

/// Optional. `local@domain.tld` shape when present.
pub fn validate_email(value: Option<&str>) -> Option<FieldError> {
    let email = present(value)?;
    if EMAIL_RE.is_match(email) {
        None
    } else {
        Some(FieldError::invalid_shape(
            "Please enter a valid email address",
        ))
    }
}

/// Required. Formatting characters are ignored; the remaining text must be
/// `+` and 7-15 digits, or exactly 10 digits.
pub fn validate_phone(value: Option<&str>) -> Option<FieldError> {
    let Some(phone) = present(value) else {
        return Some(FieldError::required("Phone number"));
    };

    let cleaned = PHONE_NOISE_RE.replace_all(phone, "");
    let valid = if cleaned.starts_with('+') {
        INTERNATIONAL_PHONE_RE.is_match(&cleaned)
    } else {
        DOMESTIC_PHONE_RE.is_match(&cleaned)
    };

    if valid {
        None
    } else {
        Some(FieldError::invalid_shape(
            "Please enter a valid phone number (10 digits, or + followed by 7-15 digits)",
        ))
    }
}

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// Required. At least 8 characters with a letter and a digit, drawn from
/// letters, digits and `@$!%*#?&`. Not trimmed.
pub fn validate_password(value: Option<&str>) -> Option<FieldError> {
    let Some(password) = value.filter(|v| !v.trim().is_empty()) else {
        return Some(FieldError::required("Password"));
    };

    if char_len(password) < PASSWORD_MIN_LENGTH {
        return Some(FieldError::too_short(
            "Password must be at least 8 characters",
        ));
    }
    if !PASSWORD_CHARSET_RE.is_match(password) {
        return Some(FieldError::invalid_shape(
            "Password may only contain letters, numbers and @$!%*#?&",
        ));
    }
    let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !(has_letter && has_digit) {
        return Some(FieldError::invalid_shape(
            "Password must contain at least one letter and one number",
        ));
    }
    None
}

/// Required. 3-20 letters, digits or underscores.
pub fn validate_username(value: Option<&str>) -> Option<FieldError> {
    let Some(username) = present(value) else {
        return Some(FieldError::required("Username"));
    };

    let len = char_len(username);
    if len < USERNAME_MIN_LENGTH {
        return Some(FieldError::too_short(
            "Username must be between 3 and 20 characters",
        ));
    }
    if len > USERNAME_MAX_LENGTH {
        return Some(FieldError::too_long(
            "Username must be between 3 and 20 characters",
        ));
    }
    if !USERNAME_RE.is_match(username) {
        return Some(FieldError::invalid_shape(
            "Username may only contain letters, numbers and underscores",
        ));
    }
    None
}

// ---------------------------------------------------------------------------
// Personal details
// ---------------------------------------------------------------------------

/// Required. At least 2 characters; letters, spaces, hyphens, apostrophes.
pub fn validate_name(value: Option<&str>) -> Option<FieldError> {
    let Some(name) = present(value) else {
        return Some(FieldError::required("Name"));
    };

    if char_len(name) < NAME_MIN_LENGTH {
        return Some(FieldError::too_short("Name must be at least 2 characters"));
    }
    if !NAME_RE.is_match(name) {
        return Some(FieldError::invalid_shape(
            "Name may only contain letters, spaces, hyphens and apostrophes",
        ));
    }
    None
}

/// Required. Whole number in `[0, 150]`.
pub fn validate_age(value: Option<&str>) -> Option<FieldError> {
    let Some(age) = present(value) else {
        return Some(FieldError::required("Age"));
    };

    match age.parse::<i64>() {
        // Digits that overflow i64 are still a whole number, just far out of range.
        Err(_) if is_integer_text(age) => {
            Some(FieldError::out_of_range("Age must be between 0 and 150"))
        }
        Err(_) => Some(FieldError::invalid_shape("Age must be a whole number")),
        Ok(n) if !(AGE_MIN..=AGE_MAX).contains(&n) => {
            Some(FieldError::out_of_range("Age must be between 0 and 150"))
        }
        Ok(_) => None,
    }
}

/// Optional sign followed by at least one ASCII digit.
fn is_integer_text(text: &str) -> bool {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

// ---------------------------------------------------------------------------
// Professional details
// ---------------------------------------------------------------------------

/// Optional. Letters and digits only.
pub fn validate_kmc_number(value: Option<&str>) -> Option<FieldError> {
    let kmc = present(value)?;
    if ALPHANUMERIC_RE.is_match(kmc) {
        None
    } else {
        Some(FieldError::invalid_shape(
            "KMC number may only contain letters and numbers",
        ))
    }
}

/// Required. 3-10 letters or digits.
pub fn validate_center_code(value: Option<&str>) -> Option<FieldError> {
    let Some(code) = present(value) else {
        return Some(FieldError::required("Center code"));
    };

    let len = char_len(code);
    if len < CENTER_CODE_MIN_LENGTH {
        return Some(FieldError::too_short(
            "Center code must be between 3 and 10 characters",
        ));
    }
    if len > CENTER_CODE_MAX_LENGTH {
        return Some(FieldError::too_long(
            "Center code must be between 3 and 10 characters",
        ));
    }
    if !ALPHANUMERIC_RE.is_match(code) {
        return Some(FieldError::invalid_shape(
            "Center code may only contain letters and numbers",
        ));
    }
    None
}

/// Optional. At most 50 characters.
pub fn validate_experience(value: Option<&str>) -> Option<FieldError> {
    let experience = present(value)?;
    if char_len(experience) > EXPERIENCE_MAX_LENGTH {
        Some(FieldError::too_long(
            "Experience must be at most 50 characters",
        ))
    } else {
        None
    }
}

/// Optional. At least 2 characters.
pub fn validate_qualification(value: Option<&str>) -> Option<FieldError> {
    let qualification = present(value)?;
    if char_len(qualification) < QUALIFICATION_MIN_LENGTH {
        Some(FieldError::too_short(
            "Qualification must be at least 2 characters",
        ))
    } else {
        None
    }
}

/// Optional. At most 500 characters.
pub fn validate_bio(value: Option<&str>) -> Option<FieldError> {
    let bio = present(value)?;
    if char_len(bio) > BIO_MAX_LENGTH {
        Some(FieldError::too_long("Bio must be at most 500 characters"))
    } else {
        None
    }
}

/// Required. 2-50 characters.
pub fn validate_specialization(value: Option<&str>) -> Option<FieldError> {
    let Some(specialization) = present(value) else {
        return Some(FieldError::required("Specialization"));
    };

    let len = char_len(specialization);
    if len < SPECIALIZATION_MIN_LENGTH {
        Some(FieldError::too_short(
            "Specialization must be between 2 and 50 characters",
        ))
    } else if len > SPECIALIZATION_MAX_LENGTH {
        Some(FieldError::too_long(
            "Specialization must be between 2 and 50 characters",
        ))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::field_error::ErrorKind;

    fn kind(err: Option<FieldError>) -> Option<ErrorKind> {
        err.map(|e| e.kind())
    }

    fn s(value: &str) -> Option<&str> {
        Some(value)
    }

    fn digits(n: usize) -> String {
        "1234567890".chars().cycle().take(n).collect()
    }

    // ── optional rules ────────────────────────────────────────────────────

    #[test]
    fn optional_rules_accept_blank() {
        let optional: [fn(Option<&str>) -> Option<FieldError>; 5] = [
            validate_email,
            validate_kmc_number,
            validate_experience,
            validate_qualification,
            validate_bio,
        ];
        for rule in optional {
            assert_eq!(rule(None), None);
            assert_eq!(rule(Some("")), None);
            assert_eq!(rule(Some("   \t")), None);
        }
    }

    #[test]
    fn required_rules_reject_blank() {
        let required: [(fn(Option<&str>) -> Option<FieldError>, &str); 7] = [
            (validate_phone, "Phone number is required"),
            (validate_password, "Password is required"),
            (validate_username, "Username is required"),
            (validate_name, "Name is required"),
            (validate_age, "Age is required"),
            (validate_center_code, "Center code is required"),
            (validate_specialization, "Specialization is required"),
        ];
        for (rule, message) in required {
            for blank in [None, Some(""), Some("  ")] {
                let err = rule(blank).expect("blank must be rejected");
                assert_eq!(err.kind(), ErrorKind::Required);
                assert_eq!(err.message(), message);
            }
        }
    }

    #[test]
    fn validate_required_uses_label() {
        assert_eq!(
            validate_required(Some(" "), "Gender").map(|e| e.to_string()),
            Some("Gender is required".into())
        );
        assert_eq!(validate_required(Some("female"), "Gender"), None);
    }

    // ── email ─────────────────────────────────────────────────────────────

    #[test]
    fn email_shapes() {
        assert_eq!(validate_email(Some("a@b.com")), None);
        assert_eq!(validate_email(Some("  dr.rao@clinic.co.in ")), None);
        for bad in ["bad", "a@b", "a@@b.com", "a b@c.com", "@b.com", "a@.com"] {
            assert_eq!(
                kind(validate_email(Some(bad))),
                Some(ErrorKind::InvalidShape),
                "{bad}"
            );
        }
    }

    // ── phone ─────────────────────────────────────────────────────────────

    #[test]
    fn phone_domestic_needs_exactly_ten_digits() {
        assert_eq!(validate_phone(s(&digits(10))), None);
        assert!(validate_phone(s(&digits(9))).is_some());
        assert!(validate_phone(s(&digits(11))).is_some());
    }

    #[test]
    fn phone_international_needs_seven_to_fifteen_digits() {
        for n in 0..=20 {
            let phone = format!("+{}", digits(n));
            let ok = validate_phone(s(&phone)).is_none();
            assert_eq!(ok, (7..=15).contains(&n), "+ with {n} digits");
        }
    }

    #[test]
    fn phone_ignores_formatting_characters() {
        assert_eq!(validate_phone(Some("(987) 654-3210")), None);
        assert_eq!(validate_phone(Some("+91 98765 43210")), None);
        assert_eq!(
            kind(validate_phone(Some("98765+43210"))),
            Some(ErrorKind::InvalidShape)
        );
        assert_eq!(kind(validate_phone(Some("abc"))), Some(ErrorKind::InvalidShape));
    }

    // ── password ──────────────────────────────────────────────────────────

    #[test]
    fn password_thresholds() {
        assert_eq!(kind(validate_password(Some("abc1234"))), Some(ErrorKind::TooShort));
        assert_eq!(
            kind(validate_password(Some("abcdefgh"))),
            Some(ErrorKind::InvalidShape)
        );
        assert_eq!(
            kind(validate_password(Some("12345678"))),
            Some(ErrorKind::InvalidShape)
        );
        assert_eq!(validate_password(Some("a1234567")), None);
        assert_eq!(validate_password(Some("S3cure@#!")), None);
    }

    #[test]
    fn password_rejects_characters_outside_the_allowed_set() {
        let err = validate_password(Some("abcd 1234")).unwrap();
        assert_eq!(
            err.message(),
            "Password may only contain letters, numbers and @$!%*#?&"
        );
        assert!(validate_password(Some("abcd-1234")).is_some());
    }

    // ── username ──────────────────────────────────────────────────────────

    #[test]
    fn username_rules() {
        assert_eq!(validate_username(Some("asha_01")), None);
        assert_eq!(kind(validate_username(Some("ab"))), Some(ErrorKind::TooShort));
        assert_eq!(
            kind(validate_username(s(&"a".repeat(21)))),
            Some(ErrorKind::TooLong)
        );
        assert_eq!(validate_username(s(&"a".repeat(20))), None);
        assert_eq!(
            kind(validate_username(Some("asha.rao"))),
            Some(ErrorKind::InvalidShape)
        );
    }

    // ── name ──────────────────────────────────────────────────────────────

    #[test]
    fn name_rules() {
        assert_eq!(validate_name(Some("Jo")), None);
        assert_eq!(validate_name(Some("Mary-Ann O'Neil")), None);
        assert_eq!(validate_name(Some("Zoë Núñez")), None);
        assert_eq!(kind(validate_name(Some("J"))), Some(ErrorKind::TooShort));
        assert_eq!(kind(validate_name(Some("R2D2"))), Some(ErrorKind::InvalidShape));
        assert_eq!(kind(validate_name(Some("Jo\nDoe"))), Some(ErrorKind::InvalidShape));
        assert_eq!(kind(validate_name(Some("Jo\tDoe"))), Some(ErrorKind::InvalidShape));
    }

    // ── age ───────────────────────────────────────────────────────────────

    #[test]
    fn age_range() {
        assert_eq!(validate_age(Some("0")), None);
        assert_eq!(validate_age(Some("150")), None);
        assert_eq!(validate_age(Some(" 42 ")), None);
        assert_eq!(kind(validate_age(Some("151"))), Some(ErrorKind::OutOfRange));
        assert_eq!(kind(validate_age(Some("-1"))), Some(ErrorKind::OutOfRange));
        assert_eq!(kind(validate_age(Some("200"))), Some(ErrorKind::OutOfRange));
        assert_eq!(kind(validate_age(Some("4.5"))), Some(ErrorKind::InvalidShape));
        assert_eq!(kind(validate_age(Some("ten"))), Some(ErrorKind::InvalidShape));
    }

    #[test]
    fn age_beyond_i64_is_out_of_range() {
        for huge in ["99999999999999999999", "-99999999999999999999"] {
            assert_eq!(kind(validate_age(Some(huge))), Some(ErrorKind::OutOfRange), "{huge}");
        }
        assert_eq!(kind(validate_age(Some("-"))), Some(ErrorKind::InvalidShape));
        assert_eq!(kind(validate_age(Some("9".repeat(30).as_str()))), Some(ErrorKind::OutOfRange));
    }

    // ── professional ──────────────────────────────────────────────────────

    #[test]
    fn center_code_rules() {
        assert_eq!(kind(validate_center_code(Some("AB"))), Some(ErrorKind::TooShort));
        assert_eq!(validate_center_code(Some("AB12")), None);
        assert_eq!(validate_center_code(Some("ABCDE12345")), None);
        assert_eq!(
            kind(validate_center_code(Some("ABCDE123456"))),
            Some(ErrorKind::TooLong)
        );
        assert_eq!(
            kind(validate_center_code(Some("AB-12"))),
            Some(ErrorKind::InvalidShape)
        );
    }

    #[test]
    fn kmc_number_is_alphanumeric() {
        assert_eq!(validate_kmc_number(Some("KMC12345")), None);
        assert_eq!(
            kind(validate_kmc_number(Some("KMC/123"))),
            Some(ErrorKind::InvalidShape)
        );
    }

    #[test]
    fn length_bounded_text_rules() {
        assert_eq!(validate_experience(Some("5 years")), None);
        assert_eq!(validate_experience(s(&"x".repeat(50))), None);
        assert_eq!(
            kind(validate_experience(s(&"x".repeat(51)))),
            Some(ErrorKind::TooLong)
        );

        assert_eq!(validate_qualification(Some("MD")), None);
        assert_eq!(
            kind(validate_qualification(Some("M"))),
            Some(ErrorKind::TooShort)
        );

        assert_eq!(validate_bio(s(&"é".repeat(500))), None);
        assert_eq!(
            kind(validate_bio(s(&"x".repeat(501)))),
            Some(ErrorKind::TooLong)
        );

        assert_eq!(validate_specialization(Some("ENT")), None);
        assert_eq!(
            kind(validate_specialization(Some("E"))),
            Some(ErrorKind::TooShort)
        );
        assert_eq!(
            kind(validate_specialization(s(&"x".repeat(51)))),
            Some(ErrorKind::TooLong)
        );
    }
}
