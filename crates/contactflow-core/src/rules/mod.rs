/// Contact form validation rules
///
/// The rule table is fixed: it is built once and never changes at runtime.
/// Each field is checked in the order required, minimum length, maximum
/// length, pattern, and the first failing check decides the message.
pub mod submission;

pub use submission::validate_submission;

use crate::constants::{MESSAGE_MAX_LENGTH, MESSAGE_MIN_LENGTH, NAME_MAX_LENGTH, NAME_MIN_LENGTH};
use crate::models::{Field, FormFields};
use regex::Regex;

lazy_static::lazy_static! {
    pub(crate) static ref NAME_PATTERN: Regex = Regex::new(r"^[a-zA-Z\s'-]+$").unwrap();
    static ref EMAIL_PATTERN: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    // ASCII digits only
    pub(crate) static ref PHONE_PATTERN: Regex = Regex::new(r"^[0-9\s\-()+.]+$").unwrap();

    static ref NAME_RULE: ValidationRule = ValidationRule {
        required: true,
        min_length: Some(NAME_MIN_LENGTH),
        max_length: Some(NAME_MAX_LENGTH),
        pattern: Some(&*NAME_PATTERN),
    };
    static ref EMAIL_RULE: ValidationRule = ValidationRule {
        required: true,
        pattern: Some(&*EMAIL_PATTERN),
        ..ValidationRule::OPTIONAL
    };
    static ref PHONE_RULE: ValidationRule = ValidationRule {
        pattern: Some(&*PHONE_PATTERN),
        ..ValidationRule::OPTIONAL
    };
}

static OPTIONAL_RULE: ValidationRule = ValidationRule::OPTIONAL;

static MESSAGE_RULE: ValidationRule = ValidationRule {
    required: true,
    min_length: Some(MESSAGE_MIN_LENGTH),
    max_length: Some(MESSAGE_MAX_LENGTH),
    pattern: None,
};

/// Per-field validation descriptor
#[derive(Debug, Clone, Copy)]
pub struct ValidationRule {
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<&'static Regex>,
}

impl ValidationRule {
    /// Rule that accepts anything, including an empty value
    pub const OPTIONAL: ValidationRule = ValidationRule {
        required: false,
        min_length: None,
        max_length: None,
        pattern: None,
    };

    /// Returns the first failing check's message, if any
    fn check(&self, field: Field, value: &str) -> Option<String> {
        if value.is_empty() {
            return self
                .required
                .then(|| format!("{} is required.", field.label()));
        }

        let length = value.chars().count();

        if let Some(min) = self.min_length.filter(|min| length < *min) {
            return Some(format!(
                "{} must be at least {} characters.",
                field.label(),
                min
            ));
        }

        if let Some(max) = self.max_length.filter(|max| length > *max) {
            return Some(format!(
                "{} must be no more than {} characters.",
                field.label(),
                max
            ));
        }

        match self.pattern {
            Some(pattern) if !pattern.is_match(value) => {
                Some(field.pattern_error_message().to_string())
            }
            _ => None,
        }
    }
}

/// Outcome of validating one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            error: None,
        }
    }

    pub fn invalid(message: String) -> Self {
        Self {
            valid: false,
            error: Some(message),
        }
    }
}

/// Rule table lookup
pub fn rule_for(field: Field) -> &'static ValidationRule {
    match field {
        Field::Name => &*NAME_RULE,
        Field::Email => &*EMAIL_RULE,
        Field::Phone => &*PHONE_RULE,
        Field::BusinessType | Field::Services => &OPTIONAL_RULE,
        Field::Message => &MESSAGE_RULE,
    }
}

/// Validates a single field value; surrounding whitespace is ignored
pub fn validate_field(field: Field, value: &str) -> ValidationResult {
    match rule_for(field).check(field, value.trim()) {
        Some(message) => ValidationResult::invalid(message),
        None => ValidationResult::ok(),
    }
}

/// Validates every field, in page order, without stopping at the first failure
pub fn validate_fields(fields: &FormFields) -> Vec<(Field, ValidationResult)> {
    Field::ALL
        .iter()
        .map(|&field| (field, validate_field(field, &fields.value(field))))
        .collect()
}
