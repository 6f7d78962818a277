/// Server-side validation of an incoming submission
///
/// Mirrors the client rules but is evaluated independently of whatever the
/// client claims to have checked. All failures are collected.
use crate::error::ContactflowError;
use crate::models::FormFields;
use crate::utils::validation::validate_email_address;

use super::{NAME_PATTERN, PHONE_PATTERN};

pub fn validate_submission(
    fields: &FormFields,
    max_message_length: usize,
) -> Result<(), ContactflowError> {
    let mut errors = Vec::new();

    let name = fields.name.trim();
    let email = fields.email.trim();
    let phone = fields.phone.trim();
    let message = fields.message.trim();

    for (label, value) in [("Name", name), ("Email", email), ("Message", message)] {
        if value.is_empty() {
            errors.push(format!("{} is required", label));
        }
    }

    if !email.is_empty() && validate_email_address(email).is_err() {
        errors.push("Invalid email address".to_string());
    }

    if !name.is_empty() && !NAME_PATTERN.is_match(name) {
        errors.push("Name contains invalid characters".to_string());
    }

    if message.chars().count() > max_message_length {
        errors.push(format!(
            "Message is too long (max {} characters)",
            max_message_length
        ));
    }

    if !phone.is_empty() && !PHONE_PATTERN.is_match(phone) {
        errors.push("Invalid phone number format".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ContactflowError::Validation(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: &str, email: &str, message: &str) -> FormFields {
        FormFields {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
            ..Default::default()
        }
    }

    fn messages(result: Result<(), ContactflowError>) -> Vec<String> {
        match result {
            Err(ContactflowError::Validation(messages)) => messages,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_submission() {
        let f = fields("Jane Doe", "jane@example.com", "Hello, I need a website.");
        assert!(validate_submission(&f, 2000).is_ok());
    }

    #[test]
    fn test_all_required_missing() {
        let errors = messages(validate_submission(&FormFields::default(), 2000));
        assert_eq!(
            errors,
            vec!["Name is required", "Email is required", "Message is required"]
        );
    }

    #[test]
    fn test_errors_are_combined_in_order() {
        let f = FormFields {
            phone: "call me".to_string(),
            ..fields("J4ne", "jane@", "Hello")
        };
        let err = validate_submission(&f, 2000).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: Invalid email address, Name contains invalid characters, Invalid phone number format"
        );
    }

    #[test]
    fn test_lenient_addresses_accepted() {
        for email in ["o'brien@example.com", "jane+quotes@example.co.uk"] {
            let f = fields("Jane", email, "Hello, I need a website.");
            assert!(validate_submission(&f, 2000).is_ok(), "{email} should pass");
        }
    }

    #[test]
    fn test_phone_with_non_ascii_digits() {
        let f = FormFields {
            phone: "\u{663}\u{664}\u{665} \u{666}\u{667}\u{668}".to_string(),
            ..fields("Jane", "jane@example.com", "Hello, I need a website.")
        };
        assert_eq!(
            messages(validate_submission(&f, 2000)),
            vec!["Invalid phone number format"]
        );
    }

    #[test]
    fn test_message_cap() {
        let f = fields("Jane", "jane@example.com", &"x".repeat(2001));
        assert_eq!(
            messages(validate_submission(&f, 2000)),
            vec!["Message is too long (max 2000 characters)"]
        );

        let f = fields("Jane", "jane@example.com", &"x".repeat(2000));
        assert!(validate_submission(&f, 2000).is_ok());
    }
}
