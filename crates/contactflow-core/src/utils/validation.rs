/// Address validation for configured and submitted mailboxes
use crate::error::ContactflowError;
use lettre::Address;
use std::str::FromStr;

/// RFC address check used by the notification endpoint and for configured mailboxes
pub fn validate_email_address(email: &str) -> Result<(), ContactflowError> {
    Address::from_str(email).map(|_| ()).map_err(|_| {
        ContactflowError::Validation(vec!["Invalid email address".to_string()])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email_address("test@example.com").is_ok());
        assert!(validate_email_address("user+tag@example.co.uk").is_ok());
        assert!(validate_email_address("o'brien@example.com").is_ok());
        assert!(validate_email_address("invalid").is_err());
        assert!(validate_email_address("@example.com").is_err());
        assert!(validate_email_address("jane@").is_err());
        assert!(validate_email_address("two words@example.com").is_err());
    }
}
