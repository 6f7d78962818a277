/// Logging utilities for PII redaction
///
/// Contact submissions carry names, addresses and free text. Nothing from a
/// submission should reach the logs without passing through one of these.
use regex::Regex;

// Email redaction regex
lazy_static::lazy_static! {
    static ref EMAIL_PATTERN: Regex =
        Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b").unwrap();
}

/// Redacts email addresses from text, preserving domain for debugging
///
/// # Examples
/// ```
/// use contactflow_core::utils::logging::redact_email;
///
/// assert_eq!(redact_email("user@example.com"), "***@example.com");
/// assert_eq!(redact_email("Contact: test@acme.com for help"), "Contact: ***@acme.com for help");
/// ```
pub fn redact_email(text: &str) -> String {
    EMAIL_PATTERN
        .replace_all(text, |caps: &regex::Captures| {
            let email = &caps[0];
            if let Some(at_pos) = email.find('@') {
                format!("***{}", &email[at_pos..])
            } else {
                "***@***".to_string()
            }
        })
        .to_string()
}

/// Redacts a person's name down to its initial
///
/// # Examples
/// ```
/// use contactflow_core::utils::logging::redact_name;
///
/// assert_eq!(redact_name("Jane Doe"), "J.");
/// assert_eq!(redact_name(""), "");
/// ```
pub fn redact_name(name: &str) -> String {
    match name.trim().chars().next() {
        Some(initial) => format!("{}.", initial),
        None => String::new(),
    }
}

/// Redacts message body for logging (shows length only)
pub fn redact_body(body: &str) -> String {
    format!("[{} chars]", body.chars().count())
}

/// Creates safe log context for a contact submission
///
/// Returns a structured map that can be used in tracing fields
pub fn safe_submission_context(name: &str, email: &str, message: &str) -> serde_json::Value {
    serde_json::json!({
        "name": redact_name(name),
        "email_domain": extract_domain(email),
        "message": redact_body(message),
    })
}

/// Extracts domain from email address for safe logging
fn extract_domain(email: &str) -> String {
    email.split('@').nth(1).unwrap_or("unknown").to_string()
}
