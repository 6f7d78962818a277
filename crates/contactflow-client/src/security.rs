/// Client-side security helpers: session store, form token, input cleanup
use crate::error::ClientError;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use contactflow_core::constants::{
    CSRF_TOKEN_KEY, LOG_TARGET_SECURITY, SUBMISSION_RATE_LIMIT, SUBMISSION_RATE_WINDOW_SECS,
};
use rand::Rng;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::{error, warn};

const BASE36_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Per-session key/value storage
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key.to_string(), value.to_string());
    }
}

/// Sliding-window submission limiter keyed by form
#[derive(Debug)]
pub struct SubmissionRateLimiter {
    limit: usize,
    window: Duration,
    submissions: Mutex<HashMap<String, Vec<Instant>>>,
}

impl Default for SubmissionRateLimiter {
    fn default() -> Self {
        Self::new(
            SUBMISSION_RATE_LIMIT,
            Duration::from_secs(SUBMISSION_RATE_WINDOW_SECS),
        )
    }
}

impl SubmissionRateLimiter {
    pub fn new(limit: usize, window: Duration) -> Self {
        Self {
            limit,
            window,
            submissions: Mutex::new(HashMap::new()),
        }
    }

    /// Records an attempt for `key`, or fails once `limit` attempts fall inside the window
    pub fn check_rate_limit(&self, key: &str) -> Result<(), ClientError> {
        let now = Instant::now();
        let mut submissions = self
            .submissions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let timestamps = submissions.entry(key.to_string()).or_default();
        timestamps.retain(|at| now.duration_since(*at) < self.window);

        if timestamps.len() >= self.limit {
            warn!(
                target: LOG_TARGET_SECURITY,
                key = %key,
                limit = self.limit,
                "Submission rate limit exceeded"
            );
            return Err(ClientError::RateLimited(key.to_string()));
        }

        timestamps.push(now);
        Ok(())
    }
}

/// Random lowercase base36 string of the given length
pub fn random_base36(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| BASE36_ALPHABET[rng.gen_range(0..BASE36_ALPHABET.len())] as char)
        .collect()
}

/// `base64("<millis>-<random>")`
pub fn generate_csrf_token() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    STANDARD.encode(format!("{}-{}", millis, random_base36(11)))
}

/// Generates a token and remembers it for the session
pub fn issue_csrf_token(store: &dyn SessionStore) -> String {
    let token = generate_csrf_token();
    store.set(CSRF_TOKEN_KEY, &token);
    token
}

/// Checks the form's token against the one issued for the session
pub fn verify_csrf_token(store: &dyn SessionStore, token: Option<&str>) -> Result<(), ClientError> {
    match (token, store.get(CSRF_TOKEN_KEY)) {
        (Some(token), Some(stored)) if token == stored => Ok(()),
        _ => {
            error!(target: LOG_TARGET_SECURITY, "Form token validation failed");
            Err(ClientError::Csrf)
        }
    }
}

/// Removes script/iframe blocks, `javascript:` and inline handlers from typed input
///
/// Returns the cleaned value only when something was removed.
pub fn sanitize_input(value: &str) -> Option<String> {
    let cleaned = contactflow_core::utils::sanitization::strip_dangerous_markup(value)?;
    warn!(target: LOG_TARGET_SECURITY, "Potentially dangerous content was removed from input");
    Some(cleaned)
}

/// Formats typed digits as a US phone number
///
/// Non-digits are dropped. Ten or more digits become `(XXX) XXX-XXXX`
/// followed by any extra digits, six to nine digits stay bare, and three to
/// five become `(XXX) rest`.
pub fn format_phone_number(input: &str) -> String {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() >= 10 {
        format!(
            "({}) {}-{}{}",
            &digits[..3],
            &digits[3..6],
            &digits[6..10],
            &digits[10..]
        )
    } else if (3..6).contains(&digits.len()) {
        format!("({}) {}", &digits[..3], &digits[3..])
    } else {
        digits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limiter_window() {
        let limiter = SubmissionRateLimiter::new(2, Duration::from_millis(50));

        assert!(limiter.check_rate_limit("contact-form").is_ok());
        assert!(limiter.check_rate_limit("contact-form").is_ok());
        assert!(matches!(
            limiter.check_rate_limit("contact-form"),
            Err(ClientError::RateLimited(_))
        ));
        assert!(limiter.check_rate_limit("chat-form").is_ok());

        std::thread::sleep(Duration::from_millis(60));
        assert!(limiter.check_rate_limit("contact-form").is_ok());
    }

    #[test]
    fn test_default_rate_limit() {
        let limiter = SubmissionRateLimiter::default();
        for _ in 0..SUBMISSION_RATE_LIMIT {
            assert!(limiter.check_rate_limit("contact-form").is_ok());
        }
        assert!(limiter.check_rate_limit("contact-form").is_err());
    }

    #[test]
    fn test_csrf_token_shape() {
        let token = generate_csrf_token();
        let decoded = String::from_utf8(STANDARD.decode(&token).unwrap()).unwrap();
        let (millis, random) = decoded.split_once('-').unwrap();

        assert!(millis.parse::<i64>().is_ok());
        assert_eq!(random.len(), 11);
        assert!(random.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_csrf_round_trip() {
        let store = MemorySessionStore::new();
        let token = issue_csrf_token(&store);

        assert!(verify_csrf_token(&store, Some(&token)).is_ok());
        assert!(matches!(
            verify_csrf_token(&store, Some("forged")),
            Err(ClientError::Csrf)
        ));
        assert!(verify_csrf_token(&store, None).is_err());
    }

    #[test]
    fn test_csrf_requires_issued_token() {
        let store = MemorySessionStore::new();
        assert!(verify_csrf_token(&store, Some("anything")).is_err());
    }

    #[test]
    fn test_format_phone_number() {
        assert_eq!(format_phone_number("6144038014"), "(614) 403-8014");
        assert_eq!(format_phone_number("614-403-8014"), "(614) 403-8014");
        assert_eq!(format_phone_number("+1 614 403 8014"), "(161) 440-38014");
        assert_eq!(format_phone_number("6144038"), "6144038");
        assert_eq!(format_phone_number("61440"), "(614) 40");
        assert_eq!(format_phone_number("614"), "(614) ");
        assert_eq!(format_phone_number("61"), "61");
        assert_eq!(format_phone_number(""), "");
    }

    #[test]
    fn test_sanitize_input() {
        assert_eq!(
            sanitize_input("<img src=x onerror=alert(1)>").as_deref(),
            Some("<img src=x alert(1)>")
        );
        assert_eq!(sanitize_input("Hello"), None);
    }
}
