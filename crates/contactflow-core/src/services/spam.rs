/// Keyword, link and honeypot spam filter
use crate::constants::{LOG_TARGET_SECURITY, SPAM_KEYWORDS, SPAM_PHRASES};
use crate::error::ContactflowError;
use regex::Regex;
use tracing::warn;

/// Why a submission was classified as spam
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpamVerdict {
    Clean,
    Keyword(String),
    Link,
    Honeypot,
}

impl SpamVerdict {
    pub fn is_spam(&self) -> bool {
        !matches!(self, SpamVerdict::Clean)
    }
}

/// Case-insensitive denylist filter over the submitter's name and message
pub struct SpamFilter {
    denylist: Regex,
    link: Regex,
}

impl SpamFilter {
    pub fn new() -> Result<Self, ContactflowError> {
        Self::with_terms(SPAM_KEYWORDS.iter().chain(SPAM_PHRASES.iter()).copied())
    }

    /// Builds a filter from custom terms; each term must match on word boundaries
    pub fn with_terms<'a, I>(terms: I) -> Result<Self, ContactflowError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let alternatives: Vec<String> = terms
            .into_iter()
            .map(|term| regex::escape(term.trim()))
            .filter(|term| !term.is_empty())
            .collect();

        if alternatives.is_empty() {
            return Err(ContactflowError::Config(
                "Spam filter needs at least one term".to_string(),
            ));
        }

        let denylist = Regex::new(&format!(r"(?i)\b(?:{})\b", alternatives.join("|")))
            .map_err(|e| ContactflowError::Config(format!("Invalid spam term: {}", e)))?;
        let link = Regex::new(r"(?i)https?://\S+")
            .map_err(|e| ContactflowError::Config(format!("Invalid link pattern: {}", e)))?;

        Ok(Self { denylist, link })
    }

    /// Classifies a submission
    ///
    /// A non-empty honeypot wins over every content check.
    pub fn classify(&self, name: &str, message: &str, honeypot: Option<&str>) -> SpamVerdict {
        if honeypot.is_some_and(|value| !value.trim().is_empty()) {
            return SpamVerdict::Honeypot;
        }

        let text = format!("{} {}", name, message);

        if let Some(found) = self.denylist.find(&text) {
            return SpamVerdict::Keyword(found.as_str().to_lowercase());
        }

        if self.link.is_match(&text) {
            return SpamVerdict::Link;
        }

        SpamVerdict::Clean
    }

    /// Rejects spam with a verdict-bearing error
    pub fn check(
        &self,
        name: &str,
        message: &str,
        honeypot: Option<&str>,
    ) -> Result<(), ContactflowError> {
        match self.classify(name, message, honeypot) {
            SpamVerdict::Clean => Ok(()),
            verdict => {
                warn!(target: LOG_TARGET_SECURITY, verdict = ?verdict, "Submission classified as spam");
                Err(ContactflowError::Spam(format!("{:?}", verdict)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> SpamFilter {
        SpamFilter::new().unwrap()
    }

    #[test]
    fn test_clean_submission() {
        let verdict = filter().classify("Jane", "I'd like a quote for a new website.", None);
        assert_eq!(verdict, SpamVerdict::Clean);
        assert!(!verdict.is_spam());
    }

    #[test]
    fn test_keywords_case_insensitive() {
        assert_eq!(
            filter().classify("Jane", "Cheap VIAGRA here", None),
            SpamVerdict::Keyword("viagra".to_string())
        );
        assert_eq!(
            filter().classify("Jane", "Please Click Here today", None),
            SpamVerdict::Keyword("click here".to_string())
        );
    }

    #[test]
    fn test_keywords_respect_word_boundaries() {
        // "loans" and "casinos" are not the bare words
        assert!(!filter().classify("Jane", "We do small-business loans", None).is_spam());
        assert!(filter().classify("Loan Shark", "hello", None).is_spam());
    }

    #[test]
    fn test_links_rejected() {
        assert_eq!(
            filter().classify("Jane", "see https://example.com/offer", None),
            SpamVerdict::Link
        );
        assert_eq!(
            filter().classify("Jane", "HTTP://EXAMPLE.COM", None),
            SpamVerdict::Link
        );
    }

    #[test]
    fn test_honeypot() {
        assert_eq!(
            filter().classify("Jane", "hello", Some("filled by bot")),
            SpamVerdict::Honeypot
        );
        assert!(!filter().classify("Jane", "hello", Some("  ")).is_spam());
    }

    #[test]
    fn test_check_returns_spam_error() {
        let err = filter().check("Jane", "casino night", None).unwrap_err();
        assert!(matches!(err, ContactflowError::Spam(_)));
    }

    #[test]
    fn test_custom_terms() {
        let filter = SpamFilter::with_terms(["crypto"]).unwrap();
        assert!(filter.classify("Jane", "Crypto deal", None).is_spam());
        assert!(SpamFilter::with_terms(Vec::<&str>::new()).is_err());
    }
}
