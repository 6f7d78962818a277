/// HTML and input sanitization utilities
use regex::Regex;

lazy_static::lazy_static! {
    static ref SCRIPT_BLOCK: Regex = Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").unwrap();
    static ref IFRAME_BLOCK: Regex = Regex::new(r"(?is)<iframe\b[^>]*>.*?</iframe\s*>").unwrap();
    static ref JAVASCRIPT_SCHEME: Regex = Regex::new(r"(?i)javascript:").unwrap();
    static ref INLINE_HANDLER: Regex = Regex::new(r"(?i)on\w+\s*=").unwrap();
}

/// Escapes text for inclusion in HTML, quotes included
///
/// # Examples
/// ```
/// use contactflow_core::utils::sanitization::escape_html;
///
/// assert_eq!(escape_html("<b>O'Brien & Co</b>"), "&lt;b&gt;O&#039;Brien &amp; Co&lt;/b&gt;");
/// ```
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Trims and HTML-escapes a free-text field
pub fn sanitize_text(text: &str) -> String {
    escape_html(text.trim())
}

/// Removes every character that cannot appear in an email address
pub fn sanitize_email(email: &str) -> String {
    email
        .trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || "!#$%&'*+-=?^_`{|}~@.[]".contains(*c))
        .collect()
}

/// Strips script/iframe blocks, `javascript:` schemes and inline event handlers
///
/// Returns `None` when the input was already clean.
///
/// # Examples
/// ```
/// use contactflow_core::utils::sanitization::strip_dangerous_markup;
///
/// assert_eq!(
///     strip_dangerous_markup("hi<script>alert(1)</script>").as_deref(),
///     Some("hi")
/// );
/// assert_eq!(strip_dangerous_markup("plain text"), None);
/// ```
pub fn strip_dangerous_markup(input: &str) -> Option<String> {
    let cleaned = SCRIPT_BLOCK.replace_all(input, "");
    let cleaned = IFRAME_BLOCK.replace_all(&cleaned, "");
    let cleaned = JAVASCRIPT_SCHEME.replace_all(&cleaned, "");
    let cleaned = INLINE_HANDLER.replace_all(&cleaned, "").into_owned();

    if cleaned == input {
        None
    } else {
        Some(cleaned)
    }
}
