/// Application constants
///
/// This module contains all hardcoded values used throughout the contact flow.
/// Constants are organized by category for easy maintenance.
// ============================================================================
// Business Contact Constants
// ============================================================================
/// Mailbox that receives contact form notifications
pub const RECIPIENT_EMAIL: &str = "probuilddigital1@gmail.com";

/// Envelope sender for notification mails
pub const SENDER_EMAIL: &str = "noreply@probuilddigital.com";

/// Subject line of notification mails
pub const NOTIFICATION_SUBJECT: &str = "New Contact Form Submission - Pro Build Digital";

/// Source tag attached to every client payload
pub const SOURCE_TAG: &str = "probuild-website";

// ============================================================================
// Size Limits
// ============================================================================

/// Client-side name length bounds (characters)
pub const NAME_MIN_LENGTH: usize = 2;
pub const NAME_MAX_LENGTH: usize = 50;

/// Client-side message length bounds (characters)
pub const MESSAGE_MIN_LENGTH: usize = 10;
pub const MESSAGE_MAX_LENGTH: usize = 1000;

/// Server-side message cap (characters)
pub const SERVER_MAX_MESSAGE_LENGTH: usize = 2000;

/// Maximum accepted request body for the notification endpoint (64 KB)
pub const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;

// ============================================================================
// Timing Constants
// ============================================================================

/// Delay before the mailto fallback success notice is shown, in milliseconds
pub const FALLBACK_NOTICE_DELAY_MS: u64 = 1000;

/// Key the contact form is rate limited under
pub const CONTACT_FORM_ID: &str = "contact-form";

/// Submissions allowed per form within one rate-limit window
pub const SUBMISSION_RATE_LIMIT: usize = 3;

/// Length of the submission rate-limit window, in seconds
pub const SUBMISSION_RATE_WINDOW_SECS: u64 = 60;

// ============================================================================
// Storage
// ============================================================================

/// Append-only submission log (Lambda only allows writes under /tmp)
pub const DEFAULT_LOG_PATH: &str = "/tmp/contact_submissions.log";

/// Timestamp format used in the submission log and mail template
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ============================================================================
// Spam Filter
// ============================================================================

/// Single words that mark a submission as spam
pub const SPAM_KEYWORDS: &[&str] = &["viagra", "cialis", "loan", "casino", "gambling"];

/// Phrases that mark a submission as spam
pub const SPAM_PHRASES: &[&str] = &["buy now", "click here", "act now"];

// ============================================================================
// User-facing Messages
// ============================================================================

pub const MSG_SUBMISSION_ACCEPTED: &str =
    "Thank you for your message! We'll get back to you within 24 hours.";

pub const MSG_SUBMISSION_REJECTED: &str = "Submission rejected";

pub const MSG_SERVER_FAILURE: &str =
    "Sorry, there was an error sending your message. Please try again or contact us directly.";

pub const MSG_METHOD_NOT_ALLOWED: &str = "Method not allowed";

pub const MSG_PAYLOAD_TOO_LARGE: &str = "Request body too large";

/// Shown by the form when client-side validation fails
pub const MSG_FIX_ERRORS: &str = "Please fix the errors above and try again.";

/// Shown after the mail client was opened as a fallback
pub const MSG_MAILTO_OPENED: &str = "Your email client has been opened with your message. Please send the email to complete your submission, or call us at (614) 403-8014.";

/// Shown when neither the endpoint nor the mail client fallback worked
pub const MSG_RATE_LIMITED: &str =
    "You have sent several messages in a short time. Please wait a minute and try again.";

pub const MSG_ALL_PATHS_FAILED: &str = "Unable to send message. Please email us directly at probuilddigital1@gmail.com or call (614) 403-8014.";

// ============================================================================
// Chat Widget
// ============================================================================

/// Chat assistant webhook
pub const CHAT_WEBHOOK_URL: &str =
    "https://zax76.app.n8n.cloud/webhook/2849cef6-17a0-4fd2-8577-8642a5df8cc4";

/// Placeholder value that switches the chat client into demo mode
pub const CHAT_WEBHOOK_PLACEHOLDER: &str = "YOUR_N8N_WEBHOOK_URL_HERE";

/// Session store key of the chat session id
pub const CHAT_SESSION_KEY: &str = "probuild_chat_session_id";

/// Session store key of the form token
pub const CSRF_TOKEN_KEY: &str = "csrf_token";

pub const CHAT_DEFAULT_REPLY: &str = "Thank you for your message! We'll get back to you soon.";

pub const CHAT_ERROR_REPLY: &str =
    "Thank you for your message! We've received it and will respond shortly.";

pub const CHAT_DEMO_REPLY: &str = "Thanks for your message! This is a demo response. Please configure your n8n webhook URL to enable real chat functionality.";

// ============================================================================
// Logging & Monitoring
// ============================================================================

/// Log target for security events (spam, honeypot, token mismatches)
pub const LOG_TARGET_SECURITY: &str = "security";

/// Log target for audit events
pub const LOG_TARGET_AUDIT: &str = "audit";
