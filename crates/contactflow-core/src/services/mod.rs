/// Infrastructure services of the notification endpoint
pub mod config;
pub mod notification;
pub mod ses;
pub mod spam;
pub mod submission_log;

// Re-export service traits
pub use config::{ConfigProvider, EnvConfigProvider};
pub use notification::NotificationService;
pub use ses::{EmailSender, SesEmailSender};
pub use spam::{SpamFilter, SpamVerdict};
pub use submission_log::{FileSubmissionLog, SubmissionLog};
