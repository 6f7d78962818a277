/// Contactflow Client - headless contact form
///
/// Validates the form against the shared rule table, posts it to the
/// notification endpoint and opens a prefilled `mailto:` link when the
/// endpoint cannot take it. Page side effects go through [`view::FormView`].
pub mod chat;
pub mod controller;
pub mod dispatcher;
pub mod error;
pub mod events;
pub mod fallback;
pub mod security;
pub mod transport;
pub mod validator;
pub mod view;

pub use controller::ContactForm;
pub use dispatcher::{Dispatcher, DispatcherConfig, SubmissionState, SubmitOutcome};
pub use error::ClientError;
pub use transport::{HttpNotificationTransport, NotificationTransport};
pub use validator::FormValidator;
pub use view::{FormView, HeadlessForm};
