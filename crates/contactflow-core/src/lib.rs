/// Contactflow Core - Shared library for the Pro Build Digital contact form
///
/// This crate contains the models, fixed validation rules, sanitization and
/// spam filtering, and the notification pipeline shared by the HTTP
/// endpoint and the form client.
pub mod constants;
pub mod email;
pub mod error;
pub mod models;
pub mod rules;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use error::ContactflowError;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
