/// Data models for the contact flow
pub mod config;
pub mod form;
pub mod submission;

pub use config::*;
pub use form::*;
pub use submission::*;
