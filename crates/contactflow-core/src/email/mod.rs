/// Notification mail rendering and composition
pub mod composer;

pub use composer::{EmailComposer, LettreEmailComposer, render_notification};
