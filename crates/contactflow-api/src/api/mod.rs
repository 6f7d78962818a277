/// API endpoint modules
pub mod contact;
pub mod health;
