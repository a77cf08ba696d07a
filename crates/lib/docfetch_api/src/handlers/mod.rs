//! Request handlers.

pub mod fetch;
pub mod health;
