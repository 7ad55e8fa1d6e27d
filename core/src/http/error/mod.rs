//! Error types.
//!
//! - [`AuthError`]: the denial responses rendered for the client.
//! - [`AuthzError`]: collaborator and configuration faults.

pub use auth_error::{AuthError, AuthzError};

mod auth_error;
