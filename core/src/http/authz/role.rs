//! Roles and the actors holding them.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Permission-bearing token held by an actor.
///
/// Roles are compared by name; nothing else is attached to them.
///
/// # Example
/// ```
/// use actix_authz_core::http::authz::Role;
///
/// assert_eq!(Role::new("admin"), Role::from("admin"));
/// assert_ne!(Role::new("admin"), Role::new("user"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(String);

impl Role {
    pub fn new(name: impl Into<String>) -> Self {
        Role(name.into())
    }

    /// Returns the role name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Role {
    fn from(name: &str) -> Self {
        Role::new(name)
    }
}

impl From<String> for Role {
    fn from(name: String) -> Self {
        Role(name)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Capability of the current actor: the set of roles it holds.
///
/// Any identity representation (session user, token claims, static test
/// fixture) implements it. The set is produced fresh for every call.
pub trait Authorizable {
    fn roles(&self) -> HashSet<Role>;
}

impl Authorizable for HashSet<Role> {
    fn roles(&self) -> HashSet<Role> {
        self.clone()
    }
}

impl Authorizable for Vec<Role> {
    fn roles(&self) -> HashSet<Role> {
        self.iter().cloned().collect()
    }
}
