//! Actor model stored in the request by upstream authentication.

use std::collections::HashSet;
use std::fmt;

use crate::http::authz::role::{Authorizable, Role};

/// An authenticated actor and the roles it holds.
///
/// # Example
/// ```
/// use actix_authz_core::http::authz::{Authorizable, Role, User};
///
/// let user = User::new("alice").roles(&["admin".into(), "user".into()]);
///
/// assert!(user.has_role("admin"));
/// assert!(Authorizable::roles(&user).contains(&Role::new("user")));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    username: String,
    roles: Vec<Role>,
}

impl User {
    pub fn new(username: impl Into<String>) -> Self {
        User {
            username: username.into(),
            roles: Vec::new(),
        }
    }

    /// Returns the username.
    pub fn get_username(&self) -> &str {
        &self.username
    }

    /// Returns the user's roles in insertion order.
    pub fn get_roles(&self) -> &[Role] {
        &self.roles
    }

    /// Adds roles to the user (builder pattern). Duplicates are ignored.
    pub fn roles(mut self, roles: &[String]) -> Self {
        for role in roles {
            let role = Role::new(role.as_str());
            if !self.roles.contains(&role) {
                self.roles.push(role);
            }
        }
        self
    }

    /// Checks if the user has a specific role.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r.name() == role)
    }
}

impl Authorizable for User {
    fn roles(&self) -> HashSet<Role> {
        self.roles.iter().cloned().collect()
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "User {{ username: {}, roles: {:?} }}", self.username, self.roles)
    }
}
