//! Role → URL pattern → HTTP verb permission checks.

use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use actix_web::http::Method;
use serde::Deserialize;

use crate::http::authz::role::Role;
use crate::http::authz::router::HttpMethods;
use crate::http::error::AuthzError;

/// Policy point deciding whether a role may use a route.
///
/// Implementations must be pure: no side effects, safe to call repeatedly
/// and from many threads. An unknown role or pattern is a deny, never an
/// error.
pub trait Authorizator: Send + Sync {
    /// May `role` use the route `url_pattern` with its permitted verbs
    /// `allowed_methods`?
    fn is_allowed(&self, role: &Role, url_pattern: &str, allowed_methods: &HttpMethods) -> bool;
}

impl<F> Authorizator for F
where
    F: Fn(&Role, &str, &HttpMethods) -> bool + Send + Sync,
{
    fn is_allowed(&self, role: &Role, url_pattern: &str, allowed_methods: &HttpMethods) -> bool {
        self(role, url_pattern, allowed_methods)
    }
}

/// Verbs a role is granted on one pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MethodGrant {
    /// Every verb.
    Any,
    Only(HashSet<Method>),
}

impl MethodGrant {
    /// True when every verb in `methods` is granted.
    pub fn covers(&self, methods: &HttpMethods) -> bool {
        match self {
            MethodGrant::Any => true,
            MethodGrant::Only(granted) => methods.is_subset(granted),
        }
    }

    fn merge(&mut self, other: MethodGrant) {
        match (self, other) {
            (MethodGrant::Any, _) => {}
            (this, MethodGrant::Any) => *this = MethodGrant::Any,
            (MethodGrant::Only(granted), MethodGrant::Only(more)) => granted.extend(more),
        }
    }
}

/// In-memory whitelist: role → { URL pattern → granted verbs }.
///
/// A role is allowed on a route when it holds a grant for the route's
/// pattern covering every verb the route permits.
///
/// # Example
/// ```
/// use std::collections::HashSet;
/// use actix_web::http::Method;
/// use actix_authz_core::http::authz::{Authorizator, PermissionTable, Role};
///
/// let table = PermissionTable::new()
///     .grant("user", "/photos/{id}", &[Method::GET])
///     .grant_all("admin", "/photos/{id}");
///
/// let get: HashSet<Method> = [Method::GET].into_iter().collect();
/// let get_put: HashSet<Method> = [Method::GET, Method::PUT].into_iter().collect();
///
/// assert!(table.is_allowed(&Role::new("user"), "/photos/{id}", &get));
/// assert!(!table.is_allowed(&Role::new("user"), "/photos/{id}", &get_put));
/// assert!(table.is_allowed(&Role::new("admin"), "/photos/{id}", &get_put));
/// ```
#[derive(Clone, Debug, Default)]
pub struct PermissionTable {
    grants: HashMap<Role, HashMap<String, MethodGrant>>,
}

impl PermissionTable {
    pub fn new() -> Self {
        PermissionTable {
            grants: HashMap::new(),
        }
    }

    /// Grants `role` the given verbs on `url_pattern`. Repeated grants add up.
    pub fn grant(self, role: impl Into<Role>, url_pattern: &str, methods: &[Method]) -> Self {
        let grant = MethodGrant::Only(methods.iter().cloned().collect());
        self.insert(role.into(), url_pattern, grant)
    }

    /// Grants `role` every verb on `url_pattern`.
    pub fn grant_all(self, role: impl Into<Role>, url_pattern: &str) -> Self {
        self.insert(role.into(), url_pattern, MethodGrant::Any)
    }

    fn insert(mut self, role: Role, url_pattern: &str, grant: MethodGrant) -> Self {
        use std::collections::hash_map::Entry;
        let patterns = self.grants.entry(role).or_default();
        match patterns.entry(url_pattern.to_string()) {
            Entry::Occupied(mut existing) => existing.get_mut().merge(grant),
            Entry::Vacant(slot) => {
                slot.insert(grant);
            }
        }
        self
    }

    /// Builds a table from deserialized configuration.
    ///
    /// # Errors
    /// `AuthzError::InvalidConfiguration` when a verb is not a valid HTTP
    /// method name.
    pub fn from_config(config: PermissionConfig) -> Result<Self, AuthzError> {
        let mut table = PermissionTable::new();
        for (role, patterns) in config.roles {
            for (pattern, verbs) in patterns {
                let grant = parse_grant(&verbs).map_err(|message| {
                    AuthzError::InvalidConfiguration {
                        message: format!("role {}, pattern {}: {}", role, pattern, message),
                    }
                })?;
                table = table.insert(role.clone(), &pattern, grant);
            }
        }
        Ok(table)
    }

    /// Returns the grant `role` holds on `url_pattern`, if any.
    pub fn grant_for(&self, role: &Role, url_pattern: &str) -> Option<&MethodGrant> {
        self.grants.get(role).and_then(|patterns| patterns.get(url_pattern))
    }
}

impl Authorizator for PermissionTable {
    fn is_allowed(&self, role: &Role, url_pattern: &str, allowed_methods: &HttpMethods) -> bool {
        !allowed_methods.is_empty()
            && self
                .grant_for(role, url_pattern)
                .is_some_and(|grant| grant.covers(allowed_methods))
    }
}

fn parse_grant(verbs: &[String]) -> Result<MethodGrant, String> {
    let mut methods = HashSet::new();
    for verb in verbs {
        if verb == "*" {
            return Ok(MethodGrant::Any);
        }
        let method = Method::from_str(&verb.to_ascii_uppercase())
            .map_err(|_| format!("invalid HTTP method {:?}", verb))?;
        methods.insert(method);
    }
    Ok(MethodGrant::Only(methods))
}

/// Serializable form of a [`PermissionTable`].
///
/// ```json
/// { "roles": { "admin": { "/admin/**": ["*"] }, "user": { "/photos/{id}": ["GET"] } } }
/// ```
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PermissionConfig {
    #[serde(default)]
    pub roles: HashMap<Role, HashMap<String, Vec<String>>>,
}
