//! Route lookups needed by the interceptor.
//!
//! [`Router`] is the seam to the routing layer. [`RouteTable`] is the
//! in-memory implementation used by the Actix middleware, which also
//! resolves incoming requests to their [`ResourceMethod`].
//!
//! # Pattern Syntax
//!
//! - literal segments match themselves
//! - `{name}` matches exactly one path segment
//! - `*` inside a segment matches zero or more characters of that segment
//! - `**` as a whole segment matches zero or more segments

use std::collections::HashSet;

use actix_web::http::Method;
use regex::Regex;

use crate::http::authz::resource::{MethodRef, ResourceMethod, ResourceType};
use crate::http::error::AuthzError;

/// The HTTP verbs a route permits.
pub type HttpMethods = HashSet<Method>;

/// Maps resource methods to URL patterns and patterns to permitted verbs.
pub trait Router: Send + Sync {
    /// Canonical URL pattern of a resource method.
    ///
    /// # Errors
    /// `AuthzError::UnmappedResource` when no route targets the method.
    fn url_for(&self, resource: &ResourceType, method: &MethodRef) -> Result<String, AuthzError>;

    /// Verbs permitted on `url_pattern`; empty for an unknown pattern.
    fn allowed_methods_for(&self, url_pattern: &str) -> HttpMethods;
}

#[derive(Debug)]
struct Route {
    target: ResourceMethod,
    pattern: String,
    matcher: Regex,
    methods: HttpMethods,
}

/// Immutable route table built once at startup.
///
/// # Example
/// ```
/// use actix_web::http::Method;
/// use actix_authz_core::http::authz::{ResourceMethod, RouteTable, Router};
///
/// let routes = RouteTable::builder()
///     .route(ResourceMethod::new("PhotoResource", "show"), "/photos/{id}", &[Method::GET])
///     .route(ResourceMethod::new("PhotoResource", "update"), "/photos/{id}", &[Method::PUT])
///     .build()
///     .unwrap();
///
/// let target = routes.resolve(&Method::PUT, "/photos/42").unwrap();
/// assert_eq!(target, &ResourceMethod::new("PhotoResource", "update"));
/// assert_eq!(routes.allowed_methods_for("/photos/{id}").len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::default()
    }

    /// Finds the resource method serving `method` on `path`.
    ///
    /// Routes are tried in registration order.
    pub fn resolve(&self, method: &Method, path: &str) -> Option<&ResourceMethod> {
        self.routes
            .iter()
            .find(|route| route.methods.contains(method) && route.matcher.is_match(path))
            .map(|route| &route.target)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl Router for RouteTable {
    fn url_for(&self, resource: &ResourceType, method: &MethodRef) -> Result<String, AuthzError> {
        self.routes
            .iter()
            .find(|route| route.target.resource() == resource && route.target.method() == method)
            .map(|route| route.pattern.clone())
            .ok_or_else(|| AuthzError::UnmappedResource {
                resource: resource.to_string(),
                method: method.to_string(),
            })
    }

    fn allowed_methods_for(&self, url_pattern: &str) -> HttpMethods {
        self.routes
            .iter()
            .filter(|route| route.pattern == url_pattern)
            .flat_map(|route| route.methods.iter().cloned())
            .collect()
    }
}

/// Collects routes for a [`RouteTable`].
#[derive(Debug, Default)]
pub struct RouteTableBuilder {
    routes: Vec<(ResourceMethod, String, HttpMethods)>,
}

impl RouteTableBuilder {
    /// Maps `target` to `pattern` for the given verbs.
    pub fn route(mut self, target: ResourceMethod, pattern: &str, methods: &[Method]) -> Self {
        self.routes
            .push((target, pattern.to_string(), methods.iter().cloned().collect()));
        self
    }

    /// Compiles every pattern.
    ///
    /// # Errors
    /// `AuthzError::InvalidConfiguration` for a pattern that does not start
    /// with `/` or does not compile.
    pub fn build(self) -> Result<RouteTable, AuthzError> {
        let mut routes = Vec::with_capacity(self.routes.len());
        for (target, pattern, methods) in self.routes {
            let matcher = compile(&pattern)?;
            log::debug!("route {} {:?} -> {}", pattern, methods, target);
            routes.push(Route {
                target,
                pattern,
                matcher,
                methods,
            });
        }
        Ok(RouteTable { routes })
    }
}

fn compile(pattern: &str) -> Result<Regex, AuthzError> {
    if !pattern.starts_with('/') {
        return Err(AuthzError::InvalidConfiguration {
            message: format!("route pattern {:?} must start with '/'", pattern),
        });
    }

    let mut re = String::from("^");
    let segments: Vec<&str> = pattern
        .trim_start_matches('/')
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();

    for segment in &segments {
        if *segment == "**" {
            re.push_str("(?:/[^/]+)*");
        } else if segment.starts_with('{') && segment.ends_with('}') {
            re.push_str("/[^/]+");
        } else {
            re.push('/');
            let parts: Vec<String> = segment.split('*').map(regex::escape).collect();
            re.push_str(&parts.join("[^/]*"));
        }
    }
    if segments.is_empty() {
        re.push('/');
    } else {
        re.push_str("/?");
    }
    re.push('$');

    Regex::new(&re).map_err(|e| AuthzError::InvalidConfiguration {
        message: format!("route pattern {:?}: {}", pattern, e),
    })
}
