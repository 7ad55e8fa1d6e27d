//! Identifiers of resource handlers.

use std::fmt;

/// Name of a resource type (the type declaring handler methods).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResourceType(String);

impl ResourceType {
    pub fn new(name: impl Into<String>) -> Self {
        ResourceType(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ResourceType {
    fn from(name: &str) -> Self {
        ResourceType::new(name)
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Name of a handler method on a resource type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MethodRef(String);

impl MethodRef {
    pub fn new(name: impl Into<String>) -> Self {
        MethodRef(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MethodRef {
    fn from(name: &str) -> Self {
        MethodRef::new(name)
    }
}

impl fmt::Display for MethodRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The handler a request was routed to: which type, which method on it.
///
/// # Example
/// ```
/// use actix_authz_core::http::authz::ResourceMethod;
///
/// let target = ResourceMethod::new("PhotoResource", "show");
/// assert_eq!(target.resource().name(), "PhotoResource");
/// assert_eq!(target.method().name(), "show");
/// assert_eq!(target.to_string(), "PhotoResource::show");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResourceMethod {
    resource: ResourceType,
    method: MethodRef,
}

impl ResourceMethod {
    pub fn new(resource: impl Into<ResourceType>, method: impl Into<MethodRef>) -> Self {
        ResourceMethod {
            resource: resource.into(),
            method: method.into(),
        }
    }

    pub fn resource(&self) -> &ResourceType {
        &self.resource
    }

    pub fn method(&self) -> &MethodRef {
        &self.method
    }
}

impl fmt::Display for ResourceMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.resource, self.method)
    }
}
