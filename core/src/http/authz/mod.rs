//! Role-based authorization of resource methods.
//!
//! # Module Structure
//!
//! - `role` - Roles and the `Authorizable` capability of actors
//! - `user` - Actor model stored in requests (User)
//! - `resource` - Resource method identifiers (ResourceType, MethodRef, ResourceMethod)
//! - `hierarchy` - Static type table carrying bypass markers (TypeHierarchy)
//! - `bypass` - Bypass marker resolution (BypassResolver)
//! - `authorizator` - Role → pattern → verb whitelist (Authorizator, PermissionTable)
//! - `router` - URL patterns and permitted verbs (Router, RouteTable)
//! - `info` - Current actor and denial path (AuthzInfo, RequestAuthzInfo)
//! - `interceptor` - The interceptor itself (Authz)
//! - `chain` - Framework-independent interceptor pipeline (InterceptorChain)
//! - `config` - Identity seam of the middleware (Authenticator)
//! - `middleware` - Actix Web middleware (AuthzTransform)

// Re-exports for convenience
pub use authorizator::{Authorizator, MethodGrant, PermissionConfig, PermissionTable};
pub use bypass::BypassResolver;
pub use chain::{Interceptor, InterceptorChain, Next};
pub use config::Authenticator;
pub use hierarchy::{
    Ancestor, Ancestors, ResourceDecl, TypeEntry, TypeHierarchy, TypeHierarchyBuilder,
};
pub use info::{AuthzInfo, RequestAuthzInfo};
pub use interceptor::{Authz, Interception, InterceptorStack};
pub use middleware::AuthzTransform;
pub use resource::{MethodRef, ResourceMethod, ResourceType};
pub use role::{Authorizable, Role};
pub use router::{HttpMethods, RouteTable, RouteTableBuilder, Router};
pub use user::User;

mod config;
mod role;
mod user;

pub mod authorizator;
pub mod bypass;
pub mod chain;
pub mod hierarchy;
pub mod info;
pub mod interceptor;
pub mod middleware;
pub mod resource;
pub mod router;
