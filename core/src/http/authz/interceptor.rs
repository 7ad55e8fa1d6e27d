//! The authorization interceptor.
//!
//! Participation and decision are kept apart:
//! - [`Authz::accepts`] says whether the interceptor takes part in a request
//!   at all (bypassed methods do not);
//! - [`Authz::intercept`] makes the allow/deny decision and either forwards
//!   to the rest of the pipeline or hands the request to the denial path.

use std::collections::HashSet;

use crate::http::authz::authorizator::Authorizator;
use crate::http::authz::bypass::BypassResolver;
use crate::http::authz::info::AuthzInfo;
use crate::http::authz::resource::ResourceMethod;
use crate::http::authz::role::Role;
use crate::http::authz::router::Router;
use crate::http::error::AuthzError;

/// The remainder of the pipeline after this interceptor.
///
/// Consumed by [`next`](InterceptorStack::next), which is only ever called
/// on the grant path.
pub trait InterceptorStack<R> {
    type Output;

    fn next(self, method: &ResourceMethod, request: R) -> Self::Output;
}

impl<R, O, F> InterceptorStack<R> for F
where
    F: FnOnce(&ResourceMethod, R) -> O,
{
    type Output = O;

    fn next(self, method: &ResourceMethod, request: R) -> O {
        self(method, request)
    }
}

/// Which way an intercepted request went.
#[derive(Debug, PartialEq, Eq)]
pub enum Interception<F, D> {
    /// Access granted, holds what the rest of the pipeline returned.
    Proceeded(F),
    /// Access denied, holds what the denial path produced.
    Denied(D),
}

impl<F, D> Interception<F, D> {
    pub fn is_proceeded(&self) -> bool {
        matches!(self, Interception::Proceeded(_))
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, Interception::Denied(_))
    }
}

/// Role-based authorization interceptor.
///
/// Holds no per-request state; one instance serves every request and is
/// `Send + Sync` whenever its collaborators are.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use actix_web::http::Method;
/// use actix_authz_core::http::authz::{
///     Authz, BypassResolver, PermissionTable, RequestAuthzInfo, ResourceDecl,
///     ResourceMethod, RouteTable, TypeHierarchy,
/// };
///
/// let hierarchy = TypeHierarchy::builder()
///     .resource(ResourceDecl::new("HomeResource").bypass_method("index").method("settings"))
///     .build()
///     .unwrap();
/// let routes = RouteTable::builder()
///     .route(ResourceMethod::new("HomeResource", "index"), "/", &[Method::GET])
///     .route(ResourceMethod::new("HomeResource", "settings"), "/settings", &[Method::GET])
///     .build()
///     .unwrap();
/// let authz = Authz::new(
///     PermissionTable::new().grant("user", "/settings", &[Method::GET]),
///     RequestAuthzInfo::new(),
///     routes,
///     BypassResolver::new(Arc::new(hierarchy)),
/// );
///
/// assert!(!authz.accepts(&ResourceMethod::new("HomeResource", "index")));
/// assert!(authz.accepts(&ResourceMethod::new("HomeResource", "settings")));
/// ```
#[derive(Debug)]
pub struct Authz<Z, I, T> {
    authorizator: Z,
    info: I,
    router: T,
    bypass: BypassResolver,
}

impl<Z, I, T> Authz<Z, I, T>
where
    Z: Authorizator,
    T: Router,
{
    pub fn new(authorizator: Z, info: I, router: T, bypass: BypassResolver) -> Self {
        Authz {
            authorizator,
            info,
            router,
            bypass,
        }
    }

    pub fn router(&self) -> &T {
        &self.router
    }

    pub fn info(&self) -> &I {
        &self.info
    }

    /// False when `method` carries a bypass marker, directly or through its
    /// type hierarchy; the interceptor is then skipped for the request.
    pub fn accepts(&self, method: &ResourceMethod) -> bool {
        !self.bypass.should_bypass(method.resource(), method.method())
    }

    /// Grants when any of `roles` is allowed on the route of `method`.
    ///
    /// # Errors
    /// Propagates router faults, e.g. `AuthzError::UnmappedResource`.
    pub fn is_authorized(
        &self,
        roles: &HashSet<Role>,
        method: &ResourceMethod,
    ) -> Result<bool, AuthzError> {
        let url_pattern = self.router.url_for(method.resource(), method.method())?;
        let allowed_methods = self.router.allowed_methods_for(&url_pattern);

        Ok(roles
            .iter()
            .any(|role| self.authorizator.is_allowed(role, &url_pattern, &allowed_methods)))
    }

    /// Checks the actor of `request` and forwards to `stack` or denies.
    ///
    /// On denial `stack` is dropped without being called and
    /// [`AuthzInfo::handle_auth_error`] runs exactly once. A denial is not an
    /// error; `Err` only carries collaborator faults.
    pub fn intercept<R, S>(
        &self,
        stack: S,
        method: &ResourceMethod,
        request: R,
    ) -> Result<Interception<S::Output, I::Output>, AuthzError>
    where
        I: AuthzInfo<R>,
        S: InterceptorStack<R>,
    {
        let roles = self
            .info
            .get_authorizable(&request)
            .map(|actor| actor.roles())
            .unwrap_or_default();

        let granted = self.is_authorized(&roles, method).map_err(|e| {
            log::warn!("authorization of {} failed: {}", method, e);
            e
        })?;

        if granted {
            log::debug!("access granted to {} for roles {:?}", method, roles);
            Ok(Interception::Proceeded(stack.next(method, request)))
        } else {
            log::info!("access denied to {} for roles {:?}", method, roles);
            Ok(Interception::Denied(self.info.handle_auth_error(request)))
        }
    }
}
