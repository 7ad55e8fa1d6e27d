//! Framework-independent interceptor pipeline.
//!
//! An [`InterceptorChain`] is an ordered list of interceptors ending in a
//! terminal handler. Each interceptor first says whether it takes part in a
//! request ([`Interceptor::accepts`]); participants get a [`Next`] handle and
//! decide whether to continue.
//!
//! # Example
//! ```
//! use std::sync::Arc;
//! use actix_web::http::Method;
//! use actix_authz_core::http::authz::{
//!     Authorizable, Authz, AuthzInfo, BypassResolver, InterceptorChain, PermissionTable,
//!     ResourceMethod, Role, RouteTable, TypeHierarchy,
//! };
//!
//! struct Roles;
//!
//! impl AuthzInfo<Vec<Role>> for Roles {
//!     type Output = String;
//!
//!     fn get_authorizable(&self, request: &Vec<Role>) -> Option<Box<dyn Authorizable>> {
//!         Some(Box::new(request.clone()))
//!     }
//!
//!     fn handle_auth_error(&self, _request: Vec<Role>) -> String {
//!         "denied".to_string()
//!     }
//! }
//!
//! let routes = RouteTable::builder()
//!     .route(ResourceMethod::new("Home", "index"), "/", &[Method::GET])
//!     .build()
//!     .unwrap();
//! let authz = Authz::new(
//!     PermissionTable::new().grant("admin", "/", &[Method::GET]),
//!     Roles,
//!     routes,
//!     BypassResolver::new(Arc::new(TypeHierarchy::default())),
//! );
//! let chain = InterceptorChain::new(|_: &ResourceMethod, _: Vec<Role>| "handled".to_string())
//!     .with(authz);
//!
//! let index = ResourceMethod::new("Home", "index");
//! assert_eq!(chain.proceed(&index, vec![Role::new("admin")]).unwrap(), "handled");
//! assert_eq!(chain.proceed(&index, vec![Role::new("user")]).unwrap(), "denied");
//! ```

use crate::http::authz::authorizator::Authorizator;
use crate::http::authz::info::AuthzInfo;
use crate::http::authz::interceptor::{Authz, Interception, InterceptorStack};
use crate::http::authz::resource::ResourceMethod;
use crate::http::authz::router::Router;
use crate::http::error::AuthzError;

/// One stage of an [`InterceptorChain`].
pub trait Interceptor<R, O> {
    /// Whether this stage takes part in requests for `method`.
    fn accepts(&self, method: &ResourceMethod) -> bool;

    /// Handles a request; call `next.next(..)` to continue down the chain.
    fn intercept(
        &self,
        next: Next<'_, R, O>,
        method: &ResourceMethod,
        request: R,
    ) -> Result<O, AuthzError>;
}

type Terminal<R, O> = Box<dyn Fn(&ResourceMethod, R) -> O>;

/// Ordered interceptors followed by a terminal handler.
pub struct InterceptorChain<R, O> {
    interceptors: Vec<Box<dyn Interceptor<R, O>>>,
    terminal: Terminal<R, O>,
}

impl<R, O> InterceptorChain<R, O> {
    pub fn new<H>(terminal: H) -> Self
    where
        H: Fn(&ResourceMethod, R) -> O + 'static,
    {
        InterceptorChain {
            interceptors: Vec::new(),
            terminal: Box::new(terminal),
        }
    }

    /// Appends an interceptor; stages run in insertion order.
    pub fn with<I>(mut self, interceptor: I) -> Self
    where
        I: Interceptor<R, O> + 'static,
    {
        self.interceptors.push(Box::new(interceptor));
        self
    }

    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    /// Runs `request` through the chain.
    pub fn proceed(&self, method: &ResourceMethod, request: R) -> Result<O, AuthzError> {
        Next {
            chain: self,
            position: 0,
        }
        .next(method, request)
    }
}

/// Continuation handed to an interceptor: the stages after it.
pub struct Next<'a, R, O> {
    chain: &'a InterceptorChain<R, O>,
    position: usize,
}

impl<R, O> InterceptorStack<R> for Next<'_, R, O> {
    type Output = Result<O, AuthzError>;

    fn next(self, method: &ResourceMethod, request: R) -> Self::Output {
        let remaining = &self.chain.interceptors[self.position..];
        match remaining.iter().position(|i| i.accepts(method)) {
            Some(offset) => {
                let index = self.position + offset;
                let next = Next {
                    chain: self.chain,
                    position: index + 1,
                };
                self.chain.interceptors[index].intercept(next, method, request)
            }
            None => Ok((self.chain.terminal)(method, request)),
        }
    }
}

impl<R, O, Z, I, T> Interceptor<R, O> for Authz<Z, I, T>
where
    Z: Authorizator,
    I: AuthzInfo<R, Output = O>,
    T: Router,
{
    fn accepts(&self, method: &ResourceMethod) -> bool {
        Authz::accepts(self, method)
    }

    fn intercept(
        &self,
        next: Next<'_, R, O>,
        method: &ResourceMethod,
        request: R,
    ) -> Result<O, AuthzError> {
        match Authz::intercept(self, next, method, request)? {
            Interception::Proceeded(result) => result,
            Interception::Denied(output) => Ok(output),
        }
    }
}
