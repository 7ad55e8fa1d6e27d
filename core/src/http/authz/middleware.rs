//! Authorization middleware for Actix Web.
//!
//! Runs the [`Authz`] interceptor between routing and the handler:
//! 1. the configured [`Authenticator`] stores the actor in the request,
//! 2. the request is resolved to its resource method through the
//!    [`RouteTable`],
//! 3. bypassed requests and requests no handler matches go straight to the
//!    inner service, while requests Actix would dispatch to a handler missing
//!    from the route table are denied,
//! 4. everything else is intercepted: forwarded on grant, answered by the
//!    [`AuthzInfo`] denial path otherwise.

use std::rc::Rc;
use std::sync::Arc;

use actix_service::{Service, Transform};
use actix_web::body::EitherBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::{Error, HttpMessage};
use futures_util::future::{ok, ready, LocalBoxFuture, Ready};

use crate::http::authz::authorizator::Authorizator;
use crate::http::authz::config::Authenticator;
use crate::http::authz::info::AuthzInfo;
use crate::http::authz::interceptor::{Authz, Interception, InterceptorStack};
use crate::http::authz::resource::ResourceMethod;
use crate::http::authz::router::RouteTable;

type AuthenticatorFactory = Rc<dyn Fn() -> Box<dyn Authenticator>>;

/// Authorization middleware factory.
///
/// # Example
/// ```ignore
/// let authz = Arc::new(Authz::new(permissions, RequestAuthzInfo::new(), routes, bypass));
///
/// HttpServer::new(move || {
///     App::new()
///         .wrap(AuthzTransform::new(Arc::clone(&authz)).config_authenticator(my_authenticator))
///         .service(index)
/// })
/// ```
pub struct AuthzTransform<Z, I> {
    authz: Arc<Authz<Z, I, RouteTable>>,
    authenticator: Option<AuthenticatorFactory>,
}

impl<Z, I> AuthzTransform<Z, I> {
    pub fn new(authz: Arc<Authz<Z, I, RouteTable>>) -> Self {
        AuthzTransform {
            authz,
            authenticator: None,
        }
    }

    /// Sets the factory of the authenticator run before authorization.
    /// It is called once per worker.
    pub fn config_authenticator<Auth>(mut self, authenticator: fn() -> Auth) -> Self
    where
        Auth: Authenticator + 'static,
    {
        self.authenticator = Some(Rc::new(move || {
            Box::new(authenticator()) as Box<dyn Authenticator>
        }));
        self
    }
}

impl<S, B, Z, I> Transform<S, ServiceRequest> for AuthzTransform<Z, I>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    Z: Authorizator + 'static,
    I: AuthzInfo<ServiceRequest, Output = ServiceResponse> + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthzService<Z, I, S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        let authenticator = self.authenticator.as_ref().map(|factory| factory());

        ok(AuthzService {
            authz: Arc::clone(&self.authz),
            authenticator,
            service: Rc::new(service),
        })
    }
}

/// Authorization middleware service.
pub struct AuthzService<Z, I, S> {
    authz: Arc<Authz<Z, I, RouteTable>>,
    authenticator: Option<Box<dyn Authenticator>>,
    service: Rc<S>,
}

impl<Z, I, S, B> Service<ServiceRequest> for AuthzService<Z, I, S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    Z: Authorizator,
    I: AuthzInfo<ServiceRequest, Output = ServiceResponse>,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        if let Some(user) = self
            .authenticator
            .as_ref()
            .and_then(|auth| auth.get_user(&req))
        {
            req.extensions_mut().insert(user);
        }

        // Resolve against the decoded path Actix dispatches on.
        let (target, routed) = {
            let path = req.match_info().as_str();
            let target = self.authz.router().resolve(req.method(), path).cloned();
            let routed = target.is_none() && req.resource_map().has_resource(path);
            (target, routed)
        };

        let target = match target {
            Some(target) if self.authz.accepts(&target) => target,
            Some(target) => {
                log::debug!("{} bypasses authorization", target);
                return forward(service, req);
            }
            None if routed => {
                log::warn!(
                    "{} {} reaches a handler with no resource method, denying",
                    req.method(),
                    req.path()
                );
                let res = self.authz.info().handle_auth_error(req);
                return Box::pin(ready(Ok(res.map_into_right_body())));
            }
            None => {
                // No handler matches; 404 and 405 are the router's to report.
                log::debug!("no resource method for {} {}", req.method(), req.path());
                return forward(service, req);
            }
        };

        match self.authz.intercept(ServiceStack { service }, &target, req) {
            Ok(Interception::Proceeded(fut)) => fut,
            Ok(Interception::Denied(res)) => Box::pin(ready(Ok(res.map_into_right_body()))),
            Err(e) => Box::pin(ready(Err(e.into()))),
        }
    }
}

/// The inner service seen as the rest of the interceptor pipeline.
struct ServiceStack<S> {
    service: Rc<S>,
}

impl<S, B> InterceptorStack<ServiceRequest> for ServiceStack<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Output = LocalBoxFuture<'static, Result<ServiceResponse<EitherBody<B>>, Error>>;

    fn next(self, _method: &ResourceMethod, request: ServiceRequest) -> Self::Output {
        forward(self.service, request)
    }
}

fn forward<S, B>(
    service: Rc<S>,
    req: ServiceRequest,
) -> LocalBoxFuture<'static, Result<ServiceResponse<EitherBody<B>>, Error>>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    let fut = service.call(req);
    Box::pin(async move {
        let res = fut.await?;
        Ok(res.map_into_left_body())
    })
}
