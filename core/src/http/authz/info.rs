//! Access to the current actor and to the denial path.

use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::{http, HttpMessage, HttpResponse, ResponseError};

use crate::http::authz::role::Authorizable;
use crate::http::authz::user::User;
use crate::http::error::AuthError;

/// Request-scoped collaborator of the interceptor.
///
/// `R` is the pipeline's request handle; it is handed back to
/// [`handle_auth_error`](AuthzInfo::handle_auth_error) on denial so the
/// implementation can build the framework's response from it.
pub trait AuthzInfo<R> {
    /// What the denial path produces (a response, a redirect, ...).
    type Output;

    /// The actor of `request`, or `None` when nobody is authenticated.
    /// An absent actor holds no roles.
    fn get_authorizable(&self, request: &R) -> Option<Box<dyn Authorizable>>;

    /// Called exactly once per denied request.
    fn handle_auth_error(&self, request: R) -> Self::Output;
}

/// [`AuthzInfo`] for Actix Web.
///
/// The actor is the [`User`] stored in the request extensions by upstream
/// authentication. A denied request gets:
/// - `403 Forbidden` when an actor is present,
/// - a redirect to the login URL when none is and a login URL is set,
/// - `401 Unauthorized` otherwise.
///
/// # Example
/// ```
/// use actix_authz_core::http::authz::RequestAuthzInfo;
///
/// let info = RequestAuthzInfo::new().login_url("/login");
/// assert_eq!(info.get_login_url(), Some("/login"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct RequestAuthzInfo {
    login_url: Option<String>,
}

impl RequestAuthzInfo {
    pub fn new() -> Self {
        RequestAuthzInfo { login_url: None }
    }

    /// Redirects anonymous requests to `url` instead of answering 401.
    pub fn login_url(mut self, url: &str) -> Self {
        self.login_url = Some(url.to_string());
        self
    }

    pub fn get_login_url(&self) -> Option<&str> {
        self.login_url.as_deref()
    }
}

impl AuthzInfo<ServiceRequest> for RequestAuthzInfo {
    type Output = ServiceResponse;

    fn get_authorizable(&self, request: &ServiceRequest) -> Option<Box<dyn Authorizable>> {
        request
            .extensions()
            .get::<User>()
            .cloned()
            .map(|user| Box::new(user) as Box<dyn Authorizable>)
    }

    fn handle_auth_error(&self, request: ServiceRequest) -> ServiceResponse {
        let authenticated = request.extensions().contains::<User>();

        let response = match (&self.login_url, authenticated) {
            (_, true) => AuthError::Forbidden.error_response(),
            (Some(login_url), false) => HttpResponse::Found()
                .append_header((http::header::LOCATION, login_url.as_str()))
                .finish(),
            (None, false) => AuthError::Unauthorized.error_response(),
        };
        request.into_response(response)
    }
}
