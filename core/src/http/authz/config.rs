//! Identity seam of the Actix middleware.
//!
//! Who the current actor is belongs to the authentication layer. The
//! middleware only needs a way to ask for it.

use actix_web::dev::ServiceRequest;

use crate::http::authz::user::User;

/// Trait for extracting the actor from an HTTP request.
///
/// Returns an owned `User` so it can be stored in request extensions, where
/// [`RequestAuthzInfo`](crate::http::authz::RequestAuthzInfo) and the
/// handlers find it.
pub trait Authenticator {
    /// Attempts to authenticate the request and returns the user if successful.
    fn get_user(&self, req: &ServiceRequest) -> Option<User>;
}
