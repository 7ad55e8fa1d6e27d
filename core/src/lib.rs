//! Role-based request authorization for Actix Web.
//!
//! Every request resolved to a resource method goes through the [`Authz`]
//! interceptor: methods and types carrying a bypass marker are skipped,
//! everything else is checked against a role → URL pattern → HTTP verb
//! whitelist before the handler runs.
//!
//! [`Authz`]: http::authz::Authz

pub mod http;
