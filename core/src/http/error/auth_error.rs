use actix_web::{error, http::StatusCode, HttpResponse, HttpResponseBuilder};
use derive_more::{Display, Error};

/// Denial outcome rendered for the client.
#[derive(Debug, Display, Error)]
pub enum AuthError {
    #[display("forbidden")]
    Forbidden,
    #[display("unauthorized")]
    Unauthorized,
}

impl error::ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match *self {
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::Unauthorized => StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponseBuilder::new(self.status_code()).body(self.to_string())
    }
}

/// Fault raised by a collaborator of the interceptor or by a rejected
/// configuration. Never used for a denial.
#[derive(Debug, Display, Error, PartialEq, Eq)]
pub enum AuthzError {
    /// The router has no URL pattern for the resource method.
    #[display("no route mapped for {resource}::{method}")]
    UnmappedResource {
        #[error(not(source))]
        resource: String,
        #[error(not(source))]
        method: String,
    },
    #[display("invalid resource hierarchy: {message}")]
    InvalidHierarchy {
        #[error(not(source))]
        message: String,
    },
    #[display("invalid authorization configuration: {message}")]
    InvalidConfiguration {
        #[error(not(source))]
        message: String,
    },
}

impl error::ResponseError for AuthzError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponseBuilder::new(self.status_code()).body("internal server error")
    }
}
