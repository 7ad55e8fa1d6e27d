pub mod authz;
pub mod error;
