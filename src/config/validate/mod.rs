//! Optimizer spec validation
//!
//! Validates optimizer specifications before an optimizer is built.

mod error;
mod validator;

#[cfg(test)]
mod proptests;
#[cfg(test)]
mod tests;

pub use error::ValidationError;
pub use validator::validate_spec;
