//! Validation for the Ronin profile pipeline.
//!
//! Validators never fail fast: they return a [`Validation`] holding every
//! issue found, each with a stable code and the path of the offending
//! element. Callers that need a hard stop use
//! [`Validation::alert_if_errors`].

pub mod failure;
pub mod issue;
pub mod path;
pub mod primitives;
pub mod r4;
pub mod validation;

pub use failure::ValidationFailure;
pub use issue::{Issue, PrimitiveKind, Severity};
pub use path::ElementPath;
pub use r4::ResourceValidator;
pub use validation::{Validation, ValidationIssue};
