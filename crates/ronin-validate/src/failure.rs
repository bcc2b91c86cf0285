//! The error raised when a caller enforces a validation.

use thiserror::Error;

use crate::validation::ValidationIssue;

/// Every issue of a validation that contained at least one error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Encountered validation error(s):\n{}", render(.issues))]
pub struct ValidationFailure {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationFailure {
    pub fn new(issues: Vec<ValidationIssue>) -> Self {
        Self { issues }
    }
}

fn render(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
