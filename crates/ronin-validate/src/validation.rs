//! Ordered aggregation of validation issues.

use std::fmt;

use serde::Serialize;

use crate::failure::ValidationFailure;
use crate::issue::{Issue, Severity};
use crate::path::ElementPath;

/// One issue at one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub issue: Issue,
    pub location: ElementPath,
}

impl ValidationIssue {
    /// Issue at `location` with its default severity.
    pub fn new(issue: Issue, location: ElementPath) -> Self {
        Self {
            severity: issue.default_severity(),
            issue,
            location,
        }
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn code(&self) -> &'static str {
        self.issue.code()
    }

    pub fn message(&self) -> String {
        self.issue.message()
    }
}

impl fmt::Display for ValidationIssue {
    /// `SEVERITY CODE: message @ location`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {} @ {}",
            self.severity,
            self.code(),
            self.message(),
            self.location
        )
    }
}

/// Issues collected by one or more validators, in insertion order.
///
/// Checks never short-circuit: every rule runs and records its own issue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Validation {
    issues: Vec<ValidationIssue>,
}

impl Validation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validation holding a single issue.
    pub fn from_issue(issue: Issue, location: ElementPath) -> Self {
        let mut validation = Self::new();
        validation.push(issue, location);
        validation
    }

    pub fn push(&mut self, issue: Issue, location: ElementPath) {
        self.issues.push(ValidationIssue::new(issue, location));
    }

    pub fn push_issue(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// Records `issue` when `value` is absent. The value is passed through unchanged.
    pub fn check_not_null<T>(
        &mut self,
        value: Option<T>,
        issue: Issue,
        location: &ElementPath,
    ) -> Option<T> {
        if value.is_none() {
            self.push(issue, location.clone());
        }
        value
    }

    /// [`check_not_null`](Self::check_not_null) with a `REQ_FIELD` issue named after `location`.
    pub fn require<T>(&mut self, value: Option<T>, location: &ElementPath) -> Option<T> {
        let issue = Issue::RequiredField {
            field: location.element_name().to_string(),
        };
        self.check_not_null(value, issue, location)
    }

    /// Records `issue` unless `condition` holds.
    pub fn check_true(&mut self, condition: bool, issue: Issue, location: &ElementPath) -> bool {
        if !condition {
            self.push(issue, location.clone());
        }
        condition
    }

    /// This validation's issues followed by `other`'s.
    #[must_use]
    pub fn merge(mut self, other: Validation) -> Self {
        self.merge_from(other);
        self
    }

    /// Appends `other`'s issues in place.
    pub fn merge_from(&mut self, other: Validation) {
        self.issues.extend(other.issues);
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<ValidationIssue> {
        self.issues
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.issues
            .iter()
            .any(|issue| issue.severity == Severity::Error)
    }

    /// Issue codes in order, for quick assertions and logging.
    pub fn codes(&self) -> Vec<&'static str> {
        self.issues.iter().map(ValidationIssue::code).collect()
    }

    /// Fails with every collected issue when any of them is an error.
    pub fn alert_if_errors(&self) -> Result<(), ValidationFailure> {
        if self.has_errors() {
            return Err(ValidationFailure::new(self.issues.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(name: &str) -> ElementPath {
        ElementPath::root("Location").field(name)
    }

    #[test]
    fn merge_preserves_order_without_dedup() {
        let first = Validation::from_issue(Issue::TenantIdentifierRequired, path("identifier"));
        let mut second = Validation::new();
        second.push(Issue::TenantIdentifierRequired, path("identifier"));
        second.push(Issue::FhirIdentifierRequired, path("identifier"));

        let merged = first.merge(second);
        assert_eq!(
            merged.codes(),
            vec!["RONIN_TNNT_ID_001", "RONIN_TNNT_ID_001", "RONIN_FHIR_ID_001"]
        );
    }

    #[test]
    fn check_not_null_passes_value_through() {
        let mut validation = Validation::new();
        let name = Some("Clinic");
        assert_eq!(validation.require(name, &path("name")), Some("Clinic"));
        assert!(validation.is_empty());

        assert_eq!(validation.require(None::<&str>, &path("name")), None);
        assert_eq!(
            validation.issues()[0].to_string(),
            "ERROR REQ_FIELD: name is a required element @ Location.name"
        );
    }

    #[test]
    fn warnings_alone_do_not_alert() {
        let validation = Validation::from_issue(Issue::VitalSignUnitSystem, path("valueQuantity"));
        assert!(!validation.is_empty());
        assert!(!validation.has_errors());
        assert!(validation.alert_if_errors().is_ok());
    }

    #[test]
    fn check_true_records_only_failures() {
        let mut validation = Validation::new();
        assert!(validation.check_true(true, Issue::LaboratoryCategory, &path("category")));
        assert!(!validation.check_true(false, Issue::LaboratoryCategory, &path("category")));
        assert_eq!(validation.codes(), vec!["RONIN_LAB_OBS_001"]);
    }
}
