use ronin_model::{DiagnosticReport, Effective};

use crate::issue::PrimitiveKind;
use crate::path::ElementPath;
use crate::primitives::check_primitive;
use crate::r4::{ResourceValidator, check_reference_type, check_value_set, validate_domain_resource};
use crate::validation::Validation;

const STATUS: &[&str] = &[
    "registered",
    "partial",
    "preliminary",
    "final",
    "amended",
    "corrected",
    "appended",
    "cancelled",
    "entered-in-error",
    "unknown",
];
const SUBJECT: &[&str] = &["Patient", "Group", "Device", "Location"];

/// Base R4 rules for DiagnosticReport.
#[derive(Debug, Default, Clone, Copy)]
pub struct R4DiagnosticReportValidator;

impl ResourceValidator<DiagnosticReport> for R4DiagnosticReportValidator {
    fn validate(&self, report: &DiagnosticReport, parent: &ElementPath) -> Validation {
        let mut validation = Validation::new();
        validate_domain_resource(report, parent, &mut validation);

        let status_path = parent.field("status");
        let status = validation.require(report.status.as_deref(), &status_path);
        check_value_set(&mut validation, status, STATUS, &status_path);

        validation.require(report.code.as_ref(), &parent.field("code"));
        check_reference_type(
            &mut validation,
            report.subject.as_ref(),
            SUBJECT,
            &parent.field("subject"),
        );

        if let Some(Effective::DateTime(effective)) = &report.effective {
            check_primitive(
                &mut validation,
                PrimitiveKind::DateTime,
                Some(effective),
                &parent.field("effectiveDateTime"),
            );
        }
        check_primitive(
            &mut validation,
            PrimitiveKind::Instant,
            report.issued.as_deref(),
            &parent.field("issued"),
        );

        validation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_and_code_are_required() {
        let validation =
            R4DiagnosticReportValidator.validate(
                &DiagnosticReport::default(),
                &ElementPath::root("DiagnosticReport"),
            );
        let rendered: Vec<String> = validation.issues().iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec![
                "ERROR REQ_FIELD: status is a required element @ DiagnosticReport.status",
                "ERROR REQ_FIELD: code is a required element @ DiagnosticReport.code",
            ]
        );
    }

    #[test]
    fn status_is_bound_to_value_set() {
        let report = DiagnosticReport {
            status: Some("done".to_string()),
            code: Some(Default::default()),
            ..DiagnosticReport::default()
        };
        let validation =
            R4DiagnosticReportValidator.validate(&report, &ElementPath::root("DiagnosticReport"));
        assert_eq!(validation.codes(), vec!["INV_VALUE_SET"]);
    }
}
