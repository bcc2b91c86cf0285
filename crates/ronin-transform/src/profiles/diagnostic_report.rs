use ronin_model::ronin::{DIAGNOSTIC_SERVICE_SECTION_SYSTEM, profile_url};
use ronin_model::DiagnosticReport;
use ronin_validate::r4::{R4DiagnosticReportValidator, check_reference_type};
use ronin_validate::{ElementPath, Issue, ResourceValidator, Validation};

use crate::profile::Profile;

fn is_laboratory(report: &DiagnosticReport) -> bool {
    report
        .category
        .iter()
        .any(|category| category.has_coding(DIAGNOSTIC_SERVICE_SECTION_SYSTEM, "LAB"))
}

fn validate_subject(report: &DiagnosticReport, parent: &ElementPath, validation: &mut Validation) {
    let subject_path = parent.field("subject");
    let subject = validation.require(report.subject.as_ref(), &subject_path);
    check_reference_type(validation, subject, &["Patient"], &subject_path);
}

/// Ronin laboratory report: qualifies on the `LAB` service section category.
#[derive(Debug, Default, Clone, Copy)]
pub struct RoninDiagnosticReportLaboratory;

impl Profile<DiagnosticReport> for RoninDiagnosticReportLaboratory {
    fn name(&self) -> &'static str {
        "RoninDiagnosticReportLaboratory"
    }

    fn profile_url(&self) -> &'static str {
        profile_url::DIAGNOSTIC_REPORT_LABORATORY
    }

    fn qualifies(&self, report: &DiagnosticReport) -> bool {
        is_laboratory(report)
    }

    fn standard_validator(&self) -> &dyn ResourceValidator<DiagnosticReport> {
        &R4DiagnosticReportValidator
    }

    fn validate_profile(
        &self,
        report: &DiagnosticReport,
        parent: &ElementPath,
        validation: &mut Validation,
    ) {
        validate_subject(report, parent, validation);
        validation.check_true(
            is_laboratory(report),
            Issue::LaboratoryReportCategory,
            &parent.field("category"),
        );
    }
}

/// Ronin note exchange report, the default for diagnostic reports.
#[derive(Debug, Default, Clone, Copy)]
pub struct RoninDiagnosticReportNoteExchange;

impl Profile<DiagnosticReport> for RoninDiagnosticReportNoteExchange {
    fn name(&self) -> &'static str {
        "RoninDiagnosticReportNoteExchange"
    }

    fn profile_url(&self) -> &'static str {
        profile_url::DIAGNOSTIC_REPORT_NOTE_EXCHANGE
    }

    fn qualifies(&self, _report: &DiagnosticReport) -> bool {
        true
    }

    fn standard_validator(&self) -> &dyn ResourceValidator<DiagnosticReport> {
        &R4DiagnosticReportValidator
    }

    fn validate_profile(
        &self,
        report: &DiagnosticReport,
        parent: &ElementPath,
        validation: &mut Validation,
    ) {
        validate_subject(report, parent, validation);
    }
}
