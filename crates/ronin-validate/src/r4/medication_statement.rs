use ronin_model::{Effective, MedicationStatement};

use crate::issue::PrimitiveKind;
use crate::path::ElementPath;
use crate::primitives::check_primitive;
use crate::r4::{ResourceValidator, check_reference_type, check_value_set, validate_domain_resource};
use crate::validation::Validation;

const STATUS: &[&str] = &[
    "active",
    "completed",
    "entered-in-error",
    "intended",
    "stopped",
    "on-hold",
    "unknown",
    "not-taken",
];
const SUBJECT: &[&str] = &["Patient", "Group"];

/// Base R4 rules for MedicationStatement.
#[derive(Debug, Default, Clone, Copy)]
pub struct R4MedicationStatementValidator;

impl ResourceValidator<MedicationStatement> for R4MedicationStatementValidator {
    fn validate(&self, statement: &MedicationStatement, parent: &ElementPath) -> Validation {
        let mut validation = Validation::new();
        validate_domain_resource(statement, parent, &mut validation);

        let status_path = parent.field("status");
        let status = validation.require(statement.status.as_deref(), &status_path);
        check_value_set(&mut validation, status, STATUS, &status_path);

        validation.require(statement.medication.as_ref(), &parent.field("medication"));

        let subject_path = parent.field("subject");
        let subject = validation.require(statement.subject.as_ref(), &subject_path);
        check_reference_type(&mut validation, subject, SUBJECT, &subject_path);

        if let Some(Effective::DateTime(effective)) = &statement.effective {
            check_primitive(
                &mut validation,
                PrimitiveKind::DateTime,
                Some(effective),
                &parent.field("effectiveDateTime"),
            );
        }
        check_primitive(
            &mut validation,
            PrimitiveKind::DateTime,
            statement.date_asserted.as_deref(),
            &parent.field("dateAsserted"),
        );

        validation
    }
}
