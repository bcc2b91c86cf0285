use ronin_model::{Condition, ConditionAbatement, ConditionOnset};

use crate::issue::{Issue, PrimitiveKind};
use crate::path::ElementPath;
use crate::primitives::check_primitive;
use crate::r4::{ResourceValidator, check_reference_type, validate_domain_resource};
use crate::validation::Validation;

const CLINICAL_STATUS_SYSTEM: &str = "http://terminology.hl7.org/CodeSystem/condition-clinical";
const VERIFICATION_STATUS_SYSTEM: &str =
    "http://terminology.hl7.org/CodeSystem/condition-ver-status";
const SUBJECT: &[&str] = &["Patient", "Group"];

/// Base R4 rules for Condition.
#[derive(Debug, Default, Clone, Copy)]
pub struct R4ConditionValidator;

impl ResourceValidator<Condition> for R4ConditionValidator {
    fn validate(&self, condition: &Condition, parent: &ElementPath) -> Validation {
        let mut validation = Validation::new();
        validate_domain_resource(condition, parent, &mut validation);

        let subject_path = parent.field("subject");
        let subject = validation.require(condition.subject.as_ref(), &subject_path);
        check_reference_type(&mut validation, subject, SUBJECT, &subject_path);
        check_reference_type(
            &mut validation,
            condition.encounter.as_ref(),
            &["Encounter"],
            &parent.field("encounter"),
        );

        let entered_in_error = condition
            .verification_status
            .as_ref()
            .is_some_and(|status| {
                status.has_coding(VERIFICATION_STATUS_SYSTEM, "entered-in-error")
            });
        validation.check_true(
            !(entered_in_error && condition.clinical_status.is_some()),
            Issue::Invariant {
                key: "con-5".to_string(),
                description:
                    "Condition.clinicalStatus SHALL NOT be present if verification Status is entered-in-error"
                        .to_string(),
            },
            parent,
        );
        let resolved = condition.clinical_status.as_ref().is_some_and(|status| {
            status.has_any_code(CLINICAL_STATUS_SYSTEM, &["inactive", "resolved", "remission"])
        });
        validation.check_true(
            condition.abatement.is_none() || resolved,
            Issue::Invariant {
                key: "con-4".to_string(),
                description:
                    "If condition is abated, then clinicalStatus must be either inactive, resolved, or remission"
                        .to_string(),
            },
            parent,
        );

        if let Some(ConditionOnset::DateTime(onset)) = &condition.onset {
            check_primitive(
                &mut validation,
                PrimitiveKind::DateTime,
                Some(onset),
                &parent.field("onsetDateTime"),
            );
        }
        if let Some(ConditionAbatement::DateTime(abatement)) = &condition.abatement {
            check_primitive(
                &mut validation,
                PrimitiveKind::DateTime,
                Some(abatement),
                &parent.field("abatementDateTime"),
            );
        }
        check_primitive(
            &mut validation,
            PrimitiveKind::DateTime,
            condition.recorded_date.as_deref(),
            &parent.field("recordedDate"),
        );

        validation
    }
}

#[cfg(test)]
mod tests {
    use ronin_model::{CodeableConcept, Coding, Reference};

    use super::*;

    #[test]
    fn subject_is_required() {
        let validation =
            R4ConditionValidator.validate(&Condition::default(), &ElementPath::root("Condition"));
        assert_eq!(
            validation.issues()[0].to_string(),
            "ERROR REQ_FIELD: subject is a required element @ Condition.subject"
        );
    }

    #[test]
    fn entered_in_error_has_no_clinical_status() {
        let condition = Condition {
            subject: Some(Reference::literal("Patient/1")),
            clinical_status: Some(CodeableConcept::from_coding(Coding::new(
                CLINICAL_STATUS_SYSTEM,
                "active",
            ))),
            verification_status: Some(CodeableConcept::from_coding(Coding::new(
                VERIFICATION_STATUS_SYSTEM,
                "entered-in-error",
            ))),
            ..Condition::default()
        };
        let validation = R4ConditionValidator.validate(&condition, &ElementPath::root("Condition"));
        assert_eq!(validation.codes(), vec!["R4_INV"]);
        assert!(validation.issues()[0].message().contains("con-5"));
    }

    #[test]
    fn abated_condition_must_be_resolved() {
        let condition = Condition {
            subject: Some(Reference::literal("Patient/1")),
            abatement: Some(ConditionAbatement::DateTime("2020-02-30".to_string())),
            ..Condition::default()
        };
        let validation = R4ConditionValidator.validate(&condition, &ElementPath::root("Condition"));
        let rendered: Vec<String> = validation.issues().iter().map(ToString::to_string).collect();
        assert_eq!(rendered.len(), 2);
        assert!(rendered[0].contains("con-4"));
        assert_eq!(
            rendered[1],
            "ERROR R4_INV_PRIM: '2020-02-30' is not a valid dateTime @ Condition.abatementDateTime"
        );
    }
}
