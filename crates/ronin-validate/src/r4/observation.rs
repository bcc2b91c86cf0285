use ronin_model::{Effective, Observation};

use crate::issue::{Issue, PrimitiveKind};
use crate::path::ElementPath;
use crate::primitives::check_primitive;
use crate::r4::{ResourceValidator, check_reference_type, check_value_set, validate_domain_resource};
use crate::validation::Validation;

const STATUS: &[&str] = &[
    "registered",
    "preliminary",
    "final",
    "amended",
    "corrected",
    "cancelled",
    "entered-in-error",
    "unknown",
];
const SUBJECT: &[&str] = &["Patient", "Group", "Device", "Location"];

/// Base R4 rules for Observation.
#[derive(Debug, Default, Clone, Copy)]
pub struct R4ObservationValidator;

impl ResourceValidator<Observation> for R4ObservationValidator {
    fn validate(&self, observation: &Observation, parent: &ElementPath) -> Validation {
        let mut validation = Validation::new();
        validate_domain_resource(observation, parent, &mut validation);

        let status_path = parent.field("status");
        let status = validation.require(observation.status.as_deref(), &status_path);
        check_value_set(&mut validation, status, STATUS, &status_path);

        let code = validation.require(observation.code.as_ref(), &parent.field("code"));
        check_reference_type(
            &mut validation,
            observation.subject.as_ref(),
            SUBJECT,
            &parent.field("subject"),
        );
        check_reference_type(
            &mut validation,
            observation.encounter.as_ref(),
            &["Encounter"],
            &parent.field("encounter"),
        );

        if let Some(Effective::DateTime(effective)) = &observation.effective {
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
            observation.issued.as_deref(),
            &parent.field("issued"),
        );

        validation.check_true(
            observation.data_absent_reason.is_none() || observation.value.is_none(),
            Issue::Invariant {
                key: "obs-6".to_string(),
                description:
                    "dataAbsentReason SHALL only be present if Observation.value[x] is not present"
                        .to_string(),
            },
            parent,
        );

        let component_path = parent.field("component");
        for (index, component) in observation.component.iter().enumerate() {
            let path = component_path.index(index);
            validation.require(component.code.as_ref(), &path.field("code"));
            validation.check_true(
                component.data_absent_reason.is_none() || component.value.is_none(),
                Issue::Invariant {
                    key: "obs-6".to_string(),
                    description:
                        "dataAbsentReason SHALL only be present if Observation.value[x] is not present"
                            .to_string(),
                },
                &path,
            );
        }

        let code_repeated_in_component = code.is_some_and(|code| {
            observation
                .component
                .iter()
                .any(|component| component.code.as_ref() == Some(code))
        });
        validation.check_true(
            !(code_repeated_in_component && observation.value.is_some()),
            Issue::Invariant {
                key: "obs-7".to_string(),
                description:
                    "If Observation.code is the same as an Observation.component.code then the value element associated with the code SHALL NOT be present"
                        .to_string(),
            },
            parent,
        );

        validation
    }
}

#[cfg(test)]
mod tests {
    use ronin_model::{CodeableConcept, Coding, ObservationComponent, ObservationValue, Reference};

    use super::*;

    fn final_observation() -> Observation {
        Observation {
            status: Some("final".to_string()),
            code: Some(CodeableConcept::from_coding(Coding::new("http://loinc.org", "85354-9"))),
            subject: Some(Reference::literal("Patient/1")),
            ..Observation::default()
        }
    }

    #[test]
    fn minimal_observation_is_valid() {
        let validation = R4ObservationValidator.validate(
            &final_observation(),
            &ElementPath::root("Observation"),
        );
        assert!(validation.is_empty());
    }

    #[test]
    fn data_absent_reason_excludes_value() {
        let observation = Observation {
            value: Some(ObservationValue::String("n/a".to_string())),
            data_absent_reason: Some(CodeableConcept::default().with_text("unknown")),
            ..final_observation()
        };
        let validation =
            R4ObservationValidator.validate(&observation, &ElementPath::root("Observation"));
        assert_eq!(validation.codes(), vec!["R4_INV"]);
        assert!(validation.issues()[0].message().contains("obs-6"));
    }

    #[test]
    fn component_code_required_and_obs_7() {
        let observation = Observation {
            value: Some(ObservationValue::Integer(1)),
            component: vec![
                ObservationComponent::default(),
                ObservationComponent {
                    code: final_observation().code,
                    ..ObservationComponent::default()
                },
            ],
            ..final_observation()
        };
        let validation =
            R4ObservationValidator.validate(&observation, &ElementPath::root("Observation"));
        let rendered: Vec<String> = validation.issues().iter().map(ToString::to_string).collect();
        assert_eq!(rendered.len(), 2);
        assert_eq!(
            rendered[0],
            "ERROR REQ_FIELD: code is a required element @ Observation.component[0].code"
        );
        assert!(rendered[1].starts_with("ERROR R4_INV: FHIR invariant obs-7 violated"));
        assert!(rendered[1].ends_with("@ Observation"));
    }
}
