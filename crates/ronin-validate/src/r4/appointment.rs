use ronin_model::Appointment;

use crate::issue::{Issue, PrimitiveKind};
use crate::path::ElementPath;
use crate::primitives::check_primitive;
use crate::r4::{ResourceValidator, check_reference_type, check_value_set, validate_domain_resource};
use crate::validation::Validation;

const STATUS: &[&str] = &[
    "proposed",
    "pending",
    "booked",
    "arrived",
    "fulfilled",
    "cancelled",
    "noshow",
    "entered-in-error",
    "checked-in",
    "waitlist",
];
const PARTICIPANT_STATUS: &[&str] = &["accepted", "declined", "tentative", "needs-action"];
const PARTICIPANT_REQUIRED: &[&str] = &["required", "optional", "information-only"];
const PARTICIPANT_ACTOR: &[&str] = &[
    "Patient",
    "Practitioner",
    "PractitionerRole",
    "RelatedPerson",
    "Device",
    "HealthcareService",
    "Location",
];
/// Statuses allowed to omit `start` and `end` (app-3).
const UNSCHEDULED_STATUS: &[&str] = &["proposed", "cancelled", "waitlist"];

/// Base R4 rules for Appointment.
#[derive(Debug, Default, Clone, Copy)]
pub struct R4AppointmentValidator;

impl ResourceValidator<Appointment> for R4AppointmentValidator {
    fn validate(&self, appointment: &Appointment, parent: &ElementPath) -> Validation {
        let mut validation = Validation::new();
        validate_domain_resource(appointment, parent, &mut validation);

        let status_path = parent.field("status");
        let status = validation.require(appointment.status.as_deref(), &status_path);
        check_value_set(&mut validation, status, STATUS, &status_path);

        check_primitive(
            &mut validation,
            PrimitiveKind::Instant,
            appointment.start.as_deref(),
            &parent.field("start"),
        );
        check_primitive(
            &mut validation,
            PrimitiveKind::Instant,
            appointment.end.as_deref(),
            &parent.field("end"),
        );
        check_primitive(
            &mut validation,
            PrimitiveKind::DateTime,
            appointment.created.as_deref(),
            &parent.field("created"),
        );

        validation.check_true(
            appointment.start.is_some() == appointment.end.is_some(),
            Issue::Invariant {
                key: "app-2".to_string(),
                description: "Either start and end are specified, or neither".to_string(),
            },
            parent,
        );
        let scheduled = appointment.start.is_some() && appointment.end.is_some();
        validation.check_true(
            scheduled || status.is_some_and(|status| UNSCHEDULED_STATUS.contains(&status)),
            Issue::Invariant {
                key: "app-3".to_string(),
                description:
                    "Only proposed or cancelled appointments can be missing start/end dates"
                        .to_string(),
            },
            parent,
        );

        let participant_path = parent.field("participant");
        validation.check_true(
            !appointment.participant.is_empty(),
            Issue::RequiredField {
                field: "participant".to_string(),
            },
            &participant_path,
        );
        for (index, participant) in appointment.participant.iter().enumerate() {
            let path = participant_path.index(index);
            let status_path = path.field("status");
            let status = validation.require(participant.status.as_deref(), &status_path);
            check_value_set(&mut validation, status, PARTICIPANT_STATUS, &status_path);
            check_value_set(
                &mut validation,
                participant.required.as_deref(),
                PARTICIPANT_REQUIRED,
                &path.field("required"),
            );
            validation.check_true(
                participant.actor.is_some() || !participant.type_.is_empty(),
                Issue::Invariant {
                    key: "app-1".to_string(),
                    description:
                        "Either the type or actor on the participant SHALL be specified"
                            .to_string(),
                },
                &path,
            );
            check_reference_type(
                &mut validation,
                participant.actor.as_ref(),
                PARTICIPANT_ACTOR,
                &path.field("actor"),
            );
        }

        validation
    }
}

#[cfg(test)]
mod tests {
    use ronin_model::{AppointmentParticipant, Reference};

    use super::*;

    fn booked() -> Appointment {
        Appointment {
            id: Some("12345".to_string()),
            status: Some("booked".to_string()),
            start: Some("2023-01-02T09:00:00Z".to_string()),
            end: Some("2023-01-02T09:30:00Z".to_string()),
            participant: vec![AppointmentParticipant {
                actor: Some(Reference::literal("Patient/1")),
                status: Some("accepted".to_string()),
                ..AppointmentParticipant::default()
            }],
            ..Appointment::default()
        }
    }

    #[test]
    fn booked_appointment_is_valid() {
        let validation =
            R4AppointmentValidator.validate(&booked(), &ElementPath::root("Appointment"));
        assert!(validation.is_empty(), "{validation:?}");
    }

    #[test]
    fn booked_appointment_needs_start_and_end() {
        let appointment = Appointment {
            start: None,
            end: None,
            ..booked()
        };
        let validation =
            R4AppointmentValidator.validate(&appointment, &ElementPath::root("Appointment"));
        assert_eq!(validation.codes(), vec!["R4_INV"]);
        assert_eq!(
            validation.issues()[0].to_string(),
            "ERROR R4_INV: FHIR invariant app-3 violated: Only proposed or cancelled appointments can be missing start/end dates @ Appointment"
        );
    }

    #[test]
    fn participant_rules() {
        let appointment = Appointment {
            participant: vec![AppointmentParticipant {
                status: Some("maybe".to_string()),
                actor: Some(Reference::literal("Organization/1")),
                ..AppointmentParticipant::default()
            }],
            ..booked()
        };
        let validation =
            R4AppointmentValidator.validate(&appointment, &ElementPath::root("Appointment"));
        let rendered: Vec<String> = validation.issues().iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec![
                "ERROR INV_VALUE_SET: 'maybe' is outside of required value set @ Appointment.participant[0].status",
                "ERROR INV_REF_TYPE: reference can only be one of the following: Patient, Practitioner, PractitionerRole, RelatedPerson, Device, HealthcareService, Location @ Appointment.participant[0].actor",
            ]
        );
    }
}
