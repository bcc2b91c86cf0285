//! FHIR R4 resources handled by the Ronin profiles.
//!
//! Each resource carries the common `DomainResource` elements followed by
//! the resource-specific elements in FHIR declaration order.

mod appointment;
mod condition;
mod diagnostic_report;
mod location;
mod medication_statement;
mod observation;
mod practitioner;

pub use appointment::{Appointment, AppointmentParticipant};
pub use condition::{
    Condition, ConditionAbatement, ConditionEvidence, ConditionOnset, ConditionStage,
};
pub use diagnostic_report::{DiagnosticReport, DiagnosticReportMedia};
pub use location::{Location, LocationHoursOfOperation, LocationPosition};
pub use medication_statement::{Dosage, DosageDose, MedicationStatement, StatementMedication};
pub use observation::{
    Observation, ObservationComponent, ObservationReferenceRange, ObservationValue,
};
pub use practitioner::{Practitioner, PractitionerQualification};
