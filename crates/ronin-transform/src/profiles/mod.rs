//! Concrete Ronin profiles.

mod appointment;
mod condition;
mod diagnostic_report;
mod location;
mod medication_statement;
mod observation;
mod practitioner;

pub use appointment::RoninAppointment;
pub use condition::{RoninConditionEncounterDiagnosis, RoninConditionProblemsAndHealthConcerns};
pub use diagnostic_report::{RoninDiagnosticReportLaboratory, RoninDiagnosticReportNoteExchange};
pub use location::RoninLocation;
pub use medication_statement::RoninMedicationStatement;
pub use observation::{
    RoninBloodPressure, RoninBodyHeight, RoninBodyWeight, RoninLaboratoryResult, RoninObservation,
};
pub use practitioner::RoninPractitioner;
