//! FHIR R4 model subset and Ronin tenant context.
//!
//! The types here mirror FHIR JSON closely: every element is optional and
//! choice elements (`value[x]`, `effective[x]`, ...) are enums flattened
//! into their parent so they serialize under their typed key.

pub mod datatypes;
pub mod error;
pub mod resource;
pub mod resources;
pub mod ronin;
pub mod tenant;
pub mod walk;

pub use datatypes::{
    Address, Annotation, AnnotationAuthor, CodeableConcept, Coding, ContactPoint, Effective,
    Extension, ExtensionValue, HumanName, Identifier, Meta, Narrative, Period, Quantity, Reference,
};
pub use error::{ModelError, Result};
pub use resource::{DomainResource, Resource, ResourceType};
pub use resources::{
    Appointment, AppointmentParticipant, Condition, ConditionAbatement, ConditionEvidence,
    ConditionOnset, ConditionStage, DiagnosticReport, DiagnosticReportMedia, Dosage, DosageDose,
    Location, LocationHoursOfOperation, LocationPosition, MedicationStatement, Observation,
    ObservationComponent, ObservationReferenceRange, ObservationValue, Practitioner,
    PractitionerQualification, StatementMedication,
};
pub use tenant::{Tenant, TenantMnemonic};
pub use walk::{ElementVisitor, Walk};
