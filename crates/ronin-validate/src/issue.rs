//! Validation issue types.
//!
//! Each `Issue` variant carries only the data its message needs and maps to
//! a stable code. Codes are a contract with downstream consumers: once
//! published a code keeps its meaning.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::primitives::MAX_ID_LENGTH;

/// Issue severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Fails `alert_if_errors`
    Error,
    /// Reported but never fatal
    Warning,
}

impl Severity {
    /// Parse severity from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "error" => Some(Self::Error),
            "warning" => Some(Self::Warning),
            _ => None,
        }
    }

    /// Label used in rendered failures.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warning => "WARNING",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// FHIR primitive types with format checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveKind {
    Id,
    DateTime,
    Date,
    Instant,
    Uri,
}

impl PrimitiveKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::DateTime => "dateTime",
            Self::Date => "date",
            Self::Instant => "instant",
            Self::Uri => "uri",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Validation issue - each variant carries only its needed data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Issue {
    // FHIR R4 structural checks
    /// A required element is absent
    RequiredField { field: String },
    /// A code bound to a required value set is not in it
    ValueSet { value: String },
    /// A primitive does not match its FHIR format
    InvalidPrimitive { value: String, kind: PrimitiveKind },
    /// A FHIR invariant does not hold
    Invariant { key: String, description: String },
    /// A reference points at a resource type the element does not allow
    ReferenceType { allowed: Vec<String> },

    // Ronin checks shared by every profile
    /// No tenant identifier
    TenantIdentifierRequired,
    /// No original FHIR id identifier
    FhirIdentifierRequired,
    /// Source id too long to carry the tenant prefix
    LocalizedIdTooLong { id: String },
    /// No registered profile accepts the resource
    NoQualifyingProfile { resource_type: String },

    // Profile-specific checks
    /// Vital sign observation without the vital-signs category
    VitalSignCategory,
    /// Vital sign quantity not expressed in UCUM
    VitalSignUnitSystem,
    /// Blood pressure observation missing a component
    BloodPressureComponent { code: String },
    /// Laboratory observation without the laboratory category
    LaboratoryCategory,
    /// Encounter diagnosis without its category
    EncounterDiagnosisCategory,
    /// Problem list condition without its category
    ProblemsAndHealthConcernsCategory,
    /// Laboratory report without the LAB category
    LaboratoryReportCategory,
    /// Concept map has no target for the source code
    UnmappedConcept { element: String, source: String },
}

impl Issue {
    /// Stable code consumers key off.
    pub fn code(&self) -> &'static str {
        match self {
            Issue::RequiredField { .. } => "REQ_FIELD",
            Issue::ValueSet { .. } => "INV_VALUE_SET",
            Issue::InvalidPrimitive { .. } => "R4_INV_PRIM",
            Issue::Invariant { .. } => "R4_INV",
            Issue::ReferenceType { .. } => "INV_REF_TYPE",
            Issue::TenantIdentifierRequired => "RONIN_TNNT_ID_001",
            Issue::FhirIdentifierRequired => "RONIN_FHIR_ID_001",
            Issue::LocalizedIdTooLong { .. } => "RONIN_TNNT_ID_002",
            Issue::NoQualifyingProfile { .. } => "RONIN_PROFILE_001",
            Issue::VitalSignCategory => "RONIN_OBS_001",
            Issue::VitalSignUnitSystem => "RONIN_OBS_002",
            Issue::BloodPressureComponent { .. } => "RONIN_OBS_003",
            Issue::LaboratoryCategory => "RONIN_LAB_OBS_001",
            Issue::EncounterDiagnosisCategory => "RONIN_CND_001",
            Issue::ProblemsAndHealthConcernsCategory => "RONIN_CND_002",
            Issue::LaboratoryReportCategory => "RONIN_DXRPT_001",
            Issue::UnmappedConcept { .. } => "RONIN_CONMAP_001",
        }
    }

    /// Default severity.
    pub fn default_severity(&self) -> Severity {
        match self {
            Issue::VitalSignUnitSystem => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Format message with issue-specific data.
    pub fn message(&self) -> String {
        match self {
            Issue::RequiredField { field } => format!("{field} is a required element"),
            Issue::ValueSet { value } => format!("'{value}' is outside of required value set"),
            Issue::InvalidPrimitive { value, kind } => format!("'{value}' is not a valid {kind}"),
            Issue::Invariant { key, description } => {
                format!("FHIR invariant {key} violated: {description}")
            }
            Issue::ReferenceType { allowed } => format!(
                "reference can only be one of the following: {}",
                allowed.join(", ")
            ),
            Issue::TenantIdentifierRequired => "Tenant identifier is required".to_string(),
            Issue::FhirIdentifierRequired => "FHIR identifier is required".to_string(),
            Issue::LocalizedIdTooLong { id } => {
                format!("Tenant-scoped id '{id}' exceeds {MAX_ID_LENGTH} characters")
            }
            Issue::NoQualifyingProfile { resource_type } => {
                format!("No qualifying profile found for {resource_type}")
            }
            Issue::VitalSignCategory => {
                "Must match this system|code: http://terminology.hl7.org/CodeSystem/observation-category|vital-signs"
                    .to_string()
            }
            Issue::VitalSignUnitSystem => {
                "Quantity system must be http://unitsofmeasure.org".to_string()
            }
            Issue::BloodPressureComponent { code } => {
                format!("Blood pressure component {code} is required")
            }
            Issue::LaboratoryCategory => {
                "Must match this system|code: http://terminology.hl7.org/CodeSystem/observation-category|laboratory"
                    .to_string()
            }
            Issue::EncounterDiagnosisCategory => {
                "Must match this system|code: http://terminology.hl7.org/CodeSystem/condition-category|encounter-diagnosis"
                    .to_string()
            }
            Issue::ProblemsAndHealthConcernsCategory => {
                "Must match one of these system|code pairs: http://terminology.hl7.org/CodeSystem/condition-category|problem-list-item, http://hl7.org/fhir/us/core/CodeSystem/condition-category|health-concern"
                    .to_string()
            }
            Issue::LaboratoryReportCategory => {
                "Must match this system|code: http://terminology.hl7.org/CodeSystem/v2-0074|LAB"
                    .to_string()
            }
            Issue::UnmappedConcept { element, source } => {
                format!(
                    "Tenant source {element} '{source}' has no target defined in the concept map"
                )
            }
        }
    }
}
