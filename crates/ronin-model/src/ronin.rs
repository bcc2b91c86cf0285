//! Ronin code systems, identifier types, and canonical profile URLs.

use crate::datatypes::{CodeableConcept, Coding};

/// Identifier system carrying the owning tenant's mnemonic.
pub const RONIN_TENANT_SYSTEM: &str = "http://projectronin.io/id/tenantId";
/// Identifier system carrying the resource id as it was in the source EHR.
pub const RONIN_FHIR_ID_SYSTEM: &str = "http://projectronin.io/id/fhirId";
/// Code system for Ronin identifier types.
pub const RONIN_ID_TYPE_SYSTEM: &str = "http://projectronin.io/fhir/CodeSystem/RoninIdentifierType";

pub const RONIN_TENANT_ID_TYPE_CODE: &str = "TID";
pub const RONIN_FHIR_ID_TYPE_CODE: &str = "FHIR ID";

pub const LOINC_SYSTEM: &str = "http://loinc.org";
pub const SNOMED_SYSTEM: &str = "http://snomed.info/sct";
pub const UCUM_SYSTEM: &str = "http://unitsofmeasure.org";
pub const OBSERVATION_CATEGORY_SYSTEM: &str =
    "http://terminology.hl7.org/CodeSystem/observation-category";
pub const CONDITION_CATEGORY_SYSTEM: &str =
    "http://terminology.hl7.org/CodeSystem/condition-category";
pub const US_CORE_CONDITION_CATEGORY_SYSTEM: &str =
    "http://hl7.org/fhir/us/core/CodeSystem/condition-category";
pub const DIAGNOSTIC_SERVICE_SECTION_SYSTEM: &str =
    "http://terminology.hl7.org/CodeSystem/v2-0074";

/// Extension holding the tenant's original `DiagnosticReport.code` after concept mapping.
pub const TENANT_SOURCE_DIAGNOSTIC_REPORT_CODE_EXTENSION: &str =
    "http://projectronin.io/fhir/StructureDefinition/Extension/tenant-sourceDiagnosticReportCode";

/// Canonical profile URLs for every Ronin profile.
pub mod profile_url {
    const BASE: &str = "http://projectronin.io/fhir/StructureDefinition";

    macro_rules! profile {
        ($name:ident, $slug:literal) => {
            pub const $name: &str = concat!(
                "http://projectronin.io/fhir/StructureDefinition/",
                $slug
            );
        };
    }

    profile!(APPOINTMENT, "ronin-appointment");
    profile!(LOCATION, "ronin-location");
    profile!(PRACTITIONER, "ronin-practitioner");
    profile!(MEDICATION_STATEMENT, "ronin-medicationStatement");
    profile!(OBSERVATION, "ronin-observation");
    profile!(OBSERVATION_BODY_HEIGHT, "ronin-observationBodyHeight");
    profile!(OBSERVATION_BODY_WEIGHT, "ronin-observationBodyWeight");
    profile!(OBSERVATION_BLOOD_PRESSURE, "ronin-observationBloodPressure");
    profile!(OBSERVATION_LABORATORY_RESULT, "ronin-observationLaboratoryResult");
    profile!(CONDITION_ENCOUNTER_DIAGNOSIS, "ronin-conditionEncounterDiagnosis");
    profile!(
        CONDITION_PROBLEMS_HEALTH_CONCERNS,
        "ronin-conditionProblemsHealthConcerns"
    );
    profile!(DIAGNOSTIC_REPORT_LABORATORY, "ronin-diagnosticReportLaboratory");
    profile!(DIAGNOSTIC_REPORT_NOTE_EXCHANGE, "ronin-diagnosticReportNoteExchange");

    /// True when `url` is one of the Ronin canonical profiles.
    pub fn is_ronin_profile(url: &str) -> bool {
        url.strip_prefix(BASE)
            .is_some_and(|rest| rest.starts_with("/ronin-"))
    }
}

/// Identifier type marking the tenant identifier.
pub fn tenant_identifier_type() -> CodeableConcept {
    CodeableConcept::from_coding(
        Coding::new(RONIN_ID_TYPE_SYSTEM, RONIN_TENANT_ID_TYPE_CODE)
            .with_display("Ronin-specified Tenant Identifier"),
    )
    .with_text("Tenant ID")
}

/// Identifier type marking the original FHIR id.
pub fn fhir_id_identifier_type() -> CodeableConcept {
    CodeableConcept::from_coding(
        Coding::new(RONIN_ID_TYPE_SYSTEM, RONIN_FHIR_ID_TYPE_CODE).with_display("FHIR Identifier"),
    )
    .with_text("FHIR Identifier")
}
