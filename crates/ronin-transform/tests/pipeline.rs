//! End-to-end behavior of resource families.

use std::sync::Arc;

use insta::{assert_json_snapshot, assert_snapshot};
use ronin_model::ronin::{
    CONDITION_CATEGORY_SYSTEM, DIAGNOSTIC_SERVICE_SECTION_SYSTEM, LOINC_SYSTEM,
    OBSERVATION_CATEGORY_SYSTEM, TENANT_SOURCE_DIAGNOSTIC_REPORT_CODE_EXTENSION, profile_url,
};
use ronin_model::{
    Appointment, AppointmentParticipant, CodeableConcept, Coding, Condition, DiagnosticReport,
    ExtensionValue, Location, Observation, Reference, ResourceType, Tenant,
};
use ronin_normalization::{Localizer, StandardNormalizer, TenantLocalizer};
use ronin_transform::profiles::{
    RoninAppointment, RoninBodyHeight, RoninLaboratoryResult, RoninObservation,
};
use ronin_transform::{
    ConceptMap, DiagnosticReportCodeMapper, PipelineOptions, Profile, ResourceFamily,
    ronin_conditions, ronin_diagnostic_reports, ronin_locations, ronin_observations,
};
use ronin_validate::primitives::MAX_ID_LENGTH;
use ronin_validate::r4::R4ObservationValidator;
use ronin_validate::{ElementPath, Issue, ResourceValidator, Validation};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn tenant() -> Tenant {
    Tenant::new("test").unwrap()
}

fn laboratory_observation() -> Observation {
    Observation {
        id: Some("lab-1".to_string()),
        status: Some("final".to_string()),
        category: vec![CodeableConcept::from_coding(Coding::new(
            OBSERVATION_CATEGORY_SYSTEM,
            "laboratory",
        ))],
        code: Some(CodeableConcept::from_coding(Coding::new(LOINC_SYSTEM, "2345-7"))),
        subject: Some(Reference::literal("Patient/p1")),
        ..Observation::default()
    }
}

fn observations() -> ResourceFamily<Observation> {
    ronin_observations(Arc::new(StandardNormalizer::default()), Arc::new(TenantLocalizer))
}

#[test]
fn unnamed_location_is_named_and_tenant_scoped() {
    init_tracing();
    let family =
        ronin_locations(Arc::new(StandardNormalizer::default()), Arc::new(TenantLocalizer));
    let location = Location {
        id: Some("12345".to_string()),
        name: Some(String::new()),
        status: Some("active".to_string()),
        ..Location::default()
    };

    let (transformed, validation) = family.transform(location, &tenant());

    assert!(validation.is_empty(), "{validation:?}");
    assert_json_snapshot!(transformed.unwrap(), @r#"
    {
      "id": "test-12345",
      "meta": {
        "profile": [
          "http://projectronin.io/fhir/StructureDefinition/ronin-location"
        ]
      },
      "identifier": [
        {
          "type": {
            "coding": [
              {
                "system": "http://projectronin.io/fhir/CodeSystem/RoninIdentifierType",
                "code": "TID",
                "display": "Ronin-specified Tenant Identifier"
              }
            ],
            "text": "Tenant ID"
          },
          "system": "http://projectronin.io/id/tenantId",
          "value": "test"
        },
        {
          "type": {
            "coding": [
              {
                "system": "http://projectronin.io/fhir/CodeSystem/RoninIdentifierType",
                "code": "FHIR ID",
                "display": "FHIR Identifier"
              }
            ],
            "text": "FHIR Identifier"
          },
          "system": "http://projectronin.io/id/fhirId",
          "value": "12345"
        }
      ],
      "status": "active",
      "name": "Unnamed Location"
    }
    "#);
}

#[test]
fn appointment_without_ronin_identifiers_fails_with_both_issues() {
    let appointment = Appointment {
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
    };

    let validation =
        RoninAppointment.validate(&appointment, &ElementPath::resource(ResourceType::Appointment));
    let failure = validation.alert_if_errors().unwrap_err();
    assert_snapshot!(failure.to_string(), @r"
    Encountered validation error(s):
    ERROR RONIN_TNNT_ID_001: Tenant identifier is required @ Appointment.identifier
    ERROR RONIN_FHIR_ID_001: FHIR identifier is required @ Appointment.identifier
    ");
}

#[test]
fn normalization_runs_before_profile_selection() {
    let mut height = laboratory_observation();
    height.category.clear();
    height.code = Some(CodeableConcept::from_coding(Coding::new(
        "urn:oid:2.16.840.1.113883.6.1",
        " 8302-2 ",
    )));

    let (transformed, _) = observations().transform(height, &tenant());
    let transformed = transformed.unwrap();
    assert_eq!(
        transformed.meta.unwrap().profile,
        vec![profile_url::OBSERVATION_BODY_HEIGHT.to_string()]
    );
    assert!(transformed.code.unwrap().has_coding(LOINC_SYSTEM, "8302-2"));
}

#[test]
fn profile_issues_are_reported_with_the_transformed_resource() {
    let mut height = laboratory_observation();
    height.code = Some(CodeableConcept::from_coding(Coding::new(LOINC_SYSTEM, "8302-2")));

    let (transformed, validation) = observations().transform(height, &tenant());
    assert_eq!(
        transformed.unwrap().subject.unwrap().reference.as_deref(),
        Some("Patient/test-p1")
    );
    assert_eq!(validation.codes(), vec!["RONIN_OBS_001"]);
    assert!(validation.alert_if_errors().is_err());
}

#[test]
fn missing_id_fails_every_profile() {
    let mut observation = laboratory_observation();
    observation.id = None;

    let (transformed, validation) = observations().transform(observation, &tenant());
    assert!(transformed.is_none());
    assert_eq!(
        validation.issues()[0].to_string(),
        "ERROR REQ_FIELD: id is a required element @ Observation.id"
    );
}

#[test]
fn tenant_scoped_id_is_limited_to_sixty_four_characters() {
    let fits = "a".repeat(MAX_ID_LENGTH - "test-".len());
    let mut observation = laboratory_observation();
    observation.id = Some(fits.clone());

    let (transformed, validation) = observations().transform(observation, &tenant());
    assert!(validation.is_empty(), "{validation:?}");
    let transformed = transformed.unwrap();
    assert_eq!(transformed.id.as_deref().map(str::len), Some(MAX_ID_LENGTH));
    let revalidated =
        observations().validate(&transformed, &ElementPath::resource(ResourceType::Observation));
    assert!(revalidated.is_empty(), "{revalidated:?}");

    let mut observation = laboratory_observation();
    observation.id = Some("a".repeat(MAX_ID_LENGTH));
    let (transformed, validation) = observations().transform(observation, &tenant());
    assert!(transformed.is_none());
    assert_eq!(validation.codes(), vec!["RONIN_TNNT_ID_002"]);
    assert_eq!(validation.issues()[0].location.to_string(), "Observation.id");
}

fn conditions() -> ResourceFamily<Condition> {
    ronin_conditions(Arc::new(StandardNormalizer::default()), Arc::new(TenantLocalizer))
}

fn condition_with_other_category() -> Condition {
    Condition {
        id: Some("c1".to_string()),
        category: vec![CodeableConcept::from_coding(Coding::new(
            CONDITION_CATEGORY_SYSTEM,
            "other",
        ))],
        subject: Some(Reference::literal("Patient/p1")),
        ..Condition::default()
    }
}

#[test]
fn condition_without_known_category_has_no_profile() {
    let family = conditions();
    let condition = condition_with_other_category();

    assert!(!family.qualifies(&condition));
    let (transformed, validation) = family.transform(condition, &tenant());
    assert!(transformed.is_none());
    assert_eq!(
        validation.issues()[0].to_string(),
        "ERROR RONIN_PROFILE_001: No qualifying profile found for Condition @ Condition"
    );
}

#[test]
fn validating_an_unqualified_resource_reports_only_the_missing_profile() {
    let validation = conditions().validate(
        &condition_with_other_category(),
        &ElementPath::resource(ResourceType::Condition),
    );

    assert_eq!(validation.codes(), vec!["RONIN_PROFILE_001"]);
    assert_eq!(validation.issues()[0].location.to_string(), "Condition");
}

#[test]
fn encounter_diagnosis_is_transformed() {
    let family = conditions();
    let condition = Condition {
        id: Some("c1".to_string()),
        category: vec![CodeableConcept::from_coding(Coding::new(
            CONDITION_CATEGORY_SYSTEM,
            "encounter-diagnosis",
        ))],
        code: Some(CodeableConcept::from_coding(Coding::new(
            "http://snomed.info/sct",
            "38341003",
        ))),
        subject: Some(Reference::literal("Patient/p1")),
        ..Condition::default()
    };

    let (transformed, validation) = family.transform(condition, &tenant());
    assert!(validation.is_empty(), "{validation:?}");
    assert_eq!(
        transformed.unwrap().meta.unwrap().profile,
        vec![profile_url::CONDITION_ENCOUNTER_DIAGNOSIS.to_string()]
    );
}

/// Accepts every observation under a fixed name and flags its own name as missing.
struct AcceptAll(&'static str, &'static str);

impl Profile<Observation> for AcceptAll {
    fn name(&self) -> &'static str {
        self.0
    }

    fn profile_url(&self) -> &'static str {
        self.1
    }

    fn qualifies(&self, _observation: &Observation) -> bool {
        true
    }

    fn validate_profile(
        &self,
        _observation: &Observation,
        parent: &ElementPath,
        validation: &mut Validation,
    ) {
        validation.push(Issue::RequiredField { field: self.0.to_string() }, parent.clone());
    }

    fn standard_validator(&self) -> &dyn ResourceValidator<Observation> {
        &R4ObservationValidator
    }
}

fn tied_family() -> ResourceFamily<Observation> {
    ResourceFamily::new(Arc::new(StandardNormalizer::default()), Arc::new(TenantLocalizer))
        .with_profile(AcceptAll("first", profile_url::OBSERVATION_BODY_HEIGHT))
        .with_profile(AcceptAll("second", profile_url::OBSERVATION_BODY_WEIGHT))
        .with_default(RoninObservation)
}

#[test]
fn first_registered_profile_wins_ties() {
    let family = tied_family();

    assert_eq!(family.profile_names(), vec!["first", "second", "RoninObservation"]);
    let (transformed, _) = family.transform(laboratory_observation(), &tenant());
    assert_eq!(
        transformed.unwrap().meta.unwrap().profile,
        vec![profile_url::OBSERVATION_BODY_HEIGHT.to_string()]
    );
}

#[test]
fn family_validation_delegates_to_the_first_qualifying_profile() {
    let (transformed, _) = tied_family().transform(laboratory_observation(), &tenant());
    let validation = tied_family()
        .validate(&transformed.unwrap(), &ElementPath::resource(ResourceType::Observation));

    let messages: Vec<String> = validation
        .issues()
        .iter()
        .filter(|issue| issue.issue.code() == "REQ_FIELD")
        .map(|issue| issue.message())
        .collect();
    assert_eq!(messages, vec!["first is a required element".to_string()]);
}

#[test]
fn specific_profiles_are_tried_before_the_default() {
    let family =
        ResourceFamily::new(Arc::new(StandardNormalizer::default()), Arc::new(TenantLocalizer))
            .with_default(RoninObservation)
        .with_profile(RoninBodyHeight);
    assert_eq!(family.profile_names(), vec!["RoninBodyHeight", "RoninObservation"]);
}

/// Localizes references and drops every category.
struct CategoryStrippingLocalizer;

impl Localizer<Observation> for CategoryStrippingLocalizer {
    fn localize(&self, observation: Observation, tenant: &Tenant) -> Observation {
        let mut localized = TenantLocalizer.localize(observation, tenant);
        localized.category.clear();
        localized
    }
}

fn stripping_family(options: PipelineOptions) -> ResourceFamily<Observation> {
    ronin_observations(
        Arc::new(StandardNormalizer::default()),
        Arc::new(CategoryStrippingLocalizer),
    )
    .with_options(options)
}

#[test]
fn localized_resource_is_validated_by_its_new_profile() {
    let (transformed, validation) = stripping_family(PipelineOptions::default())
        .transform(laboratory_observation(), &tenant());

    assert!(validation.is_empty(), "{validation:?}");
    // meta.profile keeps the laboratory-result claim from transformation, but
    // with its category gone the resource was validated as a RoninObservation.
    let transformed = transformed.unwrap();
    assert!(!RoninLaboratoryResult.qualifies(&transformed));
    assert!(RoninObservation.qualifies(&transformed));
    assert_eq!(
        transformed.meta.unwrap().profile,
        vec![profile_url::OBSERVATION_LABORATORY_RESULT.to_string()]
    );
}

#[test]
fn reresolution_can_be_disabled() {
    let options = PipelineOptions::new().with_reresolve_after_localization(false);
    let (transformed, validation) =
        stripping_family(options).transform(laboratory_observation(), &tenant());

    assert!(transformed.is_some());
    assert_eq!(validation.codes(), vec!["RONIN_LAB_OBS_001"]);
}

fn laboratory_report(code: &str) -> DiagnosticReport {
    DiagnosticReport {
        id: Some("dr-1".to_string()),
        status: Some("final".to_string()),
        category: vec![CodeableConcept::from_coding(Coding::new(
            DIAGNOSTIC_SERVICE_SECTION_SYSTEM,
            "LAB",
        ))],
        code: Some(CodeableConcept::from_coding(Coding::new("urn:tenant:codes", code))),
        subject: Some(Reference::literal("Patient/p1")),
        ..DiagnosticReport::default()
    }
}

fn mapped_reports() -> ResourceFamily<DiagnosticReport> {
    let concept_map = ConceptMap::new().with_entry(
        &tenant(),
        "urn:tenant:codes",
        "CBC",
        Coding::new(LOINC_SYSTEM, "58410-2"),
    );
    ronin_diagnostic_reports(Arc::new(StandardNormalizer::default()), Arc::new(TenantLocalizer))
        .with_concept_mapper(Arc::new(DiagnosticReportCodeMapper::new(concept_map)))
}

#[test]
fn mapped_report_code_keeps_tenant_source() {
    let (transformed, validation) =
        mapped_reports().transform(laboratory_report("CBC"), &tenant());

    assert!(validation.is_empty(), "{validation:?}");
    let transformed = transformed.unwrap();
    assert!(transformed.code.unwrap().has_coding(LOINC_SYSTEM, "58410-2"));
    let extension = &transformed.extension[0];
    assert_eq!(
        extension.url.as_deref(),
        Some(TENANT_SOURCE_DIAGNOSTIC_REPORT_CODE_EXTENSION)
    );
    assert!(matches!(
        &extension.value,
        Some(ExtensionValue::CodeableConcept(source))
            if source.has_coding("urn:tenant:codes", "CBC")
    ));
}

#[test]
fn unmapped_report_code_is_an_error_but_still_transformed() {
    let (transformed, validation) =
        mapped_reports().transform(laboratory_report("BMP"), &tenant());

    let transformed = transformed.unwrap();
    assert_eq!(transformed.id.as_deref(), Some("test-dr-1"));
    assert!(transformed.extension.is_empty());
    assert_eq!(validation.codes(), vec!["RONIN_CONMAP_001"]);
    assert!(validation.alert_if_errors().is_err());
}
