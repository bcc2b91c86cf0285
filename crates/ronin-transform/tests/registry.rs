//! Dispatch of untyped resources through the registry.

use std::sync::Arc;

use ronin_model::ronin::profile_url;
use ronin_model::{Resource, ResourceType, Tenant};
use ronin_normalization::{NormalizationOptions, StandardNormalizer, TenantLocalizer};
use ronin_transform::{
    ConceptMap, PipelineOptions, RegistryConfig, TransformerRegistry, default_registry,
    ronin_locations, standard_registry,
};

fn tenant() -> Tenant {
    Tenant::new("test").unwrap()
}

#[test]
fn default_registry_covers_every_resource_type() {
    let registry = default_registry();
    assert_eq!(registry.resource_types(), ResourceType::ALL.to_vec());
    assert!(std::ptr::eq(registry, default_registry()));
}

#[test]
fn transforms_json_resources_by_type() {
    let resource = Resource::from_json(
        r#"{
            "resourceType": "Practitioner",
            "id": "dr-1",
            "name": [{"family": "Osler", "given": ["William"]}],
            "gender": "male"
        }"#,
    )
    .unwrap();

    let (transformed, validation) = default_registry().transform(resource, &tenant());

    assert!(validation.is_empty(), "{validation:?}");
    let Some(Resource::Practitioner(practitioner)) = transformed else {
        panic!("expected a practitioner");
    };
    assert_eq!(practitioner.id.as_deref(), Some("test-dr-1"));
    assert_eq!(
        practitioner.meta.unwrap().profile,
        vec![profile_url::PRACTITIONER.to_string()]
    );
}

#[test]
fn validate_reports_missing_ronin_identifiers() {
    let resource =
        Resource::from_json(r#"{"resourceType": "Location", "id": "l1", "name": "Clinic"}"#)
            .unwrap();
    assert!(default_registry().qualifies(&resource));
    assert_eq!(
        default_registry().validate(&resource).codes(),
        vec!["RONIN_TNNT_ID_001", "RONIN_FHIR_ID_001"]
    );
}

#[test]
fn unregistered_type_has_no_qualifying_profile() {
    let registry = TransformerRegistry::new().with(ronin_locations(
        Arc::new(StandardNormalizer::default()),
        Arc::new(TenantLocalizer),
    ));
    assert_eq!(registry.len(), 1);

    let resource = Resource::from_json(r#"{"resourceType": "Condition", "id": "c1"}"#).unwrap();
    let (transformed, validation) = registry.transform(resource, &tenant());

    assert!(transformed.is_none());
    assert_eq!(
        validation.issues()[0].to_string(),
        "ERROR RONIN_PROFILE_001: No qualifying profile found for Condition @ Condition"
    );
}

#[test]
fn standard_registry_applies_config() {
    let config = RegistryConfig::default()
        .with_normalization(NormalizationOptions::default().with_canonical_systems(false))
        .with_pipeline(PipelineOptions::new().with_reresolve_after_localization(false))
        .with_diagnostic_report_codes(ConceptMap::new());
    let registry = standard_registry(&config);

    let resource = Resource::from_json(
        r#"{
            "resourceType": "DiagnosticReport",
            "id": "dr-1",
            "status": "final",
            "code": {"coding": [{"system": "urn:tenant:codes", "code": "CBC"}]},
            "subject": {"reference": "Patient/p1"}
        }"#,
    )
    .unwrap();
    let (transformed, validation) = registry.transform(resource, &tenant());

    assert!(matches!(transformed, Some(Resource::DiagnosticReport(_))));
    assert_eq!(validation.codes(), vec!["RONIN_CONMAP_001"]);
}
