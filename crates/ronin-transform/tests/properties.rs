//! Laws of the transform pipeline over generated resources.

use std::sync::Arc;

use proptest::prelude::*;
use ronin_model::{Identifier, Location, Reference, ResourceType, Tenant};
use ronin_normalization::{
    StandardNormalizer, TenantLocalizer, is_fhir_id_identifier, is_tenant_identifier,
};
use ronin_transform::profiles::RoninLocation;
use ronin_transform::{Profile, ResourceFamily, ronin_locations};
use ronin_validate::ElementPath;
use ronin_validate::primitives::MAX_ID_LENGTH;

fn tenant_strategy() -> impl Strategy<Value = Tenant> {
    "[a-z][a-z0-9]{0,9}".prop_map(|mnemonic| Tenant::new(mnemonic).unwrap())
}

fn location_strategy() -> impl Strategy<Value = Location> {
    (
        "[A-Za-z0-9.-]{1,64}",
        prop::option::of("[A-Za-z ]{0,20}"),
        prop::collection::vec(("urn:oid:1\\.2\\.[0-9]{1,3}", "[A-Z0-9]{1,8}"), 0..3),
        prop::option::of("Organization/[a-z0-9]{1,10}"),
    )
        .prop_map(|(id, name, identifiers, organization)| Location {
            id: Some(id),
            name,
            identifier: identifiers
                .into_iter()
                .map(|(system, value)| Identifier::new(system, value))
                .collect(),
            managing_organization: organization.map(Reference::literal),
            ..Location::default()
        })
}

fn scoped_id(location: &Location, tenant: &Tenant) -> String {
    format!("{}-{}", tenant.mnemonic(), location.id.as_deref().unwrap_or_default())
}

fn locations() -> ResourceFamily<Location> {
    ronin_locations(Arc::new(StandardNormalizer::default()), Arc::new(TenantLocalizer))
}

proptest! {
    #[test]
    fn transformed_id_is_tenant_prefixed(
        location in location_strategy(),
        tenant in tenant_strategy(),
    ) {
        let expected = scoped_id(&location, &tenant);
        let (transformed, validation) = locations().transform(location, &tenant);
        if expected.len() <= MAX_ID_LENGTH {
            prop_assert_eq!(transformed.and_then(|location| location.id), Some(expected));
        } else {
            prop_assert!(transformed.is_none());
            prop_assert_eq!(validation.codes(), vec!["RONIN_TNNT_ID_002"]);
        }
    }

    #[test]
    fn identifiers_are_only_appended(
        location in location_strategy(),
        tenant in tenant_strategy(),
    ) {
        prop_assume!(scoped_id(&location, &tenant).len() <= MAX_ID_LENGTH);
        let transformed = RoninLocation.transform(&location, &tenant).unwrap();
        let count = location.identifier.len();
        prop_assert_eq!(transformed.identifier.len(), count + 2);
        prop_assert_eq!(&transformed.identifier[..count], &location.identifier[..]);
        prop_assert!(is_tenant_identifier(&transformed.identifier[count]));
        prop_assert!(is_fhir_id_identifier(&transformed.identifier[count + 1]));
    }

    #[test]
    fn transform_is_deterministic(location in location_strategy(), tenant in tenant_strategy()) {
        let family = locations();
        let first = family.transform(location.clone(), &tenant);
        let second = family.transform(location, &tenant);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn transformed_resources_validate_cleanly(
        location in location_strategy(),
        tenant in tenant_strategy(),
    ) {
        prop_assume!(scoped_id(&location, &tenant).len() <= MAX_ID_LENGTH);
        let (transformed, validation) = locations().transform(location, &tenant);
        prop_assert!(validation.is_empty(), "{:?}", validation);

        let revalidated = RoninLocation.validate(
            &transformed.unwrap(),
            &ElementPath::resource(ResourceType::Location),
        );
        prop_assert!(revalidated.is_empty(), "{:?}", revalidated);
    }
}
