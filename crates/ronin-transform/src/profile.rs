//! The profile capability trait.
//!
//! A profile is one concrete Ronin target for a resource type: it decides
//! whether a resource belongs to it, validates resources against its rules,
//! and maps source resources onto its shape.

use ronin_model::{DomainResource, Meta, Tenant};
use ronin_normalization::{
    append_ronin_identifiers, is_fhir_id_identifier, is_tenant_identifier, localize_id,
};
use ronin_validate::primitives::MAX_ID_LENGTH;
use ronin_validate::{ElementPath, Issue, ResourceValidator, Validation};

/// One Ronin profile for resource type `R`.
///
/// Implementors provide the qualification predicate, the standard R4
/// validator and any profile-specific rules or field mapping. Validation and
/// the id, identifier and `meta.profile` rewrites are shared by all profiles
/// through the provided methods.
///
/// Profiles hold no mutable state and are shared across threads.
pub trait Profile<R: DomainResource>: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Canonical URL written to `meta.profile`.
    fn profile_url(&self) -> &'static str;

    /// Whether this profile is the right target for `resource`.
    fn qualifies(&self, resource: &R) -> bool;

    /// Base R4 validator for the resource type.
    fn standard_validator(&self) -> &dyn ResourceValidator<R>;

    /// Profile-specific checks, run after the standard and identifier checks.
    fn validate_profile(
        &self,
        _resource: &R,
        _parent: &ElementPath,
        _validation: &mut Validation,
    ) {
    }

    /// Profile-specific field mapping applied after the shared rewrites.
    fn map_fields(
        &self,
        resource: R,
        _parent: &ElementPath,
        _tenant: &Tenant,
    ) -> (Option<R>, Validation) {
        (Some(resource), Validation::new())
    }

    /// Standard validation, then Ronin identifier checks, then profile checks.
    ///
    /// Every rule runs; nothing short-circuits.
    fn validate(&self, resource: &R, parent: &ElementPath) -> Validation {
        let mut validation = self.standard_validator().validate(resource, parent);
        validate_ronin_identifiers(resource, parent, &mut validation);
        self.validate_profile(resource, parent, &mut validation);
        validation
    }

    /// Maps `resource` onto this profile for `tenant`.
    ///
    /// Returns `None` with a `REQ_FIELD` issue when the resource has no id,
    /// since nothing can be tenant-scoped without one, and with
    /// `RONIN_TNNT_ID_002` when the tenant-scoped id would exceed
    /// [`MAX_ID_LENGTH`].
    fn transform_internal(
        &self,
        resource: &R,
        parent: &ElementPath,
        tenant: &Tenant,
    ) -> (Option<R>, Validation) {
        let mut validation = Validation::new();
        let id_path = parent.field("id");
        let Some(id) = validation.require(resource.id(), &id_path) else {
            return (None, validation);
        };

        let localized_id = localize_id(id, tenant);
        if localized_id.len() > MAX_ID_LENGTH {
            validation.push(Issue::LocalizedIdTooLong { id: localized_id }, id_path);
            return (None, validation);
        }

        let mut transformed = resource.clone();
        transformed.set_id(Some(localized_id));
        *transformed.identifier_mut() =
            append_ronin_identifiers(resource.identifier(), id, tenant);
        let meta = Meta {
            profile: vec![self.profile_url().to_string()],
            ..resource.meta().cloned().unwrap_or_default()
        };
        transformed.set_meta(Some(meta));

        let (mapped, mapping) = self.map_fields(transformed, parent, tenant);
        validation.merge_from(mapping);
        (mapped, validation)
    }

    /// Best-effort transform: the resource or `None`, without the validation detail.
    fn transform(&self, resource: &R, tenant: &Tenant) -> Option<R> {
        self.transform_internal(resource, &ElementPath::resource(R::RESOURCE_TYPE), tenant)
            .0
    }

    /// This profile with its standard validator replaced by `validator`.
    fn with_standard_validator<V>(self, validator: V) -> WithStandardValidator<Self, V>
    where
        Self: Sized,
        V: ResourceValidator<R>,
    {
        WithStandardValidator {
            profile: self,
            validator,
        }
    }
}

/// Checks shared by every Ronin profile: tenant and FHIR id identifiers.
fn validate_ronin_identifiers<R: DomainResource>(
    resource: &R,
    parent: &ElementPath,
    validation: &mut Validation,
) {
    let identifier_path = parent.field("identifier");
    let identifiers = resource.identifier();
    validation.check_true(
        identifiers.iter().any(is_tenant_identifier),
        Issue::TenantIdentifierRequired,
        &identifier_path,
    );
    validation.check_true(
        identifiers.iter().any(is_fhir_id_identifier),
        Issue::FhirIdentifierRequired,
        &identifier_path,
    );
}

/// A profile validated with a substitute standard validator.
///
/// Built with [`Profile::with_standard_validator`].
pub struct WithStandardValidator<P, V> {
    profile: P,
    validator: V,
}

impl<R, P, V> Profile<R> for WithStandardValidator<P, V>
where
    R: DomainResource,
    P: Profile<R>,
    V: ResourceValidator<R>,
{
    fn name(&self) -> &'static str {
        self.profile.name()
    }

    fn profile_url(&self) -> &'static str {
        self.profile.profile_url()
    }

    fn qualifies(&self, resource: &R) -> bool {
        self.profile.qualifies(resource)
    }

    fn standard_validator(&self) -> &dyn ResourceValidator<R> {
        &self.validator
    }

    fn validate_profile(&self, resource: &R, parent: &ElementPath, validation: &mut Validation) {
        self.profile.validate_profile(resource, parent, validation);
    }

    fn map_fields(
        &self,
        resource: R,
        parent: &ElementPath,
        tenant: &Tenant,
    ) -> (Option<R>, Validation) {
        self.profile.map_fields(resource, parent, tenant)
    }
}
