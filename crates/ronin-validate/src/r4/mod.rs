//! FHIR R4 structural validators.
//!
//! These cover the base FHIR R4 definitions only: cardinality, required value-set
//! bindings, primitive formats and a selection of invariants. Ronin rules
//! are layered on top by the profiles.

mod appointment;
mod condition;
mod diagnostic_report;
mod location;
mod medication_statement;
mod observation;
mod practitioner;

pub use appointment::R4AppointmentValidator;
pub use condition::R4ConditionValidator;
pub use diagnostic_report::R4DiagnosticReportValidator;
pub use location::R4LocationValidator;
pub use medication_statement::R4MedicationStatementValidator;
pub use observation::R4ObservationValidator;
pub use practitioner::R4PractitionerValidator;

use ronin_model::{DomainResource, Extension, Reference};

use crate::issue::{Issue, PrimitiveKind};
use crate::path::ElementPath;
use crate::primitives::check_primitive;
use crate::validation::Validation;

/// Validates one resource type against rules independent of any profile.
pub trait ResourceValidator<R>: Send + Sync {
    fn validate(&self, resource: &R, parent: &ElementPath) -> Validation;
}

/// Checks shared by every resource: id format, meta and extensions.
pub fn validate_domain_resource<R: DomainResource>(
    resource: &R,
    parent: &ElementPath,
    validation: &mut Validation,
) {
    check_primitive(validation, PrimitiveKind::Id, resource.id(), &parent.field("id"));

    if let Some(meta) = resource.meta() {
        let meta_path = parent.field("meta");
        check_primitive(
            validation,
            PrimitiveKind::Instant,
            meta.last_updated.as_deref(),
            &meta_path.field("lastUpdated"),
        );
        for (index, profile) in meta.profile.iter().enumerate() {
            check_primitive(
                validation,
                PrimitiveKind::Uri,
                Some(profile),
                &meta_path.field("profile").index(index),
            );
        }
    }

    validate_extensions(resource.extension(), &parent.field("extension"), validation);
}

/// Every extension needs a url, and carries either a value or nested extensions, not both.
pub fn validate_extensions(
    extensions: &[Extension],
    path: &ElementPath,
    validation: &mut Validation,
) {
    for (index, extension) in extensions.iter().enumerate() {
        let extension_path = path.index(index);
        validation.require(extension.url.as_ref(), &extension_path.field("url"));
        validation.check_true(
            extension.value.is_none() || extension.extension.is_empty(),
            Issue::Invariant {
                key: "ext-1".to_string(),
                description: "Must have either extensions or value[x], not both".to_string(),
            },
            &extension_path,
        );
        validate_extensions(&extension.extension, &extension_path.field("extension"), validation);
    }
}

/// Records `INV_VALUE_SET` when a present code is not one of `allowed`.
pub fn check_value_set(
    validation: &mut Validation,
    value: Option<&str>,
    allowed: &[&str],
    location: &ElementPath,
) {
    if let Some(value) = value
        && !allowed.contains(&value)
    {
        validation.push(
            Issue::ValueSet {
                value: value.to_string(),
            },
            location.clone(),
        );
    }
}

/// Records `INV_REF_TYPE` when a reference resolves to a type outside `allowed`.
///
/// References whose target type cannot be determined (absolute, contained or
/// identifier-only) are not checked.
pub fn check_reference_type(
    validation: &mut Validation,
    reference: Option<&Reference>,
    allowed: &[&str],
    location: &ElementPath,
) {
    let Some(target) = reference.and_then(Reference::target_type) else {
        return;
    };
    if !allowed.contains(&target) {
        validation.push(
            Issue::ReferenceType {
                allowed: allowed.iter().map(ToString::to_string).collect(),
            },
            location.clone(),
        );
    }
}
