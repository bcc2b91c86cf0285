use ronin_model::Location;

use crate::path::ElementPath;
use crate::r4::{ResourceValidator, check_reference_type, check_value_set, validate_domain_resource};
use crate::validation::Validation;

const STATUS: &[&str] = &["active", "suspended", "inactive"];
const MODE: &[&str] = &["instance", "kind"];

/// Base R4 rules for Location. Every element is optional.
#[derive(Debug, Default, Clone, Copy)]
pub struct R4LocationValidator;

impl ResourceValidator<Location> for R4LocationValidator {
    fn validate(&self, location: &Location, parent: &ElementPath) -> Validation {
        let mut validation = Validation::new();
        validate_domain_resource(location, parent, &mut validation);

        check_value_set(
            &mut validation,
            location.status.as_deref(),
            STATUS,
            &parent.field("status"),
        );
        check_value_set(&mut validation, location.mode.as_deref(), MODE, &parent.field("mode"));
        check_reference_type(
            &mut validation,
            location.managing_organization.as_ref(),
            &["Organization"],
            &parent.field("managingOrganization"),
        );
        check_reference_type(
            &mut validation,
            location.part_of.as_ref(),
            &["Location"],
            &parent.field("partOf"),
        );

        validation
    }
}
