use ronin_model::Practitioner;

use crate::issue::PrimitiveKind;
use crate::path::ElementPath;
use crate::primitives::check_primitive;
use crate::r4::{ResourceValidator, check_value_set, validate_domain_resource};
use crate::validation::Validation;

const GENDER: &[&str] = &["male", "female", "other", "unknown"];

/// Base R4 rules for Practitioner.
#[derive(Debug, Default, Clone, Copy)]
pub struct R4PractitionerValidator;

impl ResourceValidator<Practitioner> for R4PractitionerValidator {
    fn validate(&self, practitioner: &Practitioner, parent: &ElementPath) -> Validation {
        let mut validation = Validation::new();
        validate_domain_resource(practitioner, parent, &mut validation);

        check_value_set(
            &mut validation,
            practitioner.gender.as_deref(),
            GENDER,
            &parent.field("gender"),
        );
        check_primitive(
            &mut validation,
            PrimitiveKind::Date,
            practitioner.birth_date.as_deref(),
            &parent.field("birthDate"),
        );
        for (index, qualification) in practitioner.qualification.iter().enumerate() {
            validation.require(
                qualification.code.as_ref(),
                &parent.field("qualification").index(index).field("code"),
            );
        }

        validation
    }
}
