use ronin_model::Practitioner;
use ronin_model::ronin::profile_url;
use ronin_validate::r4::R4PractitionerValidator;
use ronin_validate::{ElementPath, Issue, ResourceValidator, Validation};

use crate::profile::Profile;

/// Ronin Practitioner. Qualifies every Practitioner and requires a name.
#[derive(Debug, Default, Clone, Copy)]
pub struct RoninPractitioner;

impl Profile<Practitioner> for RoninPractitioner {
    fn name(&self) -> &'static str {
        "RoninPractitioner"
    }

    fn profile_url(&self) -> &'static str {
        profile_url::PRACTITIONER
    }

    fn qualifies(&self, _resource: &Practitioner) -> bool {
        true
    }

    fn standard_validator(&self) -> &dyn ResourceValidator<Practitioner> {
        &R4PractitionerValidator
    }

    fn validate_profile(
        &self,
        practitioner: &Practitioner,
        parent: &ElementPath,
        validation: &mut Validation,
    ) {
        validation.check_true(
            !practitioner.name.is_empty(),
            Issue::RequiredField {
                field: "name".to_string(),
            },
            &parent.field("name"),
        );
    }
}
