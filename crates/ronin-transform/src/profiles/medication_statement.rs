use ronin_model::ronin::profile_url;
use ronin_model::MedicationStatement;
use ronin_validate::r4::{R4MedicationStatementValidator, check_reference_type};
use ronin_validate::{ElementPath, ResourceValidator, Validation};

use crate::profile::Profile;

/// Ronin MedicationStatement. Qualifies every MedicationStatement.
#[derive(Debug, Default, Clone, Copy)]
pub struct RoninMedicationStatement;

impl Profile<MedicationStatement> for RoninMedicationStatement {
    fn name(&self) -> &'static str {
        "RoninMedicationStatement"
    }

    fn profile_url(&self) -> &'static str {
        profile_url::MEDICATION_STATEMENT
    }

    fn qualifies(&self, _resource: &MedicationStatement) -> bool {
        true
    }

    fn standard_validator(&self) -> &dyn ResourceValidator<MedicationStatement> {
        &R4MedicationStatementValidator
    }

    fn validate_profile(
        &self,
        statement: &MedicationStatement,
        parent: &ElementPath,
        validation: &mut Validation,
    ) {
        check_reference_type(
            validation,
            statement.subject.as_ref(),
            &["Patient"],
            &parent.field("subject"),
        );
    }
}
