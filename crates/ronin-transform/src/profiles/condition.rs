use ronin_model::ronin::{CONDITION_CATEGORY_SYSTEM, US_CORE_CONDITION_CATEGORY_SYSTEM, profile_url};
use ronin_model::Condition;
use ronin_validate::r4::R4ConditionValidator;
use ronin_validate::{ElementPath, Issue, ResourceValidator, Validation};

use crate::profile::Profile;

fn is_encounter_diagnosis(condition: &Condition) -> bool {
    condition
        .category
        .iter()
        .any(|category| category.has_coding(CONDITION_CATEGORY_SYSTEM, "encounter-diagnosis"))
}

fn is_problem_or_health_concern(condition: &Condition) -> bool {
    condition.category.iter().any(|category| {
        category.has_coding(CONDITION_CATEGORY_SYSTEM, "problem-list-item")
            || category.has_coding(US_CORE_CONDITION_CATEGORY_SYSTEM, "health-concern")
    })
}

/// Ronin encounter diagnosis.
#[derive(Debug, Default, Clone, Copy)]
pub struct RoninConditionEncounterDiagnosis;

impl Profile<Condition> for RoninConditionEncounterDiagnosis {
    fn name(&self) -> &'static str {
        "RoninConditionEncounterDiagnosis"
    }

    fn profile_url(&self) -> &'static str {
        profile_url::CONDITION_ENCOUNTER_DIAGNOSIS
    }

    fn qualifies(&self, condition: &Condition) -> bool {
        is_encounter_diagnosis(condition)
    }

    fn standard_validator(&self) -> &dyn ResourceValidator<Condition> {
        &R4ConditionValidator
    }

    fn validate_profile(
        &self,
        condition: &Condition,
        parent: &ElementPath,
        validation: &mut Validation,
    ) {
        validation.require(condition.code.as_ref(), &parent.field("code"));
        validation.check_true(
            is_encounter_diagnosis(condition),
            Issue::EncounterDiagnosisCategory,
            &parent.field("category"),
        );
    }
}

/// Ronin problem list item or health concern.
#[derive(Debug, Default, Clone, Copy)]
pub struct RoninConditionProblemsAndHealthConcerns;

impl Profile<Condition> for RoninConditionProblemsAndHealthConcerns {
    fn name(&self) -> &'static str {
        "RoninConditionProblemsAndHealthConcerns"
    }

    fn profile_url(&self) -> &'static str {
        profile_url::CONDITION_PROBLEMS_HEALTH_CONCERNS
    }

    fn qualifies(&self, condition: &Condition) -> bool {
        is_problem_or_health_concern(condition)
    }

    fn standard_validator(&self) -> &dyn ResourceValidator<Condition> {
        &R4ConditionValidator
    }

    fn validate_profile(
        &self,
        condition: &Condition,
        parent: &ElementPath,
        validation: &mut Validation,
    ) {
        validation.require(condition.code.as_ref(), &parent.field("code"));
        validation.check_true(
            is_problem_or_health_concern(condition),
            Issue::ProblemsAndHealthConcernsCategory,
            &parent.field("category"),
        );
    }
}
