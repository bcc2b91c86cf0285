//! Observation profiles, most specific first.
//!
//! Vital signs qualify on their LOINC code, laboratory results on their
//! category. [`RoninObservation`] accepts everything else.

use ronin_model::ronin::{LOINC_SYSTEM, OBSERVATION_CATEGORY_SYSTEM, UCUM_SYSTEM, profile_url};
use ronin_model::{CodeableConcept, Observation, ObservationValue, Quantity};
use ronin_validate::r4::{R4ObservationValidator, check_reference_type};
use ronin_validate::{ElementPath, Issue, ResourceValidator, Validation};

use crate::profile::Profile;

pub const BODY_HEIGHT_CODES: &[&str] =
    &["8302-2", "3137-7", "3138-5", "8306-3", "8307-1", "8308-9"];
pub const BODY_WEIGHT_CODES: &[&str] = &["29463-7", "3141-9", "8350-1", "8351-9", "75292-3"];
pub const BLOOD_PRESSURE_CODES: &[&str] = &["85354-9"];
pub const SYSTOLIC_CODE: &str = "8480-6";
pub const DIASTOLIC_CODE: &str = "8462-4";

fn has_loinc_code(observation: &Observation, codes: &[&str]) -> bool {
    observation
        .code
        .as_ref()
        .is_some_and(|code| code.has_any_code(LOINC_SYSTEM, codes))
}

fn has_category(categories: &[CodeableConcept], code: &str) -> bool {
    categories
        .iter()
        .any(|category| category.has_coding(OBSERVATION_CATEGORY_SYSTEM, code))
}

/// Rules every Ronin observation shares: a Patient subject.
fn validate_ronin_observation(
    observation: &Observation,
    parent: &ElementPath,
    validation: &mut Validation,
) {
    let subject_path = parent.field("subject");
    let subject = validation.require(observation.subject.as_ref(), &subject_path);
    check_reference_type(validation, subject, &["Patient"], &subject_path);
}

fn check_ucum(quantity: Option<&Quantity>, path: &ElementPath, validation: &mut Validation) {
    if let Some(quantity) = quantity {
        validation.check_true(
            quantity.system.as_deref() == Some(UCUM_SYSTEM),
            Issue::VitalSignUnitSystem,
            &path.field("system"),
        );
    }
}

/// Rules shared by vital signs: the vital-signs category and UCUM quantities.
fn validate_vital_sign(
    observation: &Observation,
    parent: &ElementPath,
    validation: &mut Validation,
) {
    validate_ronin_observation(observation, parent, validation);
    validation.check_true(
        has_category(&observation.category, "vital-signs"),
        Issue::VitalSignCategory,
        &parent.field("category"),
    );
    check_ucum(
        observation.value.as_ref().and_then(ObservationValue::as_quantity),
        &parent.field("valueQuantity"),
        validation,
    );
}

/// Ronin body height vital sign.
#[derive(Debug, Default, Clone, Copy)]
pub struct RoninBodyHeight;

impl Profile<Observation> for RoninBodyHeight {
    fn name(&self) -> &'static str {
        "RoninBodyHeight"
    }

    fn profile_url(&self) -> &'static str {
        profile_url::OBSERVATION_BODY_HEIGHT
    }

    fn qualifies(&self, observation: &Observation) -> bool {
        has_loinc_code(observation, BODY_HEIGHT_CODES)
    }

    fn standard_validator(&self) -> &dyn ResourceValidator<Observation> {
        &R4ObservationValidator
    }

    fn validate_profile(
        &self,
        observation: &Observation,
        parent: &ElementPath,
        validation: &mut Validation,
    ) {
        validate_vital_sign(observation, parent, validation);
    }
}

/// Ronin body weight vital sign.
#[derive(Debug, Default, Clone, Copy)]
pub struct RoninBodyWeight;

impl Profile<Observation> for RoninBodyWeight {
    fn name(&self) -> &'static str {
        "RoninBodyWeight"
    }

    fn profile_url(&self) -> &'static str {
        profile_url::OBSERVATION_BODY_WEIGHT
    }

    fn qualifies(&self, observation: &Observation) -> bool {
        has_loinc_code(observation, BODY_WEIGHT_CODES)
    }

    fn standard_validator(&self) -> &dyn ResourceValidator<Observation> {
        &R4ObservationValidator
    }

    fn validate_profile(
        &self,
        observation: &Observation,
        parent: &ElementPath,
        validation: &mut Validation,
    ) {
        validate_vital_sign(observation, parent, validation);
    }
}

/// Ronin blood pressure panel: requires systolic and diastolic components.
#[derive(Debug, Default, Clone, Copy)]
pub struct RoninBloodPressure;

impl Profile<Observation> for RoninBloodPressure {
    fn name(&self) -> &'static str {
        "RoninBloodPressure"
    }

    fn profile_url(&self) -> &'static str {
        profile_url::OBSERVATION_BLOOD_PRESSURE
    }

    fn qualifies(&self, observation: &Observation) -> bool {
        has_loinc_code(observation, BLOOD_PRESSURE_CODES)
    }

    fn standard_validator(&self) -> &dyn ResourceValidator<Observation> {
        &R4ObservationValidator
    }

    fn validate_profile(
        &self,
        observation: &Observation,
        parent: &ElementPath,
        validation: &mut Validation,
    ) {
        validate_vital_sign(observation, parent, validation);

        let component_path = parent.field("component");
        for code in [SYSTOLIC_CODE, DIASTOLIC_CODE] {
            let present = observation.component.iter().any(|component| {
                component
                    .code
                    .as_ref()
                    .is_some_and(|concept| concept.has_coding(LOINC_SYSTEM, code))
            });
            validation.check_true(
                present,
                Issue::BloodPressureComponent {
                    code: code.to_string(),
                },
                &component_path,
            );
        }
        for (index, component) in observation.component.iter().enumerate() {
            check_ucum(
                component.value.as_ref().and_then(ObservationValue::as_quantity),
                &component_path.index(index).field("valueQuantity"),
                validation,
            );
        }
    }
}

/// Ronin laboratory result: qualifies on the `laboratory` category.
#[derive(Debug, Default, Clone, Copy)]
pub struct RoninLaboratoryResult;

impl Profile<Observation> for RoninLaboratoryResult {
    fn name(&self) -> &'static str {
        "RoninLaboratoryResult"
    }

    fn profile_url(&self) -> &'static str {
        profile_url::OBSERVATION_LABORATORY_RESULT
    }

    fn qualifies(&self, observation: &Observation) -> bool {
        has_category(&observation.category, "laboratory")
    }

    fn standard_validator(&self) -> &dyn ResourceValidator<Observation> {
        &R4ObservationValidator
    }

    fn validate_profile(
        &self,
        observation: &Observation,
        parent: &ElementPath,
        validation: &mut Validation,
    ) {
        validate_ronin_observation(observation, parent, validation);
        validation.check_true(
            has_category(&observation.category, "laboratory"),
            Issue::LaboratoryCategory,
            &parent.field("category"),
        );
    }
}

/// Ronin observation for anything no more specific profile accepts.
#[derive(Debug, Default, Clone, Copy)]
pub struct RoninObservation;

impl Profile<Observation> for RoninObservation {
    fn name(&self) -> &'static str {
        "RoninObservation"
    }

    fn profile_url(&self) -> &'static str {
        profile_url::OBSERVATION
    }

    fn qualifies(&self, _observation: &Observation) -> bool {
        true
    }

    fn standard_validator(&self) -> &dyn ResourceValidator<Observation> {
        &R4ObservationValidator
    }

    fn validate_profile(
        &self,
        observation: &Observation,
        parent: &ElementPath,
        validation: &mut Validation,
    ) {
        validate_ronin_observation(observation, parent, validation);
    }
}
