use serde::{Deserialize, Serialize};

use crate::datatypes::{
    Annotation, CodeableConcept, Extension, Identifier, Meta, Narrative, Period, Quantity,
    Reference,
};
use crate::resource::Resource;
use crate::walk::{ElementVisitor, Walk, walk_fields};

/// `Condition.onset[x]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConditionOnset {
    #[serde(rename = "onsetDateTime")]
    DateTime(String),
    #[serde(rename = "onsetAge")]
    Age(Quantity),
    #[serde(rename = "onsetPeriod")]
    Period(Period),
    #[serde(rename = "onsetString")]
    String(String),
}

/// `Condition.abatement[x]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConditionAbatement {
    #[serde(rename = "abatementDateTime")]
    DateTime(String),
    #[serde(rename = "abatementAge")]
    Age(Quantity),
    #[serde(rename = "abatementPeriod")]
    Period(Period),
    #[serde(rename = "abatementString")]
    String(String),
}

/// [Condition](https://hl7.org/fhir/R4/condition.html)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implicit_rules: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<Narrative>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contained: Vec<Resource>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifier_extension: Vec<Extension>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<Identifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clinical_status: Option<CodeableConcept>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_status: Option<CodeableConcept>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub category: Vec<CodeableConcept>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<CodeableConcept>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeableConcept>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub body_site: Vec<CodeableConcept>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<Reference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encounter: Option<Reference>,
    #[serde(flatten)]
    pub onset: Option<ConditionOnset>,
    #[serde(flatten)]
    pub abatement: Option<ConditionAbatement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorder: Option<Reference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asserter: Option<Reference>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stage: Vec<ConditionStage>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub evidence: Vec<ConditionEvidence>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub note: Vec<Annotation>,
}

/// `Condition.stage`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConditionStage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<CodeableConcept>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assessment: Vec<Reference>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<CodeableConcept>,
}

/// `Condition.evidence`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConditionEvidence {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub code: Vec<CodeableConcept>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub detail: Vec<Reference>,
}

impl Walk for Condition {
    fn walk_mut(&mut self, visitor: &mut dyn ElementVisitor) {
        walk_fields!(self, visitor;
            meta, contained, extension, modifier_extension, identifier,
            clinical_status, verification_status, category, severity, code,
            body_site, subject, encounter, recorder, asserter, stage,
            evidence, note,
        );
    }
}

impl Walk for ConditionStage {
    fn walk_mut(&mut self, visitor: &mut dyn ElementVisitor) {
        walk_fields!(self, visitor; summary, assessment, type_);
    }
}

impl Walk for ConditionEvidence {
    fn walk_mut(&mut self, visitor: &mut dyn ElementVisitor) {
        walk_fields!(self, visitor; code, detail);
    }
}
