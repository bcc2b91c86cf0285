use serde::{Deserialize, Serialize};

use crate::datatypes::{
    Annotation, CodeableConcept, Effective, Extension, Identifier, Meta, Narrative, Quantity,
    Reference,
};
use crate::resource::Resource;
use crate::walk::{ElementVisitor, Walk, walk_fields};

/// `MedicationStatement.medication[x]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StatementMedication {
    #[serde(rename = "medicationCodeableConcept")]
    CodeableConcept(CodeableConcept),
    #[serde(rename = "medicationReference")]
    Reference(Reference),
}

impl Walk for StatementMedication {
    fn walk_mut(&mut self, visitor: &mut dyn ElementVisitor) {
        match self {
            StatementMedication::CodeableConcept(concept) => concept.walk_mut(visitor),
            StatementMedication::Reference(reference) => reference.walk_mut(visitor),
        }
    }
}

/// [MedicationStatement](https://hl7.org/fhir/R4/medicationstatement.html)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationStatement {
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
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub based_on: Vec<Reference>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub part_of: Vec<Reference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub status_reason: Vec<CodeableConcept>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CodeableConcept>,
    #[serde(flatten)]
    pub medication: Option<StatementMedication>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<Reference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Reference>,
    #[serde(flatten)]
    pub effective: Option<Effective>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_asserted: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub information_source: Option<Reference>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub derived_from: Vec<Reference>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reason_code: Vec<CodeableConcept>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reason_reference: Vec<Reference>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub note: Vec<Annotation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dosage: Vec<Dosage>,
}

/// [Dosage](https://hl7.org/fhir/R4/dosage.html), without timing and `asNeeded[x]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dosage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_instruction: Vec<CodeableConcept>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_instruction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<CodeableConcept>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<CodeableConcept>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<CodeableConcept>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dose_and_rate: Vec<DosageDose>,
}

/// `Dosage.doseAndRate` restricted to `doseQuantity`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DosageDose {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<CodeableConcept>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dose_quantity: Option<Quantity>,
}

impl Walk for MedicationStatement {
    fn walk_mut(&mut self, visitor: &mut dyn ElementVisitor) {
        walk_fields!(self, visitor;
            meta, contained, extension, modifier_extension, identifier,
            based_on, part_of, status_reason, category, medication, subject,
            context, information_source, derived_from, reason_code,
            reason_reference, note, dosage,
        );
    }
}

impl Walk for Dosage {
    fn walk_mut(&mut self, visitor: &mut dyn ElementVisitor) {
        walk_fields!(self, visitor;
            additional_instruction, site, route, method, dose_and_rate,
        );
    }
}

impl Walk for DosageDose {
    fn walk_mut(&mut self, visitor: &mut dyn ElementVisitor) {
        self.type_.walk_mut(visitor);
    }
}
