//! Concept mapping between tenant source codes and Ronin target codes.
//!
//! Map content is supplied by the caller; this module only defines how a map
//! is consulted and how a resource records the translation.

use std::collections::BTreeMap;

use ronin_model::ronin::TENANT_SOURCE_DIAGNOSTIC_REPORT_CODE_EXTENSION;
use ronin_model::{
    CodeableConcept, Coding, DiagnosticReport, Extension, ExtensionValue, Tenant,
};
use ronin_validate::{ElementPath, Issue, Validation};
use tracing::debug;

/// Translates coded values of `R` before the structural transform.
pub trait ConceptMapper<R>: Send + Sync {
    fn map(&self, resource: R, parent: &ElementPath, tenant: &Tenant) -> (R, Validation);
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct ConceptKey {
    tenant: String,
    system: String,
    code: String,
}

/// In-memory concept map: (tenant, source system, source code) to target coding.
#[derive(Debug, Clone, Default)]
pub struct ConceptMap {
    entries: BTreeMap<ConceptKey, Coding>,
}

impl ConceptMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        tenant: &Tenant,
        source_system: impl Into<String>,
        source_code: impl Into<String>,
        target: Coding,
    ) {
        let key = ConceptKey {
            tenant: tenant.mnemonic().to_string(),
            system: source_system.into(),
            code: source_code.into(),
        };
        self.entries.insert(key, target);
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_entry(
        mut self,
        tenant: &Tenant,
        source_system: impl Into<String>,
        source_code: impl Into<String>,
        target: Coding,
    ) -> Self {
        self.insert(tenant, source_system, source_code, target);
        self
    }

    /// Target for one source coding, if the tenant maps it.
    pub fn lookup(&self, tenant: &Tenant, source: &Coding) -> Option<&Coding> {
        let key = ConceptKey {
            tenant: tenant.mnemonic().to_string(),
            system: source.system.clone()?,
            code: source.code.clone()?,
        };
        self.entries.get(&key)
    }

    /// Target for the first coding of `concept` the tenant maps.
    pub fn lookup_concept(&self, tenant: &Tenant, concept: &CodeableConcept) -> Option<&Coding> {
        concept
            .coding
            .iter()
            .find_map(|coding| self.lookup(tenant, coding))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Maps `DiagnosticReport.code` through a [`ConceptMap`].
///
/// A mapped code replaces `code` and the tenant's concept is kept in the
/// `tenant-sourceDiagnosticReportCode` extension. An unmapped code leaves the
/// report unchanged and records `RONIN_CONMAP_001`.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticReportCodeMapper {
    concept_map: ConceptMap,
}

impl DiagnosticReportCodeMapper {
    pub fn new(concept_map: ConceptMap) -> Self {
        Self { concept_map }
    }
}

impl ConceptMapper<DiagnosticReport> for DiagnosticReportCodeMapper {
    fn map(
        &self,
        mut report: DiagnosticReport,
        parent: &ElementPath,
        tenant: &Tenant,
    ) -> (DiagnosticReport, Validation) {
        let mut validation = Validation::new();
        let Some(source) = report.code.take() else {
            return (report, validation);
        };

        match self.concept_map.lookup_concept(tenant, &source) {
            Some(target) => {
                debug!(element = "DiagnosticReport.code", "mapped tenant concept");
                report.code = Some(CodeableConcept {
                    coding: vec![target.clone()],
                    text: source.text.clone(),
                });
                report.extension.push(Extension::new(
                    TENANT_SOURCE_DIAGNOSTIC_REPORT_CODE_EXTENSION,
                    ExtensionValue::CodeableConcept(source),
                ));
            }
            None => {
                validation.push(
                    Issue::UnmappedConcept {
                        element: "DiagnosticReport.code".to_string(),
                        source: describe(&source),
                    },
                    parent.field("code"),
                );
                report.code = Some(source);
            }
        }
        (report, validation)
    }
}

/// `system|code` of the first coding, or the concept text.
fn describe(concept: &CodeableConcept) -> String {
    concept
        .coding
        .first()
        .map(|coding| {
            format!(
                "{}|{}",
                coding.system.as_deref().unwrap_or_default(),
                coding.code.as_deref().unwrap_or_default()
            )
        })
        .or_else(|| concept.text.clone())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use ronin_model::ronin::LOINC_SYSTEM;

    use super::*;

    fn tenant() -> Tenant {
        Tenant::new("test").unwrap()
    }

    fn report(system: &str, code: &str) -> DiagnosticReport {
        DiagnosticReport {
            code: Some(CodeableConcept::from_coding(Coding::new(system, code)).with_text("Panel")),
            ..DiagnosticReport::default()
        }
    }

    fn mapper() -> DiagnosticReportCodeMapper {
        DiagnosticReportCodeMapper::new(ConceptMap::new().with_entry(
            &tenant(),
            "urn:tenant:codes",
            "CBC",
            Coding::new(LOINC_SYSTEM, "58410-2"),
        ))
    }

    #[test]
    fn mapped_code_replaces_code_and_keeps_source() {
        let source = report("urn:tenant:codes", "CBC");
        let (mapped, validation) =
            mapper().map(source.clone(), &ElementPath::root("DiagnosticReport"), &tenant());

        assert!(validation.is_empty());
        let code = mapped.code.unwrap();
        assert!(code.has_coding(LOINC_SYSTEM, "58410-2"));
        assert_eq!(code.text.as_deref(), Some("Panel"));
        assert_eq!(
            mapped.extension,
            vec![Extension::new(
                TENANT_SOURCE_DIAGNOSTIC_REPORT_CODE_EXTENSION,
                ExtensionValue::CodeableConcept(source.code.unwrap()),
            )]
        );
    }

    #[test]
    fn unmapped_code_is_reported_and_left_alone() {
        let source = report("urn:tenant:codes", "BMP");
        let (mapped, validation) =
            mapper().map(source.clone(), &ElementPath::root("DiagnosticReport"), &tenant());

        assert_eq!(mapped, source);
        assert_eq!(
            validation.issues()[0].to_string(),
            "ERROR RONIN_CONMAP_001: Tenant source DiagnosticReport.code 'urn:tenant:codes|BMP' has no target defined in the concept map @ DiagnosticReport.code"
        );
    }

    #[test]
    fn maps_are_tenant_scoped() {
        let other = Tenant::new("other").unwrap();
        let (_, validation) = mapper().map(
            report("urn:tenant:codes", "CBC"),
            &ElementPath::root("DiagnosticReport"),
            &other,
        );
        assert_eq!(validation.codes(), vec!["RONIN_CONMAP_001"]);
    }
}
