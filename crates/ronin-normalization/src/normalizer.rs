//! Pre-transform cleanup of raw resources.

use ronin_model::{Coding, ElementVisitor, Identifier, Tenant, Walk};
use tracing::trace;

use crate::options::NormalizationOptions;

/// Cleans up a raw resource before profile selection.
///
/// Implementations must be idempotent and must not change the resource id.
pub trait Normalizer<R>: Send + Sync {
    fn normalize(&self, resource: R, tenant: &Tenant) -> R;
}

/// OID forms of code systems and their canonical URIs.
const CANONICAL_SYSTEMS: &[(&str, &str)] = &[
    ("urn:oid:2.16.840.1.113883.6.1", "http://loinc.org"),
    ("urn:oid:2.16.840.1.113883.6.96", "http://snomed.info/sct"),
    ("urn:oid:2.16.840.1.113883.6.88", "http://www.nlm.nih.gov/research/umls/rxnorm"),
    ("urn:oid:2.16.840.1.113883.6.90", "http://hl7.org/fhir/sid/icd-10-cm"),
    ("urn:oid:2.16.840.1.113883.6.12", "http://www.ama-assn.org/go/cpt"),
    ("urn:oid:2.16.840.1.113883.6.8", "http://unitsofmeasure.org"),
    ("urn:oid:2.16.840.1.113883.6.69", "http://hl7.org/fhir/sid/ndc"),
    ("urn:oid:2.16.840.1.113883.12.292", "http://hl7.org/fhir/sid/cvx"),
];

/// Canonical URI for a known OID system.
pub fn canonical_system(system: &str) -> Option<&'static str> {
    CANONICAL_SYSTEMS
        .iter()
        .find(|(oid, _)| *oid == system)
        .map(|(_, uri)| *uri)
}

/// Normalizer applying [`NormalizationOptions`] to every coding and identifier.
#[derive(Debug, Clone, Default)]
pub struct StandardNormalizer {
    options: NormalizationOptions,
}

impl StandardNormalizer {
    pub fn new(options: NormalizationOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &NormalizationOptions {
        &self.options
    }

    fn resolve_system(&self, system: &str) -> Option<String> {
        if let Some(alias) = self.options.system_aliases.get(system) {
            return Some(alias.clone());
        }
        if self.options.canonical_systems {
            return canonical_system(system).map(str::to_string);
        }
        None
    }
}

impl<R: Walk + Send> Normalizer<R> for StandardNormalizer {
    fn normalize(&self, mut resource: R, _tenant: &Tenant) -> R {
        let mut visitor = NormalizeVisitor {
            normalizer: self,
            rewritten: 0,
        };
        resource.walk_mut(&mut visitor);
        trace!(rewritten = visitor.rewritten, "normalized code systems");
        resource
    }
}

struct NormalizeVisitor<'a> {
    normalizer: &'a StandardNormalizer,
    rewritten: usize,
}

impl NormalizeVisitor<'_> {
    fn rewrite(&mut self, system: &mut Option<String>) {
        let Some(current) = system.as_deref() else {
            return;
        };
        if let Some(resolved) = self.normalizer.resolve_system(current) {
            *system = Some(resolved);
            self.rewritten += 1;
        }
    }
}

impl ElementVisitor for NormalizeVisitor<'_> {
    fn visit_coding(&mut self, coding: &mut Coding) {
        if self.normalizer.options.trim_codings {
            trim_in_place(&mut coding.system);
            trim_in_place(&mut coding.code);
        }
        self.rewrite(&mut coding.system);
    }

    fn visit_identifier(&mut self, identifier: &mut Identifier) {
        if self.normalizer.options.identifier_systems {
            self.rewrite(&mut identifier.system);
        }
    }
}

fn trim_in_place(value: &mut Option<String>) {
    if let Some(text) = value {
        let trimmed = text.trim();
        if trimmed.len() != text.len() {
            *text = trimmed.to_string();
        }
    }
}
