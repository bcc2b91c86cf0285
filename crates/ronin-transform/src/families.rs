//! The Ronin resource families and the standard registry wiring them.

use std::sync::Arc;

use ronin_model::{
    Appointment, Condition, DiagnosticReport, Location, MedicationStatement, Observation,
    Practitioner,
};
use ronin_normalization::{
    Localizer, NormalizationOptions, Normalizer, StandardNormalizer, TenantLocalizer,
};

use crate::concept_map::{ConceptMap, DiagnosticReportCodeMapper};
use crate::family::ResourceFamily;
use crate::options::PipelineOptions;
use crate::profiles::{
    RoninAppointment, RoninBloodPressure, RoninBodyHeight, RoninBodyWeight,
    RoninConditionEncounterDiagnosis, RoninConditionProblemsAndHealthConcerns,
    RoninDiagnosticReportLaboratory, RoninDiagnosticReportNoteExchange, RoninLaboratoryResult,
    RoninLocation, RoninMedicationStatement, RoninObservation, RoninPractitioner,
};
use crate::registry::TransformerRegistry;

/// Vital signs first, then laboratory results, then [`RoninObservation`].
pub fn ronin_observations(
    normalizer: Arc<dyn Normalizer<Observation>>,
    localizer: Arc<dyn Localizer<Observation>>,
) -> ResourceFamily<Observation> {
    ResourceFamily::new(normalizer, localizer)
        .with_profile(RoninBodyHeight)
        .with_profile(RoninBodyWeight)
        .with_profile(RoninBloodPressure)
        .with_profile(RoninLaboratoryResult)
        .with_default(RoninObservation)
}

/// Encounter diagnoses and problem list items. Conditions in neither
/// category have no profile.
pub fn ronin_conditions(
    normalizer: Arc<dyn Normalizer<Condition>>,
    localizer: Arc<dyn Localizer<Condition>>,
) -> ResourceFamily<Condition> {
    ResourceFamily::new(normalizer, localizer)
        .with_profile(RoninConditionEncounterDiagnosis)
        .with_profile(RoninConditionProblemsAndHealthConcerns)
}

/// Laboratory reports, then note exchange for everything else.
pub fn ronin_diagnostic_reports(
    normalizer: Arc<dyn Normalizer<DiagnosticReport>>,
    localizer: Arc<dyn Localizer<DiagnosticReport>>,
) -> ResourceFamily<DiagnosticReport> {
    ResourceFamily::new(normalizer, localizer)
        .with_profile(RoninDiagnosticReportLaboratory)
        .with_default(RoninDiagnosticReportNoteExchange)
}

pub fn ronin_locations(
    normalizer: Arc<dyn Normalizer<Location>>,
    localizer: Arc<dyn Localizer<Location>>,
) -> ResourceFamily<Location> {
    ResourceFamily::new(normalizer, localizer).with_default(RoninLocation)
}

pub fn ronin_appointments(
    normalizer: Arc<dyn Normalizer<Appointment>>,
    localizer: Arc<dyn Localizer<Appointment>>,
) -> ResourceFamily<Appointment> {
    ResourceFamily::new(normalizer, localizer).with_default(RoninAppointment)
}

pub fn ronin_practitioners(
    normalizer: Arc<dyn Normalizer<Practitioner>>,
    localizer: Arc<dyn Localizer<Practitioner>>,
) -> ResourceFamily<Practitioner> {
    ResourceFamily::new(normalizer, localizer).with_default(RoninPractitioner)
}

pub fn ronin_medication_statements(
    normalizer: Arc<dyn Normalizer<MedicationStatement>>,
    localizer: Arc<dyn Localizer<MedicationStatement>>,
) -> ResourceFamily<MedicationStatement> {
    ResourceFamily::new(normalizer, localizer).with_default(RoninMedicationStatement)
}

/// Settings for [`standard_registry`].
#[derive(Debug, Clone, Default)]
pub struct RegistryConfig {
    pub normalization: NormalizationOptions,
    pub pipeline: PipelineOptions,
    /// Enables concept mapping of `DiagnosticReport.code` when set.
    pub diagnostic_report_codes: Option<ConceptMap>,
}

impl RegistryConfig {
    pub fn with_normalization(mut self, options: NormalizationOptions) -> Self {
        self.normalization = options;
        self
    }

    pub fn with_pipeline(mut self, options: PipelineOptions) -> Self {
        self.pipeline = options;
        self
    }

    pub fn with_diagnostic_report_codes(mut self, concept_map: ConceptMap) -> Self {
        self.diagnostic_report_codes = Some(concept_map);
        self
    }
}

/// Registry with every Ronin family using [`StandardNormalizer`] and [`TenantLocalizer`].
pub fn standard_registry(config: &RegistryConfig) -> TransformerRegistry {
    let normalizer = Arc::new(StandardNormalizer::new(config.normalization.clone()));
    let localizer = Arc::new(TenantLocalizer);
    let pipeline = config.pipeline;

    let mut diagnostic_reports = ronin_diagnostic_reports(normalizer.clone(), localizer.clone());
    if let Some(concept_map) = &config.diagnostic_report_codes {
        diagnostic_reports = diagnostic_reports
            .with_concept_mapper(Arc::new(DiagnosticReportCodeMapper::new(concept_map.clone())));
    }

    TransformerRegistry::new()
        .with(ronin_appointments(normalizer.clone(), localizer.clone()).with_options(pipeline))
        .with(ronin_conditions(normalizer.clone(), localizer.clone()).with_options(pipeline))
        .with(diagnostic_reports.with_options(pipeline))
        .with(ronin_locations(normalizer.clone(), localizer.clone()).with_options(pipeline))
        .with(
            ronin_medication_statements(normalizer.clone(), localizer.clone())
                .with_options(pipeline),
        )
        .with(ronin_observations(normalizer.clone(), localizer.clone()).with_options(pipeline))
        .with(ronin_practitioners(normalizer, localizer).with_options(pipeline))
}
