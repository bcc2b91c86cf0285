//! Profile dispatch and transformation into Ronin profiles.
//!
//! # Architecture
//!
//! A [`Profile`] is one Ronin target for one resource type. A
//! [`ResourceFamily`] holds the profiles of a resource type in priority order
//! and runs the pipeline around the chosen one:
//!
//! 1. normalize the raw resource
//! 2. select the first qualifying profile
//! 3. map concepts, when the family has a [`ConceptMapper`]
//! 4. transform (tenant id, Ronin identifiers, `meta.profile`, field mapping)
//! 5. localize references
//! 6. select the profile again and validate the result
//!
//! The [`TransformerRegistry`] dispatches [`Resource`](ronin_model::Resource)
//! values to the family for their type.
//!
//! # Example
//!
//! ```ignore
//! use ronin_model::{Resource, Tenant};
//! use ronin_transform::default_registry;
//!
//! let tenant = Tenant::new("test")?;
//! let resource = Resource::from_json(json)?;
//! let (transformed, validation) = default_registry().transform(resource, &tenant);
//! validation.alert_if_errors()?;
//! ```

mod concept_map;
mod families;
mod family;
mod options;
mod profile;
mod registry;

pub mod profiles;

pub use concept_map::{ConceptMap, ConceptMapper, DiagnosticReportCodeMapper};
pub use families::{
    RegistryConfig, ronin_appointments, ronin_conditions, ronin_diagnostic_reports,
    ronin_locations, ronin_medication_statements, ronin_observations, ronin_practitioners,
    standard_registry,
};
pub use family::ResourceFamily;
pub use options::PipelineOptions;
pub use profile::{Profile, WithStandardValidator};
pub use registry::{ResourceTransformer, TransformerRegistry, default_registry};
