//! Tenant scoping and normalization for the Ronin profile pipeline.
//!
//! # Overview
//!
//! - **Identifier utilities**: tenant-prefixed ids and references, and the
//!   tenant and FHIR id identifiers every Ronin resource carries.
//! - **Normalizer**: idempotent cleanup applied before a profile is chosen.
//! - **Localizer**: reference rewriting applied after a profile transforms.
//!
//! Both collaborators are traits so pipelines can inject their own.

mod identifiers;
mod localizer;
mod normalizer;
mod options;

pub use identifiers::{
    append_ronin_identifiers, fhir_id_identifier, is_fhir_id_identifier, is_tenant_identifier,
    localize_id, localize_reference, tenant_identifier,
};
pub use localizer::{Localizer, TenantLocalizer};
pub use normalizer::{Normalizer, StandardNormalizer, canonical_system};
pub use options::NormalizationOptions;
