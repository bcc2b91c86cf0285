//! Dynamic dispatch over [`Resource`] values.
//!
//! The [`TransformerRegistry`] routes each resource to the family for its
//! type. Resource types without a registered family are reported as
//! having no qualifying profile.

use std::collections::HashMap;
use std::sync::OnceLock;

use ronin_model::{DomainResource, Resource, ResourceType, Tenant};
use ronin_validate::{ElementPath, Issue, Validation};
use tracing::warn;

use crate::family::ResourceFamily;

/// Object-safe view of a [`ResourceFamily`] over the [`Resource`] enum.
pub trait ResourceTransformer: Send + Sync {
    fn resource_type(&self) -> ResourceType;

    fn qualifies(&self, resource: &Resource) -> bool;

    fn validate(&self, resource: &Resource, parent: &ElementPath) -> Validation;

    fn transform(&self, resource: Resource, tenant: &Tenant) -> (Option<Resource>, Validation);
}

impl<R: DomainResource> ResourceTransformer for ResourceFamily<R> {
    fn resource_type(&self) -> ResourceType {
        R::RESOURCE_TYPE
    }

    fn qualifies(&self, resource: &Resource) -> bool {
        R::from_resource(resource.clone())
            .is_ok_and(|typed| ResourceFamily::qualifies(self, &typed))
    }

    fn validate(&self, resource: &Resource, parent: &ElementPath) -> Validation {
        match R::from_resource(resource.clone()) {
            Ok(typed) => ResourceFamily::validate(self, &typed, parent),
            Err(_) => unsupported(resource.resource_type(), parent.clone()),
        }
    }

    fn transform(&self, resource: Resource, tenant: &Tenant) -> (Option<Resource>, Validation) {
        let resource_type = resource.resource_type();
        match R::from_resource(resource) {
            Ok(typed) => {
                let (transformed, validation) = ResourceFamily::transform(self, typed, tenant);
                (transformed.map(DomainResource::into_resource), validation)
            }
            Err(_) => (None, unsupported(resource_type, ElementPath::resource(resource_type))),
        }
    }
}

fn unsupported(resource_type: ResourceType, location: ElementPath) -> Validation {
    Validation::from_issue(
        Issue::NoQualifyingProfile {
            resource_type: resource_type.to_string(),
        },
        location,
    )
}

/// Families indexed by the resource type they transform.
#[derive(Default)]
pub struct TransformerRegistry {
    transformers: HashMap<ResourceType, Box<dyn ResourceTransformer>>,
}

impl TransformerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a transformer for its resource type, replacing any earlier one.
    pub fn register(&mut self, transformer: Box<dyn ResourceTransformer>) {
        self.transformers.insert(transformer.resource_type(), transformer);
    }

    /// Builder form of [`register`](Self::register).
    pub fn with(mut self, transformer: impl ResourceTransformer + 'static) -> Self {
        self.register(Box::new(transformer));
        self
    }

    pub fn get(&self, resource_type: ResourceType) -> Option<&dyn ResourceTransformer> {
        self.transformers.get(&resource_type).map(|t| t.as_ref())
    }

    pub fn len(&self) -> usize {
        self.transformers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transformers.is_empty()
    }

    /// Registered resource types in a stable order.
    pub fn resource_types(&self) -> Vec<ResourceType> {
        let mut types: Vec<_> = self.transformers.keys().copied().collect();
        types.sort();
        types
    }

    /// True when a registered family has a profile for `resource`.
    pub fn qualifies(&self, resource: &Resource) -> bool {
        self.get(resource.resource_type())
            .is_some_and(|transformer| transformer.qualifies(resource))
    }

    pub fn validate(&self, resource: &Resource) -> Validation {
        let resource_type = resource.resource_type();
        let parent = ElementPath::resource(resource_type);
        match self.get(resource_type) {
            Some(transformer) => transformer.validate(resource, &parent),
            None => unsupported(resource_type, parent),
        }
    }

    pub fn transform(&self, resource: Resource, tenant: &Tenant) -> (Option<Resource>, Validation) {
        let resource_type = resource.resource_type();
        match self.get(resource_type) {
            Some(transformer) => transformer.transform(resource, tenant),
            None => {
                warn!(resource_type = %resource_type, "no transformer registered");
                (None, unsupported(resource_type, ElementPath::resource(resource_type)))
            }
        }
    }
}

static DEFAULT_REGISTRY: OnceLock<TransformerRegistry> = OnceLock::new();

/// Registry with every Ronin family and default collaborators, built on first use.
///
/// Diagnostic reports are not concept mapped; use
/// [`standard_registry`](crate::standard_registry) with a [`ConceptMap`](crate::ConceptMap)
/// for that.
pub fn default_registry() -> &'static TransformerRegistry {
    DEFAULT_REGISTRY
        .get_or_init(|| crate::families::standard_registry(&crate::RegistryConfig::default()))
}
