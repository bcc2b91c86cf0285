//! Dispatch across the profiles of one resource type.

use std::sync::Arc;

use ronin_model::{DomainResource, Tenant};
use ronin_normalization::{Localizer, Normalizer};
use ronin_validate::{ElementPath, Issue, Validation};
use tracing::{debug, debug_span, warn};

use crate::concept_map::ConceptMapper;
use crate::options::PipelineOptions;
use crate::profile::Profile;

/// Ordered profiles for resource type `R` with their collaborators.
///
/// Profiles are tried in registration order and the first that qualifies
/// wins, so more specific profiles must be registered first. The default
/// profile, when present, is tried last.
pub struct ResourceFamily<R: DomainResource> {
    profiles: Vec<Box<dyn Profile<R>>>,
    default_profile: Option<Box<dyn Profile<R>>>,
    normalizer: Arc<dyn Normalizer<R>>,
    localizer: Arc<dyn Localizer<R>>,
    concept_mapper: Option<Arc<dyn ConceptMapper<R>>>,
    options: PipelineOptions,
}

impl<R: DomainResource> ResourceFamily<R> {
    /// Creates a family with no profiles.
    pub fn new(normalizer: Arc<dyn Normalizer<R>>, localizer: Arc<dyn Localizer<R>>) -> Self {
        Self {
            profiles: Vec::new(),
            default_profile: None,
            normalizer,
            localizer,
            concept_mapper: None,
            options: PipelineOptions::default(),
        }
    }

    /// Registers `profile` after those already registered.
    pub fn with_profile(mut self, profile: impl Profile<R> + 'static) -> Self {
        self.profiles.push(Box::new(profile));
        self
    }

    /// Sets the profile tried after every registered one.
    pub fn with_default(mut self, profile: impl Profile<R> + 'static) -> Self {
        self.default_profile = Some(Box::new(profile));
        self
    }

    /// Adds a concept mapping step between normalization and transformation.
    pub fn with_concept_mapper(mut self, mapper: Arc<dyn ConceptMapper<R>>) -> Self {
        self.concept_mapper = Some(mapper);
        self
    }

    pub fn with_options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }

    /// Profile names in the order they are tried, default last.
    pub fn profile_names(&self) -> Vec<&'static str> {
        self.candidates().map(|profile| profile.name()).collect()
    }

    fn candidates(&self) -> impl Iterator<Item = &dyn Profile<R>> {
        self.profiles
            .iter()
            .chain(self.default_profile.iter())
            .map(|profile| profile.as_ref())
    }

    /// First profile in priority order that qualifies `resource`.
    pub fn qualifying_profile(&self, resource: &R) -> Option<&dyn Profile<R>> {
        self.candidates().find(|profile| profile.qualifies(resource))
    }

    /// True when some profile, including the default, qualifies `resource`.
    pub fn qualifies(&self, resource: &R) -> bool {
        self.qualifying_profile(resource).is_some()
    }

    /// Validates `resource` against its qualifying profile.
    pub fn validate(&self, resource: &R, parent: &ElementPath) -> Validation {
        match self.qualifying_profile(resource) {
            Some(profile) => profile.validate(resource, parent),
            None => no_qualifying_profile::<R>(parent),
        }
    }

    /// Normalizes, selects a profile, maps concepts, transforms, localizes and
    /// re-validates `resource`.
    ///
    /// Returns `None` when no profile qualifies or the profile cannot
    /// transform the resource. The validation always explains why.
    pub fn transform(&self, resource: R, tenant: &Tenant) -> (Option<R>, Validation) {
        let span = debug_span!(
            "transform",
            resource_type = %R::RESOURCE_TYPE,
            tenant = %tenant,
        );
        let _enter = span.enter();

        let parent = ElementPath::resource(R::RESOURCE_TYPE);
        let normalized = self.normalizer.normalize(resource, tenant);

        let Some(profile) = self.qualifying_profile(&normalized) else {
            warn!(id = normalized.id(), "no qualifying profile");
            return (None, no_qualifying_profile::<R>(&parent));
        };
        debug!(profile = profile.name(), "selected profile");

        let mut validation = Validation::new();
        let mapped = match &self.concept_mapper {
            Some(mapper) => {
                let (mapped, mapping) = mapper.map(normalized, &parent, tenant);
                validation.merge_from(mapping);
                mapped
            }
            None => normalized,
        };

        let (transformed, transform_validation) =
            profile.transform_internal(&mapped, &parent, tenant);
        validation.merge_from(transform_validation);
        let Some(transformed) = transformed else {
            warn!(profile = profile.name(), id = mapped.id(), "transform failed");
            return (None, validation);
        };

        let localized = self.localizer.localize(transformed, tenant);

        let final_profile = if self.options.reresolve_after_localization {
            let Some(reresolved) = self.qualifying_profile(&localized) else {
                warn!(id = localized.id(), "no qualifying profile after localization");
                validation.merge_from(no_qualifying_profile::<R>(&parent));
                return (None, validation);
            };
            if reresolved.name() != profile.name() {
                debug!(
                    from = profile.name(),
                    to = reresolved.name(),
                    "profile changed after localization"
                );
            }
            reresolved
        } else {
            profile
        };

        validation.merge_from(final_profile.validate(&localized, &parent));
        debug!(
            profile = final_profile.name(),
            issues = validation.issues().len(),
            "transformed"
        );
        (Some(localized), validation)
    }
}

fn no_qualifying_profile<R: DomainResource>(parent: &ElementPath) -> Validation {
    Validation::from_issue(
        Issue::NoQualifyingProfile {
            resource_type: R::RESOURCE_TYPE.to_string(),
        },
        parent.clone(),
    )
}
