use ronin_model::ronin::profile_url;
use ronin_model::{Location, Tenant};
use ronin_validate::r4::R4LocationValidator;
use ronin_validate::{ElementPath, ResourceValidator, Validation};

use crate::profile::Profile;

/// Name given to locations the source system left unnamed.
pub const UNNAMED_LOCATION: &str = "Unnamed Location";

/// Ronin Location. Qualifies every Location.
#[derive(Debug, Default, Clone, Copy)]
pub struct RoninLocation;

impl Profile<Location> for RoninLocation {
    fn name(&self) -> &'static str {
        "RoninLocation"
    }

    fn profile_url(&self) -> &'static str {
        profile_url::LOCATION
    }

    fn qualifies(&self, _resource: &Location) -> bool {
        true
    }

    fn standard_validator(&self) -> &dyn ResourceValidator<Location> {
        &R4LocationValidator
    }

    fn validate_profile(
        &self,
        location: &Location,
        parent: &ElementPath,
        validation: &mut Validation,
    ) {
        validation.require(location.name.as_ref(), &parent.field("name"));
    }

    fn map_fields(
        &self,
        mut location: Location,
        _parent: &ElementPath,
        _tenant: &Tenant) -> (Option<Location>, Validation,
    ) {
        if location.name.as_deref().is_none_or(|name| name.trim().is_empty()) {
            location.name = Some(UNNAMED_LOCATION.to_string());
        }
        (Some(location), Validation::new())
    }
}

#[cfg(test)]
mod tests {
    use ronin_model::ResourceType;

    use super::*;

    fn map_name(name: Option<&str>) -> Option<String> {
        let location = Location {
            name: name.map(str::to_string),
            ..Location::default()
        };
        let (mapped, validation) = RoninLocation.map_fields(
            location,
            &ElementPath::resource(ResourceType::Location),
            &Tenant::new("test").unwrap(),
        );
        assert!(validation.is_empty());
        mapped.unwrap().name
    }

    #[test]
    fn missing_or_blank_names_become_unnamed_location() {
        assert_eq!(map_name(None).as_deref(), Some(UNNAMED_LOCATION));
        assert_eq!(map_name(Some("  ")).as_deref(), Some(UNNAMED_LOCATION));
        assert_eq!(map_name(Some("Main Clinic")).as_deref(), Some("Main Clinic"));
    }
}
