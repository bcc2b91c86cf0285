//! The `Resource` sum type and the accessors shared by every resource.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::datatypes::{Extension, Identifier, Meta};
use crate::error::{ModelError, Result};
use crate::resources::{
    Appointment, Condition, DiagnosticReport, Location, MedicationStatement, Observation,
    Practitioner,
};
use crate::walk::{ElementVisitor, Walk};

/// Resource types with Ronin profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ResourceType {
    Appointment,
    Condition,
    DiagnosticReport,
    Location,
    MedicationStatement,
    Observation,
    Practitioner,
}

impl ResourceType {
    pub const ALL: [ResourceType; 7] = [
        ResourceType::Appointment,
        ResourceType::Condition,
        ResourceType::DiagnosticReport,
        ResourceType::Location,
        ResourceType::MedicationStatement,
        ResourceType::Observation,
        ResourceType::Practitioner,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Appointment => "Appointment",
            ResourceType::Condition => "Condition",
            ResourceType::DiagnosticReport => "DiagnosticReport",
            ResourceType::Location => "Location",
            ResourceType::MedicationStatement => "MedicationStatement",
            ResourceType::Observation => "Observation",
            ResourceType::Practitioner => "Practitioner",
        }
    }

    /// Parse a FHIR resource type name. Returns None for types without a profile.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.as_str() == name)
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Any resource this crate models, tagged by `resourceType` in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "resourceType")]
pub enum Resource {
    Appointment(Appointment),
    Condition(Condition),
    DiagnosticReport(DiagnosticReport),
    Location(Location),
    MedicationStatement(MedicationStatement),
    Observation(Observation),
    Practitioner(Practitioner),
}

impl Resource {
    pub fn resource_type(&self) -> ResourceType {
        match self {
            Resource::Appointment(_) => ResourceType::Appointment,
            Resource::Condition(_) => ResourceType::Condition,
            Resource::DiagnosticReport(_) => ResourceType::DiagnosticReport,
            Resource::Location(_) => ResourceType::Location,
            Resource::MedicationStatement(_) => ResourceType::MedicationStatement,
            Resource::Observation(_) => ResourceType::Observation,
            Resource::Practitioner(_) => ResourceType::Practitioner,
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            Resource::Appointment(r) => r.id(),
            Resource::Condition(r) => r.id(),
            Resource::DiagnosticReport(r) => r.id(),
            Resource::Location(r) => r.id(),
            Resource::MedicationStatement(r) => r.id(),
            Resource::Observation(r) => r.id(),
            Resource::Practitioner(r) => r.id(),
        }
    }

    /// Parse FHIR JSON into a resource.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Walk for Resource {
    fn walk_mut(&mut self, visitor: &mut dyn ElementVisitor) {
        match self {
            Resource::Appointment(r) => r.walk_mut(visitor),
            Resource::Condition(r) => r.walk_mut(visitor),
            Resource::DiagnosticReport(r) => r.walk_mut(visitor),
            Resource::Location(r) => r.walk_mut(visitor),
            Resource::MedicationStatement(r) => r.walk_mut(visitor),
            Resource::Observation(r) => r.walk_mut(visitor),
            Resource::Practitioner(r) => r.walk_mut(visitor),
        }
    }
}

/// Elements every modelled resource carries.
///
/// Profiles, validators and localizers are generic over this trait so a
/// single implementation serves all resource types.
pub trait DomainResource: Clone + fmt::Debug + Walk + Send + Sync + 'static {
    const RESOURCE_TYPE: ResourceType;

    fn id(&self) -> Option<&str>;
    fn set_id(&mut self, id: Option<String>);

    fn meta(&self) -> Option<&Meta>;
    fn set_meta(&mut self, meta: Option<Meta>);

    fn identifier(&self) -> &[Identifier];
    fn identifier_mut(&mut self) -> &mut Vec<Identifier>;

    fn extension(&self) -> &[Extension];
    fn extension_mut(&mut self) -> &mut Vec<Extension>;

    fn from_resource(resource: Resource) -> Result<Self>;
    fn into_resource(self) -> Resource;
}

macro_rules! impl_domain_resource {
    ($($ty:ident),* $(,)?) => {
        $(
            impl DomainResource for $ty {
                const RESOURCE_TYPE: ResourceType = ResourceType::$ty;

                fn id(&self) -> Option<&str> {
                    self.id.as_deref()
                }

                fn set_id(&mut self, id: Option<String>) {
                    self.id = id;
                }

                fn meta(&self) -> Option<&Meta> {
                    self.meta.as_ref()
                }

                fn set_meta(&mut self, meta: Option<Meta>) {
                    self.meta = meta;
                }

                fn identifier(&self) -> &[Identifier] {
                    &self.identifier
                }

                fn identifier_mut(&mut self) -> &mut Vec<Identifier> {
                    &mut self.identifier
                }

                fn extension(&self) -> &[Extension] {
                    &self.extension
                }

                fn extension_mut(&mut self) -> &mut Vec<Extension> {
                    &mut self.extension
                }

                fn from_resource(resource: Resource) -> Result<Self> {
                    match resource {
                        Resource::$ty(inner) => Ok(inner),
                        other => Err(ModelError::UnexpectedResourceType {
                            expected: ResourceType::$ty.as_str().to_string(),
                            found: other.resource_type().as_str().to_string(),
                        }),
                    }
                }

                fn into_resource(self) -> Resource {
                    Resource::$ty(self)
                }
            }

            impl From<$ty> for Resource {
                fn from(value: $ty) -> Self {
                    Resource::$ty(value)
                }
            }
        )*
    };
}

impl_domain_resource!(
    Appointment,
    Condition,
    DiagnosticReport,
    Location,
    MedicationStatement,
    Observation,
    Practitioner,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_type_names_round_trip() {
        for ty in ResourceType::ALL {
            assert_eq!(ResourceType::parse(ty.as_str()), Some(ty));
        }
        assert_eq!(ResourceType::parse("Patient"), None);
    }

    #[test]
    fn from_resource_rejects_other_types() {
        let resource = Resource::Location(Location::default());
        let err = Appointment::from_resource(resource).unwrap_err();
        assert_eq!(
            err,
            ModelError::UnexpectedResourceType {
                expected: "Appointment".to_string(),
                found: "Location".to_string(),
            }
        );
    }

    #[test]
    fn resource_json_is_tagged_by_resource_type() {
        let resource = Resource::from_json(r#"{"resourceType":"Location","id":"12345"}"#).unwrap();
        assert_eq!(resource.resource_type(), ResourceType::Location);
        assert_eq!(resource.id(), Some("12345"));
        assert!(resource.to_json().unwrap().contains(r#""resourceType":"Location""#));
    }
}
