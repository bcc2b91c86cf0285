//! Hierarchical element paths used to locate validation issues.

use std::fmt;

use ronin_model::ResourceType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
enum Segment {
    Field(String),
    Index(usize),
}

/// Dotted and indexed path rooted at a resource type, e.g.
/// `Observation.component[0].code`.
///
/// Builder methods return a new path so a parent can be shared by the
/// checks of all its children.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementPath {
    root: String,
    segments: Vec<Segment>,
}

impl ElementPath {
    /// Path naming a whole resource.
    pub fn resource(resource_type: ResourceType) -> Self {
        Self::root(resource_type.as_str())
    }

    /// Path rooted at an arbitrary element name.
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            root: name.into(),
            segments: Vec::new(),
        }
    }

    /// Child element `name`.
    pub fn field(&self, name: impl Into<String>) -> Self {
        let mut path = self.clone();
        path.segments.push(Segment::Field(name.into()));
        path
    }

    /// Element `index` of a repeating element.
    pub fn index(&self, index: usize) -> Self {
        let mut path = self.clone();
        path.segments.push(Segment::Index(index));
        path
    }

    /// Name of the innermost element, ignoring indexes.
    pub fn element_name(&self) -> &str {
        self.segments
            .iter()
            .rev()
            .find_map(|segment| match segment {
                Segment::Field(name) => Some(name.as_str()),
                Segment::Index(_) => None,
            })
            .unwrap_or(&self.root)
    }
}

impl fmt::Display for ElementPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.root)?;
        for segment in &self.segments {
            match segment {
                Segment::Field(name) => write!(f, ".{name}")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}
