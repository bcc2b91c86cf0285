//! Mutable traversal of the coded and referencing elements of a resource.
//!
//! Normalization and localization both need to touch every `Coding`,
//! `Identifier` or `Reference` wherever it is nested. Each model type
//! implements [`Walk`] by forwarding to its children; an [`ElementVisitor`]
//! decides what happens at the leaves.

use crate::datatypes::{
    Address, Annotation, AnnotationAuthor, CodeableConcept, Coding, ContactPoint, Effective,
    Extension, ExtensionValue, HumanName, Identifier, Meta, Narrative, Period, Quantity, Reference,
};

/// Callbacks invoked for every leaf element of interest.
///
/// All methods default to no-ops so visitors only implement what they change.
pub trait ElementVisitor {
    fn visit_coding(&mut self, _coding: &mut Coding) {}

    fn visit_identifier(&mut self, _identifier: &mut Identifier) {}

    fn visit_reference(&mut self, _reference: &mut Reference) {}
}

/// Types whose nested elements can be visited.
pub trait Walk {
    fn walk_mut(&mut self, visitor: &mut dyn ElementVisitor);
}

impl<T: Walk> Walk for Option<T> {
    fn walk_mut(&mut self, visitor: &mut dyn ElementVisitor) {
        if let Some(inner) = self {
            inner.walk_mut(visitor);
        }
    }
}

impl<T: Walk> Walk for Vec<T> {
    fn walk_mut(&mut self, visitor: &mut dyn ElementVisitor) {
        for item in self {
            item.walk_mut(visitor);
        }
    }
}

impl<T: Walk> Walk for Box<T> {
    fn walk_mut(&mut self, visitor: &mut dyn ElementVisitor) {
        self.as_mut().walk_mut(visitor);
    }
}

/// Implements [`Walk`] as a no-op for types without coded or referencing children.
macro_rules! walk_leaf {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Walk for $ty {
                fn walk_mut(&mut self, _visitor: &mut dyn ElementVisitor) {}
            }
        )*
    };
}

walk_leaf!(
    String,
    bool,
    u32,
    i32,
    i64,
    Period,
    Quantity,
    Narrative,
    ContactPoint,
    Address,
    HumanName,
    Effective,
);

/// Walks the listed fields of `$self` in order.
macro_rules! walk_fields {
    ($self:ident, $visitor:ident; $($field:ident),* $(,)?) => {
        $( $self.$field.walk_mut($visitor); )*
    };
}

pub(crate) use walk_fields;

impl Walk for Coding {
    fn walk_mut(&mut self, visitor: &mut dyn ElementVisitor) {
        visitor.visit_coding(self);
    }
}

impl Walk for CodeableConcept {
    fn walk_mut(&mut self, visitor: &mut dyn ElementVisitor) {
        self.coding.walk_mut(visitor);
    }
}

impl Walk for Identifier {
    fn walk_mut(&mut self, visitor: &mut dyn ElementVisitor) {
        visitor.visit_identifier(self);
        self.type_.walk_mut(visitor);
        self.assigner.walk_mut(visitor);
    }
}

impl Walk for Reference {
    fn walk_mut(&mut self, visitor: &mut dyn ElementVisitor) {
        visitor.visit_reference(self);
        self.identifier.walk_mut(visitor);
    }
}

impl Walk for Meta {
    fn walk_mut(&mut self, visitor: &mut dyn ElementVisitor) {
        walk_fields!(self, visitor; security, tag);
    }
}

impl Walk for Annotation {
    fn walk_mut(&mut self, visitor: &mut dyn ElementVisitor) {
        if let Some(AnnotationAuthor::Reference(reference)) = &mut self.author {
            reference.walk_mut(visitor);
        }
    }
}

impl Walk for ExtensionValue {
    fn walk_mut(&mut self, visitor: &mut dyn ElementVisitor) {
        match self {
            ExtensionValue::Coding(coding) => coding.walk_mut(visitor),
            ExtensionValue::CodeableConcept(concept) => concept.walk_mut(visitor),
            ExtensionValue::Reference(reference) => reference.walk_mut(visitor),
            ExtensionValue::String(_)
            | ExtensionValue::Code(_)
            | ExtensionValue::Boolean(_)
            | ExtensionValue::Integer(_)
            | ExtensionValue::DateTime(_) => {}
        }
    }
}

impl Walk for Extension {
    fn walk_mut(&mut self, visitor: &mut dyn ElementVisitor) {
        walk_fields!(self, visitor; extension, value);
    }
}
