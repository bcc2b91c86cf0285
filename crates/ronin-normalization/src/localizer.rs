//! Post-transform tenant scoping of references.

use ronin_model::{ElementVisitor, Reference, Tenant, Walk};
use tracing::trace;

use crate::identifiers::localize_reference;

/// Rewrites tenant-scoped references in a transformed resource.
///
/// Implementations must not alter clinical content.
pub trait Localizer<R>: Send + Sync {
    fn localize(&self, resource: R, tenant: &Tenant) -> R;
}

/// Localizer prefixing every relative literal reference with the tenant mnemonic.
///
/// Resource ids are localized by the profile transform, not here, so a
/// resource passes through this localizer exactly once per transform.
#[derive(Debug, Clone, Copy, Default)]
pub struct TenantLocalizer;

impl<R: Walk + Send> Localizer<R> for TenantLocalizer {
    fn localize(&self, mut resource: R, tenant: &Tenant) -> R {
        let mut visitor = LocalizeVisitor { tenant, rewritten: 0 };
        resource.walk_mut(&mut visitor);
        trace!(rewritten = visitor.rewritten, "localized references");
        resource
    }
}

struct LocalizeVisitor<'a> {
    tenant: &'a Tenant,
    rewritten: usize,
}

impl ElementVisitor for LocalizeVisitor<'_> {
    fn visit_reference(&mut self, reference: &mut Reference) {
        if let Some(literal) = reference.reference.as_mut() {
            let localized = localize_reference(literal, self.tenant);
            if localized != *literal {
                *literal = localized;
                self.rewritten += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use ronin_model::{Annotation, AnnotationAuthor, Condition, Identifier};

    use super::*;

    #[test]
    fn localizes_nested_references_but_not_ids() {
        let condition = Condition {
            id: Some("c1".to_string()),
            subject: Some(Reference::literal("Patient/p1")),
            note: vec![Annotation {
                author: Some(AnnotationAuthor::Reference(Reference::literal("Practitioner/dr"))),
                ..Annotation::default()
            }],
            asserter: Some(Reference {
                identifier: Some(Identifier::new("urn:oid:1", "x")),
                ..Reference::default()
            }),
            ..Condition::default()
        };

        let localized = TenantLocalizer.localize(condition.clone(), &Tenant::new("test").unwrap());

        assert_eq!(localized.id.as_deref(), Some("c1"));
        assert_eq!(
            localized.subject.unwrap().reference.as_deref(),
            Some("Patient/test-p1")
        );
        let Some(AnnotationAuthor::Reference(author)) = &localized.note[0].author else {
            panic!("author reference lost");
        };
        assert_eq!(author.reference.as_deref(), Some("Practitioner/test-dr"));
        assert_eq!(localized.asserter, condition.asserter);
    }
}
