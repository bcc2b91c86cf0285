//! Tenant-scoped ids, references and the two mandatory Ronin identifiers.

use std::sync::LazyLock;

use regex::Regex;
use ronin_model::ronin::{
    RONIN_FHIR_ID_SYSTEM, RONIN_FHIR_ID_TYPE_CODE, RONIN_ID_TYPE_SYSTEM, RONIN_TENANT_ID_TYPE_CODE,
    RONIN_TENANT_SYSTEM, fhir_id_identifier_type, tenant_identifier_type,
};
use ronin_model::{Identifier, Tenant};

/// Relative literal reference: `Type/id` with an optional `/_history/vid`.
static RELATIVE_REFERENCE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z][A-Za-z]+)/([A-Za-z0-9\-\.]{1,64})(/_history/[A-Za-z0-9\-\.]{1,64})?$")
        .expect("Invalid relative reference regex")
});

/// `{mnemonic}-{id}`
pub fn localize_id(id: &str, tenant: &Tenant) -> String {
    format!("{}-{}", tenant.mnemonic(), id)
}

/// Prefixes the id of a relative literal reference with the tenant mnemonic.
///
/// Absolute URLs, contained references (`#id`) and anything else that is not
/// `Type/id[/_history/vid]` are returned unchanged.
pub fn localize_reference(reference: &str, tenant: &Tenant) -> String {
    let Some(captures) = RELATIVE_REFERENCE_REGEX.captures(reference) else {
        return reference.to_string();
    };
    let history = captures.get(3).map_or("", |m| m.as_str());
    format!(
        "{}/{}{}",
        &captures[1],
        localize_id(&captures[2], tenant),
        history
    )
}

/// Identifier carrying the tenant mnemonic.
pub fn tenant_identifier(tenant: &Tenant) -> Identifier {
    Identifier::new(RONIN_TENANT_SYSTEM, tenant.mnemonic()).with_type(tenant_identifier_type())
}

/// Identifier carrying the id the resource had in the source system.
pub fn fhir_id_identifier(id: &str) -> Identifier {
    Identifier::new(RONIN_FHIR_ID_SYSTEM, id).with_type(fhir_id_identifier_type())
}

/// `identifiers` followed by the tenant identifier and then the FHIR id identifier.
///
/// Existing identifiers are kept as they are, including any earlier Ronin ones.
pub fn append_ronin_identifiers(
    identifiers: &[Identifier],
    id: &str,
    tenant: &Tenant,
) -> Vec<Identifier> {
    let mut appended = Vec::with_capacity(identifiers.len() + 2);
    appended.extend_from_slice(identifiers);
    appended.push(tenant_identifier(tenant));
    appended.push(fhir_id_identifier(id));
    appended
}

/// True when `identifier` is the tenant identifier (system and type both match).
pub fn is_tenant_identifier(identifier: &Identifier) -> bool {
    is_ronin_identifier(identifier, RONIN_TENANT_SYSTEM, RONIN_TENANT_ID_TYPE_CODE)
}

/// True when `identifier` is the FHIR id identifier (system and type both match).
pub fn is_fhir_id_identifier(identifier: &Identifier) -> bool {
    is_ronin_identifier(identifier, RONIN_FHIR_ID_SYSTEM, RONIN_FHIR_ID_TYPE_CODE)
}

fn is_ronin_identifier(identifier: &Identifier, system: &str, type_code: &str) -> bool {
    identifier.system.as_deref() == Some(system)
        && identifier
            .type_
            .as_ref()
            .is_some_and(|type_| type_.has_coding(RONIN_ID_TYPE_SYSTEM, type_code))
}
