#![deny(unsafe_code)]

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::ModelError;

static MNEMONIC_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9\-]{0,31}$").expect("Invalid tenant mnemonic regex")
});

/// Short tenant code used to prefix ids and references.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct TenantMnemonic(String);

impl TenantMnemonic {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if !MNEMONIC_REGEX.is_match(trimmed) {
            return Err(ModelError::InvalidTenantMnemonic(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TenantMnemonic {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TenantMnemonic> for String {
    fn from(value: TenantMnemonic) -> Self {
        value.0
    }
}

impl fmt::Display for TenantMnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The customer context a resource is transformed for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Tenant {
    pub mnemonic: TenantMnemonic,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Tenant {
    pub fn new(mnemonic: impl Into<String>) -> Result<Self, ModelError> {
        Ok(Self {
            mnemonic: TenantMnemonic::new(mnemonic)?,
            name: None,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn mnemonic(&self) -> &str {
        self.mnemonic.as_str()
    }
}

impl fmt::Display for Tenant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic.as_str())
    }
}
