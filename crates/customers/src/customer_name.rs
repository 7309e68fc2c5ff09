use serde::{Deserialize, Serialize};

use cinerent_core::{DomainError, DomainResult, ValueObject};

/// Customer display name: trimmed, non-empty, at most [`CustomerName::MAX_LEN`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CustomerName(String);

impl CustomerName {
    pub const MAX_LEN: usize = 100;

    pub fn new(name: impl AsRef<str>) -> DomainResult<Self> {
        let name = name.as_ref().trim();

        if name.is_empty() {
            return Err(DomainError::validation("customer name should not be empty"));
        }
        if name.chars().count() > Self::MAX_LEN {
            return Err(DomainError::validation(format!(
                "customer name is too long (max {} characters)",
                Self::MAX_LEN
            )));
        }

        Ok(Self(name.to_string()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl ValueObject for CustomerName {}

impl AsRef<str> for CustomerName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for CustomerName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CustomerName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CustomerName> for String {
    fn from(value: CustomerName) -> Self {
        value.0
    }
}
