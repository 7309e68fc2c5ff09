use serde::{Deserialize, Serialize};

use cinerent_core::{DomainError, DomainResult, ValueObject};

/// Customer e-mail address, normalized to lowercase.
///
/// Only the basic `local@domain` shape is checked; deliverability is not.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    pub const MAX_LEN: usize = 254;

    pub fn new(email: impl AsRef<str>) -> DomainResult<Self> {
        let email = email.as_ref().trim().to_lowercase();

        if email.is_empty() {
            return Err(DomainError::validation("email should not be empty"));
        }
        if email.len() > Self::MAX_LEN {
            return Err(DomainError::validation("email is too long"));
        }
        if email.chars().any(char::is_whitespace) {
            return Err(DomainError::validation("email is invalid"));
        }

        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {}
            _ => return Err(DomainError::validation("email is invalid")),
        }

        Ok(Self(email))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Email {}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Email {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}
