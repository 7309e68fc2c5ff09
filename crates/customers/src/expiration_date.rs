use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cinerent_core::ValueObject;

/// When something stops being valid, or never.
///
/// Persisted as a nullable timestamp: `null` is [`ExpirationDate::Infinite`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<DateTime<Utc>>", into = "Option<DateTime<Utc>>")]
pub enum ExpirationDate {
    Infinite,
    Dated(DateTime<Utc>),
}

impl ExpirationDate {
    /// The expiration timestamp, `None` for [`ExpirationDate::Infinite`].
    pub fn date(self) -> Option<DateTime<Utc>> {
        match self {
            ExpirationDate::Infinite => None,
            ExpirationDate::Dated(at) => Some(at),
        }
    }

    pub fn is_infinite(self) -> bool {
        self == ExpirationDate::Infinite
    }

    pub fn is_expired(self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// A dated expiration is expired once `now` is strictly past it.
    pub fn is_expired_at(self, now: DateTime<Utc>) -> bool {
        match self {
            ExpirationDate::Infinite => false,
            ExpirationDate::Dated(at) => at < now,
        }
    }
}

impl ValueObject for ExpirationDate {}

impl From<Option<DateTime<Utc>>> for ExpirationDate {
    fn from(value: Option<DateTime<Utc>>) -> Self {
        value.map_or(ExpirationDate::Infinite, ExpirationDate::Dated)
    }
}

impl From<ExpirationDate> for Option<DateTime<Utc>> {
    fn from(value: ExpirationDate) -> Self {
        value.date()
    }
}

impl core::fmt::Display for ExpirationDate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ExpirationDate::Infinite => f.write_str("never"),
            ExpirationDate::Dated(at) => write!(f, "{}", at.to_rfc3339()),
        }
    }
}
