//! Loyalty status of a customer.

use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};

use cinerent_core::{DomainError, DomainResult, ValueObject};

use crate::expiration_date::ExpirationDate;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerStatusKind {
    Regular,
    Advanced,
}

/// Status kind paired with its own expiration.
///
/// `Regular` never expires. `Advanced` lasts one year from promotion and is
/// never demoted explicitly: once its expiration passes, [`CustomerStatus::is_advanced`]
/// simply reads `false` again.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawStatus", into = "RawStatus")]
pub struct CustomerStatus {
    kind: CustomerStatusKind,
    expiration_date: ExpirationDate,
}

impl CustomerStatus {
    pub const REGULAR: CustomerStatus = CustomerStatus {
        kind: CustomerStatusKind::Regular,
        expiration_date: ExpirationDate::Infinite,
    };

    const ADVANCED_DURATION: Months = Months::new(12);

    /// Percentage of the list price an active Advanced customer pays.
    pub const ADVANCED_PRICE_PERCENT: u32 = 75;

    pub fn regular() -> Self {
        Self::REGULAR
    }

    /// Rebuild a persisted status, checking that kind and expiration agree.
    pub fn from_parts(kind: CustomerStatusKind, expiration_date: ExpirationDate) -> DomainResult<Self> {
        match (kind, expiration_date) {
            (CustomerStatusKind::Regular, ExpirationDate::Infinite) => Ok(Self::REGULAR),
            (CustomerStatusKind::Regular, ExpirationDate::Dated(_)) => Err(DomainError::validation(
                "regular status cannot have an expiration date",
            )),
            (CustomerStatusKind::Advanced, ExpirationDate::Dated(_)) => Ok(Self {
                kind,
                expiration_date,
            }),
            (CustomerStatusKind::Advanced, ExpirationDate::Infinite) => Err(DomainError::validation(
                "advanced status requires an expiration date",
            )),
        }
    }

    pub fn kind(&self) -> CustomerStatusKind {
        self.kind
    }

    pub fn expiration_date(&self) -> ExpirationDate {
        self.expiration_date
    }

    pub fn is_advanced(&self) -> bool {
        self.is_advanced_at(Utc::now())
    }

    pub fn is_advanced_at(&self, now: DateTime<Utc>) -> bool {
        self.kind == CustomerStatusKind::Advanced && !self.expiration_date.is_expired_at(now)
    }

    /// Price percentage this status pays at `now` (100 = full price).
    pub fn price_percent_at(&self, now: DateTime<Utc>) -> u32 {
        if self.is_advanced_at(now) {
            Self::ADVANCED_PRICE_PERCENT
        } else {
            100
        }
    }

    pub fn promote(&self) -> Self {
        self.promote_at(Utc::now())
    }

    /// Advanced status valid for one year from `now`, whatever the current status is.
    ///
    /// Eligibility is checked by the owning customer, not here.
    pub fn promote_at(&self, now: DateTime<Utc>) -> Self {
        let until = now
            .checked_add_months(Self::ADVANCED_DURATION)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self {
            kind: CustomerStatusKind::Advanced,
            expiration_date: ExpirationDate::Dated(until),
        }
    }
}

impl Default for CustomerStatus {
    fn default() -> Self {
        Self::REGULAR
    }
}

impl ValueObject for CustomerStatus {}

#[derive(Serialize, Deserialize)]
struct RawStatus {
    kind: CustomerStatusKind,
    expiration_date: ExpirationDate,
}

impl TryFrom<RawStatus> for CustomerStatus {
    type Error = DomainError;

    fn try_from(raw: RawStatus) -> Result<Self, Self::Error> {
        Self::from_parts(raw.kind, raw.expiration_date)
    }
}

impl From<CustomerStatus> for RawStatus {
    fn from(status: CustomerStatus) -> Self {
        Self {
            kind: status.kind,
            expiration_date: status.expiration_date,
        }
    }
}
