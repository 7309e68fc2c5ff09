//! Seam to the movie catalog collaborator.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use cinerent_core::{DomainResult, MovieId};

use crate::dollars::Dollars;
use crate::expiration_date::ExpirationDate;
use crate::status::CustomerStatus;

/// What the customers domain needs to know about a movie.
///
/// Implemented by whatever owns the catalog. Identity is [`Movie::id`]; two
/// values with the same id are the same movie.
pub trait Movie {
    fn id(&self) -> MovieId;

    /// When a purchase made at `purchased_at` stops being watchable.
    fn expiration_date(&self, purchased_at: DateTime<Utc>) -> ExpirationDate;

    /// Price for a customer holding `status` at time `at`.
    ///
    /// Errors abort the purchase before the customer is changed.
    fn calculate_price(&self, status: &CustomerStatus, at: DateTime<Utc>) -> DomainResult<Dollars>;
}

impl<M: Movie + ?Sized> Movie for &M {
    fn id(&self) -> MovieId {
        (**self).id()
    }

    fn expiration_date(&self, purchased_at: DateTime<Utc>) -> ExpirationDate {
        (**self).expiration_date(purchased_at)
    }

    fn calculate_price(&self, status: &CustomerStatus, at: DateTime<Utc>) -> DomainResult<Dollars> {
        (**self).calculate_price(status, at)
    }
}

/// How long a purchase of a movie stays valid.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LicensingModel {
    TwoDays,
    LifeLong,
}

impl LicensingModel {
    fn list_price_cents(self) -> i64 {
        match self {
            LicensingModel::TwoDays => 400,
            LicensingModel::LifeLong => 800,
        }
    }
}

/// Catalog movie priced by its licensing model.
///
/// TwoDays rentals cost 4 dollars and expire two days after purchase; LifeLong
/// purchases cost 8 dollars and never expire. Active Advanced customers pay
/// [`CustomerStatus::ADVANCED_PRICE_PERCENT`] of the list price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicensedMovie {
    pub id: MovieId,
    pub name: String,
    pub licensing_model: LicensingModel,
}

impl LicensedMovie {
    pub fn new(id: MovieId, name: impl Into<String>, licensing_model: LicensingModel) -> Self {
        Self {
            id,
            name: name.into(),
            licensing_model,
        }
    }
}

impl Movie for LicensedMovie {
    fn id(&self) -> MovieId {
        self.id
    }

    fn expiration_date(&self, purchased_at: DateTime<Utc>) -> ExpirationDate {
        match self.licensing_model {
            LicensingModel::TwoDays => ExpirationDate::Dated(
                purchased_at
                    .checked_add_signed(TimeDelta::days(2))
                    .unwrap_or(DateTime::<Utc>::MAX_UTC),
            ),
            LicensingModel::LifeLong => ExpirationDate::Infinite,
        }
    }

    fn calculate_price(&self, status: &CustomerStatus, at: DateTime<Utc>) -> DomainResult<Dollars> {
        let list_price = Dollars::from_cents(self.licensing_model.list_price_cents())?;
        Ok(list_price.percent(status.price_percent_at(at)))
    }
}
