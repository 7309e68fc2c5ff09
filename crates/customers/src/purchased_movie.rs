use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cinerent_core::{CustomerId, Entity, MovieId, PurchaseId};

use crate::dollars::Dollars;
use crate::events::MoviePurchased;
use crate::expiration_date::ExpirationDate;

/// A movie bought by a customer, frozen at purchase time.
///
/// Holds the ids of the movie and of the owning customer, not the objects
/// themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchasedMovie {
    id: PurchaseId,
    movie_id: MovieId,
    customer_id: CustomerId,
    price: Dollars,
    purchase_date: DateTime<Utc>,
    expiration_date: ExpirationDate,
}

impl PurchasedMovie {
    pub(crate) fn from_event(event: &MoviePurchased) -> Self {
        Self {
            id: event.purchase_id,
            movie_id: event.movie_id,
            customer_id: event.customer_id,
            price: event.price,
            purchase_date: event.occurred_at,
            expiration_date: event.expiration_date,
        }
    }

    pub fn purchase_id(&self) -> PurchaseId {
        self.id
    }

    pub fn movie_id(&self) -> MovieId {
        self.movie_id
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn price(&self) -> Dollars {
        self.price
    }

    pub fn purchase_date(&self) -> DateTime<Utc> {
        self.purchase_date
    }

    pub fn expiration_date(&self) -> ExpirationDate {
        self.expiration_date
    }

    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        !self.expiration_date.is_expired_at(now)
    }
}

impl Entity for PurchasedMovie {
    type Id = PurchaseId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
