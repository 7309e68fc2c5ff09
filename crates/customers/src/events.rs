//! Domain events emitted by the [`Customer`](crate::Customer) aggregate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cinerent_core::{CustomerId, Event, MovieId, PurchaseId};

use crate::customer_name::CustomerName;
use crate::dollars::Dollars;
use crate::email::Email;
use crate::expiration_date::ExpirationDate;
use crate::status::CustomerStatus;

/// Event: CustomerRegistered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRegistered {
    pub customer_id: CustomerId,
    pub name: CustomerName,
    pub email: Email,
    pub occurred_at: DateTime<Utc>,
}

/// Event: MoviePurchased. `occurred_at` is the purchase date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoviePurchased {
    pub customer_id: CustomerId,
    pub purchase_id: PurchaseId,
    pub movie_id: MovieId,
    pub price: Dollars,
    pub expiration_date: ExpirationDate,
    pub occurred_at: DateTime<Utc>,
}

/// Event: CustomerPromoted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerPromoted {
    pub customer_id: CustomerId,
    pub status: CustomerStatus,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustomerEvent {
    CustomerRegistered(CustomerRegistered),
    MoviePurchased(MoviePurchased),
    CustomerPromoted(CustomerPromoted),
}

impl CustomerEvent {
    pub fn customer_id(&self) -> CustomerId {
        match self {
            CustomerEvent::CustomerRegistered(e) => e.customer_id,
            CustomerEvent::MoviePurchased(e) => e.customer_id,
            CustomerEvent::CustomerPromoted(e) => e.customer_id,
        }
    }
}

impl Event for CustomerEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CustomerEvent::CustomerRegistered(_) => "customers.customer.registered",
            CustomerEvent::MoviePurchased(_) => "customers.customer.movie_purchased",
            CustomerEvent::CustomerPromoted(_) => "customers.customer.promoted",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CustomerEvent::CustomerRegistered(e) => e.occurred_at,
            CustomerEvent::MoviePurchased(e) => e.occurred_at,
            CustomerEvent::CustomerPromoted(e) => e.occurred_at,
        }
    }
}

impl From<CustomerRegistered> for CustomerEvent {
    fn from(value: CustomerRegistered) -> Self {
        CustomerEvent::CustomerRegistered(value)
    }
}

impl From<MoviePurchased> for CustomerEvent {
    fn from(value: MoviePurchased) -> Self {
        CustomerEvent::MoviePurchased(value)
    }
}

impl From<CustomerPromoted> for CustomerEvent {
    fn from(value: CustomerPromoted) -> Self {
        CustomerEvent::CustomerPromoted(value)
    }
}
