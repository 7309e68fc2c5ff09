//! Customers domain module (movie-rental loyalty program).
//!
//! This crate contains the business rules for customers buying movies and
//! earning the Advanced status, implemented purely as deterministic domain
//! logic (no IO, no HTTP, no storage). The movie catalog is an external
//! collaborator reached through the [`Movie`] trait.

pub mod customer;
pub mod customer_name;
pub mod dollars;
pub mod email;
pub mod events;
pub mod expiration_date;
pub mod movie;
pub mod policy;
pub mod purchased_movie;
pub mod status;

pub use customer::{Customer, PromotionDenied};
pub use customer_name::CustomerName;
pub use dollars::Dollars;
pub use email::Email;
pub use events::{CustomerEvent, CustomerPromoted, CustomerRegistered, MoviePurchased};
pub use expiration_date::ExpirationDate;
pub use movie::{LicensedMovie, LicensingModel, Movie};
pub use policy::PromotionPolicy;
pub use purchased_movie::PurchasedMovie;
pub use status::{CustomerStatus, CustomerStatusKind};
