use chrono::{DateTime, Utc};
use thiserror::Error;

use cinerent_core::{AggregateRoot, CustomerId, DomainError, DomainResult, PurchaseId};

use crate::customer_name::CustomerName;
use crate::dollars::Dollars;
use crate::email::Email;
use crate::events::{CustomerEvent, CustomerPromoted, CustomerRegistered, MoviePurchased};
use crate::movie::Movie;
use crate::policy::PromotionPolicy;
use crate::purchased_movie::PurchasedMovie;
use crate::status::CustomerStatus;

/// Why a customer cannot be promoted yet.
///
/// This is an expected business outcome, not an error of the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PromotionDenied {
    #[error("The customer already has the Advanced status.")]
    AlreadyAdvanced,

    #[error("The customer has to have at least {required} active movies during the last {window_days} days.")]
    NotEnoughActiveMovies { required: usize, window_days: u32 },

    #[error(
        "The customer has to have at least {} dollars spent during the last year.",
        .required.to_plain_string()
    )]
    NotEnoughSpend { required: Dollars },
}

impl PromotionDenied {
    pub fn reason(&self) -> String {
        self.to_string()
    }
}

/// Aggregate root: Customer.
///
/// Owns its purchases and status. State only changes through
/// [`Customer::purchase_movie`] and [`Customer::promote`] (and their `_at`
/// variants), each of which records one event and applies it.
///
/// No `PartialEq`: customers are entities and compare by [`AggregateRoot::id`].
#[derive(Debug, Clone)]
pub struct Customer {
    id: CustomerId,
    name: CustomerName,
    email: Email,
    status: CustomerStatus,
    money_spent: Dollars,
    purchased_movies: Vec<PurchasedMovie>,
    version: u64,
}

impl Customer {
    /// A new Regular customer with no purchases.
    pub fn new(name: CustomerName, email: Email) -> Self {
        Self::register_at(CustomerId::new(), name, email, Utc::now()).0
    }

    /// Validate raw input and create a new customer.
    pub fn parse(name: &str, email: &str) -> DomainResult<Self> {
        Ok(Self::new(CustomerName::new(name)?, Email::new(email)?))
    }

    /// Create a customer and return the registration event to persist.
    pub fn register_at(
        id: CustomerId,
        name: CustomerName,
        email: Email,
        now: DateTime<Utc>,
    ) -> (Self, CustomerRegistered) {
        let event = CustomerRegistered {
            customer_id: id,
            name,
            email,
            occurred_at: now,
        };
        (Self::from_registration(&event), event)
    }

    /// Rebuild a customer from its stored history.
    ///
    /// The history must start with `CustomerRegistered` and only contain events
    /// of that customer. Events are facts: business rules are not re-checked.
    pub fn rehydrate<'a>(events: impl IntoIterator<Item = &'a CustomerEvent>) -> DomainResult<Self> {
        let mut events = events.into_iter();

        let mut customer = match events.next() {
            Some(CustomerEvent::CustomerRegistered(e)) => Self::from_registration(e),
            Some(other) => {
                return Err(DomainError::validation(format!(
                    "customer history must start with a registration, got {:?}",
                    other
                )));
            }
            None => return Err(DomainError::validation("customer history is empty")),
        };

        for event in events {
            customer.apply(event)?;
        }

        tracing::debug!(customer_id = %customer.id, version = customer.version, "customer rehydrated");
        Ok(customer)
    }

    fn from_registration(event: &CustomerRegistered) -> Self {
        Self {
            id: event.customer_id,
            name: event.name.clone(),
            email: event.email.clone(),
            status: CustomerStatus::regular(),
            money_spent: Dollars::ZERO,
            purchased_movies: Vec::new(),
            version: 1,
        }
    }

    pub fn id_typed(&self) -> CustomerId {
        self.id
    }

    pub fn name(&self) -> &CustomerName {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn status(&self) -> CustomerStatus {
        self.status
    }

    pub fn money_spent(&self) -> Dollars {
        self.money_spent
    }

    /// Purchases in the order they were made.
    pub fn purchased_movies(&self) -> &[PurchasedMovie] {
        &self.purchased_movies
    }

    pub fn has_purchased_movie<M: Movie + ?Sized>(&self, movie: &M) -> bool {
        self.has_purchased_movie_at(movie, Utc::now())
    }

    /// Whether a purchase of `movie` is still unexpired at `now`.
    pub fn has_purchased_movie_at<M: Movie + ?Sized>(&self, movie: &M, now: DateTime<Utc>) -> bool {
        let movie_id = movie.id();
        self.purchased_movies
            .iter()
            .any(|p| p.movie_id() == movie_id && p.is_active_at(now))
    }

    pub fn purchase_movie<M: Movie + ?Sized>(&mut self, movie: &M) -> DomainResult<MoviePurchased> {
        self.purchase_movie_at(movie, Utc::now())
    }

    /// Buy `movie` at the price it charges for the current status.
    ///
    /// Fails with `DuplicateActivePurchase` while an earlier purchase of the
    /// same movie is unexpired. Nothing changes unless the whole purchase
    /// succeeds.
    pub fn purchase_movie_at<M: Movie + ?Sized>(
        &mut self,
        movie: &M,
        now: DateTime<Utc>,
    ) -> DomainResult<MoviePurchased> {
        let movie_id = movie.id();

        if self.has_purchased_movie_at(movie, now) {
            tracing::warn!(customer_id = %self.id, %movie_id, "movie already actively purchased");
            return Err(DomainError::duplicate_active_purchase(movie_id));
        }

        let expiration_date = movie.expiration_date(now);
        let price = movie.calculate_price(&self.status, now)?;

        let event = MoviePurchased {
            customer_id: self.id,
            purchase_id: PurchaseId::new(),
            movie_id,
            price,
            expiration_date,
            occurred_at: now,
        };
        self.apply(&CustomerEvent::MoviePurchased(event.clone()))?;

        tracing::debug!(
            customer_id = %self.id,
            %movie_id,
            %price,
            %expiration_date,
            money_spent = %self.money_spent,
            "movie purchased"
        );
        Ok(event)
    }

    pub fn can_promote(&self) -> Result<(), PromotionDenied> {
        self.can_promote_at(Utc::now())
    }

    pub fn can_promote_at(&self, now: DateTime<Utc>) -> Result<(), PromotionDenied> {
        self.can_promote_with(&PromotionPolicy::default(), now)
    }

    /// Evaluate the promotion rules in order, stopping at the first failure:
    /// not already Advanced, enough active movies, enough spend in the window.
    pub fn can_promote_with(
        &self,
        policy: &PromotionPolicy,
        now: DateTime<Utc>,
    ) -> Result<(), PromotionDenied> {
        if self.status.is_advanced_at(now) {
            return Err(PromotionDenied::AlreadyAdvanced);
        }

        // Recency is measured on the expiration date, not the purchase date.
        let active_since = policy.active_window_start(now);
        let active = self
            .purchased_movies
            .iter()
            .filter(|p| {
                let expiration = p.expiration_date();
                expiration.is_infinite() || expiration.date().is_some_and(|at| at >= active_since)
            })
            .count();
        if active < policy.min_active_movies {
            return Err(PromotionDenied::NotEnoughActiveMovies {
                required: policy.min_active_movies,
                window_days: policy.active_window_days,
            });
        }

        let spend_since = policy.spend_window_start(now);
        let spent: Dollars = self
            .purchased_movies
            .iter()
            .filter(|p| p.purchase_date() > spend_since)
            .map(PurchasedMovie::price)
            .sum();
        if spent < policy.min_spend {
            return Err(PromotionDenied::NotEnoughSpend {
                required: policy.min_spend,
            });
        }

        Ok(())
    }

    pub fn promote(&mut self) -> DomainResult<CustomerPromoted> {
        self.promote_at(Utc::now())
    }

    pub fn promote_at(&mut self, now: DateTime<Utc>) -> DomainResult<CustomerPromoted> {
        self.promote_with(&PromotionPolicy::default(), now)
    }

    /// Grant the Advanced status for one year.
    ///
    /// Callers must check [`Customer::can_promote_with`] first; promoting an
    /// ineligible customer is a `ContractViolation`.
    pub fn promote_with(
        &mut self,
        policy: &PromotionPolicy,
        now: DateTime<Utc>,
    ) -> DomainResult<CustomerPromoted> {
        if let Err(denied) = self.can_promote_with(policy, now) {
            tracing::error!(customer_id = %self.id, reason = %denied, "promote called on ineligible customer");
            return Err(DomainError::contract_violation(format!(
                "customer {} cannot be promoted: {denied}",
                self.id
            )));
        }

        let event = CustomerPromoted {
            customer_id: self.id,
            status: self.status.promote_at(now),
            occurred_at: now,
        };
        self.apply(&CustomerEvent::CustomerPromoted(event.clone()))?;

        tracing::info!(
            customer_id = %self.id,
            expires_at = %event.status.expiration_date(),
            "customer promoted to advanced"
        );
        Ok(event)
    }

    /// Evolve state from a single event. The only place state is written.
    fn apply(&mut self, event: &CustomerEvent) -> DomainResult<()> {
        if event.customer_id() != self.id {
            return Err(DomainError::validation("event belongs to another customer"));
        }

        match event {
            CustomerEvent::CustomerRegistered(_) => {
                return Err(DomainError::validation("customer is already registered"));
            }
            CustomerEvent::MoviePurchased(e) => {
                self.purchased_movies.push(PurchasedMovie::from_event(e));
                self.money_spent += e.price;
            }
            CustomerEvent::CustomerPromoted(e) => {
                self.status = e.status;
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
        Ok(())
    }
}

impl AggregateRoot for Customer {
    type Id = CustomerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};
    use cinerent_core::{Entity, Event, ExpectedVersion, MovieId};
    use proptest::prelude::*;

    use crate::expiration_date::ExpirationDate;
    use crate::movie::{LicensedMovie, LicensingModel};
    use crate::status::CustomerStatusKind;

    /// Catalog stub with a fixed price and expiration.
    struct FixedMovie {
        id: MovieId,
        price: Dollars,
        expiration: Option<TimeDelta>,
    }

    impl FixedMovie {
        fn infinite(dollars: i64) -> Self {
            Self {
                id: MovieId::new(),
                price: Dollars::whole(dollars).unwrap(),
                expiration: None,
            }
        }

        fn expiring_after(dollars: i64, after: TimeDelta) -> Self {
            Self {
                expiration: Some(after),
                ..Self::infinite(dollars)
            }
        }
    }

    impl Movie for FixedMovie {
        fn id(&self) -> MovieId {
            self.id
        }

        fn expiration_date(&self, purchased_at: DateTime<Utc>) -> ExpirationDate {
            match self.expiration {
                Some(after) => ExpirationDate::Dated(purchased_at + after),
                None => ExpirationDate::Infinite,
            }
        }

        fn calculate_price(&self, _status: &CustomerStatus, _at: DateTime<Utc>) -> DomainResult<Dollars> {
            Ok(self.price)
        }
    }

    struct UnpricedMovie(MovieId);

    impl Movie for UnpricedMovie {
        fn id(&self) -> MovieId {
            self.0
        }

        fn expiration_date(&self, _purchased_at: DateTime<Utc>) -> ExpirationDate {
            ExpirationDate::Infinite
        }

        fn calculate_price(&self, _status: &CustomerStatus, _at: DateTime<Utc>) -> DomainResult<Dollars> {
            Err(DomainError::invariant("movie has no price"))
        }
    }

    fn test_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
    }

    fn state(c: &Customer) -> (CustomerId, CustomerStatus, Dollars, Vec<PurchasedMovie>, u64) {
        (
            c.id_typed(),
            c.status(),
            c.money_spent(),
            c.purchased_movies().to_vec(),
            c.version(),
        )
    }

    fn test_customer() -> Customer {
        Customer::register_at(
            CustomerId::new(),
            CustomerName::new("Jane Doe").unwrap(),
            Email::new("jane@example.com").unwrap(),
            test_time(),
        )
        .0
    }

    #[test]
    fn new_customer_is_regular_with_zero_spend() {
        let customer = Customer::parse("Jane Doe", "jane@example.com").unwrap();
        assert_eq!(customer.status(), CustomerStatus::regular());
        assert_eq!(customer.money_spent(), Dollars::ZERO);
        assert!(customer.purchased_movies().is_empty());
        assert_eq!(customer.version(), 1);
    }

    #[test]
    fn parse_rejects_invalid_input() {
        assert!(matches!(
            Customer::parse("", "jane@example.com"),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            Customer::parse("Jane", "jane.example.com"),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn purchase_records_movie_and_adds_price() {
        let mut customer = test_customer();
        let movie = FixedMovie::infinite(7);
        let now = test_time();

        let event = customer.purchase_movie_at(&movie, now).unwrap();

        assert!(customer.has_purchased_movie_at(&movie, now));
        assert_eq!(customer.money_spent(), Dollars::whole(7).unwrap());
        assert_eq!(customer.version(), 2);

        let purchase = &customer.purchased_movies()[0];
        assert_eq!(*Entity::id(purchase), event.purchase_id);
        assert_eq!(purchase.movie_id(), movie.id);
        assert_eq!(purchase.customer_id(), customer.id_typed());
        assert_eq!(purchase.price(), Dollars::whole(7).unwrap());
        assert_eq!(purchase.purchase_date(), now);
        assert_eq!(purchase.expiration_date(), ExpirationDate::Infinite);
    }

    #[test]
    fn purchase_does_not_change_status() {
        let mut customer = test_customer();
        customer
            .purchase_movie_at(&FixedMovie::infinite(60), test_time())
            .unwrap();
        assert_eq!(customer.status(), CustomerStatus::regular());
    }

    #[test]
    fn duplicate_active_purchase_is_rejected_without_changes() {
        let mut customer = test_customer();
        let movie = FixedMovie::infinite(5);
        let now = test_time();
        customer.purchase_movie_at(&movie, now).unwrap();
        let before = customer.clone();

        let err = customer.purchase_movie_at(&movie, now).unwrap_err();
        match err {
            DomainError::DuplicateActivePurchase { movie_id } => assert_eq!(movie_id, movie.id),
            other => panic!("expected DuplicateActivePurchase, got {other:?}"),
        }
        assert_eq!(state(&customer), state(&before));
    }

    #[test]
    fn expired_purchase_can_be_bought_again() {
        let mut customer = test_customer();
        let movie = FixedMovie::expiring_after(4, TimeDelta::days(2));
        let now = test_time();
        customer.purchase_movie_at(&movie, now).unwrap();

        let later = now + TimeDelta::days(3);
        assert!(!customer.has_purchased_movie_at(&movie, later));
        customer.purchase_movie_at(&movie, later).unwrap();

        assert_eq!(customer.purchased_movies().len(), 2);
        assert_eq!(customer.money_spent(), Dollars::whole(8).unwrap());
    }

    #[test]
    fn failed_pricing_leaves_customer_untouched() {
        let mut customer = test_customer();
        let before = customer.clone();

        let err = customer
            .purchase_movie_at(&UnpricedMovie(MovieId::new()), test_time())
            .unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
        assert_eq!(state(&customer), state(&before));
    }

    #[test]
    fn advanced_customers_pay_the_discounted_price() {
        let mut customer = test_customer();
        let now = test_time();
        customer.purchase_movie_at(&FixedMovie::infinite(60), now).unwrap();
        customer.purchase_movie_at(&FixedMovie::infinite(60), now).unwrap();
        customer.promote_at(now).unwrap();

        let movie = LicensedMovie::new(MovieId::new(), "Heat", LicensingModel::LifeLong);
        let event = customer.purchase_movie_at(&movie, now).unwrap();
        assert_eq!(event.price, Dollars::whole(6).unwrap());
        assert_eq!(customer.money_spent(), Dollars::whole(126).unwrap());
    }

    #[test]
    fn new_customer_needs_two_active_movies() {
        let customer = test_customer();
        let denied = customer.can_promote_at(test_time()).unwrap_err();
        assert_eq!(
            denied,
            PromotionDenied::NotEnoughActiveMovies {
                required: 2,
                window_days: 30
            }
        );
        assert_eq!(
            denied.reason(),
            "The customer has to have at least 2 active movies during the last 30 days."
        );
    }

    #[test]
    fn two_purchases_of_sixty_qualify_for_promotion() {
        let mut customer = test_customer();
        let now = test_time();
        customer.purchase_movie_at(&FixedMovie::infinite(60), now).unwrap();
        customer.purchase_movie_at(&FixedMovie::infinite(60), now).unwrap();

        assert_eq!(customer.can_promote_at(now), Ok(()));

        let event = customer.promote_at(now).unwrap();
        assert_eq!(event.status.kind(), CustomerStatusKind::Advanced);
        assert_eq!(customer.status(), event.status);
        assert!(customer.status().is_advanced_at(now));
        assert_eq!(
            customer.status().expiration_date(),
            ExpirationDate::Dated(Utc.with_ymd_and_hms(2025, 3, 15, 12, 0, 0).unwrap())
        );
        assert_eq!(customer.version(), 4);
    }

    #[test]
    fn spend_below_one_hundred_is_denied() {
        let mut customer = test_customer();
        let now = test_time();
        customer.purchase_movie_at(&FixedMovie::infinite(45), now).unwrap();
        customer.purchase_movie_at(&FixedMovie::infinite(45), now).unwrap();

        let denied = customer.can_promote_at(now).unwrap_err();
        assert!(matches!(denied, PromotionDenied::NotEnoughSpend { .. }));
        assert_eq!(
            denied.reason(),
            "The customer has to have at least 100 dollars spent during the last year."
        );
    }

    #[test]
    fn advanced_customer_cannot_be_promoted_again() {
        let mut customer = test_customer();
        let now = test_time();
        customer.purchase_movie_at(&FixedMovie::infinite(60), now).unwrap();
        customer.purchase_movie_at(&FixedMovie::infinite(60), now).unwrap();
        customer.promote_at(now).unwrap();

        assert_eq!(
            customer.can_promote_at(now),
            Err(PromotionDenied::AlreadyAdvanced)
        );
        assert_eq!(
            PromotionDenied::AlreadyAdvanced.reason(),
            "The customer already has the Advanced status."
        );
    }

    #[test]
    fn expired_advanced_status_can_be_promoted_again() {
        let mut customer = test_customer();
        let now = test_time();
        customer.purchase_movie_at(&FixedMovie::infinite(60), now).unwrap();
        customer.purchase_movie_at(&FixedMovie::infinite(60), now).unwrap();
        customer.promote_at(now).unwrap();

        // A year later the status is still Advanced by kind but reads as not advanced.
        let later = now + TimeDelta::days(366);
        assert_eq!(customer.status().kind(), CustomerStatusKind::Advanced);
        assert!(!customer.status().is_advanced_at(later));

        customer.purchase_movie_at(&FixedMovie::infinite(60), later).unwrap();
        customer.purchase_movie_at(&FixedMovie::infinite(60), later).unwrap();
        assert_eq!(customer.can_promote_at(later), Ok(()));
    }

    #[test]
    fn active_rule_measures_the_expiration_date() {
        let mut customer = test_customer();
        let bought = test_time();
        let first = FixedMovie::expiring_after(60, TimeDelta::days(2));
        let second = FixedMovie::expiring_after(60, TimeDelta::days(2));
        customer.purchase_movie_at(&first, bought).unwrap();
        customer.purchase_movie_at(&second, bought).unwrap();

        // Expired exactly 30 days ago: no longer owned, but still active.
        let now = bought + TimeDelta::days(32);
        assert!(!customer.has_purchased_movie_at(&first, now));
        assert!(!customer.has_purchased_movie_at(&second, now));
        assert_eq!(customer.can_promote_at(now), Ok(()));

        let too_late = bought + TimeDelta::days(32) + TimeDelta::seconds(1);
        assert!(matches!(
            customer.can_promote_at(too_late),
            Err(PromotionDenied::NotEnoughActiveMovies { .. })
        ));
    }

    #[test]
    fn spend_rule_only_counts_the_last_year() {
        let mut customer = test_customer();
        let long_ago = test_time();
        customer.purchase_movie_at(&FixedMovie::infinite(80), long_ago).unwrap();

        let now = long_ago + TimeDelta::days(400);
        customer.purchase_movie_at(&FixedMovie::infinite(30), now).unwrap();

        assert!(matches!(
            customer.can_promote_at(now),
            Err(PromotionDenied::NotEnoughSpend { .. })
        ));
        assert_eq!(customer.money_spent(), Dollars::whole(110).unwrap());
    }

    #[test]
    fn spend_window_excludes_purchases_exactly_one_year_old() {
        let mut customer = test_customer();
        let bought = test_time();
        customer.purchase_movie_at(&FixedMovie::infinite(60), bought).unwrap();
        customer.purchase_movie_at(&FixedMovie::infinite(60), bought).unwrap();

        // 2025-03-15 12:00: the window starts exactly at the purchase date.
        let one_year_later = Utc.with_ymd_and_hms(2025, 3, 15, 12, 0, 0).unwrap();
        assert!(matches!(
            customer.can_promote_at(one_year_later),
            Err(PromotionDenied::NotEnoughSpend { .. })
        ));

        let just_inside = one_year_later - TimeDelta::seconds(1);
        assert_eq!(customer.can_promote_at(just_inside), Ok(()));
    }

    #[test]
    fn spend_window_counts_a_purchase_one_second_after_the_cutoff() {
        let mut customer = test_customer();
        let cutoff = test_time();
        customer.purchase_movie_at(&FixedMovie::infinite(60), cutoff).unwrap();
        customer
            .purchase_movie_at(&FixedMovie::infinite(60), cutoff + TimeDelta::seconds(1))
            .unwrap();
        customer
            .purchase_movie_at(&FixedMovie::infinite(40), cutoff + TimeDelta::seconds(1))
            .unwrap();

        // Only the two later purchases count: 60 + 40.
        let now = Utc.with_ymd_and_hms(2025, 3, 15, 12, 0, 0).unwrap();
        assert_eq!(customer.can_promote_at(now), Ok(()));
    }

    #[test]
    fn custom_policy_changes_thresholds() {
        let mut customer = test_customer();
        let now = test_time();
        customer.purchase_movie_at(&FixedMovie::infinite(10), now).unwrap();

        let policy = PromotionPolicy {
            min_active_movies: 1,
            min_spend: Dollars::whole(10).unwrap(),
            ..PromotionPolicy::default()
        };
        assert_eq!(customer.can_promote_with(&policy, now), Ok(()));
        assert!(customer.promote_with(&policy, now).is_ok());
    }

    #[test]
    fn promote_without_eligibility_is_a_contract_violation() {
        let mut customer = test_customer();
        let before = customer.clone();

        let err = customer.promote_at(test_time()).unwrap_err();
        match &err {
            DomainError::ContractViolation(msg) => assert!(msg.contains("at least 2 active movies")),
            other => panic!("expected ContractViolation, got {other:?}"),
        }
        assert!(!err.is_recoverable());
        assert_eq!(state(&customer), state(&before));
    }

    #[test]
    fn purchased_movies_view_is_stable_between_reads() {
        let mut customer = test_customer();
        customer.purchase_movie_at(&FixedMovie::infinite(3), test_time()).unwrap();
        customer.purchase_movie_at(&FixedMovie::infinite(4), test_time()).unwrap();

        let first = customer.purchased_movies().to_vec();
        let second = customer.purchased_movies().to_vec();
        assert_eq!(first, second);
        assert_eq!(first[0].price(), Dollars::whole(3).unwrap());
        assert_eq!(first[1].price(), Dollars::whole(4).unwrap());
    }

    #[test]
    fn rehydrate_reproduces_state_from_events() {
        let now = test_time();
        let (mut customer, registered) = Customer::register_at(
            CustomerId::new(),
            CustomerName::new("Jane Doe").unwrap(),
            Email::new("jane@example.com").unwrap(),
            now,
        );
        let mut history = vec![CustomerEvent::from(registered)];
        history.push(customer.purchase_movie_at(&FixedMovie::infinite(60), now).unwrap().into());
        history.push(customer.purchase_movie_at(&FixedMovie::infinite(60), now).unwrap().into());
        history.push(customer.promote_at(now).unwrap().into());

        let rebuilt = Customer::rehydrate(&history).unwrap();
        assert_eq!(state(&rebuilt), state(&customer));
        assert_eq!(rebuilt.version(), history.len() as u64);
        assert!(ExpectedVersion::Exact(4).check(rebuilt.version()).is_ok());

        let types: Vec<_> = history.iter().map(Event::event_type).collect();
        assert_eq!(
            types,
            [
                "customers.customer.registered",
                "customers.customer.movie_purchased",
                "customers.customer.movie_purchased",
                "customers.customer.promoted",
            ]
        );
    }

    #[test]
    fn rehydrate_rejects_invalid_histories() {
        assert!(Customer::rehydrate(&Vec::new()).is_err());

        let now = test_time();
        let mut customer = test_customer();
        let purchase: CustomerEvent = customer
            .purchase_movie_at(&FixedMovie::infinite(1), now)
            .unwrap()
            .into();
        assert!(Customer::rehydrate([&purchase]).is_err());

        let (_, registered) = Customer::register_at(
            CustomerId::new(),
            CustomerName::new("Other").unwrap(),
            Email::new("other@example.com").unwrap(),
            now,
        );
        let registered = CustomerEvent::from(registered);
        assert!(Customer::rehydrate([&registered, &purchase]).is_err());
        assert!(Customer::rehydrate([&registered, &registered]).is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: money spent always equals the sum of purchase prices.
        #[test]
        fn money_spent_equals_sum_of_prices(prices in prop::collection::vec(0i64..10_000i64, 0..20)) {
            let mut customer = test_customer();
            let now = test_time();

            for cents in &prices {
                let movie = FixedMovie {
                    id: MovieId::new(),
                    price: Dollars::from_cents(*cents).unwrap(),
                    expiration: None,
                };
                customer.purchase_movie_at(&movie, now).unwrap();
            }

            let total: Dollars = customer.purchased_movies().iter().map(PurchasedMovie::price).sum();
            prop_assert_eq!(customer.money_spent(), total);
            prop_assert_eq!(customer.money_spent().cents(), prices.iter().sum::<i64>() as u64);
            prop_assert_eq!(customer.purchased_movies().len(), prices.len());
            prop_assert_eq!(customer.version(), 1 + prices.len() as u64);
        }
    }
}
