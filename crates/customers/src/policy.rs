//! Promotion thresholds.

use core::str::FromStr;

use chrono::{DateTime, Months, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::dollars::Dollars;

pub const ENV_MIN_ACTIVE_MOVIES: &str = "CINERENT_PROMOTION_MIN_ACTIVE_MOVIES";
pub const ENV_ACTIVE_WINDOW_DAYS: &str = "CINERENT_PROMOTION_ACTIVE_WINDOW_DAYS";
pub const ENV_MIN_SPEND: &str = "CINERENT_PROMOTION_MIN_SPEND";

/// Thresholds a customer must meet to be promoted to Advanced.
///
/// Defaults: 2 active movies within the last 30 days, and 100 dollars spent
/// on purchases made within the last 12 months.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromotionPolicy {
    pub min_active_movies: usize,
    /// A purchase stays "active" until this many days past its expiration.
    pub active_window_days: u32,
    pub spend_window_months: u32,
    pub min_spend: Dollars,
}

impl Default for PromotionPolicy {
    fn default() -> Self {
        Self {
            min_active_movies: 2,
            active_window_days: 30,
            spend_window_months: 12,
            min_spend: Dollars::from_cents_unchecked(100 * 100),
        }
    }
}

impl PromotionPolicy {
    /// Defaults overridden by `CINERENT_PROMOTION_*` environment variables.
    ///
    /// Unparsable values are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut policy = Self::default();

        if let Some(v) = parse_var(&lookup, ENV_MIN_ACTIVE_MOVIES, usize::from_str) {
            policy.min_active_movies = v;
        }
        if let Some(v) = parse_var(&lookup, ENV_ACTIVE_WINDOW_DAYS, u32::from_str) {
            policy.active_window_days = v;
        }
        if let Some(v) = parse_var(&lookup, ENV_MIN_SPEND, Dollars::parse) {
            policy.min_spend = v;
        }

        policy
    }

    /// Purchases whose expiration is at or after this instant count as active.
    pub fn active_window_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_sub_signed(TimeDelta::days(i64::from(self.active_window_days)))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Purchases made strictly after this instant count towards spend.
    pub fn spend_window_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_sub_months(Months::new(self.spend_window_months))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

fn parse_var<T, E: core::fmt::Display>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    parse: impl Fn(&str) -> Result<T, E>,
) -> Option<T> {
    let raw = lookup(key)?;
    match parse(raw.trim()) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, value = %raw, error = %e, "ignoring invalid promotion setting");
            None
        }
    }
}
