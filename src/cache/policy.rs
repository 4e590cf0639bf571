use chrono::{DateTime, TimeDelta, Utc};

/// Decides whether a cached snapshot is still fresh enough to be served.
pub struct FeedCachePolicy;

impl FeedCachePolicy {
    pub const MAX_CACHE_AGE_IN_DAYS: i64 = 7;

    /// A snapshot taken at `timestamp` is valid at `against` as long as no
    /// more than [`Self::MAX_CACHE_AGE_IN_DAYS`] have passed. Exactly the max
    /// age is still valid.
    pub fn validate(timestamp: DateTime<Utc>, against: DateTime<Utc>) -> bool {
        match timestamp.checked_add_signed(TimeDelta::days(Self::MAX_CACHE_AGE_IN_DAYS)) {
            Some(max_age) => against <= max_age,
            // no representable instant lies past the max age
            None => true,
        }
    }
}
