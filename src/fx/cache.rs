//! In-memory cache of pivot-quoted rates
//!
//! Rates are held per calendar date in a bucket keyed by currency code. The
//! date index is a `BTreeMap` so the most recent date and date ranges fall out
//! of its ordering; each bucket is a `DashMap` so writers for different
//! currencies on the same date never contend on the index lock.

use super::rate::RateValue;
use crate::error::{FxError, Result};
use chrono::NaiveDate;
use dashmap::DashMap;
use log::debug;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Rates known for one date, keyed by term currency code
pub type Bucket = Arc<DashMap<String, RateValue>>;

/// Date-indexed store of rates quoted against the pivot currency
///
/// Buckets are created at most once per date and never removed. Cloning the
/// cache yields another handle to the same storage.
#[derive(Debug, Clone)]
pub struct RateCache {
    /// Provider name, used in error reporting
    provider: Arc<str>,
    buckets: Arc<RwLock<BTreeMap<NaiveDate, Bucket>>>,
}

/// Cache statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    pub date_count: usize,
    pub entry_count: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

impl RateCache {
    /// Create an empty cache
    pub fn new(provider: &str) -> Self {
        Self {
            provider: Arc::from(provider),
            buckets: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Insert or overwrite the rate for a date and currency
    pub fn put(&self, date: NaiveDate, currency_code: &str, rate: RateValue) {
        self.bucket_or_create(date)
            .insert(currency_code.to_string(), rate);
    }

    /// Get the bucket for `date`, creating it if this is the first write
    pub fn bucket_or_create(&self, date: NaiveDate) -> Bucket {
        if let Some(bucket) = self.bucket(date) {
            return bucket;
        }

        // Re-checked under the write lock: a concurrent first writer may
        // have created the bucket since the read above.
        let mut buckets = self.buckets.write();
        Arc::clone(buckets.entry(date).or_insert_with(|| {
            debug!("{}: creating rate bucket for {}", self.provider, date);
            Arc::new(DashMap::new())
        }))
    }

    /// Get the bucket for `date`, if any rate was ever ingested for it
    pub fn bucket(&self, date: NaiveDate) -> Option<Bucket> {
        self.buckets.read().get(&date).cloned()
    }

    /// Greatest date held
    pub fn most_recent_date(&self) -> Result<NaiveDate> {
        self.buckets
            .read()
            .keys()
            .next_back()
            .copied()
            .ok_or_else(|| FxError::NoDataLoaded {
                provider: self.provider.to_string(),
            })
    }

    /// Smallest date held
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.buckets.read().keys().next().copied()
    }

    /// Dates held within `from..=to`, ascending
    pub fn dates_between(&self, from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
        if from > to {
            return Vec::new();
        }
        self.buckets.read().range(from..=to).map(|(d, _)| *d).collect()
    }

    /// Number of distinct dates held
    pub fn size(&self) -> usize {
        self.buckets.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.read().is_empty()
    }

    /// Total number of rate entries across all dates
    pub fn entry_count(&self) -> usize {
        self.buckets.read().values().map(|bucket| bucket.len()).sum()
    }

    pub fn stats(&self) -> CacheStats {
        let buckets = self.buckets.read();
        CacheStats {
            date_count: buckets.len(),
            entry_count: buckets.values().map(|bucket| bucket.len()).sum(),
            first_date: buckets.keys().next().copied(),
            last_date: buckets.keys().next_back().copied(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fx::rate::RateContext;
    use crate::fx::test_util::{dec, unit};
    use std::sync::Barrier;
    use std::thread;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn usd_rate(term: &str, factor: &str, date: NaiveDate) -> RateValue {
        RateValue::direct(
            unit("USD"),
            unit(term),
            dec(factor),
            RateContext::historic("test", None, date),
        )
    }

    #[test]
    fn test_put_and_lookup() {
        let cache = RateCache::new("test");
        cache.put(day(2), "EUR", usd_rate("EUR", "0.92", day(2)));

        let bucket = cache.bucket(day(2)).unwrap();
        assert_eq!(bucket.get("EUR").unwrap().factor, dec("0.92"));
        assert!(cache.bucket(day(3)).is_none());
        assert_eq!(cache.size(), 1);
    }

    #[test]
    fn test_last_write_wins_per_currency() {
        let cache = RateCache::new("test");
        cache.put(day(2), "EUR", usd_rate("EUR", "0.92", day(2)));
        cache.put(day(2), "GBP", usd_rate("GBP", "0.79", day(2)));
        cache.put(day(2), "EUR", usd_rate("EUR", "0.93", day(2)));

        let bucket = cache.bucket(day(2)).unwrap();
        assert_eq!(bucket.len(), 2);
        assert_eq!(bucket.get("EUR").unwrap().factor, dec("0.93"));
        assert_eq!(bucket.get("GBP").unwrap().factor, dec("0.79"));
    }

    #[test]
    fn test_most_recent_date() {
        let cache = RateCache::new("ecb");
        match cache.most_recent_date() {
            Err(FxError::NoDataLoaded { provider }) => assert_eq!(provider, "ecb"),
            other => panic!("expected NoDataLoaded, got {:?}", other),
        }

        cache.put(day(5), "EUR", usd_rate("EUR", "0.92", day(5)));
        cache.put(day(9), "EUR", usd_rate("EUR", "0.91", day(9)));
        cache.put(day(1), "EUR", usd_rate("EUR", "0.95", day(1)));

        assert_eq!(cache.most_recent_date().unwrap(), day(9));
        assert_eq!(cache.first_date(), Some(day(1)));
    }

    #[test]
    fn test_dates_between() {
        let cache = RateCache::new("test");
        for d in [1, 3, 5, 7] {
            cache.put(day(d), "EUR", usd_rate("EUR", "0.92", day(d)));
        }

        assert_eq!(cache.dates_between(day(2), day(5)), vec![day(3), day(5)]);
        assert_eq!(cache.dates_between(day(8), day(9)), Vec::<NaiveDate>::new());
        assert!(cache.dates_between(day(5), day(2)).is_empty());
    }

    #[test]
    fn test_stats() {
        let cache = RateCache::new("test");
        cache.put(day(1), "EUR", usd_rate("EUR", "0.92", day(1)));
        cache.put(day(1), "JPY", usd_rate("JPY", "150", day(1)));
        cache.put(day(2), "EUR", usd_rate("EUR", "0.91", day(2)));

        let stats = cache.stats();
        assert_eq!(stats.date_count, 2);
        assert_eq!(stats.entry_count, 3);
        assert_eq!(stats.first_date, Some(day(1)));
        assert_eq!(stats.last_date, Some(day(2)));
        assert_eq!(cache.entry_count(), 3);
    }

    #[test]
    fn test_concurrent_first_writers_share_one_bucket() {
        let cache = RateCache::new("test");
        let codes: Vec<String> = (0..32).map(|i| format!("C{:02}", i)).collect();
        let barrier = Barrier::new(codes.len());

        thread::scope(|s| {
            for code in &codes {
                let cache = cache.clone();
                let barrier = &barrier;
                s.spawn(move || {
                    barrier.wait();
                    cache.put(day(4), code, usd_rate(code, "1.5", day(4)));
                });
            }
        });

        let bucket = cache.bucket(day(4)).unwrap();
        assert_eq!(cache.size(), 1);
        assert_eq!(bucket.len(), codes.len());
        for code in &codes {
            assert!(bucket.contains_key(code.as_str()));
        }
    }
}
