//! Date specifications for rate queries

use chrono::{Duration, NaiveDate};

/// Longest window [`DateSpec::lookback`] will walk
pub const MAX_LOOKBACK_DAYS: u32 = 366;

/// Which dates a query may be answered from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DateSpec {
    /// Most recent date held by the provider
    #[default]
    Latest,
    /// Exactly one date
    On(NaiveDate),
    /// Candidate dates, tried in order
    Candidates(Vec<NaiveDate>),
}

impl DateSpec {
    /// `date` first, then each of the `days` preceding days
    ///
    /// `days` is capped at [`MAX_LOOKBACK_DAYS`].
    pub fn lookback(date: NaiveDate, days: u32) -> Self {
        let days = days.min(MAX_LOOKBACK_DAYS);
        let candidates = (0..=i64::from(days))
            .filter_map(|offset| date.checked_sub_signed(Duration::days(offset)))
            .collect();
        DateSpec::Candidates(candidates)
    }
}

impl From<NaiveDate> for DateSpec {
    fn from(date: NaiveDate) -> Self {
        DateSpec::On(date)
    }
}

impl From<Vec<NaiveDate>> for DateSpec {
    fn from(dates: Vec<NaiveDate>) -> Self {
        DateSpec::Candidates(dates)
    }
}

/// Outcome of date resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedDates {
    /// Use the most recent bucket in the cache
    MostRecent,
    /// Walk these dates in order
    Candidates(Vec<NaiveDate>),
}

/// Turns a [`DateSpec`] into the sequence of dates a query walks
#[derive(Debug, Clone, Copy, Default)]
pub struct DateResolver;

impl DateResolver {
    pub fn resolve(&self, spec: &DateSpec) -> ResolvedDates {
        match spec {
            DateSpec::Latest => ResolvedDates::MostRecent,
            DateSpec::On(date) => ResolvedDates::Candidates(vec![*date]),
            DateSpec::Candidates(dates) if dates.is_empty() => ResolvedDates::MostRecent,
            DateSpec::Candidates(dates) => ResolvedDates::Candidates(dates.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn test_latest_resolves_to_most_recent() {
        let resolver = DateResolver;
        assert_eq!(resolver.resolve(&DateSpec::Latest), ResolvedDates::MostRecent);
        assert_eq!(
            resolver.resolve(&DateSpec::Candidates(vec![])),
            ResolvedDates::MostRecent
        );
    }

    #[test]
    fn test_explicit_dates_keep_order() {
        let resolver = DateResolver;
        assert_eq!(
            resolver.resolve(&DateSpec::On(day(5))),
            ResolvedDates::Candidates(vec![day(5)])
        );
        assert_eq!(
            resolver.resolve(&vec![day(4), day(1), day(3)].into()),
            ResolvedDates::Candidates(vec![day(4), day(1), day(3)])
        );
    }

    #[test]
    fn test_lookback_walks_backwards() {
        assert_eq!(
            DateSpec::lookback(day(3), 2),
            DateSpec::Candidates(vec![day(3), day(2), day(1)])
        );
        assert_eq!(
            DateSpec::lookback(day(3), 0),
            DateSpec::Candidates(vec![day(3)])
        );
    }

    #[test]
    fn test_lookback_is_capped() {
        match DateSpec::lookback(day(3), u32::MAX) {
            DateSpec::Candidates(dates) => {
                assert_eq!(dates.len(), MAX_LOOKBACK_DAYS as usize + 1);
                assert_eq!(dates[0], day(3));
                assert_eq!(
                    dates.last().copied(),
                    day(3).checked_sub_signed(Duration::days(i64::from(MAX_LOOKBACK_DAYS)))
                );
            }
            other => panic!("expected candidates, got {:?}", other),
        }
    }
}
