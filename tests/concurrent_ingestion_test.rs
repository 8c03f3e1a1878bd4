//! Concurrency tests for ingestion racing with queries

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rusty_fxrates::config::ProviderConfig;
use rusty_fxrates::fx::{CurrencyUnit, DateSpec, HistoricRateProvider, RateProvider};
use std::sync::{Arc, Barrier};
use std::thread;

fn unit(code: &str) -> CurrencyUnit {
    CurrencyUnit::new(code).unwrap()
}

fn codes(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("X{:03}", i)).collect()
}

#[test]
fn test_concurrent_first_writes_on_fresh_date() {
    let _ = env_logger::builder().is_test(true).try_init();

    const N: usize = 64;
    let provider = HistoricRateProvider::new(ProviderConfig::new("race", unit("USD"))).unwrap();
    let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
    let barrier = Arc::new(Barrier::new(N));

    let handles: Vec<_> = codes(N)
        .into_iter()
        .enumerate()
        .map(|(i, code)| {
            let listener = provider.listener();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                listener
                    .on_batch(date, &code, Decimal::new(i as i64 + 1, 2))
                    .unwrap();
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(provider.cache().size(), 1);
    let bucket = provider.cache().bucket(date).unwrap();
    assert_eq!(bucket.len(), N);

    for (i, code) in codes(N).iter().enumerate() {
        let rate = provider
            .get_rate(&unit("USD"), &unit(code), &DateSpec::On(date))
            .unwrap();
        assert_eq!(rate.factor, Decimal::new(i as i64 + 1, 2));
    }
}

#[test]
fn test_queries_while_loader_runs() {
    let provider = HistoricRateProvider::new(ProviderConfig::new("race", unit("USD"))).unwrap();
    let first = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    provider
        .listener()
        .on_batch(first, "EUR", Decimal::new(92, 2))
        .unwrap();

    let listener = provider.listener();
    let loader = thread::spawn(move || {
        for offset in 1..=30u64 {
            let date = first + chrono::Days::new(offset);
            listener.on_batch(date, "EUR", Decimal::new(90, 2)).unwrap();
            listener.on_batch(date, "JPY", Decimal::new(150, 0)).unwrap();
        }
    });

    // Every answer must come from a fully valid bucket state: either the
    // seeded day or a later day with EUR present
    for _ in 0..200 {
        let rate = provider
            .get_rate(&unit("USD"), &unit("EUR"), &DateSpec::Candidates(vec![first]))
            .unwrap();
        assert_eq!(rate.factor, Decimal::new(92, 2));

        let latest = provider.get_rate(&unit("USD"), &unit("EUR"), &DateSpec::Latest);
        if let Ok(rate) = latest {
            assert!(rate.factor == Decimal::new(92, 2) || rate.factor == Decimal::new(90, 2));
        }
    }

    loader.join().unwrap();
    assert_eq!(provider.cache().size(), 31);
    assert_eq!(provider.stats().entry_count, 61);
}
