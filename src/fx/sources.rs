//! Quote sources feeding the ingestion listener
//!
//! A source yields one record per quote line. A record is either a parsed
//! [`Quote`] or the reason that line could not be parsed, so a single bad
//! line never fails the whole batch.

use crate::error::Result;
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Rate of one unit of the pivot currency in `currency`, on `date`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub date: NaiveDate,
    pub currency: String,
    pub factor: Decimal,
}

impl Quote {
    pub fn new(date: NaiveDate, currency: &str, factor: Decimal) -> Self {
        Self {
            date,
            currency: currency.to_string(),
            factor,
        }
    }
}

/// A parsed quote, or why its line was rejected
pub type QuoteRecord = std::result::Result<Quote, String>;

/// Anything that can produce `(date, currency, factor)` quotes
pub trait QuoteSource: Send + Sync {
    fn quotes(&self) -> Result<Vec<QuoteRecord>>;
}

/// Quotes already held in memory
#[derive(Debug, Clone, Default)]
pub struct StaticQuotes {
    records: Vec<QuoteRecord>,
}

impl StaticQuotes {
    pub fn new(quotes: Vec<Quote>) -> Self {
        Self {
            records: quotes.into_iter().map(Ok).collect(),
        }
    }

    pub fn from_records(records: Vec<QuoteRecord>) -> Self {
        Self { records }
    }
}

impl QuoteSource for StaticQuotes {
    fn quotes(&self) -> Result<Vec<QuoteRecord>> {
        Ok(self.records.clone())
    }
}

#[derive(Debug, Clone)]
enum CsvInput {
    Text(String),
    File(PathBuf),
}

/// Quotes read from CSV
///
/// Expected format, with a header line: `date,currency,factor`, dates as
/// `YYYY-MM-DD`. Blank lines and lines starting with `#` are ignored.
#[derive(Debug, Clone)]
pub struct CsvQuoteSource {
    input: CsvInput,
}

impl CsvQuoteSource {
    pub fn from_text(csv_data: &str) -> Self {
        Self {
            input: CsvInput::Text(csv_data.to_string()),
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            input: CsvInput::File(path.as_ref().to_path_buf()),
        }
    }

    fn parse<R: std::io::Read>(reader: R) -> Vec<QuoteRecord> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .comment(Some(b'#'))
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        csv_reader
            .records()
            .map(|record| -> QuoteRecord {
                let record = record.map_err(|e| e.to_string())?;
                let line = record.position().map_or(0, |p| p.line());
                parse_record(&record).map_err(|e| format!("line {}: {}", line, e))
            })
            .collect()
    }
}

fn parse_record(record: &StringRecord) -> std::result::Result<Quote, String> {
    if record.len() != 3 {
        return Err(format!("expected 3 columns, got {}", record.len()));
    }

    let date = NaiveDate::parse_from_str(&record[0], "%Y-%m-%d")
        .map_err(|e| format!("invalid date {:?}: {}", &record[0], e))?;
    let factor = Decimal::from_str(&record[2])
        .map_err(|e| format!("invalid factor {:?}: {}", &record[2], e))?;

    Ok(Quote::new(date, &record[1], factor))
}

impl QuoteSource for CsvQuoteSource {
    fn quotes(&self) -> Result<Vec<QuoteRecord>> {
        match &self.input {
            CsvInput::Text(text) => Ok(Self::parse(text.as_bytes())),
            CsvInput::File(path) => {
                let file = std::fs::File::open(path)?;
                Ok(Self::parse(file))
            }
        }
    }
}
