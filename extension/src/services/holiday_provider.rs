//! Public-holiday lookup against the remote holiday API.
//!
//! The provider is a trait so the calendar source can be exercised without
//! network access; `FeiertageClient` is the reqwest-backed implementation.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use reqwest::Client;
use serde::Deserialize;
use std::{
    collections::{BTreeMap, BTreeSet},
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

use crate::{error::CalendarError, models::DateKey};

pub const DEFAULT_HOLIDAY_API_URL: &str = "https://feiertage-api.de/api/";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Source of public holidays for one year and one region.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HolidayProvider: Send + Sync {
    async fn fetch_holidays(
        &self,
        year: i32,
        region: &str,
    ) -> Result<BTreeSet<DateKey>, CalendarError>;
}

/// One value of the provider's response object, keyed by holiday name.
#[derive(Debug, Clone, Deserialize)]
pub struct HolidayRecord {
    #[serde(rename = "datum")]
    pub date: String,
}

pub struct FeiertageClient {
    client: Client,
    base_url: String,
    time_zone: Tz,
}

impl FeiertageClient {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        time_zone: Tz,
    ) -> Result<Self, CalendarError> {
        let client = Client::builder()
            .user_agent(concat!("infoag-extension/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| {
                CalendarError::Network(format!("Failed to initialize HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            time_zone,
        })
    }
}

#[async_trait]
impl HolidayProvider for FeiertageClient {
    async fn fetch_holidays(
        &self,
        year: i32,
        region: &str,
    ) -> Result<BTreeSet<DateKey>, CalendarError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("jahr", year.to_string()), ("nur_land", region.to_string())])
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let holidays = parse_holiday_payload(&body, &self.time_zone)?;
        tracing::debug!(year, region, count = holidays.len(), "Fetched public holidays");
        Ok(holidays)
    }
}

/// Maps a provider response body to the set of holiday keys.
pub fn parse_holiday_payload(body: &str, time_zone: &Tz) -> Result<BTreeSet<DateKey>, CalendarError> {
    let records: BTreeMap<String, HolidayRecord> = serde_json::from_str(body)?;

    records
        .iter()
        .map(|(name, record)| {
            parse_holiday_date(&record.date, time_zone)
                .map(DateKey::from_date)
                .ok_or_else(|| {
                    CalendarError::Parse(format!(
                        "holiday {:?} has unparseable date {:?}",
                        name, record.date
                    ))
                })
        })
        .collect()
}

/// Reads the calendar day of a provider date.
///
/// Plain `YYYY-MM-DD` dates are taken as-is. Timestamps are shifted into
/// `time_zone` first so month and day are local fields, not UTC ones.
pub fn parse_holiday_date(raw: &str, time_zone: &Tz) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().or_else(|| {
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(time_zone).date_naive())
    })
}

/// In-memory provider returning a fixed answer and counting calls.
pub struct HolidayProviderStub {
    response: Result<BTreeSet<DateKey>, CalendarError>,
    calls: AtomicUsize,
}

impl HolidayProviderStub {
    pub fn new(holidays: impl IntoIterator<Item = DateKey>) -> Self {
        Self {
            response: Ok(holidays.into_iter().collect()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(error: CalendarError) -> Self {
        Self {
            response: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HolidayProvider for HolidayProviderStub {
    async fn fetch_holidays(
        &self,
        _year: i32,
        _region: &str,
    ) -> Result<BTreeSet<DateKey>, CalendarError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response.clone()
    }
}
