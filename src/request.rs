// src/request.rs

use chrono::NaiveDate;

use crate::config::ApiKey;
use crate::error::{Error, Result};

pub const DEFAULT_SERVICE_TYPE: &str = "csv";
/// Wildcard: every settlement period of the day.
pub const DEFAULT_PERIOD: &str = "*";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parameters of one report fetch. Fields are fixed once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestDescriptor {
    report: String,
    date: NaiveDate,
    api_key: ApiKey,
    service_type: String,
    period: String,
}

impl RequestDescriptor {
    pub fn new(report: impl Into<String>, date: NaiveDate, api_key: ApiKey) -> Result<Self> {
        let report = report.into();
        let report = report.trim();
        if report.is_empty() {
            return Err(Error::Validation("report must not be empty".into()));
        }
        // The report name becomes part of the cache file name.
        if report.contains(&['/', '\\'][..]) {
            return Err(Error::Validation(format!(
                "report {report:?} must not contain path separators"
            )));
        }
        Ok(Self {
            report: report.to_string(),
            date,
            api_key,
            service_type: DEFAULT_SERVICE_TYPE.to_string(),
            period: DEFAULT_PERIOD.to_string(),
        })
    }

    /// Same as [`RequestDescriptor::new`] with the date given as `YYYY-MM-DD`.
    pub fn parse(report: impl Into<String>, date: &str, api_key: ApiKey) -> Result<Self> {
        Self::new(report, parse_date(date)?, api_key)
    }

    pub fn with_service_type(mut self, service_type: impl Into<String>) -> Result<Self> {
        self.service_type = non_blank("service type", service_type.into())?;
        Ok(self)
    }

    pub fn with_period(mut self, period: impl Into<String>) -> Result<Self> {
        self.period = non_blank("period", period.into())?;
        Ok(self)
    }

    pub fn report(&self) -> &str {
        &self.report
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    pub fn service_type(&self) -> &str {
        &self.service_type
    }

    pub fn period(&self) -> &str {
        &self.period
    }
}

/// Parse a settlement date in ISO-8601 (`YYYY-MM-DD`) form.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|e| Error::Validation(format!("invalid settlement date {raw:?}: {e}")))
}

fn non_blank(what: &str, value: String) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation(format!("{what} must not be empty")));
    }
    Ok(trimmed.to_string())
}
