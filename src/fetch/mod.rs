// src/fetch/mod.rs

use chrono::NaiveDate;
use std::{path::PathBuf, time::Instant};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::process::{load_report_csv, Table};
use crate::request::{parse_date, RequestDescriptor};

pub mod cache;
pub mod transport;
pub mod urls;

pub use transport::{HttpTransport, Response, Transport};

/// Fetches one report day: GET, cache to disk, load, normalize.
pub struct Fetcher<T = HttpTransport> {
    config: Config,
    transport: T,
}

impl Fetcher<HttpTransport> {
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self::with_transport(config, HttpTransport::new()?))
    }
}

impl<T: Transport> Fetcher<T> {
    pub fn with_transport(config: Config, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// A descriptor for `report` on `date` carrying the configured credential.
    pub fn descriptor(&self, report: &str, date: NaiveDate) -> Result<RequestDescriptor> {
        RequestDescriptor::new(report, date, self.config.api_key().clone())
    }

    /// Where the response for `req` is cached.
    pub fn cache_path(&self, req: &RequestDescriptor) -> PathBuf {
        cache::cache_path(self.config.cache_dir(), req.report(), req.date())
    }

    /// Run one round trip for `req` and return its normalized table.
    ///
    /// Nothing is written unless the API answers 200. The cache file is
    /// always overwritten.
    #[tracing::instrument(level = "info", skip_all, fields(report = %req.report(), date = %req.date()))]
    pub fn fetch(&self, req: &RequestDescriptor) -> Result<Table> {
        let url = urls::report_url(self.config.base_url(), req)?;
        info!(url = %urls::redacted(&url), "requesting report");

        let start = Instant::now();
        let resp = self.transport.get(&url)?;
        if !resp.is_ok() {
            warn!(status = resp.status, elapsed = ?start.elapsed(), "request rejected");
            return Err(Error::Request {
                report: req.report().to_string(),
                date: req.date(),
                status: resp.status,
            });
        }

        let path = self.cache_path(req);
        let bytes = cache::write_response(&path, &resp.body)?;
        info!(path = %path.display(), bytes, elapsed = ?start.elapsed(), "response cached");

        let table = load_report_csv(&path, self.config.preamble_lines())?;
        info!(rows = table.num_rows(), columns = table.num_columns(), "report normalized");
        Ok(table)
    }

    /// Shorthand for a report and a `YYYY-MM-DD` date with default options.
    pub fn fetch_day(&self, report: &str, date: &str) -> Result<Table> {
        let req = self.descriptor(report, parse_date(date)?)?;
        self.fetch(&req)
    }
}
