//! Client for settlement-period reports from the Elexon BMRS API.
//!
//! One day at a time: [`Fetcher::fetch`] GETs a report, caches the raw
//! response under `data/<report>_<date>.csv`, and returns it as a cleaned
//! [`Table`]. [`aggregate`] does the same for every day of a date range and
//! stacks the results.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod process;
pub mod request;

#[cfg(test)]
pub(crate) mod testing;

pub use aggregate::{aggregate, aggregate_str, date_range};
pub use config::{ApiKey, Config};
pub use error::{Error, ErrorKind, Result};
pub use fetch::{Fetcher, HttpTransport, Response, Transport};
pub use process::Table;
pub use request::RequestDescriptor;
