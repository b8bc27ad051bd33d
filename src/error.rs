// src/error.rs

use chrono::NaiveDate;
use std::path::PathBuf;

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse category of an [`Error`], stable across the `OnDate` wrapper.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Request,
    Schema,
    Transport,
    Config,
    Io,
    Parse,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed caller input: bad date, blank report, inverted range.
    #[error("invalid input: {0}")]
    Validation(String),

    /// The API answered with anything other than 200.
    #[error("request for {report} on {date} failed with HTTP status {status}")]
    Request {
        report: String,
        date: NaiveDate,
        status: u16,
    },

    /// The parsed response has no `SettlementDate` column.
    #[error("{path}: missing required column `{column}` (found: {found:?})")]
    Schema {
        path: PathBuf,
        column: &'static str,
        found: Vec<String>,
    },

    /// Network-level failure. The URL is stripped before it gets here.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("reading {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A data row with more fields than the header row.
    #[error("{path}: line {line} has {found} fields, header has {expected}")]
    RowWidth {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("building table: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// A per-day failure raised during range aggregation.
    #[error("settlement date {date}: {source}")]
    OnDate {
        date: NaiveDate,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(_) => ErrorKind::Validation,
            Error::Request { .. } => ErrorKind::Request,
            Error::Schema { .. } => ErrorKind::Schema,
            Error::Transport(_) => ErrorKind::Transport,
            Error::Config(_) => ErrorKind::Config,
            Error::Io { .. } => ErrorKind::Io,
            Error::Csv { .. } | Error::RowWidth { .. } | Error::Arrow(_) => ErrorKind::Parse,
            Error::OnDate { source, .. } => source.kind(),
        }
    }

    /// The settlement date attached by the aggregator, if any.
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Error::OnDate { date, .. } => Some(*date),
            _ => None,
        }
    }

    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Error::Io {
            context: context.into(),
            source,
        }
    }

    pub(crate) fn on_date(self, date: NaiveDate) -> Self {
        Error::OnDate {
            date,
            source: Box::new(self),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        // reqwest renders the full URL, query string included.
        Error::Transport(e.without_url())
    }
}
