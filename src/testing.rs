// src/testing.rs
//
// Shared fixtures for unit tests.

use std::{cell::RefCell, path::Path};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use url::Url;

use crate::config::{ApiKey, Config};
use crate::error::Result;
use crate::fetch::{urls::PARAM_SETTLEMENT_DATE, Response, Transport};

pub fn init_test_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,bmrscraper=debug")),
        )
        .with_test_writer()
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Config with a fixed key and the cache under `<root>/data`.
pub fn test_config(root: &Path) -> Config {
    Config::new(ApiKey::new("test-key"))
        .expect("non-empty key")
        .with_cache_dir(root.join("data"))
}

/// A response body shaped like the API's CSV: four envelope lines, a header
/// with spaced names, one row per `(date, period, quantity)` and a footer.
pub fn fake_report(rows: &[(&str, &str, &str)]) -> String {
    let mut out = String::from("HDR,GENERATION BY FUEL TYPE\n*\n*Report for test\n*\n");
    out.push_str("Record Type,Settlement Date,Settlement Period,Quantity\n");
    for (date, period, qty) in rows {
        out.push_str(&format!("B1770,{date},{period},{qty}\n"));
    }
    out.push_str("FTR\n");
    out
}

/// The `SettlementDate` query value of a request URL.
pub fn settlement_date(url: &Url) -> String {
    url.query_pairs()
        .find(|(k, _)| k == PARAM_SETTLEMENT_DATE)
        .map(|(_, v)| v.into_owned())
        .unwrap_or_default()
}

type Responder = Box<dyn Fn(&Url, usize) -> Response>;

/// In-memory transport that records every URL it is asked for.
pub struct FakeTransport {
    responder: Responder,
    requested: RefCell<Vec<String>>,
}

impl FakeTransport {
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&Url, usize) -> Response + 'static,
    {
        Self {
            responder: Box::new(f),
            requested: RefCell::new(Vec::new()),
        }
    }

    pub fn always(resp: Response) -> Self {
        Self::from_fn(move |_, _| resp.clone())
    }

    /// The n-th call gets the n-th response.
    pub fn sequence(responses: Vec<Response>) -> Self {
        Self::from_fn(move |_, n| responses[n].clone())
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.borrow().clone()
    }

    pub fn requested_dates(&self) -> Vec<String> {
        self.requested
            .borrow()
            .iter()
            .filter_map(|u| Url::parse(u).ok())
            .map(|u| settlement_date(&u))
            .collect()
    }
}

impl Transport for FakeTransport {
    fn get(&self, url: &Url) -> Result<Response> {
        let n = self.requested.borrow().len();
        self.requested.borrow_mut().push(url.to_string());
        Ok((self.responder)(url, n))
    }
}
