// src/fetch/transport.rs

use reqwest::blocking::Client;
use std::time::Duration;
use url::Url;

use crate::error::Result;

/// What the fetcher needs back from one GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// One blocking GET per call. Implemented over HTTP for real use and by an
/// in-memory fake in tests.
pub trait Transport {
    fn get(&self, url: &Url) -> Result<Response>;
}

/// Blocking reqwest client with no request timeout and default redirects.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(None::<Duration>)
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &Url) -> Result<Response> {
        let resp = self.client.get(url.clone()).send()?;
        let status = resp.status().as_u16();
        // The body of a failed request is never looked at.
        let body = if status == 200 { resp.text()? } else { String::new() };
        Ok(Response { status, body })
    }
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &Url) -> Result<Response> {
        (**self).get(url)
    }
}
