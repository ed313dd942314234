// src/core/net.rs

use std::error::Error;
use std::time::Duration;

/// Fetch capability required by the pagination walker. One method so
/// tests can stand in a canned-page fetcher.
pub trait Fetch {
    fn fetch(&self, url: &str) -> Result<String, Box<dyn Error>>;
}

/// Blocking HTTP client with a fixed per-request ceiling; a stalled
/// controller must not hang the poll cycle.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(timeout_secs: u64) -> Result<Self, Box<dyn Error>> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("trend_scrape/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, Box<dyn Error>> {
        let resp = self.client.get(url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(format!("HTTP error: {} {}", status, url).into());
        }
        Ok(resp.text()?)
    }
}
