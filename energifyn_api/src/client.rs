//! HTTP client for the Energi Fyn consumption-price API.

use std::time::Duration;

use url::Url;

use crate::{
    query::{PriceQuery, Query},
    types::DateStamp,
    user_agent::get_user_agent,
    Error,
};

/// Path of the daily consumption-price graph endpoint.
const PRICE_PATH: &str = "/api/graph/consumptionprice";

/// Default cap on the number of body bytes kept in memory.
pub const DEFAULT_MAX_BODY_BYTES: usize = 256 * 1024;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the Energi Fyn consumption-price API.
///
/// Sends requests with browser-like headers and a randomized user agent.
/// Each request builds a fresh `reqwest::Client`. The raw body is returned
/// untouched; locating the price inside it is the caller's business.
#[derive(Debug, Clone)]
pub struct Client {
    /// Base URL for the API. Defaults to `https://api.energifyn.dk`.
    base_api_url: String,
    max_body_bytes: usize,
    timeout: Option<Duration>,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Creates a new client pointing at the production API.
    pub fn new() -> Self {
        Self::with_base_url("https://api.energifyn.dk")
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_api_url: base_url.trim_end_matches('/').to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }

    /// Sets the largest body accepted before the request fails.
    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    /// Sets the request timeout. `None` waits for the server indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    pub fn max_body_bytes(&self) -> usize {
        self.max_body_bytes
    }

    fn get_url(&self, path: &str, query: &impl Query) -> Result<Url, Error> {
        let url = Url::parse(format!("{}{}", &self.base_api_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::RequestFailed
        })?;
        Ok(query.add_to_url(&url))
    }

    /// Fetches the raw consumption-price body for the given day.
    pub async fn fetch(&self, date: &DateStamp) -> Result<Vec<u8>, Error> {
        self.get_price_body(&PriceQuery::new(*date)).await
    }

    /// Fetches the raw consumption-price body for the given query.
    pub async fn get_price_body(&self, query: &PriceQuery) -> Result<Vec<u8>, Error> {
        let url = self.get_url(PRICE_PATH, query)?;
        tracing::debug!("GET {}", url);

        let mut builder = reqwest::Client::builder().user_agent(get_user_agent());
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            tracing::error!("Failed to build HTTP client: {}", e);
            Error::RequestFailed
        })?;

        let resp = client
            .get(url)
            .header("accept", "application/json, text/plain, */*")
            .header("accept-language", "da-DK,da;q=0.9,en;q=0.8")
            .header("origin", "https://www.energifyn.dk")
            .header("referer", "https://www.energifyn.dk")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get resource: {}", e);
                Error::RequestFailed
            })?;

        let status = resp.status();
        let body = self.read_body(resp).await?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        tracing::debug!("Received {} body bytes", body.len());
        Ok(body)
    }

    async fn read_body(&self, mut resp: reqwest::Response) -> Result<Vec<u8>, Error> {
        let limit = self.max_body_bytes;
        if resp.content_length().is_some_and(|len| len > limit as u64) {
            tracing::error!("Declared body length exceeds {} bytes", limit);
            return Err(Error::BodyTooLarge { limit });
        }

        let mut body = Vec::new();
        while let Some(chunk) = resp.chunk().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })? {
            if body.len() + chunk.len() > limit {
                tracing::error!("Response body exceeds {} bytes", limit);
                return Err(Error::BodyTooLarge { limit });
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

fn truncate_body(body: &[u8]) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        String::from_utf8_lossy(body).into_owned()
    } else {
        format!("{}...[truncated]", String::from_utf8_lossy(&body[..MAX]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_carries_day_month_year() {
        let client = Client::with_base_url("https://example.test/");
        let query = PriceQuery::new(DateStamp::new(7, 11, 2024));
        let url = client.get_url(PRICE_PATH, &query).unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.test/api/graph/consumptionprice?date=07-11-2024"
        );
    }

    #[test]
    fn truncate_keeps_short_bodies() {
        assert_eq!(truncate_body(b"oops"), "oops");
    }

    #[test]
    fn truncate_marks_long_bodies() {
        let body = vec![b'x'; 2500];
        let snippet = truncate_body(&body);
        assert!(snippet.ends_with("...[truncated]"));
        assert_eq!(snippet.len(), 2000 + "...[truncated]".len());
    }

    #[test]
    fn builder_defaults() {
        let client = Client::new();
        assert_eq!(client.base_url(), "https://api.energifyn.dk");
        assert_eq!(client.max_body_bytes(), DEFAULT_MAX_BODY_BYTES);
    }
}
