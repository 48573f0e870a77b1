use super::{CardCatalog, CardFilter};
use crate::config::DEFAULT_API_BASE_URL;
use crate::error::{NebulaError, Result};
use crate::model::{Card, Stats};
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;

/// Blocking client for the Nebula catalog API.
pub struct HttpCatalog {
    client: Client,
    base_url: String,
}

/// Drops one trailing `/`; an empty value falls back to the default API.
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
    if trimmed.is_empty() {
        DEFAULT_API_BASE_URL.to_string()
    } else {
        trimmed.to_string()
    }
}

fn failure_message(status: u16, body: &str) -> String {
    if body.is_empty() {
        format!("Request failed with {status}")
    } else {
        body.to_string()
    }
}

impl HttpCatalog {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("nebula/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| NebulaError::Remote(e.to_string()))?;
        Ok(Self::with_client(base_url, client))
    }

    pub fn with_client(base_url: &str, client: Client) -> Self {
        Self {
            client,
            base_url: normalize_base_url(base_url),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, ?query, "catalog request");
        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .map_err(|e| NebulaError::Remote(e.to_string()))?;
        Self::handle(response)
    }

    fn handle<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(NebulaError::Remote(failure_message(status.as_u16(), &body)));
        }
        response
            .json::<T>()
            .map_err(|e| NebulaError::Remote(e.to_string()))
    }
}

impl CardCatalog for HttpCatalog {
    fn fetch_all(&self, filter: &CardFilter) -> Result<Vec<Card>> {
        let query: Vec<(&str, &str)> = filter
            .params()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        let cards: Vec<Card> = self.get("/cards", &query)?;
        Ok(filter.retain_set(cards))
    }

    fn search(&self, term: &str) -> Result<Vec<Card>> {
        self.get("/search", &[("q", term)])
    }

    fn fetch_by_number(&self, number: &str) -> Result<Card> {
        let trimmed = number.trim();
        let cards: Vec<Card> = self.get("/cards", &[("number", trimmed)])?;
        cards
            .into_iter()
            .next()
            .ok_or_else(|| NebulaError::NotFound(trimmed.to_string()))
    }

    fn fetch_stats(&self) -> Result<Stats> {
        self.get("/stats", &[])
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}
