//! Chart data retrieval
//!
//! Charts pull JSON from backend endpoints through a [`DataSource`]. The
//! production implementation is [`HttpDataSource`]; tests substitute a mock.

use crate::chart::error::FetchError;
use reqwest::{Client, ClientBuilder, Response};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

#[cfg(test)]
use mockall::automock;

// User-Agent string with the dashboard version
const USER_AGENT: &str = concat!("profit-dashboard/", env!("CARGO_PKG_VERSION"));

#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait DataSource: Send + Sync {
    /// GET the endpoint and decode its JSON body.
    async fn fetch(&self, endpoint: &str) -> Result<Value, FetchError>;
}

#[derive(Debug, Clone)]
pub struct HttpDataSource {
    client: Client,
    base_url: String,
}

impl HttpDataSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        Ok(Self {
            client: ClientBuilder::new()
                .connect_timeout(timeout)
                .timeout(timeout)
                .build()?,
            base_url: base_url.into(),
        })
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    async fn handle_response_status(response: Response) -> Result<Response, FetchError> {
        if !response.status().is_success() {
            return Err(FetchError::from_response(response).await);
        }
        Ok(response)
    }
}

#[async_trait::async_trait]
impl DataSource for HttpDataSource {
    async fn fetch(&self, endpoint: &str) -> Result<Value, FetchError> {
        let url = self.build_url(endpoint);
        let response = self
            .client
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/json")
            .send()
            .await?;

        let response = Self::handle_response_status(response).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub data: Vec<f64>,
}

impl Series {
    pub fn new(name: impl Into<String>, data: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }
}

/// Series values plus the category labels they line up with by index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesSet {
    pub series: Vec<Series>,
    pub categories: Vec<Value>,
}

impl SeriesSet {
    pub fn series_json(&self) -> Value {
        serde_json::to_value(&self.series).unwrap_or(Value::Array(Vec::new()))
    }

    pub fn categories_json(&self) -> Value {
        Value::Array(self.categories.clone())
    }

    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.data.len()).max().unwrap_or(0)
    }
}
