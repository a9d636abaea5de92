//! Error types for chart data retrieval and engine operations

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    /// Reqwest error, typically related to network issues or request failures.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("HTTP error with status {status}: {message}")]
    Http { status: u16, message: String },

    /// The body was not the JSON shape the chart expects.
    #[error("Decoding error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    pub async fn from_response(response: reqwest::Response) -> FetchError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read response text".to_string());

        FetchError::Http { status, message }
    }
}

/// Failure reported by a charting engine or one of its handles.
#[derive(Debug, Error)]
#[error("Chart engine error: {0}")]
pub struct EngineError(pub String);

#[derive(Debug, Error)]
pub enum DashboardError {
    /// The charting engine never signalled readiness.
    #[error("Chart engine not available after {waited:?}")]
    EngineUnavailable { waited: Duration },

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}
