//! Charting engine seam
//!
//! The engine turns a configuration tree into a live chart inside a container.
//! Widgets receive the engine explicitly instead of looking it up globally.

use crate::chart::error::EngineError;
use serde_json::Value;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
pub trait ChartEngine: Send + Sync {
    /// Create a chart bound to `container_id`. Nothing is drawn until `render`.
    fn create(
        &self,
        container_id: &str,
        config: Value,
    ) -> Result<Box<dyn ChartHandle>, EngineError>;
}

/// A live chart created by a [`ChartEngine`].
#[cfg_attr(test, automock)]
pub trait ChartHandle: Send {
    fn render(&mut self) -> Result<(), EngineError>;

    /// Replace the series data without rebuilding the chart.
    fn update_series(&mut self, series: Value) -> Result<(), EngineError>;

    /// Merge a partial configuration into the live chart.
    fn update_options(&mut self, partial: Value) -> Result<(), EngineError>;

    fn resize(&mut self);

    fn destroy(&mut self);
}
