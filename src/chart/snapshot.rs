//! Headless chart engine
//!
//! Renders each chart into its container as a static HTML fragment: the full
//! configuration as embedded JSON plus a short summary of the latest value of
//! every series, formatted with the configuration's tooltip formatter.

use crate::chart::engine::{ChartEngine, ChartHandle};
use crate::chart::error::EngineError;
use crate::chart::format::{CurrencyFormat, ValueFormatter};
use crate::chart::options::merge;
use crate::chart::placeholder::{Document, escape_html};
use log::debug;
use serde_json::Value;
use std::sync::Arc;

pub struct SnapshotEngine {
    document: Arc<dyn Document>,
    currency: CurrencyFormat,
}

impl SnapshotEngine {
    pub fn new(document: Arc<dyn Document>, currency: CurrencyFormat) -> Self {
        Self { document, currency }
    }
}

impl ChartEngine for SnapshotEngine {
    fn create(
        &self,
        container_id: &str,
        config: Value,
    ) -> Result<Box<dyn ChartHandle>, EngineError> {
        Ok(Box::new(SnapshotChart {
            document: Arc::clone(&self.document),
            currency: self.currency.clone(),
            container_id: container_id.to_string(),
            config,
            resizes: 0,
            destroyed: false,
        }))
    }
}

pub struct SnapshotChart {
    document: Arc<dyn Document>,
    currency: CurrencyFormat,
    container_id: String,
    config: Value,
    resizes: u32,
    destroyed: bool,
}

impl SnapshotChart {
    fn draw(&self) -> Result<(), EngineError> {
        if self.destroyed {
            return Err(EngineError(format!(
                "chart '{}' was destroyed",
                self.container_id
            )));
        }
        // A missing container just means nothing gets attached.
        if !self.document.set_inner_html(&self.container_id, self.markup()) {
            debug!("Container '{}' not found, chart not attached", self.container_id);
        }
        Ok(())
    }

    fn markup(&self) -> String {
        let formatter = ValueFormatter::from_config(&self.config, &["tooltip", "y"]);
        let chart_type = self.config["chart"]["type"].as_str().unwrap_or("line");
        let last_label = self.config["xaxis"]["categories"]
            .as_array()
            .and_then(|c| c.last())
            .map(label_text);

        let mut summary = String::new();
        for series in self.config["series"].as_array().into_iter().flatten() {
            let name = series["name"].as_str().unwrap_or_default();
            let latest = series["data"]
                .as_array()
                .and_then(|d| d.last())
                .and_then(Value::as_f64)
                .map(|v| formatter.apply(v, &self.currency))
                .unwrap_or_else(|| "-".to_string());
            summary.push_str(&format!(
                "<li><span class=\"series-name\">{}</span> {}</li>",
                escape_html(name),
                escape_html(&latest)
            ));
        }

        // Keeps "</script>" inside string values from closing the tag.
        let json = self.config.to_string().replace("</", "<\\/");
        format!(
            "<div class=\"chart-snapshot\" data-type=\"{}\">\
<script type=\"application/json\">{}</script>\
<p class=\"chart-period\">{}</p><ul class=\"chart-summary\">{}</ul></div>",
            escape_html(chart_type),
            json,
            escape_html(&last_label.unwrap_or_default()),
            summary
        )
    }
}

fn label_text(label: &Value) -> String {
    match label {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl ChartHandle for SnapshotChart {
    fn render(&mut self) -> Result<(), EngineError> {
        self.draw()
    }

    fn update_series(&mut self, series: Value) -> Result<(), EngineError> {
        if let Value::Object(config) = &mut self.config {
            config.insert("series".to_string(), series);
        }
        self.draw()
    }

    fn update_options(&mut self, partial: Value) -> Result<(), EngineError> {
        self.config = merge(&self.config, &partial);
        self.draw()
    }

    fn resize(&mut self) {
        if !self.destroyed {
            self.resizes += 1;
            debug!("Resized chart '{}' ({} times)", self.container_id, self.resizes);
        }
    }

    fn destroy(&mut self) {
        if !self.destroyed {
            self.destroyed = true;
            self.document.set_inner_html(&self.container_id, String::new());
        }
    }
}
