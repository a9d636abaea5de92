//! One chart, end to end
//!
//! A widget owns the live engine handle for its container and drives it
//! through fetch, render, in-place update and teardown.

use crate::chart::data::{DataSource, SeriesSet};
use crate::chart::engine::{ChartEngine, ChartHandle};
use crate::chart::error::{DashboardError, FetchError};
use crate::chart::kinds::{ChartKind, ChartName};
use crate::chart::options::OptionComposer;
use crate::chart::placeholder::{Document, show_error, show_loading};
use crate::events::{EventSender, EventType};
use crate::logging::LogLevel;
use log::{debug, error, warn};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Copy, Clone, PartialEq, Eq, strum::Display)]
pub enum WidgetState {
    Uninitialized,
    Loading,
    Rendered,
    Error,
    /// Terminal; every later operation is a no-op.
    Destroyed,
}

/// Collaborators shared by every widget on a dashboard.
#[derive(Clone)]
pub struct WidgetContext {
    pub engine: Arc<dyn ChartEngine>,
    pub source: Arc<dyn DataSource>,
    pub document: Arc<dyn Document>,
    pub composer: Arc<OptionComposer>,
    pub events: EventSender,
}

pub struct Widget {
    name: ChartName,
    container_id: String,
    endpoint: String,
    kind: Box<dyn ChartKind>,
    ctx: WidgetContext,
    chart: Option<Box<dyn ChartHandle>>,
    state: WidgetState,
}

impl Widget {
    pub fn new(name: ChartName, ctx: WidgetContext) -> Self {
        Self::with_target(name, name.container_id(), name.endpoint(), ctx)
    }

    pub fn with_target(
        name: ChartName,
        container_id: impl Into<String>,
        endpoint: impl Into<String>,
        ctx: WidgetContext,
    ) -> Self {
        Self {
            name,
            container_id: container_id.into(),
            endpoint: endpoint.into(),
            kind: name.kind(),
            ctx,
            chart: None,
            state: WidgetState::Uninitialized,
        }
    }

    pub fn state(&self) -> WidgetState {
        self.state
    }

    #[cfg(test)]
    pub fn has_chart(&self) -> bool {
        self.chart.is_some()
    }

    /// Load and draw the chart. Failures end up as the error placeholder.
    pub async fn init(&mut self) {
        if self.state == WidgetState::Destroyed {
            return;
        }
        self.state = WidgetState::Loading;
        show_loading(self.ctx.document.as_ref(), &self.container_id);

        let result = match self.fetch_data().await {
            Ok(data) => self.render_chart(&data),
            Err(e) => Err(DashboardError::from(e)),
        };

        match result {
            Ok(()) => {
                self.state = WidgetState::Rendered;
                self.ctx
                    .events
                    .send_chart_event(
                        self.name,
                        format!("Rendered {}", self.name),
                        EventType::Success,
                        LogLevel::Info,
                    )
                    .await;
            }
            Err(e) => {
                error!("Failed to initialize chart {}: {}", self.name, e);
                self.state = WidgetState::Error;
                show_error(
                    self.ctx.document.as_ref(),
                    &self.container_id,
                    Some(self.kind.error_message()),
                );
                self.ctx
                    .events
                    .send_chart_event(
                        self.name,
                        format!("Failed to load {}: {}", self.name, e),
                        EventType::Error,
                        LogLevel::Error,
                    )
                    .await;
            }
        }
    }

    pub async fn fetch_data(&self) -> Result<SeriesSet, FetchError> {
        let body = self.ctx.source.fetch(&self.endpoint).await?;
        self.kind.extract(&body)
    }

    fn render_chart(&mut self, data: &SeriesSet) -> Result<(), DashboardError> {
        let options = self.ctx.composer.compose(&self.kind.specific_options(data));

        if let Some(mut previous) = self.chart.take() {
            previous.destroy();
        }

        let mut chart = self.ctx.engine.create(&self.container_id, options)?;
        if let Err(e) = chart.render() {
            chart.destroy();
            return Err(e.into());
        }
        self.chart = Some(chart);
        Ok(())
    }

    /// Refresh the live chart's data in place.
    ///
    /// Without a live chart this does nothing. On failure the chart keeps
    /// showing its last good data and the error is handed back to the caller.
    pub async fn update(&mut self) -> Result<(), DashboardError> {
        if self.chart.is_none() {
            debug!("Skipping update for {}: no live chart", self.name);
            return Ok(());
        }

        let result = self.refresh().await;
        match &result {
            Ok(points) => {
                self.ctx
                    .events
                    .send_chart_event(
                        self.name,
                        format!("Updated {} ({} points)", self.name, points),
                        EventType::Refresh,
                        LogLevel::Debug,
                    )
                    .await;
            }
            Err(e) => {
                warn!("Failed to update chart {}: {}", self.name, e);
                self.ctx
                    .events
                    .send_chart_event(
                        self.name,
                        format!("Failed to update {}: {}", self.name, e),
                        EventType::Error,
                        LogLevel::Warn,
                    )
                    .await;
            }
        }
        result.map(|_| ())
    }

    async fn refresh(&mut self) -> Result<usize, DashboardError> {
        let data = self.fetch_data().await?;
        // Destroyed while the request was in flight.
        let Some(chart) = self.chart.as_mut() else {
            return Ok(0);
        };
        chart.update_series(data.series_json())?;
        chart.update_options(json!({ "xaxis": { "categories": data.categories_json() } }))?;
        Ok(data.point_count())
    }

    pub fn resize(&mut self) {
        if let Some(chart) = self.chart.as_mut() {
            chart.resize();
        }
    }

    /// Release the chart. Safe to call more than once.
    pub fn destroy(&mut self) {
        if let Some(mut chart) = self.chart.take() {
            chart.destroy();
        }
        self.state = WidgetState::Destroyed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::data::MockDataSource;
    use crate::chart::engine::{MockChartEngine, MockChartHandle};
    use crate::chart::error::EngineError;
    use crate::chart::placeholder::MemoryDocument;
    use crate::events::Event;
    use serde_json::Value;
    use tokio::sync::mpsc;

    const CONTAINER: &str = "profit-evolution-chart";

    fn sample() -> Value {
        json!({
            "cumulative_profit": [1, 2, 3],
            "monthly_profit": [4, 5, 6],
            "labels": ["Jan", "Feb", "Mar"]
        })
    }

    fn context(
        engine: MockChartEngine,
        source: MockDataSource,
    ) -> (WidgetContext, Arc<MemoryDocument>, mpsc::Receiver<Event>) {
        let document = Arc::new(MemoryDocument::with_containers("t", [CONTAINER]));
        let (tx, rx) = mpsc::channel(16);
        let ctx = WidgetContext {
            engine: Arc::new(engine),
            source: Arc::new(source),
            document: document.clone(),
            composer: Arc::new(OptionComposer::default()),
            events: EventSender::new(tx),
        };
        (ctx, document, rx)
    }

    fn ok_source(times: usize) -> MockDataSource {
        let mut source = MockDataSource::new();
        source
            .expect_fetch()
            .times(times)
            .returning(|_| Ok(sample()));
        source
    }

    fn failing_source() -> MockDataSource {
        let mut source = MockDataSource::new();
        source.expect_fetch().returning(|_| {
            Err(FetchError::Http {
                status: 500,
                message: "boom".to_string(),
            })
        });
        source
    }

    fn rendering_engine() -> MockChartEngine {
        let mut engine = MockChartEngine::new();
        engine.expect_create().times(1).returning(|_, _| {
            let mut handle = MockChartHandle::new();
            handle.expect_render().times(1).returning(|| Ok(()));
            handle.expect_destroy().times(1).return_const(());
            Ok(Box::new(handle))
        });
        engine
    }

    #[tokio::test]
    async fn test_init_renders_merged_configuration() {
        let mut engine = MockChartEngine::new();
        engine
            .expect_create()
            .withf(|container, config| {
                container.to_string() == CONTAINER
                    && config["series"][0]["name"] == "Lucro Acumulado"
                    && config["series"][0]["data"] == json!([1.0, 2.0, 3.0])
                    && config["xaxis"]["categories"] == json!(["Jan", "Feb", "Mar"])
                    && config["chart"]["fontFamily"] == "Inter, sans-serif"
            })
            .times(1)
            .returning(|_, _| {
                let mut handle = MockChartHandle::new();
                handle.expect_render().times(1).returning(|| Ok(()));
                Ok(Box::new(handle))
            });

        let (ctx, _doc, _rx) = context(engine, ok_source(1));
        let mut widget = Widget::new(ChartName::ProfitEvolution, ctx);
        widget.init().await;

        assert_eq!(widget.state(), WidgetState::Rendered);
        assert!(widget.has_chart());
    }

    #[tokio::test]
    async fn test_init_failure_shows_error_placeholder() {
        let mut engine = MockChartEngine::new();
        engine.expect_create().never();

        let (ctx, doc, mut rx) = context(engine, failing_source());
        let mut widget = Widget::new(ChartName::ProfitEvolution, ctx);
        widget.init().await;

        assert_eq!(widget.state(), WidgetState::Error);
        assert!(!widget.has_chart());
        let html = doc.inner_html(CONTAINER).unwrap();
        assert!(html.contains("Erro ao carregar evolução dos lucros"));

        let event = rx.recv().await.unwrap();
        assert_eq!(event.event_type, EventType::Error);
        assert_eq!(event.chart, Some(ChartName::ProfitEvolution));
    }

    #[tokio::test]
    async fn test_engine_failure_shows_error_placeholder() {
        let mut engine = MockChartEngine::new();
        engine
            .expect_create()
            .returning(|_, _| Err(EngineError("no canvas".to_string())));

        let (ctx, doc, _rx) = context(engine, ok_source(1));
        let mut widget = Widget::new(ChartName::ProfitEvolution, ctx);
        widget.init().await;

        assert_eq!(widget.state(), WidgetState::Error);
        assert!(doc.inner_html(CONTAINER).unwrap().contains("fa-exclamation-triangle"));
    }

    #[tokio::test]
    async fn test_render_failure_destroys_new_chart() {
        let mut engine = MockChartEngine::new();
        engine.expect_create().times(1).returning(|_, _| {
            let mut handle = MockChartHandle::new();
            handle
                .expect_render()
                .times(1)
                .returning(|| Err(EngineError("canvas lost".to_string())));
            handle.expect_destroy().times(1).return_const(());
            Ok(Box::new(handle))
        });

        let (ctx, doc, _rx) = context(engine, ok_source(1));
        let mut widget = Widget::new(ChartName::ProfitEvolution, ctx);
        widget.init().await;

        assert_eq!(widget.state(), WidgetState::Error);
        assert!(!widget.has_chart());
        assert!(doc.inner_html(CONTAINER).unwrap().contains("Erro ao carregar evolução dos lucros"));
    }

    #[tokio::test]
    async fn test_update_mutates_live_chart() {
        let mut engine = MockChartEngine::new();
        engine.expect_create().times(1).returning(|_, _| {
            let mut handle = MockChartHandle::new();
            handle.expect_render().returning(|| Ok(()));
            handle
                .expect_update_series()
                .withf(|series| series[1]["data"] == json!([4.0, 5.0, 6.0]))
                .times(1)
                .returning(|_| Ok(()));
            handle
                .expect_update_options()
                .withf(|partial| partial == &json!({"xaxis": {"categories": ["Jan", "Feb", "Mar"]}}))
                .times(1)
                .returning(|_| Ok(()));
            Ok(Box::new(handle))
        });

        let (ctx, _doc, _rx) = context(engine, ok_source(2));
        let mut widget = Widget::new(ChartName::ProfitEvolution, ctx);
        widget.init().await;
        assert!(widget.update().await.is_ok());
        assert_eq!(widget.state(), WidgetState::Rendered);
    }

    #[tokio::test]
    async fn test_update_failure_keeps_rendered_state() {
        let mut source = MockDataSource::new();
        let mut calls = 0;
        source.expect_fetch().times(2).returning(move |_| {
            calls += 1;
            if calls == 1 {
                Ok(sample())
            } else {
                Err(FetchError::Http {
                    status: 502,
                    message: "bad gateway".to_string(),
                })
            }
        });

        let (ctx, _doc, _rx) = context(rendering_engine(), source);
        let mut widget = Widget::new(ChartName::ProfitEvolution, ctx);
        widget.init().await;

        assert!(widget.update().await.is_err());
        assert_eq!(widget.state(), WidgetState::Rendered);
        assert!(widget.has_chart());
        widget.destroy();
    }

    #[tokio::test]
    async fn test_update_after_destroy_is_noop() {
        let (ctx, _doc, _rx) = context(rendering_engine(), ok_source(1));
        let mut widget = Widget::new(ChartName::ProfitEvolution, ctx);
        widget.init().await;

        widget.destroy();
        widget.destroy();
        assert_eq!(widget.state(), WidgetState::Destroyed);
        assert!(widget.update().await.is_ok());
        widget.resize();
        assert!(!widget.has_chart());
    }

    #[tokio::test]
    async fn test_init_after_destroy_does_nothing() {
        let mut engine = MockChartEngine::new();
        engine.expect_create().never();
        let mut source = MockDataSource::new();
        source.expect_fetch().never();

        let (ctx, _doc, _rx) = context(engine, source);
        let mut widget = Widget::new(ChartName::ProfitEvolution, ctx);
        widget.destroy();
        widget.init().await;
        assert_eq!(widget.state(), WidgetState::Destroyed);
    }

    #[tokio::test]
    async fn test_custom_target_uses_given_container_and_endpoint() {
        let mut engine = MockChartEngine::new();
        engine
            .expect_create()
            .withf(|container, _| container.to_string() == "dashboard-profit")
            .times(1)
            .returning(|_, _| {
                let mut handle = MockChartHandle::new();
                handle.expect_render().returning(|| Ok(()));
                Ok(Box::new(handle))
            });
        let mut source = MockDataSource::new();
        source
            .expect_fetch()
            .withf(|endpoint| endpoint.to_string() == "/api/profit/")
            .times(1)
            .returning(|_| Ok(sample()));

        let (ctx, _doc, _rx) = context(engine, source);
        let mut widget = Widget::with_target(
            ChartName::ProfitEvolution,
            "dashboard-profit",
            "/api/profit/",
            ctx,
        );
        widget.init().await;
        assert_eq!(widget.state(), WidgetState::Rendered);
    }

    #[tokio::test]
    async fn test_resize_reaches_live_chart() {
        let mut engine = MockChartEngine::new();
        engine.expect_create().returning(|_, _| {
            let mut handle = MockChartHandle::new();
            handle.expect_render().returning(|| Ok(()));
            handle.expect_resize().times(2).return_const(());
            Ok(Box::new(handle))
        });

        let (ctx, _doc, _rx) = context(engine, ok_source(1));
        let mut widget = Widget::new(ChartName::ProfitEvolution, ctx);
        widget.resize();
        widget.init().await;
        widget.resize();
        widget.resize();
    }
}
