//! Dashboard coordination
//!
//! The [`Coordinator`] owns every chart widget on the page. It waits for the
//! charting engine, initializes the configured charts one after the other and
//! fans refresh, resize and teardown out to all of them. None of its
//! operations fail: problems are logged and reported as events.

pub mod readiness;
pub mod settle;

pub use readiness::{EngineReadiness, engine_readiness};
pub use settle::{Settled, settle_all};

use crate::chart::error::DashboardError;
use crate::chart::{ChartName, Widget, WidgetContext, WidgetState};
use crate::consts::dashboard_consts::engine_wait;
use crate::events::EventType;
use crate::logging::LogLevel;
use log::{debug, error, info, warn};
use std::collections::BTreeMap;
use std::time::Duration;

pub struct Coordinator {
    ctx: WidgetContext,
    readiness: EngineReadiness,
    charts: Vec<ChartName>,
    poll_interval: Duration,
    max_attempts: u32,
    widgets: BTreeMap<ChartName, Widget>,
}

impl Coordinator {
    pub fn new(ctx: WidgetContext, readiness: EngineReadiness, charts: Vec<ChartName>) -> Self {
        Self {
            ctx,
            readiness,
            charts,
            poll_interval: engine_wait::poll_interval(),
            max_attempts: engine_wait::MAX_ATTEMPTS,
            widgets: BTreeMap::new(),
        }
    }

    pub fn with_engine_wait(mut self, poll_interval: Duration, max_attempts: u32) -> Self {
        self.poll_interval = poll_interval;
        self.max_attempts = max_attempts;
        self
    }

    #[cfg(test)]
    pub fn widget(&self, name: ChartName) -> Option<&Widget> {
        self.widgets.get(&name)
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Wait for the engine, then build and initialize every configured chart.
    pub async fn init(&mut self) {
        if !self.readiness.is_ready() {
            self.ctx
                .events
                .send_dashboard_event(
                    "Waiting for chart engine...".to_string(),
                    EventType::Waiting,
                    LogLevel::Info,
                )
                .await;
        }

        if let Err(e) = self
            .readiness
            .wait(self.poll_interval, self.max_attempts)
            .await
        {
            self.report_init_failure(e).await;
            return;
        }

        for name in self.charts.clone() {
            if self.widgets.contains_key(&name) {
                continue;
            }
            if !self.ctx.document.contains(name.container_id()) {
                debug!("No container '{}', skipping {}", name.container_id(), name);
                continue;
            }
            let mut widget = Widget::new(name, self.ctx.clone());
            widget.init().await;
            self.widgets.insert(name, widget);
        }

        let rendered = self
            .widgets
            .values()
            .filter(|w| w.state() == WidgetState::Rendered)
            .count();
        info!(
            "Dashboard charts initialized ({} of {} rendered)",
            rendered,
            self.widgets.len()
        );
        self.ctx
            .events
            .send_dashboard_event(
                format!("Dashboard ready with {} chart(s)", self.widgets.len()),
                EventType::Success,
                LogLevel::Info,
            )
            .await;
    }

    async fn report_init_failure(&self, e: DashboardError) {
        error!("Error initializing dashboard charts: {}", e);
        self.ctx
            .events
            .send_dashboard_event(
                format!("Dashboard not initialized: {}", e),
                EventType::Error,
                LogLevel::Error,
            )
            .await;
    }

    /// Refresh every chart concurrently and report each outcome.
    pub async fn update_all(&mut self) -> Vec<(ChartName, Settled<(), DashboardError>)> {
        let names: Vec<ChartName> = self.widgets.keys().copied().collect();
        let outcomes = settle_all(self.widgets.values_mut().map(|widget| widget.update())).await;

        let failed = outcomes.iter().filter(|o| o.is_rejected()).count();
        if failed > 0 {
            warn!("{} of {} chart updates failed", failed, outcomes.len());
        }

        names.into_iter().zip(outcomes).collect()
    }

    pub fn resize_all(&mut self) {
        for widget in self.widgets.values_mut() {
            widget.resize();
        }
    }

    pub fn destroy_all(&mut self) {
        for widget in self.widgets.values_mut() {
            widget.destroy();
        }
        self.widgets.clear();
    }
}
