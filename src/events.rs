//! Event System
//!
//! Dashboard activity reported by widgets and the coordinator

use crate::chart::ChartName;
use crate::logging::{LogLevel, should_log_with_env};
use chrono::Local;
use std::fmt::Display;
use tokio::sync::mpsc;

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    Success,
    Error,
    Refresh,
    Waiting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Chart the event is about, `None` for dashboard-wide events.
    pub chart: Option<ChartName>,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
}

impl Event {
    fn new(
        chart: Option<ChartName>,
        msg: String,
        event_type: EventType,
        log_level: LogLevel,
    ) -> Self {
        Self {
            chart,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type,
            log_level,
        }
    }

    pub fn chart_with_level(
        chart: ChartName,
        msg: String,
        event_type: EventType,
        log_level: LogLevel,
    ) -> Self {
        Self::new(Some(chart), msg, event_type, log_level)
    }

    pub fn dashboard_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(None, msg, event_type, log_level)
    }

    pub fn should_display(&self) -> bool {
        // Always show success events
        if self.event_type == EventType::Success {
            return true;
        }
        should_log_with_env(self.log_level)
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.chart {
            Some(chart) => write!(
                f,
                "{} [{}] {}: {}",
                self.event_type, self.timestamp, chart, self.msg
            ),
            None => write!(f, "{} [{}] {}", self.event_type, self.timestamp, self.msg),
        }
    }
}

/// Cloneable handle for reporting events to the session.
#[derive(Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Send a generic event
    pub async fn send_event(&self, event: Event) {
        let _ = self.sender.send(event).await;
    }

    pub async fn send_chart_event(
        &self,
        chart: ChartName,
        message: String,
        event_type: EventType,
        log_level: LogLevel,
    ) {
        self.send_event(Event::chart_with_level(chart, message, event_type, log_level))
            .await;
    }

    pub async fn send_dashboard_event(
        &self,
        message: String,
        event_type: EventType,
        log_level: LogLevel,
    ) {
        self.send_event(Event::dashboard_with_level(message, event_type, log_level))
            .await;
    }
}
