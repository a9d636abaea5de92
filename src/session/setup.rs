//! Session setup and initialization

use crate::chart::WidgetContext;
use crate::chart::data::HttpDataSource;
use crate::chart::options::OptionComposer;
use crate::chart::placeholder::MemoryDocument;
use crate::chart::snapshot::SnapshotEngine;
use crate::config::DashboardConfig;
use crate::consts::dashboard_consts::{EVENT_QUEUE_SIZE, PAGE_TITLE, network};
use crate::dashboard::{Coordinator, engine_readiness};
use crate::events::{Event, EventSender};
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Where the rendered page goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutput {
    /// Overwrite this file after every render.
    File(PathBuf),
    /// Print the page once to stdout.
    Stdout,
    /// Keep the page in memory only.
    None,
}

/// Everything the headless loop needs
pub struct SessionData {
    pub coordinator: Coordinator,
    /// Page the charts are rendered into
    pub document: Arc<MemoryDocument>,
    /// Event receiver for dashboard events
    pub event_receiver: mpsc::Receiver<Event>,
    pub output: PageOutput,
    pub refresh_interval: Duration,
    /// Render once and exit instead of refreshing
    pub once: bool,
    pub base_url: String,
}

/// Sets up a dashboard session
///
/// 1. Creates the page with one container per configured chart
/// 2. Creates the snapshot engine and marks it ready
/// 3. Creates the HTTP data source
/// 4. Wires everything into a coordinator
///
/// # Returns
/// * `Ok(SessionData)` - Successfully set up session
/// * `Err` - The HTTP client could not be built
pub fn setup_session(
    config: &DashboardConfig,
    output: PageOutput,
    once: bool,
) -> Result<SessionData, Box<dyn Error>> {
    let document = Arc::new(MemoryDocument::with_containers(
        PAGE_TITLE,
        config.charts.iter().map(|chart| chart.container_id()),
    ));

    // The snapshot engine lives in-process, so it is ready as soon as it exists.
    let (ready_signal, readiness) = engine_readiness();
    let engine = Arc::new(SnapshotEngine::new(
        document.clone(),
        config.currency.clone(),
    ));
    ready_signal.mark_ready();

    let source = Arc::new(HttpDataSource::new(
        config.base_url.clone(),
        network::request_timeout(),
    )?);

    let (event_sender, event_receiver) = mpsc::channel::<Event>(EVENT_QUEUE_SIZE);
    let ctx = WidgetContext {
        engine,
        source,
        document: document.clone(),
        composer: Arc::new(OptionComposer::default()),
        events: EventSender::new(event_sender),
    };

    let coordinator = Coordinator::new(ctx, readiness, config.charts.clone())
        .with_engine_wait(config.engine_poll_interval(), config.engine_max_attempts);

    Ok(SessionData {
        coordinator,
        document,
        event_receiver,
        output,
        refresh_interval: config.refresh_interval(),
        once,
        base_url: config.base_url.clone(),
    })
}
