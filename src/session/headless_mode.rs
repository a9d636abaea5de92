//! Headless mode execution

use super::{
    SessionData,
    messages::{
        print_page_written, print_session_exit_success, print_session_shutdown,
        print_session_starting,
    },
    setup::PageOutput,
};
use crate::chart::placeholder::MemoryDocument;
use crate::events::Event;
use log::{debug, error, warn};
use std::error::Error;
use std::fs;
use tokio::sync::mpsc;
use tokio::time::{MissedTickBehavior, interval};

cfg_if::cfg_if! {
    if #[cfg(unix)] {
        use tokio::signal::unix::{Signal, SignalKind, signal};

        /// Terminal resizes, the headless stand-in for window resize events.
        struct ResizeListener {
            inner: Signal,
        }

        impl ResizeListener {
            fn new() -> std::io::Result<Self> {
                Ok(Self {
                    inner: signal(SignalKind::window_change())?,
                })
            }

            async fn recv(&mut self) -> Option<()> {
                self.inner.recv().await
            }
        }
    } else {
        struct ResizeListener;

        impl ResizeListener {
            fn new() -> std::io::Result<Self> {
                Ok(Self)
            }

            async fn recv(&mut self) -> Option<()> {
                std::future::pending().await
            }
        }
    }
}

/// Runs the dashboard without a browser
///
/// This function handles:
/// 1. Initial render of every chart
/// 2. Periodic refresh and terminal-resize fan-out
/// 3. Ctrl+C shutdown and chart teardown
///
/// Refreshes never overlap: the next tick is only awaited once the previous
/// refresh has finished, and ticks missed in the meantime are skipped.
pub async fn run_headless_mode(mut session: SessionData) -> Result<(), Box<dyn Error>> {
    print_session_starting(&session.base_url, session.document.container_count());

    session.coordinator.init().await;
    if session.coordinator.is_empty() {
        warn!("No charts were initialized");
    } else {
        debug!("{} chart(s) registered", session.coordinator.len());
    }
    drain_events(&mut session.event_receiver);
    if let Err(e) = write_page(&session.document, &session.output) {
        session.coordinator.destroy_all();
        return Err(e);
    }

    if session.once {
        session.coordinator.destroy_all();
        drain_events(&mut session.event_receiver);
        print_session_exit_success();
        return Ok(());
    }

    let mut ticker = interval(session.refresh_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // The first tick completes immediately; the initial render already happened.
    ticker.tick().await;

    let mut resize = ResizeListener::new()?;

    // Event loop: refresh on every tick until shutdown
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                session.coordinator.update_all().await;
                drain_events(&mut session.event_receiver);
                refresh_page(&session.document, &session.output);
            }
            Some(()) = resize.recv() => {
                debug!("Terminal resized, resizing charts");
                session.coordinator.resize_all();
            }
            Some(event) = session.event_receiver.recv() => {
                print_event(&event);
            }
            _ = tokio::signal::ctrl_c() => {
                break;
            }
        }
    }

    print_session_shutdown();
    session.coordinator.destroy_all();
    drain_events(&mut session.event_receiver);
    print_session_exit_success();

    Ok(())
}

fn print_event(event: &Event) {
    if event.should_display() {
        eprintln!("{}", event);
    }
}

/// Print whatever is queued without waiting for more.
fn drain_events(receiver: &mut mpsc::Receiver<Event>) {
    while let Ok(event) = receiver.try_recv() {
        print_event(&event);
    }
}

/// Write the page after a refresh. Failures are logged and retried next tick.
fn refresh_page(document: &MemoryDocument, output: &PageOutput) -> bool {
    match write_page(document, output) {
        Ok(()) => true,
        Err(e) => {
            error!("Failed to write dashboard page: {}", e);
            false
        }
    }
}

fn write_page(document: &MemoryDocument, output: &PageOutput) -> Result<(), Box<dyn Error>> {
    match output {
        PageOutput::File(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            fs::write(path, document.to_html())?;
            print_page_written(path);
        }
        PageOutput::Stdout => print!("{}", document.to_html()),
        PageOutput::None => {}
    }
    Ok(())
}
