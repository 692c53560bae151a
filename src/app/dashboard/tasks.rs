use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::app::session::Session;
use crate::system::shutdown::ShutdownSender;
use crate::timeline::{PLAY_INTERVAL, PlaybackToken};

use super::events::{AppEvent, SelectionLoaded};

/// Timer task feeding `Tick` events for one play session. Starting a new
/// session aborts the previous timer, so at most one is ever running.
#[derive(Debug, Default)]
pub(super) struct PlaybackDriver {
    handle: Option<JoinHandle<()>>,
}

impl PlaybackDriver {
    pub(super) fn start(&mut self, token: PlaybackToken, events: mpsc::Sender<AppEvent>) {
        self.stop();
        self.handle = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(PLAY_INTERVAL);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval.tick().await;
            loop {
                interval.tick().await;
                if events.send(AppEvent::Tick(token)).await.is_err() {
                    break;
                }
            }
        }));
    }

    pub(super) fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub(super) const fn is_running(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for PlaybackDriver {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Sends `RefreshDue` every `interval` until shutdown.
pub(super) fn spawn_refresh_timer(
    shutdown_tx: &ShutdownSender,
    events: mpsc::Sender<AppEvent>,
    interval: Duration,
) -> JoinHandle<()> {
    let mut shutdown_rx = shutdown_tx.subscribe();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        ticker.tick().await;
        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => break,
                _ = ticker.tick() => {
                    if events.send(AppEvent::RefreshDue).await.is_err() {
                        break;
                    }
                }
            }
        }
    })
}

pub(super) fn spawn_fetch_devices(session: &Session, events: mpsc::Sender<AppEvent>) {
    let session = session.clone();
    tokio::spawn(async move {
        let result = session.devices().await;
        if events.send(AppEvent::DevicesLoaded(result)).await.is_err() {
            debug!("Dashboard closed before the device list arrived");
        }
    });
}

pub(super) fn spawn_load_selection(
    session: &Session,
    device_id: String,
    events: mpsc::Sender<AppEvent>,
) {
    let session = session.clone();
    tokio::spawn(async move {
        let (details, history) = session.selection(&device_id).await;
        let loaded = SelectionLoaded {
            device_id,
            details,
            history,
        };
        if events
            .send(AppEvent::SelectionLoaded(Box::new(loaded)))
            .await
            .is_err()
        {
            debug!("Dashboard closed before the selection arrived");
        }
    });
}
