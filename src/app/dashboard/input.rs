use std::time::Duration;

use crossterm::event::{poll, read};
use tokio::sync::{broadcast, mpsc};

use crate::system::shutdown::ShutdownSender;

use super::events::AppEvent;

/// Terminal polling interval; bounds how late a shutdown is noticed.
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Reads terminal events on a blocking thread and forwards them to the
/// dashboard loop. Stops on shutdown or once the loop has gone away.
pub(super) fn spawn_input_reader(
    shutdown_tx: &ShutdownSender,
    events: mpsc::Sender<AppEvent>,
) -> tokio::task::JoinHandle<()> {
    let mut shutdown_rx = shutdown_tx.subscribe();
    tokio::task::spawn_blocking(move || {
        loop {
            match shutdown_rx.try_recv() {
                Ok(()) | Err(broadcast::error::TryRecvError::Closed) => break,
                Err(
                    broadcast::error::TryRecvError::Empty | broadcast::error::TryRecvError::Lagged(_),
                ) => {}
            }

            let has_event = match poll(INPUT_POLL_INTERVAL) {
                Ok(has_event) => has_event,
                Err(err) => {
                    tracing::warn!("Terminal poll failed: {}", err);
                    break;
                }
            };
            if !has_event {
                continue;
            }
            let event = match read() {
                Ok(event) => event,
                Err(err) => {
                    tracing::warn!("Terminal read failed: {}", err);
                    break;
                }
            };
            if events.blocking_send(AppEvent::Input(event)).is_err() {
                break;
            }
        }
    })
}
