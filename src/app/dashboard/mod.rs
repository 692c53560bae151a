mod events;
mod input;
mod state;
mod tasks;


use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::args::LookArgs;
use crate::domain::LocationPoint;
use crate::error::{AppError, AppResult, AuthError};
use crate::system::shutdown::shutdown_channel;
use crate::system::shutdown_handlers::setup_signal_shutdown_handler;
use crate::ui::model::UiData;
use crate::ui::render::setup_render_ui;

use super::session::Session;
use events::{AppEvent, Effect};
use state::{DashboardOptions, DashboardState};
use tasks::{PlaybackDriver, spawn_fetch_devices, spawn_load_selection, spawn_refresh_timer};

/// Pending dashboard events; input and timers wait when it is full.
const EVENT_CHANNEL_CAPACITY: usize = 256;
/// How long background tasks get to wind down after the loop exits.
const TASK_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(2);
/// Fallback viewport when the terminal size cannot be read.
const DEFAULT_VIEWPORT: (u16, u16) = (80, 24);

enum Flow {
    Continue,
    Quit,
    Unauthorized,
}

/// Runs the interactive dashboard until the user quits, a shutdown signal
/// arrives, or the API rejects the session.
///
/// # Errors
///
/// Returns an auth error when the API answers 401 during the session.
pub(crate) async fn run_dashboard(args: &LookArgs, session: &Session) -> AppResult<()> {
    let (shutdown_tx, _) = shutdown_channel();
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);
    let (events_tx, mut events_rx) = mpsc::channel::<AppEvent>(EVENT_CHANNEL_CAPACITY);

    let (trail_tx, trail_rx) = watch::channel::<Vec<LocationPoint>>(Vec::new());
    let sink = move |visible: &[LocationPoint]| {
        trail_tx.send_replace(visible.to_vec());
    };
    let mut state = DashboardState::new(DashboardOptions::from_args(args), sink);
    let (width, height) = crossterm::terminal::size().unwrap_or(DEFAULT_VIEWPORT);
    state.resize(width, height);

    let (ui_tx, _) = watch::channel(UiData::default());
    ui_tx.send_replace(state.snapshot(trail_rx.borrow().clone()));
    let render_handle = setup_render_ui(&shutdown_tx, &ui_tx);
    let input_handle = input::spawn_input_reader(&shutdown_tx, events_tx.clone());
    let refresh_handle = spawn_refresh_timer(&shutdown_tx, events_tx.clone(), args.refresh_interval);
    info!("Dashboard started against {}", args.api_url);

    let mut driver = PlaybackDriver::default();
    let mut shutdown_rx = shutdown_tx.subscribe();
    let mut pending = vec![Effect::FetchDevices];
    let flow = loop {
        match run_effects(pending, session, &events_tx, &mut driver) {
            Flow::Continue => {}
            stop @ (Flow::Quit | Flow::Unauthorized) => break stop,
        }
        ui_tx.send_replace(state.snapshot(trail_rx.borrow().clone()));

        let event = tokio::select! {
            _ = shutdown_rx.recv() => break Flow::Quit,
            event = events_rx.recv() => event,
        };
        let Some(event) = event else {
            break Flow::Quit;
        };
        pending = state.apply(event);
    };

    driver.stop();
    state.teardown();
    drop(events_rx);
    drop(shutdown_tx.send(()));
    for handle in [render_handle, input_handle, refresh_handle, signal_handle] {
        if tokio::time::timeout(TASK_SHUTDOWN_TIMEOUT, handle).await.is_err() {
            warn!("Timed out waiting for a dashboard task to stop");
        }
    }

    match flow {
        Flow::Continue | Flow::Quit => {
            info!("Dashboard closed");
            Ok(())
        }
        Flow::Unauthorized => Err(AppError::auth(AuthError::Unauthorized)),
    }
}

fn run_effects(
    effects: Vec<Effect>,
    session: &Session,
    events_tx: &mpsc::Sender<AppEvent>,
    driver: &mut PlaybackDriver,
) -> Flow {
    for effect in effects {
        match effect {
            Effect::FetchDevices => spawn_fetch_devices(session, events_tx.clone()),
            Effect::LoadSelection(device_id) => {
                spawn_load_selection(session, device_id, events_tx.clone());
            }
            Effect::StartClock(token) => driver.start(token, events_tx.clone()),
            Effect::StopClock => {
                if driver.is_running() {
                    debug!("Playback clock stopped");
                }
                driver.stop();
            }
            Effect::Quit => return Flow::Quit,
            Effect::Unauthorized => {
                warn!("Session rejected by the API");
                return Flow::Unauthorized;
            }
        }
    }
    Flow::Continue
}
