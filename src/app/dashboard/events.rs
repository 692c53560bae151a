use crossterm::event::Event;

use crate::domain::{Device, DeviceDetails, LocationPoint};
use crate::error::AppResult;
use crate::timeline::PlaybackToken;

/// Results of one device selection; details and history fail independently.
pub(crate) struct SelectionLoaded {
    pub(crate) device_id: String,
    pub(crate) details: AppResult<DeviceDetails>,
    pub(crate) history: AppResult<Vec<LocationPoint>>,
}

/// Everything the dashboard loop reacts to.
pub(crate) enum AppEvent {
    Input(Event),
    DevicesLoaded(AppResult<Vec<Device>>),
    SelectionLoaded(Box<SelectionLoaded>),
    Tick(PlaybackToken),
    RefreshDue,
}

/// Side effects requested by the state after handling an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Effect {
    FetchDevices,
    LoadSelection(String),
    StartClock(PlaybackToken),
    StopClock,
    Quit,
    Unauthorized,
}
