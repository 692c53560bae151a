use crate::domain::{Device, DeviceDetails, LocationPoint};
use crate::timeline::{CursorHandle, Tick, TimeWindowPolicy, WindowPreset};

/// Everything the dashboard frame needs, captured once per state change.
#[derive(Debug, Clone, Default)]
pub struct UiData {
    pub no_color: bool,
    pub api_url: String,
    pub devices: Vec<Device>,
    pub selected_id: Option<String>,
    pub strip_cursor: usize,
    pub details: Option<DeviceDetails>,
    pub details_loading: bool,
    pub history_loading: bool,
    pub last_refresh_ms: Option<i64>,
    pub status: StatusLine,
    pub trail: Vec<LocationPoint>,
    pub timeline: TimelineView,
}

impl UiData {
    #[must_use]
    pub fn selected_device(&self) -> Option<&Device> {
        let id = self.selected_id.as_deref()?;
        self.devices.iter().find(|device| device.device_id == id)
    }

    /// The device panel is shown while a device is selected.
    #[must_use]
    pub const fn shows_panel(&self) -> bool {
        self.selected_id.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusLevel {
    #[default]
    Info,
    Error,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusLine {
    pub level: StatusLevel,
    pub message: String,
}

impl StatusLine {
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Info,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Error,
            message: message.into(),
        }
    }
}

/// Render-side copy of the timeline controller state.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineView {
    pub policy: TimeWindowPolicy,
    pub preset: WindowPreset,
    pub custom_hours: u32,
    pub custom_draft: Option<String>,
    pub in_pct: f64,
    pub out_pct: f64,
    pub head_pct: f64,
    pub in_ts: f64,
    pub head_ts: f64,
    pub out_ts: f64,
    pub focus: CursorHandle,
    pub dragging: Option<CursorHandle>,
    pub playing: bool,
    pub ticks: Vec<Tick>,
    pub dots: Vec<f64>,
    pub windowed_count: usize,
    pub total_count: usize,
    pub visible_count: usize,
}

impl Default for TimelineView {
    fn default() -> Self {
        let policy = TimeWindowPolicy::default();
        Self {
            policy,
            preset: policy.preset(),
            custom_hours: 0,
            custom_draft: None,
            in_pct: 0.0,
            out_pct: 100.0,
            head_pct: 100.0,
            in_ts: 0.0,
            head_ts: 0.0,
            out_ts: 0.0,
            focus: CursorHandle::Head,
            dragging: None,
            playing: false,
            ticks: Vec::new(),
            dots: Vec::new(),
            windowed_count: 0,
            total_count: 0,
            visible_count: 0,
        }
    }
}

impl TimelineView {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.windowed_count == 0
    }
}
