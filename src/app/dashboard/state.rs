use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use tracing::{debug, info, warn};

use crate::args::LookArgs;
use crate::domain::{Device, DeviceDetails, LocationPoint};
use crate::error::AppError;
use crate::timeline::{
    CursorHandle, CustomHours, PointerEvent, StepDirection, TimeWindowPolicy, TimelineController,
    VisibleSink, WindowPreset,
};
use crate::ui::model::{StatusLine, TimelineView, UiData};
use crate::ui::render::layout::{
    contains, dashboard_layout, strip_hit, timeline_layout, track_geometry,
};

use super::events::{AppEvent, Effect, SelectionLoaded};

/// Pointer slack, in terminal columns, when grabbing a handle.
const HIT_TOLERANCE_COLS: f64 = 1.0;
/// Longest custom-hours draft; enough digits for the 8760 ceiling.
const CUSTOM_DRAFT_MAX_LEN: usize = 5;

#[derive(Debug, Clone)]
pub(crate) struct DashboardOptions {
    pub(crate) api_url: String,
    pub(crate) no_color: bool,
    pub(crate) policy: TimeWindowPolicy,
    pub(crate) custom_hours: CustomHours,
}

impl DashboardOptions {
    pub(crate) fn from_args(args: &LookArgs) -> Self {
        Self {
            api_url: args.api_url.clone(),
            no_color: args.no_color,
            policy: args.window.policy(args.custom_hours),
            custom_hours: args.custom_hours,
        }
    }
}

/// Dashboard state. Events go in through [`DashboardState::apply`], the
/// requested side effects come out; nothing here touches the network or
/// the terminal.
#[derive(Debug)]
pub(crate) struct DashboardState {
    api_url: String,
    no_color: bool,
    devices: Vec<Device>,
    strip_cursor: usize,
    selected_id: Option<String>,
    details: Option<DeviceDetails>,
    details_loading: bool,
    history_loading: bool,
    last_refresh_ms: Option<i64>,
    status: StatusLine,
    focus: CursorHandle,
    custom_draft: Option<String>,
    viewport: Rect,
    timeline: TimelineController,
}

impl DashboardState {
    pub(crate) fn new<S>(options: DashboardOptions, sink: S) -> Self
    where
        S: VisibleSink + 'static,
    {
        let mut timeline = TimelineController::new(options.policy, options.custom_hours);
        timeline.set_sink(sink);
        Self {
            api_url: options.api_url,
            no_color: options.no_color,
            devices: Vec::new(),
            strip_cursor: 0,
            selected_id: None,
            details: None,
            details_loading: false,
            history_loading: false,
            last_refresh_ms: None,
            status: StatusLine::default(),
            focus: CursorHandle::Head,
            custom_draft: None,
            viewport: Rect::default(),
            timeline,
        }
    }

    pub(crate) const fn resize(&mut self, width: u16, height: u16) {
        self.viewport = Rect {
            x: 0,
            y: 0,
            width,
            height,
        };
    }

    #[cfg(test)]
    pub(crate) const fn timeline(&self) -> &TimelineController {
        &self.timeline
    }

    pub(crate) fn teardown(&mut self) {
        self.timeline.teardown();
    }

    /// Handles one event. A `StopClock` is added whenever playback went from
    /// playing to idle, whatever the cause.
    pub(crate) fn apply(&mut self, event: AppEvent) -> Vec<Effect> {
        let was_playing = self.timeline.is_playing();
        let mut effects = match event {
            AppEvent::Input(Event::Key(key)) => self.on_key(key),
            AppEvent::Input(Event::Mouse(mouse)) => self.on_mouse(mouse),
            AppEvent::Input(Event::Resize(width, height)) => {
                self.resize(width, height);
                Vec::new()
            }
            AppEvent::Input(Event::FocusGained | Event::FocusLost | Event::Paste(_)) => Vec::new(),
            AppEvent::DevicesLoaded(result) => self.on_devices(result),
            AppEvent::SelectionLoaded(loaded) => self.on_selection(*loaded),
            AppEvent::Tick(token) => {
                self.timeline.tick(token);
                Vec::new()
            }
            AppEvent::RefreshDue => vec![Effect::FetchDevices],
        };
        if was_playing && !self.timeline.is_playing() && !effects.contains(&Effect::StopClock) {
            effects.push(Effect::StopClock);
        }
        effects
    }

    fn on_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        if key.kind != KeyEventKind::Press {
            return Vec::new();
        }
        if self.custom_draft.is_some() {
            self.on_custom_key(key);
            return Vec::new();
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if matches!(key.code, KeyCode::Char('q')) || (ctrl && matches!(key.code, KeyCode::Char('c')))
        {
            return vec![Effect::Quit];
        }
        if matches!(key.code, KeyCode::Char(' ')) {
            return self.timeline.toggle_play().map(Effect::StartClock).into_iter().collect();
        }
        if matches!(key.code, KeyCode::Left) {
            self.timeline.step(self.focus, StepDirection::Backward);
        } else if matches!(key.code, KeyCode::Right) {
            self.timeline.step(self.focus, StepDirection::Forward);
        } else if matches!(key.code, KeyCode::Char('[')) {
            self.focus = CursorHandle::In;
        } else if matches!(key.code, KeyCode::Char(']')) {
            self.focus = CursorHandle::Out;
        } else if matches!(key.code, KeyCode::Char('h')) {
            self.focus = CursorHandle::Head;
        } else if matches!(key.code, KeyCode::Char('w')) {
            let next = self.timeline.policy().preset().next();
            self.timeline.select_preset(next);
        } else if matches!(key.code, KeyCode::Char('c')) {
            self.custom_draft = Some(self.timeline.custom_hours().get().to_string());
        } else if matches!(key.code, KeyCode::Char('r')) {
            return vec![Effect::FetchDevices];
        } else if matches!(key.code, KeyCode::Tab) {
            self.move_strip_cursor(true);
        } else if matches!(key.code, KeyCode::BackTab) {
            self.move_strip_cursor(false);
        } else if matches!(key.code, KeyCode::Enter) {
            return self.select_at_cursor();
        } else if matches!(key.code, KeyCode::Esc) {
            self.deselect();
        }
        Vec::new()
    }

    fn on_custom_key(&mut self, key: KeyEvent) {
        let Some(draft) = self.custom_draft.as_mut() else {
            return;
        };
        if let KeyCode::Char(ch) = key.code
            && ch.is_ascii_digit()
        {
            if draft.len() < CUSTOM_DRAFT_MAX_LEN {
                draft.push(ch);
            }
        } else if matches!(key.code, KeyCode::Backspace) {
            draft.pop();
        } else if matches!(key.code, KeyCode::Esc) {
            self.custom_draft = None;
        } else if matches!(key.code, KeyCode::Enter) {
            let committed = self.custom_draft.take().unwrap_or_default();
            self.commit_custom_hours(&committed);
        }
    }

    /// Stores the clamped hours and switches to the custom window. An empty
    /// draft keeps the current value.
    fn commit_custom_hours(&mut self, draft: &str) {
        let Ok(value) = draft.parse::<i64>() else {
            debug!("Ignoring empty custom hours");
            return;
        };
        let hours = CustomHours::clamped(value);
        info!("Custom window set to {}h", hours.get());
        self.timeline.set_custom_hours(hours);
        self.timeline.select_preset(WindowPreset::Custom);
    }

    fn on_mouse(&mut self, mouse: MouseEvent) -> Vec<Effect> {
        let layout = dashboard_layout(self.viewport, self.selected_id.is_some());
        let track = timeline_layout(layout.timeline).track;
        let geometry = track_geometry(track);
        let x = f64::from(mouse.column);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if contains(track, mouse.column, mouse.row) {
                    self.timeline
                        .handle_pointer(&geometry, PointerEvent::Down { x }, HIT_TOLERANCE_COLS);
                    if let Some(handle) = self.timeline.drag_handle() {
                        self.focus = handle;
                    }
                    return Vec::new();
                }
                let hit = strip_hit(
                    layout.strip,
                    self.devices.len(),
                    self.strip_cursor,
                    mouse.column,
                    mouse.row,
                );
                if let Some(index) = hit {
                    self.strip_cursor = index;
                    return self.select_at_cursor();
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.timeline
                    .handle_pointer(&geometry, PointerEvent::Move { x }, HIT_TOLERANCE_COLS);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.timeline
                    .handle_pointer(&geometry, PointerEvent::Up, HIT_TOLERANCE_COLS);
            }
            MouseEventKind::Down(MouseButton::Right | MouseButton::Middle)
            | MouseEventKind::Up(MouseButton::Right | MouseButton::Middle)
            | MouseEventKind::Drag(MouseButton::Right | MouseButton::Middle)
            | MouseEventKind::Moved
            | MouseEventKind::ScrollDown
            | MouseEventKind::ScrollUp
            | MouseEventKind::ScrollLeft
            | MouseEventKind::ScrollRight => {}
        }
        Vec::new()
    }

    fn move_strip_cursor(&mut self, forward: bool) {
        let count = self.devices.len();
        if count == 0 {
            return;
        }
        self.strip_cursor = if forward {
            self.strip_cursor.saturating_add(1).checked_rem(count).unwrap_or(0)
        } else if self.strip_cursor == 0 {
            count.saturating_sub(1)
        } else {
            self.strip_cursor.saturating_sub(1)
        };
    }

    fn select_at_cursor(&mut self) -> Vec<Effect> {
        let Some(device) = self.devices.get(self.strip_cursor) else {
            return Vec::new();
        };
        let device_id = device.device_id.clone();
        info!("Selected device {}", device_id);
        self.selected_id = Some(device_id.clone());
        self.details = None;
        self.details_loading = true;
        self.history_loading = true;
        self.timeline.set_points(Vec::new());
        vec![Effect::LoadSelection(device_id)]
    }

    fn deselect(&mut self) {
        if self.selected_id.take().is_some() {
            debug!("Device panel closed");
        }
        self.details = None;
        self.details_loading = false;
        self.history_loading = false;
        self.timeline.set_points(Vec::new());
    }

    fn on_devices(&mut self, result: Result<Vec<Device>, AppError>) -> Vec<Effect> {
        let devices = match result {
            Ok(devices) => devices,
            Err(err) => return self.report("Failed to refresh devices", &err),
        };
        debug!("Device list refreshed ({} devices)", devices.len());
        self.strip_cursor = self.strip_cursor.min(devices.len().saturating_sub(1));
        self.devices = devices;
        self.last_refresh_ms = Some(chrono::Utc::now().timestamp_millis());
        self.status = StatusLine::default();
        Vec::new()
    }

    fn on_selection(&mut self, loaded: SelectionLoaded) -> Vec<Effect> {
        if self.selected_id.as_deref() != Some(loaded.device_id.as_str()) {
            debug!("Ignoring results for deselected device {}", loaded.device_id);
            return Vec::new();
        }
        self.details_loading = false;
        self.history_loading = false;
        let mut effects = Vec::new();
        if let Err(err) = &loaded.details {
            effects.extend(self.report("Failed to load device details", err));
        }
        self.details = loaded.details.ok();
        if let Err(err) = &loaded.history {
            effects.extend(self.report("Failed to load location history", err));
        }
        if let Ok(points) = loaded.history {
            self.timeline.set_points(points);
        }
        effects
    }

    fn report(&mut self, context: &str, err: &AppError) -> Vec<Effect> {
        if err.is_unauthorized() {
            return vec![Effect::Unauthorized];
        }
        warn!("{}: {}", context, err);
        self.status = StatusLine::error(format!("{}: {}", context, err));
        Vec::new()
    }

    /// Render snapshot; `trail` is the latest visible subset.
    pub(crate) fn snapshot(&self, trail: Vec<LocationPoint>) -> UiData {
        let timeline = &self.timeline;
        let cursors = timeline.cursors();
        let view = TimelineView {
            policy: timeline.policy(),
            preset: timeline.policy().preset(),
            custom_hours: timeline.custom_hours().get(),
            custom_draft: self.custom_draft.clone(),
            in_pct: cursors.in_pct(),
            out_pct: cursors.out_pct(),
            head_pct: cursors.head_pct(),
            in_ts: timeline.in_ts(),
            head_ts: timeline.head_ts(),
            out_ts: timeline.out_ts(),
            focus: self.focus,
            dragging: timeline.drag_handle(),
            playing: timeline.is_playing(),
            ticks: timeline.ticks(),
            dots: timeline.dot_positions(),
            windowed_count: timeline.windowed().len(),
            total_count: timeline.points_len(),
            visible_count: trail.len(),
        };
        UiData {
            no_color: self.no_color,
            api_url: self.api_url.clone(),
            devices: self.devices.clone(),
            selected_id: self.selected_id.clone(),
            strip_cursor: self.strip_cursor,
            details: self.details.clone(),
            details_loading: self.details_loading,
            history_loading: self.history_loading,
            last_refresh_ms: self.last_refresh_ms,
            status: self.status.clone(),
            trail,
            timeline: view,
        }
    }
}
