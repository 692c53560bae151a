//! Timeline scrubbing and playback.
//!
//! The controller windows a device's location history by a time policy,
//! keeps three cursors (in, out, playhead) as percentages of the windowed
//! span, animates the playhead on a fixed tick, and pushes the points between
//! the in-point and the playhead to an injected sink on every change.
mod controller;
mod cursor;
mod drag;
mod playback;
mod span;
mod visible;
mod window;


pub use controller::TimelineController;
pub use cursor::{CursorHandle, CursorSet, KEY_STEP_PCT, MIN_SEPARATION_PCT, StepDirection};
pub use drag::{DragSession, PointerEvent, TrackGeometry};
pub use playback::{
    PLAY_INTERVAL, PlaybackClock, PlaybackState, PlaybackToken, SWEEP_TICKS, TickOutcome,
};
pub use span::{PCT_MAX, PCT_MIN, TICK_INTERVALS, Tick, TimeSpan, dot_positions};
pub use visible::{VisibleSink, visible_subset};
pub use window::{
    CUSTOM_HOURS_MAX, CUSTOM_HOURS_MIN, CustomHours, MS_PER_HOUR, TimeWindowPolicy,
    WINDOW_PRESETS, WindowPreset, select_window,
};
