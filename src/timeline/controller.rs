use std::fmt;

use tracing::debug;

use crate::domain::{LocationPoint, retain_finite};

use super::cursor::{CursorHandle, CursorSet, StepDirection};
use super::drag::{DragSession, PointerEvent, TrackGeometry};
use super::playback::{PlaybackClock, PlaybackState, PlaybackToken, TickOutcome};
use super::span::{TICK_INTERVALS, Tick, TimeSpan, dot_positions};
use super::visible::{VisibleSink, visible_subset};
use super::window::{CustomHours, TimeWindowPolicy, WindowPreset, select_window};

/// Owns the timeline state for one device's history and pushes the visible
/// subset to the injected sink after every change.
///
/// With an empty window every cursor operation is a no-op, playback stays
/// disabled and emissions are empty.
pub struct TimelineController {
    points: Vec<LocationPoint>,
    policy: TimeWindowPolicy,
    custom_hours: CustomHours,
    windowed: Vec<LocationPoint>,
    span: TimeSpan,
    cursors: CursorSet,
    drag: DragSession,
    clock: PlaybackClock,
    sink: Option<Box<dyn VisibleSink>>,
}

impl fmt::Debug for TimelineController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimelineController")
            .field("points", &self.points.len())
            .field("policy", &self.policy)
            .field("windowed", &self.windowed.len())
            .field("span", &self.span)
            .field("cursors", &self.cursors)
            .field("drag", &self.drag)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

impl Default for TimelineController {
    fn default() -> Self {
        Self::new(TimeWindowPolicy::default(), CustomHours::default())
    }
}

impl TimelineController {
    #[must_use]
    pub fn new(policy: TimeWindowPolicy, custom_hours: CustomHours) -> Self {
        let custom_hours = match policy {
            TimeWindowPolicy::Custom(hours) => hours,
            TimeWindowPolicy::FixedHours(_) | TimeWindowPolicy::All => custom_hours,
        };
        Self {
            points: Vec::new(),
            policy,
            custom_hours,
            windowed: Vec::new(),
            span: TimeSpan::default(),
            cursors: CursorSet::default(),
            drag: DragSession::default(),
            clock: PlaybackClock::default(),
            sink: None,
        }
    }

    /// Replaces the sink and immediately sends it the current subset.
    pub fn set_sink<S>(&mut self, sink: S)
    where
        S: VisibleSink + 'static,
    {
        self.sink = Some(Box::new(sink));
        self.emit();
    }

    pub fn clear_sink(&mut self) {
        self.sink = None;
    }

    /// Replaces the point store. Points with unusable coordinates are dropped,
    /// playback stops and the cursors reset.
    pub fn set_points(&mut self, points: Vec<LocationPoint>) {
        self.points = retain_finite(points);
        self.rewindow();
    }

    /// Returns `true` if the policy differed and the window was rebuilt.
    ///
    /// Only an actual change resets the cursors and stops playback.
    /// Re-selecting the active preset, or committing the same custom hours
    /// while the custom window is active, leaves the scrub position alone.
    pub fn set_policy(&mut self, policy: TimeWindowPolicy) -> bool {
        if policy == self.policy {
            return false;
        }
        if let TimeWindowPolicy::Custom(hours) = policy {
            self.custom_hours = hours;
        }
        debug!("Timeline window changed to {}", policy);
        self.policy = policy;
        self.rewindow();
        true
    }

    pub fn select_preset(&mut self, preset: WindowPreset) -> bool {
        self.set_policy(preset.policy(self.custom_hours))
    }

    /// Stores the custom hour count; rebuilds the window only while the
    /// custom policy is active.
    pub fn set_custom_hours(&mut self, hours: CustomHours) -> bool {
        self.custom_hours = hours;
        match self.policy {
            TimeWindowPolicy::Custom(_) => self.set_policy(TimeWindowPolicy::Custom(hours)),
            TimeWindowPolicy::FixedHours(_) | TimeWindowPolicy::All => false,
        }
    }

    /// Cursors back to `{0, 100, 100}` and playback forced idle.
    pub fn reset_for_new_window(&mut self) {
        if self.clock.pause() {
            debug!("Playback stopped by window reset");
        }
        self.cursors.reset();
        self.emit();
    }

    pub fn set_in(&mut self, pct: f64) -> bool {
        self.move_cursor(CursorHandle::In, |cursors| cursors.set_in(pct))
    }

    pub fn set_out(&mut self, pct: f64) -> bool {
        self.move_cursor(CursorHandle::Out, |cursors| cursors.set_out(pct))
    }

    pub fn set_head(&mut self, pct: f64) -> bool {
        self.move_cursor(CursorHandle::Head, |cursors| cursors.set_head(pct))
    }

    pub fn step_in(&mut self, direction: StepDirection) -> bool {
        self.step(CursorHandle::In, direction)
    }

    pub fn step_out(&mut self, direction: StepDirection) -> bool {
        self.step(CursorHandle::Out, direction)
    }

    pub fn step_head(&mut self, direction: StepDirection) -> bool {
        self.step(CursorHandle::Head, direction)
    }

    pub fn step(&mut self, handle: CursorHandle, direction: StepDirection) -> bool {
        self.move_cursor(handle, |cursors| cursors.step(handle, direction))
    }

    /// Starts a drag on `handle`; refused while another drag is active.
    pub fn begin_drag(&mut self, handle: CursorHandle) -> bool {
        self.drag.begin(handle)
    }

    /// Moves the dragged handle, if any, to `pct`.
    pub fn drag_to(&mut self, pct: f64) -> bool {
        let Some(handle) = self.drag.active() else {
            return false;
        };
        self.move_cursor(handle, |cursors| cursors.set(handle, pct))
    }

    pub fn end_drag(&mut self) -> Option<CursorHandle> {
        self.drag.end()
    }

    /// Seeks the playhead to `pct` unless a drag is in progress.
    pub fn click_track(&mut self, pct: f64) -> bool {
        if self.drag.active().is_some() {
            return false;
        }
        self.set_head(pct)
    }

    /// Routes pointer input: a press grabs the nearest handle within
    /// `tolerance` or seeks, a move drags, a release ends the drag.
    pub fn handle_pointer(
        &mut self,
        track: &TrackGeometry,
        event: PointerEvent,
        tolerance: f64,
    ) -> bool {
        match event {
            PointerEvent::Down { x } => {
                if self.drag.active().is_some() {
                    return false;
                }
                if let Some(handle) = track.hit_test(x, &self.cursors, tolerance) {
                    return self.begin_drag(handle);
                }
                self.click_track(track.pct_at(x))
            }
            PointerEvent::Move { x } => self.drag_to(track.pct_at(x)),
            PointerEvent::Up => self.end_drag().is_some(),
        }
    }

    /// Starts playback; `None` when there is nothing to play.
    pub fn play(&mut self) -> Option<PlaybackToken> {
        if self.windowed.is_empty() {
            return None;
        }
        let token = self.clock.play(&mut self.cursors);
        debug!(
            "Playback started at {:.1}% (step {:.3}%)",
            self.cursors.head_pct(),
            self.clock.step_pct()
        );
        self.emit();
        Some(token)
    }

    pub fn pause(&mut self) -> bool {
        let stopped = self.clock.pause();
        if stopped {
            debug!("Playback paused at {:.1}%", self.cursors.head_pct());
        }
        stopped
    }

    /// Pauses a running session or starts a new one. Returns the token of a
    /// newly started session.
    pub fn toggle_play(&mut self) -> Option<PlaybackToken> {
        if self.clock.is_playing() {
            self.pause();
            return None;
        }
        self.play()
    }

    pub fn tick(&mut self, token: PlaybackToken) -> TickOutcome {
        let outcome = self.clock.tick(token, &mut self.cursors);
        match outcome {
            TickOutcome::Advanced => self.emit(),
            TickOutcome::Finished => {
                debug!("Playback reached the out-point");
                self.emit();
            }
            TickOutcome::Stale => {}
        }
        outcome
    }

    /// Stops playback, releases any drag and drops the sink.
    pub fn teardown(&mut self) {
        self.clock.pause();
        self.drag.end();
        self.sink = None;
    }

    #[must_use]
    pub const fn cursors(&self) -> &CursorSet {
        &self.cursors
    }

    #[must_use]
    pub const fn playback_state(&self) -> PlaybackState {
        self.clock.state()
    }

    #[must_use]
    pub const fn is_playing(&self) -> bool {
        self.clock.is_playing()
    }

    #[must_use]
    pub const fn playback_token(&self) -> Option<PlaybackToken> {
        self.clock.token()
    }

    #[must_use]
    pub const fn drag_handle(&self) -> Option<CursorHandle> {
        self.drag.active()
    }

    #[must_use]
    pub const fn policy(&self) -> TimeWindowPolicy {
        self.policy
    }

    #[must_use]
    pub const fn custom_hours(&self) -> CustomHours {
        self.custom_hours
    }

    #[must_use]
    pub fn points_len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn windowed(&self) -> &[LocationPoint] {
        &self.windowed
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.windowed.is_empty()
    }

    #[must_use]
    pub const fn span(&self) -> TimeSpan {
        self.span
    }

    #[must_use]
    pub fn in_ts(&self) -> f64 {
        self.span.pct_to_ts(self.cursors.in_pct())
    }

    #[must_use]
    pub fn head_ts(&self) -> f64 {
        self.span.pct_to_ts(self.cursors.head_pct())
    }

    #[must_use]
    pub fn out_ts(&self) -> f64 {
        self.span.pct_to_ts(self.cursors.out_pct())
    }

    #[must_use]
    pub fn ticks(&self) -> Vec<Tick> {
        self.span.ticks(TICK_INTERVALS)
    }

    #[must_use]
    pub fn dot_positions(&self) -> Vec<f64> {
        dot_positions(&self.windowed, self.span)
    }

    #[must_use]
    pub fn visible(&self) -> &[LocationPoint] {
        visible_subset(
            &self.windowed,
            self.span,
            self.cursors.in_pct(),
            self.cursors.head_pct(),
        )
    }

    fn rewindow(&mut self) {
        self.windowed = select_window(&self.points, self.policy);
        self.span = TimeSpan::of(&self.windowed);
        debug!(
            "Timeline windowed {} of {} points ({})",
            self.windowed.len(),
            self.points.len(),
            self.policy
        );
        self.reset_for_new_window();
    }

    fn move_cursor<F>(&mut self, handle: CursorHandle, apply: F) -> bool
    where
        F: FnOnce(&mut CursorSet) -> bool,
    {
        if self.windowed.is_empty() {
            return false;
        }
        let changed = apply(&mut self.cursors);
        debug_assert!(self.cursors.is_consistent(), "{:?} broke cursors", handle);
        if changed {
            self.emit();
        }
        changed
    }

    fn emit(&mut self) {
        let visible = visible_subset(
            &self.windowed,
            self.span,
            self.cursors.in_pct(),
            self.cursors.head_pct(),
        );
        if let Some(sink) = self.sink.as_mut() {
            sink.on_visible(visible);
        }
    }
}
