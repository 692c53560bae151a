use std::time::Duration;

use super::cursor::CursorSet;

/// Interval between playhead advances.
pub const PLAY_INTERVAL: Duration = Duration::from_millis(50);
/// Ticks needed to sweep the full in..out range.
pub const SWEEP_TICKS: f64 = 120.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Playing,
}

/// Identifies one play session. Ticks carrying an older token are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaybackToken {
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Advanced,
    Finished,
    Stale,
}

/// Idle/Playing machine driving the playhead.
///
/// The step is fixed when play starts (`(out - in) / SWEEP_TICKS`), but the
/// end-of-range check reads the current out-point on every tick.
#[derive(Debug, Clone, Copy)]
pub struct PlaybackClock {
    state: PlaybackState,
    generation: u64,
    step_pct: f64,
}

impl Default for PlaybackClock {
    fn default() -> Self {
        Self {
            state: PlaybackState::Idle,
            generation: 0,
            step_pct: 0.0,
        }
    }
}

impl PlaybackClock {
    #[must_use]
    pub const fn state(&self) -> PlaybackState {
        self.state
    }

    #[must_use]
    pub const fn is_playing(&self) -> bool {
        matches!(self.state, PlaybackState::Playing)
    }

    #[must_use]
    pub const fn step_pct(&self) -> f64 {
        self.step_pct
    }

    /// Token of the running session, if any.
    #[must_use]
    pub const fn token(&self) -> Option<PlaybackToken> {
        match self.state {
            PlaybackState::Playing => Some(PlaybackToken {
                generation: self.generation,
            }),
            PlaybackState::Idle => None,
        }
    }

    /// Starts a new session. A playhead already at or past the out-point is
    /// rewound to the in-point first.
    pub fn play(&mut self, cursors: &mut CursorSet) -> PlaybackToken {
        if cursors.head_pct() >= cursors.out_pct() {
            cursors.set_head(cursors.in_pct());
        }
        self.step_pct = (cursors.out_pct() - cursors.in_pct()) / SWEEP_TICKS;
        self.generation = self.generation.wrapping_add(1);
        self.state = PlaybackState::Playing;
        PlaybackToken {
            generation: self.generation,
        }
    }

    /// Returns `true` if a session was running.
    pub fn pause(&mut self) -> bool {
        match self.state {
            PlaybackState::Playing => {
                self.state = PlaybackState::Idle;
                self.generation = self.generation.wrapping_add(1);
                true
            }
            PlaybackState::Idle => false,
        }
    }

    pub fn tick(&mut self, token: PlaybackToken, cursors: &mut CursorSet) -> TickOutcome {
        if self.token() != Some(token) {
            return TickOutcome::Stale;
        }
        let next = cursors.head_pct() + self.step_pct;
        if next >= cursors.out_pct() {
            cursors.set_head(cursors.out_pct());
            self.pause();
            return TickOutcome::Finished;
        }
        cursors.set_head(next);
        TickOutcome::Advanced
    }
}

#[cfg(test)]
mod tests {
    use super::{PlaybackClock, PlaybackState, SWEEP_TICKS, TickOutcome};
    use crate::timeline::cursor::CursorSet;

    #[test]
    fn play_at_end_rewinds_to_in_point() -> Result<(), String> {
        let mut cursors = CursorSet::default();
        cursors.set_in(20.0);
        let mut clock = PlaybackClock::default();
        clock.play(&mut cursors);
        if (cursors.head_pct() - 20.0).abs() > 1e-9 {
            return Err(format!("Expected rewind to 20, got {}", cursors.head_pct()));
        }
        if (clock.step_pct() - 80.0 / SWEEP_TICKS).abs() > 1e-12 {
            return Err("Unexpected step".to_owned());
        }
        Ok(())
    }

    #[test]
    fn full_sweep_finishes_in_bounded_ticks() -> Result<(), String> {
        let mut cursors = CursorSet::default();
        let mut clock = PlaybackClock::default();
        let token = clock.play(&mut cursors);
        let mut ticks = 0_u32;
        loop {
            ticks = ticks.saturating_add(1);
            match clock.tick(token, &mut cursors) {
                TickOutcome::Advanced => {}
                TickOutcome::Finished => break,
                TickOutcome::Stale => return Err("Live token reported stale".to_owned()),
            }
            if ticks > 121 {
                return Err("Playback did not finish".to_owned());
            }
        }
        if !(119..=121).contains(&ticks) {
            return Err(format!("Unexpected tick count {}", ticks));
        }
        if clock.state() != PlaybackState::Idle {
            return Err("Clock must go idle on finish".to_owned());
        }
        if (cursors.head_pct() - 100.0).abs() > 1e-9 {
            return Err("Head must land on out".to_owned());
        }
        Ok(())
    }

    #[test]
    fn tick_after_pause_is_stale_and_moves_nothing() -> Result<(), String> {
        let mut cursors = CursorSet::default();
        let mut clock = PlaybackClock::default();
        let token = clock.play(&mut cursors);
        clock.tick(token, &mut cursors);
        let before = cursors;
        if !clock.pause() {
            return Err("Pause must report running session".to_owned());
        }
        if clock.pause() {
            return Err("Second pause must be a no-op".to_owned());
        }
        if clock.tick(token, &mut cursors) != TickOutcome::Stale || cursors != before {
            return Err("Stale tick changed state".to_owned());
        }
        Ok(())
    }

    #[test]
    fn old_session_token_is_rejected_after_restart() -> Result<(), String> {
        let mut cursors = CursorSet::default();
        let mut clock = PlaybackClock::default();
        let first = clock.play(&mut cursors);
        clock.pause();
        let second = clock.play(&mut cursors);
        if first == second {
            return Err("Sessions must have distinct tokens".to_owned());
        }
        if clock.tick(first, &mut cursors) != TickOutcome::Stale {
            return Err("Old token must be stale".to_owned());
        }
        Ok(())
    }

    #[test]
    fn tick_respects_out_moved_during_playback() -> Result<(), String> {
        let mut cursors = CursorSet::default();
        let mut clock = PlaybackClock::default();
        let token = clock.play(&mut cursors);
        cursors.set_out(0.5);
        if (cursors.out_pct() - 1.0).abs() > 1e-9 {
            return Err(format!("Out must clamp to in + 1, got {}", cursors.out_pct()));
        }
        if clock.tick(token, &mut cursors) != TickOutcome::Advanced {
            return Err("First step stays below the lowered out".to_owned());
        }
        if clock.tick(token, &mut cursors) != TickOutcome::Finished {
            return Err("Second step must finish at the lowered out".to_owned());
        }
        if (cursors.head_pct() - cursors.out_pct()).abs() > 1e-9 {
            return Err("Head must equal out".to_owned());
        }
        if clock.state() != PlaybackState::Idle {
            return Err("Clock must go idle at the lowered out".to_owned());
        }
        Ok(())
    }
}
