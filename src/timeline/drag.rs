use super::cursor::{CursorHandle, CursorSet};
use super::span::{PCT_MAX, PCT_MIN};

/// Pointer input already translated into track coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { x: f64 },
    Move { x: f64 },
    Up,
}

/// At most one handle is dragged at a time; a second begin is refused.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    active: Option<CursorHandle>,
}

impl DragSession {
    pub fn begin(&mut self, handle: CursorHandle) -> bool {
        if self.active.is_some() {
            return false;
        }
        self.active = Some(handle);
        true
    }

    #[must_use]
    pub const fn active(self) -> Option<CursorHandle> {
        self.active
    }

    pub fn end(&mut self) -> Option<CursorHandle> {
        self.active.take()
    }
}

/// Horizontal extent of the track in pointer coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackGeometry {
    left: f64,
    width: f64,
}

impl TrackGeometry {
    #[must_use]
    pub fn new(left: f64, width: f64) -> Self {
        Self {
            left,
            width: if width.is_finite() { width.max(1.0) } else { 1.0 },
        }
    }

    #[must_use]
    pub fn pct_at(&self, x: f64) -> f64 {
        (((x - self.left) / self.width) * PCT_MAX)
            .max(PCT_MIN)
            .min(PCT_MAX)
    }

    #[must_use]
    pub fn x_at(&self, pct: f64) -> f64 {
        self.left + (pct / PCT_MAX) * self.width
    }

    /// Nearest handle within `tolerance` of `x`. Ties go to the playhead,
    /// then the in-point, so a collapsed range stays scrubbable.
    #[must_use]
    pub fn hit_test(&self, x: f64, cursors: &CursorSet, tolerance: f64) -> Option<CursorHandle> {
        let mut best: Option<(CursorHandle, f64)> = None;
        for handle in [CursorHandle::Head, CursorHandle::In, CursorHandle::Out] {
            let distance = (self.x_at(cursors.get(handle)) - x).abs();
            if distance > tolerance {
                continue;
            }
            let closer = best.is_none_or(|(_, current)| distance < current);
            if closer {
                best = Some((handle, distance));
            }
        }
        best.map(|(handle, _)| handle)
    }
}
