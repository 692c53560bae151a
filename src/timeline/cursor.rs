use super::span::{PCT_MAX, PCT_MIN};

/// Minimum distance kept between the in-point and the out-point.
pub const MIN_SEPARATION_PCT: f64 = 1.0;
/// Distance moved by one keyboard step.
pub const KEY_STEP_PCT: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorHandle {
    In,
    Out,
    Head,
}

impl CursorHandle {
    /// Focus order used by keyboard cycling.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            CursorHandle::In => CursorHandle::Head,
            CursorHandle::Head => CursorHandle::Out,
            CursorHandle::Out => CursorHandle::In,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            CursorHandle::In => "in",
            CursorHandle::Out => "out",
            CursorHandle::Head => "head",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    Backward,
    Forward,
}

impl StepDirection {
    const fn sign(self) -> f64 {
        match self {
            StepDirection::Backward => -1.0,
            StepDirection::Forward => 1.0,
        }
    }
}

/// The in-point, out-point and playhead as percentages of the span.
///
/// The playhead is stored as last written and read back clamped to the
/// out-point, so moving the out-point below the playhead never rewrites it;
/// the next playhead operation re-clamps. Every read satisfies
/// `0 <= in <= head <= out <= 100` and `out - in >= 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorSet {
    in_pct: f64,
    out_pct: f64,
    head_pct: f64,
}

impl Default for CursorSet {
    fn default() -> Self {
        Self {
            in_pct: PCT_MIN,
            out_pct: PCT_MAX,
            head_pct: PCT_MAX,
        }
    }
}

fn bound(value: f64, lo: f64, hi: f64) -> f64 {
    value.max(lo).min(hi)
}

impl CursorSet {
    #[must_use]
    pub const fn in_pct(&self) -> f64 {
        self.in_pct
    }

    #[must_use]
    pub const fn out_pct(&self) -> f64 {
        self.out_pct
    }

    #[must_use]
    pub fn head_pct(&self) -> f64 {
        self.head_pct.min(self.out_pct)
    }

    #[must_use]
    pub fn get(&self, handle: CursorHandle) -> f64 {
        match handle {
            CursorHandle::In => self.in_pct(),
            CursorHandle::Out => self.out_pct(),
            CursorHandle::Head => self.head_pct(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Returns `true` when any effective cursor value moved. Non-finite input
    /// is ignored.
    pub fn set_in(&mut self, pct: f64) -> bool {
        if !pct.is_finite() {
            return false;
        }
        let before = *self;
        self.in_pct = bound(pct, PCT_MIN, self.out_pct - MIN_SEPARATION_PCT);
        self.head_pct = self.head_pct.max(self.in_pct);
        self.differs_from(&before)
    }

    pub fn set_out(&mut self, pct: f64) -> bool {
        if !pct.is_finite() {
            return false;
        }
        let before = *self;
        self.out_pct = bound(pct, self.in_pct + MIN_SEPARATION_PCT, PCT_MAX);
        self.differs_from(&before)
    }

    pub fn set_head(&mut self, pct: f64) -> bool {
        if !pct.is_finite() {
            return false;
        }
        let before = *self;
        self.head_pct = bound(pct, self.in_pct, self.out_pct);
        self.differs_from(&before)
    }

    pub fn set(&mut self, handle: CursorHandle, pct: f64) -> bool {
        match handle {
            CursorHandle::In => self.set_in(pct),
            CursorHandle::Out => self.set_out(pct),
            CursorHandle::Head => self.set_head(pct),
        }
    }

    pub fn step(&mut self, handle: CursorHandle, direction: StepDirection) -> bool {
        let target = self.get(handle) + direction.sign() * KEY_STEP_PCT;
        self.set(handle, target)
    }

    /// Checks the read-side invariant; used by tests and debug assertions.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let head = self.head_pct();
        PCT_MIN <= self.in_pct
            && self.in_pct <= head
            && head <= self.out_pct
            && self.out_pct <= PCT_MAX
            && self.out_pct - self.in_pct >= MIN_SEPARATION_PCT
    }

    fn differs_from(&self, before: &Self) -> bool {
        self.in_pct.to_bits() != before.in_pct.to_bits()
            || self.out_pct.to_bits() != before.out_pct.to_bits()
            || self.head_pct().to_bits() != before.head_pct().to_bits()
    }
}
