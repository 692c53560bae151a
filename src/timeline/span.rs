use crate::domain::LocationPoint;

pub const PCT_MIN: f64 = 0.0;
pub const PCT_MAX: f64 = 100.0;
/// Floor for the span so a single point or equal timestamps still map.
const MIN_SPAN_MS: f64 = 1.0;
/// Interval count between tick marks on the bar (7 labels).
pub const TICK_INTERVALS: u32 = 6;

/// Linear map between cursor percentages and the windowed timestamp range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSpan {
    min_ts: i64,
    max_ts: i64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub pct: f64,
    pub ts: f64,
}

impl TimeSpan {
    /// Span of a sorted, windowed sequence; `{0, 1}` when empty.
    #[must_use]
    pub fn of(windowed: &[LocationPoint]) -> Self {
        match (windowed.first(), windowed.last()) {
            (Some(first), Some(last)) => Self {
                min_ts: first.timestamp,
                max_ts: last.timestamp,
            },
            (None, _) | (_, None) => Self::default(),
        }
    }

    #[must_use]
    pub const fn min_ts(self) -> i64 {
        self.min_ts
    }

    #[must_use]
    pub const fn max_ts(self) -> i64 {
        self.max_ts
    }

    #[must_use]
    pub fn width_ms(self) -> f64 {
        (self.max_ts.saturating_sub(self.min_ts) as f64).max(MIN_SPAN_MS)
    }

    #[must_use]
    pub fn pct_to_ts(self, pct: f64) -> f64 {
        self.min_ts as f64 + (pct / PCT_MAX) * self.width_ms()
    }

    /// Only used to place marks; cursor state never flows through here.
    #[must_use]
    pub fn ts_to_pct(self, ts: i64) -> f64 {
        (ts.saturating_sub(self.min_ts) as f64 / self.width_ms()) * PCT_MAX
    }

    #[must_use]
    pub fn ticks(self, intervals: u32) -> Vec<Tick> {
        let intervals = intervals.max(1);
        (0..=intervals)
            .map(|idx| {
                let pct = f64::from(idx) / f64::from(intervals) * PCT_MAX;
                Tick {
                    pct,
                    ts: self.pct_to_ts(pct),
                }
            })
            .collect()
    }
}

impl Default for TimeSpan {
    fn default() -> Self {
        Self {
            min_ts: 0,
            max_ts: 1,
        }
    }
}

/// One percentage per windowed point, for the dot indicators on the track.
#[must_use]
pub fn dot_positions(windowed: &[LocationPoint], span: TimeSpan) -> Vec<f64> {
    windowed
        .iter()
        .map(|point| span.ts_to_pct(point.timestamp))
        .collect()
}
