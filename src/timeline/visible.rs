use crate::domain::LocationPoint;

use super::span::TimeSpan;

/// Receives the visible subset after every timeline change.
pub trait VisibleSink: Send {
    fn on_visible(&mut self, visible: &[LocationPoint]);
}

impl<F> VisibleSink for F
where
    F: FnMut(&[LocationPoint]) + Send,
{
    fn on_visible(&mut self, visible: &[LocationPoint]) {
        self(visible);
    }
}

/// Points of a sorted window whose timestamps fall in
/// `[ts(in_pct), ts(head_pct)]`, both ends inclusive.
#[must_use]
pub fn visible_subset(
    windowed: &[LocationPoint],
    span: TimeSpan,
    in_pct: f64,
    head_pct: f64,
) -> &[LocationPoint] {
    let from = span.pct_to_ts(in_pct);
    let to = span.pct_to_ts(head_pct);
    let start = windowed.partition_point(|point| (point.timestamp as f64) < from);
    let end = windowed.partition_point(|point| (point.timestamp as f64) <= to);
    windowed.get(start..end.max(start)).unwrap_or_default()
}
