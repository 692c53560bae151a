//! Screen geometry shared by the renderer and mouse hit-testing.
use std::ops::Range;

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::timeline::{PCT_MAX, TrackGeometry};

use super::theme::{
    HEADER_HEIGHT, MAP_MIN_HEIGHT, PANEL_WIDTH, STRIP_CELL_WIDTH, STRIP_HEIGHT, TIMELINE_HEIGHT,
    UI_MARGIN,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardLayout {
    pub header: Rect,
    pub map: Rect,
    pub panel: Option<Rect>,
    pub strip: Rect,
    pub timeline: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimelineLayout {
    pub presets: Rect,
    pub track: Rect,
    pub labels: Rect,
    pub status: Rect,
}

#[must_use]
pub fn dashboard_layout(area: Rect, show_panel: bool) -> DashboardLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(UI_MARGIN)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(MAP_MIN_HEIGHT),
            Constraint::Length(STRIP_HEIGHT),
            Constraint::Length(TIMELINE_HEIGHT),
        ])
        .split(area);
    let (header, body, strip, timeline) = match rows.as_ref() {
        [a, b, c, d] => (*a, *b, *c, *d),
        _ => return DashboardLayout::default(),
    };

    if !show_panel {
        return DashboardLayout {
            header,
            map: body,
            panel: None,
            strip,
            timeline,
        };
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(PANEL_WIDTH)])
        .split(body);
    let (map, panel) = match columns.as_ref() {
        [a, b] => (*a, Some(*b)),
        _ => (body, None),
    };
    DashboardLayout {
        header,
        map,
        panel,
        strip,
        timeline,
    }
}

/// Rows inside the bordered timeline block. The track keeps one column of
/// padding on each side so the range brackets stay visible at 0% and 100%.
#[must_use]
pub fn timeline_layout(area: Rect) -> TimelineLayout {
    let inner = inner_rect(area);
    let row = |offset: u16| Rect {
        x: inner.x,
        y: inner.y.saturating_add(offset),
        width: inner.width,
        height: u16::from(offset < inner.height),
    };
    let track_row = row(1);
    TimelineLayout {
        presets: row(0),
        track: Rect {
            x: track_row.x.saturating_add(1),
            width: track_row.width.saturating_sub(2),
            ..track_row
        },
        labels: row(2),
        status: row(3),
    }
}

/// Area inside a one-cell border.
#[must_use]
pub const fn inner_rect(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

/// Pointer geometry of the track: column `track.x` is 0%, the last column 100%.
#[must_use]
pub fn track_geometry(track: Rect) -> TrackGeometry {
    TrackGeometry::new(
        f64::from(track.x),
        f64::from(track.width.saturating_sub(1)),
    )
}

/// Column of `pct` on the track, clamped to the track.
#[must_use]
pub fn pct_to_column(track: Rect, pct: f64) -> u16 {
    let last = track.width.saturating_sub(1);
    let offset = (pct.clamp(0.0, PCT_MAX) / PCT_MAX * f64::from(last)).round();
    let offset = if offset.is_finite() { offset as u16 } else { 0 };
    track.x.saturating_add(offset.min(last))
}

#[must_use]
pub const fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && row >= area.y
        && column < area.x.saturating_add(area.width)
        && row < area.y.saturating_add(area.height)
}

/// Number of device cells that fit on one strip row.
#[must_use]
pub fn strip_capacity(strip_inner: Rect) -> usize {
    usize::from(strip_inner.width / STRIP_CELL_WIDTH).max(1)
}

/// Indices shown on the strip, scrolled so `cursor` stays visible.
#[must_use]
pub fn strip_window(count: usize, cursor: usize, capacity: usize) -> Range<usize> {
    let capacity = capacity.max(1);
    let cursor = cursor.min(count.saturating_sub(1));
    let start = cursor.saturating_sub(capacity.saturating_sub(1));
    start..count.min(start.saturating_add(capacity))
}

/// Device index under a click on the strip block at `area`.
#[must_use]
pub fn strip_hit(area: Rect, count: usize, cursor: usize, column: u16, row: u16) -> Option<usize> {
    let inner = inner_rect(area);
    if !contains(inner, column, row) {
        return None;
    }
    let cell = usize::from(column.saturating_sub(inner.x) / STRIP_CELL_WIDTH);
    let window = strip_window(count, cursor, strip_capacity(inner));
    let index = window.start.saturating_add(cell);
    window.contains(&index).then_some(index)
}
