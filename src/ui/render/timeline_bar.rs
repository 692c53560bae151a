use ratatui::{
    layout::Rect,
    prelude::{Backend, Frame},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::timeline::{CursorHandle, WINDOW_PRESETS, WindowPreset};
use crate::ui::model::{TimelineView, UiData};

use super::formatting::{format_tick_label, format_timestamp};
use super::layout::{pct_to_column, timeline_layout};
use super::theme::{
    ACCENT_GREEN_RGB, DOT_RGB, HEAD_RGB, RANGE_RGB, highlight_style, muted_style,
    panel_block_style, panel_border_style, panel_title_style, rgb, style_color,
};

const TRACK_GLYPH: char = '─';
const RANGE_GLYPH: char = '━';
const DOT_GLYPH: char = '•';
const IN_GLYPH: char = '[';
const OUT_GLYPH: char = ']';
const HEAD_GLYPH: char = '▼';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Track,
    Range,
    Dot,
    In,
    Out,
    Head,
}

pub(super) fn render_timeline<B: Backend>(f: &mut Frame<'_, B>, data: &UiData, area: Rect) {
    let no_color = data.no_color;
    let view = &data.timeline;
    let block = Block::default()
        .title(Span::styled(" Timeline ", panel_title_style(no_color)))
        .borders(Borders::ALL)
        .border_style(panel_border_style(no_color))
        .style(panel_block_style(no_color));
    f.render_widget(block, area);

    let rows = timeline_layout(area);
    f.render_widget(Paragraph::new(presets_line(view, no_color)), rows.presets);

    if data.history_loading {
        f.render_widget(
            Paragraph::new(Span::styled("Loading history...", muted_style(no_color))),
            rows.track,
        );
        return;
    }
    if data.selected_id.is_none() {
        f.render_widget(
            Paragraph::new(Span::styled(
                "Select a device to scrub its history",
                muted_style(no_color),
            )),
            rows.track,
        );
        return;
    }
    if view.is_empty() {
        f.render_widget(
            Paragraph::new(Span::styled(
                "No history in this window",
                muted_style(no_color),
            )),
            rows.track,
        );
        return;
    }

    f.render_widget(
        Paragraph::new(track_line(view, rows.track, no_color)),
        rows.track,
    );
    f.render_widget(
        Paragraph::new(Line::from(tick_labels(view, rows.labels))),
        rows.labels,
    );
    f.render_widget(Paragraph::new(status_line(view, no_color)), rows.status);
}

fn presets_line(view: &TimelineView, no_color: bool) -> Line<'static> {
    let mut spans = Vec::with_capacity(WINDOW_PRESETS.len().saturating_mul(2).saturating_add(2));
    for preset in WINDOW_PRESETS {
        let label = preset.label();
        if preset == view.preset {
            spans.push(Span::styled(
                format!("[{}]", label),
                highlight_style(no_color, rgb(RANGE_RGB)),
            ));
        } else {
            spans.push(Span::styled(format!(" {} ", label), muted_style(no_color)));
        }
        spans.push(Span::raw(" "));
    }
    if let Some(draft) = &view.custom_draft {
        spans.push(Span::styled(
            format!("hours: {}_", draft),
            highlight_style(no_color, rgb(ACCENT_GREEN_RGB)),
        ));
    } else if view.preset == WindowPreset::Custom {
        spans.push(Span::styled(
            format!("hours: {}", view.custom_hours),
            muted_style(no_color),
        ));
    }
    Line::from(spans)
}

/// Glyph layout of the track row; later writes win so handles stay on top.
fn track_cells(view: &TimelineView, track: Rect) -> Vec<Cell> {
    let width = usize::from(track.width);
    let mut cells = vec![Cell::Track; width];
    let column_of = |pct: f64| usize::from(pct_to_column(track, pct).saturating_sub(track.x));

    let in_col = column_of(view.in_pct);
    let out_col = column_of(view.out_pct);
    for cell in cells
        .iter_mut()
        .take(out_col.saturating_add(1))
        .skip(in_col)
    {
        *cell = Cell::Range;
    }
    for dot in &view.dots {
        if let Some(cell) = cells.get_mut(column_of(*dot)) {
            *cell = Cell::Dot;
        }
    }
    for (col, marker) in [
        (in_col, Cell::In),
        (out_col, Cell::Out),
        (column_of(view.head_pct), Cell::Head),
    ] {
        if let Some(cell) = cells.get_mut(col) {
            *cell = marker;
        }
    }
    cells
}

fn track_line(view: &TimelineView, track: Rect, no_color: bool) -> Line<'static> {
    let spans: Vec<Span<'static>> = track_cells(view, track)
        .into_iter()
        .map(|cell| {
            let (glyph, style) = match cell {
                Cell::Track => (TRACK_GLYPH, muted_style(no_color)),
                Cell::Range => (RANGE_GLYPH, style_color(no_color, rgb(RANGE_RGB))),
                Cell::Dot => (DOT_GLYPH, style_color(no_color, rgb(DOT_RGB))),
                Cell::In => (IN_GLYPH, handle_style(view, CursorHandle::In, no_color)),
                Cell::Out => (OUT_GLYPH, handle_style(view, CursorHandle::Out, no_color)),
                Cell::Head => (HEAD_GLYPH, handle_style(view, CursorHandle::Head, no_color)),
            };
            Span::styled(glyph.to_string(), style)
        })
        .collect();
    Line::from(spans)
}

fn handle_style(view: &TimelineView, handle: CursorHandle, no_color: bool) -> ratatui::style::Style {
    let color = match handle {
        CursorHandle::Head => rgb(HEAD_RGB),
        CursorHandle::In | CursorHandle::Out => rgb(RANGE_RGB),
    };
    if view.focus == handle || view.dragging == Some(handle) {
        highlight_style(no_color, color)
    } else {
        style_color(no_color, color)
    }
}

/// Tick labels placed at their columns; a label that would overlap the
/// previous one is skipped.
fn tick_labels(view: &TimelineView, labels: Rect) -> String {
    let track = Rect {
        x: labels.x.saturating_add(1),
        width: labels.width.saturating_sub(2),
        ..labels
    };
    let width = usize::from(labels.width);
    let mut row: Vec<char> = vec![' '; width];
    let span_ms = match (view.ticks.first(), view.ticks.last()) {
        (Some(first), Some(last)) => last.ts - first.ts,
        _ => 0.0,
    };
    let mut next_free = 0_usize;
    for tick in &view.ticks {
        let label: Vec<char> = format_tick_label(tick.ts, span_ms).chars().collect();
        let center = usize::from(pct_to_column(track, tick.pct).saturating_sub(labels.x));
        let start = center
            .saturating_sub(label.len() / 2)
            .min(width.saturating_sub(label.len()));
        if start < next_free || label.len() > width {
            continue;
        }
        for (offset, ch) in label.iter().enumerate() {
            if let Some(slot) = row.get_mut(start.saturating_add(offset)) {
                *slot = *ch;
            }
        }
        next_free = start.saturating_add(label.len()).saturating_add(1);
    }
    row.into_iter().collect()
}

fn status_line(view: &TimelineView, no_color: bool) -> Line<'static> {
    let (state, state_style) = if view.playing {
        ("▶ playing", highlight_style(no_color, rgb(ACCENT_GREEN_RGB)))
    } else {
        ("❚❚ paused", muted_style(no_color))
    };
    Line::from(vec![
        Span::styled(state.to_owned(), state_style),
        Span::raw("  "),
        Span::styled(
            format!("in {}", format_timestamp(view.in_ts)),
            style_color(no_color, rgb(RANGE_RGB)),
        ),
        Span::raw("  "),
        Span::styled(
            format!("head {}", format_timestamp(view.head_ts)),
            style_color(no_color, rgb(HEAD_RGB)),
        ),
        Span::raw("  "),
        Span::styled(
            format!("out {}", format_timestamp(view.out_ts)),
            style_color(no_color, rgb(RANGE_RGB)),
        ),
        Span::raw("  "),
        Span::styled(
            format!(
                "{}/{} pts ({} in window) | focus {}",
                view.visible_count,
                view.total_count,
                view.windowed_count,
                view.focus.label()
            ),
            muted_style(no_color),
        ),
    ])
}
