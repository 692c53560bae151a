use ratatui::{
    layout::Rect,
    prelude::{Backend, Frame},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::ui::model::UiData;

use super::formatting::truncate;
use super::layout::{inner_rect, strip_capacity, strip_window};
use super::theme::{
    MARKER_ACTIVE_RGB, MARKER_RGB, STRIP_CELL_WIDTH, highlight_style, muted_style,
    panel_block_style, panel_border_style, panel_title_style, rgb, style_color,
};

pub(super) fn render_device_strip<B: Backend>(f: &mut Frame<'_, B>, data: &UiData, area: Rect) {
    let no_color = data.no_color;
    let block = Block::default()
        .title(Span::styled(" Devices ", panel_title_style(no_color)))
        .borders(Borders::ALL)
        .border_style(panel_border_style(no_color))
        .style(panel_block_style(no_color));

    if data.devices.is_empty() {
        f.render_widget(
            Paragraph::new(Span::styled("No devices reported yet", muted_style(no_color)))
                .block(block),
            area,
        );
        return;
    }

    let cell_width = usize::from(STRIP_CELL_WIDTH);
    let window = strip_window(
        data.devices.len(),
        data.strip_cursor,
        strip_capacity(inner_rect(area)),
    );
    let mut spans = Vec::new();
    for (index, device) in data
        .devices
        .iter()
        .enumerate()
        .skip(window.start)
        .take(window.len())
    {
        let selected = data.selected_id.as_deref() == Some(device.device_id.as_str());
        let marker = if index == data.strip_cursor { '>' } else { ' ' };
        let label = truncate(
            &format!("{} {}", device.platform().glyph(), device.display_name()),
            cell_width.saturating_sub(2),
        );
        let style = if selected {
            highlight_style(no_color, rgb(MARKER_ACTIVE_RGB))
        } else if index == data.strip_cursor {
            highlight_style(no_color, rgb(MARKER_RGB))
        } else {
            style_color(no_color, rgb(MARKER_RGB))
        };
        spans.push(Span::styled(
            format!("{}{:<width$}", marker, label, width = cell_width.saturating_sub(1)),
            style,
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}
