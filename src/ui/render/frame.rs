use ratatui::{
    layout::Rect,
    prelude::{Backend, Frame},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::ui::model::{StatusLevel, UiData};

use super::device_panel::render_device_panel;
use super::device_strip::render_device_strip;
use super::formatting::format_timestamp;
use super::layout::dashboard_layout;
use super::map::render_map;
use super::theme::{
    ACCENT_RED_RGB, PANEL_TEXT_RGB, app_background_style, highlight_style, muted_style, panel_block_style,
    panel_border_style, panel_title_style, rgb, style_color,
};
use super::timeline_bar::render_timeline;

const KEY_HELP: &str = "q quit | tab/enter pick device | esc deselect | space play | \
                        [ ] h focus | ←/→ step | w window | c custom hours | r refresh";

pub fn draw_frame<B: Backend>(f: &mut Frame<'_, B>, data: &UiData) {
    let size = f.size();
    f.render_widget(
        Block::default().style(app_background_style(data.no_color)),
        size,
    );

    let layout = dashboard_layout(size, data.shows_panel());
    render_header(f, data, layout.header);
    render_map(f, data, layout.map);
    if let Some(panel) = layout.panel {
        render_device_panel(f, data, panel);
    }
    render_device_strip(f, data, layout.strip);
    render_timeline(f, data, layout.timeline);
}

fn render_header<B: Backend>(f: &mut Frame<'_, B>, data: &UiData, area: Rect) {
    let no_color = data.no_color;
    let refreshed = data
        .last_refresh_ms
        .map_or_else(|| "never".to_owned(), |ts| format_timestamp(ts as f64));
    let summary = Line::from(vec![
        Span::styled(
            format!("nyanlook v{}", env!("CARGO_PKG_VERSION")),
            panel_title_style(no_color),
        ),
        Span::styled(
            format!(
                " | {} | {} devices | refreshed {}",
                data.api_url,
                data.devices.len(),
                refreshed
            ),
            muted_style(no_color),
        ),
    ]);
    let status = if data.status.message.is_empty() {
        Line::from(Span::styled(KEY_HELP, muted_style(no_color)))
    } else {
        let style = match data.status.level {
            StatusLevel::Error => highlight_style(no_color, rgb(ACCENT_RED_RGB)),
            StatusLevel::Info => style_color(no_color, rgb(PANEL_TEXT_RGB)),
        };
        Line::from(Span::styled(data.status.message.clone(), style))
    };
    let header = Paragraph::new(vec![summary, status]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(panel_border_style(no_color))
            .style(panel_block_style(no_color)),
    );
    f.render_widget(header, area);
}
