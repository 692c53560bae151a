use ratatui::{
    layout::Rect,
    prelude::{Backend, Frame},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::domain::{DeviceDetails, Platform};
use crate::ui::model::UiData;

use super::formatting::{format_coordinate, format_timestamp};
use super::theme::{
    MARKER_ACTIVE_RGB, highlight_style, muted_style, panel_block_style, panel_border_style,
    panel_title_style, rgb,
};

/// Section title and its label/value rows.
pub type DetailSection = (&'static str, Vec<(&'static str, String)>);

pub(super) fn render_device_panel<B: Backend>(f: &mut Frame<'_, B>, data: &UiData, area: Rect) {
    let no_color = data.no_color;
    let lines = match data.details.as_ref() {
        Some(details) => detail_lines(data, details, no_color),
        None if data.details_loading => vec![Line::from(Span::styled(
            "Loading device details...",
            muted_style(no_color),
        ))],
        None => vec![Line::from(Span::styled(
            "Details unavailable",
            muted_style(no_color),
        ))],
    };
    let panel = Paragraph::new(lines)
        .block(
            Block::default()
                .title(Span::styled(" Device ", panel_title_style(no_color)))
                .borders(Borders::ALL)
                .border_style(panel_border_style(no_color))
                .style(panel_block_style(no_color)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(panel, area);
}

/// Label/value rows grouped by section; absent values are left out.
#[must_use]
pub fn detail_sections(details: &DeviceDetails) -> Vec<DetailSection> {
    let summary = &details.summary;
    let mut general = vec![("Id", details.device_id.clone())];
    push_opt(&mut general, "Name", details.display_name.clone());
    general.push(("Platform", summary.platform.clone()));
    push_opt(&mut general, "Version", summary.platform_version.clone());
    push_opt(&mut general, "Locale", summary.locale.clone());

    let mut sections = vec![("General", general)];
    match details.platform() {
        Platform::Android => {
            let mut hardware = Vec::new();
            push_opt(&mut hardware, "Manufacturer", summary.manufacturer.clone());
            push_opt(&mut hardware, "Model", summary.model.clone());
            push_opt(&mut hardware, "Brand", summary.brand.clone());
            push_opt(&mut hardware, "Android", summary.android_version.clone());
            push_opt(&mut hardware, "SDK", summary.sdk.map(|sdk| sdk.to_string()));
            push_opt(&mut hardware, "Physical", summary.is_physical_device.map(yes_no));
            sections.push(("Hardware", hardware));

            let mut abis = Vec::new();
            push_opt(&mut abis, "All", details.supported_abis.as_ref().map(|v| v.join(", ")));
            push_opt(&mut abis, "32-bit", details.supported_32bit_abis.as_ref().map(|v| v.join(", ")));
            push_opt(&mut abis, "64-bit", details.supported_64bit_abis.as_ref().map(|v| v.join(", ")));
            sections.push(("ABIs", abis));
        }
        Platform::Ios => {
            let mut hardware = Vec::new();
            push_opt(&mut hardware, "Name", summary.name.clone());
            push_opt(&mut hardware, "Model", summary.model.clone());
            push_opt(&mut hardware, "System", summary.system_version.clone());
            push_opt(&mut hardware, "Machine", summary.utsname_machine.clone());
            push_opt(&mut hardware, "Physical", summary.is_physical_device.map(yes_no));
            sections.push(("Hardware", hardware));
        }
        Platform::Web => {
            let mut browser = Vec::new();
            push_opt(&mut browser, "Browser", summary.browser_name.clone());
            push_opt(&mut browser, "Language", summary.language.clone());
            push_opt(&mut browser, "Agent", summary.user_agent.clone());
            sections.push(("Browser", browser));
        }
        Platform::Other => {}
    }
    sections.retain(|(_, rows)| !rows.is_empty());
    sections
}

fn push_opt(rows: &mut Vec<(&'static str, String)>, label: &'static str, value: Option<String>) {
    if let Some(value) = value.filter(|value| !value.trim().is_empty()) {
        rows.push((label, value));
    }
}

fn yes_no(value: bool) -> String {
    if value { "yes" } else { "no" }.to_owned()
}

fn detail_lines(data: &UiData, details: &DeviceDetails, no_color: bool) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    if let Some(device) = data.selected_device() {
        lines.push(Line::from(Span::styled(
            device.display_name(),
            highlight_style(no_color, rgb(MARKER_ACTIVE_RGB)),
        )));
        lines.push(Line::from(vec![
            Span::styled("Last fix ", muted_style(no_color)),
            Span::raw(format!(
                "{}, {}",
                format_coordinate(device.latitude),
                format_coordinate(device.longitude)
            )),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Seen ", muted_style(no_color)),
            Span::raw(format_timestamp(device.timestamp as f64)),
        ]));
    }
    for (title, rows) in detail_sections(details) {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            title.to_owned(),
            highlight_style(no_color, rgb(MARKER_ACTIVE_RGB)),
        )));
        for (label, value) in rows {
            lines.push(Line::from(vec![
                Span::styled(format!("{}: ", label), muted_style(no_color)),
                Span::raw(value),
            ]));
        }
    }
    lines
}
