use ratatui::style::{Color, Modifier, Style};

pub(super) const UI_MARGIN: u16 = 0;
pub(super) const HEADER_HEIGHT: u16 = 4;
pub(super) const STRIP_HEIGHT: u16 = 3;
pub(super) const TIMELINE_HEIGHT: u16 = 6;
pub(super) const MAP_MIN_HEIGHT: u16 = 6;
pub(super) const PANEL_WIDTH: u16 = 40;
pub(super) const STRIP_CELL_WIDTH: u16 = 18;

pub(super) const APP_BG_RGB: (u8, u8, u8) = (0x0a, 0x0a, 0x0a);
pub(super) const PANEL_BORDER_RGB: (u8, u8, u8) = (0xe5, 0xe7, 0xeb);
pub(super) const PANEL_TEXT_RGB: (u8, u8, u8) = (0xff, 0xff, 0xff);
pub(super) const PANEL_MUTED_RGB: (u8, u8, u8) = (0x9c, 0xa3, 0xaf);
pub(super) const MAP_LAND_RGB: (u8, u8, u8) = (0x4b, 0x55, 0x63);
pub(super) const MARKER_RGB: (u8, u8, u8) = (0x38, 0xbd, 0xf8);
pub(super) const MARKER_ACTIVE_RGB: (u8, u8, u8) = (0xf4, 0x72, 0xb6);
pub(super) const TRAIL_RGB: (u8, u8, u8) = (0xf5, 0x9e, 0x0b);
pub(super) const HEAD_RGB: (u8, u8, u8) = (0xef, 0x44, 0x44);
pub(super) const RANGE_RGB: (u8, u8, u8) = (0x22, 0xd3, 0xee);
pub(super) const DOT_RGB: (u8, u8, u8) = (0xa7, 0x8b, 0xfa);
pub(super) const ACCENT_GREEN_RGB: (u8, u8, u8) = (0x22, 0xc5, 0x5e);
pub(super) const ACCENT_RED_RGB: (u8, u8, u8) = (0xef, 0x44, 0x44);

pub(super) fn style_color(no_color: bool, color: Color) -> Style {
    if no_color {
        Style::default()
    } else {
        Style::default().fg(color)
    }
}

pub(super) const fn rgb(rgb: (u8, u8, u8)) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// Emphasis that stays visible without colors.
pub(super) fn highlight_style(no_color: bool, color: Color) -> Style {
    style_color(no_color, color).add_modifier(Modifier::BOLD)
}

pub(super) fn muted_style(no_color: bool) -> Style {
    style_color(no_color, rgb(PANEL_MUTED_RGB))
}

pub(super) fn panel_block_style(no_color: bool) -> Style {
    if no_color {
        Style::default()
    } else {
        Style::default()
            .bg(rgb(APP_BG_RGB))
            .fg(rgb(PANEL_TEXT_RGB))
    }
}

pub(super) fn panel_border_style(no_color: bool) -> Style {
    if no_color {
        Style::default()
    } else {
        Style::default().fg(rgb(PANEL_BORDER_RGB))
    }
}

pub(super) fn panel_title_style(no_color: bool) -> Style {
    if no_color {
        Style::default()
    } else {
        Style::default().fg(rgb(PANEL_TEXT_RGB))
    }
}

pub(super) fn app_background_style(no_color: bool) -> Style {
    if no_color {
        Style::default()
    } else {
        Style::default().bg(rgb(APP_BG_RGB))
    }
}
