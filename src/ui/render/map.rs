use ratatui::{
    layout::Rect,
    prelude::{Backend, Frame},
    symbols::Marker,
    text::Span,
    widgets::{
        Block, Borders,
        canvas::{Canvas, Line as CanvasLine, Map, MapResolution, Points},
    },
};

use crate::domain::{Device, LocationPoint};
use crate::ui::model::UiData;

use super::theme::{
    HEAD_RGB, MAP_LAND_RGB, MARKER_ACTIVE_RGB, MARKER_RGB, TRAIL_RGB, highlight_style,
    panel_block_style, panel_border_style, panel_title_style, rgb, style_color,
};

const LON_LIMIT: f64 = 180.0;
const LAT_LIMIT: f64 = 90.0;
const WORLD_X: [f64; 2] = [-LON_LIMIT, LON_LIMIT];
const WORLD_Y: [f64; 2] = [-LAT_LIMIT, LAT_LIMIT];
/// Smallest zoomed extent in degrees, so a single fix still shows context.
const MIN_EXTENT_DEG: f64 = 0.05;
const PADDING_RATIO: f64 = 0.2;

/// `(x_bounds, y_bounds)` of the canvas in (longitude, latitude) degrees.
pub(super) type MapBounds = ([f64; 2], [f64; 2]);

/// Zooms onto the visible trail, then the selected device, else the world.
pub(super) fn map_bounds(trail: &[LocationPoint], selected: Option<&Device>) -> MapBounds {
    let mut coords = trail
        .iter()
        .filter(|point| point.has_valid_coordinates())
        .map(|point| (point.longitude, point.latitude))
        .peekable();
    if coords.peek().is_none() {
        return selected
            .filter(|device| device.has_valid_coordinates())
            .map_or((WORLD_X, WORLD_Y), |device| {
                fit(&[(device.longitude, device.latitude)])
            });
    }
    let collected: Vec<(f64, f64)> = coords.collect();
    fit(&collected)
}

fn fit(coords: &[(f64, f64)]) -> MapBounds {
    let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
    for (x, y) in coords {
        min_x = min_x.min(*x);
        max_x = max_x.max(*x);
        min_y = min_y.min(*y);
        max_y = max_y.max(*y);
    }
    if !(min_x.is_finite() && min_y.is_finite()) {
        return (WORLD_X, WORLD_Y);
    }
    let pad_x = ((max_x - min_x) * PADDING_RATIO).max(MIN_EXTENT_DEG);
    let pad_y = ((max_y - min_y) * PADDING_RATIO).max(MIN_EXTENT_DEG);
    (
        [
            (min_x - pad_x).max(-LON_LIMIT),
            (max_x + pad_x).min(LON_LIMIT),
        ],
        [
            (min_y - pad_y).max(-LAT_LIMIT),
            (max_y + pad_y).min(LAT_LIMIT),
        ],
    )
}

pub(super) fn render_map<B: Backend>(f: &mut Frame<'_, B>, data: &UiData, area: Rect) {
    let no_color = data.no_color;
    let (x_bounds, y_bounds) = map_bounds(&data.trail, data.selected_device());
    let title = data.selected_device().map_or_else(
        || format!(" Map | {} devices ", data.devices.len()),
        |device| format!(" Map | {} ", device.display_name()),
    );
    let trail: Vec<(f64, f64)> = data
        .trail
        .iter()
        .filter(|point| point.has_valid_coordinates())
        .map(|point| (point.longitude, point.latitude))
        .collect();
    let selected_id = data.selected_id.as_deref();

    let canvas = Canvas::default()
        .block(
            Block::default()
                .title(Span::styled(title, panel_title_style(no_color)))
                .borders(Borders::ALL)
                .border_style(panel_border_style(no_color))
                .style(panel_block_style(no_color)),
        )
        .marker(Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(|ctx| {
            ctx.draw(&Map {
                color: rgb(MAP_LAND_RGB),
                resolution: MapResolution::High,
            });
            ctx.layer();

            for pair in trail.windows(2) {
                if let [(x1, y1), (x2, y2)] = pair {
                    ctx.draw(&CanvasLine {
                        x1: *x1,
                        y1: *y1,
                        x2: *x2,
                        y2: *y2,
                        color: rgb(TRAIL_RGB),
                    });
                }
            }
            ctx.draw(&Points {
                coords: &trail,
                color: rgb(TRAIL_RGB),
            });
            ctx.layer();

            for device in data.devices.iter().filter(|device| device.has_valid_coordinates()) {
                let active = selected_id == Some(device.device_id.as_str());
                // The selected device is drawn at its replayed head instead.
                if active && !trail.is_empty() {
                    continue;
                }
                let style = if active {
                    highlight_style(no_color, rgb(MARKER_ACTIVE_RGB))
                } else {
                    style_color(no_color, rgb(MARKER_RGB))
                };
                ctx.print(
                    device.longitude,
                    device.latitude,
                    Span::styled(device.platform().glyph(), style),
                );
            }
            if let Some((x, y)) = trail.last() {
                ctx.print(*x, *y, Span::styled("●", highlight_style(no_color, rgb(HEAD_RGB))));
            }
        });
    f.render_widget(canvas, area);
}

#[cfg(test)]
mod tests {
    use super::map_bounds;
    use crate::domain::LocationPoint;

    #[test]
    fn bounds_default_to_world() -> Result<(), String> {
        let ([min_x, max_x], [min_y, max_y]) = map_bounds(&[], None);
        if !(min_x <= -180.0 && max_x >= 180.0 && min_y <= -90.0 && max_y >= 90.0) {
            return Err("Expected world bounds".to_owned());
        }
        Ok(())
    }

    #[test]
    fn bounds_fit_trail_with_padding() -> Result<(), String> {
        let trail = vec![
            LocationPoint::new(48.0, 2.0, 1, "d"),
            LocationPoint::new(49.0, 3.0, 2, "d"),
        ];
        let ([min_x, max_x], [min_y, max_y]) = map_bounds(&trail, None);
        if !(min_x < 2.0 && max_x > 3.0 && min_y < 48.0 && max_y > 49.0) {
            return Err(format!("Trail not contained: {} {} {} {}", min_x, max_x, min_y, max_y));
        }
        if max_x - min_x > 2.0 {
            return Err("Bounds should zoom in on the trail".to_owned());
        }
        Ok(())
    }

    #[test]
    fn single_point_gets_minimum_extent() -> Result<(), String> {
        let trail = vec![LocationPoint::new(10.0, 20.0, 1, "d")];
        let ([min_x, max_x], _) = map_bounds(&trail, None);
        if max_x - min_x < 0.09 {
            return Err(format!("Extent too small: {}", max_x - min_x));
        }
        Ok(())
    }
}
