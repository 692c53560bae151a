use super::model::{StatusLine, TimelineView, UiData};
use super::render::{Ui, UiActions};
use crate::domain::{Device, DeviceDetails, DeviceInfos, LocationPoint};
use crate::error::{AppError, AppResult};
use crate::timeline::{CursorHandle, Tick, TimeWindowPolicy, WindowPreset};
use ratatui::Terminal;
use ratatui::backend::TestBackend;

fn render_to_text(data: &UiData, width: u16, height: u16) -> AppResult<String> {
    let backend = TestBackend::new(width, height);
    let mut terminal = match Terminal::new(backend) {
        Ok(term) => term,
        Err(err) => {
            return Err(AppError::validation(format!(
                "Failed to create TestBackend terminal: {}",
                err
            )));
        }
    };
    Ui::render(&mut terminal, data);
    Ok(format!("{:?}", terminal.backend().buffer()))
}

fn device(id: &str, name: &str) -> Device {
    Device {
        device_id: id.to_owned(),
        latitude: 48.85,
        longitude: 2.35,
        timestamp: 1_700_000_000_000,
        infos: DeviceInfos {
            device_id: id.to_owned(),
            display_name: Some(name.to_owned()),
            ..DeviceInfos::default()
        },
    }
}

#[test]
fn ui_render_empty_dashboard() -> AppResult<()> {
    let data = UiData {
        api_url: "http://localhost:8000".to_owned(),
        ..UiData::default()
    };
    let text = render_to_text(&data, 80, 24)?;
    if !text.contains("No devices reported yet") {
        return Err(AppError::validation("Empty strip message missing"));
    }
    if !text.contains("Select a device") {
        return Err(AppError::validation("Timeline hint missing"));
    }
    Ok(())
}

#[test]
fn ui_render_selected_device_with_trail() -> AppResult<()> {
    let trail = vec![
        LocationPoint::new(48.85, 2.35, 1_700_000_000_000, "dev-1"),
        LocationPoint::new(48.86, 2.36, 1_700_000_600_000, "dev-1"),
    ];
    let data = UiData {
        api_url: "http://localhost:8000".to_owned(),
        devices: vec![device("dev-1", "pixel"), device("dev-2", "iphone")],
        selected_id: Some("dev-1".to_owned()),
        details: Some(DeviceDetails {
            device_id: "dev-1".to_owned(),
            ..DeviceDetails::default()
        }),
        status: StatusLine::error("Failed to refresh devices"),
        trail,
        timeline: TimelineView {
            policy: TimeWindowPolicy::All,
            preset: WindowPreset::All,
            in_pct: 10.0,
            out_pct: 90.0,
            head_pct: 50.0,
            in_ts: 1_700_000_000_000.0,
            head_ts: 1_700_000_300_000.0,
            out_ts: 1_700_000_600_000.0,
            focus: CursorHandle::Head,
            playing: true,
            ticks: vec![
                Tick {
                    pct: 0.0,
                    ts: 1_700_000_000_000.0,
                },
                Tick {
                    pct: 100.0,
                    ts: 1_700_000_600_000.0,
                },
            ],
            dots: vec![0.0, 100.0],
            windowed_count: 2,
            total_count: 2,
            visible_count: 2,
            ..TimelineView::default()
        },
        ..UiData::default()
    };
    let text = render_to_text(&data, 120, 40)?;
    for expected in ["Failed to refresh devices", "pixel", "iphone", "[All]", "playing", "Device"] {
        if !text.contains(expected) {
            return Err(AppError::validation(format!("Missing `{}` in frame", expected)));
        }
    }
    Ok(())
}

#[test]
fn ui_render_narrow_terminal_while_loading() -> AppResult<()> {
    let data = UiData {
        devices: vec![device("dev-1", "pixel")],
        selected_id: Some("dev-1".to_owned()),
        history_loading: true,
        ..UiData::default()
    };
    let text = render_to_text(&data, 60, 20)?;
    if !text.contains("Loading history") {
        return Err(AppError::validation("Loading hint missing"));
    }
    Ok(())
}

#[test]
fn selected_device_looks_up_by_id() -> AppResult<()> {
    let data = UiData {
        devices: vec![device("dev-1", "pixel"), device("dev-2", "iphone")],
        selected_id: Some("dev-2".to_owned()),
        ..UiData::default()
    };
    match data.selected_device() {
        Some(found) if found.device_id == "dev-2" => Ok(()),
        Some(_) | None => Err(AppError::validation("Wrong selected device")),
    }
}
