use std::io::Write;

use tracing::info;

use crate::domain::Device;
use crate::error::{AppError, AppResult, AuthError};
use crate::timeline::{CustomHours, TimeWindowPolicy, TimelineController};
use crate::ui::render::{detail_sections, format_timestamp};

use super::session::{Credentials, Session};

const NAME_WIDTH: usize = 18;
const ID_WIDTH: usize = 24;

/// Prints the device list as a table.
pub(crate) async fn run_devices<W: Write>(session: &Session, out: &mut W) -> AppResult<()> {
    let devices = session.devices().await?;
    info!("Fetched {} devices", devices.len());
    write_devices(&devices, out)
}

fn write_devices<W: Write>(devices: &[Device], out: &mut W) -> AppResult<()> {
    writeln!(out, "Devices ({})", devices.len())?;
    if devices.is_empty() {
        return Ok(());
    }
    writeln!(
        out,
        "{:<id$} {:<name$} {:<8} {:>10} {:>11}  LAST SEEN",
        "ID",
        "NAME",
        "PLATFORM",
        "LATITUDE",
        "LONGITUDE",
        id = ID_WIDTH,
        name = NAME_WIDTH
    )?;
    for device in devices {
        let (lat, lon) = if device.has_valid_coordinates() {
            (
                format!("{:.5}", device.latitude),
                format!("{:.5}", device.longitude),
            )
        } else {
            ("-".to_owned(), "-".to_owned())
        };
        writeln!(
            out,
            "{:<id$} {:<name$} {:<8} {:>10} {:>11}  {}",
            device.device_id,
            device.display_name(),
            device.platform().label(),
            lat,
            lon,
            format_timestamp(device.timestamp as f64),
            id = ID_WIDTH,
            name = NAME_WIDTH
        )?;
    }
    Ok(())
}

/// Prints one device's details followed by a summary of its history inside
/// the window selected by `policy`.
pub(crate) async fn run_device<W: Write>(
    session: &Session,
    device_id: &str,
    policy: TimeWindowPolicy,
    out: &mut W,
) -> AppResult<()> {
    let (details, history) = session.selection(device_id).await;
    match details {
        Ok(details) => {
            writeln!(out, "Device {}", details.device_id)?;
            for (title, rows) in detail_sections(&details) {
                writeln!(out, "{}", title)?;
                for (label, value) in rows {
                    writeln!(out, "  {}: {}", label, value)?;
                }
            }
        }
        Err(err) if err.is_unauthorized() => return Err(err),
        Err(err) => {
            writeln!(out, "Device {}", device_id)?;
            writeln!(out, "Details unavailable: {}", err)?;
        }
    }

    let points = history?;
    let fetched = points.len();
    let mut timeline = TimelineController::new(policy, CustomHours::default());
    timeline.set_points(points);
    writeln!(
        out,
        "History: {} points fetched, {} in window ({})",
        fetched,
        timeline.windowed().len(),
        timeline.policy()
    )?;
    if let (Some(first), Some(last)) = (timeline.windowed().first(), timeline.windowed().last()) {
        writeln!(out, "  From: {}", format_timestamp(first.timestamp as f64))?;
        writeln!(out, "  To:   {}", format_timestamp(last.timestamp as f64))?;
        writeln!(
            out,
            "  Last: {:.5}, {:.5}",
            last.latitude, last.longitude
        )?;
    }
    Ok(())
}

/// Logs in with the given credentials and prints the access token.
pub(crate) async fn run_login<W: Write>(
    session: &Session,
    credentials: &Credentials,
    out: &mut W,
) -> AppResult<()> {
    let Some(username) = credentials.username.as_deref() else {
        return Err(AppError::auth(AuthError::MissingCredentials));
    };
    let Some(password) = credentials.password.as_deref() else {
        return Err(AppError::auth(AuthError::MissingPassword));
    };
    let token = session.login(username, password).await?;
    writeln!(out, "{}", token)?;
    Ok(())
}
