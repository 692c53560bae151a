use chrono::{DateTime, Local, TimeZone};

const FULL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const SHORT_FORMAT: &str = "%m-%d %H:%M";
const CLOCK_FORMAT: &str = "%H:%M";
const MS_PER_DAY: f64 = 86_400_000.0;

fn to_datetime<Tz: TimeZone>(ts_ms: f64, tz: &Tz) -> Option<DateTime<Tz>> {
    if !ts_ms.is_finite() {
        return None;
    }
    let millis = ts_ms.round() as i64;
    tz.timestamp_millis_opt(millis).single()
}

/// Full date and time in `tz`, `-` when the timestamp is not representable.
#[must_use]
pub fn format_timestamp_in<Tz>(ts_ms: f64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    to_datetime(ts_ms, tz).map_or_else(
        || "-".to_owned(),
        |time| time.format(FULL_FORMAT).to_string(),
    )
}

/// Local-time rendering used by the dashboard and the text commands.
#[must_use]
pub fn format_timestamp(ts_ms: f64) -> String {
    format_timestamp_in(ts_ms, &Local)
}

/// Tick label: clock time for spans under a day, month-day otherwise.
pub(super) fn format_tick_label_in<Tz>(ts_ms: f64, span_ms: f64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let pattern = if span_ms < MS_PER_DAY {
        CLOCK_FORMAT
    } else {
        SHORT_FORMAT
    };
    to_datetime(ts_ms, tz).map_or_else(String::new, |time| time.format(pattern).to_string())
}

pub(super) fn format_tick_label(ts_ms: f64, span_ms: f64) -> String {
    format_tick_label_in(ts_ms, span_ms, &Local)
}

pub(super) fn format_coordinate(value: f64) -> String {
    format!("{:.5}", value)
}

/// Cuts `text` to `width` characters, marking the cut with `~`.
pub(super) fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_owned();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    if width > 0 {
        out.push('~');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{format_tick_label_in, format_timestamp_in, truncate};
    use chrono::Utc;

    #[test]
    fn timestamp_formats_in_the_given_zone() -> Result<(), String> {
        let text = format_timestamp_in(1_700_000_000_000.0, &Utc);
        if text != "2023-11-14 22:13:20" {
            return Err(format!("Unexpected timestamp {}", text));
        }
        if format_timestamp_in(f64::NAN, &Utc) != "-" {
            return Err("Expected placeholder for NaN".to_owned());
        }
        Ok(())
    }

    #[test]
    fn tick_label_switches_with_span() -> Result<(), String> {
        let short = format_tick_label_in(1_700_000_000_000.0, 3_600_000.0, &Utc);
        if short != "22:13" {
            return Err(format!("Unexpected short label {}", short));
        }
        let long = format_tick_label_in(1_700_000_000_000.0, 172_800_000.0, &Utc);
        if long != "11-14 22:13" {
            return Err(format!("Unexpected long label {}", long));
        }
        Ok(())
    }

    #[test]
    fn truncate_marks_cut_text() -> Result<(), String> {
        if truncate("pixel", 10) != "pixel" {
            return Err("Short text should be kept".to_owned());
        }
        if truncate("pixel-8-pro", 6) != "pixel~" {
            return Err(format!("Unexpected cut {}", truncate("pixel-8-pro", 6)));
        }
        Ok(())
    }
}
