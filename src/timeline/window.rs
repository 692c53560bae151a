use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use crate::domain::LocationPoint;
use crate::error::ValidationError;

pub const MS_PER_HOUR: i64 = 3_600_000;
pub const CUSTOM_HOURS_MIN: u32 = 1;
/// One year of hours.
pub const CUSTOM_HOURS_MAX: u32 = 8_760;
const DEFAULT_CUSTOM_HOURS: u32 = 12;
const DEFAULT_WINDOW_HOURS: u32 = 24;

/// Hour count for the custom window, always within
/// [`CUSTOM_HOURS_MIN`, `CUSTOM_HOURS_MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CustomHours(u32);

impl CustomHours {
    /// Clamps silently; out-of-range input is never an error.
    #[must_use]
    pub fn clamped(value: i64) -> Self {
        let bounded = value.clamp(i64::from(CUSTOM_HOURS_MIN), i64::from(CUSTOM_HOURS_MAX));
        Self(u32::try_from(bounded).unwrap_or(CUSTOM_HOURS_MAX))
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Default for CustomHours {
    fn default() -> Self {
        Self(DEFAULT_CUSTOM_HOURS)
    }
}

/// Which part of the history is eligible for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeWindowPolicy {
    FixedHours(NonZeroU32),
    All,
    Custom(CustomHours),
}

impl TimeWindowPolicy {
    /// Hours back from the newest point, or `None` for the whole history.
    #[must_use]
    pub const fn hours(self) -> Option<u32> {
        match self {
            TimeWindowPolicy::FixedHours(hours) => Some(hours.get()),
            TimeWindowPolicy::Custom(hours) => Some(hours.get()),
            TimeWindowPolicy::All => None,
        }
    }

    #[must_use]
    pub const fn preset(self) -> WindowPreset {
        match self {
            TimeWindowPolicy::FixedHours(hours) => WindowPreset::Hours(hours.get()),
            TimeWindowPolicy::All => WindowPreset::All,
            TimeWindowPolicy::Custom(_) => WindowPreset::Custom,
        }
    }
}

impl Default for TimeWindowPolicy {
    fn default() -> Self {
        NonZeroU32::new(DEFAULT_WINDOW_HOURS).map_or(Self::All, Self::FixedHours)
    }
}

impl fmt::Display for TimeWindowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeWindowPolicy::FixedHours(hours) => write!(f, "{}h", hours),
            TimeWindowPolicy::All => write!(f, "all"),
            TimeWindowPolicy::Custom(hours) => write!(f, "custom ({}h)", hours.get()),
        }
    }
}

/// The choices offered by the window selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowPreset {
    Hours(u32),
    All,
    Custom,
}

pub const WINDOW_PRESETS: [WindowPreset; 7] = [
    WindowPreset::Hours(1),
    WindowPreset::Hours(4),
    WindowPreset::Hours(8),
    WindowPreset::Hours(24),
    WindowPreset::Hours(48),
    WindowPreset::All,
    WindowPreset::Custom,
];

impl WindowPreset {
    #[must_use]
    pub fn policy(self, custom: CustomHours) -> TimeWindowPolicy {
        match self {
            WindowPreset::Hours(hours) => {
                NonZeroU32::new(hours).map_or(TimeWindowPolicy::All, TimeWindowPolicy::FixedHours)
            }
            WindowPreset::All => TimeWindowPolicy::All,
            WindowPreset::Custom => TimeWindowPolicy::Custom(custom),
        }
    }

    /// The preset after `self` in [`WINDOW_PRESETS`], wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        let idx = WINDOW_PRESETS
            .iter()
            .position(|preset| *preset == self)
            .map_or(0, |idx| idx.saturating_add(1));
        WINDOW_PRESETS
            .get(idx)
            .or_else(|| WINDOW_PRESETS.first())
            .copied()
            .unwrap_or(WindowPreset::All)
    }

    #[must_use]
    pub fn label(self) -> String {
        match self {
            WindowPreset::Hours(hours) => format!("{}h", hours),
            WindowPreset::All => "All".to_owned(),
            WindowPreset::Custom => "Custom".to_owned(),
        }
    }
}

impl FromStr for WindowPreset {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        if normalized == "all" {
            return Ok(WindowPreset::All);
        }
        if normalized == "custom" {
            return Ok(WindowPreset::Custom);
        }
        let digits = normalized.strip_suffix('h').unwrap_or(&normalized);
        let hours: u32 = digits.parse().map_err(|_err: std::num::ParseIntError| {
            ValidationError::InvalidWindow {
                value: s.to_owned(),
            }
        })?;
        let preset = WindowPreset::Hours(hours);
        if WINDOW_PRESETS.contains(&preset) {
            Ok(preset)
        } else {
            Err(ValidationError::InvalidWindow {
                value: s.to_owned(),
            })
        }
    }
}

/// Sorts the points by timestamp (stable) and keeps the suffix eligible under
/// `policy`. The cutoff is inclusive.
#[must_use]
pub fn select_window(points: &[LocationPoint], policy: TimeWindowPolicy) -> Vec<LocationPoint> {
    let mut sorted = points.to_vec();
    sorted.sort_by_key(|point| point.timestamp);
    let Some(hours) = policy.hours() else {
        return sorted;
    };
    let Some(newest) = sorted.last().map(|point| point.timestamp) else {
        return sorted;
    };
    let cutoff = newest.saturating_sub(i64::from(hours).saturating_mul(MS_PER_HOUR));
    let start = sorted.partition_point(|point| point.timestamp < cutoff);
    sorted.split_off(start)
}
